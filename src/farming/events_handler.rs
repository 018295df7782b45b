//! Handlers for player intents (hoe, watering can, seeds), rain, and the day reset.
//!
//! Grid writes go through `bypass_change_detection` so that rejected actions
//! do not trigger a sprite resync.

use bevy::prelude::*;
use crate::shared::*;
use super::crops::crop_name;

// ─────────────────────────────────────────────────────────────────────────────
// Tools
// ─────────────────────────────────────────────────────────────────────────────

pub fn handle_tool_use(
    mut tool_events: EventReader<ToolUseEvent>,
    mut soil: ResMut<SoilGrid>,
    weather: Res<Weather>,
    mut sfx_events: EventWriter<PlaySfxEvent>,
) {
    for event in tool_events.read() {
        let tile = SoilGrid::tile_at(event.target);
        match event.tool {
            Tool::Hoe => {
                sfx_events.send(PlaySfxEvent { sfx_id: "hoe".to_string() });
                if soil.bypass_change_detection().till(tile) {
                    if weather.raining {
                        soil.bypass_change_detection().water(tile);
                    }
                    soil.set_changed();
                    info!("[Farming] Tilled ({}, {})", tile.x, tile.y);
                }
            }
            Tool::Water => {
                sfx_events.send(PlaySfxEvent { sfx_id: "water".to_string() });
                if soil.bypass_change_detection().water(tile) {
                    soil.set_changed();
                }
            }
            // Trees handle the axe.
            Tool::Axe => {}
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Seeds
// ─────────────────────────────────────────────────────────────────────────────

/// Plants only if a seed is in stock, and only consumes it if planting succeeds.
pub fn handle_seed_use(
    mut seed_events: EventReader<SeedUseEvent>,
    mut soil: ResMut<SoilGrid>,
    mut inventory: ResMut<Inventory>,
    mut sfx_events: EventWriter<PlaySfxEvent>,
) {
    for event in seed_events.read() {
        if inventory.seed_count(event.crop) == 0 {
            continue;
        }
        let tile = SoilGrid::tile_at(event.target);
        if soil.bypass_change_detection().plant(tile, event.crop) {
            soil.set_changed();
            inventory.take_seed(event.crop);
            sfx_events.send(PlaySfxEvent { sfx_id: "plant".to_string() });
            info!(
                "[Farming] Planted {} at ({}, {}), {} seeds left",
                crop_name(event.crop),
                tile.x,
                tile.y,
                inventory.seed_count(event.crop)
            );
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Rain
// ─────────────────────────────────────────────────────────────────────────────

pub fn water_in_rain(weather: Res<Weather>, mut soil: ResMut<SoilGrid>) {
    if !weather.raining {
        return;
    }
    if soil.bypass_change_detection().water_all() > 0 {
        soil.set_changed();
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Day reset
// ─────────────────────────────────────────────────────────────────────────────

/// Grow first, then dry out: a plant watered today grows overnight.
pub fn on_day_reset(mut reset_events: EventReader<DayResetEvent>, mut soil: ResMut<SoilGrid>) {
    for _ in reset_events.read() {
        soil.advance_growth();
        soil.clear_water();
        let planted = soil.cells.iter().filter(|c| c.plant.is_some()).count();
        info!("[Farming] Day reset: {} plants advanced, soil dried", planted);
    }
}
