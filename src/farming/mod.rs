//! Farming domain: soil tilling, watering, planting, crop growth, harvest.
//!
//! Communicates with other domains exclusively through crate::shared events/resources.

use bevy::prelude::*;
use std::collections::HashMap;
use crate::shared::*;

pub mod crops;
pub mod events_handler;
pub mod harvest;
pub mod render;
pub mod soil;

/// Tilled-soil sprite for one tile.
#[derive(Component, Debug, Clone, Copy)]
pub struct SoilOverlay {
    pub tile: IVec2,
}

/// Wet-soil sprite drawn over a tilled tile.
#[derive(Component, Debug, Clone, Copy)]
pub struct WaterOverlay {
    pub tile: IVec2,
}

/// Visual for the plant on a tile. The grid cell is authoritative.
#[derive(Component, Debug, Clone, Copy)]
pub struct PlantSprite {
    pub tile: IVec2,
    pub crop: CropKind,
    pub stage: u8,
}

/// Tracks which overlay entities exist keyed by tile, so the sync pass
/// never spawns a second overlay for the same tile.
#[derive(Resource, Default, Debug)]
pub struct FarmEntities {
    pub soil: HashMap<IVec2, Entity>,
    pub water: HashMap<IVec2, Entity>,
    pub plants: HashMap<IVec2, Entity>,
}

pub struct FarmingPlugin;

impl Plugin for FarmingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FarmEntities>()
            // ------------------------------------------------------------------
            // Intents from the player, then harvest by touch
            // ------------------------------------------------------------------
            .add_systems(
                Update,
                (
                    events_handler::handle_tool_use,
                    events_handler::handle_seed_use,
                    harvest::resolve_plant_collisions,
                )
                    .chain()
                    .in_set(FrameSet::Resolve),
            )
            .add_systems(Update, events_handler::water_in_rain.in_set(FrameSet::Weather))
            .add_systems(Update, events_handler::on_day_reset.in_set(FrameSet::DayReset))
            // ------------------------------------------------------------------
            // Visual sync: runs after all state mutations
            // ------------------------------------------------------------------
            .add_systems(
                PostUpdate,
                render::sync_soil_entities
                    .run_if(resource_exists::<GameAssets>)
                    .run_if(resource_changed::<SoilGrid>)
                    .before(DrawSync),
            );
    }
}
