//! Harvest by touch: walking into a ripe plant picks it.

use bevy::prelude::*;
use crate::shared::*;
use super::crops::{crop_name, harvest_item};
use super::PlantSprite;

/// Any harvestable plant whose render rect overlaps the player hitbox is
/// harvested: the crop goes to the inventory, the tile stays tilled.
pub fn resolve_plant_collisions(
    mut commands: Commands,
    time: Res<Time>,
    mut soil: ResMut<SoilGrid>,
    player_query: Query<&PlayerController, With<Player>>,
    plant_query: Query<(&PlantSprite, &Bounds, &Sprite)>,
    mut item_events: EventWriter<ItemGainedEvent>,
) {
    let Ok(player) = player_query.get_single() else {
        return;
    };

    for (plant, bounds, sprite) in plant_query.iter() {
        if !bounds.0.overlaps(&player.hitbox) {
            continue;
        }
        let Some(crop) = soil.bypass_change_detection().harvest(plant.tile) else {
            continue;
        };
        soil.set_changed();
        item_events.send(ItemGainedEvent {
            item: harvest_item(crop),
            quantity: 1,
        });
        commands.spawn(particle_bundle(
            sprite.image.clone(),
            bounds.0,
            Depth::Main,
            time.elapsed(),
        ));
        info!(
            "[Farming] Harvested {} at ({}, {})",
            crop_name(crop),
            plant.tile.x,
            plant.tile.y
        );
    }
}
