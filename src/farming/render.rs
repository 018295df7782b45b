//! Visual synchronisation: soil, water and plant entities mirror `SoilGrid`.
//!
//! The grid is authoritative. Entities are spawned, updated and despawned
//! here so that each tile owns at most one overlay of each kind.

use bevy::math::IRect;
use bevy::prelude::*;
use rand::seq::SliceRandom;
use crate::shared::*;
use super::crops::{plant_collider, plant_depth, plant_rect};
use super::{FarmEntities, PlantSprite, SoilOverlay, WaterOverlay};

// ─────────────────────────────────────────────────────────────────────────────
// Autotiling
// ─────────────────────────────────────────────────────────────────────────────

/// Soil image name from which orthogonal neighbours are tilled.
pub fn soil_variant(grid: &SoilGrid, tile: IVec2) -> &'static str {
    let t = grid.is_tilled(tile + IVec2::new(0, -1));
    let b = grid.is_tilled(tile + IVec2::new(0, 1));
    let l = grid.is_tilled(tile + IVec2::new(-1, 0));
    let r = grid.is_tilled(tile + IVec2::new(1, 0));

    match (t, b, l, r) {
        (true, true, true, true) => "x",
        (false, false, true, false) => "r",
        (false, false, false, true) => "l",
        (false, false, true, true) => "lr",
        (true, false, false, false) => "b",
        (false, true, false, false) => "t",
        (true, true, false, false) => "tb",
        (false, true, true, false) => "tr",
        (false, true, false, true) => "tl",
        (true, false, true, false) => "br",
        (true, false, false, true) => "bl",
        (true, true, false, true) => "tbr",
        (true, true, true, false) => "tbl",
        (true, false, true, true) => "lrb",
        (false, true, true, true) => "lrt",
        (false, false, false, false) => "o",
    }
}

fn tile_rect(tile: IVec2) -> IRect {
    rect_xywh(tile.x * TILE_SIZE, tile.y * TILE_SIZE, TILE_SIZE, TILE_SIZE)
}

fn sprite(image: Handle<Image>, rect: IRect) -> Sprite {
    Sprite {
        image,
        custom_size: Some(rect.size().as_vec2()),
        ..default()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Sync
// ─────────────────────────────────────────────────────────────────────────────

pub fn sync_soil_entities(
    mut commands: Commands,
    mut farm_entities: ResMut<FarmEntities>,
    grid: Res<SoilGrid>,
    assets: Res<GameAssets>,
) {
    let mut rng = rand::thread_rng();

    for (tile, cell) in grid.tiles() {
        // Tilled soil
        match (cell.tilled, farm_entities.soil.get(&tile).copied()) {
            (true, Some(entity)) => {
                let rect = tile_rect(tile);
                commands
                    .entity(entity)
                    .insert(sprite(assets.soil_tile(soil_variant(&grid, tile)), rect));
            }
            (true, None) => {
                let rect = tile_rect(tile);
                let entity = commands
                    .spawn((
                        SoilOverlay { tile },
                        sprite(assets.soil_tile(soil_variant(&grid, tile)), rect),
                        Bounds(rect),
                        Depth::Soil,
                    ))
                    .id();
                farm_entities.soil.insert(tile, entity);
            }
            (false, Some(entity)) => {
                commands.entity(entity).despawn();
                farm_entities.soil.remove(&tile);
            }
            (false, None) => {}
        }

        // Water overlay
        match (cell.watered, farm_entities.water.get(&tile).copied()) {
            (true, None) => {
                let rect = tile_rect(tile);
                let image = assets.soil_water.choose(&mut rng).cloned().unwrap_or_default();
                let entity = commands
                    .spawn((WaterOverlay { tile }, sprite(image, rect), Bounds(rect), Depth::SoilWater))
                    .id();
                farm_entities.water.insert(tile, entity);
            }
            (false, Some(entity)) => {
                commands.entity(entity).despawn();
                farm_entities.water.remove(&tile);
            }
            _ => {}
        }

        // Plant
        match (cell.plant, farm_entities.plants.get(&tile).copied()) {
            (Some(plant), existing) => {
                let rect = plant_rect(tile, plant.crop, plant.stage);
                let components = (
                    PlantSprite {
                        tile,
                        crop: plant.crop,
                        stage: plant.stage,
                    },
                    sprite(assets.crop_frame(plant.crop, plant.stage), rect),
                    Bounds(rect),
                    plant_depth(plant.stage),
                );
                let entity = match existing {
                    Some(entity) => {
                        commands.entity(entity).insert(components);
                        entity
                    }
                    None => {
                        let entity = commands.spawn(components).id();
                        farm_entities.plants.insert(tile, entity);
                        entity
                    }
                };
                match plant_collider(rect, plant.stage) {
                    Some(hitbox) => {
                        commands.entity(entity).insert(Collider { hitbox });
                    }
                    None => {
                        commands.entity(entity).remove::<Collider>();
                    }
                }
            }
            (None, Some(entity)) => {
                commands.entity(entity).despawn();
                farm_entities.plants.remove(&tile);
            }
            (None, None) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with(tilled: &[(i32, i32)]) -> SoilGrid {
        let mut grid = SoilGrid::from_farmable(5, 5, (0..5).flat_map(|y| (0..5).map(move |x| IVec2::new(x, y))));
        for &(x, y) in tilled {
            grid.till(IVec2::new(x, y));
        }
        grid
    }

    #[test]
    fn test_isolated_tile() {
        let grid = grid_with(&[(2, 2)]);
        assert_eq!(soil_variant(&grid, IVec2::new(2, 2)), "o");
    }

    #[test]
    fn test_horizontal_run() {
        let grid = grid_with(&[(1, 2), (2, 2), (3, 2)]);
        assert_eq!(soil_variant(&grid, IVec2::new(1, 2)), "l");
        assert_eq!(soil_variant(&grid, IVec2::new(2, 2)), "lr");
        assert_eq!(soil_variant(&grid, IVec2::new(3, 2)), "r");
    }

    #[test]
    fn test_vertical_run_and_cross() {
        let grid = grid_with(&[(2, 1), (2, 2), (2, 3), (1, 2), (3, 2)]);
        assert_eq!(soil_variant(&grid, IVec2::new(2, 1)), "t");
        assert_eq!(soil_variant(&grid, IVec2::new(2, 3)), "b");
        assert_eq!(soil_variant(&grid, IVec2::new(2, 2)), "x");
    }

    #[test]
    fn test_edge_of_grid_counts_as_untilled() {
        let grid = grid_with(&[(0, 0), (1, 0)]);
        assert_eq!(soil_variant(&grid, IVec2::new(0, 0)), "l");
    }
}
