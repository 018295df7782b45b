//! Map data: RON loading, JSON dump, and the built-in farm layout.

use std::collections::{BTreeMap, BTreeSet};
use std::{fs, path::Path};

use bevy::prelude::*;

use crate::shared::*;

impl MapData {
    pub fn load_ron(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .map_err(|e| format!("read map {}: {e}", path.display()))?;
        let map: MapData =
            ron::from_str(&data).map_err(|e| format!("parse map {}: {e}", path.display()))?;
        map.check()?;
        Ok(map)
    }

    /// Built-in farm unless the config names a map file.
    pub fn from_config(config: &MapConfig) -> Result<Self, String> {
        match &config.path {
            Some(path) => Self::load_ron(path),
            None => Ok(Self::generate_farm()),
        }
    }

    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string_pretty(self).map_err(|e| format!("serialize map: {e}"))
    }

    fn check(&self) -> Result<(), String> {
        if self.width <= 0 || self.height <= 0 {
            return Err(format!("map has no area: {}x{}", self.width, self.height));
        }
        if self.object("Player", "Start").is_none() {
            return Err("map has no Player/Start object".into());
        }
        Ok(())
    }

    pub fn pixel_size(&self) -> IVec2 {
        IVec2::new(self.width * TILE_SIZE, self.height * TILE_SIZE)
    }

    pub fn tiles(&self, layer: &str) -> &[TileEntry] {
        self.tile_layers.get(layer).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn objects(&self, layer: &str) -> &[ObjectEntry] {
        self.object_layers.get(layer).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn object(&self, layer: &str, name: &str) -> Option<&ObjectEntry> {
        self.objects(layer).iter().find(|o| o.name == name)
    }

    /// Every image path referenced by any layer.
    pub fn image_paths(&self) -> BTreeSet<String> {
        let tiles = self
            .tile_layers
            .values()
            .flatten()
            .filter_map(|t| t.image.clone());
        let objects = self
            .object_layers
            .values()
            .flatten()
            .filter_map(|o| o.image.clone());
        tiles.chain(objects).collect()
    }

    /// A 40x30 farm: house with bed in the north-west, field in the middle,
    /// pond in the south-east, trader by the north fence.
    pub fn generate_farm() -> Self {
        let width = 40;
        let height = 30;
        let mut tile_layers: BTreeMap<String, Vec<TileEntry>> = BTreeMap::new();
        let mut object_layers: BTreeMap<String, Vec<ObjectEntry>> = BTreeMap::new();

        let mut put = |layer: &str, col: i32, row: i32, image: Option<&str>| {
            tile_layers.entry(layer.to_string()).or_default().push(TileEntry {
                col,
                row,
                image: image.map(str::to_string),
            });
        };

        // Map border
        for col in 0..width {
            put("Collision", col, 0, None);
            put("Collision", col, height - 1, None);
        }
        for row in 1..height - 1 {
            put("Collision", 0, row, None);
            put("Collision", width - 1, row, None);
        }

        // House: walls on cols 3..=11, rows 3..=10, door at (7, 10)
        let (house_l, house_r, house_t, house_b) = (3, 11, 3, 10);
        for row in house_t..=house_b {
            for col in house_l..=house_r {
                let wall = row == house_t || row == house_b || col == house_l || col == house_r;
                let door = row == house_b && col == 7;
                if wall && !door {
                    put("HouseWalls", col, row, Some("graphics/house/wall.png"));
                    put("Collision", col, row, None);
                } else {
                    put("HouseFloor", col, row, Some("graphics/house/floor.png"));
                }
            }
        }
        put("HouseFurnitureBottom", 6, 7, Some("graphics/house/rug.png"));
        put("HouseFurnitureBottom", 7, 7, Some("graphics/house/rug.png"));
        put("HouseFurnitureTop", 9, 5, Some("graphics/house/table.png"));
        put("Collision", 9, 5, None);

        // North fence
        for col in 13..=28 {
            put("Fence", col, 1, Some("graphics/world/fence.png"));
        }

        // Pond
        for row in 20..=26 {
            for col in 30..=37 {
                put("Water", col, row, None);
                put("Collision", col, row, None);
            }
        }

        // Field
        for row in 8..=18 {
            for col in 14..=26 {
                put("Farmable", col, row, None);
            }
        }

        let mut obj = |layer: &str, name: &str, x: i32, y: i32, w: i32, h: i32, image: Option<&str>| {
            object_layers.entry(layer.to_string()).or_default().push(ObjectEntry {
                x,
                y,
                width: w,
                height: h,
                name: name.to_string(),
                image: image.map(str::to_string),
            });
        };

        obj("Trees", "Small", 32 * TILE_SIZE, 8 * TILE_SIZE, 64, 80, Some("graphics/objects/tree_small.png"));
        obj("Trees", "Large", 34 * TILE_SIZE, 12 * TILE_SIZE, 96, 112, Some("graphics/objects/tree_large.png"));
        obj("Trees", "Small", 2 * TILE_SIZE, 18 * TILE_SIZE, 64, 80, Some("graphics/objects/tree_small.png"));
        obj("Trees", "Large", 6 * TILE_SIZE, 22 * TILE_SIZE, 96, 112, Some("graphics/objects/tree_large.png"));

        obj("Decoration", "Flower", 12 * TILE_SIZE, 12 * TILE_SIZE, 32, 32, Some("graphics/objects/flower.png"));
        obj("Decoration", "Flower", 28 * TILE_SIZE, 6 * TILE_SIZE, 32, 32, Some("graphics/objects/flower.png"));
        obj("Decoration", "Bush", 28 * TILE_SIZE, 16 * TILE_SIZE, 64, 64, Some("graphics/objects/bush.png"));

        obj("Player", "Start", 1400, 700, 0, 0, None);
        obj("Player", "Bed", 4 * TILE_SIZE, 4 * TILE_SIZE, 128, 64, None);
        obj("Player", "Trader", 20 * TILE_SIZE, 2 * TILE_SIZE, 128, 128, None);

        Self {
            width,
            height,
            tile_layers,
            object_layers,
        }
    }
}
