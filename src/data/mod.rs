//! Data layer: builds the map and asset tables at startup.
//!
//! Runs in OnEnter(GameState::Loading): applies the `GameConfig` start values,
//! loads the map (built-in farm or RON file), scans the asset folders and
//! loads image handles, then transitions into GameState::Playing.
//!
//! A missing asset folder or an unreadable map is fatal: the error is logged
//! and the app exits with an error code. Without an `AssetServer` (headless)
//! the folder scan is skipped and empty handles are used.

pub mod assets;
pub mod map;

use std::path::Path;

use bevy::prelude::*;

use crate::shared::*;
use assets::AssetManifest;

pub struct DataPlugin;

impl Plugin for DataPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Loading), load_game_data);
    }
}

fn load_game_data(
    mut commands: Commands,
    config: Res<GameConfig>,
    asset_server: Option<Res<AssetServer>>,
    mut next_state: ResMut<NextState<GameState>>,
    mut app_exit: EventWriter<AppExit>,
) {
    info!("[Data] Loading map and assets...");

    let map = match MapData::from_config(&config.map) {
        Ok(map) => map,
        Err(e) => {
            error!("[Data] {e}");
            app_exit.send(AppExit::error());
            return;
        }
    };
    info!(
        "[Data] Map {}x{} tiles, {} tile layers, {} object layers",
        map.width,
        map.height,
        map.tile_layers.len(),
        map.object_layers.len()
    );
    if let Some(path) = &config.map.dump_json {
        dump_map_json(&map, Path::new(path));
    }

    let assets = match asset_server {
        Some(server) => match AssetManifest::scan(Path::new(&config.map.assets_root), &map) {
            Ok(manifest) => GameAssets::from_manifest(&manifest, &server),
            Err(e) => {
                error!("[Data] {e}");
                app_exit.send(AppExit::error());
                return;
            }
        },
        None => {
            info!("[Data] No AssetServer; using empty image handles");
            GameAssets::default()
        }
    };

    commands.insert_resource(Inventory::from_config(&config.start));
    commands.insert_resource(Sky::from_config(&config.sky));
    commands.insert_resource(SleepTransition::new(config.transition.speed));
    commands.insert_resource(WorldMap {
        size: map.pixel_size(),
    });
    commands.insert_resource(map);
    commands.insert_resource(assets);

    info!("[Data] Ready. Transitioning to Playing.");
    next_state.set(GameState::Playing);
}

/// Debug dump of the loaded map. Failure only warns.
fn dump_map_json(map: &MapData, path: &Path) {
    match map.to_json().and_then(|json| {
        std::fs::write(path, json).map_err(|e| format!("write {}: {e}", path.display()))
    }) {
        Ok(()) => info!("[Data] Map dumped to {}", path.display()),
        Err(e) => warn!("[Data] Map dump failed: {e}"),
    }
}
