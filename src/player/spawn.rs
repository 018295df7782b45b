use bevy::prelude::*;
use crate::shared::*;

/// Spawn the player centred on the map's `Start` object.
/// Runs on `OnEnter(GameState::Playing)`.
pub fn spawn_player(
    mut commands: Commands,
    existing: Query<Entity, With<Player>>,
    map: Option<Res<MapData>>,
    config: Res<GameConfig>,
    assets: Option<Res<GameAssets>>,
) {
    // Guard: don't double-spawn when the shop closes.
    if !existing.is_empty() {
        return;
    }
    let Some(start) = map.as_deref().and_then(|m| m.object("Player", "Start")) else {
        warn!("[Player] No Player/Start object in map; player not spawned");
        return;
    };

    let controller = PlayerController::new(IVec2::new(start.x, start.y), &config);
    let image = assets
        .as_deref()
        .and_then(|a| a.player_frames(&controller.status).first().cloned())
        .unwrap_or_default();

    info!(
        "[Player] Spawned at ({}, {})",
        controller.rect.center_point().x,
        controller.rect.center_point().y
    );
    commands.spawn((
        Player,
        Sprite {
            image,
            custom_size: Some(controller.rect.size().as_vec2()),
            ..default()
        },
        Bounds(controller.rect),
        Depth::Main,
        controller,
    ));
}
