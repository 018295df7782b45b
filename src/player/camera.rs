use bevy::prelude::*;
use crate::shared::*;

/// Camera offset = player render centre minus half the viewport.
/// Recomputed every frame; the draw pass subtracts it from every entity.
pub fn update_camera_offset(
    config: Res<GameConfig>,
    player_query: Query<&PlayerController, With<Player>>,
    mut offset: ResMut<CameraOffset>,
) {
    let Ok(player) = player_query.get_single() else {
        return;
    };
    offset.0 = camera_offset(
        player.rect.center_point(),
        Vec2::new(config.window.width, config.window.height),
    );
}

pub fn camera_offset(player_center: IVec2, viewport: Vec2) -> Vec2 {
    player_center.as_vec2() - viewport / 2.0
}
