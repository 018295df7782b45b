pub mod camera;
pub mod controller;
pub mod movement;
pub mod spawn;

use bevy::prelude::*;
use crate::shared::*;

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        // -- Spawn player when we enter Playing --
        app.add_systems(OnEnter(GameState::Playing), spawn::spawn_player);

        // -- One frame of the player, frozen while the shop is open --
        app.add_systems(
            Update,
            (
                movement::handle_player_input,
                movement::move_player,
                movement::animate_player,
            )
                .chain()
                .in_set(FrameSet::Simulate),
        );

        // -- Camera offset feeds the draw pass --
        app.add_systems(PostUpdate, camera::update_camera_offset.before(DrawSync));
    }
}
