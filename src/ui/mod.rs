pub mod audio;
pub mod hud;
pub mod shop_screen;
pub mod transitions;

use bevy::prelude::*;
use crate::shared::*;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        // ─── OVERLAYS: always present ───
        app.add_systems(Startup, transitions::spawn_overlays);
        app.add_systems(
            Update,
            (
                transitions::update_sky_overlay,
                transitions::update_night_fade,
            )
                .after(FrameSet::DayReset),
        );

        // ─── HUD: visible during Playing state ───
        app.add_systems(OnEnter(GameState::Playing), hud::spawn_hud);
        app.add_systems(OnExit(GameState::Playing), hud::despawn_hud);
        app.add_systems(
            Update,
            hud::update_hud
                .after(FrameSet::Resolve)
                .run_if(in_state(GameState::Playing)),
        );

        // ─── SHOP SCREEN ───
        app.add_systems(OnEnter(GameState::Shop), shop_screen::spawn_shop_screen);
        app.add_systems(OnExit(GameState::Shop), shop_screen::despawn_shop_screen);
        app.add_systems(Update, shop_screen::shop_input.in_set(FrameSet::Shop));

        // ─── AUDIO ───
        app.init_resource::<audio::MusicState>();
        app.add_systems(
            Update,
            (audio::handle_play_sfx, audio::handle_play_music)
                .after(FrameSet::DayReset)
                .run_if(resource_exists::<AssetServer>),
        );
    }
}
