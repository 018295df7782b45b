mod shared;
mod input;
mod player;
mod farming;
mod world;
mod level;
mod ui;
mod data;

use bevy::prelude::*;
use bevy::window::{PresentMode, WindowResolution};

use shared::*;

/// Problems found while reading the config, logged once the log plugin is up.
#[derive(Resource, Default)]
struct ConfigWarnings(Vec<String>);

fn main() {
    let (config, load_error) = GameConfig::load_or_default(DEFAULT_CONFIG_PATH);
    let mut warnings = Vec::new();
    if let Some(e) = load_error {
        warnings.push(format!("{DEFAULT_CONFIG_PATH}: {e}; using defaults"));
    }
    warnings.extend(config.validate());

    let mut app = App::new();
    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: config.window.title.clone(),
                    resolution: WindowResolution::new(config.window.width, config.window.height),
                    present_mode: PresentMode::AutoVsync,
                    resizable: false,
                    ..default()
                }),
                ..default()
            })
            .set(ImagePlugin::default_nearest()),
    )
    // Game state
    .init_state::<GameState>()
    // Shared resources
    .insert_resource(config)
    .insert_resource(ConfigWarnings(warnings))
    .init_resource::<Inventory>()
    .init_resource::<SoilGrid>()
    .init_resource::<WorldMap>()
    .init_resource::<Weather>()
    .init_resource::<Sky>()
    .init_resource::<SleepTransition>()
    .init_resource::<CameraOffset>()
    .init_resource::<PlayerInput>()
    .init_resource::<KeyBindings>()
    // Events
    .add_event::<ToolUseEvent>()
    .add_event::<SeedUseEvent>()
    .add_event::<ShopToggleEvent>()
    .add_event::<DayResetEvent>()
    .add_event::<ItemGainedEvent>()
    .add_event::<PlaySfxEvent>()
    .add_event::<PlayMusicEvent>();

    configure_frame_sets(&mut app);

    app
        // Domain plugins
        .add_plugins(input::InputPlugin)
        .add_plugins(player::PlayerPlugin)
        .add_plugins(farming::FarmingPlugin)
        .add_plugins(world::WorldPlugin)
        .add_plugins(level::LevelPlugin)
        .add_plugins(ui::UiPlugin)
        // Data loading
        .add_plugins(data::DataPlugin)
        .add_systems(Startup, (setup_camera, log_config_warnings))
        .run();
}

/// The camera never moves; sprites are placed relative to it.
fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

fn log_config_warnings(warnings: Res<ConfigWarnings>) {
    for warning in &warnings.0 {
        warn!("[Config] {warning}");
    }
}
