//! World domain: builds the level from `MapData` and runs everything in it
//! that is not the player or the soil: trees, water, rain, sky, particles,
//! and the depth-sorted draw pass.

use bevy::math::IRect;
use bevy::prelude::*;
use crate::shared::*;

pub mod lighting;
pub mod objects;
pub mod trees;
pub mod weather_fx;
pub mod ysort;

/// Water tile animation speed.
const WATER_FPS: f32 = 5.0;

/// Inserted once the level exists so re-entering Playing never rebuilds it.
#[derive(Resource, Debug, Default)]
pub struct LevelBuilt;

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<weather_fx::RainSpawner>()
            .add_systems(
                OnEnter(GameState::Playing),
                spawn_level
                    .run_if(not(resource_exists::<LevelBuilt>))
                    .run_if(resource_exists::<MapData>)
                    .run_if(resource_exists::<GameAssets>),
            )
            .add_systems(
                Update,
                (
                    objects::animate_tiles,
                    objects::fade_particles,
                    weather_fx::update_rain_drops,
                )
                    .in_set(FrameSet::Simulate),
            )
            .add_systems(Update, trees::handle_axe.in_set(FrameSet::Resolve))
            .add_systems(Update, weather_fx::spawn_rain.in_set(FrameSet::Weather))
            .add_systems(Update, lighting::advance_sky.in_set(FrameSet::Sky))
            .add_systems(
                Update,
                (
                    trees::regrow_fruit,
                    weather_fx::reroll_rain,
                    lighting::reset_sky,
                )
                    .in_set(FrameSet::DayReset),
            )
            .add_systems(PostUpdate, ysort::sync_draw_transforms.in_set(DrawSync));
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Hitboxes
// ─────────────────────────────────────────────────────────────────────────────

/// Default solid footprint: a narrow band through the middle of the sprite.
pub fn generic_hitbox(rect: IRect) -> IRect {
    rect.inflated(-(rect.width() as f32 * 0.2) as i32, -(rect.height() as f32 * 0.75) as i32)
}

pub fn flower_hitbox(rect: IRect) -> IRect {
    rect.inflated(-20, -(rect.height() as f32 * 0.9) as i32)
}

fn tile_rect(tile: &TileEntry) -> IRect {
    rect_xywh(tile.col * TILE_SIZE, tile.row * TILE_SIZE, TILE_SIZE, TILE_SIZE)
}

fn sprite(image: Handle<Image>, rect: IRect) -> Sprite {
    Sprite {
        image,
        custom_size: Some(rect.size().as_vec2()),
        ..default()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Level construction
// ─────────────────────────────────────────────────────────────────────────────

/// Builds every map entity, the soil grid and the first day's weather.
#[allow(clippy::too_many_arguments)]
pub fn spawn_level(
    mut commands: Commands,
    map: Res<MapData>,
    assets: Res<GameAssets>,
    config: Res<GameConfig>,
    mut soil: ResMut<SoilGrid>,
    mut weather: ResMut<Weather>,
    mut music_events: EventWriter<PlayMusicEvent>,
) {
    let mut rng = rand::thread_rng();
    let size = map.pixel_size();

    // Ground
    let ground = rect_xywh(0, 0, size.x, size.y);
    commands.spawn((sprite(assets.ground.clone(), ground), Bounds(ground), Depth::Ground));

    // House and static art
    for (layer, depth) in [
        ("HouseFloor", Depth::HouseBottom),
        ("HouseFurnitureBottom", Depth::HouseBottom),
        ("HouseWalls", Depth::Main),
        ("HouseFurnitureTop", Depth::Main),
    ] {
        for tile in map.tiles(layer) {
            let rect = tile_rect(tile);
            commands.spawn((
                sprite(assets.image(tile.image.as_deref()), rect),
                Bounds(rect),
                depth,
            ));
        }
    }

    // Fence
    for tile in map.tiles("Fence") {
        let rect = tile_rect(tile);
        commands.spawn((
            sprite(assets.image(tile.image.as_deref()), rect),
            Bounds(rect),
            Depth::Main,
            Collider {
                hitbox: generic_hitbox(rect),
            },
        ));
    }

    // Water
    for tile in map.tiles("Water") {
        let rect = tile_rect(tile);
        let first = assets.water.first().cloned().unwrap_or_default();
        commands.spawn((
            Animated::new(assets.water.clone(), WATER_FPS),
            sprite(first, rect),
            Bounds(rect),
            Depth::Water,
        ));
    }

    // Trees
    let mut tree_count = 0;
    for object in map.objects("Trees") {
        trees::spawn_tree(&mut commands, object, &assets, &config.trees, &mut rng);
        tree_count += 1;
    }

    // Decoration
    for object in map.objects("Decoration") {
        let rect = object.rect();
        let hitbox = if object.name == "Flower" {
            flower_hitbox(rect)
        } else {
            generic_hitbox(rect)
        };
        commands.spawn((
            sprite(assets.image(object.image.as_deref()), rect),
            Bounds(rect),
            Depth::Main,
            Collider { hitbox },
        ));
    }

    // Invisible collision
    for tile in map.tiles("Collision") {
        let rect = tile_rect(tile);
        commands.spawn((
            Bounds(rect),
            Collider {
                hitbox: generic_hitbox(rect),
            },
        ));
    }

    // Interaction zones (everything in the Player layer but the start point)
    for object in map.objects("Player").iter().filter(|o| o.name != "Start") {
        commands.spawn((
            InteractionZone {
                name: object.name.clone(),
            },
            Bounds(object.rect()),
        ));
    }

    // Soil
    let farmable = map
        .tiles("Farmable")
        .iter()
        .map(|t| IVec2::new(t.col, t.row));
    *soil = SoilGrid::from_farmable(map.width, map.height, farmable);

    weather.raining = weather_fx::roll_rain(config.weather.rain_chance, &mut rng);
    commands.insert_resource(LevelBuilt);
    music_events.send(PlayMusicEvent {
        track_id: "music".to_string(),
    });

    info!(
        "[World] Level built: {}x{} px, {} trees, {} farmable tiles, {}",
        size.x,
        size.y,
        tree_count,
        map.tiles("Farmable").len(),
        if weather.raining { "raining" } else { "clear" }
    );
}
