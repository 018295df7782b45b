//! Shared components, resources, events, and states for Greenacre.
//!
//! This is the type contract. Every domain plugin imports from here.
//! No domain imports from any other domain directly.

use bevy::math::IRect;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub mod config;
pub mod geometry;
pub mod timer;

pub use config::*;
pub use geometry::{rect_xywh, RectExt};
pub use timer::ActionTimer;

// ═══════════════════════════════════════════════════════════════════════
// GAME STATE: top-level state machine
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, States, Default)]
pub enum GameState {
    #[default]
    Loading,
    Playing,
    Shop,
}

// ═══════════════════════════════════════════════════════════════════════
// FRAME ORDER: one logical tick, in this order
// ═══════════════════════════════════════════════════════════════════════

/// The fixed per-frame sequence. Configured by [`configure_frame_sets`].
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameSet {
    /// Every world entity advances by dt. Frozen while the shop is open.
    Simulate,
    /// Intents produced during Simulate are applied; plant harvest collisions.
    Resolve,
    /// Shop UI update. Runs instead of Simulate/Resolve.
    Shop,
    /// Rain: soil auto-watering and drop spawning.
    Weather,
    /// Day/night sky tint.
    Sky,
    /// Night fade while the player sleeps.
    Transition,
    /// Batch day-reset handlers, reacting to `DayResetEvent`.
    DayReset,
}

pub fn configure_frame_sets(app: &mut App) {
    app.configure_sets(
        Update,
        (
            FrameSet::Simulate,
            FrameSet::Resolve,
            FrameSet::Shop,
            FrameSet::Weather,
            FrameSet::Sky,
            FrameSet::Transition,
            FrameSet::DayReset,
        )
            .chain(),
    );
    app.configure_sets(Update, FrameSet::Simulate.run_if(in_state(GameState::Playing)));
    app.configure_sets(Update, FrameSet::Resolve.run_if(in_state(GameState::Playing)));
    app.configure_sets(Update, FrameSet::Shop.run_if(in_state(GameState::Shop)));
    app.configure_sets(Update, FrameSet::Weather.run_if(in_state(GameState::Playing)));
    for set in [FrameSet::Sky, FrameSet::Transition, FrameSet::DayReset] {
        app.configure_sets(
            Update,
            set.run_if(in_state(GameState::Playing).or(in_state(GameState::Shop))),
        );
    }
}

/// PostUpdate: entities mirroring simulation state are reconciled before
/// this set; the draw-order pass runs in it.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DrawSync;

// ═══════════════════════════════════════════════════════════════════════
// ENTITY MODEL: capability components
// ═══════════════════════════════════════════════════════════════════════

/// Draw layer. Declaration order is draw order (ascending).
#[derive(
    Component, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum Depth {
    Water,
    Ground,
    Soil,
    SoilWater,
    RainFloor,
    HouseBottom,
    GroundPlant,
    #[default]
    Main,
    HouseTop,
    Fruit,
    RainDrops,
}

impl Depth {
    pub const ALL: [Depth; 11] = [
        Depth::Water,
        Depth::Ground,
        Depth::Soil,
        Depth::SoilWater,
        Depth::RainFloor,
        Depth::HouseBottom,
        Depth::GroundPlant,
        Depth::Main,
        Depth::HouseTop,
        Depth::Fruit,
        Depth::RainDrops,
    ];
}

/// Integer-aligned render rectangle in world pixels (y grows downwards).
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds(pub IRect);

/// Collision capability. Only entities carrying this block the player.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collider {
    pub hitbox: IRect,
}

/// Looping frame sequence (water tiles).
#[derive(Component, Debug, Clone)]
pub struct Animated {
    pub frames: Vec<Handle<Image>>,
    pub index: f32,
    pub fps: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TreeSize {
    Small,
    Large,
}

impl TreeSize {
    pub fn from_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("large") {
            TreeSize::Large
        } else {
            TreeSize::Small
        }
    }
}

#[derive(Component, Debug, Clone)]
pub struct Tree {
    pub size: TreeSize,
    pub health: u8,
    pub alive: bool,
    pub fruit: Vec<Entity>,
}

/// An apple hanging on a tree. Owned by `tree`.
#[derive(Component, Debug, Clone, Copy)]
pub struct Fruit {
    pub tree: Entity,
}

/// Invisible trigger rectangle (uses `Bounds`), identified by name.
#[derive(Component, Debug, Clone)]
pub struct InteractionZone {
    pub name: String,
}

/// Short-lived fade-out visual. Despawns itself when the timer fires.
#[derive(Component, Debug, Clone)]
pub struct Particle {
    pub timer: ActionTimer,
}

/// Rain drop or floor splash.
#[derive(Component, Debug, Clone)]
pub struct RainDrop {
    pub pos: Vec2,
    pub velocity: Vec2,
    pub lifetime: ActionTimer,
}

/// Components for a fading copy of `image` over `rect`.
pub fn particle_bundle(
    image: Handle<Image>,
    rect: IRect,
    depth: Depth,
    now: std::time::Duration,
) -> (Particle, Sprite, Bounds, Depth) {
    let mut timer = ActionTimer::from_millis(PARTICLE_MS);
    timer.activate(now);
    (
        Particle { timer },
        Sprite {
            image,
            custom_size: Some(rect.size().as_vec2()),
            ..default()
        },
        Bounds(rect),
        depth,
    )
}

// ═══════════════════════════════════════════════════════════════════════
// PLAYER
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Facing {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl Facing {
    pub fn name(self) -> &'static str {
        match self {
            Facing::Up => "up",
            Facing::Down => "down",
            Facing::Left => "left",
            Facing::Right => "right",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tool {
    Hoe,
    Axe,
    Water,
}

impl Tool {
    pub fn name(self) -> &'static str {
        match self {
            Tool::Hoe => "hoe",
            Tool::Axe => "axe",
            Tool::Water => "water",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlayerMode {
    #[default]
    Idle,
    Moving,
    Using(Tool),
}

/// Facing x mode. Selects the animation sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PlayerStatus {
    pub facing: Facing,
    pub mode: PlayerMode,
}

impl PlayerStatus {
    pub fn new(facing: Facing, mode: PlayerMode) -> Self {
        Self { facing, mode }
    }

    /// Animation key, e.g. `down_idle`, `left`, `up_hoe`.
    pub fn key(&self) -> String {
        match self.mode {
            PlayerMode::Idle => format!("{}_idle", self.facing.name()),
            PlayerMode::Moving => self.facing.name().to_string(),
            PlayerMode::Using(tool) => format!("{}_{}", self.facing.name(), tool.name()),
        }
    }

    /// Every status the character can be in.
    pub fn all() -> Vec<PlayerStatus> {
        let modes = [
            PlayerMode::Moving,
            PlayerMode::Idle,
            PlayerMode::Using(Tool::Hoe),
            PlayerMode::Using(Tool::Axe),
            PlayerMode::Using(Tool::Water),
        ];
        let facings = [Facing::Up, Facing::Down, Facing::Left, Facing::Right];
        modes
            .iter()
            .flat_map(|&mode| facings.iter().map(move |&facing| PlayerStatus { facing, mode }))
            .collect()
    }
}

#[derive(Component, Debug, Clone, Default)]
pub struct Player;

/// Gates repeated actions. Each timer is absolute-start based.
#[derive(Debug, Clone)]
pub struct PlayerTimers {
    pub tool_use: ActionTimer,
    pub tool_switch: ActionTimer,
    pub seed_use: ActionTimer,
    pub seed_switch: ActionTimer,
}

impl PlayerTimers {
    pub fn from_config(config: &TimerConfig) -> Self {
        Self {
            tool_use: ActionTimer::from_millis(config.tool_use_ms),
            tool_switch: ActionTimer::from_millis(config.tool_switch_ms),
            seed_use: ActionTimer::from_millis(config.seed_use_ms),
            seed_switch: ActionTimer::from_millis(config.seed_switch_ms),
        }
    }
}

/// All per-player simulation state. Behaviour lives in `player::controller`.
#[derive(Component, Debug, Clone)]
pub struct PlayerController {
    /// Authoritative position (render centre), sub-pixel.
    pub pos: Vec2,
    pub rect: IRect,
    pub hitbox: IRect,
    pub direction: Vec2,
    pub speed: f32,
    pub status: PlayerStatus,
    pub frame_index: f32,
    pub timers: PlayerTimers,
    pub tool_index: usize,
    pub seed_index: usize,
    /// World point the next tool/seed action hits.
    pub target: IVec2,
    pub sleep: bool,
}

// ═══════════════════════════════════════════════════════════════════════
// ITEMS & INVENTORY
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CropKind {
    Corn,
    Tomato,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ItemKind {
    Wood,
    Apple,
    Corn,
    Tomato,
}

impl ItemKind {
    pub const ALL: [ItemKind; 4] = [ItemKind::Wood, ItemKind::Apple, ItemKind::Corn, ItemKind::Tomato];

    pub fn name(self) -> &'static str {
        match self {
            ItemKind::Wood => "wood",
            ItemKind::Apple => "apple",
            ItemKind::Corn => "corn",
            ItemKind::Tomato => "tomato",
        }
    }
}

#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct Inventory {
    pub items: HashMap<ItemKind, u32>,
    pub seeds: HashMap<CropKind, u32>,
    pub money: u32,
}

impl Default for Inventory {
    fn default() -> Self {
        Self::from_config(&StartConfig::default())
    }
}

impl Inventory {
    pub fn from_config(start: &StartConfig) -> Self {
        let items = ItemKind::ALL.iter().map(|&item| (item, 0)).collect();
        let seeds = [CropKind::Corn, CropKind::Tomato]
            .iter()
            .map(|&crop| (crop, start.seeds.get(&crop).copied().unwrap_or(0)))
            .collect();
        Self {
            items,
            seeds,
            money: start.money,
        }
    }

    pub fn count(&self, item: ItemKind) -> u32 {
        self.items.get(&item).copied().unwrap_or(0)
    }

    pub fn add(&mut self, item: ItemKind, quantity: u32) {
        *self.items.entry(item).or_insert(0) += quantity;
    }

    pub fn seed_count(&self, crop: CropKind) -> u32 {
        self.seeds.get(&crop).copied().unwrap_or(0)
    }

    /// Consume one seed. Returns false (and changes nothing) when empty.
    pub fn take_seed(&mut self, crop: CropKind) -> bool {
        match self.seeds.get_mut(&crop) {
            Some(count) if *count > 0 => {
                *count -= 1;
                true
            }
            _ => false,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// FARMING
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlantState {
    pub crop: CropKind,
    pub stage: u8,
    pub harvestable: bool,
}

/// One soil tile. `watered` and `plant` only ever exist on tilled cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SoilCell {
    pub farmable: bool,
    pub tilled: bool,
    pub watered: bool,
    pub plant: Option<PlantState>,
}

/// Row-major soil grid covering the whole map. Behaviour lives in `farming::soil`.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct SoilGrid {
    pub width: i32,
    pub height: i32,
    pub cells: Vec<SoilCell>,
}

// ═══════════════════════════════════════════════════════════════════════
// WORLD, WEATHER, SKY
// ═══════════════════════════════════════════════════════════════════════

/// Size of the loaded map in world pixels.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct WorldMap {
    pub size: IVec2,
}

#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct Weather {
    pub raining: bool,
}

/// Multiplicative daylight colour, 0-255 per channel. Fades towards `night`.
#[derive(Resource, Debug, Clone, Copy)]
pub struct Sky {
    pub color: Vec3,
    pub night: Vec3,
    pub fade_rate: f32,
}

impl Default for Sky {
    fn default() -> Self {
        Self::from_config(&SkyConfig::default())
    }
}

/// Night fade driven while the player sleeps. Behaviour lives in `level::transition`.
#[derive(Resource, Debug, Clone, Copy)]
pub struct SleepTransition {
    /// 255 = full bright, 0 = full black.
    pub level: f32,
    /// -1 fading out, +1 fading in.
    pub heading: f32,
    pub speed: f32,
}

impl Default for SleepTransition {
    fn default() -> Self {
        Self::new(TransitionConfig::default().speed)
    }
}

/// Camera offset: player render centre minus half the viewport.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct CameraOffset(pub Vec2);

// ═══════════════════════════════════════════════════════════════════════
// INPUT
// ═══════════════════════════════════════════════════════════════════════

/// Per-frame input snapshot. Held keys except `interact` and `cancel`,
/// which are edge-triggered.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub tool_use: bool,
    pub tool_switch: bool,
    pub seed_use: bool,
    pub seed_switch: bool,
    pub interact: bool,
    pub cancel: bool,
}

#[derive(Resource, Debug, Clone)]
pub struct KeyBindings {
    pub move_up: KeyCode,
    pub move_down: KeyCode,
    pub move_left: KeyCode,
    pub move_right: KeyCode,
    pub tool_use: KeyCode,
    pub tool_switch: KeyCode,
    pub seed_use: KeyCode,
    pub seed_switch: KeyCode,
    pub interact: KeyCode,
    pub cancel: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            move_up: KeyCode::ArrowUp,
            move_down: KeyCode::ArrowDown,
            move_left: KeyCode::ArrowLeft,
            move_right: KeyCode::ArrowRight,
            tool_use: KeyCode::Space,
            tool_switch: KeyCode::KeyQ,
            seed_use: KeyCode::ControlLeft,
            seed_switch: KeyCode::KeyE,
            interact: KeyCode::Enter,
            cancel: KeyCode::Escape,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// EVENTS: cross-domain communication
// ═══════════════════════════════════════════════════════════════════════

/// The tool-use timer expired: apply `tool` at world point `target`.
#[derive(Event, Debug, Clone, Copy)]
pub struct ToolUseEvent {
    pub tool: Tool,
    pub target: IVec2,
}

/// The seed-use timer expired: plant `crop` at world point `target`.
#[derive(Event, Debug, Clone, Copy)]
pub struct SeedUseEvent {
    pub crop: CropKind,
    pub target: IVec2,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct ShopToggleEvent;

/// Fired once per sleep cycle when the night fade reaches full black.
#[derive(Event, Debug, Clone, Copy)]
pub struct DayResetEvent;

/// The player obtained items (harvest, fruit, wood).
#[derive(Event, Debug, Clone, Copy)]
pub struct ItemGainedEvent {
    pub item: ItemKind,
    pub quantity: u32,
}

#[derive(Event, Debug, Clone)]
pub struct PlaySfxEvent {
    pub sfx_id: String,
}

#[derive(Event, Debug, Clone)]
pub struct PlayMusicEvent {
    pub track_id: String,
}

// ═══════════════════════════════════════════════════════════════════════
// CONSTANTS
// ═══════════════════════════════════════════════════════════════════════

pub const TILE_SIZE: i32 = 64;
pub const SCREEN_WIDTH: f32 = 1280.0;
pub const SCREEN_HEIGHT: f32 = 720.0;

/// Apple anchor points relative to a tree's top-left corner.
pub const SMALL_TREE_FRUIT: [(i32, i32); 6] = [(18, 17), (30, 37), (12, 50), (30, 45), (20, 30), (30, 10)];
pub const LARGE_TREE_FRUIT: [(i32, i32); 6] = [(30, 24), (60, 65), (50, 50), (16, 40), (45, 50), (42, 70)];

pub const FRUIT_SIZE: IVec2 = IVec2::new(20, 20);
pub const PARTICLE_MS: u64 = 200;

// ═══════════════════════════════════════════════════════════════════════
// MAP & ASSETS: populated by the data layer at startup
// ═══════════════════════════════════════════════════════════════════════

/// One grid-aligned tile of a tile layer. `image` is `None` for logic-only
/// layers (`Collision`, `Farmable`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileEntry {
    pub col: i32,
    pub row: i32,
    #[serde(default)]
    pub image: Option<String>,
}

/// Free-placed object in world pixels, top-left anchored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectEntry {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
}

impl ObjectEntry {
    pub fn rect(&self) -> IRect {
        rect_xywh(self.x, self.y, self.width, self.height)
    }
}

/// Parsed map: named tile layers and object layers. Behaviour lives in `data::map`.
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapData {
    /// Size in tiles.
    pub width: i32,
    pub height: i32,
    #[serde(default)]
    pub tile_layers: std::collections::BTreeMap<String, Vec<TileEntry>>,
    #[serde(default)]
    pub object_layers: std::collections::BTreeMap<String, Vec<ObjectEntry>>,
}

/// Image handles for everything the simulation draws.
/// Empty handles are valid: entities still spawn, they just draw nothing.
#[derive(Resource, Debug, Clone, Default)]
pub struct GameAssets {
    /// Keyed by `PlayerStatus::key()`.
    pub player: HashMap<String, Vec<Handle<Image>>>,
    pub water: Vec<Handle<Image>>,
    /// Autotile variant name -> image.
    pub soil: HashMap<String, Handle<Image>>,
    pub soil_water: Vec<Handle<Image>>,
    /// One image per growth stage.
    pub crops: HashMap<CropKind, Vec<Handle<Image>>>,
    pub rain_drops: Vec<Handle<Image>>,
    pub rain_floor: Vec<Handle<Image>>,
    pub apple: Handle<Image>,
    pub stumps: HashMap<TreeSize, Handle<Image>>,
    pub ground: Handle<Image>,
    /// Map layer images, keyed by their asset path.
    pub images: HashMap<String, Handle<Image>>,
}
