use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::{fs, path::Path};

use super::CropKind;

pub const DEFAULT_CONFIG_PATH: &str = "assets/config/game.ron";

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub title: String,
}
impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: super::SCREEN_WIDTH,
            height: super::SCREEN_HEIGHT,
            title: "Greenacre".into(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PlayerConfig {
    /// Pixels per second.
    pub speed: f32,
    pub sprite_size: (i32, i32),
    /// Total width/height removed from the sprite rect to get the hitbox.
    pub hitbox_inset: (i32, i32),
}
impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            speed: 300.0,
            sprite_size: (192, 192),
            hitbox_inset: (126, 70),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct TimerConfig {
    pub tool_use_ms: u64,
    pub tool_switch_ms: u64,
    pub seed_use_ms: u64,
    pub seed_switch_ms: u64,
}
impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            tool_use_ms: 350,
            tool_switch_ms: 200,
            seed_use_ms: 350,
            seed_switch_ms: 200,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct StartConfig {
    pub seeds: HashMap<CropKind, u32>,
    pub money: u32,
}
impl Default for StartConfig {
    fn default() -> Self {
        Self {
            seeds: HashMap::from([(CropKind::Corn, 5), (CropKind::Tomato, 5)]),
            money: 200,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct WeatherConfig {
    /// Probability that a given day is rainy.
    pub rain_chance: f64,
    /// Roll again at every day reset. When false the startup roll sticks.
    pub reroll_daily: bool,
    pub drops_per_second: f32,
}
impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            rain_chance: 7.0 / 11.0,
            reroll_daily: true,
            drops_per_second: 60.0,
        }
    }
}

/// What a tree does when its health reaches zero.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum TreeFelling {
    /// Becomes a stump that stops bearing fruit and yields `wood`.
    Stump { wood: u32 },
    /// Never falls; axe hits only shake fruit loose.
    Indestructible,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct TreeConfig {
    pub health: u8,
    /// Chance that each fruit anchor grows an apple on a reset.
    pub fruit_chance: f64,
    pub felling: TreeFelling,
}
impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            health: 5,
            fruit_chance: 0.2,
            felling: TreeFelling::Stump { wood: 1 },
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SkyConfig {
    /// 0-255 per channel.
    pub night_color: [f32; 3],
    /// Channel units per second.
    pub fade_rate: f32,
}
impl Default for SkyConfig {
    fn default() -> Self {
        Self {
            night_color: [38.0, 101.0, 189.0],
            fade_rate: 2.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct TransitionConfig {
    /// Brightness units per second.
    pub speed: f32,
}
impl Default for TransitionConfig {
    fn default() -> Self {
        Self { speed: 120.0 }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct MapConfig {
    /// RON map file. `None` uses the built-in farm.
    pub path: Option<String>,
    pub assets_root: String,
    /// Write the loaded map as JSON here, for inspecting layer data.
    pub dump_json: Option<String>,
}
impl Default for MapConfig {
    fn default() -> Self {
        Self {
            path: None,
            assets_root: "assets".into(),
            dump_json: None,
        }
    }
}

#[derive(Debug, Deserialize, Resource, Clone, PartialEq, Default)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub player: PlayerConfig,
    pub timers: TimerConfig,
    pub start: StartConfig,
    pub weather: WeatherConfig,
    pub trees: TreeConfig,
    pub sky: SkyConfig,
    pub transition: TransitionConfig,
    pub map: MapConfig,
}

impl GameConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let data = fs::read_to_string(&path).map_err(|e| format!("read config: {e}"))?;
        ron::from_str(&data).map_err(|e| format!("parse RON: {e}"))
    }

    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Option<String>) {
        match Self::load_from_file(&path) {
            Ok(cfg) => (cfg, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Non-fatal problems worth a `warn!` at startup.
    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        if self.window.width <= 0.0 || self.window.height <= 0.0 {
            w.push("window dimensions must be > 0".into());
        }
        if self.player.speed <= 0.0 {
            w.push(format!("player.speed {} is not positive; player cannot move", self.player.speed));
        }
        if self.player.hitbox_inset.0 >= self.player.sprite_size.0
            || self.player.hitbox_inset.1 >= self.player.sprite_size.1
        {
            w.push("player.hitbox_inset swallows the whole sprite".into());
        }
        if !(0.0..=1.0).contains(&self.weather.rain_chance) {
            w.push(format!("weather.rain_chance {} outside [0, 1]", self.weather.rain_chance));
        }
        if !(0.0..=1.0).contains(&self.trees.fruit_chance) {
            w.push(format!("trees.fruit_chance {} outside [0, 1]", self.trees.fruit_chance));
        }
        if self.trees.health == 0 {
            w.push("trees.health is 0; trees fall on the first hit".into());
        }
        if self.transition.speed <= 0.0 {
            w.push("transition.speed must be > 0 or the night never ends".into());
        }
        w
    }
}

impl super::Sky {
    pub fn from_config(config: &SkyConfig) -> Self {
        Self {
            color: Vec3::splat(255.0),
            night: Vec3::from_array(config.night_color),
            fade_rate: config.fade_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_or_default_missing_file() {
        let (cfg, err) = GameConfig::load_or_default("this/file/does/not/exist.ron");
        assert!(err.is_some());
        assert_eq!(cfg, GameConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "(player: (speed: 150.0), trees: (felling: Indestructible), start: (seeds: {{Corn: 2}}))"
        )
        .unwrap();
        let cfg = GameConfig::load_from_file(file.path()).unwrap();
        assert_eq!(cfg.player.speed, 150.0);
        assert_eq!(cfg.player.sprite_size, (192, 192));
        assert_eq!(cfg.trees.felling, TreeFelling::Indestructible);
        assert_eq!(cfg.trees.health, 5);
        assert_eq!(cfg.start.seeds.get(&CropKind::Corn), Some(&2));
        assert_eq!(cfg.timers, TimerConfig::default());
    }

    #[test]
    fn test_malformed_file_reports_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "(player: (speed: \"fast\"))").unwrap();
        let (cfg, err) = GameConfig::load_or_default(file.path());
        assert!(err.unwrap().starts_with("parse RON"));
        assert_eq!(cfg.player.speed, 300.0);
    }

    #[test]
    fn test_shipped_config_matches_defaults() {
        let cfg = GameConfig::load_from_file(DEFAULT_CONFIG_PATH).unwrap();
        let defaults = GameConfig::default();
        assert_eq!(cfg.player, defaults.player);
        assert_eq!(cfg.start, defaults.start);
        assert_eq!(cfg.trees, defaults.trees);
        assert_eq!(cfg.sky, defaults.sky);
        assert_eq!(cfg.map, defaults.map);
        assert!((cfg.weather.rain_chance - defaults.weather.rain_chance).abs() < 1e-6);
    }

    #[test]
    fn test_validate_defaults_clean() {
        assert!(GameConfig::default().validate().is_empty());
    }

    #[test]
    fn test_validate_detects_warnings() {
        let mut cfg = GameConfig::default();
        cfg.weather.rain_chance = 1.5;
        cfg.trees.health = 0;
        cfg.transition.speed = 0.0;
        assert_eq!(cfg.validate().len(), 3);
    }
}
