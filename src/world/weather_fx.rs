//! Rain: the daily roll, drop and splash particles.
//!
//! Drops are world-space entities scattered over the whole map. Moving drops
//! slide down-left; floor splashes stay put. Both expire after 400-500 ms.

use bevy::math::IRect;
use bevy::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::shared::*;

// ═══════════════════════════════════════════════════════════════════════
// CONSTANTS
// ═══════════════════════════════════════════════════════════════════════

const DROP_DIRECTION: Vec2 = Vec2::new(-2.0, 4.0);
const DROP_SIZE: IVec2 = IVec2::new(8, 16);
const SPLASH_SIZE: IVec2 = IVec2::new(16, 8);

// ═══════════════════════════════════════════════════════════════════════
// RESOURCES
// ═══════════════════════════════════════════════════════════════════════

/// Fractional drops owed from previous frames.
#[derive(Resource, Debug, Default)]
pub struct RainSpawner {
    pub carry: f32,
}

impl RainSpawner {
    /// Whole drops to spawn this frame at `rate` per second.
    pub fn due(&mut self, rate: f32, dt: f32) -> u32 {
        self.carry += rate.max(0.0) * dt;
        let count = self.carry.floor();
        self.carry -= count;
        count as u32
    }
}

pub fn roll_rain(chance: f64, rng: &mut impl Rng) -> bool {
    rng.gen_bool(chance.clamp(0.0, 1.0))
}

fn drop_rect(pos: Vec2, size: IVec2) -> IRect {
    rect_xywh(pos.x.round() as i32, pos.y.round() as i32, size.x, size.y)
}

// ═══════════════════════════════════════════════════════════════════════
// SYSTEMS
// ═══════════════════════════════════════════════════════════════════════

pub fn spawn_rain(
    mut commands: Commands,
    time: Res<Time>,
    weather: Res<Weather>,
    world_map: Res<WorldMap>,
    config: Res<GameConfig>,
    assets: Res<GameAssets>,
    mut spawner: ResMut<RainSpawner>,
) {
    if !weather.raining || world_map.size.x <= 0 || world_map.size.y <= 0 {
        return;
    }
    let mut rng = rand::thread_rng();
    let now = time.elapsed();
    let count = spawner.due(config.weather.drops_per_second, time.delta_secs());

    for _ in 0..count {
        // Floor splash
        let pos = Vec2::new(
            rng.gen_range(0..world_map.size.x) as f32,
            rng.gen_range(0..world_map.size.y) as f32,
        );
        let mut lifetime = ActionTimer::from_millis(rng.gen_range(400..=500));
        lifetime.activate(now);
        commands.spawn((
            RainDrop {
                pos,
                velocity: Vec2::ZERO,
                lifetime,
            },
            Sprite {
                image: assets.rain_floor.choose(&mut rng).cloned().unwrap_or_default(),
                custom_size: Some(SPLASH_SIZE.as_vec2()),
                ..default()
            },
            Bounds(drop_rect(pos, SPLASH_SIZE)),
            Depth::RainFloor,
        ));

        // Falling drop
        let pos = Vec2::new(
            rng.gen_range(0..world_map.size.x) as f32,
            rng.gen_range(0..world_map.size.y) as f32,
        );
        let mut lifetime = ActionTimer::from_millis(rng.gen_range(400..=500));
        lifetime.activate(now);
        let speed = rng.gen_range(200.0..=250.0);
        commands.spawn((
            RainDrop {
                pos,
                velocity: DROP_DIRECTION * speed,
                lifetime,
            },
            Sprite {
                image: assets.rain_drops.choose(&mut rng).cloned().unwrap_or_default(),
                custom_size: Some(DROP_SIZE.as_vec2()),
                ..default()
            },
            Bounds(drop_rect(pos, DROP_SIZE)),
            Depth::RainDrops,
        ));
    }
}

/// Moves drops and despawns expired ones. Frozen with the rest of the world
/// while the shop is open.
pub fn update_rain_drops(
    mut commands: Commands,
    time: Res<Time>,
    mut drops: Query<(Entity, &mut RainDrop, &mut Bounds)>,
) {
    let now = time.elapsed();
    let dt = time.delta_secs();
    for (entity, mut drop, mut bounds) in drops.iter_mut() {
        if drop.lifetime.update(now) {
            commands.entity(entity).despawn();
            continue;
        }
        if drop.velocity != Vec2::ZERO {
            let velocity = drop.velocity;
            drop.pos += velocity * dt;
            let size = bounds.0.size();
            bounds.0 = drop_rect(drop.pos, size);
        }
    }
}

pub fn reroll_rain(
    mut reset_events: EventReader<DayResetEvent>,
    config: Res<GameConfig>,
    mut weather: ResMut<Weather>,
) {
    for _ in reset_events.read() {
        if !config.weather.reroll_daily {
            continue;
        }
        weather.raining = roll_rain(config.weather.rain_chance, &mut rand::thread_rng());
        info!("[World] New day weather: {}", if weather.raining { "rain" } else { "clear" });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_spawner_carries_fractions() {
        let mut spawner = RainSpawner::default();
        assert_eq!(spawner.due(60.0, 0.01), 0);
        assert_eq!(spawner.due(60.0, 0.01), 1);
        assert_eq!(spawner.due(60.0, 0.5), 30);
        assert_eq!(spawner.due(-5.0, 1.0), 0);
    }

    #[test]
    fn test_roll_rain_extremes() {
        let mut rng = StdRng::seed_from_u64(3);
        assert!(!roll_rain(0.0, &mut rng));
        assert!(roll_rain(1.0, &mut rng));
        assert!(roll_rain(4.0, &mut rng), "clamped into range");
    }
}
