//! Animated map tiles and short-lived particles.

use bevy::prelude::*;
use crate::shared::*;

impl Animated {
    pub fn new(frames: Vec<Handle<Image>>, fps: f32) -> Self {
        Self {
            frames,
            index: 0.0,
            fps,
        }
    }

    /// Advances by `fps * dt`, wrapping to the first frame. Returns the
    /// frame to show, if there are any.
    pub fn advance(&mut self, dt: f32) -> Option<&Handle<Image>> {
        self.index += self.fps * dt;
        if self.index >= self.frames.len() as f32 {
            self.index = 0.0;
        }
        self.frames.get(self.index as usize)
    }
}

pub fn animate_tiles(time: Res<Time>, mut query: Query<(&mut Animated, &mut Sprite)>) {
    let dt = time.delta_secs();
    for (mut animated, mut sprite) in query.iter_mut() {
        if let Some(frame) = animated.advance(dt) {
            if sprite.image != *frame {
                sprite.image = frame.clone();
            }
        }
    }
}

/// Fades particles out over their lifetime and despawns them when done.
pub fn fade_particles(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut Particle, &mut Sprite)>,
) {
    let now = time.elapsed();
    for (entity, mut particle, mut sprite) in query.iter_mut() {
        let alpha = 1.0 - particle.timer.elapsed_fraction(now);
        if particle.timer.update(now) {
            commands.entity(entity).despawn();
            continue;
        }
        sprite.color = sprite.color.with_alpha(alpha);
    }
}
