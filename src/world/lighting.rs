//! Day/night sky tint: daylight fades towards the night colour over the day
//! and snaps back to full daylight at each day reset.

use bevy::prelude::*;

use crate::shared::*;

impl Sky {
    /// Each channel above its night value drops by `fade_rate * dt`,
    /// never below the night value.
    pub fn advance(&mut self, dt: f32) {
        let step = self.fade_rate * dt;
        let night = self.night;
        for i in 0..3 {
            if self.color[i] > night[i] {
                self.color[i] = (self.color[i] - step).max(night[i]);
            }
        }
    }

    pub fn reset(&mut self) {
        self.color = Vec3::splat(255.0);
    }
}

pub fn advance_sky(time: Res<Time>, mut sky: ResMut<Sky>) {
    sky.advance(time.delta_secs());
}

pub fn reset_sky(mut reset_events: EventReader<DayResetEvent>, mut sky: ResMut<Sky>) {
    if reset_events.read().count() > 0 {
        sky.reset();
    }
}
