//! Night fade: full bright to black, day reset at black, back to bright.

use bevy::prelude::*;
use crate::shared::*;

/// What one step of the fade produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionStep {
    Fading,
    /// Reached full black this step. Happens once per cycle.
    Reset,
    /// Back to full bright; the cycle is over.
    Woke,
}

impl SleepTransition {
    pub fn new(speed: f32) -> Self {
        Self {
            level: 255.0,
            heading: -1.0,
            speed,
        }
    }

    pub fn advance(&mut self, dt: f32) -> TransitionStep {
        self.level += self.heading * self.speed * dt;
        if self.heading < 0.0 && self.level <= 0.0 {
            self.level = 0.0;
            self.heading = 1.0;
            TransitionStep::Reset
        } else if self.heading > 0.0 && self.level > 255.0 {
            self.level = 255.0;
            self.heading = -1.0;
            TransitionStep::Woke
        } else {
            TransitionStep::Fading
        }
    }

    /// 0.0 fully lit, 1.0 fully black.
    pub fn darkness(&self) -> f32 {
        1.0 - (self.level / 255.0).clamp(0.0, 1.0)
    }
}

/// Drives the fade while the player sleeps. Sends exactly one
/// `DayResetEvent` per cycle and wakes the player at the end.
pub fn advance_night(
    time: Res<Time>,
    mut transition: ResMut<SleepTransition>,
    mut player_query: Query<&mut PlayerController, With<Player>>,
    mut reset_events: EventWriter<DayResetEvent>,
) {
    let Ok(mut player) = player_query.get_single_mut() else {
        return;
    };
    if !player.sleep {
        return;
    }
    match transition.advance(time.delta_secs()) {
        TransitionStep::Fading => {}
        TransitionStep::Reset => {
            info!("[Level] Night fell; starting a new day");
            reset_events.send(DayResetEvent);
        }
        TransitionStep::Woke => {
            player.sleep = false;
            info!("[Level] Player woke up");
        }
    }
}
