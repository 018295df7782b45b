//! Level orchestration: shop toggling, inventory updates from item gains,
//! and the sleep cycle that drives the day reset.
//!
//! The per-frame order itself lives in `FrameSet`; this plugin owns the
//! systems that sit between domains.

use bevy::prelude::*;
use crate::shared::*;

pub mod transition;

pub struct LevelPlugin;

impl Plugin for LevelPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            apply_item_gains
                .after(FrameSet::Resolve)
                .before(FrameSet::Shop)
                .run_if(in_state(GameState::Playing)),
        )
        .add_systems(
            Update,
            toggle_shop
                .after(FrameSet::Shop)
                .before(FrameSet::Weather)
                .run_if(in_state(GameState::Playing).or(in_state(GameState::Shop))),
        )
        .add_systems(Update, transition::advance_night.in_set(FrameSet::Transition));
    }
}

/// Every item gain lands in the inventory and plays the success cue.
pub fn apply_item_gains(
    mut item_events: EventReader<ItemGainedEvent>,
    mut inventory: ResMut<Inventory>,
    mut sfx_events: EventWriter<PlaySfxEvent>,
) {
    for event in item_events.read() {
        inventory.add(event.item, event.quantity);
        sfx_events.send(PlaySfxEvent {
            sfx_id: "success".to_string(),
        });
        info!(
            "[Level] +{} {} (now {})",
            event.quantity,
            event.item.name(),
            inventory.count(event.item)
        );
    }
}

/// Flips between Playing and Shop once per toggle request.
pub fn toggle_shop(
    mut toggle_events: EventReader<ShopToggleEvent>,
    state: Res<State<GameState>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let mut target = *state.get();
    for _ in toggle_events.read() {
        target = match target {
            GameState::Playing => GameState::Shop,
            GameState::Shop => GameState::Playing,
            other => other,
        };
    }
    if target != *state.get() {
        info!("[Level] Shop {}", if target == GameState::Shop { "opened" } else { "closed" });
        next_state.set(target);
    }
}
