use bevy::prelude::*;
use crate::shared::*;

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PreUpdate, reset_and_read_input);
    }
}

/// Which set of actions the keyboard currently drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputContext {
    Disabled,
    Gameplay,
    Menu,
}

pub fn context_for(state: GameState) -> InputContext {
    match state {
        GameState::Loading => InputContext::Disabled,
        GameState::Playing => InputContext::Gameplay,
        GameState::Shop => InputContext::Menu,
    }
}

/// The single point where hardware input becomes game actions.
/// Movement and tool keys are level-triggered; the player's own cooldown
/// timers rate-limit them. Interact and cancel are edge-triggered.
fn reset_and_read_input(
    keys: Res<ButtonInput<KeyCode>>,
    bindings: Res<KeyBindings>,
    state: Res<State<GameState>>,
    mut input: ResMut<PlayerInput>,
) {
    *input = PlayerInput::default();

    match context_for(*state.get()) {
        InputContext::Disabled => {}

        InputContext::Gameplay => {
            input.up = keys.pressed(bindings.move_up) || keys.pressed(KeyCode::KeyW);
            input.down = keys.pressed(bindings.move_down) || keys.pressed(KeyCode::KeyS);
            input.left = keys.pressed(bindings.move_left) || keys.pressed(KeyCode::KeyA);
            input.right = keys.pressed(bindings.move_right) || keys.pressed(KeyCode::KeyD);

            input.tool_use = keys.pressed(bindings.tool_use);
            input.tool_switch = keys.pressed(bindings.tool_switch);
            input.seed_use = keys.pressed(bindings.seed_use) || keys.pressed(KeyCode::ControlRight);
            input.seed_switch = keys.pressed(bindings.seed_switch);

            input.interact = keys.just_pressed(bindings.interact);
        }

        InputContext::Menu => {
            input.interact = keys.just_pressed(bindings.interact);
            input.cancel = keys.just_pressed(bindings.cancel);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shop_uses_menu_context() {
        assert_eq!(context_for(GameState::Shop), InputContext::Menu);
        assert_eq!(context_for(GameState::Playing), InputContext::Gameplay);
        assert_eq!(context_for(GameState::Loading), InputContext::Disabled);
    }
}
