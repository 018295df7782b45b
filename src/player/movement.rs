use bevy::math::IRect;
use bevy::prelude::*;
use crate::shared::*;
use super::controller::PlayerIntent;

/// Reads `PlayerInput`, updates status, fires expired timers as events and
/// refreshes the target point. One frame of the player state machine.
pub fn handle_player_input(
    time: Res<Time>,
    input: Res<PlayerInput>,
    zones: Query<(&InteractionZone, &Bounds)>,
    mut player_query: Query<&mut PlayerController, With<Player>>,
    mut tool_events: EventWriter<ToolUseEvent>,
    mut seed_events: EventWriter<SeedUseEvent>,
    mut shop_events: EventWriter<ShopToggleEvent>,
) {
    let Ok(mut player) = player_query.get_single_mut() else {
        return;
    };
    let now = time.elapsed();

    let zone = zones
        .iter()
        .find(|(_, bounds)| bounds.0.overlaps(&player.rect))
        .map(|(zone, _)| zone.name.clone());

    let was_asleep = player.sleep;
    let mut intents = Vec::new();
    if let Some(intent) = player.handle_input(&input, now, zone.as_deref()) {
        intents.push(intent);
    }
    player.refresh_status();
    player.update_target();
    intents.extend(player.tick_timers(now));

    for intent in intents {
        match intent {
            PlayerIntent::UseTool { tool, target } => {
                tool_events.send(ToolUseEvent { tool, target });
            }
            PlayerIntent::UseSeed { crop, target } => {
                seed_events.send(SeedUseEvent { crop, target });
            }
            PlayerIntent::ToggleShop => {
                shop_events.send(ShopToggleEvent);
            }
        }
    }

    if player.sleep && !was_asleep {
        info!("[Player] Going to sleep");
    }
}

/// Axis-separated movement against every collider in the world.
pub fn move_player(
    time: Res<Time>,
    colliders: Query<&Collider>,
    mut player_query: Query<(&mut PlayerController, &mut Bounds), With<Player>>,
) {
    let Ok((mut player, mut bounds)) = player_query.get_single_mut() else {
        return;
    };
    let obstacles: Vec<IRect> = colliders.iter().map(|c| c.hitbox).collect();
    player.move_and_collide(time.delta_secs(), &obstacles);
    bounds.0 = player.rect;
}

pub fn animate_player(
    time: Res<Time>,
    assets: Option<Res<GameAssets>>,
    mut player_query: Query<(&mut PlayerController, &mut Sprite), With<Player>>,
) {
    let Ok((mut player, mut sprite)) = player_query.get_single_mut() else {
        return;
    };
    let frames: &[Handle<Image>] = assets
        .as_deref()
        .map(|a| a.player_frames(&player.status))
        .unwrap_or_default();
    player.animate(time.delta_secs(), frames.len());
    if let Some(image) = frames.get(player.current_frame()) {
        sprite.image = image.clone();
    }
}
