use bevy::prelude::*;
use crate::farming::crops::crop_name;
use crate::shared::*;

// ═══════════════════════════════════════════════════════════════════════
// MARKER COMPONENTS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Component)]
pub struct HudRoot;

#[derive(Component)]
pub struct HudToolText;

#[derive(Component)]
pub struct HudSeedText;

#[derive(Component)]
pub struct HudMoneyText;

// ═══════════════════════════════════════════════════════════════════════
// SPAWN / DESPAWN
// ═══════════════════════════════════════════════════════════════════════

fn hud_text(value: &str, size: f32, color: Color) -> (Text, TextFont, TextColor) {
    (
        Text::new(value),
        TextFont {
            font_size: size,
            ..default()
        },
        TextColor(color),
    )
}

pub fn spawn_hud(mut commands: Commands) {
    commands
        .spawn((
            HudRoot,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(16.0),
                bottom: Val::Px(16.0),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(4.0),
                padding: UiRect::all(Val::Px(8.0)),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.45)),
            GlobalZIndex(50),
        ))
        .with_children(|parent| {
            parent.spawn((HudToolText, hud_text("Tool: hoe", 20.0, Color::WHITE)));
            parent.spawn((HudSeedText, hud_text("Seed: corn", 20.0, Color::WHITE)));
            parent.spawn((
                HudMoneyText,
                hud_text("$0", 18.0, Color::srgb(1.0, 0.85, 0.3)),
            ));
        });
}

pub fn despawn_hud(mut commands: Commands, query: Query<Entity, With<HudRoot>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}

// ═══════════════════════════════════════════════════════════════════════
// UPDATE
// ═══════════════════════════════════════════════════════════════════════

pub fn tool_label(player: &PlayerController) -> String {
    format!("Tool: {}", player.selected_tool().name())
}

pub fn seed_label(player: &PlayerController, inventory: &Inventory) -> String {
    let seed = player.selected_seed();
    format!("Seed: {} x{}", crop_name(seed), inventory.seed_count(seed))
}

pub fn update_hud(
    player_query: Query<&PlayerController, (With<Player>, Changed<PlayerController>)>,
    all_players: Query<&PlayerController, With<Player>>,
    inventory: Res<Inventory>,
    mut tool_text: Query<&mut Text, (With<HudToolText>, Without<HudSeedText>, Without<HudMoneyText>)>,
    mut seed_text: Query<&mut Text, (With<HudSeedText>, Without<HudToolText>, Without<HudMoneyText>)>,
    mut money_text: Query<&mut Text, (With<HudMoneyText>, Without<HudToolText>, Without<HudSeedText>)>,
) {
    let player_changed = !player_query.is_empty();
    if !player_changed && !inventory.is_changed() {
        return;
    }
    let Ok(player) = all_players.get_single() else {
        return;
    };
    for mut text in &mut tool_text {
        **text = tool_label(player);
    }
    for mut text in &mut seed_text {
        **text = seed_label(player, &inventory);
    }
    for mut text in &mut money_text {
        **text = format!("${}", inventory.money);
    }
}
