use bevy::prelude::*;
use crate::shared::*;

// ═══════════════════════════════════════════════════════════════════════
// MARKER COMPONENTS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Component)]
pub struct ShopScreenRoot;

/// One line per line of `shop_lines`.
pub fn shop_lines(inventory: &Inventory) -> Vec<String> {
    let mut lines = vec![format!("Money: ${}", inventory.money)];
    for item in ItemKind::ALL {
        lines.push(format!("{}: {}", item.name(), inventory.count(item)));
    }
    lines.push(format!(
        "Seeds: corn {} / tomato {}",
        inventory.seed_count(CropKind::Corn),
        inventory.seed_count(CropKind::Tomato)
    ));
    lines
}

// ═══════════════════════════════════════════════════════════════════════
// SPAWN / DESPAWN
// ═══════════════════════════════════════════════════════════════════════

pub fn spawn_shop_screen(mut commands: Commands, inventory: Res<Inventory>) {
    commands
        .spawn((
            ShopScreenRoot,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            GlobalZIndex(80),
        ))
        .with_children(|parent| {
            parent
                .spawn((
                    Node {
                        width: Val::Px(420.0),
                        flex_direction: FlexDirection::Column,
                        row_gap: Val::Px(6.0),
                        padding: UiRect::all(Val::Px(20.0)),
                        border: UiRect::all(Val::Px(3.0)),
                        ..default()
                    },
                    BackgroundColor(Color::srgb(0.93, 0.87, 0.72)),
                    BorderColor(Color::srgb(0.45, 0.3, 0.15)),
                ))
                .with_children(|panel| {
                    panel.spawn((
                        Text::new("Trader"),
                        TextFont {
                            font_size: 28.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.3, 0.2, 0.1)),
                    ));
                    for line in shop_lines(&inventory) {
                        panel.spawn((
                            Text::new(line),
                            TextFont {
                                font_size: 20.0,
                                ..default()
                            },
                            TextColor(Color::srgb(0.2, 0.15, 0.1)),
                        ));
                    }
                    panel.spawn((
                        Text::new("Esc / Enter to close"),
                        TextFont {
                            font_size: 16.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.45, 0.4, 0.35)),
                    ));
                });
        });
    info!("[UI] Shop screen opened");
}

pub fn despawn_shop_screen(mut commands: Commands, query: Query<Entity, With<ShopScreenRoot>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}

/// Closing the shop goes through the same toggle request that opened it.
pub fn shop_input(input: Res<PlayerInput>, mut toggle_events: EventWriter<ShopToggleEvent>) {
    if input.cancel || input.interact {
        toggle_events.send(ShopToggleEvent);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shop_lines_list_every_item() {
        let mut inventory = Inventory::default();
        inventory.add(ItemKind::Apple, 3);
        let lines = shop_lines(&inventory);
        assert_eq!(lines.len(), ItemKind::ALL.len() + 2);
        assert!(lines.contains(&"apple: 3".to_string()));
        assert_eq!(lines[0], "Money: $200");
    }
}
