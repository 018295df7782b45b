use bevy::prelude::*;
use crate::shared::*;

/// Full-screen tint that follows the `Sky` colour.
#[derive(Component)]
pub struct SkyOverlay;

/// Black overlay driven by the sleep transition.
#[derive(Component)]
pub struct NightFadeOverlay;

/// The sky colour as a translucent overlay. Full daylight (white) is
/// invisible; the closer to the night colour the stronger the tint.
pub fn sky_tint(color: Vec3) -> Color {
    let rgb = (color / 255.0).clamp(Vec3::ZERO, Vec3::ONE);
    let alpha = 1.0 - (rgb.x + rgb.y + rgb.z) / 3.0;
    Color::srgba(rgb.x, rgb.y, rgb.z, alpha)
}

pub fn night_fade_alpha(transition: &SleepTransition, sleeping: bool) -> f32 {
    if sleeping {
        1.0 - (transition.level / 255.0).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

fn overlay_node() -> Node {
    Node {
        width: Val::Percent(100.0),
        height: Val::Percent(100.0),
        position_type: PositionType::Absolute,
        ..default()
    }
}

/// Spawn both overlays (always present, transparent until needed)
pub fn spawn_overlays(mut commands: Commands) {
    commands.spawn((
        SkyOverlay,
        overlay_node(),
        BackgroundColor(Color::NONE),
        GlobalZIndex(90),
    ));
    commands.spawn((
        NightFadeOverlay,
        overlay_node(),
        BackgroundColor(Color::NONE),
        GlobalZIndex(100),
    ));
}

pub fn update_sky_overlay(
    sky: Res<Sky>,
    mut query: Query<&mut BackgroundColor, With<SkyOverlay>>,
) {
    if !sky.is_changed() {
        return;
    }
    for mut bg in &mut query {
        *bg = BackgroundColor(sky_tint(sky.color));
    }
}

pub fn update_night_fade(
    transition: Res<SleepTransition>,
    player_query: Query<&PlayerController, With<Player>>,
    mut query: Query<&mut BackgroundColor, With<NightFadeOverlay>>,
) {
    let sleeping = player_query.get_single().is_ok_and(|p| p.sleep);
    let alpha = night_fade_alpha(&transition, sleeping);
    for mut bg in &mut query {
        *bg = BackgroundColor(Color::srgba(0.0, 0.0, 0.0, alpha));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_daylight_is_clear() {
        let tint = sky_tint(Vec3::splat(255.0));
        assert_eq!(tint.alpha(), 0.0);
    }

    #[test]
    fn test_night_tint_is_visible() {
        let tint = sky_tint(Vec3::new(38.0, 101.0, 189.0));
        assert!(tint.alpha() > 0.5 && tint.alpha() < 0.6);
    }

    #[test]
    fn test_fade_only_while_sleeping() {
        let mut transition = SleepTransition::new(120.0);
        transition.level = 0.0;
        assert_eq!(night_fade_alpha(&transition, true), 1.0);
        assert_eq!(night_fade_alpha(&transition, false), 0.0);
    }
}
