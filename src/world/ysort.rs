use bevy::math::IRect;
use bevy::prelude::*;
use crate::shared::*;

/// Z distance between consecutive entries of the draw order.
const Z_STEP: f32 = 0.001;

/// Draw order: depth layers ascending, then vertical centre ascending.
/// Ties keep their input order.
pub fn draw_order<T: Copy>(items: &[(T, Depth, i32)]) -> Vec<T> {
    let mut order = Vec::with_capacity(items.len());
    for depth in Depth::ALL {
        let mut layer: Vec<&(T, Depth, i32)> = items.iter().filter(|(_, d, _)| *d == depth).collect();
        layer.sort_by_key(|(_, _, center_y)| *center_y);
        order.extend(layer.into_iter().map(|(id, _, _)| *id));
    }
    order
}

/// Draw order for live entities. Exact ties fall back to `Entity` bits so
/// the result does not depend on query iteration order.
pub fn rank_entities(mut items: Vec<(Entity, Depth, i32)>) -> Vec<Entity> {
    items.sort_by_key(|(entity, _, _)| *entity);
    draw_order(&items)
}

/// World rect (y down) to a Bevy translation relative to a camera at the
/// origin (y up), after subtracting the camera offset.
pub fn to_screen(rect: IRect, offset: Vec2, viewport: Vec2) -> Vec2 {
    let center = rect.min.as_vec2() + rect.size().as_vec2() / 2.0;
    Vec2::new(
        center.x - offset.x - viewport.x / 2.0,
        viewport.y / 2.0 - (center.y - offset.y),
    )
}

/// Writes every drawable's `Transform` from its `Bounds`, the camera
/// offset, and its rank in the draw order.
/// Runs in PostUpdate AFTER all simulation and overlay sync.
pub fn sync_draw_transforms(
    offset: Res<CameraOffset>,
    config: Res<GameConfig>,
    mut query: Query<(Entity, &Bounds, &Depth, &mut Transform)>,
) {
    let items: Vec<(Entity, Depth, i32)> = query
        .iter()
        .map(|(entity, bounds, depth, _)| (entity, *depth, bounds.0.center_point().y))
        .collect();

    let viewport = Vec2::new(config.window.width, config.window.height);
    for (rank, entity) in rank_entities(items).into_iter().enumerate() {
        let Ok((_, bounds, _, mut transform)) = query.get_mut(entity) else {
            continue;
        };
        let xy = to_screen(bounds.0, offset.0, viewport);
        transform.translation = xy.extend(rank as f32 * Z_STEP);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_beats_vertical_position() {
        let items = [
            ("fruit", Depth::Fruit, 0),
            ("tree", Depth::Main, 500),
            ("soil", Depth::Soil, 900),
            ("water", Depth::Water, 1000),
        ];
        assert_eq!(draw_order(&items), vec!["water", "soil", "tree", "fruit"]);
    }

    #[test]
    fn test_lower_entities_draw_later_in_a_layer() {
        let items = [
            ("player", Depth::Main, 700),
            ("tree", Depth::Main, 300),
            ("fence", Depth::Main, 900),
        ];
        assert_eq!(draw_order(&items), vec!["tree", "player", "fence"]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let items = [
            ("a", Depth::Main, 100),
            ("b", Depth::Main, 100),
            ("c", Depth::Main, 100),
        ];
        assert_eq!(draw_order(&items), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_entity_ties_ignore_query_order() {
        let a = Entity::from_raw(3);
        let b = Entity::from_raw(11);
        let c = Entity::from_raw(7);
        let forward = vec![(a, Depth::Main, 100), (b, Depth::Main, 100), (c, Depth::Main, 100)];
        let mut backward = forward.clone();
        backward.reverse();
        assert_eq!(rank_entities(forward), vec![a, c, b]);
        assert_eq!(rank_entities(backward), vec![a, c, b]);
    }

    #[test]
    fn test_to_screen_centres_camera_target() {
        let player = rect_xywh(1304, 604, 192, 192);
        let offset = Vec2::new(760.0, 340.0);
        let viewport = Vec2::new(1280.0, 720.0);
        assert_eq!(to_screen(player, offset, viewport), Vec2::ZERO);
        let above = rect_xywh(1304, 404, 192, 192);
        assert_eq!(to_screen(above, offset, viewport), Vec2::new(0.0, 200.0));
    }
}
