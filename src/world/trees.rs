//! Trees: axe hits, fruit, felling, and overnight regrowth.

use bevy::math::IRect;
use bevy::prelude::*;
use rand::Rng;
use crate::shared::*;

/// What one axe hit did to a tree.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct HitOutcome {
    pub dropped: Option<Entity>,
    pub felled: bool,
}

impl Tree {
    pub fn new(size: TreeSize, health: u8) -> Self {
        Self {
            size,
            health,
            alive: true,
            fruit: Vec::new(),
        }
    }

    /// Loses one health and shakes loose a random fruit if any hang.
    /// Stumps ignore hits.
    pub fn take_hit(&mut self, felling: TreeFelling, rng: &mut impl Rng) -> HitOutcome {
        if !self.alive {
            return HitOutcome::default();
        }
        self.health = self.health.saturating_sub(1);
        let dropped = if self.fruit.is_empty() {
            None
        } else {
            let index = rng.gen_range(0..self.fruit.len());
            Some(self.fruit.swap_remove(index))
        };
        let felled = self.health == 0 && matches!(felling, TreeFelling::Stump { .. });
        if felled {
            self.alive = false;
        }
        HitOutcome { dropped, felled }
    }
}

pub fn fruit_anchors(size: TreeSize) -> &'static [(i32, i32)] {
    match size {
        TreeSize::Small => &SMALL_TREE_FRUIT,
        TreeSize::Large => &LARGE_TREE_FRUIT,
    }
}

pub fn stump_size(size: TreeSize) -> IVec2 {
    match size {
        TreeSize::Small => IVec2::new(48, 40),
        TreeSize::Large => IVec2::new(64, 48),
    }
}

/// Fruit rect for an anchor point, relative to the tree's top-left.
pub fn fruit_rect(tree_rect: IRect, anchor: (i32, i32)) -> IRect {
    rect_xywh(
        tree_rect.left() + anchor.0,
        tree_rect.top() + anchor.1,
        FRUIT_SIZE.x,
        FRUIT_SIZE.y,
    )
}

/// Rolls every anchor; spawns an apple for each success.
pub fn grow_fruit(
    commands: &mut Commands,
    tree_entity: Entity,
    tree: &mut Tree,
    tree_rect: IRect,
    apple: &Handle<Image>,
    chance: f64,
    rng: &mut impl Rng,
) {
    for &anchor in fruit_anchors(tree.size) {
        if !rng.gen_bool(chance.clamp(0.0, 1.0)) {
            continue;
        }
        let rect = fruit_rect(tree_rect, anchor);
        let fruit = commands
            .spawn((
                Fruit { tree: tree_entity },
                Sprite {
                    image: apple.clone(),
                    custom_size: Some(rect.size().as_vec2()),
                    ..default()
                },
                Bounds(rect),
                Depth::Fruit,
            ))
            .id();
        tree.fruit.push(fruit);
    }
}

pub fn spawn_tree(
    commands: &mut Commands,
    object: &ObjectEntry,
    assets: &GameAssets,
    config: &TreeConfig,
    rng: &mut impl Rng,
) -> Entity {
    let rect = object.rect();
    let entity = commands
        .spawn((
            Sprite {
                image: assets.image(object.image.as_deref()),
                custom_size: Some(rect.size().as_vec2()),
                ..default()
            },
            Bounds(rect),
            Depth::Main,
            Collider {
                hitbox: super::generic_hitbox(rect),
            },
        ))
        .id();
    let mut tree = Tree::new(TreeSize::from_name(&object.name), config.health);
    grow_fruit(commands, entity, &mut tree, rect, &assets.apple, config.fruit_chance, rng);
    commands.entity(entity).insert(tree);
    entity
}

// ─────────────────────────────────────────────────────────────────────────────
// Systems
// ─────────────────────────────────────────────────────────────────────────────

pub fn handle_axe(
    mut commands: Commands,
    time: Res<Time>,
    config: Res<GameConfig>,
    assets: Res<GameAssets>,
    mut tool_events: EventReader<ToolUseEvent>,
    mut trees: Query<(&mut Tree, &mut Bounds, &mut Collider, &mut Sprite), Without<Fruit>>,
    fruits: Query<(&Bounds, &Sprite), (With<Fruit>, Without<Tree>)>,
    mut item_events: EventWriter<ItemGainedEvent>,
    mut sfx_events: EventWriter<PlaySfxEvent>,
) {
    let mut rng = rand::thread_rng();
    let now = time.elapsed();

    for event in tool_events.read() {
        if event.tool != Tool::Axe {
            continue;
        }
        sfx_events.send(PlaySfxEvent { sfx_id: "axe".to_string() });

        for (mut tree, mut bounds, mut collider, mut sprite) in trees.iter_mut() {
            if !bounds.0.contains_point(event.target) {
                continue;
            }
            let outcome = tree.take_hit(config.trees.felling, &mut rng);

            if let Some(fruit) = outcome.dropped {
                if let Ok((fruit_bounds, fruit_sprite)) = fruits.get(fruit) {
                    commands.spawn(particle_bundle(
                        fruit_sprite.image.clone(),
                        fruit_bounds.0,
                        Depth::Fruit,
                        now,
                    ));
                }
                commands.entity(fruit).despawn();
                item_events.send(ItemGainedEvent {
                    item: ItemKind::Apple,
                    quantity: 1,
                });
            }

            if outcome.felled {
                commands.spawn(particle_bundle(sprite.image.clone(), bounds.0, Depth::Main, now));
                for fruit in tree.fruit.drain(..) {
                    commands.entity(fruit).despawn();
                }

                let size = stump_size(tree.size);
                let stump = rect_xywh(0, 0, size.x, size.y)
                    .with_midbottom(IVec2::new(bounds.0.center_point().x, bounds.0.bottom()));
                bounds.0 = stump;
                collider.hitbox = stump.inflated(-10, -(stump.height() as f32 * 0.6) as i32);
                sprite.image = assets.stump(tree.size);
                sprite.custom_size = Some(stump.size().as_vec2());

                if let TreeFelling::Stump { wood } = config.trees.felling {
                    item_events.send(ItemGainedEvent {
                        item: ItemKind::Wood,
                        quantity: wood,
                    });
                }
                info!("[World] Tree felled at ({}, {})", stump.left(), stump.top());
            }
        }
    }
}

/// Overnight: every hanging apple falls off, living trees grow a fresh crop.
pub fn regrow_fruit(
    mut commands: Commands,
    mut reset_events: EventReader<DayResetEvent>,
    config: Res<GameConfig>,
    assets: Res<GameAssets>,
    fruits: Query<(Entity, &Fruit)>,
    mut trees: Query<(Entity, &mut Tree, &Bounds)>,
) {
    if reset_events.read().count() == 0 {
        return;
    }
    let mut rng = rand::thread_rng();

    for (fruit_entity, fruit) in fruits.iter() {
        if let Ok((_, mut tree, _)) = trees.get_mut(fruit.tree) {
            tree.fruit.retain(|&f| f != fruit_entity);
        }
        commands.entity(fruit_entity).despawn();
    }

    let mut grown = 0;
    for (entity, mut tree, bounds) in trees.iter_mut() {
        if tree.alive {
            grow_fruit(
                &mut commands,
                entity,
                &mut tree,
                bounds.0,
                &assets.apple,
                config.trees.fruit_chance,
                &mut rng,
            );
            grown += tree.fruit.len();
        }
    }
    info!("[World] Trees regrew {} apples", grown);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn tree_with_fruit(count: u32) -> Tree {
        let mut tree = Tree::new(TreeSize::Small, 5);
        tree.fruit = (0..count).map(Entity::from_raw).collect();
        tree
    }

    #[test]
    fn test_hit_drops_one_fruit() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut tree = tree_with_fruit(3);
        let outcome = tree.take_hit(TreeFelling::Stump { wood: 1 }, &mut rng);
        assert!(outcome.dropped.is_some());
        assert!(!outcome.felled);
        assert_eq!(tree.fruit.len(), 2);
        assert_eq!(tree.health, 4);
    }

    #[test]
    fn test_fifth_hit_fells_into_stump() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut tree = tree_with_fruit(0);
        for _ in 0..4 {
            assert!(!tree.take_hit(TreeFelling::Stump { wood: 1 }, &mut rng).felled);
        }
        let outcome = tree.take_hit(TreeFelling::Stump { wood: 1 }, &mut rng);
        assert!(outcome.felled);
        assert!(!tree.alive);
        assert_eq!(tree.take_hit(TreeFelling::Stump { wood: 1 }, &mut rng), HitOutcome::default());
    }

    #[test]
    fn test_indestructible_tree_never_falls() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut tree = tree_with_fruit(1);
        for _ in 0..10 {
            assert!(!tree.take_hit(TreeFelling::Indestructible, &mut rng).felled);
        }
        assert!(tree.alive);
        assert!(tree.fruit.is_empty());
    }

    #[test]
    fn test_anchor_count_caps_fruit() {
        assert_eq!(fruit_anchors(TreeSize::Small).len(), 6);
        assert_eq!(fruit_anchors(TreeSize::Large).len(), 6);
    }

    #[test]
    fn test_fruit_rect_offsets_from_top_left() {
        let rect = fruit_rect(rect_xywh(100, 200, 64, 80), (18, 17));
        assert_eq!(rect.min, IVec2::new(118, 217));
        assert_eq!(rect.size(), FRUIT_SIZE);
    }
}
