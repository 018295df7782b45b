//! Player state machine: input handling, action timers, movement with
//! hitbox collision, and animation. Pure logic over `PlayerController`;
//! the systems in `movement.rs` feed it and forward its intents.

use std::time::Duration;

use bevy::math::IRect;
use bevy::prelude::*;
use crate::shared::*;

pub const TOOLS: [Tool; 3] = [Tool::Hoe, Tool::Axe, Tool::Water];
pub const SEEDS: [CropKind; 2] = [CropKind::Corn, CropKind::Tomato];

/// Animation frames advanced per second.
const ANIMATION_SPEED: f32 = 4.0;

/// Something the player asked the world to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerIntent {
    UseTool { tool: Tool, target: IVec2 },
    UseSeed { crop: CropKind, target: IVec2 },
    ToggleShop,
}

/// Target point offset from the render centre, per facing.
pub fn tool_offset(facing: Facing) -> IVec2 {
    match facing {
        Facing::Left => IVec2::new(-50, 40),
        Facing::Right => IVec2::new(50, 40),
        Facing::Up => IVec2::new(0, -10),
        Facing::Down => IVec2::new(0, 50),
    }
}

#[derive(Clone, Copy)]
enum Axis {
    Horizontal,
    Vertical,
}

impl PlayerController {
    /// Render rect centred on `center`, hitbox shrunk around the same centre.
    pub fn new(center: IVec2, config: &GameConfig) -> Self {
        let (w, h) = config.player.sprite_size;
        let (dx, dy) = config.player.hitbox_inset;
        let rect = rect_xywh(0, 0, w, h).with_center(center);
        let hitbox = rect.inflated(-dx, -dy);
        let mut controller = Self {
            pos: hitbox.center_point().as_vec2(),
            rect,
            hitbox,
            direction: Vec2::ZERO,
            speed: config.player.speed,
            status: PlayerStatus::default(),
            frame_index: 0.0,
            timers: PlayerTimers::from_config(&config.timers),
            tool_index: 0,
            seed_index: 0,
            target: IVec2::ZERO,
            sleep: false,
        };
        controller.update_target();
        controller
    }

    pub fn selected_tool(&self) -> Tool {
        TOOLS[self.tool_index % TOOLS.len()]
    }

    pub fn selected_seed(&self) -> CropKind {
        SEEDS[self.seed_index % SEEDS.len()]
    }

    /// Applies one frame of input. Ignored entirely while a tool swing is
    /// in progress or while asleep. `zone` is the interaction zone the
    /// render rect overlaps, if any.
    pub fn handle_input(
        &mut self,
        input: &PlayerInput,
        now: Duration,
        zone: Option<&str>,
    ) -> Option<PlayerIntent> {
        if self.timers.tool_use.active() || self.sleep {
            return None;
        }

        if input.up {
            self.direction.y = -1.0;
            self.status.facing = Facing::Up;
        } else if input.down {
            self.direction.y = 1.0;
            self.status.facing = Facing::Down;
        } else {
            self.direction.y = 0.0;
        }

        if input.right {
            self.direction.x = 1.0;
            self.status.facing = Facing::Right;
        } else if input.left {
            self.direction.x = -1.0;
            self.status.facing = Facing::Left;
        } else {
            self.direction.x = 0.0;
        }

        if input.tool_use {
            self.timers.tool_use.activate(now);
            self.direction = Vec2::ZERO;
            self.frame_index = 0.0;
        }

        if input.tool_switch && !self.timers.tool_switch.active() {
            self.timers.tool_switch.activate(now);
            self.tool_index = (self.tool_index + 1) % TOOLS.len();
        }

        if input.seed_use && !self.timers.seed_use.active() {
            self.timers.seed_use.activate(now);
            self.direction = Vec2::ZERO;
            self.frame_index = 0.0;
        }

        if input.seed_switch && !self.timers.seed_switch.active() {
            self.timers.seed_switch.activate(now);
            self.seed_index = (self.seed_index + 1) % SEEDS.len();
        }

        if input.interact {
            match zone {
                Some("Trader") => return Some(PlayerIntent::ToggleShop),
                Some(_) => {
                    self.status = PlayerStatus::new(Facing::Left, PlayerMode::Idle);
                    self.direction = Vec2::ZERO;
                    self.sleep = true;
                }
                None => {}
            }
        }

        None
    }

    /// Idle when still, swinging while the tool timer runs, moving otherwise.
    pub fn refresh_status(&mut self) {
        self.status.mode = if self.timers.tool_use.active() {
            PlayerMode::Using(self.selected_tool())
        } else if self.direction == Vec2::ZERO {
            PlayerMode::Idle
        } else {
            PlayerMode::Moving
        };
    }

    /// Advances every action timer. Expired use-timers become intents.
    pub fn tick_timers(&mut self, now: Duration) -> Vec<PlayerIntent> {
        let mut intents = Vec::new();
        if self.timers.tool_use.update(now) {
            intents.push(PlayerIntent::UseTool {
                tool: self.selected_tool(),
                target: self.target,
            });
        }
        self.timers.tool_switch.update(now);
        if self.timers.seed_use.update(now) {
            intents.push(PlayerIntent::UseSeed {
                crop: self.selected_seed(),
                target: self.target,
            });
        }
        self.timers.seed_switch.update(now);
        intents
    }

    pub fn update_target(&mut self) {
        self.target = self.rect.center_point() + tool_offset(self.status.facing);
    }

    /// Moves along each axis separately, pushing the hitbox out of any
    /// overlapping obstacle on that axis before moving on the next.
    pub fn move_and_collide(&mut self, dt: f32, obstacles: &[IRect]) {
        if self.direction == Vec2::ZERO {
            return;
        }
        let dir = self.direction.normalize();

        self.pos.x += dir.x * self.speed * dt;
        self.hitbox.set_center_x(self.pos.x.round() as i32);
        self.rect.set_center_x(self.hitbox.center_point().x);
        self.collide(Axis::Horizontal, dir, obstacles);

        self.pos.y += dir.y * self.speed * dt;
        self.hitbox.set_center_y(self.pos.y.round() as i32);
        self.rect.set_center_y(self.hitbox.center_point().y);
        self.collide(Axis::Vertical, dir, obstacles);
    }

    fn collide(&mut self, axis: Axis, dir: Vec2, obstacles: &[IRect]) {
        for obstacle in obstacles {
            if !obstacle.overlaps(&self.hitbox) {
                continue;
            }
            match axis {
                Axis::Horizontal => {
                    if dir.x > 0.0 {
                        self.hitbox.set_right(obstacle.left());
                    } else if dir.x < 0.0 {
                        self.hitbox.set_left(obstacle.right());
                    }
                    let cx = self.hitbox.center_point().x;
                    self.rect.set_center_x(cx);
                    self.pos.x = cx as f32;
                }
                Axis::Vertical => {
                    if dir.y > 0.0 {
                        self.hitbox.set_bottom(obstacle.top());
                    } else if dir.y < 0.0 {
                        self.hitbox.set_top(obstacle.bottom());
                    }
                    let cy = self.hitbox.center_point().y;
                    self.rect.set_center_y(cy);
                    self.pos.y = cy as f32;
                }
            }
        }
    }

    /// Advances the animation index, wrapping at `frame_count`.
    pub fn animate(&mut self, dt: f32, frame_count: usize) {
        self.frame_index += ANIMATION_SPEED * dt;
        if self.frame_index >= frame_count as f32 {
            self.frame_index = 0.0;
        }
    }

    pub fn current_frame(&self) -> usize {
        self.frame_index as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn controller() -> PlayerController {
        PlayerController::new(IVec2::new(500, 500), &GameConfig::default())
    }

    #[test]
    fn test_spawn_geometry() {
        let p = controller();
        assert_eq!(p.rect.size(), IVec2::new(192, 192));
        assert_eq!(p.rect.center_point(), IVec2::new(500, 500));
        assert_eq!(p.hitbox.size(), IVec2::new(66, 122));
        assert_eq!(p.hitbox.center_point(), IVec2::new(500, 500));
        assert_eq!(p.status.key(), "down_idle");
        assert_eq!(p.target, IVec2::new(500, 550));
    }

    #[test]
    fn test_directions_set_facing_and_status() {
        let mut p = controller();
        let input = PlayerInput { left: true, up: true, ..default() };
        p.handle_input(&input, ms(0), None);
        p.refresh_status();
        assert_eq!(p.direction, Vec2::new(-1.0, -1.0));
        assert_eq!(p.status.key(), "left");

        p.handle_input(&PlayerInput::default(), ms(16), None);
        p.refresh_status();
        assert_eq!(p.status.key(), "left_idle");
    }

    #[test]
    fn test_tool_use_locks_input_until_timer_fires() {
        let mut p = controller();
        p.handle_input(&PlayerInput { tool_use: true, ..default() }, ms(1000), None);
        p.refresh_status();
        assert_eq!(p.status.key(), "down_hoe");
        assert_eq!(p.direction, Vec2::ZERO);

        // Locked: movement ignored while swinging
        p.handle_input(&PlayerInput { right: true, ..default() }, ms(1100), None);
        assert_eq!(p.direction, Vec2::ZERO);
        assert!(p.tick_timers(ms(1349)).is_empty());

        let intents = p.tick_timers(ms(1350));
        assert_eq!(
            intents,
            vec![PlayerIntent::UseTool {
                tool: Tool::Hoe,
                target: IVec2::new(500, 550)
            }]
        );
        assert!(p.tick_timers(ms(1400)).is_empty(), "fires once");
        p.refresh_status();
        assert_eq!(p.status.key(), "down_idle");
    }

    #[test]
    fn test_tool_switch_respects_cooldown() {
        let mut p = controller();
        let switch = PlayerInput { tool_switch: true, ..default() };
        p.handle_input(&switch, ms(0), None);
        assert_eq!(p.selected_tool(), Tool::Axe);
        p.handle_input(&switch, ms(100), None);
        assert_eq!(p.selected_tool(), Tool::Axe, "cooldown still active");
        p.tick_timers(ms(200));
        p.handle_input(&switch, ms(210), None);
        assert_eq!(p.selected_tool(), Tool::Water);
        p.tick_timers(ms(410));
        p.handle_input(&switch, ms(420), None);
        assert_eq!(p.selected_tool(), Tool::Hoe, "wraps around");
    }

    #[test]
    fn test_seed_use_and_switch() {
        let mut p = controller();
        p.handle_input(&PlayerInput { seed_switch: true, ..default() }, ms(0), None);
        assert_eq!(p.selected_seed(), CropKind::Tomato);
        p.handle_input(&PlayerInput { seed_use: true, ..default() }, ms(10), None);
        p.handle_input(&PlayerInput { seed_use: true, ..default() }, ms(20), None);
        let intents = p.tick_timers(ms(360));
        assert_eq!(
            intents,
            vec![PlayerIntent::UseSeed {
                crop: CropKind::Tomato,
                target: p.target
            }]
        );
    }

    #[test]
    fn test_interact_with_trader_and_bed() {
        let mut p = controller();
        let interact = PlayerInput { interact: true, ..default() };
        assert_eq!(p.handle_input(&interact, ms(0), None), None);
        assert!(!p.sleep);
        assert_eq!(
            p.handle_input(&interact, ms(0), Some("Trader")),
            Some(PlayerIntent::ToggleShop)
        );
        assert!(!p.sleep);
        assert_eq!(p.handle_input(&interact, ms(0), Some("Bed")), None);
        assert!(p.sleep);
        assert_eq!(p.status.key(), "left_idle");

        // Asleep: input ignored
        p.handle_input(&PlayerInput { down: true, ..default() }, ms(10), None);
        assert_eq!(p.direction, Vec2::ZERO);
    }

    #[test]
    fn test_target_follows_facing() {
        let mut p = controller();
        for (facing, expected) in [
            (Facing::Left, IVec2::new(450, 540)),
            (Facing::Right, IVec2::new(550, 540)),
            (Facing::Up, IVec2::new(500, 490)),
            (Facing::Down, IVec2::new(500, 550)),
        ] {
            p.status.facing = facing;
            p.update_target();
            assert_eq!(p.target, expected);
        }
    }

    #[test]
    fn test_diagonal_speed_is_normalised() {
        let mut p = controller();
        p.direction = Vec2::new(1.0, 1.0);
        p.move_and_collide(1.0, &[]);
        let moved = p.pos - Vec2::new(500.0, 500.0);
        assert!((moved.length() - 300.0).abs() < 0.01);
        assert_eq!(p.rect.center_point(), p.hitbox.center_point());
    }

    #[test]
    fn test_collision_clamps_right_edge() {
        let mut p = controller();
        let wall = rect_xywh(560, 0, 64, 1000);
        p.direction = Vec2::new(1.0, 0.0);
        p.move_and_collide(0.5, &[wall]);
        assert_eq!(p.hitbox.right(), 560);
        assert_eq!(p.pos.x, p.hitbox.center_point().x as f32);
        assert_eq!(p.rect.center_point().x, p.hitbox.center_point().x);
        assert!(!p.hitbox.overlaps(&wall));
    }

    #[test]
    fn test_collision_clamps_top_edge_moving_up() {
        let mut p = controller();
        let wall = rect_xywh(0, 380, 1000, 40);
        p.direction = Vec2::new(0.0, -1.0);
        p.move_and_collide(0.5, &[wall]);
        assert_eq!(p.hitbox.top(), 420);
        assert_eq!(p.pos.y, p.hitbox.center_point().y as f32);
    }

    #[test]
    fn test_slides_along_wall() {
        let mut p = controller();
        let wall = rect_xywh(540, 0, 64, 1000);
        p.direction = Vec2::new(1.0, 1.0);
        p.move_and_collide(0.1, &[wall]);
        assert_eq!(p.hitbox.right(), 540);
        assert!(p.pos.y > 500.0, "vertical motion survives the horizontal block");
    }

    #[test]
    fn test_animation_wraps() {
        let mut p = controller();
        p.animate(0.5, 4);
        assert_eq!(p.current_frame(), 2);
        p.animate(0.5, 4);
        assert_eq!(p.current_frame(), 0);
        p.animate(0.3, 0);
        assert_eq!(p.current_frame(), 0);
    }
}
