use super::animation_handler::{AnimationHandler, PlayerPose};
use super::common::{Dir, Vec2};
use super::game_map::{MapLike, TileKind};
use super::game_state::InputState;
use crate::physics::{Body, ProbeConfig, resolve_collisions};
use crate::resources::Sprite;
use serde::{Deserialize, Serialize};

/// Movement tuning in pixels and pixels per tick.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(default)]
pub struct PhysicsConstants {
    pub jump_power: f32,
    pub run_speed: f32,
    pub air_run_speed: f32,
    pub ground_friction: f32,
    pub air_friction: f32,
    pub gravity: f32,
    pub run_anim_delay: u32,
    pub trivial_speed: f32,
}

impl Default for PhysicsConstants {
    fn default() -> Self {
        PhysicsConstants {
            jump_power: 11.0,
            run_speed: 5.0,
            air_run_speed: 2.0,
            ground_friction: 0.6,
            air_friction: 0.85,
            gravity: 0.5,
            run_anim_delay: 3,
            trivial_speed: 1.0,
        }
    }
}

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum PlayerUpdateResult {
    Jumped,
    CollectedCoin,
    TouchedHazard,
}

pub struct Player {
    pub position: Vec2,
    pub velocity: Vec2,
    pub dir: Dir,
    pub coins_collected: u32,
    on_ground: bool,
    probe: ProbeConfig,
    coin_probe_offset: f32,
    constants: PhysicsConstants,
    animation_handler: AnimationHandler,
}

impl Player {
    /// `sprite_w`/`sprite_h` are the standing sprite's size, which doubles as the collision size.
    pub fn new(position: Vec2, sprite_w: u32, sprite_h: u32, constants: PhysicsConstants) -> Self {
        Player {
            position,
            velocity: Vec2::ZERO,
            dir: Dir::Right,
            coins_collected: 0,
            on_ground: false,
            probe: ProbeConfig::for_sprite(sprite_w, sprite_h),
            coin_probe_offset: (sprite_h / 2) as f32,
            constants,
            animation_handler: AnimationHandler::new(constants.run_anim_delay),
        }
    }

    /// Clears counters and motion. Position is left to the caller.
    pub fn reset(&mut self) {
        self.coins_collected = 0;
        self.velocity = Vec2::ZERO;
        self.animation_handler.reset();
    }

    pub fn respawn(&mut self, position: Vec2) {
        self.position = position;
        self.on_ground = false;
    }

    pub fn is_on_ground(&self) -> bool {
        self.on_ground
    }

    pub fn sprite(&self) -> Sprite {
        self.animation_handler.get_sprite()
    }

    pub fn pose(&self) -> PlayerPose {
        self.animation_handler.current_pose()
    }

    pub fn facing_right(&self) -> bool {
        self.dir == Dir::Right
    }

    pub fn apply_input(&mut self, input: &InputState) -> Option<PlayerUpdateResult> {
        let (speed, friction) = if self.on_ground {
            (self.constants.run_speed, self.constants.ground_friction)
        } else {
            (self.constants.air_run_speed, self.constants.air_friction)
        };

        if input.left {
            self.velocity.x -= speed;
        } else if input.right {
            self.velocity.x += speed;
        }
        // Always applied, so the player coasts down instead of stopping dead
        self.velocity.x *= friction;

        if self.on_ground && input.wants_jump() {
            self.velocity.y = -self.constants.jump_power;
            self.on_ground = false;
            return Some(PlayerUpdateResult::Jumped);
        }
        None
    }

    pub fn integrate_and_resolve(&mut self, map: &mut dyn MapLike) -> Vec<PlayerUpdateResult> {
        let mut update_results = vec![];

        self.position += self.velocity;

        let res = resolve_collisions(
            map,
            &Body {
                position: self.position,
                velocity: self.velocity,
            },
            &self.probe,
        );
        self.position = res.body.position;
        self.velocity = res.body.velocity;
        if res.embedded {
            log::debug!("player wedged between tiles, move undone");
        } else if res.hit_ceiling || res.hit_left || res.hit_right {
            log::trace!(
                "contact ceiling={} left={} right={}",
                res.hit_ceiling,
                res.hit_left,
                res.hit_right
            );
        }
        if res.hazard {
            update_results.push(PlayerUpdateResult::TouchedHazard);
        }

        if self.check_for_coin_getting(map) {
            update_results.push(PlayerUpdateResult::CollectedCoin);
        }

        self.check_for_falling(map);

        update_results
    }

    fn check_for_coin_getting(&mut self, map: &mut dyn MapLike) -> bool {
        let center = Vec2::new(self.position.x, self.position.y - self.coin_probe_offset);
        if map.tile_at(center) == TileKind::Coin {
            map.set_tile(center, TileKind::Empty);
            self.coins_collected += 1;
            return true;
        }
        false
    }

    fn check_for_falling(&mut self, map: &dyn MapLike) {
        let under_feet = map.tile_at(self.position);
        if matches!(under_feet, TileKind::Empty | TileKind::Coin) {
            self.on_ground = false;
        }

        if !self.on_ground {
            if under_feet == TileKind::Solid {
                self.on_ground = true;
                self.position.y = map.top_of_square(self.position);
                self.velocity.y = 0.0;
            } else {
                self.velocity.y += self.constants.gravity;
            }
        }
    }

    /// Facing and run cycle. Small speeds keep the previous facing so the sprite does not flicker.
    pub fn update_animation(&mut self) {
        let trivial = self.constants.trivial_speed;
        if self.velocity.x < -trivial {
            self.dir = Dir::Left;
        } else if self.velocity.x > trivial {
            self.dir = Dir::Right;
        }

        let pose = if !self.on_ground {
            PlayerPose::Airborne
        } else if self.velocity.x.abs() < trivial {
            PlayerPose::Standing
        } else {
            PlayerPose::Running
        };
        self.animation_handler.set_pose(pose);
        self.animation_handler.increment_frame();
    }

    pub fn update(&mut self, input: &InputState, map: &mut dyn MapLike) -> Vec<PlayerUpdateResult> {
        let mut update_results = vec![];
        if let Some(jumped) = self.apply_input(input) {
            update_results.push(jumped);
        }
        update_results.append(&mut self.integrate_and_resolve(map));
        self.update_animation();
        update_results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{LevelTemplate, TileWorld};

    // Floor top at y = 180. Sprite 40x50.
    fn world(rows: &[&str]) -> TileWorld {
        TileWorld::new(LevelTemplate::parse(60, rows).unwrap())
    }

    fn flat_world() -> TileWorld {
        world(&["######", "#....#", "#P...#", "######"])
    }

    fn player_at(x: f32, y: f32) -> Player {
        Player::new(Vec2::new(x, y), 40, 50, PhysicsConstants::default())
    }

    fn grounded_player(map: &mut TileWorld, x: f32) -> Player {
        let mut player = player_at(x, 180.0);
        player.update(&InputState::default(), map);
        assert!(player.is_on_ground());
        player
    }

    #[test]
    fn test_standing_on_solid_stays_grounded() {
        let mut map = flat_world();
        let mut player = player_at(150.0, 180.0);
        let results = player.update(&InputState::default(), &mut map);

        assert!(results.is_empty());
        assert!(player.is_on_ground());
        assert_eq!(player.position, Vec2::new(150.0, 180.0));
        assert_eq!(player.velocity.y, 0.0);

        player.update(&InputState::default(), &mut map);
        assert!(player.is_on_ground());
        assert_eq!(player.position, Vec2::new(150.0, 180.0));
    }

    #[test]
    fn test_jump_while_running_right() {
        let mut map = flat_world();
        let mut player = grounded_player(&mut map, 150.0);
        let input = InputState {
            right: true,
            space: true,
            ..Default::default()
        };

        let jumped = player.apply_input(&input);
        assert_eq!(jumped, Some(PlayerUpdateResult::Jumped));
        assert_eq!(player.velocity.y, -11.0);
        assert!(!player.is_on_ground());
        assert_eq!(player.velocity.x, 5.0 * 0.6);

        player.integrate_and_resolve(&mut map);
        assert_eq!(player.position, Vec2::new(153.0, 169.0));
        assert_eq!(player.velocity.y, -10.5);
        assert!(!player.is_on_ground());
    }

    #[test]
    fn test_up_arrow_also_jumps() {
        let mut map = flat_world();
        let mut player = grounded_player(&mut map, 150.0);
        let input = InputState {
            up: true,
            ..Default::default()
        };
        assert_eq!(player.apply_input(&input), Some(PlayerUpdateResult::Jumped));
    }

    #[test]
    fn test_no_jump_in_air() {
        let mut map = flat_world();
        let mut player = player_at(150.0, 120.0);
        let input = InputState {
            space: true,
            ..Default::default()
        };
        assert_eq!(player.apply_input(&input), None);
        assert_eq!(player.velocity.y, 0.0);
        player.integrate_and_resolve(&mut map);
        assert_eq!(player.velocity.y, 0.5);
    }

    #[test]
    fn test_left_wins_over_right() {
        let mut map = flat_world();
        let mut player = grounded_player(&mut map, 150.0);
        let input = InputState {
            left: true,
            right: true,
            ..Default::default()
        };
        player.apply_input(&input);
        assert_eq!(player.velocity.x, -5.0 * 0.6);
    }

    #[test]
    fn test_air_control_and_friction() {
        let mut player = player_at(150.0, 120.0);
        let input = InputState {
            right: true,
            ..Default::default()
        };
        player.apply_input(&input);
        assert_eq!(player.velocity.x, 2.0 * 0.85);
    }

    #[test]
    fn test_friction_decays_without_snapping_to_zero() {
        let mut map = flat_world();
        let mut player = grounded_player(&mut map, 150.0);
        player.velocity.x = 1.0;
        for _ in 0..10 {
            player.apply_input(&InputState::default());
        }
        assert!(player.velocity.x > 0.0);
        assert!(player.velocity.x < 0.01);
    }

    #[test]
    fn test_falls_and_lands_on_tile_top() {
        let mut map = flat_world();
        let mut player = player_at(150.0, 100.0);
        for _ in 0..40 {
            player.update(&InputState::default(), &mut map);
        }
        assert!(player.is_on_ground());
        assert_eq!(player.position.y, 180.0);
        assert_eq!(player.velocity.y, 0.0);
    }

    #[test]
    fn test_collects_coin_at_sprite_center() {
        // Coin cell (2, 2) contains the sprite center (150, 155)
        let mut map = world(&["######", "#....#", "#Po..#", "######"]);
        let mut player = player_at(150.0, 180.0);
        let results = player.integrate_and_resolve(&mut map);

        assert_eq!(results, vec![PlayerUpdateResult::CollectedCoin]);
        assert_eq!(player.coins_collected, 1);
        assert_eq!(map.tile_at(Vec2::new(150.0, 155.0)), TileKind::Empty);

        let results = player.integrate_and_resolve(&mut map);
        assert!(results.is_empty());
        assert_eq!(player.coins_collected, 1);
    }

    #[test]
    fn test_coin_under_feet_is_not_ground() {
        let mut map = world(&["######", "#P...#", "#....#", "##o###", "######"]);
        let mut player = player_at(150.0, 180.0);
        let results = player.update(&InputState::default(), &mut map);
        assert!(results.is_empty());
        assert!(!player.is_on_ground());
        assert_eq!(player.velocity.y, 0.5);
    }

    #[test]
    fn test_walking_off_edge_falls() {
        let mut map = world(&["######", "#P...#", "#....#", "##.###", "######"]);
        let mut player = player_at(150.0, 180.0);
        player.update(&InputState::default(), &mut map);
        assert!(!player.is_on_ground());
        assert_eq!(player.velocity.y, 0.5);
    }

    #[test]
    fn test_hazard_reported() {
        let mut map = world(&["######", "#P...#", "#..x.#", "######"]);
        let mut player = player_at(170.0, 179.0);
        let results = player.integrate_and_resolve(&mut map);
        assert!(results.contains(&PlayerUpdateResult::TouchedHazard));
    }

    #[test]
    fn test_facing_hysteresis() {
        let mut player = player_at(150.0, 120.0);
        player.velocity.x = -0.5;
        player.update_animation();
        assert!(player.facing_right());

        player.velocity.x = -1.5;
        player.update_animation();
        assert!(!player.facing_right());

        player.velocity.x = 0.9;
        player.update_animation();
        assert!(!player.facing_right());
    }

    #[test]
    fn test_reset_keeps_position() {
        let mut map = world(&["######", "#....#", "#Po..#", "######"]);
        let mut player = player_at(150.0, 180.0);
        player.integrate_and_resolve(&mut map);
        player.velocity = Vec2::new(3.0, -2.0);
        player.reset();
        assert_eq!(player.coins_collected, 0);
        assert_eq!(player.velocity, Vec2::ZERO);
        assert_eq!(player.position, Vec2::new(150.0, 180.0));
    }

    #[test]
    fn test_pose_tracks_ground_and_speed() {
        let mut map = flat_world();
        let mut player = grounded_player(&mut map, 150.0);
        assert_eq!(player.pose(), PlayerPose::Standing);

        let input = InputState {
            right: true,
            ..Default::default()
        };
        player.update(&input, &mut map);
        assert_eq!(player.pose(), PlayerPose::Running);

        let input = InputState {
            space: true,
            ..Default::default()
        };
        player.update(&input, &mut map);
        assert_eq!(player.pose(), PlayerPose::Airborne);
        assert_eq!(player.sprite(), Sprite::GuyRun1);
    }
}
