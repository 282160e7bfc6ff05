use crate::state::{MapLike, TileKind, Vec2};

/// Position (bottom-center of the sprite) and per-tick velocity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Body {
    pub position: Vec2,
    pub velocity: Vec2,
}

/// Probe offsets derived from the standing sprite size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProbeConfig {
    pub wall_probe_distance: f32,
    pub ceiling_probe_distance: f32,
    pub height: f32,
}

impl ProbeConfig {
    pub fn for_sprite(width: u32, height: u32) -> ProbeConfig {
        ProbeConfig {
            wall_probe_distance: (width as f32 * 0.3).trunc(),
            ceiling_probe_distance: (height as f32 * 0.95).trunc(),
            height: height as f32,
        }
    }
}

/// The six sample points tested against the grid each tick.
#[derive(Clone, Copy, Debug)]
pub struct Probes {
    pub top: Vec2,
    pub left_high: Vec2,
    pub right_high: Vec2,
    pub left_low: Vec2,
    pub right_low: Vec2,
    pub feet: Vec2,
}

impl Probes {
    pub fn around(position: Vec2, config: &ProbeConfig) -> Probes {
        let left_x = position.x - config.wall_probe_distance;
        let right_x = position.x + config.wall_probe_distance;
        let low_y = position.y - 0.2 * config.height;
        let high_y = position.y - 0.8 * config.height;

        Probes {
            top: Vec2::new(position.x, position.y - config.ceiling_probe_distance),
            left_high: Vec2::new(left_x, high_y),
            right_high: Vec2::new(right_x, high_y),
            left_low: Vec2::new(left_x, low_y),
            right_low: Vec2::new(right_x, low_y),
            feet: position,
        }
    }

    pub fn all(&self) -> [Vec2; 6] {
        [
            self.top,
            self.left_high,
            self.left_low,
            self.right_high,
            self.right_low,
            self.feet,
        ]
    }
}

pub struct CollisionResult {
    pub body: Body,
    pub hazard: bool,
    pub hit_ceiling: bool,
    pub embedded: bool,
    pub hit_left: bool,
    pub hit_right: bool,
}

/// Pushes a body that has already been advanced by its velocity back out of solid tiles.
///
/// Probes are sampled once, before any correction. A probe on a kill block stops
/// processing and leaves the body as it was. Ground state is not handled here.
pub fn resolve_collisions(map: &dyn MapLike, body: &Body, config: &ProbeConfig) -> CollisionResult {
    let probes = Probes::around(body.position, config);
    let mut out = CollisionResult {
        body: *body,
        hazard: false,
        hit_ceiling: false,
        embedded: false,
        hit_left: false,
        hit_right: false,
    };

    if probes
        .all()
        .iter()
        .any(|p| map.tile_at(*p) == TileKind::KillBlock)
    {
        out.hazard = true;
        return out;
    }

    let position = &mut out.body.position;
    let velocity = &mut out.body.velocity;

    if map.is_solid_at(probes.top) {
        out.hit_ceiling = true;
        if map.is_solid_at(probes.feet) {
            // Wedged top and bottom: take the whole move back
            *position -= *velocity;
            *velocity = Vec2::ZERO;
            out.embedded = true;
        } else {
            position.y = map.bottom_of_square(probes.top) + config.ceiling_probe_distance;
            if velocity.y < 0.0 {
                velocity.y = 0.0;
            }
        }
    }

    for probe in [probes.left_low, probes.left_high] {
        if map.is_solid_at(probe) {
            out.hit_left = true;
            position.x = map.right_of_square(probe) + config.wall_probe_distance;
            if velocity.x < 0.0 {
                velocity.x = 0.0;
            }
        }
    }

    for probe in [probes.right_low, probes.right_high] {
        if map.is_solid_at(probe) {
            out.hit_right = true;
            position.x = map.left_of_square(probe) - config.wall_probe_distance;
            if velocity.x > 0.0 {
                velocity.x = 0.0;
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{LevelTemplate, TileWorld};

    // 60px cells, sprite 40x50: wall probe 12, ceiling probe 47
    fn config() -> ProbeConfig {
        ProbeConfig::for_sprite(40, 50)
    }

    fn world(rows: &[&str]) -> TileWorld {
        TileWorld::new(LevelTemplate::parse(60, rows).unwrap())
    }

    fn body(x: f32, y: f32, vx: f32, vy: f32) -> Body {
        Body {
            position: Vec2::new(x, y),
            velocity: Vec2::new(vx, vy),
        }
    }

    #[test]
    fn test_probe_distances_truncate() {
        let c = ProbeConfig::for_sprite(33, 51);
        assert_eq!(c.wall_probe_distance, 9.0);
        assert_eq!(c.ceiling_probe_distance, 48.0);
        assert_eq!(c.height, 51.0);
    }

    #[test]
    fn test_probe_layout() {
        let p = Probes::around(Vec2::new(100.0, 200.0), &config());
        assert_eq!(p.top, Vec2::new(100.0, 153.0));
        assert_eq!(p.left_high, Vec2::new(88.0, 160.0));
        assert_eq!(p.right_high, Vec2::new(112.0, 160.0));
        assert_eq!(p.left_low, Vec2::new(88.0, 190.0));
        assert_eq!(p.right_low, Vec2::new(112.0, 190.0));
        assert_eq!(p.feet, Vec2::new(100.0, 200.0));
    }

    #[test]
    fn test_free_space_is_untouched() {
        let w = world(&["#####", "#...#", "#P..#", "#####"]);
        let b = body(150.0, 170.0, 3.0, -2.0);
        let res = resolve_collisions(&w, &b, &config());
        assert_eq!(res.body, b);
        assert!(!res.hazard && !res.hit_ceiling && !res.hit_left && !res.hit_right);
    }

    #[test]
    fn test_ceiling_snaps_below_tile_and_stops_upward_motion() {
        // Top probe at y = 100 - 47 = 53 lands in the solid top row
        let w = world(&["#####", "#...#", "#P..#", "#####"]);
        let b = body(150.0, 100.0, 0.0, -5.0);
        let res = resolve_collisions(&w, &b, &config());
        assert!(res.hit_ceiling);
        assert!(!res.embedded);
        assert_eq!(res.body.position.y, 60.0 + 47.0);
        assert_eq!(res.body.velocity.y, 0.0);
    }

    #[test]
    fn test_ceiling_keeps_downward_velocity() {
        let w = world(&["#####", "#...#", "#P..#", "#####"]);
        let b = body(150.0, 100.0, 0.0, 2.0);
        let res = resolve_collisions(&w, &b, &config());
        assert_eq!(res.body.position.y, 107.0);
        assert_eq!(res.body.velocity.y, 2.0);
    }

    #[test]
    fn test_embedded_undoes_whole_move() {
        // Top probe and feet both inside solid cells
        let w = world(&["#####", "#P..#", "#####", "#####"]);
        let b = body(150.0, 200.0, 4.0, 6.0);
        let res = resolve_collisions(&w, &b, &config());
        assert!(res.embedded);
        assert_eq!(res.body.velocity, Vec2::ZERO);
        assert_eq!(res.body.position.y, 194.0);
    }

    #[test]
    fn test_left_wall_pushes_right() {
        // Left probes at x = 58 sit in the wall column
        let w = world(&["#####", "#P..#", "#...#", "#####"]);
        let b = body(70.0, 170.0, -4.0, 0.0);
        let res = resolve_collisions(&w, &b, &config());
        assert!(res.hit_left);
        assert_eq!(res.body.position.x, 60.0 + 12.0);
        assert_eq!(res.body.velocity.x, 0.0);
    }

    #[test]
    fn test_right_wall_pushes_left() {
        let w = world(&["#####", "#P..#", "#...#", "#####"]);
        let b = body(230.0, 170.0, 4.0, 0.0);
        let res = resolve_collisions(&w, &b, &config());
        assert!(res.hit_right);
        assert_eq!(res.body.position.x, 240.0 - 12.0);
        assert_eq!(res.body.velocity.x, 0.0);
    }

    #[test]
    fn test_wall_keeps_velocity_moving_away() {
        let w = world(&["#####", "#P..#", "#...#", "#####"]);
        let b = body(70.0, 170.0, 3.0, 0.0);
        let res = resolve_collisions(&w, &b, &config());
        assert_eq!(res.body.position.x, 72.0);
        assert_eq!(res.body.velocity.x, 3.0);
    }

    #[test]
    fn test_only_low_probe_hits_step() {
        // A one-tile step: only the shin-high probe reaches the solid cell
        let w = world(&["#####", "#P..#", "#..##", "#####"]);
        let b = body(172.0, 150.0, 5.0, 0.0);
        let res = resolve_collisions(&w, &b, &config());
        assert!(res.hit_right);
        assert_eq!(res.body.position.x, 180.0 - 12.0);
    }

    #[test]
    fn test_hazard_short_circuits() {
        let w = world(&["#####", "#P..#", "#..x#", "#####"]);
        let b = body(175.0, 175.0, 5.0, -3.0);
        let res = resolve_collisions(&w, &b, &config());
        assert!(res.hazard);
        assert_eq!(res.body, b);
    }
}
