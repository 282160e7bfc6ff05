/// Horizontal scrolling only; the world is never taller than the window.
pub struct Camera {
    pub offset_x: f32,
    pub screen_w: f32,
    pub screen_h: f32,
}

impl Camera {
    pub fn new(width: f32, height: f32) -> Self {
        Camera {
            offset_x: 0.0,
            screen_w: width,
            screen_h: height,
        }
    }

    pub fn on_resize(&mut self, w: f32, h: f32) {
        self.screen_w = w;
        self.screen_h = h;
    }

    /// Centers on the player, clamped so the view never leaves the world.
    pub fn update(&mut self, player_x: f32, world_pixel_width: f32) {
        self.offset_x = clamp_offset(player_x, self.screen_w, world_pixel_width);
    }
}

pub fn clamp_offset(player_x: f32, viewport_width: f32, world_pixel_width: f32) -> f32 {
    let right_edge = (world_pixel_width - viewport_width).max(0.0);
    (player_x - viewport_width / 2.0).clamp(0.0, right_edge)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_centers_on_player() {
        let mut camera = Camera::new(600.0, 480.0);
        camera.update(800.0, 1680.0);
        assert_eq!(camera.offset_x, 500.0);
    }

    #[test]
    fn test_clamps_at_both_ends() {
        assert_eq!(clamp_offset(100.0, 600.0, 1680.0), 0.0);
        assert_eq!(clamp_offset(1650.0, 600.0, 1680.0), 1080.0);
    }

    #[test]
    fn test_world_narrower_than_viewport() {
        assert_eq!(clamp_offset(200.0, 600.0, 300.0), 0.0);
    }

    #[test]
    fn test_resize_changes_viewport() {
        let mut camera = Camera::new(600.0, 480.0);
        camera.on_resize(1000.0, 480.0);
        camera.update(1650.0, 1680.0);
        assert_eq!(camera.offset_x, 680.0);
    }

    proptest! {
        #[test]
        fn prop_offset_stays_in_world(player_x in -10_000.0f32..10_000.0) {
            let offset = clamp_offset(player_x, 600.0, 1680.0);
            prop_assert!(offset >= 0.0);
            prop_assert!(offset <= 1680.0 - 600.0);
        }
    }
}
