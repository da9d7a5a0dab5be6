use eframe::egui::{Pos2, Vec2};

const MIN_SCALE: f32 = 0.1;
const MAX_SCALE: f32 = 5.0;
const ZOOM_STEP: f32 = 1.1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum ZoomDirection {
    In,
    Out,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct Camera {
    pub(super) offset: Vec2,
    pub(super) scale: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            scale: 1.0,
        }
    }
}

impl Camera {
    pub(super) fn world_to_screen(&self, world: Pos2) -> Pos2 {
        (world.to_vec2() * self.scale + self.offset).to_pos2()
    }

    pub(super) fn screen_to_world(&self, screen: Pos2) -> Pos2 {
        ((screen.to_vec2() - self.offset) / self.scale).to_pos2()
    }

    pub(super) fn pan_by(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// One zoom step toward `anchor`; the world point under the anchor stays
    /// under it on screen.
    pub(super) fn zoom(&mut self, anchor: Pos2, direction: ZoomDirection) {
        let next_scale = match direction {
            ZoomDirection::In => self.scale * ZOOM_STEP,
            ZoomDirection::Out => self.scale / ZOOM_STEP,
        }
        .clamp(MIN_SCALE, MAX_SCALE);

        let world_before = self.screen_to_world(anchor);
        self.scale = next_scale;
        let world_after = self.screen_to_world(anchor);
        self.offset += (world_after - world_before) * self.scale;
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::{pos2, vec2};

    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    fn close_pos(a: Pos2, b: Pos2) -> bool {
        close(a.x, b.x) && close(a.y, b.y)
    }

    #[test]
    fn identity_camera_maps_world_to_screen_unchanged() {
        let camera = Camera::default();
        assert_eq!(camera.world_to_screen(pos2(10.0, 20.0)), pos2(10.0, 20.0));
    }

    #[test]
    fn screen_world_round_trip() {
        let camera = Camera {
            offset: vec2(-40.0, 260.5),
            scale: 2.3,
        };
        let world = pos2(123.4, -56.7);
        let back = camera.screen_to_world(camera.world_to_screen(world));
        assert!(close_pos(back, world));
    }

    #[test]
    fn pan_accumulates_screen_deltas() {
        let mut camera = Camera::default();
        camera.pan_by(vec2(10.0, -4.0));
        camera.pan_by(vec2(5.0, 6.0));
        assert_eq!(camera.offset, vec2(15.0, 2.0));
    }

    #[test]
    fn zoom_in_applies_the_fixed_step() {
        let mut camera = Camera::default();
        camera.zoom(pos2(0.0, 0.0), ZoomDirection::In);
        assert!(close(camera.scale, 1.1));
    }

    #[test]
    fn two_zoom_outs_divide_twice() {
        let mut camera = Camera::default();
        camera.zoom(pos2(300.0, 200.0), ZoomDirection::Out);
        camera.zoom(pos2(300.0, 200.0), ZoomDirection::Out);
        assert!(close(camera.scale, 1.0 / 1.21));
    }

    #[test]
    fn zoom_keeps_the_anchor_point_fixed() {
        let mut camera = Camera {
            offset: vec2(37.0, -12.0),
            scale: 1.3,
        };
        let anchor = pos2(421.0, 97.0);
        let pinned = camera.screen_to_world(anchor);

        for _ in 0..5 {
            camera.zoom(anchor, ZoomDirection::In);
            assert!(close_pos(camera.screen_to_world(anchor), pinned));
        }
        for _ in 0..9 {
            camera.zoom(anchor, ZoomDirection::Out);
            assert!(close_pos(camera.screen_to_world(anchor), pinned));
        }
    }

    #[test]
    fn scale_clamps_at_both_ends() {
        let mut camera = Camera::default();
        for _ in 0..40 {
            camera.zoom(pos2(100.0, 100.0), ZoomDirection::In);
        }
        assert!(close(camera.scale, 5.0));

        for _ in 0..80 {
            camera.zoom(pos2(100.0, 100.0), ZoomDirection::Out);
        }
        assert!(close(camera.scale, 0.1));
    }
}
