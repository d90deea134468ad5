use crate::config::CameraConfig;
use crate::engine::{Point, Rect, Renderer, Size};
use rand::Rng;

/// Follows a target rect with smoothing, clamped to the world
///
/// ┌──────────── world ─────────────────────┐
/// │   position                             │
/// │     ┌──── viewport / zoom ────┐        │
/// │     │          ●  target      │        │
/// │     └─────────────────────────┘        │
/// └────────────────────────────────────────┘
#[derive(Debug, Clone)]
pub struct Camera {
    position: Point,
    lerp: f32,
    zoom: f32,
    viewport: Size,
    bounds: Size,
    shake: Shake,
}

#[derive(Debug, Clone, Copy, Default)]
struct Shake {
    intensity: f32,
    duration: f32,
    remaining: f32,
    offset: Point,
}

impl Camera {
    pub fn new(viewport: Size, config: &CameraConfig) -> Self {
        Camera {
            position: Point::default(),
            lerp: config.lerp,
            zoom: config.zoom,
            viewport,
            bounds: Size {
                width: f32::INFINITY,
                height: f32::INFINITY,
            },
            shake: Shake::default(),
        }
    }

    pub fn set_bounds(&mut self, width: f32, height: f32) {
        self.bounds = Size { width, height };
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Visible part of the world
    pub fn view(&self) -> Rect {
        Rect::new(
            self.position,
            Size {
                width: self.viewport.width / self.zoom,
                height: self.viewport.height / self.zoom,
            },
        )
    }

    /// Snap straight onto the target, used after loading or restarting
    pub fn center_on(&mut self, target: &Rect) {
        self.position = self.target_for(target);
        self.clamp();
    }

    pub fn update(&mut self, target: &Rect, delta: f32, rng: &mut impl Rng) {
        let goal = self.target_for(target);
        self.position.x += (goal.x - self.position.x) * self.lerp;
        self.position.y += (goal.y - self.position.y) * self.lerp;
        self.clamp();
        self.update_shake(delta, rng);
    }

    fn target_for(&self, target: &Rect) -> Point {
        let center = target.center();
        Point {
            x: center.x - (self.viewport.width / 2.0) / self.zoom,
            y: center.y - (self.viewport.height / 2.0) / self.zoom,
        }
    }

    fn clamp(&mut self) {
        let max_x = (self.bounds.width - self.viewport.width / self.zoom).max(0.0);
        let max_y = (self.bounds.height - self.viewport.height / self.zoom).max(0.0);
        self.position.x = self.position.x.clamp(0.0, max_x);
        self.position.y = self.position.y.clamp(0.0, max_y);
    }

    pub fn shake(&mut self, intensity: f32, duration: f32) {
        // a weaker shake never cuts a stronger one short
        if intensity >= self.shake.intensity || self.shake.remaining <= 0.0 {
            self.shake = Shake {
                intensity,
                duration,
                remaining: duration,
                offset: Point::default(),
            };
        }
    }

    fn update_shake(&mut self, delta: f32, rng: &mut impl Rng) {
        if self.shake.remaining <= 0.0 {
            self.shake.offset = Point::default();
            self.shake.intensity = 0.0;
            return;
        }
        self.shake.remaining = (self.shake.remaining - delta).max(0.0);
        let fade = self.shake.remaining / self.shake.duration.max(f32::EPSILON);
        let strength = self.shake.intensity * fade;
        self.shake.offset = Point {
            x: rng.gen_range(-1.0..=1.0) * strength,
            y: rng.gen_range(-1.0..=1.0) * strength,
        };
    }

    /// Apply the world transform, pair with `end`
    pub fn begin(&self, renderer: &Renderer) {
        renderer.push_transform(
            self.zoom,
            self.position.offset(self.shake.offset.x, self.shake.offset.y),
        );
    }

    pub fn end(&self, renderer: &Renderer) {
        renderer.pop_transform();
    }

    /// Canvas pixels (mouse, touch) to world coordinates
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point {
            x: screen.x / self.zoom + self.position.x,
            y: screen.y / self.zoom + self.position.y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn camera() -> Camera {
        let mut camera = Camera::new(
            Size {
                width: 400.0,
                height: 300.0,
            },
            &CameraConfig { lerp: 0.5, zoom: 1.0 },
        );
        camera.set_bounds(1000.0, 1000.0);
        camera
    }

    #[test]
    fn moves_part_way_toward_target() {
        let mut camera = camera();
        let mut rng = StdRng::seed_from_u64(1);
        // centered target at (500, 500) -> goal (300, 350)
        let target = Rect::from_xywh(490.0, 490.0, 20.0, 20.0);
        camera.update(&target, 16.0, &mut rng);
        assert_relative_eq!(camera.position().x, 150.0);
        assert_relative_eq!(camera.position().y, 175.0);
    }

    #[test]
    fn clamps_to_world_edges() {
        let mut camera = camera();
        camera.center_on(&Rect::from_xywh(-100.0, -100.0, 10.0, 10.0));
        assert_eq!(camera.position(), Point::new(0.0, 0.0));
        camera.center_on(&Rect::from_xywh(5000.0, 5000.0, 10.0, 10.0));
        assert_eq!(camera.position(), Point::new(600.0, 700.0));
    }

    #[test]
    fn world_smaller_than_viewport_pins_to_origin() {
        let mut camera = camera();
        camera.set_bounds(100.0, 100.0);
        camera.center_on(&Rect::from_xywh(50.0, 50.0, 10.0, 10.0));
        assert_eq!(camera.position(), Point::new(0.0, 0.0));
    }

    #[test]
    fn screen_to_world_undoes_zoom_and_scroll() {
        let mut camera = Camera::new(
            Size {
                width: 400.0,
                height: 300.0,
            },
            &CameraConfig { lerp: 1.0, zoom: 2.0 },
        );
        camera.set_bounds(2000.0, 2000.0);
        camera.center_on(&Rect::from_xywh(600.0, 600.0, 0.0, 0.0));
        let world = camera.screen_to_world(Point::new(100.0, 50.0));
        assert_relative_eq!(world.x, 500.0 + 50.0);
        assert_relative_eq!(world.y, 525.0 + 25.0);
    }

    #[test]
    fn shake_decays_to_zero() {
        let mut camera = camera();
        let mut rng = StdRng::seed_from_u64(7);
        let target = Rect::from_xywh(0.0, 0.0, 10.0, 10.0);
        camera.shake(5.0, 100.0);
        camera.update(&target, 50.0, &mut rng);
        assert!(camera.shake.offset.x.abs() <= 2.5);
        camera.update(&target, 50.0, &mut rng);
        assert_eq!(camera.shake.offset, Point::default());
    }
}
