use crate::engine::{Point, Rect, Renderer, Size};
use crate::entity::mob::Mob;
use crate::world::Shard;

const WIDTH: f32 = 180.0;
const MARGIN: f32 = 10.0;
const DOT: f32 = 4.0;
const BOSS_DOT: f32 = 8.0;

/// Scaled-down world in the top-right corner of the canvas
#[derive(Debug, Clone)]
pub struct Minimap {
    frame: Rect,
    scale: f32,
}

impl Minimap {
    pub fn new(canvas: Size, world: Size) -> Self {
        let scale = if world.width > 0.0 { WIDTH / world.width } else { 0.0 };
        let frame = Rect::from_xywh(
            canvas.width - WIDTH - MARGIN,
            MARGIN,
            WIDTH,
            world.height * scale,
        );
        Minimap { frame, scale }
    }

    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// World coordinates to canvas coordinates inside the frame
    pub fn project(&self, world: Point) -> Point {
        Point {
            x: self.frame.x() + world.x * self.scale,
            y: self.frame.y() + world.y * self.scale,
        }
    }

    fn dot(&self, renderer: &Renderer, world: Point, size: f32, color: &str) {
        let at = self.project(world);
        let half = size / 2.0;
        renderer.fill_rect(&Rect::from_xywh(at.x - half, at.y - half, size, size), color);
    }

    pub fn draw(
        &self,
        renderer: &Renderer,
        view: &Rect,
        player: Point,
        mobs: &[Mob],
        shards: &[Shard],
    ) {
        renderer.fill_rect(&self.frame, "rgba(0, 0, 0, 0.5)");
        renderer.stroke_rect(&self.frame, "#FFFFFF", 1.0);

        let corner = self.project(view.position);
        let viewport = Rect::from_xywh(
            corner.x,
            corner.y,
            view.width() * self.scale,
            view.height() * self.scale,
        );
        renderer.stroke_rect(&viewport, "rgba(255, 255, 255, 0.6)", 1.0);

        for shard in shards.iter().filter(|shard| !shard.collected) {
            self.dot(renderer, shard.position, DOT, "#22D3EE");
        }
        for mob in mobs {
            if mob.is_boss() {
                self.dot(renderer, mob.center(), BOSS_DOT, "#A855F7");
            } else {
                self.dot(renderer, mob.center(), DOT, "#EF4444");
            }
        }
        self.dot(renderer, player, DOT + 1.0, "#FACC15");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn minimap() -> Minimap {
        Minimap::new(
            Size {
                width: 1000.0,
                height: 800.0,
            },
            Size {
                width: 1280.0,
                height: 960.0,
            },
        )
    }

    #[test]
    fn keeps_world_aspect_ratio() {
        let frame = minimap().frame();
        assert_relative_eq!(frame.width(), 180.0);
        assert_relative_eq!(frame.height(), 135.0);
        assert_relative_eq!(frame.right(), 990.0);
    }

    #[test]
    fn projects_corners_onto_frame() {
        let map = minimap();
        let frame = map.frame();
        assert_eq!(map.project(Point::default()), frame.position);
        let far = map.project(Point::new(1280.0, 960.0));
        assert_relative_eq!(far.x, frame.right());
        assert_relative_eq!(far.y, frame.bottom());
    }
}
