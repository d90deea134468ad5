use crate::engine::{Point, Rect};

/// Axis aligned box in world space, top left origin
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Aabb {
    pub fn center(&self) -> Point {
        Point {
            x: (self.left + self.right) * 0.5,
            y: (self.top + self.bottom) * 0.5,
        }
    }

    /// Touching edges do not count as overlap
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.left < other.right
            && self.right > other.left
            && self.top < other.bottom
            && self.bottom > other.top
    }
}

impl From<Rect> for Aabb {
    fn from(rect: Rect) -> Self {
        Aabb {
            left: rect.x(),
            top: rect.y(),
            right: rect.right(),
            bottom: rect.bottom(),
        }
    }
}

pub fn distance(a: Point, b: Point) -> f32 {
    a.distance_to(b)
}

/// Fixed radius check between two points, inclusive
pub fn within_radius(a: Point, b: Point, radius: f32) -> bool {
    distance(a, b) <= radius
}
