use crate::collision::{self, Aabb};
use crate::config::WorldConfig;
use crate::engine::{Point, Rect, Renderer, Size};
use serde::{Deserialize, Serialize};
use web_sys::HtmlImageElement;

const FALLBACK_TILE_COLORS: [&str; 2] = ["#3A7D44", "#34703D"];
const SHARD_COLOR: &str = "#B388FF";
const SHARD_GLOW_COLOR: &str = "rgba(179, 136, 255, 0.35)";
// full glow cycle in ms
const GLOW_PERIOD: f32 = 1200.0;

/// Collectible quest item, all of them together wake the boss
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Shard {
    pub id: usize,
    pub position: Point,
    pub collected: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct WorldSnapshot {
    pub tile_size: f32,
    pub width: f32,
    pub height: f32,
}

impl WorldSnapshot {
    /// Dimensions a world can be drawn with, at least one whole tile
    pub fn validate(&self) -> Result<(), String> {
        let finite = [self.tile_size, self.width, self.height]
            .iter()
            .all(|value| value.is_finite() && *value > 0.0);
        if !finite {
            return Err(format!(
                "world {}x{} with tile {} is not drawable",
                self.width, self.height, self.tile_size
            ));
        }
        if self.tile_size > self.width || self.tile_size > self.height {
            return Err(format!(
                "tile {} is larger than the {}x{} world",
                self.tile_size, self.width, self.height
            ));
        }
        Ok(())
    }
}

pub struct World {
    tile_size: f32,
    width: f32,
    height: f32,
    shard_radius: f32,
    shards: Vec<Shard>,
    glow_phase: f32,
    terrain: Option<HtmlImageElement>,
}

impl World {
    pub fn new(config: &WorldConfig, terrain: Option<HtmlImageElement>) -> Self {
        let width = config.width();
        let height = config.height();
        World {
            tile_size: config.tile_size,
            width,
            height,
            shard_radius: config.shard_radius,
            shards: layout_shards(config.shard_count, width, height),
            glow_phase: 0.0,
            terrain,
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_xywh(0.0, 0.0, self.width, self.height)
    }

    pub fn center(&self) -> Point {
        self.bounds().center()
    }

    pub fn shards(&self) -> &[Shard] {
        &self.shards
    }

    pub fn update(&mut self, delta: f32) {
        self.glow_phase = (self.glow_phase + delta) % GLOW_PERIOD;
    }

    /// Mark every shard touching `area` as collected, returning what was picked up
    pub fn collect_at(&mut self, area: &Aabb) -> Vec<Shard> {
        let center = area.center();
        // reach from the rect's center out to its corner plus the shard itself
        let diagonal = (area.right - area.left).hypot(area.bottom - area.top);
        let reach = self.shard_radius + diagonal / 2.0;
        self.shards
            .iter_mut()
            .filter(|shard| {
                !shard.collected && collision::within_radius(center, shard.position, reach)
            })
            .map(|shard| {
                shard.collected = true;
                shard.clone()
            })
            .collect()
    }

    pub fn collected_count(&self) -> usize {
        self.shards.iter().filter(|shard| shard.collected).count()
    }

    /// A world with no shards never wakes the boss
    pub fn all_collected(&self) -> bool {
        !self.shards.is_empty() && self.shards.iter().all(|shard| shard.collected)
    }

    pub fn reset_shards(&mut self) {
        self.shards.iter_mut().for_each(|shard| shard.collected = false);
    }

    pub fn mark_collected(&mut self, ids: &[usize]) {
        self.shards
            .iter_mut()
            .filter(|shard| ids.contains(&shard.id))
            .for_each(|shard| shard.collected = true);
    }

    pub fn collected_ids(&self) -> Vec<usize> {
        self.shards
            .iter()
            .filter(|shard| shard.collected)
            .map(|shard| shard.id)
            .collect()
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            tile_size: self.tile_size,
            width: self.width,
            height: self.height,
        }
    }

    /// Dimensions come from the save, shards are re-laid for the new size
    pub fn restore(&mut self, snapshot: &WorldSnapshot) {
        self.tile_size = snapshot.tile_size;
        self.width = snapshot.width;
        self.height = snapshot.height;
        self.shards = layout_shards(self.shards.len(), self.width, self.height);
    }

    pub fn draw(&self, renderer: &Renderer) {
        let cols = (self.width / self.tile_size).ceil() as u32;
        let rows = (self.height / self.tile_size).ceil() as u32;
        let tile = Size {
            width: self.tile_size,
            height: self.tile_size,
        };
        for row in 0..rows {
            for col in 0..cols {
                let destination = Rect::new(
                    Point::new(col as f32 * self.tile_size, row as f32 * self.tile_size),
                    tile,
                );
                match &self.terrain {
                    Some(image) => renderer.draw_image(image, &destination),
                    None => {
                        let color = FALLBACK_TILE_COLORS[((row + col) % 2) as usize];
                        renderer.fill_rect(&destination, color)
                    }
                }
            }
        }
    }

    pub fn draw_shards(&self, renderer: &Renderer) {
        let pulse = (self.glow_phase / GLOW_PERIOD * std::f32::consts::TAU).sin() * 0.5 + 0.5;
        for shard in self.shards.iter().filter(|shard| !shard.collected) {
            let glow = self.shard_radius * (1.4 + pulse * 0.6);
            renderer.fill_circle(shard.position, glow, SHARD_GLOW_COLOR);
            renderer.fill_circle(shard.position, self.shard_radius * 0.6, SHARD_COLOR);
        }
    }
}

/// Shards sit evenly spaced on a ring around the world center, so layouts
/// are identical between a fresh start and a restored save
fn layout_shards(count: usize, width: f32, height: f32) -> Vec<Shard> {
    let center = Point::new(width / 2.0, height / 2.0);
    let radius_x = width * 0.35;
    let radius_y = height * 0.35;
    (0..count)
        .map(|id| {
            let angle =
                std::f32::consts::TAU * id as f32 / count as f32 - std::f32::consts::FRAC_PI_2;
            Shard {
                id,
                position: Point::new(
                    center.x + radius_x * angle.cos(),
                    center.y + radius_y * angle.sin(),
                ),
                collected: false,
            }
        })
        .collect()
}
