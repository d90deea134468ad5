use crate::characters;
use crate::collision::Aabb;
use crate::config::PlayerConfig;
use crate::engine::{Point, Rect, Renderer, Size};
use crate::ui::health_bar::{BarKind, HealthBar};
use crate::world::World;
use serde::{Deserialize, Serialize};
use web_sys::HtmlImageElement;

const FALLBACK_COLOR: &str = "#FF4444";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PlayerSnapshot {
    pub x: f32,
    pub y: f32,
    pub health: f32,
    pub character_id: u32,
}

pub struct Player {
    position: Point,
    size: Size,
    direction: Point,
    speed: f32,
    health: f32,
    max_health: f32,
    character_id: u32,
    sprite: Option<HtmlImageElement>,
    health_bar: HealthBar,
}

impl Player {
    pub fn new(config: &PlayerConfig, character_id: u32, sprite: Option<HtmlImageElement>) -> Self {
        Player {
            position: Point::new(config.start_x, config.start_y),
            size: Size {
                width: config.width,
                height: config.height,
            },
            direction: Point::default(),
            speed: config.speed,
            health: config.health,
            max_health: config.health,
            character_id: characters::find(character_id).id,
            sprite,
            health_bar: HealthBar::new(BarKind::Player),
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.position, self.size)
    }

    pub fn aabb(&self) -> Aabb {
        self.rect().into()
    }

    pub fn center(&self) -> Point {
        self.rect().center()
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn max_health(&self) -> f32 {
        self.max_health
    }

    pub fn character_id(&self) -> u32 {
        self.character_id
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    /// `dx`, `dy` are expected to be a unit (or zero) vector
    pub fn set_direction(&mut self, dx: f32, dy: f32) {
        self.direction = Point::new(dx, dy);
    }

    /// Move for `delta` ms and keep the whole body inside the world
    pub fn update(&mut self, delta: f32, world: &World) {
        let dt = delta / 1000.0;
        let x = self.position.x + self.direction.x * self.speed * dt;
        let y = self.position.y + self.direction.y * self.speed * dt;
        self.position = Point {
            x: x.clamp(0.0, (world.width() - self.size.width).max(0.0)),
            y: y.clamp(0.0, (world.height() - self.size.height).max(0.0)),
        };

        let anchor = Point::new(self.center().x, self.position.y);
        self.health_bar.update(anchor, self.health, self.max_health, delta);
    }

    /// Health never drops below zero, returns what was actually taken
    pub fn take_damage(&mut self, amount: f32) -> f32 {
        let before = self.health;
        self.health = (self.health - amount.max(0.0)).max(0.0);
        before - self.health
    }

    pub fn heal_full(&mut self) {
        self.health = self.max_health;
    }

    pub fn reset(&mut self, position: Point) {
        self.position = position;
        self.direction = Point::default();
        self.heal_full();
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            x: self.position.x,
            y: self.position.y,
            health: self.health,
            character_id: self.character_id,
        }
    }

    pub fn restore(&mut self, snapshot: &PlayerSnapshot) {
        self.position = Point::new(snapshot.x, snapshot.y);
        self.health = snapshot.health.clamp(0.0, self.max_health);
        self.character_id = characters::find(snapshot.character_id).id;
    }

    pub fn set_sprite(&mut self, sprite: Option<HtmlImageElement>) {
        self.sprite = sprite;
    }

    pub fn draw(&self, renderer: &Renderer) {
        match &self.sprite {
            Some(image) => renderer.draw_image(image, &self.rect()),
            None => renderer.fill_rect(&self.rect(), FALLBACK_COLOR),
        }
        self.health_bar.draw(renderer);
    }
}
