use crate::collision::Aabb;
use crate::config::{BossConfig, MobConfig};
use crate::engine::{Point, Rect, Renderer, Size};
use crate::entity::player::Player;
use crate::ui::health_bar::{BarKind, HealthBar};
use crate::world::World;
use rand::Rng;
use serde::{Deserialize, Serialize};
use web_sys::HtmlImageElement;

const FALLBACK_COLOR: &str = "#AA0000";
const BOSS_FALLBACK_COLOR: &str = "#6A0DAD";
const DIRECTIONS: [f32; 3] = [-1.0, 0.0, 1.0];

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub enum MobKind {
    Grunt,
    Boss,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MobStats {
    pub health: f32,
    pub max_health: f32,
    pub speed: f32,
    pub damage: f32,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MobSnapshot {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub sprite: String,
    pub kind: MobKind,
    pub options: MobStats,
}

pub struct Mob {
    kind: MobKind,
    position: Point,
    size: Size,
    stats: MobStats,
    direction: Point,
    change_dir_cooldown: f32,
    hit_cooldown: f32,
    /// ms between hits on the player
    hit_interval: f32,
    change_dir_range: (f32, f32),
    sprite: String,
    image: Option<HtmlImageElement>,
    health_bar: HealthBar,
}

impl Mob {
    pub fn grunt(
        position: Point,
        config: &MobConfig,
        sprite: &str,
        image: Option<HtmlImageElement>,
    ) -> Self {
        Mob {
            kind: MobKind::Grunt,
            position,
            size: Size {
                width: config.width,
                height: config.height,
            },
            stats: MobStats {
                health: config.health,
                max_health: config.health,
                speed: config.speed,
                damage: config.damage,
            },
            direction: Point::default(),
            change_dir_cooldown: 0.0,
            hit_cooldown: 0.0,
            hit_interval: config.hit_cooldown,
            change_dir_range: (config.change_dir_min, config.change_dir_max),
            sprite: sprite.to_string(),
            image,
            health_bar: HealthBar::new(BarKind::Mob),
        }
    }

    /// Boss shares the grunt timers, only its body and stats differ
    pub fn boss(
        position: Point,
        config: &BossConfig,
        timers: &MobConfig,
        image: Option<HtmlImageElement>,
    ) -> Self {
        let mut boss = Mob::grunt(position, timers, &config.sprite, image);
        boss.kind = MobKind::Boss;
        boss.size = Size {
            width: config.width,
            height: config.height,
        };
        boss.stats = MobStats {
            health: config.health,
            max_health: config.health,
            speed: config.speed,
            damage: config.damage,
        };
        boss
    }

    pub fn from_snapshot(
        snapshot: &MobSnapshot,
        timers: &MobConfig,
        image: Option<HtmlImageElement>,
    ) -> Self {
        let position = Point::new(snapshot.x, snapshot.y);
        let mut mob = Mob::grunt(position, timers, &snapshot.sprite, image);
        mob.kind = snapshot.kind;
        mob.size = Size {
            width: snapshot.width,
            height: snapshot.height,
        };
        let max_health = snapshot.options.max_health.max(snapshot.options.health);
        mob.stats = MobStats {
            health: snapshot.options.health.clamp(0.0, max_health),
            max_health,
            ..snapshot.options.clone()
        };
        mob
    }

    pub fn snapshot(&self) -> MobSnapshot {
        MobSnapshot {
            x: self.position.x,
            y: self.position.y,
            width: self.size.width,
            height: self.size.height,
            sprite: self.sprite.clone(),
            kind: self.kind,
            options: self.stats.clone(),
        }
    }

    pub fn kind(&self) -> MobKind {
        self.kind
    }

    pub fn is_boss(&self) -> bool {
        self.kind == MobKind::Boss
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
        self.stats.health
    }

    pub fn max_health(&self) -> f32 {
        self.stats.max_health
    }

    pub fn is_dead(&self) -> bool {
        self.stats.health <= 0.0
    }

    /// Wander, stay in the world, hurt the player on contact
    /// - returns damage dealt to the player this step
    pub fn update(
        &mut self,
        delta: f32,
        player: &mut Player,
        world: &World,
        rng: &mut impl Rng,
    ) -> f32 {
        self.change_dir_cooldown -= delta;
        if self.change_dir_cooldown <= 0.0 {
            self.direction = Point {
                x: DIRECTIONS[rng.gen_range(0..DIRECTIONS.len())],
                y: DIRECTIONS[rng.gen_range(0..DIRECTIONS.len())],
            };
            let (min, max) = self.change_dir_range;
            self.change_dir_cooldown = if max > min { rng.gen_range(min..max) } else { min };
        }

        let distance = self.stats.speed * delta / 1000.0;
        self.position.x += self.direction.x * distance;
        self.position.y += self.direction.y * distance;
        self.keep_inside(world);

        self.hit_cooldown -= delta;
        let mut dealt = 0.0;
        if self.hit_cooldown <= 0.0 && self.aabb().overlaps(&player.aabb()) {
            dealt = player.take_damage(self.stats.damage);
            self.hit_cooldown = self.hit_interval;
        }

        let anchor = Point::new(self.center().x, self.position.y);
        self.health_bar
            .update(anchor, self.stats.health, self.stats.max_health, delta);
        dealt
    }

    /// Clamp to the world and bounce the axis that hit the wall
    fn keep_inside(&mut self, world: &World) {
        let max_x = (world.width() - self.size.width).max(0.0);
        let max_y = (world.height() - self.size.height).max(0.0);
        if self.position.x < 0.0 || self.position.x > max_x {
            self.position.x = self.position.x.clamp(0.0, max_x);
            self.direction.x = -self.direction.x;
        }
        if self.position.y < 0.0 || self.position.y > max_y {
            self.position.y = self.position.y.clamp(0.0, max_y);
            self.direction.y = -self.direction.y;
        }
    }

    /// Health floors at zero, returns the damage actually applied
    pub fn take_damage(&mut self, amount: f32) -> f32 {
        let before = self.stats.health;
        self.stats.health = (self.stats.health - amount.max(0.0)).max(0.0);
        before - self.stats.health
    }

    pub fn draw(&self, renderer: &Renderer) {
        match &self.image {
            Some(image) => renderer.draw_image(image, &self.rect()),
            None => renderer.fill_rect(
                &self.rect(),
                if self.is_boss() {
                    BOSS_FALLBACK_COLOR
                } else {
                    FALLBACK_COLOR
                },
            ),
        }
        self.health_bar.draw(renderer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PlayerConfig, WorldConfig};
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn world() -> World {
        World::new(&WorldConfig::default(), None)
    }

    fn player_at(x: f32, y: f32) -> Player {
        let config = PlayerConfig {
            start_x: x,
            start_y: y,
            ..PlayerConfig::default()
        };
        Player::new(&config, 0, None)
    }

    #[test]
    fn hits_player_once_per_cooldown() {
        let mut rng = StdRng::seed_from_u64(3);
        let world = world();
        let mut player = player_at(500.0, 500.0);
        let config = MobConfig {
            speed: 0.0,
            ..MobConfig::default()
        };
        let mut mob = Mob::grunt(Point::new(510.0, 510.0), &config, "mob.png", None);

        assert_eq!(mob.update(16.0, &mut player, &world, &mut rng), 10.0);
        assert_eq!(mob.update(16.0, &mut player, &world, &mut rng), 0.0);
        assert_eq!(player.health(), 90.0);

        // cooldown expires after 1000ms
        assert_eq!(mob.update(990.0, &mut player, &world, &mut rng), 10.0);
        assert_eq!(player.health(), 80.0);
    }

    #[test]
    fn no_damage_without_overlap() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut player = player_at(0.0, 0.0);
        let config = MobConfig {
            speed: 0.0,
            ..MobConfig::default()
        };
        let mut mob = Mob::grunt(Point::new(600.0, 600.0), &config, "mob.png", None);
        assert_eq!(mob.update(16.0, &mut player, &world(), &mut rng), 0.0);
        assert_eq!(player.health(), 100.0);
    }

    #[test]
    fn wanders_within_world() {
        let mut rng = StdRng::seed_from_u64(11);
        let world = world();
        let mut player = player_at(0.0, 0.0);
        let config = MobConfig {
            speed: 2000.0,
            ..MobConfig::default()
        };
        let mut mob = Mob::grunt(Point::new(5.0, 5.0), &config, "mob.png", None);
        for _ in 0..500 {
            mob.update(16.0, &mut player, &world, &mut rng);
            let rect = mob.rect();
            assert!(rect.x() >= 0.0 && rect.right() <= world.width());
            assert!(rect.y() >= 0.0 && rect.bottom() <= world.height());
        }
    }

    #[test]
    fn damage_is_clamped() {
        let mut mob = Mob::grunt(Point::default(), &MobConfig::default(), "mob.png", None);
        assert_eq!(mob.take_damage(25.0), 25.0);
        assert_eq!(mob.take_damage(40.0), 25.0);
        assert_eq!(mob.health(), 0.0);
        assert!(mob.is_dead());
    }

    #[test]
    fn boss_uses_boss_stats() {
        let boss = Mob::boss(Point::default(), &BossConfig::default(), &MobConfig::default(), None);
        assert!(boss.is_boss());
        assert_eq!(boss.max_health(), 300.0);
        assert_relative_eq!(boss.rect().width(), 96.0);
    }

    #[test]
    fn snapshot_keeps_kind_and_health() {
        let position = Point::new(40.0, 50.0);
        let mut boss = Mob::boss(position, &BossConfig::default(), &MobConfig::default(), None);
        boss.take_damage(120.0);
        let restored = Mob::from_snapshot(&boss.snapshot(), &MobConfig::default(), None);
        assert!(restored.is_boss());
        assert_eq!(restored.health(), 180.0);
        assert_eq!(restored.max_health(), 300.0);
        assert_eq!(restored.position(), Point::new(40.0, 50.0));
    }
}
