use crate::characters;
use crate::collision;
use crate::config::GameConfig;
use crate::engine::{Point, Rect, Renderer};
use crate::entity::damage_number::{self, DamageNumber};
use crate::entity::mob::{Mob, MobKind, MobSnapshot};
use crate::entity::player::Player;
use crate::entity::SpriteBank;
use crate::world::World;
use rand::seq::SliceRandom;
use rand::Rng;
use std::rc::Rc;

const SPAWN_ATTEMPTS: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct Kill {
    pub kind: MobKind,
    pub points: u32,
    pub at: Point,
}

/// What happened to the entities during one simulation step
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FrameReport {
    pub damage_taken: f32,
    pub kills: Vec<Kill>,
    pub spawned: usize,
}

impl FrameReport {
    pub fn boss_defeated(&self) -> bool {
        self.kills.iter().any(|kill| kill.kind == MobKind::Boss)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttackOutcome {
    /// the click/tap was further than the attack range from the player
    OutOfRange,
    Landed { hits: usize, kills: Vec<Kill> },
}

/// Owns every mob and floating number
///
/// ┌──────────────── update(delta) ────────────────┐
/// │ 1. mobs wander + hit player   -> damage_taken │
/// │ 2. drop dead mobs             -> kills        │
/// │ 3. age damage numbers, drop expired           │
/// │ 4. respawn grunts toward target count         │
/// └───────────────────────────────────────────────┘
pub struct EntityManager {
    mobs: Vec<Mob>,
    damage_numbers: Vec<DamageNumber>,
    respawn_timer: f32,
    // config and sprites are shared with the Arena, Rc instead of a clone
    // per owner
    config: Rc<GameConfig>,
    sprites: Rc<SpriteBank>,
}

impl EntityManager {
    pub fn new(config: Rc<GameConfig>, sprites: Rc<SpriteBank>) -> Self {
        EntityManager {
            mobs: Vec::new(),
            damage_numbers: Vec::new(),
            respawn_timer: config.spawn.respawn_delay,
            config,
            sprites,
        }
    }

    pub fn mobs(&self) -> &[Mob] {
        &self.mobs
    }

    pub fn damage_numbers(&self) -> &[DamageNumber] {
        &self.damage_numbers
    }

    pub fn grunt_count(&self) -> usize {
        self.mobs.iter().filter(|mob| !mob.is_boss()).count()
    }

    pub fn has_boss(&self) -> bool {
        self.mobs.iter().any(Mob::is_boss)
    }

    pub fn add_damage_number(&mut self, number: DamageNumber) {
        self.damage_numbers.push(number);
    }

    pub fn clear(&mut self) {
        self.mobs.clear();
        self.damage_numbers.clear();
        self.respawn_timer = self.config.spawn.respawn_delay;
    }

    /// Fill the map up to the target grunt count right away
    pub fn populate(&mut self, world: &World, player: &Player, rng: &mut impl Rng) -> usize {
        let mut spawned = 0;
        while self.grunt_count() < self.config.spawn.target_mobs {
            self.spawn_grunt(world, player.center(), rng);
            spawned += 1;
        }
        spawned
    }

    pub fn update(
        &mut self,
        delta: f32,
        player: &mut Player,
        world: &World,
        rng: &mut impl Rng,
    ) -> FrameReport {
        let mut report = FrameReport::default();

        for mob in self.mobs.iter_mut() {
            report.damage_taken += mob.update(delta, player, world, rng);
        }

        report.kills = self.remove_dead();
        self.update_damage_numbers(delta);
        report.spawned = self.respawn(delta, world, player.center(), rng);
        report
    }

    /// Age floating numbers only, mobs stay where they are
    pub fn update_damage_numbers(&mut self, delta: f32) {
        self.damage_numbers.retain_mut(|number| number.update(delta));
    }

    /// Melee swing from `origin` aimed at `target`
    /// - the aim point must itself be within range, otherwise nothing happens
    /// - every mob whose center is within range of `origin` is hit
    pub fn attack(&mut self, origin: Point, target: Point) -> AttackOutcome {
        let range = self.config.combat.range;
        if !collision::within_radius(origin, target, range) {
            return AttackOutcome::OutOfRange;
        }

        let damage = self.config.combat.damage;
        let mut hits = 0;
        for mob in self.mobs.iter_mut() {
            let center = mob.center();
            if !collision::within_radius(origin, center, range) {
                continue;
            }
            let dealt = mob.take_damage(damage);
            if dealt > 0.0 {
                hits += 1;
                self.damage_numbers
                    .push(DamageNumber::damage(center.offset(0.0, -10.0), dealt));
            }
        }

        let kills = self.remove_dead();
        AttackOutcome::Landed { hits, kills }
    }

    /// One boss at a time, a second call while it lives does nothing
    pub fn spawn_boss(&mut self, world: &World) {
        if self.has_boss() {
            return;
        }
        let boss_config = &self.config.boss;
        let center = world.center();
        let position = Point::new(
            center.x - boss_config.width / 2.0,
            center.y - boss_config.height / 2.0,
        );
        let image = self.sprites.get(&boss_config.sprite);
        let boss = Mob::boss(position, boss_config, &self.config.mob, image);
        self.damage_numbers.push(DamageNumber::banner(
            Point::new(center.x, position.y - 40.0),
            "BOSS SPAWNED!",
            damage_number::BANNER_COLOR,
        ));
        self.mobs.push(boss);
    }

    pub fn snapshot(&self) -> Vec<MobSnapshot> {
        self.mobs.iter().map(Mob::snapshot).collect()
    }

    /// Replace all mobs with saved ones, dead entries are skipped
    pub fn restore(&mut self, snapshots: &[MobSnapshot]) {
        self.mobs = snapshots
            .iter()
            .filter(|snapshot| snapshot.options.health > 0.0)
            .map(|snapshot| {
                let image = self.sprites.get(&snapshot.sprite);
                Mob::from_snapshot(snapshot, &self.config.mob, image)
            })
            .collect();
        self.damage_numbers.clear();
        self.respawn_timer = self.config.spawn.respawn_delay;
    }

    /// Only mobs inside `view` are drawn, the minimap covers the rest
    pub fn draw_mobs(&self, renderer: &Renderer, view: &Rect) {
        self.mobs
            .iter()
            .filter(|mob| mob.rect().intersects(view))
            .for_each(|mob| mob.draw(renderer));
    }

    pub fn draw_damage_numbers(&self, renderer: &Renderer) {
        self.damage_numbers
            .iter()
            .for_each(|number| number.draw(renderer));
    }

    fn remove_dead(&mut self) -> Vec<Kill> {
        let score = &self.config.score;
        let mut kills = Vec::new();
        self.mobs.retain(|mob| {
            if !mob.is_dead() {
                return true;
            }
            let points = match mob.kind() {
                MobKind::Grunt => score.per_kill,
                MobKind::Boss => score.per_boss,
            };
            kills.push(Kill {
                kind: mob.kind(),
                points,
                at: Point::new(mob.center().x, mob.position().y - 10.0),
            });
            false
        });
        for kill in &kills {
            self.damage_numbers
                .push(DamageNumber::points(kill.at, kill.points));
        }
        kills
    }

    fn respawn(
        &mut self,
        delta: f32,
        world: &World,
        player_center: Point,
        rng: &mut impl Rng,
    ) -> usize {
        if self.grunt_count() >= self.config.spawn.target_mobs {
            self.respawn_timer = self.config.spawn.respawn_delay;
            return 0;
        }
        self.respawn_timer -= delta;
        if self.respawn_timer > 0.0 {
            return 0;
        }
        self.spawn_grunt(world, player_center, rng);
        self.respawn_timer = self.config.spawn.respawn_delay;
        1
    }

    fn spawn_grunt(&mut self, world: &World, player_center: Point, rng: &mut impl Rng) {
        let position = self.spawn_point(world, player_center, rng);
        let pool = characters::sprite_pool();
        let sprite = pool.choose(rng).copied().unwrap_or_default();
        let image = self.sprites.get(sprite);
        self.mobs
            .push(Mob::grunt(position, &self.config.mob, sprite, image));
    }

    /// Random top-left corner away from the edges and, if a few tries allow,
    /// away from the player
    fn spawn_point(&self, world: &World, player_center: Point, rng: &mut impl Rng) -> Point {
        let spawn = &self.config.spawn;
        let mob = &self.config.mob;
        let max_x = (world.width() - spawn.edge_margin - mob.width).max(spawn.edge_margin);
        let max_y = (world.height() - spawn.edge_margin - mob.height).max(spawn.edge_margin);

        let mut candidate = Point::new(spawn.edge_margin, spawn.edge_margin);
        for _ in 0..SPAWN_ATTEMPTS {
            candidate = Point::new(
                rng.gen_range(spawn.edge_margin..=max_x),
                rng.gen_range(spawn.edge_margin..=max_y),
            );
            let center = candidate.offset(mob.width / 2.0, mob.height / 2.0);
            if center.distance_to(player_center) >= spawn.min_player_distance {
                break;
            }
        }
        candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MobConfig, PlayerConfig};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn setup(config: GameConfig) -> (EntityManager, World, Player, StdRng) {
        let config = Rc::new(config);
        let manager = EntityManager::new(config.clone(), Rc::new(SpriteBank::new()));
        let world = World::new(&config.world, None);
        let player = Player::new(&config.player, 0, None);
        (manager, world, player, StdRng::seed_from_u64(42))
    }

    fn still_mobs() -> GameConfig {
        GameConfig {
            mob: MobConfig {
                speed: 0.0,
                ..MobConfig::default()
            },
            ..GameConfig::default()
        }
    }

    #[test]
    fn populate_reaches_target_away_from_player() {
        let (mut manager, world, player, mut rng) = setup(GameConfig::default());
        assert_eq!(manager.populate(&world, &player, &mut rng), 5);
        assert_eq!(manager.grunt_count(), 5);
        for mob in manager.mobs() {
            let rect = mob.rect();
            assert!(rect.x() >= 50.0 && rect.right() <= world.width() - 50.0);
            assert!(rect.y() >= 50.0 && rect.bottom() <= world.height() - 50.0);
        }
        // already full
        assert_eq!(manager.populate(&world, &player, &mut rng), 0);
    }

    #[test]
    fn attack_out_of_range_does_nothing() {
        let (mut manager, world, player, mut rng) = setup(still_mobs());
        manager.populate(&world, &player, &mut rng);
        let origin = player.center();
        let outcome = manager.attack(origin, origin.offset(150.0, 0.0));
        assert_eq!(outcome, AttackOutcome::OutOfRange);
        assert!(manager.damage_numbers().is_empty());
    }

    #[test]
    fn attack_hits_only_mobs_in_range() {
        let (mut manager, _world, player, _rng) = setup(still_mobs());
        let origin = player.center();
        let config = MobConfig::default();
        // centers 50 and 300 px from the player center
        manager.mobs.push(Mob::grunt(origin.offset(26.0, -24.0), &config, "a.png", None));
        manager.mobs.push(Mob::grunt(origin.offset(276.0, -24.0), &config, "b.png", None));

        let outcome = manager.attack(origin, origin);
        assert_eq!(outcome, AttackOutcome::Landed { hits: 1, kills: vec![] });
        assert_eq!(manager.mobs()[0].health(), 25.0);
        assert_eq!(manager.mobs()[1].health(), 50.0);
        assert_eq!(manager.damage_numbers().len(), 1);
        assert_eq!(manager.damage_numbers()[0].text(), "-25");
    }

    #[test]
    fn second_hit_kills_and_scores() {
        let (mut manager, _world, player, _rng) = setup(still_mobs());
        let origin = player.center();
        manager
            .mobs
            .push(Mob::grunt(origin.offset(-24.0, -24.0), &MobConfig::default(), "a.png", None));

        manager.attack(origin, origin);
        match manager.attack(origin, origin) {
            AttackOutcome::Landed { hits, kills } => {
                assert_eq!(hits, 1);
                assert_eq!(kills.len(), 1);
                assert_eq!(kills[0].points, 100);
                assert_eq!(kills[0].kind, MobKind::Grunt);
            }
            other => panic!("expected a landed attack, got {:?}", other),
        }
        assert!(manager.mobs().is_empty());
        assert!(manager.damage_numbers().iter().any(|n| n.text() == "+100"));
    }

    #[test]
    fn respawn_waits_for_delay() {
        let (mut manager, world, mut player, mut rng) = setup(still_mobs());
        manager.populate(&world, &player, &mut rng);
        manager.mobs.pop();
        assert_eq!(manager.grunt_count(), 4);

        let report = manager.update(1000.0, &mut player, &world, &mut rng);
        assert_eq!(report.spawned, 0);
        let report = manager.update(1000.0, &mut player, &world, &mut rng);
        assert_eq!(report.spawned, 1);
        assert_eq!(manager.grunt_count(), 5);
    }

    #[test]
    fn boss_does_not_count_toward_target() {
        let (mut manager, world, player, mut rng) = setup(still_mobs());
        manager.populate(&world, &player, &mut rng);
        manager.spawn_boss(&world);
        manager.spawn_boss(&world);
        assert!(manager.has_boss());
        assert_eq!(manager.grunt_count(), 5);
        assert_eq!(manager.mobs().len(), 6);
        assert!(manager
            .damage_numbers()
            .iter()
            .any(|n| n.text() == "BOSS SPAWNED!"));
    }

    #[test]
    fn boss_kill_is_reported() {
        let (mut manager, world, _player, _rng) = setup(still_mobs());
        manager.spawn_boss(&world);
        let boss_center = manager.mobs()[0].center();
        for _ in 0..11 {
            manager.attack(boss_center, boss_center);
        }
        assert!(manager.has_boss());
        match manager.attack(boss_center, boss_center) {
            AttackOutcome::Landed { kills, .. } => {
                assert_eq!(kills.len(), 1);
                assert_eq!(kills[0].kind, MobKind::Boss);
                assert_eq!(kills[0].points, 1000);
            }
            other => panic!("expected a landed attack, got {:?}", other),
        }
        assert!(!manager.has_boss());
    }

    #[test]
    fn update_reports_damage_taken() {
        let config = GameConfig {
            player: PlayerConfig {
                start_x: 500.0,
                start_y: 500.0,
                ..PlayerConfig::default()
            },
            ..still_mobs()
        };
        let (mut manager, world, mut player, mut rng) = setup(config);
        manager
            .mobs
            .push(Mob::grunt(Point::new(510.0, 510.0), &MobConfig::default(), "a.png", None));
        let report = manager.update(16.0, &mut player, &world, &mut rng);
        assert!(report.damage_taken > 0.0);
        assert_eq!(player.health(), 100.0 - report.damage_taken);
    }

    #[test]
    fn restore_skips_dead_snapshots() {
        let (mut manager, world, player, mut rng) = setup(still_mobs());
        manager.populate(&world, &player, &mut rng);
        let mut snapshots = manager.snapshot();
        snapshots[0].options.health = 0.0;
        manager.restore(&snapshots);
        assert_eq!(manager.mobs().len(), 4);
    }
}
