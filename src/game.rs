use crate::browser;
use crate::camera::Camera;
use crate::characters;
use crate::config::GameConfig;
use crate::controls::{Controls, Intent};
use crate::engine::input::{KeyState, PointerEvent, PointerPhase};
#[cfg(debug_assertions)]
use crate::engine::DebugDraw;
use crate::engine::{self, Game, Point, Rect, Renderer, Size};
use crate::entity::damage_number::{self, DamageNumber};
use crate::entity::manager::{AttackOutcome, EntityManager, Kill};
use crate::entity::player::Player;
use crate::entity::SpriteBank;
use crate::score::{ScoreBoard, Stats};
use crate::session::{self, Event, Phase, SessionStateMachine};
use crate::storage::{LocalStore, SaveData, SaveSlot, SaveStore, StorageError, SAVE_VERSION};
use crate::ui::{Hud, HudStats, Menu, MenuAction, Minimap};
use crate::world::World;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use futures::future::join_all;
use futures::join;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::rc::Rc;
use web_sys::HtmlImageElement;

const TERRAIN_PATH: &str = "assets/scene/scene1.png";
const SHARD_COLOR: &str = "#22D3EE";

type Slot = SaveSlot<Box<dyn SaveStore>>;

/// How the landing page asked for the game to start
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct LaunchOptions {
    pub character_id: u32,
    /// continue from the save in localStorage, if there is a usable one
    pub load_existing: bool,
}

/// ┌──────────────────────── Frame Flow ─────────────────────────┐
/// │                                                             │
/// │  ┌─────────────┐  update   ┌─────────────┐  step            │
/// │  │  engine.rs  ├──────────►│   Brawler   ├──────────►Arena  │
/// │  │  GameLoop   │           │  (Loaded)   │                  │
/// │  └─────────────┘           └─────────────┘                  │
/// │                                                             │
/// │  Arena::step                                                │
/// │   ├─► Escape / menu clicks  -> session events               │
/// │   ├─► session Update        -> boss due / restart due       │
/// │   ├─► Controls              -> Intent (move, attack)        │
/// │   ├─► player, world, EntityManager, shards, camera          │
/// │   └─► Die / Awaken / Win checks                             │
/// │                                                             │
/// └─────────────────────────────────────────────────────────────┘
pub enum Brawler {
    /// config and sprites still loading
    Loading(LaunchOptions),
    Loaded(Arena),
}

impl Brawler {
    pub fn new(options: LaunchOptions) -> Self {
        Brawler::Loading(options)
    }

    /// A sprite that fails to load is drawn as a coloured box instead
    async fn load_sprite(path: String) -> (String, Option<HtmlImageElement>) {
        match engine::load_image(&path).await {
            Ok(image) => (path, Some(image)),
            Err(err) => {
                log!("Falling back to a plain box : {:#}", err);
                (path, None)
            }
        }
    }

    fn open_slot(config: &GameConfig) -> Option<Slot> {
        match LocalStore::new() {
            Ok(store) => {
                let store: Box<dyn SaveStore> = Box::new(store);
                Some(SaveSlot::new(store, config.storage_key.0.clone()))
            }
            Err(err) => {
                error!("Saving disabled : {:#}", err);
                None
            }
        }
    }
}

#[async_trait(?Send)]
impl Game for Brawler {
    async fn initialize(&self) -> Result<Box<dyn Game>> {
        match self {
            Brawler::Loading(options) => {
                let config = GameConfig::load().await;
                let canvas = browser::canvas()?;
                canvas.set_width(config.canvas.width);
                canvas.set_height(config.canvas.height);

                // every image loads at once, total time is the slowest one
                let mut paths: Vec<String> = characters::sprite_pool()
                    .into_iter()
                    .map(String::from)
                    .collect();
                paths.push(config.boss.sprite.clone());
                let (sprites, (_, terrain)) = join!(
                    join_all(paths.into_iter().map(Self::load_sprite)),
                    Self::load_sprite(TERRAIN_PATH.to_string()),
                );
                let mut bank = SpriteBank::new();
                for (path, image) in sprites {
                    if let Some(image) = image {
                        bank.insert(&path, image);
                    }
                }

                let slot = Self::open_slot(&config);
                let mut arena = Arena::new(
                    Rc::new(config),
                    Rc::new(bank),
                    terrain,
                    options.character_id,
                    slot,
                    StdRng::from_entropy(),
                );
                if options.load_existing {
                    if let Err(err) = arena.load() {
                        error!("Starting a new game, save could not be loaded : {}", err);
                    }
                } else {
                    arena.populate();
                }
                Ok(Box::new(Brawler::Loaded(arena)))
            }
            Brawler::Loaded(_) => Err(anyhow!("Error: Game is already initialized")),
        }
    }

    fn update(&mut self, keystate: &KeyState, pointer_events: &[PointerEvent]) {
        if let Brawler::Loaded(arena) = self {
            arena.step(engine::FRAME_SIZE, keystate, pointer_events);
        }
    }

    fn draw(&mut self, renderer: &Renderer) {
        if let Brawler::Loaded(arena) = self {
            arena.draw(renderer);
        }
    }
}

fn canvas_size(config: &GameConfig) -> Size {
    Size {
        width: config.canvas.width as f32,
        height: config.canvas.height as f32,
    }
}

/// A running session and everything in it
pub struct Arena {
    config: Rc<GameConfig>,
    sprites: Rc<SpriteBank>,
    session: SessionStateMachine,
    world: World,
    player: Player,
    entities: EntityManager,
    camera: Camera,
    controls: Controls,
    score: ScoreBoard,
    hud: Hud,
    minimap: Minimap,
    /// pause or game over menu, None while playing
    menu: Option<Menu>,
    boss_spawned: bool,
    slot: Option<Slot>,
    rng: StdRng,
}

impl Arena {
    pub fn new(
        config: Rc<GameConfig>,
        sprites: Rc<SpriteBank>,
        terrain: Option<HtmlImageElement>,
        character_id: u32,
        slot: Option<Slot>,
        rng: StdRng,
    ) -> Self {
        let canvas = canvas_size(&config);
        let world = World::new(&config.world, terrain);
        let character = characters::find(character_id);
        let player = Player::new(&config.player, character.id, sprites.get(character.sprite));

        let mut camera = Camera::new(canvas, &config.camera);
        camera.set_bounds(world.width(), world.height());
        camera.center_on(&player.rect());
        let minimap = Minimap::new(
            canvas,
            Size {
                width: world.width(),
                height: world.height(),
            },
        );

        Arena {
            entities: EntityManager::new(config.clone(), sprites.clone()),
            controls: Controls::new(&config.combat),
            hud: Hud::new(canvas),
            session: SessionStateMachine::default(),
            score: ScoreBoard::new(),
            menu: None,
            boss_spawned: false,
            world,
            player,
            camera,
            minimap,
            slot,
            rng,
            config,
            sprites,
        }
    }

    pub fn populate(&mut self) {
        self.entities
            .populate(&self.world, &self.player, &mut self.rng);
    }

    pub fn phase(&self) -> Phase {
        self.session.phase()
    }

    // ==================== Update ====================
    pub fn step(&mut self, delta: f32, keys: &KeyState, pointer_events: &[PointerEvent]) {
        if keys.was_pressed("Escape") {
            self.toggle_pause();
        }
        let mut pointer_events = pointer_events;
        if let Some(action) = self.menu_click(pointer_events) {
            self.dispatch(action);
            // the click belonged to the menu, not to the arena
            pointer_events = &[];
        }
        if !self.session.ticks() {
            return;
        }

        let before = self.session.phase();
        let before_elapsed = self.session.elapsed();
        self.session = self.session.transition(Event::Update(delta));
        match (before, self.session.phase()) {
            (Phase::Cutscene, Phase::Playing) => self.spawn_boss(),
            (Phase::Victory, Phase::Playing) => {
                self.restart();
                return;
            }
            (Phase::Cutscene, Phase::Cutscene)
                if before_elapsed < session::CUTSCENE_SECOND_LINE
                    && self.session.elapsed() >= session::CUTSCENE_SECOND_LINE =>
            {
                self.banner(-60.0, "SOMETHING AWAKENS...", damage_number::BANNER_COLOR);
            }
            _ => {}
        }
        if !self.session.simulates() {
            // banners keep floating over the frozen arena
            self.entities.update_damage_numbers(delta);
            return;
        }

        let idle = KeyState::new();
        let (keys, pointer_events) = if self.session.accepts_input() {
            (keys, pointer_events)
        } else {
            (&idle, &[][..])
        };
        let intent = self.controls.update(
            delta,
            keys,
            pointer_events,
            self.player.center(),
            &self.camera,
        );

        let attack_kills = self.apply(intent);
        self.player.update(delta, &self.world);
        self.world.update(delta);
        let mut report = self
            .entities
            .update(delta, &mut self.player, &self.world, &mut self.rng);
        if report.damage_taken > 0.0 {
            self.camera.shake(4.0, 150.0);
        }
        report.kills.extend(attack_kills);
        for kill in &report.kills {
            self.score.record_kill(kill.points);
        }
        self.collect_shards();
        self.camera
            .update(&self.player.rect(), delta, &mut self.rng);
        self.hud.update(delta, self.player.health());

        if self.session.phase() != Phase::Playing {
            return;
        }
        if self.player.is_dead() {
            self.game_over();
        } else if report.boss_defeated() {
            self.win();
        } else if self.world.all_collected() && !self.boss_spawned {
            self.awaken();
        }
    }

    fn apply(&mut self, intent: Intent) -> Vec<Kill> {
        let (dx, dy) = intent.direction;
        self.player.set_direction(dx, dy);
        let Some(target) = intent.attack else {
            return Vec::new();
        };
        match self.entities.attack(self.player.center(), target) {
            AttackOutcome::Landed { hits, kills } => {
                if hits > 0 {
                    self.camera.shake(2.0, 100.0);
                }
                kills
            }
            AttackOutcome::OutOfRange => Vec::new(),
        }
    }

    fn collect_shards(&mut self) {
        let collected = self.world.collect_at(&self.player.aabb());
        if collected.is_empty() {
            return;
        }
        let text = format!(
            "SHARD {}/{}",
            self.world.collected_count(),
            self.world.shards().len()
        );
        self.banner(-40.0, &text, SHARD_COLOR);
    }

    /// Floating text above the player's head
    fn banner(&mut self, above: f32, text: &str, color: &str) {
        let at = Point::new(self.player.center().x, self.player.position().y + above);
        self.entities
            .add_damage_number(DamageNumber::banner(at, text, color));
    }

    // ==================== Session ====================
    fn toggle_pause(&mut self) {
        match self.session.phase() {
            Phase::Playing => {
                self.session = self.session.transition(Event::Pause);
                self.menu = Some(Menu::pause(canvas_size(&self.config)));
            }
            Phase::Paused => self.resume(),
            _ => {}
        }
    }

    fn resume(&mut self) {
        self.session = self.session.transition(Event::Resume);
        self.menu = None;
        self.controls.reset();
    }

    fn menu_click(&self, pointer_events: &[PointerEvent]) -> Option<MenuAction> {
        let menu = self.menu.as_ref()?;
        pointer_events
            .iter()
            .filter(|event| event.phase == PointerPhase::Down)
            .find_map(|event| menu.hit(event.position))
    }

    fn dispatch(&mut self, action: MenuAction) {
        match action {
            MenuAction::Resume => self.resume(),
            MenuAction::Save => self.save(),
            MenuAction::MainMenu => self.exit_to_menu(),
            MenuAction::Restart => {
                self.session = self.session.transition(Event::Restart);
                self.restart();
            }
        }
    }

    fn game_over(&mut self) {
        self.session = self.session.transition(Event::Die);
        self.menu = Some(Menu::game_over(canvas_size(&self.config)));
    }

    fn awaken(&mut self) {
        self.session = self.session.transition(Event::Awaken);
        self.camera.shake(6.0, session::CUTSCENE_LENGTH);
        self.banner(-40.0, "THE GROUND TREMBLES...", damage_number::BANNER_COLOR);
    }

    fn spawn_boss(&mut self) {
        self.entities.spawn_boss(&self.world);
        self.boss_spawned = true;
    }

    fn win(&mut self) {
        self.session = self.session.transition(Event::Win);
        self.banner(-40.0, "BOSS DEFEATED!", damage_number::VICTORY_COLOR);
        self.banner(-60.0, "VICTORY!", damage_number::VICTORY_COLOR);
    }

    /// Fresh round, same character, best score kept
    pub fn restart(&mut self) {
        let start = Point::new(self.config.player.start_x, self.config.player.start_y);
        self.player.reset(start);
        self.world.reset_shards();
        self.score.reset();
        self.boss_spawned = false;
        self.menu = None;
        self.entities.clear();
        self.populate();
        self.controls.reset();
        self.hud.reset();
        self.camera.center_on(&self.player.rect());
        self.banner(-40.0, "NEW ADVENTURE BEGINS!", damage_number::POINTS_COLOR);
    }

    pub fn stats(&self) -> Stats {
        Stats {
            score: self.score.score(),
            kills: self.score.kills(),
            best: self.score.best(),
            shards: self.world.collected_count(),
            boss_spawned: self.boss_spawned,
        }
    }

    // ==================== Persistence ====================
    pub fn save_data(&self) -> SaveData {
        SaveData {
            version: SAVE_VERSION,
            character_id: self.player.character_id(),
            world: self.world.snapshot(),
            player: self.player.snapshot(),
            mobs: self.entities.snapshot(),
            kills: self.score.kills(),
            score: self.score.score(),
            shards: self.world.collected_ids(),
            boss_spawned: self.boss_spawned,
        }
    }

    pub fn save(&self) {
        let Some(slot) = &self.slot else {
            return;
        };
        if let Err(err) = slot.save(&self.save_data()) {
            error!("Could not save game : {}", err);
        }
    }

    /// Restore from the slot
    /// - an empty slot starts a fresh game
    /// - an unusable save also starts a fresh game, the error is handed back
    pub fn load(&mut self) -> Result<(), StorageError> {
        let loaded = match &self.slot {
            Some(slot) => slot.load(),
            None => Ok(None),
        };
        match loaded {
            Ok(Some(data)) => self.restore(&data),
            Ok(None) => self.populate(),
            Err(err) => {
                self.populate();
                return Err(err);
            }
        }
        Ok(())
    }

    pub fn restore(&mut self, data: &SaveData) {
        self.world.restore(&data.world);
        self.world.mark_collected(&data.shards);
        self.player.restore(&data.player);
        let character = characters::find(data.character_id);
        self.player.set_sprite(self.sprites.get(character.sprite));
        self.entities.restore(&data.mobs);
        self.score = ScoreBoard::with_totals(data.score, data.kills);
        self.boss_spawned = data.boss_spawned;

        let canvas = canvas_size(&self.config);
        let world = Size {
            width: self.world.width(),
            height: self.world.height(),
        };
        self.camera.set_bounds(world.width, world.height);
        self.camera.center_on(&self.player.rect());
        self.minimap = Minimap::new(canvas, world);
        self.hud.reset();
    }

    /// Leaving a lost game keeps the last good save instead of a dead one
    pub fn exit_to_menu(&self) {
        if !self.player.is_dead() {
            self.save();
        }
        if let Err(err) = browser::reload() {
            error!("{:#}", err);
        }
    }

    // ==================== Draw ====================
    fn hud_stats(&self) -> HudStats {
        HudStats {
            score: self.score.score(),
            kills: self.score.kills(),
            shards: self.world.collected_count(),
            total_shards: self.world.shards().len(),
            health: self.player.health(),
            max_health: self.player.max_health(),
        }
    }

    pub fn draw(&self, renderer: &Renderer) {
        let screen = Rect::new(Point::default(), canvas_size(&self.config));
        renderer.clear(&screen);
        renderer.fill_rect(&screen, &self.config.canvas.background);

        self.camera.begin(renderer);
        self.world.draw(renderer);
        self.world.draw_shards(renderer);
        self.entities.draw_mobs(renderer, &self.camera.view());
        self.player.draw(renderer);
        self.entities.draw_damage_numbers(renderer);
        if self.controls.attack_flash() {
            renderer.stroke_circle(
                self.player.center(),
                self.config.combat.range,
                "rgba(255, 255, 255, 0.6)",
                2.0,
                &[6.0, 4.0],
            );
        }
        #[cfg(debug_assertions)]
        self.draw_debug(renderer);
        self.camera.end(renderer);

        self.hud
            .draw(renderer, &self.hud_stats(), self.controls.joystick());
        self.minimap.draw(
            renderer,
            &self.camera.view(),
            self.player.center(),
            self.entities.mobs(),
            self.world.shards(),
        );
        if let Some(menu) = &self.menu {
            let stats = self.stats();
            let summary = format!(
                "Score: {}   Kills: {}   Best: {}",
                stats.score, stats.kills, stats.best
            );
            menu.draw(renderer, Some(&summary));
        }
    }

    #[cfg(debug_assertions)]
    fn draw_debug(&self, renderer: &Renderer) {
        if !self.config.debug_draw {
            return;
        }
        self.player.rect().draw_debug(renderer);
        for mob in self.entities.mobs() {
            mob.rect().draw_debug(renderer);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SpawnConfig;
    use crate::engine::input::PointerKind;
    use crate::entity::mob::Mob;
    use crate::storage::MemoryStore;

    fn quiet() -> GameConfig {
        GameConfig {
            spawn: SpawnConfig {
                target_mobs: 0,
                ..SpawnConfig::default()
            },
            ..GameConfig::default()
        }
    }

    fn arena_with(config: GameConfig, store: MemoryStore) -> Arena {
        let store: Box<dyn SaveStore> = Box::new(store);
        Arena::new(
            Rc::new(config),
            Rc::new(SpriteBank::new()),
            None,
            0,
            Some(SaveSlot::new(store, "gameState")),
            StdRng::seed_from_u64(7),
        )
    }

    fn arena() -> Arena {
        arena_with(quiet(), MemoryStore::new())
    }

    fn press(code: &str) -> KeyState {
        let mut keys = KeyState::new();
        keys.set_pressed(code);
        keys
    }

    fn click(position: Point) -> PointerEvent {
        PointerEvent {
            kind: PointerKind::Mouse,
            phase: PointerPhase::Down,
            position,
        }
    }

    fn run(arena: &mut Arena, ms: f32) {
        let keys = KeyState::new();
        let mut elapsed = 0.0;
        while elapsed < ms {
            arena.step(engine::FRAME_SIZE, &keys, &[]);
            elapsed += engine::FRAME_SIZE;
        }
    }

    fn has_banner(arena: &Arena, text: &str) -> bool {
        arena
            .entities
            .damage_numbers()
            .iter()
            .any(|number| number.text() == text)
    }

    #[test]
    fn escape_toggles_pause() {
        let mut arena = arena();
        arena.step(engine::FRAME_SIZE, &press("Escape"), &[]);
        assert_eq!(arena.phase(), Phase::Paused);
        assert!(arena.menu.is_some());

        let position = arena.player.position();
        run(&mut arena, 500.0);
        assert_eq!(arena.player.position(), position);

        arena.step(engine::FRAME_SIZE, &press("Escape"), &[]);
        assert_eq!(arena.phase(), Phase::Playing);
        assert!(arena.menu.is_none());
    }

    #[test]
    fn resume_button_closes_menu() {
        let mut arena = arena();
        arena.step(engine::FRAME_SIZE, &press("Escape"), &[]);
        let (action, rect) = Menu::pause(canvas_size(&arena.config)).layout()[0];
        assert_eq!(action, MenuAction::Resume);

        arena.step(engine::FRAME_SIZE, &KeyState::new(), &[click(rect.center())]);
        assert_eq!(arena.phase(), Phase::Playing);
        assert!(arena.menu.is_none());
    }

    #[test]
    fn save_button_writes_the_slot() {
        let mut arena = arena();
        arena.score.record_kill(100);
        arena.step(engine::FRAME_SIZE, &press("Escape"), &[]);
        let (_, rect) = Menu::pause(canvas_size(&arena.config)).layout()[1];
        arena.step(engine::FRAME_SIZE, &KeyState::new(), &[click(rect.center())]);

        let saved = arena.slot.as_ref().and_then(|slot| slot.load().ok().flatten());
        assert_eq!(saved.map(|data| data.score), Some(100));
        assert_eq!(arena.phase(), Phase::Paused);
    }

    #[test]
    fn death_opens_game_over_then_restart() {
        let mut arena = arena();
        arena.player.take_damage(1000.0);
        arena.step(engine::FRAME_SIZE, &KeyState::new(), &[]);
        assert_eq!(arena.phase(), Phase::GameOver);
        assert_eq!(arena.menu.as_ref().map(Menu::title), Some("GAME OVER"));

        // Escape does nothing on the game over screen
        arena.step(engine::FRAME_SIZE, &press("Escape"), &[]);
        assert_eq!(arena.phase(), Phase::GameOver);

        let (action, rect) = Menu::game_over(canvas_size(&arena.config)).layout()[0];
        assert_eq!(action, MenuAction::Restart);
        arena.step(engine::FRAME_SIZE, &KeyState::new(), &[click(rect.center())]);
        assert_eq!(arena.phase(), Phase::Playing);
        assert_eq!(arena.player.health(), arena.player.max_health());
        assert!(has_banner(&arena, "NEW ADVENTURE BEGINS!"));
    }

    #[test]
    fn shards_wake_the_boss_after_cutscene() {
        let mut arena = arena();
        let ids: Vec<usize> = arena.world.shards().iter().map(|shard| shard.id).collect();
        arena.world.mark_collected(&ids);

        arena.step(engine::FRAME_SIZE, &KeyState::new(), &[]);
        assert_eq!(arena.phase(), Phase::Cutscene);
        assert!(has_banner(&arena, "THE GROUND TREMBLES..."));
        assert!(!arena.entities.has_boss());

        run(&mut arena, 1100.0);
        assert!(has_banner(&arena, "SOMETHING AWAKENS..."));
        assert!(!arena.entities.has_boss());

        run(&mut arena, 1500.0);
        assert_eq!(arena.phase(), Phase::Playing);
        assert!(arena.entities.has_boss());
        assert!(arena.stats().boss_spawned);

        // no second cutscene while the shards stay collected
        run(&mut arena, 100.0);
        assert_eq!(arena.phase(), Phase::Playing);
    }

    #[test]
    fn boss_kill_wins_then_restarts() {
        let mut arena = arena();
        arena.spawn_boss();
        let boss = arena.entities.mobs()[0].center();
        arena.player.reset(Point::new(boss.x - 32.0, boss.y - 32.0));
        for _ in 0..11 {
            arena.entities.attack(boss, boss);
        }

        arena.step(engine::FRAME_SIZE, &press("Space"), &[]);
        assert_eq!(arena.phase(), Phase::Victory);
        assert_eq!(arena.stats().score, 1000);
        assert!(has_banner(&arena, "VICTORY!"));
        assert!(!arena.entities.has_boss());

        run(&mut arena, 2100.0);
        assert_eq!(arena.phase(), Phase::Playing);
        let stats = arena.stats();
        assert_eq!(stats.score, 0);
        assert_eq!(stats.best, 1000);
        assert!(!stats.boss_spawned);
        assert!(!arena.entities.has_boss());
    }

    #[test]
    fn victory_freezes_the_arena() {
        let mut arena = arena();
        arena.session = arena.session.transition(Event::Win);
        let config = arena.config.clone();
        let grunt = Mob::grunt(arena.player.position(), &config.mob, "a.png", None);
        arena.entities.restore(&[grunt.snapshot()]);
        let player = arena.player.position();
        let mob = arena.entities.mobs()[0].position();

        arena.step(engine::FRAME_SIZE, &press("KeyD"), &[]);
        run(&mut arena, 500.0);
        assert_eq!(arena.phase(), Phase::Victory);
        assert_eq!(arena.player.health(), arena.player.max_health());
        assert_eq!(arena.player.position(), player);
        assert_eq!(arena.entities.mobs()[0].position(), mob);
        assert!(arena.session.elapsed() > 500.0);
    }

    #[test]
    fn save_then_load_restores_the_session() {
        let mut first = arena_with(GameConfig::default(), MemoryStore::new());
        first.populate();
        first.score.record_kill(100);
        first.world.mark_collected(&[1]);
        first.player.take_damage(30.0);
        let data = first.save_data();

        let store = MemoryStore::new();
        store
            .write("gameState", &serde_json::to_string(&data).unwrap())
            .unwrap();
        let mut second = arena_with(GameConfig::default(), store);
        second.load().unwrap();

        assert_eq!(second.save_data(), data);
        assert_eq!(second.player.health(), 70.0);
        assert_eq!(second.entities.grunt_count(), 5);
    }

    #[test]
    fn unusable_save_starts_fresh() {
        let mut data = arena_with(GameConfig::default(), MemoryStore::new()).save_data();
        data.world.tile_size = 0.0;
        data.score = 900;
        let store = MemoryStore::new();
        store
            .write("gameState", &serde_json::to_string(&data).unwrap())
            .unwrap();
        let mut arena = arena_with(GameConfig::default(), store);

        assert!(matches!(arena.load(), Err(StorageError::Invalid(_))));
        assert_eq!(arena.world.snapshot().tile_size, 64.0);
        assert_eq!(arena.entities.grunt_count(), 5);
        assert_eq!(arena.stats().score, 0);
    }

    #[test]
    fn empty_slot_populates_a_new_game() {
        let mut arena = arena_with(GameConfig::default(), MemoryStore::new());
        arena.load().unwrap();
        assert_eq!(arena.entities.grunt_count(), 5);
        assert_eq!(arena.stats().score, 0);
    }
}
