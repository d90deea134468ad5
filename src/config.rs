use crate::browser;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

/// Tunables for a session
/// - every field has a default, so `config.json` only needs the overrides
/// - loaded once in `Brawler::initialize`, then shared read-only
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct GameConfig {
    pub canvas: CanvasConfig,
    pub world: WorldConfig,
    pub player: PlayerConfig,
    pub mob: MobConfig,
    pub boss: BossConfig,
    pub combat: CombatConfig,
    pub spawn: SpawnConfig,
    pub score: ScoreConfig,
    pub camera: CameraConfig,
    pub storage_key: StorageKey,
    pub debug_draw: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
    pub background: String,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        CanvasConfig {
            width: 1000,
            height: 800,
            background: "#1C7ED6".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct WorldConfig {
    pub tile_size: f32,
    pub cols: u32,
    pub rows: u32,
    pub shard_count: usize,
    pub shard_radius: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig {
            tile_size: 64.0,
            cols: 20,
            rows: 15,
            shard_count: 3,
            shard_radius: 16.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub start_x: f32,
    pub start_y: f32,
    pub width: f32,
    pub height: f32,
    /// pixels per second
    pub speed: f32,
    pub health: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        PlayerConfig {
            start_x: 100.0,
            start_y: 100.0,
            width: 64.0,
            height: 64.0,
            speed: 200.0,
            health: 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MobConfig {
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub health: f32,
    pub damage: f32,
    /// ms between two hits on the player
    pub hit_cooldown: f32,
    pub change_dir_min: f32,
    pub change_dir_max: f32,
}

impl Default for MobConfig {
    fn default() -> Self {
        MobConfig {
            width: 48.0,
            height: 48.0,
            speed: 60.0,
            health: 50.0,
            damage: 10.0,
            hit_cooldown: 1000.0,
            change_dir_min: 1000.0,
            change_dir_max: 3000.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct BossConfig {
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub health: f32,
    pub damage: f32,
    pub sprite: String,
}

impl Default for BossConfig {
    fn default() -> Self {
        BossConfig {
            width: 96.0,
            height: 96.0,
            speed: 80.0,
            health: 300.0,
            damage: 25.0,
            sprite: "assets/mobs/boss.png".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CombatConfig {
    pub range: f32,
    pub damage: f32,
    pub cooldown: f32,
}

impl Default for CombatConfig {
    fn default() -> Self {
        CombatConfig {
            range: 100.0,
            damage: 25.0,
            cooldown: 200.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// grunts kept alive on the map, the boss is not counted
    pub target_mobs: usize,
    pub respawn_delay: f32,
    pub min_player_distance: f32,
    pub edge_margin: f32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        SpawnConfig {
            target_mobs: 5,
            respawn_delay: 2000.0,
            min_player_distance: 200.0,
            edge_margin: 50.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ScoreConfig {
    pub per_kill: u32,
    pub per_boss: u32,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        ScoreConfig {
            per_kill: 100,
            per_boss: 1000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CameraConfig {
    pub lerp: f32,
    pub zoom: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        CameraConfig { lerp: 0.1, zoom: 1.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct StorageKey(pub String);

impl Default for StorageKey {
    fn default() -> Self {
        StorageKey("gameState".to_string())
    }
}

impl GameConfig {
    const CONFIG_PATH: &'static str = "config.json";

    /// Fetch `config.json`, falling back to the built-in defaults when it is
    /// missing or does not validate
    pub async fn load() -> GameConfig {
        match Self::fetch().await {
            Ok(config) => config,
            Err(err) => {
                log!("Using default config : {:#}", err);
                GameConfig::default()
            }
        }
    }

    async fn fetch() -> Result<GameConfig> {
        let config = browser::fetch_json::<GameConfig>(Self::CONFIG_PATH)
            .await
            .with_context(|| format!("Failed to load config from : {}", Self::CONFIG_PATH))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("world.tile_size", self.world.tile_size),
            ("world.shard_radius", self.world.shard_radius),
            ("player.width", self.player.width),
            ("player.height", self.player.height),
            ("player.speed", self.player.speed),
            ("player.health", self.player.health),
            ("mob.width", self.mob.width),
            ("mob.height", self.mob.height),
            ("mob.speed", self.mob.speed),
            ("mob.health", self.mob.health),
            ("boss.width", self.boss.width),
            ("boss.height", self.boss.height),
            ("boss.speed", self.boss.speed),
            ("boss.health", self.boss.health),
            ("combat.range", self.combat.range),
            ("camera.zoom", self.camera.zoom),
        ];
        // NaN counts as invalid
        if let Some((name, value)) = positive
            .iter()
            .find(|(_, value)| !value.is_finite() || *value <= 0.0)
        {
            return Err(anyhow!("{} must be positive, got {}", name, value));
        }
        let timers = [
            ("mob.hit_cooldown", self.mob.hit_cooldown),
            ("mob.change_dir_min", self.mob.change_dir_min),
            ("combat.cooldown", self.combat.cooldown),
            ("spawn.respawn_delay", self.spawn.respawn_delay),
        ];
        if let Some((name, value)) = timers
            .iter()
            .find(|(_, value)| !value.is_finite() || *value < 0.0)
        {
            return Err(anyhow!("{} must not be negative, got {}", name, value));
        }
        if self.world.cols == 0 || self.world.rows == 0 {
            return Err(anyhow!("world must have at least one tile"));
        }
        if self.mob.change_dir_min > self.mob.change_dir_max {
            return Err(anyhow!(
                "mob.change_dir_min ({}) exceeds mob.change_dir_max ({})",
                self.mob.change_dir_min,
                self.mob.change_dir_max
            ));
        }
        if !(0.0..=1.0).contains(&self.camera.lerp) {
            return Err(anyhow!(
                "camera.lerp must be within 0..=1, got {}",
                self.camera.lerp
            ));
        }
        Ok(())
    }
}

impl WorldConfig {
    pub fn width(&self) -> f32 {
        self.cols as f32 * self.tile_size
    }

    pub fn height(&self) -> f32 {
        self.rows as f32 * self.tile_size
    }
}
