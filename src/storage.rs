//! Save games as one JSON blob under a single localStorage key
use crate::browser;
use crate::entity::mob::MobSnapshot;
use crate::entity::player::PlayerSnapshot;
use crate::world::WorldSnapshot;
use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;
use thiserror::Error;

/// Bumped whenever SaveData changes shape, older saves are refused
pub const SAVE_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("save has version {found:?}, expected {expected}")]
    Version { found: Option<u64>, expected: u32 },
    #[error("save data is corrupt")]
    Corrupt(#[source] serde_json::Error),
    #[error("save data is unusable : {0}")]
    Invalid(String),
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveData {
    pub version: u32,
    pub character_id: u32,
    pub world: WorldSnapshot,
    pub player: PlayerSnapshot,
    pub mobs: Vec<MobSnapshot>,
    pub kills: u32,
    pub score: u32,
    /// ids of collected shards
    pub shards: Vec<usize>,
    pub boss_spawned: bool,
}

impl SaveData {
    /// Values a restored session can run with
    pub fn validate(&self) -> Result<(), StorageError> {
        self.world.validate().map_err(StorageError::Invalid)?;
        let player = [self.player.x, self.player.y, self.player.health];
        if !player.iter().all(|value| value.is_finite()) {
            return Err(StorageError::Invalid(format!(
                "player at ({}, {}) with health {}",
                self.player.x, self.player.y, self.player.health
            )));
        }
        Ok(())
    }
}

/// Enough of a save for the landing page, readable across versions
#[derive(Debug, Default, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SaveMeta {
    pub kills: u32,
    pub score: u32,
}

/// Raw string storage, keyed
pub trait SaveStore {
    fn read(&self, key: &str) -> anyhow::Result<Option<String>>;
    fn write(&self, key: &str, value: &str) -> anyhow::Result<()>;
    fn clear(&self, key: &str) -> anyhow::Result<()>;
}

impl<T: SaveStore + ?Sized> SaveStore for Box<T> {
    fn read(&self, key: &str) -> anyhow::Result<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> anyhow::Result<()> {
        (**self).write(key, value)
    }

    fn clear(&self, key: &str) -> anyhow::Result<()> {
        (**self).clear(key)
    }
}

/// window.localStorage
pub struct LocalStore {
    storage: web_sys::Storage,
}

impl LocalStore {
    pub fn new() -> anyhow::Result<Self> {
        Ok(LocalStore {
            storage: browser::local_storage()?,
        })
    }
}

impl SaveStore for LocalStore {
    fn read(&self, key: &str) -> anyhow::Result<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|err| anyhow!("Error reading {} from localStorage {:#?}", key, err))
    }

    fn write(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.storage
            .set_item(key, value)
            .map_err(|err| anyhow!("Error writing {} to localStorage {:#?}", key, err))
    }

    fn clear(&self, key: &str) -> anyhow::Result<()> {
        self.storage
            .remove_item(key)
            .map_err(|err| anyhow!("Error removing {} from localStorage {:#?}", key, err))
    }
}

/// In-memory store for native tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

impl SaveStore for MemoryStore {
    fn read(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear(&self, key: &str) -> anyhow::Result<()> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

/// One save under one key
pub struct SaveSlot<S> {
    store: S,
    key: String,
}

impl<S: SaveStore> SaveSlot<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        SaveSlot {
            store,
            key: key.into(),
        }
    }

    pub fn save(&self, data: &SaveData) -> Result<(), StorageError> {
        let json = serde_json::to_string(data).map_err(StorageError::Corrupt)?;
        self.store.write(&self.key, &json)?;
        Ok(())
    }

    /// `Ok(None)` when nothing was ever saved
    pub fn load(&self) -> Result<Option<SaveData>, StorageError> {
        let Some(json) = self.store.read(&self.key)? else {
            return Ok(None);
        };
        let value: serde_json::Value =
            serde_json::from_str(&json).map_err(StorageError::Corrupt)?;
        let found = value.get("version").and_then(serde_json::Value::as_u64);
        if found != Some(u64::from(SAVE_VERSION)) {
            return Err(StorageError::Version {
                found,
                expected: SAVE_VERSION,
            });
        }
        let data: SaveData = serde_json::from_value(value).map_err(StorageError::Corrupt)?;
        data.validate()?;
        Ok(Some(data))
    }

    pub fn metadata(&self) -> Result<Option<SaveMeta>, StorageError> {
        match self.store.read(&self.key)? {
            Some(json) => serde_json::from_str(&json)
                .map(Some)
                .map_err(StorageError::Corrupt),
            None => Ok(None),
        }
    }

    /// Whether there is a save that `load` would accept
    pub fn exists(&self) -> bool {
        matches!(self.load(), Ok(Some(_)))
    }

    pub fn clear(&self) -> Result<(), StorageError> {
        self.store.clear(&self.key)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::mob::{MobKind, MobStats};

    fn sample() -> SaveData {
        SaveData {
            version: SAVE_VERSION,
            character_id: 2,
            world: WorldSnapshot {
                tile_size: 64.0,
                width: 1280.0,
                height: 960.0,
            },
            player: PlayerSnapshot {
                x: 120.0,
                y: 340.0,
                health: 70.0,
                character_id: 2,
            },
            mobs: vec![MobSnapshot {
                x: 10.0,
                y: 20.0,
                width: 48.0,
                height: 48.0,
                sprite: "assets/player/bear.png".into(),
                kind: MobKind::Grunt,
                options: MobStats {
                    health: 25.0,
                    max_health: 50.0,
                    speed: 60.0,
                    damage: 10.0,
                },
            }],
            kills: 4,
            score: 400,
            shards: vec![0, 2],
            boss_spawned: false,
        }
    }

    #[test]
    fn empty_slot_loads_nothing() {
        let slot = SaveSlot::new(MemoryStore::new(), "gameState");
        assert!(matches!(slot.load(), Ok(None)));
        assert!(!slot.exists());
    }

    #[test]
    fn save_then_load() {
        let slot = SaveSlot::new(MemoryStore::new(), "gameState");
        slot.save(&sample()).unwrap();
        assert!(slot.exists());
        assert_eq!(slot.load().unwrap(), Some(sample()));
    }

    #[test]
    fn metadata_reads_totals_only() {
        let slot = SaveSlot::new(MemoryStore::new(), "gameState");
        slot.save(&sample()).unwrap();
        let meta = SaveMeta {
            kills: 4,
            score: 400,
        };
        assert_eq!(slot.metadata().unwrap(), Some(meta));
    }

    #[test]
    fn old_version_is_refused() {
        let store = MemoryStore::new();
        store.write("gameState", r#"{"version":0,"kills":1}"#).unwrap();
        let slot = SaveSlot::new(store, "gameState");
        assert!(matches!(
            slot.load(),
            Err(StorageError::Version { found: Some(0), .. })
        ));
    }

    #[test]
    fn unversioned_save_is_refused() {
        let store = MemoryStore::new();
        store.write("gameState", r#"{"kills":1,"score":100}"#).unwrap();
        let slot = SaveSlot::new(store, "gameState");
        assert!(matches!(
            slot.load(),
            Err(StorageError::Version { found: None, .. })
        ));
        assert!(!slot.exists());
        // the landing page can still show the totals
        let meta = SaveMeta {
            kills: 1,
            score: 100,
        };
        assert_eq!(slot.metadata().unwrap(), Some(meta));
    }

    #[test]
    fn garbage_is_corrupt() {
        let store = MemoryStore::new();
        store.write("gameState", "{not json").unwrap();
        let slot = SaveSlot::new(store, "gameState");
        assert!(matches!(slot.load(), Err(StorageError::Corrupt(_))));
        assert!(!slot.exists());
    }

    #[test]
    fn zero_tile_world_is_refused() {
        let mut data = sample();
        data.world.tile_size = 0.0;
        let store = MemoryStore::new();
        store
            .write("gameState", &serde_json::to_string(&data).unwrap())
            .unwrap();
        let slot = SaveSlot::new(store, "gameState");
        assert!(matches!(slot.load(), Err(StorageError::Invalid(_))));
        assert!(!slot.exists());
    }

    #[test]
    fn non_finite_player_is_refused() {
        let mut data = sample();
        data.player.health = f32::NAN;
        assert!(matches!(data.validate(), Err(StorageError::Invalid(_))));
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn clear_removes_save() {
        let slot = SaveSlot::new(MemoryStore::new(), "gameState");
        slot.save(&sample()).unwrap();
        slot.clear().unwrap();
        assert!(matches!(slot.load(), Ok(None)));
    }
}
