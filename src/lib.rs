// ==================== Modules ====================
// browser first, its log!/error! macros are used by everything below
#[macro_use]
pub mod browser;
pub mod camera;
pub mod characters;
pub mod collision;
pub mod config;
pub mod controls;
pub mod engine;
pub mod entity;
pub mod game;
pub mod score;
pub mod session;
pub mod storage;
pub mod ui;
pub mod world;

use crate::config::StorageKey;
use crate::engine::GameLoop;
use crate::game::{Brawler, LaunchOptions};
use crate::storage::{LocalStore, SaveSlot};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsValue;

fn launch(options: LaunchOptions) -> Result<(), JsValue> {
    // setup better panic messages for debugging
    console_error_panic_hook::set_once();

    // spawns a new asynchronous task in local thread, for web assembly
    // environment, using wasm_bindgen_futures
    browser::spawn_local(async move {
        if let Err(err) = GameLoop::start(Brawler::new(options)).await {
            error!("Could not start game : {:#}", err);
        }
    });

    Ok(())
}

// landing page runs before config.json is fetched, so it reads the default key
fn save_slot() -> Option<SaveSlot<LocalStore>> {
    LocalStore::new()
        .ok()
        .map(|store| SaveSlot::new(store, StorageKey::default().0))
}

// ==================== Entry Points ====================
/// Start a new game with the first character
#[wasm_bindgen]
pub fn main_js() -> Result<(), JsValue> {
    launch(LaunchOptions {
        character_id: 0,
        load_existing: false,
    })
}

/// Landing page hook
/// - `character_id` : roster id, unknown ids fall back to the first character
/// - `load_existing` : continue from the saved game when there is one
#[wasm_bindgen]
pub fn start_game(character_id: u32, load_existing: bool) -> Result<(), JsValue> {
    launch(LaunchOptions {
        character_id,
        load_existing,
    })
}

/// Whether the "Continue" button should be offered
#[wasm_bindgen]
pub fn has_save() -> bool {
    save_slot().map(|slot| slot.exists()).unwrap_or(false)
}

/// `{ kills, score }` of the saved game, or `null`
#[wasm_bindgen]
pub fn save_summary() -> Result<JsValue, JsValue> {
    let meta = match save_slot() {
        Some(slot) => slot
            .metadata()
            .map_err(|err| JsValue::from_str(&err.to_string()))?,
        None => None,
    };
    match meta {
        Some(meta) => serde_wasm_bindgen::to_value(&meta).map_err(JsValue::from),
        None => Ok(JsValue::NULL),
    }
}
