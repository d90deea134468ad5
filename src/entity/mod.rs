// Everything that lives in the world and changes every frame
// ┌────────────────────┬──────────────────────────────────────────┐
// │ File               │ Role                                     │
// ├────────────────────┼──────────────────────────────────────────┤
// │ player.rs          │ the one body the user steers             │
// │ mob.rs             │ roaming enemies, grunts and the boss     │
// │ damage_number.rs   │ floating "-25" / "+100" / banner text    │
// │ manager.rs         │ owns mobs + numbers, spawn/cleanup cycle │
// └────────────────────┴──────────────────────────────────────────┘
pub mod damage_number;
pub mod manager;
pub mod mob;
pub mod player;

use std::collections::HashMap;
use web_sys::HtmlImageElement;

/// Loaded sprite images by path
/// - a path that failed to load is simply absent, owners draw a fallback box
#[derive(Default)]
pub struct SpriteBank {
    images: HashMap<String, HtmlImageElement>,
}

impl SpriteBank {
    pub fn new() -> Self {
        SpriteBank::default()
    }

    pub fn insert(&mut self, path: &str, image: HtmlImageElement) {
        self.images.insert(path.to_string(), image);
    }

    /// HtmlImageElement is a handle to the JS object, cloning does not copy pixels
    pub fn get(&self, path: &str) -> Option<HtmlImageElement> {
        self.images.get(path).cloned()
    }
}
