// Screen-space widgets, drawn after the camera transform is popped
// (the mob HealthBar is the exception, it lives in world space)
pub mod health_bar;
pub mod hud;
pub mod menu;
pub mod minimap;

pub use health_bar::{BarKind, HealthBar};
pub use hud::{Hud, HudStats};
pub use menu::{Menu, MenuAction};
pub use minimap::Minimap;
