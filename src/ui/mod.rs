//! UI module - health bars, HUD and menus.

pub mod health_bar;
mod hud;
mod menus;
mod plugin;

pub use health_bar::{HealthBar, HealthBarConfig};
pub use plugin::UiPlugin;
