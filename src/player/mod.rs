//! Player module - the player body, input, and its health.

mod components;
mod movement;
mod plugin;

pub use components::*;
pub use plugin::PlayerPlugin;
