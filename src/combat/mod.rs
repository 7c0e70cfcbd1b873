//! Combat module - health model, damage feedback.

mod feedback;
mod health;
mod plugin;
mod systems;

pub use feedback::{CameraShake, DamageFlash, ScreenShake, ShakeOffset};
pub use health::{Health, HealthEvent, HealthObserver, HealthUpdate};
pub use plugin::CombatPlugin;
pub use systems::CombatSet;
