//! Core game module - states, events, and fundamental building blocks.
//!
//! This module provides the foundation that all other game systems build upon.

mod events;
pub mod fsm;
mod plugin;
mod states;
pub mod tween;

pub use events::*;
pub use plugin::CorePlugin;
pub use states::*;
