//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (list order decides ties)
//! - No rendering or platform dependencies

pub mod aabb;
pub mod autopilot;
pub mod level;
pub mod physics;
pub mod state;
pub mod tick;

pub use aabb::Rect;
pub use autopilot::autopilot_input;
pub use level::{LevelLayout, generate_level, is_reachable};
pub use physics::jump_apex;
pub use state::{Coin, GameEvent, GamePhase, GameState, Hazard, Platform, Rabbit, RngState};
pub use tick::{TickInput, tick, update_camera};
