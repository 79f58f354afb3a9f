//! Rabbit Hop - a side-scrolling platformer core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, level generation)
//! - `progression`: Coins, health, upgrades and level unlocks
//! - `session`: Frame driver that runs fixed ticks and fans out events
//! - `renderer` / `audio`: Contracts for the presentation collaborators
//! - `persistence`: Save/load of the progression snapshot
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod persistence;
pub mod progression;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use progression::{ProgressSnapshot, Progression, StoreItem};
pub use session::Session;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, the rate gravity is tuned for)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the driver will simulate in one call (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Viewport dimensions
    pub const VIEW_WIDTH: f32 = 1024.0;
    pub const VIEW_HEIGHT: f32 = 768.0;

    /// Level dimensions (levels scroll horizontally only)
    pub const LEVEL_WIDTH: f32 = 3000.0;
    pub const LEVEL_HEIGHT: f32 = VIEW_HEIGHT;
    pub const GROUND_HEIGHT: f32 = 50.0;
    /// Y of the ground's top edge
    pub const GROUND_TOP: f32 = LEVEL_HEIGHT - GROUND_HEIGHT;

    /// Platform slab thickness
    pub const PLATFORM_THICKNESS: f32 = 20.0;

    /// Entity sizes
    pub const RABBIT_WIDTH: f32 = 64.0;
    pub const RABBIT_HEIGHT: f32 = 64.0;
    pub const COIN_SIZE: f32 = 32.0;
    pub const HAZARD_SIZE: f32 = 48.0;
    /// Gap between a coin's bottom and the platform it floats over
    pub const COIN_HOVER: f32 = 5.0;

    /// Rabbit spawn point (standing on the ground)
    pub const SPAWN_X: f32 = 100.0;
    pub const SPAWN_Y: f32 = GROUND_TOP - RABBIT_HEIGHT;
}
