//! Game state and core simulation types
//!
//! Everything one level needs to run lives here. Entities are plain values;
//! presentation reads them through `renderer::FrameView`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::aabb::Rect;
use super::level::{LevelLayout, generate_level};
use crate::consts::*;
use crate::progression::Progression;
use crate::tuning::Tuning;

/// Current phase of a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ticks advance the simulation
    Playing,
    /// Loop halted from outside (store, menu); layout is kept
    Paused,
    /// Every coin of the level was collected
    LevelComplete,
    /// Health dropped to the game-over threshold
    GameOver,
}

/// Discrete outcomes of a tick, consumed by navigation and audio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Jumped,
    CoinCollected { amount: u32 },
    HazardHit { damage: u32 },
    /// Rabbit dropped below the level and was respawned
    FellOut,
    LevelComplete,
    GameOver,
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rabbit {
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    /// Horizontal speed (px/s)
    pub speed: f32,
    /// Upward velocity applied on jump (px/s)
    pub jump_height: f32,
    pub on_ground: bool,
    pub jumping: bool,
    pub facing_right: bool,
}

impl Rabbit {
    pub fn new(pos: Vec2, speed: f32, jump_height: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size: Vec2::new(RABBIT_WIDTH, RABBIT_HEIGHT),
            speed,
            jump_height,
            on_ground: true,
            jumping: false,
            facing_right: true,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Put the rabbit back at `pos`, at rest and grounded
    pub fn reset(&mut self, pos: Vec2) {
        self.pos = pos;
        self.vel = Vec2::ZERO;
        self.on_ground = true;
        self.jumping = false;
    }

    /// Pick up the current upgrade levels
    pub fn apply_stats(&mut self, speed: f32, jump_height: f32) {
        self.speed = speed;
        self.jump_height = jump_height;
    }
}

/// A static slab the rabbit can stand on
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub rect: Rect,
    pub is_ground: bool,
}

impl Platform {
    pub fn new(x: f32, y: f32, width: f32) -> Self {
        Self {
            rect: Rect::new(x, y, width, PLATFORM_THICKNESS),
            is_ground: false,
        }
    }

    /// Full-width ground strip at the bottom of the level
    pub fn ground() -> Self {
        Self {
            rect: Rect::new(0.0, GROUND_TOP, LEVEL_WIDTH, GROUND_HEIGHT),
            is_ground: true,
        }
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.rect.top()
    }
}

/// A collectible coin; once collected it stays collected
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    pub pos: Vec2,
    pub collected: bool,
}

impl Coin {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            collected: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, COIN_SIZE, COIN_SIZE)
    }

    pub fn collect(&mut self) {
        self.collected = true;
    }
}

/// A toxic bush; hurts on contact, then rests for a cooldown
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hazard {
    pub pos: Vec2,
    pub on_cooldown: bool,
    /// Seconds until the hazard re-arms
    pub cooldown_remaining: f32,
}

impl Hazard {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            on_cooldown: false,
            cooldown_remaining: 0.0,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, HAZARD_SIZE, HAZARD_SIZE)
    }

    pub fn can_damage(&self) -> bool {
        !self.on_cooldown
    }

    /// Start the cooldown after a hit
    pub fn trigger(&mut self, duration: f32) {
        self.on_cooldown = true;
        self.cooldown_remaining = duration;
    }

    /// Count the cooldown down; re-arms when it runs out
    pub fn update(&mut self, dt: f32) {
        if self.on_cooldown {
            self.cooldown_remaining -= dt;
            if self.cooldown_remaining <= 0.0 {
                self.cooldown_remaining = 0.0;
                self.on_cooldown = false;
            }
        }
    }
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub level: u32,
}

impl RngState {
    pub fn new(seed: u64, level: u32) -> Self {
        Self { seed, level }
    }

    /// Mix run seed and level so every level of a run gets its own stream
    pub fn level_seed(&self) -> u64 {
        (self.level as u64)
            .wrapping_mul(2654435761)
            .wrapping_add(self.seed)
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.level_seed())
    }
}

/// Complete state of the level being played
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub rng_state: RngState,
    /// Level number (1-based)
    pub level: u32,
    pub phase: GamePhase,
    pub rabbit: Rabbit,
    /// Ground first, then generated platforms in placement order
    pub platforms: Vec<Platform>,
    pub coins: Vec<Coin>,
    pub hazards: Vec<Hazard>,
    /// Left edge of the viewport in level space
    pub camera_x: f32,
    /// Coins collected in this level
    pub coins_collected: u32,
    /// Coins needed to finish the level
    pub coin_quota: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub tuning: Tuning,
}

impl GameState {
    /// Generate `level` and place the rabbit at the spawn point
    pub fn new(level: u32, seed: u64, progress: &Progression, tuning: &Tuning) -> Self {
        let rng_state = RngState::new(seed, level);
        let mut rng = rng_state.to_rng();
        let layout = generate_level(level, progress.jump_height, tuning, &mut rng);
        Self::from_layout(level, rng_state, layout, progress, tuning)
    }

    /// Build a level around a prepared layout
    pub fn from_layout(
        level: u32,
        rng_state: RngState,
        layout: LevelLayout,
        progress: &Progression,
        tuning: &Tuning,
    ) -> Self {
        let coin_quota = layout.coins.len() as u32;
        Self {
            rng_state,
            level,
            phase: GamePhase::Playing,
            rabbit: Rabbit::new(spawn_point(), progress.rabbit_speed, progress.jump_height),
            platforms: layout.platforms,
            coins: layout.coins,
            hazards: layout.hazards,
            camera_x: 0.0,
            coins_collected: 0,
            coin_quota,
            time_ticks: 0,
            tuning: tuning.clone(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Playing
    }
}

/// Where the rabbit starts and respawns
pub fn spawn_point() -> Vec2 {
    Vec2::new(SPAWN_X, SPAWN_Y)
}
