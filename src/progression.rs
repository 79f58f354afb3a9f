//! Run progression: coins, health, upgrades and level unlocks
//!
//! One `Progression` value lives for the whole run. The simulation writes
//! pickups and damage into it; the store and level-complete flow spend from it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tuning::Tuning;

/// Items sold in the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreItem {
    HealthPotion,
    SpeedPotion,
    JumpPotion,
    /// Unlocks the next level
    Key,
}

impl StoreItem {
    /// Store shelf order
    pub const ALL: [StoreItem; 4] = [
        StoreItem::Key,
        StoreItem::HealthPotion,
        StoreItem::SpeedPotion,
        StoreItem::JumpPotion,
    ];

    pub fn cost(&self, tuning: &Tuning) -> u32 {
        match self {
            StoreItem::HealthPotion => tuning.health_potion_cost,
            StoreItem::SpeedPotion => tuning.speed_potion_cost,
            StoreItem::JumpPotion => tuning.jump_potion_cost,
            StoreItem::Key => tuning.key_cost,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StoreItem::HealthPotion => "Health Potion",
            StoreItem::SpeedPotion => "Speed Potion",
            StoreItem::JumpPotion => "Jump Potion",
            StoreItem::Key => "Level Key",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PurchaseError {
    #[error("not enough coins: costs {cost}, have {coins}")]
    InsufficientCoins { cost: u32, coins: u32 },
    #[error("already holding a key")]
    KeyAlreadyOwned,
    #[error("no level left to unlock")]
    NoNextLevel,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdvanceError {
    #[error("a key is required to enter the next level")]
    KeyRequired,
    #[error("already on the final level")]
    FinalLevel,
}

/// Flat record handed to save/load
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub current_level: u32,
    pub coins: u32,
    pub health: u32,
    pub has_key: bool,
    pub rabbit_speed: f32,
    pub jump_height: f32,
}

/// Player progress across levels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Progression {
    /// 1-based
    pub current_level: u32,
    pub max_level: u32,
    pub coins: u32,
    pub health: u32,
    pub has_key: bool,
    pub rabbit_speed: f32,
    pub jump_height: f32,
}

impl Progression {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            current_level: 1,
            max_level: tuning.max_level.max(1),
            coins: 0,
            health: tuning.start_health.min(tuning.max_health),
            has_key: false,
            rabbit_speed: tuning.start_speed,
            jump_height: tuning.start_jump_height,
        }
    }

    /// Reset to a fresh run
    pub fn new_game(&mut self, tuning: &Tuning) {
        *self = Self::new(tuning);
    }

    pub fn add_coins(&mut self, amount: u32) {
        self.coins = self.coins.saturating_add(amount);
    }

    /// Apply one hazard's damage. Returns true if this ends the run.
    pub fn apply_hazard_hit(&mut self, tuning: &Tuning) -> bool {
        self.health = self.health.saturating_sub(tuning.hazard_damage);
        self.is_game_over(tuning)
    }

    pub fn is_game_over(&self, tuning: &Tuning) -> bool {
        self.health <= tuning.game_over_health
    }

    /// Raise health, never past the cap
    pub fn heal(&mut self, amount: u32, tuning: &Tuning) {
        self.health = self.health.saturating_add(amount).min(tuning.max_health);
    }

    pub fn is_final_level(&self) -> bool {
        self.current_level >= self.max_level
    }

    /// Buy an item. On error nothing changes.
    pub fn buy(&mut self, item: StoreItem, tuning: &Tuning) -> Result<(), PurchaseError> {
        if item == StoreItem::Key {
            if self.has_key {
                return Err(PurchaseError::KeyAlreadyOwned);
            }
            if self.is_final_level() {
                return Err(PurchaseError::NoNextLevel);
            }
        }

        let cost = item.cost(tuning);
        if self.coins < cost {
            return Err(PurchaseError::InsufficientCoins {
                cost,
                coins: self.coins,
            });
        }
        self.coins -= cost;

        match item {
            StoreItem::HealthPotion => self.heal(tuning.health_potion_heal, tuning),
            StoreItem::SpeedPotion => self.rabbit_speed += tuning.speed_potion_boost,
            StoreItem::JumpPotion => self.jump_height += tuning.jump_potion_boost,
            StoreItem::Key => self.has_key = true,
        }
        log::info!("Bought {} for {} (coins left {})", item.as_str(), cost, self.coins);
        Ok(())
    }

    /// Spend the key on the next level. Returns the new level number.
    pub fn advance_level(&mut self) -> Result<u32, AdvanceError> {
        if self.is_final_level() {
            return Err(AdvanceError::FinalLevel);
        }
        if !self.has_key {
            return Err(AdvanceError::KeyRequired);
        }
        self.current_level += 1;
        self.has_key = false;
        log::info!("Advanced to level {}", self.current_level);
        Ok(self.current_level)
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            current_level: self.current_level,
            coins: self.coins,
            health: self.health,
            has_key: self.has_key,
            rabbit_speed: self.rabbit_speed,
            jump_height: self.jump_height,
        }
    }

    /// Resume from a saved snapshot. Level and health are clamped into range.
    pub fn restore(&mut self, snapshot: &ProgressSnapshot, tuning: &Tuning) {
        self.max_level = tuning.max_level.max(1);
        self.current_level = snapshot.current_level.clamp(1, self.max_level);
        self.coins = snapshot.coins;
        self.health = snapshot.health.min(tuning.max_health);
        self.has_key = snapshot.has_key;
        self.rabbit_speed = snapshot.rabbit_speed;
        self.jump_height = snapshot.jump_height;
    }

    pub fn from_snapshot(snapshot: &ProgressSnapshot, tuning: &Tuning) -> Self {
        let mut progress = Self::new(tuning);
        progress.restore(snapshot, tuning);
        progress
    }
}
