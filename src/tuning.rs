//! Data-driven game balance
//!
//! Every gameplay number that a designer might want to tweak lives here.
//! Missing fields in a tuning file fall back to the defaults below.

use serde::{Deserialize, Serialize};

/// Balance table consumed by the simulation, the level generator and the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Physics ===
    /// Velocity added to a falling rabbit every tick (px/s per tick)
    pub gravity: f32,
    /// How far past a platform top the rabbit's feet may sink and still land
    pub landing_tolerance: f32,
    /// Fraction of the rabbit's width trimmed on each side for the landing overlap test
    pub landing_inset: f32,

    // === Damage ===
    pub hazard_damage: u32,
    /// Seconds a hazard stays harmless after hitting the rabbit
    pub hazard_cooldown: f32,
    /// Health at or below which the run ends
    pub game_over_health: u32,

    // === Progression ===
    pub start_health: u32,
    /// Healing never raises health above this
    pub max_health: u32,
    pub start_speed: f32,
    pub start_jump_height: f32,
    pub max_level: u32,

    // === Store ===
    pub health_potion_cost: u32,
    pub health_potion_heal: u32,
    pub speed_potion_cost: u32,
    pub speed_potion_boost: f32,
    pub jump_potion_cost: u32,
    pub jump_potion_boost: f32,
    pub key_cost: u32,

    // === Level generation ===
    pub base_platforms: u32,
    pub platforms_per_level: u32,
    pub vertical_sections: u32,
    /// Sampling attempts per platform slot before the slot is dropped
    pub platform_attempts: u32,
    /// Clearance kept around every placed platform
    pub platform_buffer: f32,
    /// Horizontal slack when looking for a supporting platform below
    pub reach_tolerance: f32,
    pub platform_min_width: f32,
    pub platform_max_width: f32,
    /// Headroom kept free at the top of the level
    pub top_margin: f32,
    /// Space kept free above the ground so the rabbit can walk under platforms
    pub ground_clearance: f32,
    pub coins_per_level: u32,
    pub hazards_per_level: u32,
    /// Hazards closer than this to a coin (on both axes) are resampled
    pub hazard_coin_separation: f32,
    pub hazard_attempts: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.5,
            landing_tolerance: 15.0,
            landing_inset: 0.3,

            hazard_damage: 2,
            hazard_cooldown: 3.0,
            game_over_health: 3,

            start_health: 15,
            max_health: 15,
            start_speed: 50.0,
            start_jump_height: 90.0,
            max_level: 3,

            health_potion_cost: 2,
            health_potion_heal: 5,
            speed_potion_cost: 1,
            speed_potion_boost: 10.0,
            jump_potion_cost: 1,
            jump_potion_boost: 25.0,
            key_cost: 10,

            base_platforms: 15,
            platforms_per_level: 5,
            vertical_sections: 5,
            platform_attempts: 20,
            platform_buffer: 10.0,
            reach_tolerance: 50.0,
            platform_min_width: 100.0,
            platform_max_width: 250.0,
            top_margin: 80.0,
            ground_clearance: 80.0,
            coins_per_level: 12,
            hazards_per_level: 8,
            hazard_coin_separation: 48.0,
            hazard_attempts: 20,
        }
    }
}

impl Tuning {
    /// Number of platforms requested for a level (excluding the ground)
    pub fn platforms_for_level(&self, level: u32) -> u32 {
        self.base_platforms + level * self.platforms_per_level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_count_scales_with_level() {
        let tuning = Tuning::default();
        assert_eq!(tuning.platforms_for_level(1), 20);
        assert_eq!(tuning.platforms_for_level(3), 30);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning: Tuning = serde_json::from_str(r#"{ "gravity": 0.8, "key_cost": 4 }"#).unwrap();
        assert_eq!(tuning.gravity, 0.8);
        assert_eq!(tuning.key_cost, 4);
        assert_eq!(tuning.coins_per_level, Tuning::default().coins_per_level);
    }
}
