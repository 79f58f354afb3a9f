//! Idle/demo mode - a simple bot that plays the level
//!
//! Walks toward the nearest uncollected coin and hops whenever that coin is
//! above the rabbit. It does not path-find and it does not dodge bushes.

use super::state::GameState;
use super::tick::TickInput;

/// Horizontal dead zone so the bot does not jitter over its target
const ARRIVE_DISTANCE: f32 = 4.0;
/// A coin this far above the rabbit's feet is worth jumping for
const JUMP_TRIGGER: f32 = 10.0;

pub fn autopilot_input(state: &GameState) -> TickInput {
    let rabbit = &state.rabbit;
    let body = rabbit.rect();
    let center = body.center();

    let target = state
        .coins
        .iter()
        .filter(|c| !c.collected)
        .map(|c| c.rect().center())
        .min_by(|a, b| {
            a.distance_squared(center)
                .partial_cmp(&b.distance_squared(center))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    let Some(target) = target else {
        return TickInput::default();
    };

    let dx = target.x - center.x;
    TickInput {
        left: dx < -ARRIVE_DISTANCE,
        right: dx > ARRIVE_DISTANCE,
        jump: rabbit.on_ground && target.y < body.top() - JUMP_TRIGGER,
        idle_mode: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progression::Progression;
    use crate::sim::level::LevelLayout;
    use crate::sim::state::{Coin, Platform, RngState};
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn state_with_coins(coins: Vec<Coin>) -> GameState {
        let tuning = Tuning::default();
        let layout = LevelLayout {
            platforms: vec![Platform::ground()],
            coins,
            hazards: Vec::new(),
            requested_platforms: 0,
        };
        GameState::from_layout(1, RngState::new(0, 1), layout, &Progression::new(&tuning), &tuning)
    }

    #[test]
    fn test_walks_toward_nearest_coin() {
        let state = state_with_coins(vec![
            Coin::new(Vec2::new(2000.0, 680.0)),
            Coin::new(Vec2::new(400.0, 680.0)),
        ]);
        let input = autopilot_input(&state);
        assert!(input.right);
        assert!(!input.left);
        assert!(!input.jump);
    }

    #[test]
    fn test_jumps_for_high_coin() {
        let state = state_with_coins(vec![Coin::new(Vec2::new(110.0, 400.0))]);
        let input = autopilot_input(&state);
        assert!(input.jump);
    }

    #[test]
    fn test_idles_without_coins() {
        let mut coin = Coin::new(Vec2::new(500.0, 680.0));
        coin.collect();
        let state = state_with_coins(vec![coin]);
        assert_eq!(autopilot_input(&state), TickInput::default());
    }
}
