//! Fixed timestep simulation tick
//!
//! Core game loop that advances one level deterministically. The step order
//! below is part of the game rules; do not reorder.

use super::autopilot::autopilot_input;
use super::physics;
use super::state::{GameEvent, GamePhase, GameState, spawn_point};
use crate::consts::*;
use crate::progression::Progression;
use crate::tuning::Tuning;

/// Input intent sampled once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    /// Idle/demo mode - autopilot plays the level
    pub idle_mode: bool,
}

/// Advance the level by one fixed timestep.
///
/// Outcomes that touch the run (coins, health) are written to `progress`;
/// the returned events describe what happened this tick, in order.
pub fn tick(
    state: &mut GameState,
    progress: &mut Progression,
    input: &TickInput,
    dt: f32,
) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if !state.is_running() {
        return events;
    }

    let input = if input.idle_mode {
        autopilot_input(state)
    } else {
        *input
    };

    state.time_ticks += 1;
    let gravity = state.tuning.gravity;

    // 1. Intent
    if physics::apply_input(&mut state.rabbit, &input) {
        events.push(GameEvent::Jumped);
    }

    // 2. Integrate
    physics::integrate(&mut state.rabbit, gravity, dt);

    // 3. Landing
    physics::resolve_landing(&mut state.rabbit, &state.platforms, &state.tuning);

    // 4. Fell out of the level: respawn and charge a hazard hit
    if state.rabbit.pos.y > LEVEL_HEIGHT {
        state.rabbit.reset(spawn_point());
        events.push(GameEvent::FellOut);
        hurt(progress, &state.tuning, &mut events);
    }

    // 5. Horizontal bounds
    let max_x = LEVEL_WIDTH - state.rabbit.size.x;
    state.rabbit.pos.x = state.rabbit.pos.x.clamp(0.0, max_x);

    // 6. Entity timers
    for hazard in &mut state.hazards {
        hazard.update(dt);
    }

    let body = state.rabbit.rect();

    // 7. Coins
    for coin in state.coins.iter_mut().filter(|c| !c.collected) {
        if coin.rect().intersects(&body) {
            coin.collect();
            state.coins_collected += 1;
            progress.add_coins(1);
            events.push(GameEvent::CoinCollected { amount: 1 });
        }
    }

    // 8. Hazards
    let cooldown = state.tuning.hazard_cooldown;
    for hazard in state.hazards.iter_mut() {
        if hazard.can_damage() && hazard.rect().intersects(&body) {
            hazard.trigger(cooldown);
            hurt(progress, &state.tuning, &mut events);
        }
    }

    // 9. Camera
    update_camera(state);

    // 10. Game over, even if the last coin was taken on this tick
    if progress.is_game_over(&state.tuning) {
        log::info!("Game over on level {} (health {})", state.level, progress.health);
        state.phase = GamePhase::GameOver;
        events.push(GameEvent::GameOver);
        return events;
    }

    // 11. Level complete
    if state.coins_collected >= state.coin_quota {
        log::info!("Level {} complete after {} ticks", state.level, state.time_ticks);
        state.phase = GamePhase::LevelComplete;
        events.push(GameEvent::LevelComplete);
    }

    events
}

fn hurt(progress: &mut Progression, tuning: &Tuning, events: &mut Vec<GameEvent>) {
    progress.apply_hazard_hit(tuning);
    events.push(GameEvent::HazardHit {
        damage: tuning.hazard_damage,
    });
}

/// Ease the camera toward keeping the rabbit centred, inside the level
pub fn update_camera(state: &mut GameState) {
    let rabbit = &state.rabbit;
    let target = (rabbit.pos.x - VIEW_WIDTH / 2.0 + rabbit.size.x / 2.0)
        .clamp(0.0, (LEVEL_WIDTH - VIEW_WIDTH).max(0.0));
    state.camera_x = state.camera_x * 0.9 + target * 0.1;
}
