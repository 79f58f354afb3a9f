//! Invariant properties of the simulation

use glam::Vec2;
use proptest::prelude::*;
use rabbit_hop::consts::{GROUND_TOP, LEVEL_WIDTH, SIM_DT};
use rabbit_hop::sim::{
    Coin, GameState, Hazard, LevelLayout, Platform, RngState, TickInput, generate_level,
    is_reachable, jump_apex, tick,
};
use rabbit_hop::{Progression, Tuning};

fn ground_level(progress: &Progression, tuning: &Tuning) -> GameState {
    let layout = LevelLayout {
        platforms: vec![Platform::ground()],
        coins: vec![Coin::new(Vec2::new(2900.0, 100.0))],
        hazards: Vec::new(),
        requested_platforms: 0,
    };
    GameState::from_layout(1, RngState::new(0, 1), layout, progress, tuning)
}

fn input_strategy() -> impl Strategy<Value = TickInput> {
    (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(left, right, jump)| TickInput {
        left,
        right,
        jump,
        idle_mode: false,
    })
}

proptest! {
    #[test]
    fn resting_rabbit_never_moves(x in 0.0f32..(LEVEL_WIDTH - 64.0), ticks in 1usize..240) {
        let tuning = Tuning::default();
        let mut progress = Progression::new(&tuning);
        let mut state = ground_level(&progress, &tuning);
        state.rabbit.pos.x = x;
        let start = state.rabbit.pos;

        for _ in 0..ticks {
            tick(&mut state, &mut progress, &TickInput::default(), SIM_DT);
            prop_assert_eq!(state.rabbit.pos, start);
            prop_assert!(state.rabbit.on_ground);
        }
    }

    #[test]
    fn gravity_accumulates_while_airborne(ticks in 1u32..100) {
        let tuning = Tuning::default();
        let mut progress = Progression::new(&tuning);
        let mut state = ground_level(&progress, &tuning);
        state.rabbit.pos.y = 100.0;
        state.rabbit.on_ground = false;

        for _ in 0..ticks {
            tick(&mut state, &mut progress, &TickInput::default(), SIM_DT);
        }
        prop_assert!(!state.rabbit.on_ground);
        prop_assert_eq!(state.rabbit.vel.y, tuning.gravity * ticks as f32);
    }

    #[test]
    fn jump_apex_matches_simulation(jump_height in 40.0f32..220.0) {
        let tuning = Tuning::default();
        let mut progress = Progression::new(&tuning);
        progress.jump_height = jump_height;
        let mut state = ground_level(&progress, &tuning);
        let rest_y = state.rabbit.pos.y;

        let jump = TickInput { jump: true, ..Default::default() };
        tick(&mut state, &mut progress, &jump, SIM_DT);
        let mut highest = state.rabbit.pos.y;
        while !state.rabbit.on_ground {
            tick(&mut state, &mut progress, &TickInput::default(), SIM_DT);
            highest = highest.min(state.rabbit.pos.y);
        }

        let apex = jump_apex(jump_height, tuning.gravity, SIM_DT);
        prop_assert!(((rest_y - highest) - apex).abs() < 0.05);
        prop_assert_eq!(state.rabbit.pos.y, rest_y);
    }

    #[test]
    fn coins_stay_collected(
        seed in any::<u64>(),
        inputs in proptest::collection::vec(input_strategy(), 1..400),
    ) {
        let tuning = Tuning::default();
        let mut progress = Progression::new(&tuning);
        let mut state = GameState::new(1, seed, &progress, &tuning);
        let mut collected = vec![false; state.coins.len()];
        let mut wallet = progress.coins;

        for input in &inputs {
            tick(&mut state, &mut progress, input, SIM_DT);
            for (was, coin) in collected.iter_mut().zip(&state.coins) {
                prop_assert!(!*was || coin.collected);
                *was = coin.collected;
            }
            let count = collected.iter().filter(|c| **c).count() as u32;
            prop_assert_eq!(state.coins_collected, count);
            prop_assert!(progress.coins >= wallet);
            wallet = progress.coins;
        }
    }

    #[test]
    fn hazard_hurts_once_per_cooldown(ticks in 1usize..170) {
        let tuning = Tuning::default();
        let mut progress = Progression::new(&tuning);
        let mut state = ground_level(&progress, &tuning);
        state.hazards.push(Hazard::new(state.rabbit.pos));
        let start = progress.health;

        for _ in 0..ticks {
            tick(&mut state, &mut progress, &TickInput::default(), SIM_DT);
        }
        prop_assert_eq!(progress.health, start - tuning.hazard_damage);
    }

    #[test]
    fn rabbit_stays_inside_level(inputs in proptest::collection::vec(input_strategy(), 1..300)) {
        let tuning = Tuning::default();
        let mut progress = Progression::new(&tuning);
        progress.rabbit_speed = 600.0;
        let mut state = ground_level(&progress, &tuning);

        for input in &inputs {
            tick(&mut state, &mut progress, input, SIM_DT);
            let body = state.rabbit.rect();
            prop_assert!(body.left() >= 0.0 && body.right() <= LEVEL_WIDTH);
            prop_assert!(body.bottom() <= GROUND_TOP);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn generated_platforms_are_reachable(
        seed in any::<u64>(),
        level in 1u32..=3,
        jump_height in 90.0f32..200.0,
    ) {
        let tuning = Tuning::default();
        let mut rng = RngState::new(seed, level).to_rng();
        let layout = generate_level(level, jump_height, &tuning, &mut rng);
        let reach = jump_apex(jump_height, tuning.gravity, SIM_DT);

        prop_assert!(layout.platforms[0].is_ground);
        prop_assert!(layout.platforms.len() as u32 - 1 <= layout.requested_platforms);
        for i in 1..layout.platforms.len() {
            let rect = layout.platforms[i].rect;
            prop_assert!(is_reachable(&rect, &layout.platforms[..i], reach, tuning.reach_tolerance));
        }
        for hazard in &layout.hazards {
            let clear = layout.coins.iter().all(|coin| {
                (coin.pos.x - hazard.pos.x).abs() >= tuning.hazard_coin_separation
                    || (coin.pos.y - hazard.pos.y).abs() >= tuning.hazard_coin_separation
            });
            prop_assert!(clear);
        }
    }
}
