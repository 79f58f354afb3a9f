//! Frame driver
//!
//! The host calls `Session::advance` once per display refresh. Wall time is
//! folded into fixed `SIM_DT` ticks; events from those ticks go to audio and
//! back to the host, which handles store and level navigation.

use crate::audio::{AudioManager, AudioSink};
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::progression::{AdvanceError, ProgressSnapshot, Progression, PurchaseError, StoreItem};
use crate::renderer::{FrameView, Renderer};
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
use crate::tuning::Tuning;

/// One run of the game: progression plus the level being played
pub struct Session {
    tuning: Tuning,
    progress: Progression,
    /// `None` until the first level is started
    state: Option<GameState>,
    seed: u64,
    accumulator: f32,
    audio: AudioManager,
}

impl Session {
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            progress: Progression::new(&tuning),
            tuning,
            state: None,
            seed,
            accumulator: 0.0,
            audio: AudioManager::default(),
        }
    }

    /// Build a session from user settings, sending cues to `sink`
    pub fn from_settings(settings: &Settings, sink: Box<dyn AudioSink>) -> Self {
        let mut session = Self::new(settings.resolve_seed(), settings.tuning.clone());
        let mut audio = AudioManager::new(sink);
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_music_volume(settings.music_volume);
        audio.set_muted(settings.muted);
        session.audio = audio;
        session
    }

    pub fn progress(&self) -> &Progression {
        &self.progress
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    pub fn phase(&self) -> Option<GamePhase> {
        self.state.as_ref().map(|s| s.phase)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate and enter the progression's current level
    pub fn start_level(&mut self) {
        let level = self.progress.current_level;
        let state = GameState::new(level, self.seed, &self.progress, &self.tuning);
        log::info!(
            "Starting level {} ({} coins, {} hazards)",
            level,
            state.coin_quota,
            state.hazards.len()
        );
        self.state = Some(state);
        self.accumulator = 0.0;
        self.audio.start_music();
    }

    /// Run as many fixed ticks as `frame_dt` covers.
    ///
    /// Stops early once the level leaves `Playing`; leftover time is dropped
    /// so nothing carries over into a later resume.
    pub fn advance(&mut self, frame_dt: f32, input: &TickInput) -> Vec<GameEvent> {
        let mut events = Vec::new();
        let Some(state) = self.state.as_mut() else {
            return events;
        };
        if !state.is_running() {
            self.accumulator = 0.0;
            return events;
        }

        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            events.extend(tick(state, &mut self.progress, input, SIM_DT));
            self.accumulator -= SIM_DT;
            substeps += 1;

            if !state.is_running() {
                self.accumulator = 0.0;
                self.audio.stop_music();
                break;
            }
        }

        self.audio.play_events(&events);
        events
    }

    /// Halt ticking (store, menu, focus loss). The layout is kept.
    pub fn stop(&mut self) {
        if let Some(state) = self.state.as_mut().filter(|s| s.is_running()) {
            state.phase = GamePhase::Paused;
            self.accumulator = 0.0;
            self.audio.stop_music();
            log::debug!("Level {} paused", state.level);
        }
    }

    /// Continue a paused level with the rabbit's current upgrades.
    /// Returns false if there was nothing to resume.
    pub fn resume(&mut self) -> bool {
        let Some(state) = self
            .state
            .as_mut()
            .filter(|s| s.phase == GamePhase::Paused)
        else {
            return false;
        };
        state
            .rabbit
            .apply_stats(self.progress.rabbit_speed, self.progress.jump_height);
        state.phase = GamePhase::Playing;
        self.accumulator = 0.0;
        self.audio.start_music();
        true
    }

    pub fn buy(&mut self, item: StoreItem) -> Result<(), PurchaseError> {
        self.progress.buy(item, &self.tuning)
    }

    /// Spend the key and start the next level
    pub fn next_level(&mut self) -> Result<u32, AdvanceError> {
        let level = self.progress.advance_level()?;
        self.start_level();
        Ok(level)
    }

    /// Throw the run away and start again from level 1
    pub fn new_game(&mut self) {
        self.progress.new_game(&self.tuning);
        self.start_level();
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        self.progress.snapshot()
    }

    /// Resume a saved run at its level
    pub fn restore(&mut self, snapshot: &ProgressSnapshot) {
        self.progress.restore(snapshot, &self.tuning);
        self.start_level();
    }

    pub fn frame(&self) -> Option<FrameView> {
        self.state.as_ref().map(FrameView::from_state)
    }

    pub fn render(&self, renderer: &mut dyn Renderer) {
        if let Some(frame) = self.frame() {
            renderer.draw(&frame);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        let mut session = Session::new(7, Tuning::default());
        session.start_level();
        session
    }

    fn ticks(session: &Session) -> u64 {
        session.state().map_or(0, |s| s.time_ticks)
    }

    #[test]
    fn test_advance_before_start_is_noop() {
        let mut session = Session::new(1, Tuning::default());
        assert!(session.advance(SIM_DT, &TickInput::default()).is_empty());
        assert!(session.phase().is_none());
        assert!(session.frame().is_none());
    }

    #[test]
    fn test_one_tick_per_sim_dt() {
        let mut session = session();
        for _ in 0..10 {
            session.advance(SIM_DT, &TickInput::default());
        }
        assert_eq!(ticks(&session), 10);
    }

    #[test]
    fn test_long_frame_is_clamped() {
        let mut session = session();
        session.advance(5.0, &TickInput::default());
        let n = ticks(&session);
        assert!((5..=6).contains(&n), "ran {n} ticks");
    }

    #[test]
    fn test_no_tick_after_game_over_within_frame() {
        let mut session = session();
        let snap = ProgressSnapshot {
            health: 3,
            ..session.snapshot()
        };
        session.restore(&snap);

        let events = session.advance(0.1, &TickInput::default());
        assert_eq!(events, vec![GameEvent::GameOver]);
        assert_eq!(ticks(&session), 1);
        assert_eq!(session.phase(), Some(GamePhase::GameOver));
        assert!(session.advance(0.1, &TickInput::default()).is_empty());
        assert_eq!(ticks(&session), 1);
    }

    #[test]
    fn test_music_tracks_play_state() {
        let mut session = session();
        assert!(session.audio.is_music_playing());
        session.stop();
        assert!(!session.audio.is_music_playing());
        session.resume();
        assert!(session.audio.is_music_playing());

        let snap = ProgressSnapshot {
            health: 3,
            ..session.snapshot()
        };
        session.restore(&snap);
        session.advance(SIM_DT, &TickInput::default());
        assert!(!session.audio.is_music_playing());
    }

    #[test]
    fn test_stop_halts_ticks() {
        let mut session = session();
        session.advance(SIM_DT, &TickInput::default());
        session.stop();
        assert_eq!(session.phase(), Some(GamePhase::Paused));

        let before = ticks(&session);
        assert!(session.advance(0.05, &TickInput::default()).is_empty());
        assert_eq!(ticks(&session), before);

        assert!(session.resume());
        assert!(!session.resume());
        session.advance(SIM_DT, &TickInput::default());
        assert_eq!(ticks(&session), before + 1);
    }

    #[test]
    fn test_resume_applies_purchases() {
        let mut session = session();
        session.stop();
        session.progress.coins = 2;
        session.buy(StoreItem::SpeedPotion).unwrap();
        session.buy(StoreItem::JumpPotion).unwrap();
        let coins_before = session.state().map(|s| s.coins.clone());

        session.resume();
        let state = session.state().unwrap();
        assert_eq!(state.rabbit.speed, 60.0);
        assert_eq!(state.rabbit.jump_height, 115.0);
        assert_eq!(Some(state.coins.clone()), coins_before);
    }

    #[test]
    fn test_next_level_needs_key() {
        let mut session = session();
        assert_eq!(session.next_level(), Err(AdvanceError::KeyRequired));
        session.progress.coins = 10;
        session.buy(StoreItem::Key).unwrap();
        assert_eq!(session.next_level(), Ok(2));
        let state = session.state().unwrap();
        assert_eq!(state.level, 2);
        assert_eq!(state.time_ticks, 0);
        assert!(!session.progress().has_key);
    }

    #[test]
    fn test_restore_enters_saved_level() {
        let mut session = session();
        let snap = ProgressSnapshot {
            current_level: 3,
            coins: 4,
            health: 9,
            has_key: false,
            rabbit_speed: 70.0,
            jump_height: 90.0,
        };
        session.restore(&snap);
        assert_eq!(session.snapshot(), snap);
        let state = session.state().unwrap();
        assert_eq!(state.level, 3);
        assert_eq!(state.rabbit.speed, 70.0);
        assert_eq!(session.phase(), Some(GamePhase::Playing));
    }

    #[test]
    fn test_same_seed_same_level() {
        let a = session();
        let b = session();
        let (a, b) = (a.state().unwrap(), b.state().unwrap());
        assert_eq!(a.platforms, b.platforms);
        assert_eq!(a.coins, b.coins);
        assert_eq!(a.hazards, b.hazards);
    }

    #[test]
    fn test_new_game_resets_progress() {
        let mut session = session();
        session.progress.coins = 12;
        session.progress.health = 5;
        session.new_game();
        assert_eq!(session.progress(), &Progression::new(&Tuning::default()));
        assert_eq!(session.phase(), Some(GamePhase::Playing));
    }

    #[test]
    fn test_render_draws_current_frame() {
        struct Count(usize);
        impl Renderer for Count {
            fn draw(&mut self, frame: &FrameView) {
                self.0 += frame.sprites.len();
            }
        }
        let session = session();
        let mut count = Count(0);
        session.render(&mut count);
        assert!(count.0 > 1);
    }
}
