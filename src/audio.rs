//! Audio cues
//!
//! The core never plays sound itself. It names a cue per gameplay event and
//! hands it to whatever `AudioSink` the host installed.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioCue {
    /// Rabbit left the ground
    Jump,
    /// Coin picked up
    CoinCollect,
    /// Hazard or fall damage
    Hurt,
    GameOver,
    LevelComplete,
}

impl AudioCue {
    /// Stable name used to look up the sound asset
    pub fn as_str(&self) -> &'static str {
        match self {
            AudioCue::Jump => "jump",
            AudioCue::CoinCollect => "coin_collect",
            AudioCue::Hurt => "hurt",
            AudioCue::GameOver => "game_over",
            AudioCue::LevelComplete => "level_complete",
        }
    }

    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Jumped => Some(AudioCue::Jump),
            GameEvent::CoinCollected { .. } => Some(AudioCue::CoinCollect),
            GameEvent::HazardHit { .. } => Some(AudioCue::Hurt),
            GameEvent::GameOver => Some(AudioCue::GameOver),
            GameEvent::LevelComplete => Some(AudioCue::LevelComplete),
            // The hurt cue that follows covers the fall
            GameEvent::FellOut => None,
        }
    }
}

/// Receives cues; must not fail back into the simulation
pub trait AudioSink {
    fn play(&mut self, cue: AudioCue, volume: f32);

    /// Start (`Some(volume)`) or stop (`None`) the looping background track
    fn music(&mut self, _volume: Option<f32>) {}
}

/// Sink that drops every cue
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _cue: AudioCue, _volume: f32) {}
}

/// Sink that writes cues to the log (headless runs)
#[derive(Debug, Default)]
pub struct LogAudio;

impl AudioSink for LogAudio {
    fn play(&mut self, cue: AudioCue, volume: f32) {
        log::debug!("cue {} at volume {:.2}", cue.as_str(), volume);
    }

    fn music(&mut self, volume: Option<f32>) {
        match volume {
            Some(v) => log::debug!("music on at volume {:.2}", v),
            None => log::debug!("music off"),
        }
    }
}

/// Volume and mute state in front of a sink
pub struct AudioManager {
    sink: Box<dyn AudioSink>,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    /// Music requested by the game, whether or not it is audible
    music_wanted: bool,
    /// Volume last sent to the sink, `None` while silent
    music_sent: Option<f32>,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(Box::new(NullAudio))
    }
}

impl AudioManager {
    pub fn new(sink: Box<dyn AudioSink>) -> Self {
        Self {
            sink,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
            music_wanted: false,
            music_sent: None,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
        self.sync_music();
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
        self.sync_music();
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        self.sync_music();
    }

    /// Flip mute, returning whether sound is now on
    pub fn toggle_sound(&mut self) -> bool {
        self.set_muted(!self.muted);
        !self.muted
    }

    pub fn start_music(&mut self) {
        self.music_wanted = true;
        self.sync_music();
    }

    pub fn stop_music(&mut self) {
        self.music_wanted = false;
        self.sync_music();
    }

    pub fn is_music_playing(&self) -> bool {
        self.music_sent.is_some()
    }

    /// Tell the sink only when the audible music state changes
    fn sync_music(&mut self) {
        let volume = if self.muted {
            0.0
        } else {
            self.master_volume * self.music_volume
        };
        let next = (self.music_wanted && volume > 0.0).then_some(volume);
        if next != self.music_sent {
            self.music_sent = next;
            self.sink.music(next);
        }
    }

    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    pub fn play(&mut self, cue: AudioCue) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.sink.play(cue, vol);
    }

    /// Play the cue for each event, in order
    pub fn play_events(&mut self, events: &[GameEvent]) {
        for cue in events.iter().filter_map(AudioCue::for_event) {
            self.play(cue);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default, Clone)]
    struct Recorder(Rc<RefCell<Vec<(AudioCue, f32)>>>);

    impl AudioSink for Recorder {
        fn play(&mut self, cue: AudioCue, volume: f32) {
            self.0.borrow_mut().push((cue, volume));
        }
    }

    #[derive(Default, Clone)]
    struct MusicRecorder(Rc<RefCell<Vec<Option<f32>>>>);

    impl AudioSink for MusicRecorder {
        fn play(&mut self, _cue: AudioCue, _volume: f32) {}

        fn music(&mut self, volume: Option<f32>) {
            self.0.borrow_mut().push(volume);
        }
    }

    #[test]
    fn test_cue_names() {
        let names: Vec<_> = [
            AudioCue::Jump,
            AudioCue::CoinCollect,
            AudioCue::Hurt,
            AudioCue::GameOver,
            AudioCue::LevelComplete,
        ]
        .iter()
        .map(AudioCue::as_str)
        .collect();
        assert_eq!(names, ["jump", "coin_collect", "hurt", "game_over", "level_complete"]);
    }

    #[test]
    fn test_events_map_to_cues() {
        let recorder = Recorder::default();
        let mut audio = AudioManager::new(Box::new(recorder.clone()));
        audio.play_events(&[
            GameEvent::FellOut,
            GameEvent::HazardHit { damage: 2 },
            GameEvent::CoinCollected { amount: 1 },
        ]);
        let played: Vec<_> = recorder.0.borrow().iter().map(|(c, _)| *c).collect();
        assert_eq!(played, vec![AudioCue::Hurt, AudioCue::CoinCollect]);
    }

    #[test]
    fn test_muted_plays_nothing() {
        let recorder = Recorder::default();
        let mut audio = AudioManager::new(Box::new(recorder.clone()));
        assert!(!audio.toggle_sound());
        audio.play(AudioCue::Jump);
        assert!(recorder.0.borrow().is_empty());

        audio.set_muted(false);
        audio.set_master_volume(0.5);
        audio.set_sfx_volume(2.0);
        audio.play(AudioCue::Jump);
        assert_eq!(recorder.0.borrow().as_slice(), &[(AudioCue::Jump, 0.5)]);
    }

    #[test]
    fn test_music_follows_mute() {
        let recorder = MusicRecorder::default();
        let mut audio = AudioManager::new(Box::new(recorder.clone()));
        audio.set_master_volume(1.0);
        audio.set_music_volume(0.5);
        assert!(recorder.0.borrow().is_empty());

        audio.start_music();
        audio.start_music();
        assert!(audio.is_music_playing());
        audio.set_muted(true);
        assert!(!audio.is_music_playing());
        audio.set_muted(false);
        audio.stop_music();
        assert_eq!(recorder.0.borrow().as_slice(), &[Some(0.5), None, Some(0.5), None]);
    }
}
