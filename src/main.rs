//! Rabbit Hop - native headless entry point
//!
//! Plays the saved run with the autopilot for a fixed stretch of simulated
//! time, walking through the store between levels, then saves progress.
//!
//! Usage: `rabbit-hop [settings.json] [seconds]`

#[cfg(not(target_arch = "wasm32"))]
use anyhow::{Context, Result};

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use rabbit_hop::consts::{SIM_DT, VIEW_WIDTH};
    use rabbit_hop::renderer::{FrameView, Renderer};
    use rabbit_hop::sim::GameEvent;
    use rabbit_hop::{Session, StoreItem};

    /// Renderer that reports what is on screen every few seconds
    #[derive(Default)]
    pub struct LogRenderer {
        frames: u64,
    }

    impl Renderer for LogRenderer {
        fn draw(&mut self, frame: &FrameView) {
            self.frames += 1;
            if self.frames % 300 == 0 {
                log::debug!(
                    "frame {}: camera {:.0}, {} sprites visible, rabbit {:?}",
                    self.frames,
                    frame.camera_x,
                    frame.visible(VIEW_WIDTH).count(),
                    frame.rabbit_pose
                );
            }
        }
    }

    /// Store visit after a cleared level: a key if there is a next level,
    /// health when low, upgrades only from coins beyond the next key's price
    fn visit_store(session: &mut Session) {
        for item in StoreItem::ALL {
            let progress = session.progress();
            let tuning = session.tuning();
            let wanted = match item {
                StoreItem::Key => !progress.is_final_level(),
                StoreItem::HealthPotion => progress.health < tuning.max_health / 2,
                StoreItem::SpeedPotion | StoreItem::JumpPotion => {
                    progress.coins >= tuning.key_cost + item.cost(tuning)
                }
            };
            if !wanted {
                continue;
            }
            if let Err(e) = session.buy(item) {
                log::info!("Skipped {}: {e}", item.as_str());
            }
        }
    }

    fn on_level_complete(session: &mut Session) {
        visit_store(session);

        if session.progress().is_final_level() {
            log::info!(
                "All levels cleared with {} coins, starting over",
                session.progress().coins
            );
            session.new_game();
            return;
        }

        match session.next_level() {
            Ok(level) => log::info!("Entering level {level}"),
            Err(e) => {
                log::info!("Replaying level {}: {e}", session.progress().current_level);
                session.start_level();
            }
        }
    }

    /// Drive the session at 60 fps for `seconds` of simulated time
    pub fn run(session: &mut Session, seconds: f32) {
        let input = rabbit_hop::sim::TickInput {
            idle_mode: true,
            ..Default::default()
        };
        let mut renderer = LogRenderer::default();
        let frames = (seconds / SIM_DT).ceil() as u64;

        for _ in 0..frames {
            let events = session.advance(SIM_DT, &input);
            session.render(&mut renderer);

            for event in events {
                match event {
                    GameEvent::LevelComplete => on_level_complete(session),
                    GameEvent::GameOver => {
                        log::info!(
                            "Game over on level {}, new game",
                            session.progress().current_level
                        );
                        session.new_game();
                    }
                    _ => {}
                }
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<()> {
    use std::path::PathBuf;

    use rabbit_hop::audio::LogAudio;
    use rabbit_hop::{Session, Settings, persistence};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Rabbit Hop (native) starting...");

    let mut args = std::env::args().skip(1);
    let settings_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("rabbithop_settings.json"));
    let seconds: f32 = match args.next() {
        Some(arg) => arg
            .parse()
            .with_context(|| format!("invalid run length {arg:?}"))?,
        None => 120.0,
    };

    let settings = Settings::load(&settings_path);
    if !settings.idle_mode {
        log::info!("No input device in headless mode, autopilot is playing");
    }

    let mut session = Session::from_settings(&settings, Box::new(LogAudio));
    log::info!("Run seed {}", session.seed());
    match persistence::load(&settings.save_path) {
        Ok(Some(snapshot)) => session.restore(&snapshot),
        Ok(None) => session.start_level(),
        Err(e) => {
            log::warn!("Ignoring save {}: {e}", settings.save_path.display());
            session.start_level();
        }
    }

    native::run(&mut session, seconds);

    let snapshot = session.snapshot();
    persistence::save(&settings.save_path, &snapshot)
        .with_context(|| format!("saving progress to {}", settings.save_path.display()))?;
    log::info!(
        "Stopped on level {} with {} coins and {} health",
        snapshot.current_level,
        snapshot.coins,
        snapshot.health
    );
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is driven by the host page on the web; nothing to run here
}
