//! Arcade Runner
//!
//! Headless demo: drives a hosting session with a simple autopilot, then
//! replays the recorded run to check determinism.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use tokio::sync::RwLock;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use arcade_runner::{
    core::hash::StateHash,
    game::entity::ObstacleKind,
    replay, AppConfig, Clock, Control, FrameDriver, Game, GameConfig, HostSession,
    MonotonicClock, Recording, Snapshot, TICK_RATE, VERSION,
};

/// How long the autopilot plays.
const DEMO_DURATION: Duration = Duration::from_secs(8);

/// Distance ahead of the player at which the autopilot jumps a ground hazard.
const JUMP_LOOKAHEAD: f32 = 60.0;

/// Distance ahead of the player at which the autopilot ducks a flying hazard.
const DUCK_LOOKAHEAD: f32 = 40.0;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Arcade Runner v{}", VERSION);

    let config = match std::env::args().nth(1) {
        Some(path) => AppConfig::load(&path).with_context(|| format!("loading config from {}", path))?,
        None => AppConfig::default(),
    };
    info!("Seed: {}, frame rate: {} Hz (default {})", config.seed, config.host.frame_rate, TICK_RATE);

    let (recording, live_hash) = demo_session(&config).await?;
    verify_replay(&config.game, &recording, live_hash)
}

/// Play with the autopilot through the frame driver.
///
/// Returns the session recording (every run, resets included) and the
/// live end-state hash.
async fn demo_session(config: &AppConfig) -> Result<(Recording, StateHash)> {
    config.host.validate()?;
    let clock = Arc::new(MonotonicClock::new());
    let game = Game::with_recording(config.game.clone(), config.seed)?;
    let session = Arc::new(RwLock::new(HostSession::with_game(game, &config.host, clock.now_ms())));

    let handle = FrameDriver::spawn(session.clone(), clock, &config.host).await;
    let mut snapshots = handle.subscribe();
    let deadline = tokio::time::sleep(DEMO_DURATION);
    tokio::pin!(deadline);

    let mut runs = 1;
    let mut reset_sent = false;
    loop {
        tokio::select! {
            _ = &mut deadline => break,
            changed = snapshots.changed() => {
                if changed.is_err() {
                    warn!("driver stopped early");
                    break;
                }
                let snapshot = snapshots.borrow_and_update().clone();
                if snapshot.is_over {
                    if reset_sent {
                        continue;
                    }
                    if session.read().await.hearts().is_empty() {
                        info!("Out of hearts");
                        break;
                    }
                    runs += 1;
                    reset_sent = true;
                    handle.send(Control::Reset).await?;
                } else {
                    reset_sent = false;
                    if let Some(control) = autopilot(&snapshot, &config.game) {
                        handle.send(control).await?;
                    }
                }
            }
        }
    }

    handle.shutdown().await?;

    let mut session = session.write().await;
    info!(
        "Played {} run(s): last score {}, best {}, coins {}, hearts {}",
        runs,
        session.last_score(),
        session.best_score(),
        session.coin_wallet(),
        session.hearts().hearts,
    );

    let hash = session.game().compute_hash();
    let Some(recording) = session.game_mut().take_recording() else {
        bail!("session was not recording");
    };
    info!("Recorded {} frames, live hash {}", recording.len(), hex::encode(hash));
    Ok((recording, hash))
}

/// Replay the recording twice and compare both hashes with the live one.
fn verify_replay(config: &GameConfig, recording: &Recording, live_hash: StateHash) -> Result<()> {
    let (first, events) = replay(config, recording);
    let (second, _) = replay(config, recording);

    let first_hash = first.compute_hash();
    let second_hash = second.compute_hash();
    info!("Replay produced {} events, hash {}", events.len(), hex::encode(first_hash));

    if first_hash != second_hash || first_hash != live_hash {
        bail!(
            "determinism failure: live {} replay {} / {}",
            hex::encode(live_hash),
            hex::encode(first_hash),
            hex::encode(second_hash)
        );
    }
    info!("Determinism verified");
    Ok(())
}

/// Pick a control for the current frame, if any.
fn autopilot(snapshot: &Snapshot, config: &GameConfig) -> Option<Control> {
    let player_right = config.player_x + config.player_size.width;

    let ahead = |kind: ObstacleKind, lookahead: f32| {
        snapshot.obstacles.iter().any(|o| {
            o.kind == kind && o.x + o.size(config).width > config.player_x && o.x < player_right + lookahead
        })
    };

    if snapshot.is_jumping {
        return None;
    }
    if ahead(ObstacleKind::GroundHazard, JUMP_LOOKAHEAD) {
        return Some(Control::Jump);
    }

    let flying = ahead(ObstacleKind::FlyingHazard, DUCK_LOOKAHEAD);
    match (flying, snapshot.is_ducking) {
        (true, false) => Some(Control::Duck(true)),
        (false, true) => Some(Control::Duck(false)),
        _ => None,
    }
}
