//! Frame Driver
//!
//! Async loop that plays the role of the host's redraw signal. Each frame
//! samples the clock once, runs one tick under the session lock, then
//! publishes the finished [`Snapshot`]. Observers never see a half-applied
//! tick.
//!
//! While the run is over the frame branch is disabled; the heart
//! regeneration check keeps running once per second.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::{broadcast, mpsc, watch, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::core::clock::Clock;
use crate::game::config::{HostConfig, MAX_FRAME_RATE};
use crate::game::state::Snapshot;
use crate::host::session::HostSession;

/// Interval of the heart regeneration check.
pub const REGEN_CHECK_INTERVAL: Duration = Duration::from_secs(1);

/// Control calls forwarded to the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    /// Jump
    Jump,
    /// Duck press (true) or release (false)
    Duck(bool),
    /// Start a new run (needs a heart)
    Reset,
}

/// Driver errors.
#[derive(Debug, Error)]
pub enum DriverError {
    /// The driver task is gone.
    #[error("Frame driver has stopped")]
    Stopped,

    /// The driver task panicked or was cancelled.
    #[error("Frame driver task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Spawns the frame loop.
pub struct FrameDriver;

impl FrameDriver {
    /// Start driving `session` at the configured frame rate.
    pub async fn spawn(
        session: Arc<RwLock<HostSession>>,
        clock: Arc<dyn Clock>,
        config: &HostConfig,
    ) -> DriverHandle {
        let frame_period = frame_period(config.frame_rate);
        let initial = session.read().await.snapshot();

        let (control_tx, control_rx) = mpsc::channel(64);
        let (snapshot_tx, snapshot_rx) = watch::channel(initial);
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

        let task = tokio::spawn(run_loop(
            session,
            clock,
            control_rx,
            snapshot_tx,
            shutdown_rx,
            frame_period,
        ));

        info!(?frame_period, "frame driver started");

        DriverHandle {
            control_tx,
            snapshot_rx,
            shutdown_tx,
            task: Some(task),
        }
    }
}

/// Period of one frame, with the rate clamped to `1..=MAX_FRAME_RATE`.
fn frame_period(frame_rate: u32) -> Duration {
    let rate = frame_rate.clamp(1, MAX_FRAME_RATE);
    Duration::from_micros(1_000_000 / u64::from(rate))
}

/// Handle to a running frame driver. Dropping it aborts the loop.
pub struct DriverHandle {
    control_tx: mpsc::Sender<Control>,
    snapshot_rx: watch::Receiver<Snapshot>,
    shutdown_tx: broadcast::Sender<()>,
    task: Option<JoinHandle<()>>,
}

impl DriverHandle {
    /// Queue a control for the session.
    pub async fn send(&self, control: Control) -> Result<(), DriverError> {
        self.control_tx
            .send(control)
            .await
            .map_err(|_| DriverError::Stopped)
    }

    /// Receiver for post-tick snapshots.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshot_rx.clone()
    }

    /// Stop the loop and wait for it to finish.
    pub async fn shutdown(mut self) -> Result<(), DriverError> {
        let _ = self.shutdown_tx.send(());
        match self.task.take() {
            Some(task) => Ok(task.await?),
            None => Err(DriverError::Stopped),
        }
    }
}

impl Drop for DriverHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            debug!("driver handle dropped, aborting loop");
            task.abort();
        }
    }
}

async fn run_loop(
    session: Arc<RwLock<HostSession>>,
    clock: Arc<dyn Clock>,
    mut control_rx: mpsc::Receiver<Control>,
    snapshot_tx: watch::Sender<Snapshot>,
    mut shutdown_rx: broadcast::Receiver<()>,
    frame_period: Duration,
) {
    let mut frames = interval(frame_period);
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut regen = interval(REGEN_CHECK_INTERVAL);
    regen.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut running = !session.read().await.game().is_over();

    loop {
        tokio::select! {
            _ = frames.tick(), if running => {
                let now = clock.now_ms();
                let snapshot = {
                    let mut s = session.write().await;
                    let result = s.frame(now);
                    if result.game_over {
                        running = false;
                        debug!(tick = s.game().state().tick, "run over, frames paused");
                    }
                    s.snapshot()
                };
                snapshot_tx.send_replace(snapshot);
            }
            _ = regen.tick() => {
                let now = clock.now_ms();
                session.write().await.regenerate(now);
            }
            control = control_rx.recv() => {
                let Some(control) = control else {
                    debug!("control channel closed");
                    break;
                };
                let mut s = session.write().await;
                match control {
                    Control::Jump => {
                        s.jump();
                    }
                    Control::Duck(active) => {
                        s.duck(active);
                    }
                    Control::Reset => match s.start_run(clock.now_ms()) {
                        Ok(()) => {
                            running = true;
                            frames.reset();
                            snapshot_tx.send_replace(s.snapshot());
                        }
                        Err(e) => warn!("reset refused: {}", e),
                    },
                }
            }
            _ = shutdown_rx.recv() => {
                info!("frame driver shutting down");
                break;
            }
        }
    }
}
