// Round controller: owns the game state and drives the
// capture -> classify -> judge -> cooldown -> reset cycle.
//
// The controller is the only writer of `GameState`. It runs as a single task
// (`RoundController::run`) that selects over the frame tick, the pending reset
// deadline, and a shutdown signal, so classification calls never overlap and
// a late result can never race a state transition.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, error, info, trace, warn};

use crate::assets::ModelAssets;
use crate::config::{Config, SetupConfig};
use crate::device::{CaptureDevice, Classifier, ModelRuntime};
use crate::error::{PredictionError, SetupError};
use crate::prediction::{select_best, to_predictions};
use crate::protocol::{RoundResult, UiUpdate};
use crate::sign::{draw_opponent, judge, HandSign};

// ---------------------------------------------------------------------------
// Status texts
// ---------------------------------------------------------------------------

pub const STATUS_LOADING: &str = "Loading recognition library...";
pub const STATUS_PREPARING: &str = "Preparing camera...";
pub const STATUS_READY: &str = "Show your hand to the camera!";
pub const STATUS_NEXT: &str = "Show your next hand!";
pub const STATUS_CAMERA_FAILED: &str = "Something went wrong. Please allow camera access.";
pub const STATUS_RUNTIME_FAILED: &str = "The recognition library failed to load.";

// ---------------------------------------------------------------------------
// GameState
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    /// Classifier or camera not ready yet (or failed to become ready).
    AwaitingSetup,
    /// Polling; a confident detection starts a round.
    Idle,
    /// A detection was accepted and the round is being decided.
    RoundInProgress,
    /// Result is on screen; waiting for the reset deadline.
    CooldownPending,
}

// ---------------------------------------------------------------------------
// RoundController
// ---------------------------------------------------------------------------

pub struct RoundController {
    config: Config,
    runtime: Box<dyn ModelRuntime>,
    camera: Box<dyn CaptureDevice>,
    classifier: Option<Box<dyn Classifier>>,
    class_count: usize,
    ui_tx: mpsc::Sender<UiUpdate>,
    state: GameState,
    /// When the current cooldown ends. `Some` only in `CooldownPending`.
    reset_at: Option<Instant>,
    rng: StdRng,
    rounds_played: u64,
}

impl RoundController {
    pub fn new(
        config: Config,
        runtime: Box<dyn ModelRuntime>,
        camera: Box<dyn CaptureDevice>,
        ui_tx: mpsc::Sender<UiUpdate>,
    ) -> Self {
        RoundController {
            config,
            runtime,
            camera,
            classifier: None,
            class_count: 0,
            ui_tx,
            state: GameState::AwaitingSetup,
            reset_at: None,
            rng: StdRng::from_os_rng(),
            rounds_played: 0,
        }
    }

    /// Replace the opponent's random source, e.g. with a seeded one.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// Number of classes the loaded model reports. Zero before setup.
    pub fn class_count(&self) -> usize {
        self.class_count
    }

    pub fn rounds_played(&self) -> u64 {
        self.rounds_played
    }

    /// When the pending reset will fire, if a round is cooling down.
    pub fn reset_deadline(&self) -> Option<Instant> {
        self.reset_at
    }

    /// Bring up the model and camera and move to `Idle`.
    ///
    /// On failure the status line shows an error, the state stays
    /// `AwaitingSetup`, and nothing is retried.
    pub async fn initialize(&mut self) -> Result<(), SetupError> {
        if self.state != GameState::AwaitingSetup {
            warn!("initialize called in state {:?}, ignoring", self.state);
            return Ok(());
        }

        match self.setup().await {
            Ok(()) => {
                self.state = GameState::Idle;
                info!("Setup complete, {} classes, waiting for a hand", self.class_count);
                Ok(())
            }
            Err(e) => {
                error!("Setup error: {}", e);
                let message = match e {
                    SetupError::RuntimeUnavailable { .. } => STATUS_RUNTIME_FAILED,
                    _ => STATUS_CAMERA_FAILED,
                };
                self.send(UiUpdate::Error(message.to_string())).await;
                Err(e)
            }
        }
    }

    async fn setup(&mut self) -> Result<(), SetupError> {
        self.send(UiUpdate::Status(STATUS_LOADING.to_string())).await;
        wait_for_runtime(self.runtime.as_ref(), &self.config.setup).await?;

        self.send(UiUpdate::Status(STATUS_PREPARING.to_string())).await;

        let assets = ModelAssets::resolve(&self.config.model.base_path);
        info!("Loading model: {}", assets.model_url);
        info!("Loading metadata: {}", assets.metadata_url);
        let model = self.runtime.load(&assets).await?;

        let size = self.config.capture.frame_size;
        let flip = self.config.capture.flip;
        self.camera.setup(size, flip).await?;
        self.camera.play().await?;

        self.classifier = Some(model.classifier);
        self.class_count = model.class_count;

        self.send(UiUpdate::PreviewMounted {
            width: size,
            height: size,
            mirrored: flip,
        })
        .await;
        self.send(UiUpdate::LabelsInitialized {
            count: model.class_count,
            threshold: self.config.round.confidence_threshold,
        })
        .await;
        self.send(UiUpdate::Status(STATUS_READY.to_string())).await;
        Ok(())
    }

    /// Capture and classify one frame; start a round on a confident detection.
    ///
    /// Does nothing unless the state is `Idle`.
    pub async fn poll_tick(&mut self) -> Result<(), PredictionError> {
        if self.state != GameState::Idle {
            trace!("Tick dropped in state {:?}", self.state);
            return Ok(());
        }
        let Some(classifier) = self.classifier.as_deref() else {
            return Err(PredictionError::NotLoaded);
        };

        let frame = self.camera.capture().await?;
        let scores = classifier.predict(&frame).await?;
        let predictions = to_predictions(&scores)?;
        let best = select_best(&predictions)?;

        // Debug labels are best-effort; a full channel just skips a frame.
        let _ = self.ui_tx.try_send(UiUpdate::Scores(scores));

        if best.confidence > self.config.round.confidence_threshold {
            debug!(
                "Detected {} at {:.3} on frame {}",
                best.sign, best.confidence, frame.sequence
            );
            self.resolve_round(best.sign).await;
        }
        Ok(())
    }

    /// Play one round against a random opponent and schedule the reset.
    pub async fn resolve_round(&mut self, player: HandSign) -> RoundResult {
        self.state = GameState::RoundInProgress;

        let computer = draw_opponent(&mut self.rng);
        let outcome = judge(player, computer);
        self.rounds_played += 1;
        info!(
            "Round {}: player {} vs computer {} -> {:?}",
            self.rounds_played, player, computer, outcome
        );

        let result = RoundResult {
            player,
            computer,
            outcome,
            played_at: chrono::Local::now(),
        };
        self.send(UiUpdate::RoundResolved(result.clone())).await;

        self.state = GameState::CooldownPending;
        self.reset_at = Some(Instant::now() + self.config.round.cooldown());
        result
    }

    /// Restore the neutral presentation and accept detections again.
    ///
    /// Only ends a cooldown; in any other state this does nothing.
    pub async fn reset_round(&mut self) {
        if self.state != GameState::CooldownPending {
            warn!("reset_round called in state {:?}, ignoring", self.state);
            return;
        }
        debug!("Resetting after round {}", self.rounds_played);
        self.reset_at = None;
        self.send(UiUpdate::RoundReset).await;
        self.send(UiUpdate::Status(STATUS_NEXT.to_string())).await;
        self.state = GameState::Idle;
    }

    /// Run the polling loop until `shutdown` fires or its sender is dropped.
    ///
    /// Returns the first prediction error; the status line shows it and the
    /// loop stops.
    pub async fn run(&mut self, mut shutdown: mpsc::Receiver<()>) -> Result<(), PredictionError> {
        info!("Round loop started at {:?} per tick", self.config.capture.tick_period());

        let mut frame_tick = tokio::time::interval(self.config.capture.tick_period());
        frame_tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            let reset_at = self.reset_at;
            tokio::select! {
                biased;

                _ = shutdown.recv() => {
                    info!("Shutdown requested, stopping round loop");
                    break;
                }

                _ = tokio::time::sleep_until(reset_at.unwrap_or_else(Instant::now)), if reset_at.is_some() => {
                    self.reset_round().await;
                }

                _ = frame_tick.tick() => {
                    if let Err(e) = self.poll_tick().await {
                        error!("Prediction error: {}", e);
                        self.send(UiUpdate::Error(format!("Recognition failed: {e}"))).await;
                        return Err(e);
                    }
                }
            }
        }

        Ok(())
    }

    async fn send(&self, update: UiUpdate) {
        let _ = self.ui_tx.send(update).await;
    }
}

/// Wait until the model runtime reports available, checking every
/// `runtime_poll` up to `runtime_timeout`.
pub async fn wait_for_runtime(
    runtime: &dyn ModelRuntime,
    setup: &SetupConfig,
) -> Result<(), SetupError> {
    let timeout = setup.runtime_timeout();
    let mut poll = tokio::time::interval(setup.runtime_poll());

    tokio::time::timeout(timeout, async {
        loop {
            poll.tick().await;
            if runtime.is_available() {
                break;
            }
        }
    })
    .await
    .map_err(|_| SetupError::RuntimeUnavailable { waited: timeout })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::LoadedModel;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    /// Runtime that becomes available once `ready` is set.
    struct LateRuntime {
        ready: Arc<AtomicBool>,
    }

    #[async_trait]
    impl ModelRuntime for LateRuntime {
        fn is_available(&self) -> bool {
            self.ready.load(Ordering::SeqCst)
        }

        async fn load(&self, assets: &ModelAssets) -> Result<LoadedModel, SetupError> {
            Err(SetupError::ModelLoad {
                location: assets.model_url.clone(),
                message: "not under test".into(),
            })
        }
    }

    #[tokio::test(start_paused = true)]
    async fn wait_for_runtime_times_out() {
        let runtime = LateRuntime {
            ready: Arc::new(AtomicBool::new(false)),
        };
        let start = Instant::now();
        let err = wait_for_runtime(&runtime, &SetupConfig::default())
            .await
            .unwrap_err();
        match err {
            SetupError::RuntimeUnavailable { waited } => {
                assert_eq!(waited, Duration::from_secs(10))
            }
            other => panic!("expected RuntimeUnavailable, got {other}"),
        }
        assert!(start.elapsed() >= Duration::from_secs(10));
    }

    #[tokio::test(start_paused = true)]
    async fn wait_for_runtime_returns_once_available() {
        let ready = Arc::new(AtomicBool::new(false));
        let runtime = LateRuntime {
            ready: ready.clone(),
        };

        let flag = ready.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(750)).await;
            flag.store(true, Ordering::SeqCst);
        });

        let start = Instant::now();
        wait_for_runtime(&runtime, &SetupConfig::default())
            .await
            .unwrap();
        let waited = start.elapsed();
        assert!(waited >= Duration::from_millis(750), "waited {waited:?}");
        assert!(waited <= Duration::from_millis(850), "waited {waited:?}");
    }

    #[tokio::test]
    async fn poll_tick_before_setup_is_a_noop() {
        struct NoCamera;

        #[async_trait]
        impl CaptureDevice for NoCamera {
            async fn setup(&mut self, _size: u32, _flip: bool) -> Result<(), SetupError> {
                Err(SetupError::PermissionDenied)
            }
            async fn play(&mut self) -> Result<(), SetupError> {
                Err(SetupError::PermissionDenied)
            }
            async fn capture(&mut self) -> Result<crate::device::CapturedFrame, PredictionError> {
                panic!("capture must not be called before setup");
            }
        }

        let (ui_tx, mut ui_rx) = mpsc::channel(16);
        let runtime = LateRuntime {
            ready: Arc::new(AtomicBool::new(true)),
        };
        let mut controller =
            RoundController::new(Config::default(), Box::new(runtime), Box::new(NoCamera), ui_tx);

        controller.poll_tick().await.unwrap();
        assert_eq!(controller.state(), GameState::AwaitingSetup);
        assert!(ui_rx.try_recv().is_err());
    }
}
