// Keyboard stand-in for the webcam and model runtime.
//
// A key press "raises" a hand for `HOLD`, the camera captures empty frames,
// and the classifier reports the raised hand with high confidence. The model
// assets are still read from disk so a broken model directory fails setup the
// same way a real runtime would.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, info};

use janken_core::assets::{self, ModelAssets};
use janken_core::device::{CaptureDevice, CapturedFrame, Classifier, LoadedModel, ModelRuntime};
use janken_core::error::{PredictionError, SetupError};
use janken_core::prediction::ClassScore;
use janken_core::sign::HandSign;

use crate::command::UserCommand;

/// How long a raised hand stays in front of the camera.
pub const HOLD: Duration = Duration::from_millis(800);

/// Simulated load time of the model runtime.
pub const RUNTIME_WARMUP: Duration = Duration::from_millis(300);

const SHOWN_CONFIDENCE: f32 = 0.98;

// ---------------------------------------------------------------------------
// HandSignal
// ---------------------------------------------------------------------------

/// The hand currently held up, shared between the input side and the
/// classifier.
#[derive(Debug, Clone, Default)]
pub struct HandSignal {
    raised: Arc<Mutex<Option<(HandSign, Instant)>>>,
}

impl HandSignal {
    pub fn show(&self, sign: HandSign, at: Instant) {
        *self.lock() = Some((sign, at));
    }

    pub fn lower(&self) {
        *self.lock() = None;
    }

    /// The hand in view at `now`, if one was raised less than `HOLD` ago.
    pub fn current(&self, now: Instant) -> Option<HandSign> {
        match *self.lock() {
            Some((sign, at)) if now.saturating_duration_since(at) < HOLD => Some(sign),
            _ => None,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<(HandSign, Instant)>> {
        self.raised.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Apply user commands to the signal until `Quit` or the channel closes.
///
/// `shutdown` is dropped on return, which stops the round loop.
pub async fn drive(
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    signal: HandSignal,
    shutdown: mpsc::Sender<()>,
) {
    while let Some(cmd) = cmd_rx.recv().await {
        match cmd {
            UserCommand::ShowHand(sign) => {
                debug!("Raising {}", sign);
                signal.show(sign, Instant::now());
            }
            UserCommand::LowerHand => signal.lower(),
            UserCommand::Quit => {
                info!("Quit command received, shutting down");
                break;
            }
        }
    }
    let _ = shutdown.try_send(());
}

// ---------------------------------------------------------------------------
// Camera
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct KeyboardCamera {
    size: u32,
    flip: bool,
    playing: bool,
    sequence: u64,
}

impl KeyboardCamera {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CaptureDevice for KeyboardCamera {
    async fn setup(&mut self, size: u32, flip: bool) -> Result<(), SetupError> {
        if size == 0 {
            return Err(SetupError::Camera("capture size must be non-zero".into()));
        }
        self.size = size;
        self.flip = flip;
        Ok(())
    }

    async fn play(&mut self) -> Result<(), SetupError> {
        self.playing = true;
        Ok(())
    }

    async fn capture(&mut self) -> Result<CapturedFrame, PredictionError> {
        if !self.playing {
            return Err(PredictionError::Capture("camera is not playing".into()));
        }
        self.sequence += 1;
        Ok(CapturedFrame {
            width: self.size,
            height: self.size,
            mirrored: self.flip,
            sequence: self.sequence,
            captured_at: Instant::now(),
            pixels: Vec::new(),
        })
    }
}

// ---------------------------------------------------------------------------
// Runtime and classifier
// ---------------------------------------------------------------------------

pub struct ScriptedRuntime {
    signal: HandSignal,
    available_at: Instant,
}

impl ScriptedRuntime {
    pub fn new(signal: HandSignal, warmup: Duration) -> Self {
        ScriptedRuntime {
            signal,
            available_at: Instant::now() + warmup,
        }
    }
}

#[async_trait]
impl ModelRuntime for ScriptedRuntime {
    fn is_available(&self) -> bool {
        Instant::now() >= self.available_at
    }

    async fn load(&self, model: &ModelAssets) -> Result<LoadedModel, SetupError> {
        // The topology is opaque here; it only has to be present.
        assets::fetch_text(&model.model_url).await?;
        let metadata = assets::load_metadata(model).await?;
        let signs = metadata.hand_signs(&model.metadata_url)?;

        let classes: Vec<(String, HandSign)> = metadata.labels.into_iter().zip(signs).collect();
        let class_count = classes.len();
        Ok(LoadedModel {
            classifier: Box::new(ScriptedClassifier {
                classes,
                signal: self.signal.clone(),
            }),
            class_count,
        })
    }
}

/// Reports the raised hand with high confidence, or an even split when no
/// hand is up.
pub struct ScriptedClassifier {
    classes: Vec<(String, HandSign)>,
    signal: HandSignal,
}

impl ScriptedClassifier {
    pub fn new(classes: Vec<(String, HandSign)>, signal: HandSignal) -> Self {
        ScriptedClassifier { classes, signal }
    }
}

#[async_trait]
impl Classifier for ScriptedClassifier {
    async fn predict(&self, frame: &CapturedFrame) -> Result<Vec<ClassScore>, PredictionError> {
        let count = self.classes.len();
        if count == 0 {
            return Ok(Vec::new());
        }
        let shown = self.signal.current(frame.captured_at);
        let rest = (1.0 - SHOWN_CONFIDENCE) / (count.saturating_sub(1).max(1)) as f32;

        Ok(self
            .classes
            .iter()
            .map(|(label, sign)| {
                let probability = match shown {
                    Some(s) if s == *sign => SHOWN_CONFIDENCE,
                    Some(_) => rest,
                    None => 1.0 / count as f32,
                };
                ClassScore::new(label.clone(), probability)
            })
            .collect())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
