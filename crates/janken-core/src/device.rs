// Seams to the external collaborators: the model runtime, the classifier it
// loads, and the capture device. Real implementations live outside this
// crate; tests and the terminal front end supply their own.

use async_trait::async_trait;
use tokio::time::Instant;

use crate::assets::ModelAssets;
use crate::error::{PredictionError, SetupError};
use crate::prediction::ClassScore;

/// One captured image.
#[derive(Debug, Clone)]
pub struct CapturedFrame {
    pub width: u32,
    pub height: u32,
    /// Whether the image was mirrored horizontally at capture time.
    pub mirrored: bool,
    /// Monotonic frame counter assigned by the device.
    pub sequence: u64,
    pub captured_at: Instant,
    /// RGBA pixels, row-major. May be empty for devices that do not expose
    /// pixel data.
    pub pixels: Vec<u8>,
}

/// A classifier plus the number of classes it reports.
pub struct LoadedModel {
    pub classifier: Box<dyn Classifier>,
    pub class_count: usize,
}

/// The library that loads models. It may take a while to become available
/// after process start.
#[async_trait]
pub trait ModelRuntime: Send + Sync {
    /// Whether the runtime has finished loading and can accept `load` calls.
    fn is_available(&self) -> bool;

    async fn load(&self, assets: &ModelAssets) -> Result<LoadedModel, SetupError>;
}

#[async_trait]
pub trait Classifier: Send + Sync {
    /// Score a frame. Entries are in the model's class order.
    async fn predict(&self, frame: &CapturedFrame) -> Result<Vec<ClassScore>, PredictionError>;
}

#[async_trait]
pub trait CaptureDevice: Send + Sync {
    /// Acquire the device for a square region of `size` pixels.
    async fn setup(&mut self, size: u32, flip: bool) -> Result<(), SetupError>;

    /// Start streaming frames.
    async fn play(&mut self) -> Result<(), SetupError>;

    async fn capture(&mut self) -> Result<CapturedFrame, PredictionError>;
}
