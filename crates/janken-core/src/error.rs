// Error types for controller setup and per-tick prediction.

use std::time::Duration;

use thiserror::Error;

/// Failure to bring the classifier or capture device up. Never retried; the
/// controller stays in `AwaitingSetup` for the rest of the session.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("model runtime did not become available within {waited:?}")]
    RuntimeUnavailable { waited: Duration },

    #[error("failed to load model from {location}: {message}")]
    ModelLoad { location: String, message: String },

    #[error("invalid model metadata at {location}: {message}")]
    Metadata { location: String, message: String },

    #[error("camera access was denied")]
    PermissionDenied,

    #[error("camera setup failed: {0}")]
    Camera(String),
}

/// Failure while classifying a captured frame. These are precondition
/// violations of the collaborators and are surfaced, not skipped.
#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("classifier returned no predictions")]
    Empty,

    #[error("no classifier is loaded")]
    NotLoaded,

    #[error("classifier returned unknown label {0:?}")]
    UnknownLabel(String),

    #[error("classifier returned confidence {confidence} for {label:?}, expected a value in [0, 1]")]
    InvalidConfidence { label: String, confidence: f32 },

    #[error("classification failed: {0}")]
    Classifier(String),

    #[error("frame capture failed: {0}")]
    Capture(String),
}
