// Messages from the round controller to the presentation layer.

use chrono::{DateTime, Local};

use crate::prediction::ClassScore;
use crate::sign::{HandSign, RoundOutcome};

/// A resolved round, as shown to the player.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundResult {
    pub player: HandSign,
    pub computer: HandSign,
    pub outcome: RoundOutcome,
    pub played_at: DateTime<Local>,
}

/// Updates pushed to the presentation sink.
#[derive(Debug, Clone, PartialEq)]
pub enum UiUpdate {
    /// Replace the status line text.
    Status(String),
    /// Setup or recognition failed; the status line shows the message as an
    /// error and the game does not continue.
    Error(String),
    /// The capture preview is live.
    PreviewMounted {
        width: u32,
        height: u32,
        mirrored: bool,
    },
    /// Size the per-class debug label list. `threshold` is the confidence a
    /// class must exceed to start a round.
    LabelsInitialized { count: usize, threshold: f32 },
    /// Latest per-class scores for the debug label list.
    Scores(Vec<ClassScore>),
    /// Show both hands, the result text, and highlight the winner.
    RoundResolved(RoundResult),
    /// Restore placeholder hands, "VS", and clear the highlight.
    RoundReset,
}
