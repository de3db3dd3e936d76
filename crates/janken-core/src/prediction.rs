// Classifier output and max-confidence selection.

use serde::{Deserialize, Serialize};

use crate::error::PredictionError;
use crate::sign::HandSign;

/// Raw (label, probability) pair as reported by the classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassScore {
    pub label: String,
    pub probability: f32,
}

impl ClassScore {
    pub fn new(label: impl Into<String>, probability: f32) -> Self {
        ClassScore {
            label: label.into(),
            probability,
        }
    }
}

/// A classifier score resolved to a hand sign.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub sign: HandSign,
    pub confidence: f32,
}

impl TryFrom<&ClassScore> for Prediction {
    type Error = PredictionError;

    fn try_from(score: &ClassScore) -> Result<Self, Self::Error> {
        let sign = HandSign::from_label(&score.label)
            .ok_or_else(|| PredictionError::UnknownLabel(score.label.clone()))?;
        if !(0.0..=1.0).contains(&score.probability) {
            return Err(PredictionError::InvalidConfidence {
                label: score.label.clone(),
                confidence: score.probability,
            });
        }
        Ok(Prediction {
            sign,
            confidence: score.probability,
        })
    }
}

/// Resolve every score to a prediction, failing on the first bad entry.
pub fn to_predictions(scores: &[ClassScore]) -> Result<Vec<Prediction>, PredictionError> {
    scores.iter().map(Prediction::try_from).collect()
}

/// Pick the prediction with the highest confidence.
///
/// A later entry only replaces the current best when it is strictly greater,
/// so ties go to the entry listed first.
pub fn select_best(predictions: &[Prediction]) -> Result<Prediction, PredictionError> {
    let (first, rest) = predictions.split_first().ok_or(PredictionError::Empty)?;
    Ok(rest.iter().fold(*first, |best, current| {
        if current.confidence > best.confidence {
            *current
        } else {
            best
        }
    }))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn p(sign: HandSign, confidence: f32) -> Prediction {
        Prediction { sign, confidence }
    }

    #[test]
    fn selects_highest_confidence() {
        let best = select_best(&[
            p(HandSign::Rock, 0.10),
            p(HandSign::Scissors, 0.97),
            p(HandSign::Paper, 0.02),
        ])
        .unwrap();
        assert_eq!(best.sign, HandSign::Scissors);
        assert!((best.confidence - 0.97).abs() < f32::EPSILON);
    }

    #[test]
    fn tie_goes_to_earlier_entry() {
        let best = select_best(&[
            p(HandSign::Paper, 0.97),
            p(HandSign::Rock, 0.97),
            p(HandSign::Scissors, 0.50),
        ])
        .unwrap();
        assert_eq!(best.sign, HandSign::Paper);

        let best = select_best(&[
            p(HandSign::Scissors, 0.50),
            p(HandSign::Rock, 0.97),
            p(HandSign::Paper, 0.97),
        ])
        .unwrap();
        assert_eq!(best.sign, HandSign::Rock);
    }

    #[test]
    fn empty_list_is_an_error() {
        assert!(matches!(select_best(&[]), Err(PredictionError::Empty)));
    }

    #[test]
    fn scores_resolve_to_predictions() {
        let scores = vec![
            ClassScore::new("Gu", 0.1),
            ClassScore::new("Choki", 0.8),
            ClassScore::new("Pa", 0.1),
        ];
        let predictions = to_predictions(&scores).unwrap();
        let signs: Vec<HandSign> = predictions.iter().map(|p| p.sign).collect();
        assert_eq!(signs, vec![HandSign::Rock, HandSign::Scissors, HandSign::Paper]);
    }

    #[test]
    fn unknown_label_is_rejected() {
        let scores = vec![ClassScore::new("Gu", 0.5), ClassScore::new("Thumbs up", 0.5)];
        match to_predictions(&scores) {
            Err(PredictionError::UnknownLabel(label)) => assert_eq!(label, "Thumbs up"),
            other => panic!("expected UnknownLabel, got {other:?}"),
        }
    }

    #[test]
    fn out_of_range_confidence_is_rejected() {
        let scores = vec![ClassScore::new("Pa", 1.5)];
        assert!(matches!(
            to_predictions(&scores),
            Err(PredictionError::InvalidConfidence { .. })
        ));
        let scores = vec![ClassScore::new("Pa", f32::NAN)];
        assert!(to_predictions(&scores).is_err());
    }
}
