// Hand signs, round outcomes, and the judge rule.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// HandSign
// ---------------------------------------------------------------------------

/// One of the three janken hand shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandSign {
    Rock,
    Scissors,
    Paper,
}

impl HandSign {
    /// Every sign, in the order the opponent draws from.
    pub const ALL: [HandSign; 3] = [HandSign::Rock, HandSign::Scissors, HandSign::Paper];

    /// The sign this one defeats.
    pub fn beats(self) -> HandSign {
        match self {
            HandSign::Rock => HandSign::Scissors,
            HandSign::Scissors => HandSign::Paper,
            HandSign::Paper => HandSign::Rock,
        }
    }

    /// Emoji shown in the arena for this sign.
    pub fn glyph(self) -> &'static str {
        match self {
            HandSign::Rock => "✊",
            HandSign::Scissors => "✌️",
            HandSign::Paper => "✋",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            HandSign::Rock => "Rock",
            HandSign::Scissors => "Scissors",
            HandSign::Paper => "Paper",
        }
    }

    /// Map a classifier label onto a sign.
    ///
    /// Accepts the janken names the model was trained with (`Gu`, `Choki`,
    /// `Pa`, also in kana) as well as the English names, case-insensitively.
    pub fn from_label(label: &str) -> Option<HandSign> {
        let label = label.trim();
        match label.to_ascii_lowercase().as_str() {
            "gu" | "goo" | "rock" | "グー" => Some(HandSign::Rock),
            "choki" | "scissors" | "チョキ" => Some(HandSign::Scissors),
            "pa" | "paa" | "paper" | "パー" => Some(HandSign::Paper),
            _ => None,
        }
    }
}

impl fmt::Display for HandSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HandSign {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HandSign::from_label(s).ok_or_else(|| format!("unknown hand sign: {s:?}"))
    }
}

// ---------------------------------------------------------------------------
// RoundOutcome and judge
// ---------------------------------------------------------------------------

/// Result of one round, from the player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundOutcome {
    PlayerWins,
    ComputerWins,
    Draw,
}

impl RoundOutcome {
    /// Banner text shown in the arena after a round.
    pub fn message(self) -> &'static str {
        match self {
            RoundOutcome::PlayerWins => "You win!",
            RoundOutcome::ComputerWins => "You lose...",
            RoundOutcome::Draw => "Draw!",
        }
    }
}

/// Decide a round. Each sign beats exactly one other and loses to the third.
pub fn judge(player: HandSign, computer: HandSign) -> RoundOutcome {
    if player == computer {
        RoundOutcome::Draw
    } else if player.beats() == computer {
        RoundOutcome::PlayerWins
    } else {
        RoundOutcome::ComputerWins
    }
}

/// Draw the opponent's sign uniformly from all three.
pub fn draw_opponent<R: Rng + ?Sized>(rng: &mut R) -> HandSign {
    HandSign::ALL[rng.random_range(0..HandSign::ALL.len())]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn judge_concrete_table() {
        assert_eq!(judge(HandSign::Rock, HandSign::Scissors), RoundOutcome::PlayerWins);
        assert_eq!(judge(HandSign::Scissors, HandSign::Paper), RoundOutcome::PlayerWins);
        assert_eq!(judge(HandSign::Paper, HandSign::Rock), RoundOutcome::PlayerWins);
        assert_eq!(judge(HandSign::Rock, HandSign::Paper), RoundOutcome::ComputerWins);
        assert_eq!(judge(HandSign::Rock, HandSign::Rock), RoundOutcome::Draw);
    }

    #[test]
    fn same_sign_is_always_a_draw() {
        for sign in HandSign::ALL {
            assert_eq!(judge(sign, sign), RoundOutcome::Draw);
        }
    }

    #[test]
    fn judge_is_symmetric_complementary() {
        for a in HandSign::ALL {
            for b in HandSign::ALL {
                if a == b {
                    continue;
                }
                let forward = judge(a, b);
                let backward = judge(b, a);
                assert_ne!(forward, RoundOutcome::Draw, "{a} vs {b}");
                assert_eq!(
                    forward == RoundOutcome::PlayerWins,
                    backward == RoundOutcome::ComputerWins,
                    "{a} vs {b}"
                );
            }
        }
    }

    #[test]
    fn each_sign_beats_exactly_one_other() {
        for a in HandSign::ALL {
            let wins = HandSign::ALL
                .iter()
                .filter(|&&b| judge(a, b) == RoundOutcome::PlayerWins)
                .count();
            let losses = HandSign::ALL
                .iter()
                .filter(|&&b| judge(a, b) == RoundOutcome::ComputerWins)
                .count();
            assert_eq!((wins, losses), (1, 1), "{a}");
        }
    }

    #[test]
    fn opponent_draw_is_uniform() {
        // Chi-square goodness of fit, 2 degrees of freedom. The critical value
        // at p = 0.001 is 13.82.
        let mut rng = StdRng::seed_from_u64(0x6a61_6e6b_656e);
        let trials = 6000;
        let mut counts = [0usize; 3];
        for _ in 0..trials {
            let sign = draw_opponent(&mut rng);
            let idx = HandSign::ALL.iter().position(|&s| s == sign).unwrap();
            counts[idx] += 1;
        }
        let expected = trials as f64 / 3.0;
        let chi_square: f64 = counts
            .iter()
            .map(|&c| {
                let diff = c as f64 - expected;
                diff * diff / expected
            })
            .sum();
        assert!(counts.iter().all(|&c| c > 0), "counts: {counts:?}");
        assert!(chi_square < 13.82, "chi-square {chi_square} for {counts:?}");
    }

    #[test]
    fn labels_map_to_signs() {
        assert_eq!(HandSign::from_label("Gu"), Some(HandSign::Rock));
        assert_eq!(HandSign::from_label("choki"), Some(HandSign::Scissors));
        assert_eq!(HandSign::from_label(" Pa "), Some(HandSign::Paper));
        assert_eq!(HandSign::from_label("PAPER"), Some(HandSign::Paper));
        assert_eq!(HandSign::from_label("グー"), Some(HandSign::Rock));
        assert_eq!(HandSign::from_label("Background"), None);
    }

    #[test]
    fn from_str_rejects_unknown() {
        assert_eq!("rock".parse::<HandSign>(), Ok(HandSign::Rock));
        assert!("lizard".parse::<HandSign>().is_err());
    }

    #[test]
    fn outcome_messages() {
        assert_eq!(RoundOutcome::PlayerWins.message(), "You win!");
        assert_eq!(RoundOutcome::ComputerWins.message(), "You lose...");
        assert_eq!(RoundOutcome::Draw.message(), "Draw!");
    }
}
