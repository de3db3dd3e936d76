// Commands sent from the terminal UI to the rest of the process.

use janken_core::sign::HandSign;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserCommand {
    /// Raise a hand in front of the stand-in camera.
    ShowHand(HandSign),
    /// Take the hand away.
    LowerHand,
    Quit,
}
