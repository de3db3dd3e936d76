// Keyboard input handling and command dispatch.
//
// Translates crossterm key events into UserCommand messages for the stand-in
// rig, or into local ViewState mutations (quit confirmation).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::time::Instant;

use janken_core::sign::HandSign;

use super::ViewState;
use crate::command::UserCommand;

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press should be forwarded (raise
/// or lower a hand, quit). Returns `None` when the key was handled locally or
/// ignored.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // On Windows crossterm emits both Press and Release events; only act on
    // Press so a keystroke is not handled twice.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    if key_event.modifiers.contains(KeyModifiers::CONTROL) && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    if view_state.confirm_quit {
        return handle_confirm_quit(key_event, view_state);
    }

    match key_event.code {
        KeyCode::Char('r') | KeyCode::Char('g') => Some(raise(view_state, HandSign::Rock)),
        KeyCode::Char('s') | KeyCode::Char('c') => Some(raise(view_state, HandSign::Scissors)),
        KeyCode::Char('p') => Some(raise(view_state, HandSign::Paper)),
        KeyCode::Char(' ') | KeyCode::Esc => {
            view_state.raised_hand = None;
            Some(UserCommand::LowerHand)
        }
        KeyCode::Char('q') => {
            view_state.confirm_quit = true;
            None
        }
        _ => None,
    }
}

fn raise(view_state: &mut ViewState, sign: HandSign) -> UserCommand {
    view_state.raised_hand = Some((sign, Instant::now()));
    UserCommand::ShowHand(sign)
}

/// Handle key events while in quit confirmation mode.
///
/// - `y` or `q` confirms quit
/// - `n` or `Esc` cancels
/// - All other keys are blocked
fn handle_confirm_quit(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Char('q') | KeyCode::Char('Q') => {
            Some(UserCommand::Quit)
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            view_state.confirm_quit = false;
            None
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
