// Leave-game overlay: the session score and the keys that answer it.
//
//   ╭ Leave the game? ─────────────╮
//   │ 6 rounds: W 3  L 1  D 2      │
//   │ y/q leave   n/Esc keep going │
//   ╰──────────────────────────────╯

use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::tui::{Tally, ViewState};

const DIALOG_WIDTH: u16 = 34;
const DIALOG_HEIGHT: u16 = 4;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let dialog = centered_rect(DIALOG_WIDTH, DIALOG_HEIGHT, area);
    frame.render_widget(Clear, dialog);

    let key = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let lines = vec![
        Line::raw(format!(" {}", session_summary(&state.tally))),
        Line::from(vec![
            Span::styled(" y/q", key),
            Span::raw(" leave   "),
            Span::styled("n/Esc", key),
            Span::raw(" keep going"),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Leave the game? ");
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .style(Style::default().bg(Color::Black)),
        dialog,
    );
}

/// E.g. "6 rounds: W 3  L 1  D 2", or "No rounds played" for a fresh session.
pub fn session_summary(tally: &Tally) -> String {
    match tally.total() {
        0 => "No rounds played".to_string(),
        1 => format!("1 round: W {}  L {}  D {}", tally.wins, tally.losses, tally.draws),
        n => format!("{n} rounds: W {}  L {}  D {}", tally.wins, tally.losses, tally.draws),
    }
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    cell
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_counts_the_session() {
        assert_eq!(session_summary(&Tally::default()), "No rounds played");
        let one = Tally {
            wins: 0,
            losses: 1,
            draws: 0,
        };
        assert_eq!(session_summary(&one), "1 round: W 0  L 1  D 0");
        let six = Tally {
            wins: 3,
            losses: 1,
            draws: 2,
        };
        assert_eq!(session_summary(&six), "6 rounds: W 3  L 1  D 2");
    }

    #[test]
    fn dialog_sits_in_the_middle_and_fits_small_screens() {
        let dialog = centered_rect(DIALOG_WIDTH, DIALOG_HEIGHT, Rect::new(0, 0, 80, 24));
        assert_eq!((dialog.x, dialog.y), (23, 10));
        assert_eq!((dialog.width, dialog.height), (DIALOG_WIDTH, DIALOG_HEIGHT));

        let tiny = centered_rect(DIALOG_WIDTH, DIALOG_HEIGHT, Rect::new(0, 0, 10, 3));
        assert_eq!((tiny.width, tiny.height), (10, 3));
    }

    #[test]
    fn render_shows_score_and_keys() {
        let backend = ratatui::backend::TestBackend::new(60, 10);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let mut state = ViewState::new();
        state.tally = Tally {
            wins: 2,
            losses: 0,
            draws: 1,
        };
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
        let buffer = format!("{:?}", terminal.backend().buffer());
        assert!(buffer.contains("Leave the game?"));
        assert!(buffer.contains("3 rounds: W 2  L 0  D 1"));
        assert!(buffer.contains("n/Esc keep going"));
    }
}
