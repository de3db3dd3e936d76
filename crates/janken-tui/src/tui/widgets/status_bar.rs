// Status bar widget: status text on the left, session tally on the right.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::tui::{StatusKind, Tally, ViewState};

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let [left, right] =
        Layout::horizontal([Constraint::Min(10), Constraint::Length(24)]).areas(area);

    let status = Paragraph::new(Line::from(Span::styled(
        format!(" {}", state.status),
        status_style(state.status_kind),
    )))
    .style(Style::default().bg(Color::Black));
    frame.render_widget(status, left);

    let tally = Paragraph::new(Line::from(Span::styled(
        tally_text(&state.tally),
        Style::default().fg(Color::Gray),
    )))
    .right_aligned()
    .style(Style::default().bg(Color::Black));
    frame.render_widget(tally, right);
}

pub fn status_style(kind: StatusKind) -> Style {
    match kind {
        StatusKind::Info => Style::default().fg(Color::White),
        StatusKind::Error => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    }
}

/// E.g. "W 3  L 1  D 2 "
pub fn tally_text(tally: &Tally) -> String {
    format!("W {}  L {}  D {} ", tally.wins, tally.losses, tally.draws)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_status_is_red_and_bold() {
        let style = status_style(StatusKind::Error);
        assert_eq!(style.fg, Some(Color::Red));
        assert!(style.add_modifier.contains(Modifier::BOLD));
        assert_eq!(status_style(StatusKind::Info).fg, Some(Color::White));
    }

    #[test]
    fn tally_text_lists_counts() {
        let tally = Tally {
            wins: 3,
            losses: 1,
            draws: 2,
        };
        assert_eq!(tally_text(&tally), "W 3  L 1  D 2 ");
    }

    #[test]
    fn render_does_not_panic_with_defaults() {
        let backend = ratatui::backend::TestBackend::new(80, 1);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let state = ViewState::new();
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
    }
}
