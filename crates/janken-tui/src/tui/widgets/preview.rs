// Capture preview panel: camera geometry, the hand currently raised from the
// keyboard, and a frame counter.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use tokio::time::Instant;

use janken_core::sign::HandSign;

use crate::rig::HOLD;
use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState, now: Instant) {
    let block = Block::default().borders(Borders::ALL).title("Camera");

    let Some(preview) = state.preview else {
        let paragraph = Paragraph::new("  Camera not mounted.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    };

    let mirror = if preview.mirrored { ", mirrored" } else { "" };
    let hand = raised_hand(state, now);
    let hand_line = match hand {
        Some(sign) => Line::from(vec![
            Span::raw("  In view: "),
            Span::styled(
                format!("{} {}", sign.glyph(), sign.name()),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
        ]),
        None => Line::from(Span::styled(
            "  In view: nothing",
            Style::default().fg(Color::DarkGray),
        )),
    };

    let lines = vec![
        Line::raw(format!("  {}x{}{}", preview.width, preview.height, mirror)),
        hand_line,
        Line::from(Span::styled(
            format!("  Frames scored: {}", state.frames_scored),
            Style::default().fg(Color::Gray),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// The keyboard hand still in front of the camera at `now`.
pub fn raised_hand(state: &ViewState, now: Instant) -> Option<HandSign> {
    state
        .raised_hand
        .filter(|(_, at)| now.saturating_duration_since(*at) < HOLD)
        .map(|(sign, _)| sign)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
