// Debug label list: one row per model class with its latest probability.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem};
use ratatui::Frame;

use janken_core::prediction::ClassScore;

use crate::tui::ViewState;

const BAR_WIDTH: usize = 10;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let items: Vec<ListItem> = (0..state.label_slots)
        .map(|i| {
            let line = match state.scores.get(i) {
                Some(score) => Line::from(vec![
                    Span::raw(format!(" {:<8} ", score.label)),
                    Span::styled(
                        bar(score.probability),
                        Style::default().fg(bar_color(score, state.accept_threshold)),
                    ),
                    Span::raw(format!(" {:.2}", score.probability)),
                ]),
                None => Line::from(Span::styled(
                    format!(" class {} --", i + 1),
                    Style::default().fg(Color::DarkGray),
                )),
            };
            ListItem::new(line)
        })
        .collect();

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title("Labels"));
    frame.render_widget(list, area);
}

/// Fixed-width bar for a probability in [0, 1].
pub fn bar(probability: f32) -> String {
    let filled = (probability.clamp(0.0, 1.0) * BAR_WIDTH as f32).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

/// Green once a score would start a round, yellow for a likely class.
pub fn bar_color(score: &ClassScore, threshold: Option<f32>) -> Color {
    if threshold.is_some_and(|t| score.probability > t) {
        Color::Green
    } else if score.probability > 0.5 {
        Color::Yellow
    } else {
        Color::Gray
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
