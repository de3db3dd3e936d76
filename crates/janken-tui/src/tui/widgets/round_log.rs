// Round log widget: recent rounds, newest first.
//
// Each: "{time}  {player} vs {computer}  {result}"

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};
use ratatui::Frame;

use janken_core::protocol::RoundResult;
use janken_core::sign::RoundOutcome;

use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    if state.round_log.is_empty() {
        let paragraph = Paragraph::new("  No rounds yet.")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL).title("Rounds"));
        frame.render_widget(paragraph, area);
        return;
    }

    let visible_rows = (area.height as usize).saturating_sub(2).max(1);
    let items: Vec<ListItem> = state
        .round_log
        .iter()
        .take(visible_rows)
        .map(|round| {
            ListItem::new(Line::from(Span::styled(
                format_round(round),
                Style::default().fg(outcome_color(round.outcome)),
            )))
        })
        .collect();

    let title = format!("Rounds ({})", state.tally.total());
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(list, area);
}

pub fn format_round(round: &RoundResult) -> String {
    format!(
        "{}  {} vs {}  {}",
        round.played_at.format("%H:%M:%S"),
        round.player.name(),
        round.computer.name(),
        round.outcome.message()
    )
}

pub fn outcome_color(outcome: RoundOutcome) -> Color {
    match outcome {
        RoundOutcome::PlayerWins => Color::Green,
        RoundOutcome::ComputerWins => Color::Red,
        RoundOutcome::Draw => Color::White,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
