// Arena widget: player hand, result text, computer hand.
//
// Neutral arena: 👤 VS 💻. After a round both hands are shown, the result
// text is colored by outcome, and the winner's box gets a highlighted border.

use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use ratatui::Frame;

use janken_core::protocol::RoundResult;
use janken_core::sign::{HandSign, RoundOutcome};

use crate::tui::ViewState;

pub const PLAYER_PLACEHOLDER: &str = "👤";
pub const COMPUTER_PLACEHOLDER: &str = "💻";
pub const NEUTRAL_TEXT: &str = "VS";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Player,
    Computer,
}

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let [player_area, result_area, computer_area] = Layout::horizontal([
        Constraint::Percentage(35),
        Constraint::Percentage(30),
        Constraint::Percentage(35),
    ])
    .areas(area);

    let round = state.current_round.as_ref();
    let winner = round.and_then(|r| winner(r.outcome));

    render_hand(
        frame,
        player_area,
        "You",
        round.map(|r| r.player),
        Side::Player,
        winner == Some(Side::Player),
    );
    render_hand(
        frame,
        computer_area,
        "Computer",
        round.map(|r| r.computer),
        Side::Computer,
        winner == Some(Side::Computer),
    );

    let (text, style) = result_line(round);
    let paragraph = Paragraph::new(Text::from(vec![
        Line::raw(""),
        Line::raw(""),
        Line::from(Span::styled(text, style)),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::NONE));
    frame.render_widget(paragraph, result_area);
}

fn render_hand(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    sign: Option<HandSign>,
    side: Side,
    highlighted: bool,
) {
    let border_style = if highlighted {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let border_type = if highlighted {
        BorderType::Double
    } else {
        BorderType::Rounded
    };

    let mut lines = vec![
        Line::raw(""),
        Line::raw(""),
        Line::from(hand_glyph(sign, side)),
    ];
    if let Some(sign) = sign {
        lines.push(Line::from(Span::styled(
            sign.name(),
            Style::default().fg(Color::Gray),
        )));
    }

    let paragraph = Paragraph::new(Text::from(lines))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(border_type)
                .border_style(border_style)
                .title(format!(" {title} ")),
        );
    frame.render_widget(paragraph, area);
}

/// Glyph for a hand slot; placeholders when no round is on screen.
pub fn hand_glyph(sign: Option<HandSign>, side: Side) -> &'static str {
    match (sign, side) {
        (Some(sign), _) => sign.glyph(),
        (None, Side::Player) => PLAYER_PLACEHOLDER,
        (None, Side::Computer) => COMPUTER_PLACEHOLDER,
    }
}

pub fn winner(outcome: RoundOutcome) -> Option<Side> {
    match outcome {
        RoundOutcome::PlayerWins => Some(Side::Player),
        RoundOutcome::ComputerWins => Some(Side::Computer),
        RoundOutcome::Draw => None,
    }
}

/// Result text and its style.
pub fn result_line(round: Option<&RoundResult>) -> (&'static str, Style) {
    let Some(round) = round else {
        return (
            NEUTRAL_TEXT,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        );
    };
    let color = match round.outcome {
        RoundOutcome::PlayerWins => Color::Green,
        RoundOutcome::ComputerWins => Color::Red,
        RoundOutcome::Draw => Color::Cyan,
    };
    (
        round.outcome.message(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
