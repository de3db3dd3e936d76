// TUI dashboard: layout, input handling, and widget rendering.
//
// The TUI owns a `ViewState` that mirrors what the round controller has
// published. The controller pushes `UiUpdate` messages over an mpsc channel;
// the TUI applies them to `ViewState` and re-renders at ~30 fps.

pub mod input;
pub mod layout;
pub mod widgets;

use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::info;

use janken_core::prediction::ClassScore;
use janken_core::protocol::{RoundResult, UiUpdate};
use janken_core::sign::{HandSign, RoundOutcome};

use crate::command::UserCommand;
use layout::{build_layout, AppLayout};

/// Rounds kept in the on-screen log.
pub const ROUND_LOG_CAPACITY: usize = 50;

// ---------------------------------------------------------------------------
// Supporting types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusKind {
    #[default]
    Info,
    Error,
}

/// Session win/loss/draw counts. Not persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tally {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

impl Tally {
    pub fn record(&mut self, outcome: RoundOutcome) {
        match outcome {
            RoundOutcome::PlayerWins => self.wins += 1,
            RoundOutcome::ComputerWins => self.losses += 1,
            RoundOutcome::Draw => self.draws += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.wins + self.losses + self.draws
    }
}

/// Capture preview metadata, present once the camera is mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewInfo {
    pub width: u32,
    pub height: u32,
    pub mirrored: bool,
}

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// TUI-local state that mirrors the round controller for rendering.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub status: String,
    pub status_kind: StatusKind,
    /// The round currently on screen; `None` shows the neutral "VS" arena.
    pub current_round: Option<RoundResult>,
    pub preview: Option<PreviewInfo>,
    /// Number of debug label rows, one per model class.
    pub label_slots: usize,
    /// Confidence a class must exceed to start a round, once known.
    pub accept_threshold: Option<f32>,
    /// Latest per-class scores.
    pub scores: Vec<ClassScore>,
    /// Frames classified so far.
    pub frames_scored: u64,
    /// Most recent first.
    pub round_log: Vec<RoundResult>,
    pub tally: Tally,
    /// Hand raised from the keyboard and when, for the preview panel.
    pub raised_hand: Option<(HandSign, Instant)>,
    pub confirm_quit: bool,
}

impl ViewState {
    pub fn new() -> Self {
        ViewState {
            status: "Starting...".to_string(),
            ..ViewState::default()
        }
    }
}

// ---------------------------------------------------------------------------
// UiUpdate processing
// ---------------------------------------------------------------------------

/// Apply a single UiUpdate to the ViewState.
pub fn apply_ui_update(state: &mut ViewState, update: UiUpdate) {
    match update {
        UiUpdate::Status(text) => {
            state.status = text;
            state.status_kind = StatusKind::Info;
        }
        UiUpdate::Error(text) => {
            state.status = text;
            state.status_kind = StatusKind::Error;
        }
        UiUpdate::PreviewMounted {
            width,
            height,
            mirrored,
        } => {
            state.preview = Some(PreviewInfo {
                width,
                height,
                mirrored,
            });
        }
        UiUpdate::LabelsInitialized { count, threshold } => {
            state.label_slots = count;
            state.accept_threshold = Some(threshold);
            state.scores.clear();
        }
        UiUpdate::Scores(scores) => {
            state.scores = scores;
            state.frames_scored += 1;
        }
        UiUpdate::RoundResolved(result) => {
            state.tally.record(result.outcome);
            state.round_log.insert(0, result.clone());
            state.round_log.truncate(ROUND_LOG_CAPACITY);
            state.current_round = Some(result);
        }
        UiUpdate::RoundReset => {
            state.current_round = None;
        }
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete dashboard frame.
pub fn render_frame(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area());

    widgets::status_bar::render(frame, layout.status_bar, state);
    widgets::arena::render(frame, layout.arena, state);
    widgets::preview::render(frame, layout.preview, state, Instant::now());
    widgets::labels::render(frame, layout.labels, state);
    widgets::round_log::render(frame, layout.round_log, state);
    render_help_bar(frame, &layout);

    if state.confirm_quit {
        widgets::quit_confirm::render(frame, frame.area(), state);
    }
}

fn render_help_bar(frame: &mut Frame, layout: &AppLayout) {
    let text = " r/g:Rock | s/c:Scissors | p:Paper | space:Lower hand | q:Quit";
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        text,
        Style::default().fg(Color::White).add_modifier(Modifier::DIM),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, layout.help_bar);
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop until the user quits.
///
/// The UI keeps running after the controller drops its sender (for example
/// after a setup failure) so the final status stays visible.
pub async fn run(
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    // Restore the terminal before the default hook prints the panic.
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = ratatui::restore();
        original_hook(panic_info);
    }));

    let mut view_state = ViewState::new();
    let mut event_stream = EventStream::new();

    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    // When the controller goes away we stop polling its channel so
    // tokio::select! never spins on a closed receiver.
    let mut ui_open = true;

    loop {
        tokio::select! {
            update = ui_rx.recv(), if ui_open => {
                match update {
                    Some(ui_update) => apply_ui_update(&mut view_state, ui_update),
                    None => {
                        info!("Controller channel closed");
                        ui_open = false;
                    }
                }
            }

            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if let Some(cmd) = input::handle_key(key_event, &mut view_state) {
                            let quit = cmd == UserCommand::Quit;
                            let _ = cmd_tx.send(cmd).await;
                            if quit {
                                break;
                            }
                        }
                    }
                    Some(Ok(_)) => {
                        // Mouse and resize events are picked up by the next render.
                    }
                    Some(Err(_)) | None => break,
                }
            }

            _ = render_tick.tick() => {
                terminal.draw(|frame| render_frame(frame, &view_state))?;
            }
        }
    }

    ratatui::restore();
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
