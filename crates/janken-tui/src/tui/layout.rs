// Screen layout: panel arrangement and sizing.
//
// +--------------------------------------------------+
// | Status Bar (1 row)                                |
// +--------------------------------------------------+
// | Arena: you | result | computer (9 rows)           |
// +----------------+----------------+----------------+
// | Camera (35%)   | Labels (30%)   | Rounds (35%)   |
// +----------------+----------------+----------------+
// | Help Bar (1 row)                                  |
// +--------------------------------------------------+

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Resolved screen areas for each dashboard zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    /// Top row: status text and session tally.
    pub status_bar: Rect,
    /// Player hand, result text, computer hand.
    pub arena: Rect,
    /// Capture preview panel.
    pub preview: Rect,
    /// Per-class debug labels.
    pub labels: Rect,
    /// Recent rounds.
    pub round_log: Rect,
    /// Bottom row: keyboard shortcut hints.
    pub help_bar: Rect,
}

pub fn build_layout(area: Rect) -> AppLayout {
    // Vertical: status(1) | arena(9) | panels(fill) | help(1)
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status bar
            Constraint::Length(9), // arena
            Constraint::Min(5),    // lower panels
            Constraint::Length(1), // help bar
        ])
        .split(area);

    let status_bar = vertical[0];
    let arena = vertical[1];
    let lower = vertical[2];
    let help_bar = vertical[3];

    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(35),
            Constraint::Percentage(30),
            Constraint::Percentage(35),
        ])
        .split(lower);

    AppLayout {
        status_bar,
        arena,
        preview: panels[0],
        labels: panels[1],
        round_log: panels[2],
        help_bar,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn test_area() -> Rect {
        Rect::new(0, 0, 120, 40)
    }

    fn all_rects(layout: &AppLayout) -> [(&'static str, Rect); 6] {
        [
            ("status_bar", layout.status_bar),
            ("arena", layout.arena),
            ("preview", layout.preview),
            ("labels", layout.labels),
            ("round_log", layout.round_log),
            ("help_bar", layout.help_bar),
        ]
    }

    #[test]
    fn layout_all_rects_nonzero() {
        let layout = build_layout(test_area());
        for (name, rect) in all_rects(&layout) {
            assert!(rect.width > 0, "{name} has zero width");
            assert!(rect.height > 0, "{name} has zero height");
        }
    }

    #[test]
    fn fixed_rows_have_expected_heights() {
        let layout = build_layout(test_area());
        assert_eq!(layout.status_bar.height, 1);
        assert_eq!(layout.arena.height, 9);
        assert_eq!(layout.help_bar.height, 1);
        assert_eq!(layout.help_bar.y, 39);
    }

    #[test]
    fn lower_panels_share_full_width() {
        let layout = build_layout(test_area());
        let total = layout.preview.width + layout.labels.width + layout.round_log.width;
        assert_eq!(total, 120);
        assert_eq!(layout.preview.y, layout.labels.y);
        assert_eq!(layout.labels.y, layout.round_log.y);
    }

    #[test]
    fn rects_do_not_overlap() {
        let layout = build_layout(test_area());
        let rects = all_rects(&layout);
        for (i, (name_a, a)) in rects.iter().enumerate() {
            for (name_b, b) in rects.iter().skip(i + 1) {
                assert!(!a.intersects(*b), "{name_a} overlaps {name_b}");
            }
        }
    }
}
