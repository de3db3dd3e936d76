// TUI widget modules for each dashboard panel.

pub mod arena;
pub mod labels;
pub mod preview;
pub mod quit_confirm;
pub mod round_log;
pub mod status_bar;
