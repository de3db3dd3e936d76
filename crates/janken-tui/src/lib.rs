// Library root: terminal front end and the keyboard stand-in rig, exposed so
// the binary and tests share them.

pub mod command;
pub mod rig;
pub mod tui;
