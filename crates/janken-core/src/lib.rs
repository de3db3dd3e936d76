// Library root: game rules, configuration, the collaborator seams, and the
// round controller that drives a capture -> classify -> judge -> reset cycle.

pub mod assets;
pub mod config;
pub mod controller;
pub mod device;
pub mod error;
pub mod prediction;
pub mod protocol;
pub mod sign;
