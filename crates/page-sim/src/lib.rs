//! Scripted in-memory stand-in for a real page-automation engine.
//!
//! Suites run hermetically against [`PageSim`]: a node table plus fault,
//! dialog, and side-effect scripts let tests reproduce the flaky-page
//! behaviors the toolkit exists to absorb. Faithful to the blocking dialog
//! model: a scripted click that opens a dialog does not return until the
//! dialog is resolved or the click deadline passes.

mod model;
mod sim;

pub use model::*;
pub use sim::*;
