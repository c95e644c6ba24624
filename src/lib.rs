//! PageProbe CLI library: configuration loading and the built-in probe
//! flows the binary runs against the scripted page engine.

pub mod config;
pub mod flows;

pub use config::ProbeConfig;
pub use flows::{FlowReport, StepOutcome};
