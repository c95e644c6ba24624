//! Test-data generation and the fixture catalog used by the suites.
//!
//! Randomness flows through an explicit [`DataGen`] handle so suites that
//! need determinism can seed it; nothing here touches a process-global RNG.

pub mod fixtures;
mod generator;
mod stamp;

pub use generator::*;
pub use stamp::*;
