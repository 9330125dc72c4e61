//! Ports (hexagonal architecture boundaries).

pub mod outbound;

pub use outbound::{ManualTimeSource, SystemTimeSource, TimeSource};
