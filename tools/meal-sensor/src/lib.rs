//! Meal sensor feeder library.
//!
//! The detector turns raw analog samples into meal start/end events, the
//! reporter delivers them to a meal-monitor server, and the feeder drives
//! both from a line-oriented sample stream.

pub mod feeder;
pub mod sensor;

pub use feeder::{feed, parse_sample, FeedSummary};
