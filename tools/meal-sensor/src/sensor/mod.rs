//! Sensor side: turns raw analog samples into meal start/end events and
//! reports them to the monitor over HTTP.

pub mod detector;
pub mod reporter;

pub use detector::{DetectorConfig, DetectorError, MealDetector, MealEvent};
pub use reporter::{EventSink, HttpReporter, ReporterError};
