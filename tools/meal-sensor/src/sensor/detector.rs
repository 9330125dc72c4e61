//! Hysteresis meal detector.
//!
//! A meal starts when the raw sample reaches `start_threshold` and ends when
//! it drops below `end_threshold`. Samples in between never toggle the state.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Detector thresholds, in raw ADC units (12-bit reading)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Sample at or above this starts a meal
    pub start_threshold: u16,
    /// Sample below this ends a meal
    pub end_threshold: u16,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            start_threshold: 3000,
            end_threshold: 2000,
        }
    }
}

impl DetectorConfig {
    pub fn validate(&self) -> Result<(), DetectorError> {
        if self.end_threshold > self.start_threshold {
            return Err(DetectorError::InvertedThresholds {
                start: self.start_threshold,
                end: self.end_threshold,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DetectorError {
    #[error("end threshold {end} is above start threshold {start}")]
    InvertedThresholds { start: u16, end: u16 },
}

/// Transition reported to the monitor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MealEvent {
    Start,
    End,
}

impl MealEvent {
    /// Monitor endpoint path for this event, without the leading slash
    pub fn path(&self) -> &'static str {
        match self {
            MealEvent::Start => "mealStart",
            MealEvent::End => "mealEnd",
        }
    }
}

impl fmt::Display for MealEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Two-threshold state machine over raw samples
#[derive(Debug, Clone)]
pub struct MealDetector {
    config: DetectorConfig,
    in_progress: bool,
}

impl MealDetector {
    pub fn new(config: DetectorConfig) -> Result<Self, DetectorError> {
        config.validate()?;
        Ok(Self {
            config,
            in_progress: false,
        })
    }

    /// Feed one sample; returns the transition it caused, if any.
    pub fn observe(&mut self, sample: u16) -> Option<MealEvent> {
        if !self.in_progress && sample >= self.config.start_threshold {
            self.in_progress = true;
            Some(MealEvent::Start)
        } else if self.in_progress && sample < self.config.end_threshold {
            self.in_progress = false;
            Some(MealEvent::End)
        } else {
            None
        }
    }

    pub fn in_progress(&self) -> bool {
        self.in_progress
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }
}
