//! The meal status record and its wire format.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Wire format for `start_time` / `end_time`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Duration shown before any meal has been measured.
pub const DEFAULT_DURATION: &str = "0分";

/// Whether a meal is currently in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MealState {
    #[default]
    #[serde(rename = "食事未検出")]
    NotDetected,
    #[serde(rename = "食事中")]
    InProgress,
}

impl MealState {
    /// Label used in JSON and on the dashboard.
    pub fn label(&self) -> &'static str {
        match self {
            MealState::NotDetected => "食事未検出",
            MealState::InProgress => "食事中",
        }
    }

    /// CSS class for the dashboard status indicator.
    pub fn css_class(&self) -> &'static str {
        match self {
            MealState::NotDetected => "not-eating",
            MealState::InProgress => "eating",
        }
    }
}

impl fmt::Display for MealState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Current (or last) meal record.
///
/// Timestamps are local wall-clock times truncated to whole seconds, so the
/// stored value is exactly what gets serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealStatus {
    pub status: MealState,
    #[serde(with = "timestamp_format")]
    pub start_time: Option<NaiveDateTime>,
    #[serde(with = "timestamp_format")]
    pub end_time: Option<NaiveDateTime>,
    pub duration: String,
}

impl Default for MealStatus {
    fn default() -> Self {
        Self {
            status: MealState::NotDetected,
            start_time: None,
            end_time: None,
            duration: DEFAULT_DURATION.to_string(),
        }
    }
}

impl MealStatus {
    /// `start_time` formatted for display, if present.
    pub fn start_time_display(&self) -> Option<String> {
        self.start_time
            .map(|t| t.format(TIMESTAMP_FORMAT).to_string())
    }

    /// `end_time` formatted for display, if present.
    pub fn end_time_display(&self) -> Option<String> {
        self.end_time.map(|t| t.format(TIMESTAMP_FORMAT).to_string())
    }

    pub fn is_in_progress(&self) -> bool {
        self.status == MealState::InProgress
    }
}

/// Format an elapsed time as `"{minutes}分{seconds}秒"`.
///
/// Minutes are not wrapped at 60. Negative spans (clock moved backwards)
/// count as zero.
pub fn format_duration(elapsed: chrono::Duration) -> String {
    let secs = elapsed.num_seconds().max(0);
    format!("{}分{}秒", secs / 60, secs % 60)
}

/// Serde adapter for `Option<NaiveDateTime>` as `"YYYY-MM-DD HH:MM:SS"` or null.
mod timestamp_format {
    use super::TIMESTAMP_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(t) => serializer.serialize_str(&t.format(TIMESTAMP_FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        raw.map(|s| {
            NaiveDateTime::parse_from_str(s.trim(), TIMESTAMP_FORMAT)
                .map_err(serde::de::Error::custom)
        })
        .transpose()
    }
}
