//! Dashboard page rendering.
//!
//! The page is a static asset; only the initial values are filled in here.
//! Live updates are done by the page polling `/status`.

use crate::domain::config::DashboardConfig;
use crate::domain::status::MealStatus;

const INDEX_TEMPLATE: &str = include_str!("../assets/index.html");

/// Shown for timestamps that are not set.
const PLACEHOLDER: &str = "-";

/// Render the dashboard with the given snapshot interpolated.
pub fn render_index(status: &MealStatus, config: &DashboardConfig) -> String {
    let start_time = status
        .start_time_display()
        .unwrap_or_else(|| PLACEHOLDER.to_string());
    let end_time = status
        .end_time_display()
        .unwrap_or_else(|| PLACEHOLDER.to_string());

    INDEX_TEMPLATE
        .replace("{{status_class}}", status.status.css_class())
        .replace("{{status}}", &escape_html(status.status.label()))
        .replace("{{start_time}}", &escape_html(&start_time))
        .replace("{{end_time}}", &escape_html(&end_time))
        .replace("{{duration}}", &escape_html(&status.duration))
        .replace("{{poll_interval_ms}}", &config.poll_interval_ms.to_string())
        .replace("{{alert_timeout_secs}}", &config.alert_timeout_secs.to_string())
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
