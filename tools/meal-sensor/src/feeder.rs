//! Sample feeder: reads raw readings line by line, runs them through the
//! detector and forwards each transition to an event sink.

use crate::sensor::{EventSink, MealDetector, MealEvent};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{info, warn};

/// Outcome counters for one feeder run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FeedSummary {
    pub samples: u64,
    pub skipped: u64,
    pub reported: u64,
    pub failed: u64,
}

/// Parse one input line into a sample. Blank lines and `#` comments are `None`.
pub fn parse_sample(line: &str) -> Option<Result<u16, std::num::ParseIntError>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    Some(line.parse())
}

/// Feed every line of `input` into `detector`.
///
/// With no sink (dry run) transitions are only logged. A failed delivery is
/// logged and counted; the run continues with the next sample.
pub async fn feed<R>(
    input: R,
    detector: &mut MealDetector,
    sink: Option<&dyn EventSink>,
) -> std::io::Result<FeedSummary>
where
    R: AsyncBufRead + Unpin,
{
    let mut summary = FeedSummary::default();
    let mut lines = input.lines();
    let mut line_no = 0u64;

    while let Some(line) = lines.next_line().await? {
        line_no += 1;
        let sample = match parse_sample(&line) {
            None => continue,
            Some(Ok(sample)) => sample,
            Some(Err(e)) => {
                warn!(line = line_no, input = %line.trim(), error = %e, "Skipping invalid sample");
                summary.skipped += 1;
                continue;
            }
        };
        summary.samples += 1;

        if let Some(event) = detector.observe(sample) {
            report(event, sample, sink, &mut summary).await;
        }
    }

    Ok(summary)
}

async fn report(
    event: MealEvent,
    sample: u16,
    sink: Option<&dyn EventSink>,
    summary: &mut FeedSummary,
) {
    info!(event = %event, sample, "Detected meal transition");

    let Some(sink) = sink else {
        return;
    };

    match sink.send(event).await {
        Ok(reply) => {
            summary.reported += 1;
            info!(event = %event, reply = %reply, "Reported to monitor");
        }
        Err(e) => {
            summary.failed += 1;
            warn!(event = %event, error = %e, "Failed to report to monitor");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use crate::sensor::{DetectorConfig, ReporterError};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSink {
        events: Mutex<Vec<MealEvent>>,
        fail: bool,
    }

    #[async_trait]
    impl EventSink for RecordingSink {
        async fn send(&self, event: MealEvent) -> Result<String, ReporterError> {
            self.events.lock().unwrap().push(event);
            if self.fail {
                Err(ReporterError::Connection("down".to_string()))
            } else {
                Ok("ok".to_string())
            }
        }
    }

    fn detector() -> MealDetector {
        MealDetector::new(DetectorConfig::default()).unwrap()
    }

    #[test]
    fn test_parse_sample() {
        assert_eq!(parse_sample(" 3100 "), Some(Ok(3100)));
        assert!(parse_sample("").is_none());
        assert!(parse_sample("# calibration").is_none());
        assert!(matches!(parse_sample("abc"), Some(Err(_))));
        assert!(matches!(parse_sample("70000"), Some(Err(_))));
    }

    #[tokio::test]
    async fn test_feed_reports_transitions() {
        let input: &[u8] = b"1000\n3100\n2500\nbogus\n\n1500\n";
        let sink = RecordingSink::default();
        let mut d = detector();

        let summary = feed(input, &mut d, Some(&sink)).await.unwrap();

        assert_eq!(
            *sink.events.lock().unwrap(),
            vec![MealEvent::Start, MealEvent::End]
        );
        assert_eq!(
            summary,
            FeedSummary {
                samples: 4,
                skipped: 1,
                reported: 2,
                failed: 0
            }
        );
    }

    #[tokio::test]
    async fn test_feed_continues_after_failed_delivery() {
        let input: &[u8] = b"3100\n100\n3100\n";
        let sink = RecordingSink {
            fail: true,
            ..Default::default()
        };
        let mut d = detector();

        let summary = feed(input, &mut d, Some(&sink)).await.unwrap();
        assert_eq!(sink.events.lock().unwrap().len(), 3);
        assert_eq!(summary.failed, 3);
        assert!(d.in_progress());
    }

    #[tokio::test]
    async fn test_dry_run_only_tracks_state() {
        let input: &[u8] = b"3100\n";
        let mut d = detector();
        let summary = feed(input, &mut d, None).await.unwrap();
        assert_eq!(summary.reported, 0);
        assert!(d.in_progress());
    }
}
