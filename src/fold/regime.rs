use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::state::observations::{RegimeChangeObservation, RegimeObservation, RegimeState};
use crate::timestamp::{is_newer, is_valid_timestamp};

const EVENT_REGIME: &str = "market.regime";
const EVENT_REGIME_CHANGE: &str = "market.regime_change";

/// Fold the event-spine log into per-symbol latest regime state.
///
/// An unreadable log (missing, permission, mid-stream read failure) folds
/// to an empty map — "no regime data", never a fatal error.
pub fn fold_regime_log(path: &Path) -> HashMap<String, RegimeState> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) => {
            debug!(path = %path.display(), error = %err, "event log unreadable, folding nothing");
            return HashMap::new();
        }
    };

    match fold_regime_lines(BufReader::new(file)) {
        Ok(folded) => {
            debug!(path = %path.display(), symbols = folded.len(), "event spine folded");
            folded
        }
        Err(err) => {
            debug!(path = %path.display(), error = %err, "event log read failed, folding nothing");
            HashMap::new()
        }
    }
}

/// Line-level fold, separated from file I/O so the record semantics are
/// testable against in-memory streams.
///
/// Each line is handled independently: blank lines, unparseable lines, and
/// records failing the shape checks are skipped without aborting the stream.
/// Latest-wins replacement is strict `>` on the timestamp string, tracked
/// separately for `market.regime` and `market.regime_change`.
pub fn fold_regime_lines(reader: impl BufRead) -> io::Result<HashMap<String, RegimeState>> {
    let mut latest_regime: HashMap<String, RegimeObservation> = HashMap::new();
    let mut latest_change: HashMap<String, RegimeChangeObservation> = HashMap::new();

    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let Ok(event) = serde_json::from_str::<Value>(&line) else {
            continue;
        };
        let Some(event) = event.as_object() else {
            continue;
        };
        let Some(event_type) = event.get("event_type").and_then(Value::as_str) else {
            continue;
        };
        if event_type != EVENT_REGIME && event_type != EVENT_REGIME_CHANGE {
            continue;
        }
        let Some(timestamp) = event
            .get("timestamp")
            .filter(|ts| is_valid_timestamp(ts))
            .and_then(Value::as_str)
        else {
            continue;
        };
        let Some(payload) = event.get("payload").and_then(Value::as_object) else {
            continue;
        };
        let Some(symbol) = payload.get("symbol").and_then(Value::as_str) else {
            continue;
        };

        if event_type == EVENT_REGIME {
            let Some(regime) = payload.get("regime").and_then(Value::as_str) else {
                continue;
            };
            let current = latest_regime.get(symbol).map(|obs| obs.timestamp.as_str());
            if !is_newer(timestamp, current) {
                continue;
            }
            latest_regime.insert(
                symbol.to_string(),
                RegimeObservation {
                    timestamp: timestamp.to_string(),
                    regime: regime.to_string(),
                    confidence: payload.get("confidence").cloned(),
                },
            );
        } else {
            let Some(from) = payload.get("from").and_then(Value::as_str) else {
                continue;
            };
            let Some(to) = payload.get("to").and_then(Value::as_str) else {
                continue;
            };
            let current = latest_change.get(symbol).map(|obs| obs.timestamp.as_str());
            if !is_newer(timestamp, current) {
                continue;
            }
            latest_change.insert(
                symbol.to_string(),
                RegimeChangeObservation {
                    timestamp: timestamp.to_string(),
                    from: from.to_string(),
                    to: to.to_string(),
                    confidence: payload.get("confidence").cloned(),
                },
            );
        }
    }

    // Merge keyed on regime observations; a change observation with no
    // matching regime observation does not survive the merge.
    let mut folded = HashMap::new();
    for (symbol, regime) in latest_regime {
        let change = latest_change.remove(&symbol);
        folded.insert(symbol, RegimeState { regime, change });
    }
    Ok(folded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn fold(log: &str) -> HashMap<String, RegimeState> {
        fold_regime_lines(Cursor::new(log)).unwrap()
    }

    #[test]
    fn latest_regime_wins() {
        let log = concat!(
            r#"{"event_type":"market.regime","timestamp":"2024-01-01T00:00:00Z","payload":{"symbol":"ABC","regime":"trend"}}"#,
            "\n",
            r#"{"event_type":"market.regime","timestamp":"2024-01-01T01:00:00Z","payload":{"symbol":"ABC","regime":"chop"}}"#,
            "\n",
        );
        let folded = fold(log);
        let state = &folded["ABC"];
        assert_eq!(state.regime.regime, "chop");
        assert_eq!(state.regime.timestamp, "2024-01-01T01:00:00Z");
        assert!(state.change.is_none());
    }

    #[test]
    fn fold_is_insensitive_to_line_order_for_distinct_timestamps() {
        let a = r#"{"event_type":"market.regime","timestamp":"2024-01-01T00:00:00Z","payload":{"symbol":"ABC","regime":"trend"}}"#;
        let b = r#"{"event_type":"market.regime","timestamp":"2024-01-01T01:00:00Z","payload":{"symbol":"ABC","regime":"chop"}}"#;
        let forward = fold(&format!("{a}\n{b}\n"));
        let backward = fold(&format!("{b}\n{a}\n"));
        assert_eq!(forward, backward);
        assert_eq!(forward["ABC"].regime.regime, "chop");
    }

    #[test]
    fn identical_timestamps_keep_the_first_record() {
        // Strict `>` comparison: an equal timestamp never replaces the
        // record already retained.
        let log = concat!(
            r#"{"event_type":"market.regime","timestamp":"2024-01-01T00:00:00Z","payload":{"symbol":"ABC","regime":"trend"}}"#,
            "\n",
            r#"{"event_type":"market.regime","timestamp":"2024-01-01T00:00:00Z","payload":{"symbol":"ABC","regime":"chop"}}"#,
            "\n",
        );
        assert_eq!(fold(log)["ABC"].regime.regime, "trend");
    }

    #[test]
    fn malformed_and_blank_lines_do_not_abort_the_stream() {
        let log = concat!(
            "\n",
            "{\"event_type\":\"market.regime\",\"timestamp\":\"2024-01-01T00:0", // truncated
            "\n",
            "not json at all\n",
            "[1,2,3]\n",
            r#"{"event_type":"market.regime","timestamp":"2024-01-01T02:00:00Z","payload":{"symbol":"XYZ","regime":"vol"}}"#,
            "\n",
        );
        let folded = fold(log);
        assert_eq!(folded.len(), 1);
        assert_eq!(folded["XYZ"].regime.regime, "vol");
    }

    #[test]
    fn shape_failures_are_skipped_silently() {
        let log = concat!(
            // unrecognized event type
            r#"{"event_type":"market.tick","timestamp":"2024-01-01T00:00:00Z","payload":{"symbol":"ABC","regime":"trend"}}"#,
            "\n",
            // invalid timestamp (naive)
            r#"{"event_type":"market.regime","timestamp":"2024-01-01T00:00:00","payload":{"symbol":"ABC","regime":"trend"}}"#,
            "\n",
            // payload not an object
            r#"{"event_type":"market.regime","timestamp":"2024-01-01T00:00:00Z","payload":"trend"}"#,
            "\n",
            // symbol not a string
            r#"{"event_type":"market.regime","timestamp":"2024-01-01T00:00:00Z","payload":{"symbol":42,"regime":"trend"}}"#,
            "\n",
            // regime missing
            r#"{"event_type":"market.regime","timestamp":"2024-01-01T00:00:00Z","payload":{"symbol":"ABC"}}"#,
            "\n",
        );
        assert!(fold(log).is_empty());
    }

    #[test]
    fn change_recency_is_tracked_independently_of_regime() {
        let log = concat!(
            r#"{"event_type":"market.regime","timestamp":"2024-01-01T05:00:00Z","payload":{"symbol":"ABC","regime":"chop"}}"#,
            "\n",
            r#"{"event_type":"market.regime_change","timestamp":"2024-01-01T01:00:00Z","payload":{"symbol":"ABC","from":"trend","to":"chop"}}"#,
            "\n",
            r#"{"event_type":"market.regime_change","timestamp":"2024-01-01T02:00:00Z","payload":{"symbol":"ABC","from":"chop","to":"vol"}}"#,
            "\n",
        );
        let state = &fold(log)["ABC"];
        assert_eq!(state.regime.timestamp, "2024-01-01T05:00:00Z");
        let change = state.change.as_ref().unwrap();
        assert_eq!(change.from, "chop");
        assert_eq!(change.to, "vol");
        assert_eq!(change.timestamp, "2024-01-01T02:00:00Z");
    }

    #[test]
    fn change_without_regime_does_not_survive_the_merge() {
        let log = concat!(
            r#"{"event_type":"market.regime_change","timestamp":"2024-01-01T00:00:00Z","payload":{"symbol":"ORPHAN","from":"trend","to":"chop"}}"#,
            "\n",
        );
        assert!(fold(log).is_empty());
    }

    #[test]
    fn change_requires_both_from_and_to() {
        let log = concat!(
            r#"{"event_type":"market.regime","timestamp":"2024-01-01T00:00:00Z","payload":{"symbol":"ABC","regime":"trend"}}"#,
            "\n",
            r#"{"event_type":"market.regime_change","timestamp":"2024-01-01T01:00:00Z","payload":{"symbol":"ABC","from":"trend"}}"#,
            "\n",
        );
        assert!(fold(log)["ABC"].change.is_none());
    }

    #[test]
    fn confidence_is_carried_only_when_present() {
        let log = concat!(
            r#"{"event_type":"market.regime","timestamp":"2024-01-01T00:00:00Z","payload":{"symbol":"ABC","regime":"trend","confidence":0.8}}"#,
            "\n",
            r#"{"event_type":"market.regime","timestamp":"2024-01-01T00:00:00Z","payload":{"symbol":"XYZ","regime":"vol"}}"#,
            "\n",
        );
        let folded = fold(log);
        assert_eq!(
            folded["ABC"].regime.confidence,
            Some(serde_json::json!(0.8))
        );
        assert_eq!(folded["XYZ"].regime.confidence, None);
    }

    #[test]
    fn missing_file_folds_to_empty() {
        let folded = fold_regime_log(Path::new("/nonexistent/event_spine.jsonl"));
        assert!(folded.is_empty());
    }
}
