use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::state::observations::IntentObservation;
use crate::timestamp::{is_newer, is_valid_timestamp};

/// Fold the router-intent log into per-symbol latest posture.
///
/// Same boundary policy as the regime fold: an unreadable log contributes
/// an empty map, never a fatal error.
pub fn fold_intent_log(path: &Path) -> HashMap<String, IntentObservation> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) => {
            debug!(path = %path.display(), error = %err, "intent log unreadable, folding nothing");
            return HashMap::new();
        }
    };

    match fold_intent_lines(BufReader::new(file)) {
        Ok(folded) => {
            debug!(path = %path.display(), symbols = folded.len(), "router intents folded");
            folded
        }
        Err(err) => {
            debug!(path = %path.display(), error = %err, "intent log read failed, folding nothing");
            HashMap::new()
        }
    }
}

/// Line-level fold over intent records.
///
/// Records arrive in two shapes, so two lookups run in fixed priority
/// order (a contract, not a heuristic):
/// - intent body: the record's `payload` field first, then `intent`;
///   the first object-shaped one wins.
/// - symbol: the record's top-level `symbol` first, then `symbol` inside
///   the intent body.
///
/// The retained fields are opaque display data, copied verbatim with no
/// value validation. Recency is tracked per symbol in an auxiliary
/// timestamp map, strict `>` as everywhere.
pub fn fold_intent_lines(reader: impl BufRead) -> io::Result<HashMap<String, IntentObservation>> {
    let mut latest_intent: HashMap<String, IntentObservation> = HashMap::new();
    let mut latest_ts: HashMap<String, String> = HashMap::new();

    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let Ok(record) = serde_json::from_str::<Value>(&line) else {
            continue;
        };
        let Some(record) = record.as_object() else {
            continue;
        };
        let Some(timestamp) = record
            .get("timestamp")
            .filter(|ts| is_valid_timestamp(ts))
            .and_then(Value::as_str)
        else {
            continue;
        };
        let Some(intent) = record
            .get("payload")
            .and_then(Value::as_object)
            .or_else(|| record.get("intent").and_then(Value::as_object))
        else {
            continue;
        };
        let Some(symbol) = record
            .get("symbol")
            .and_then(Value::as_str)
            .or_else(|| intent.get("symbol").and_then(Value::as_str))
        else {
            continue;
        };

        if !is_newer(timestamp, latest_ts.get(symbol).map(String::as_str)) {
            continue;
        }
        latest_ts.insert(symbol.to_string(), timestamp.to_string());
        latest_intent.insert(
            symbol.to_string(),
            IntentObservation {
                direction: intent.get("direction").cloned(),
                size_pct: intent.get("size_pct").cloned(),
                risk_cap: intent.get("risk_cap").cloned(),
                rationale: intent.get("rationale").cloned(),
            },
        );
    }

    Ok(latest_intent)
}
