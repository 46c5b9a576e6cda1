//! Join the two folds into a flat, render-ready entry list.
//!
//! This is the only place snapshot data is assembled; renderers consume
//! identical entries and must never compute, filter, or infer.

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;
use serde_json::Value;

use crate::state::observations::{IntentObservation, RegimeState};

/// Fixed token rendered for every absent field. Absence is represented,
/// never elided.
pub const PLACEHOLDER: &str = "—";

/// One symbol's row in the snapshot, with every display field already
/// resolved to a string (placeholder included). `rationale` is the one
/// exception: it passes through unvalidated, and renderers decide how to
/// lay it out.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SnapshotEntry {
    pub symbol: String,
    pub regime: String,
    pub regime_ts: String,
    pub change: String,
    pub direction: String,
    pub size_pct: String,
    pub risk_cap: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rationale: Option<Value>,
}

/// The assembled view: wall-clock generation time plus the ordered entries.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Snapshot {
    pub generated_at: String,
    pub entries: Vec<SnapshotEntry>,
}

/// Union of symbols seen by either fold, sorted lexicographically.
pub fn union_symbols(
    regimes: &HashMap<String, RegimeState>,
    intents: &HashMap<String, IntentObservation>,
) -> Vec<String> {
    let mut symbols: BTreeSet<&str> = regimes.keys().map(String::as_str).collect();
    symbols.extend(intents.keys().map(String::as_str));
    symbols.into_iter().map(str::to_string).collect()
}

/// Pure join over the fold outputs. Every symbol in `symbols` yields exactly
/// one entry, in the given order; no entry is ever dropped for missing data.
pub fn assemble_entries(
    symbols: &[String],
    regimes: &HashMap<String, RegimeState>,
    intents: &HashMap<String, IntentObservation>,
) -> Vec<SnapshotEntry> {
    symbols
        .iter()
        .map(|symbol| {
            let state = regimes.get(symbol);
            let (regime, regime_ts) = match state {
                Some(state) => (state.regime.regime.clone(), state.regime.timestamp.clone()),
                None => (PLACEHOLDER.to_string(), PLACEHOLDER.to_string()),
            };
            let change = match state.and_then(|state| state.change.as_ref()) {
                Some(change) => {
                    format!("{} -> {} @ {}", change.from, change.to, change.timestamp)
                }
                None => PLACEHOLDER.to_string(),
            };

            let intent = intents.get(symbol);
            let direction = display_or_placeholder(intent.and_then(|i| i.direction.as_ref()));
            let size_pct = display_or_placeholder(intent.and_then(|i| i.size_pct.as_ref()));
            let risk_cap = display_or_placeholder(intent.and_then(|i| i.risk_cap.as_ref()));
            let rationale = intent.and_then(|i| i.rationale.clone());

            SnapshotEntry {
                symbol: symbol.clone(),
                regime,
                regime_ts,
                change,
                direction,
                size_pct,
                risk_cap,
                rationale,
            }
        })
        .collect()
}

/// Display form for an opaque JSON value: strings render bare, everything
/// else as compact JSON.
pub(crate) fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn display_or_placeholder(value: Option<&Value>) -> String {
    value.map_or_else(|| PLACEHOLDER.to_string(), display_value)
}
