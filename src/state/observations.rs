use serde::Serialize;
use serde_json::Value;

/// Latest regime label observed for a symbol.
/// Stores only the display fields — no redundant full-event clone.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RegimeObservation {
    pub timestamp: String,
    pub regime: String,
    /// Carried verbatim, and only when the key was present in the payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Value>,
}

/// Latest regime transition observed for a symbol.
/// Tracked independently of [`RegimeObservation`] recency.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RegimeChangeObservation {
    pub timestamp: String,
    pub from: String,
    pub to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Value>,
}

/// Merged per-symbol output of the regime fold.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RegimeState {
    pub regime: RegimeObservation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change: Option<RegimeChangeObservation>,
}

/// Latest trading posture observed for a symbol.
///
/// All fields are opaque display data copied verbatim from the intent
/// payload — absent keys stay `None`, present values keep whatever JSON
/// shape upstream wrote.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct IntentObservation {
    pub direction: Option<Value>,
    pub size_pct: Option<Value>,
    pub risk_cap: Option<Value>,
    pub rationale: Option<Value>,
}
