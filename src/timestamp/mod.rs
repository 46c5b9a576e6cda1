use serde_json::Value;

/// True when the value is a string usable for lexicographic "latest wins"
/// ordering: it contains the ISO-8601 date/time separator and carries an
/// explicit UTC marker (`Z` or `+00:00`).
///
/// No timezone conversion and no numeric parsing happen anywhere in this
/// crate: ordering correctness relies on upstream producers emitting
/// fixed-width, zero-padded ISO-8601 UTC strings, which sort chronologically
/// as plain strings. That is a documented assumption, not a computed
/// guarantee.
pub fn is_valid_timestamp(value: &Value) -> bool {
    let Some(ts) = value.as_str() else {
        return false;
    };
    ts.contains('T') && (ts.ends_with('Z') || ts.ends_with("+00:00"))
}

/// True when `candidate` should replace the current best observation:
/// either no best exists yet, or the candidate sorts strictly greater.
///
/// Strict `>` means an identical timestamp never replaces what is already
/// retained — on a tie, the first record encountered in file order wins.
pub fn is_newer(candidate: &str, current: Option<&str>) -> bool {
    match current {
        None => true,
        Some(best) => candidate > best,
    }
}
