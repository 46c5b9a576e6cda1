pub mod config;
pub mod fold;
pub mod render;
pub mod snapshot;
pub mod state;
pub mod timestamp;

use std::collections::HashMap;
use std::path::Path;

use chrono::Utc;
use tracing::{debug, info};

use crate::render::Format;
use crate::snapshot::Snapshot;

/// Run the full pipeline for one invocation: fold both logs, assemble the
/// snapshot, and render it with the requested format.
///
/// `args` are the positional CLI arguments:
/// `<event-log-path> <intent-log-path> [format]`.
///
/// Returns `None` on the silent no-op paths (fewer than two arguments, or a
/// missing event log) — the caller writes nothing to stdout in that case.
pub fn generate(args: &[String]) -> Option<String> {
    if args.len() < 2 {
        debug!("usage: <event-log-path> <intent-log-path> [format]");
        return None;
    }

    let event_log = Path::new(&args[0]);
    let intent_log = Path::new(&args[1]);
    if !event_log.exists() {
        debug!(path = %event_log.display(), "event log missing, nothing to render");
        return None;
    }

    let regimes = fold::regime::fold_regime_log(event_log);
    let intents = if intent_log.exists() {
        fold::intent::fold_intent_log(intent_log)
    } else {
        HashMap::new()
    };

    let symbols = snapshot::union_symbols(&regimes, &intents);
    info!(symbols = symbols.len(), "assembling snapshot");

    let snapshot = Snapshot {
        generated_at: Utc::now().to_rfc3339(),
        entries: snapshot::assemble_entries(&symbols, &regimes, &intents),
    };

    let format = args
        .get(2)
        .map_or(Format::Terminal, |arg| Format::from_arg(arg));
    Some(render::render(format, &snapshot))
}
