//! Formatting consumers of the assembled snapshot.
//!
//! Renderers are pure: they never alter entry order, compute derived
//! values, or re-interpret the placeholder token the assembler supplied.

mod html;
mod markdown;
mod terminal;

use serde_json::Value;

use crate::snapshot::{display_value, Snapshot, PLACEHOLDER};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Terminal,
    Markdown,
    Html,
}

impl Format {
    /// Unrecognized names fall back to plain terminal text.
    pub fn from_arg(arg: &str) -> Self {
        match arg {
            "markdown" => Self::Markdown,
            "html" => Self::Html,
            _ => Self::Terminal,
        }
    }
}

pub fn render(format: Format, snapshot: &Snapshot) -> String {
    match format {
        Format::Terminal => terminal::render(snapshot),
        Format::Markdown => markdown::render(snapshot),
        Format::Html => html::render(snapshot),
    }
}

/// One display line per rationale element when the value is a non-empty
/// array; a single placeholder line otherwise (absent, wrong shape, empty).
pub(crate) fn rationale_lines(rationale: Option<&Value>) -> Vec<String> {
    match rationale {
        Some(Value::Array(items)) if !items.is_empty() => {
            items.iter().map(display_value).collect()
        }
        _ => vec![PLACEHOLDER.to_string()],
    }
}
