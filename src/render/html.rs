use super::rationale_lines;
use crate::snapshot::Snapshot;

pub(super) fn render(snapshot: &Snapshot) -> String {
    let mut out = String::new();
    out.push_str("<!doctype html>\n");
    out.push_str("<html lang=\"en\">\n");
    out.push_str("<head>\n");
    out.push_str("  <meta charset=\"utf-8\">\n");
    out.push_str("  <title>synthdesk snapshot</title>\n");
    out.push_str("</head>\n");
    out.push_str("<body>\n");
    out.push_str(&format!(
        "  <h1>synthdesk snapshot (utc): {}</h1>\n\n",
        escape(&snapshot.generated_at)
    ));
    for entry in &snapshot.entries {
        out.push_str("  <section>\n");
        out.push_str(&format!("    <h2>{}</h2>\n", escape(&entry.symbol)));
        out.push_str("    <ul>\n");
        out.push_str(&format!(
            "      <li><strong>regime:</strong> {} @ {}</li>\n",
            escape(&entry.regime),
            escape(&entry.regime_ts)
        ));
        out.push_str(&format!(
            "      <li><strong>last regime change:</strong> {}</li>\n",
            escape(&entry.change)
        ));
        out.push_str(&format!(
            "      <li><strong>posture:</strong> {} / {} / size={}</li>\n",
            escape(&entry.direction),
            escape(&entry.risk_cap),
            escape(&entry.size_pct)
        ));
        out.push_str("    </ul>\n\n");
        out.push_str("    <strong>rationale:</strong>\n");
        out.push_str("    <ul>\n");
        for line in rationale_lines(entry.rationale.as_ref()) {
            out.push_str(&format!("      <li>{}</li>\n", escape(&line)));
        }
        out.push_str("    </ul>\n");
        out.push_str("  </section>\n");
    }
    out.push_str("</body>\n");
    out.push_str("</html>\n");
    out
}

/// Entity-supplied text is untrusted; everything interpolated into the
/// document goes through here.
fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
