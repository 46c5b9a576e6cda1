use super::rationale_lines;
use crate::snapshot::Snapshot;

pub(super) fn render(snapshot: &Snapshot) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "# synthdesk snapshot (utc): {}\n\n",
        snapshot.generated_at
    ));
    for entry in &snapshot.entries {
        out.push_str(&format!("## {}\n\n", entry.symbol));
        out.push_str(&format!(
            "- **regime:** {} @ {}\n",
            entry.regime, entry.regime_ts
        ));
        out.push_str(&format!("- **last regime change:** {}\n", entry.change));
        out.push_str(&format!(
            "- **posture:** {} / {} / size={}\n\n",
            entry.direction, entry.risk_cap, entry.size_pct
        ));
        out.push_str("**rationale:**\n");
        for line in rationale_lines(entry.rationale.as_ref()) {
            out.push_str(&format!("- {line}\n"));
        }
        out.push('\n');
    }
    out
}
