use crate::config::ReportConfig;
use crate::group::{by_group, group_label};
use portmap_protocol::{Assessment, Status, StatusCounts};

/// Generated gap section, sentinel markers included. Always ends with a
/// newline after the end marker.
pub fn render_gap_section(assessments: &[Assessment], config: &ReportConfig) -> String {
    let totals = StatusCounts::tally(assessments.iter().map(|a| &a.status));
    let groups = by_group(assessments);

    let mut md = String::new();
    md.push_str(&config.begin_marker);
    md.push_str("\n\n");
    md.push_str("## Migration gaps (generated)\n\n");

    md.push_str(&format!("- Declarations: {}\n", totals.total()));
    for status in Status::ALL {
        md.push_str(&format!(
            "- {} {}: {}\n",
            status.glyph(),
            status.label(),
            totals.get(status)
        ));
    }
    md.push('\n');

    md.push_str("### By package\n\n");
    md.push_str("| package |");
    for status in Status::ALL {
        md.push_str(&format!(" {} |", status.glyph()));
    }
    md.push_str(" total |\n");
    md.push_str("|---|---:|---:|---:|---:|---:|\n");
    // "(root)" sorts ahead of every package name, so key order is row order.
    for (group, entries) in &groups {
        let counts = StatusCounts::tally(entries.iter().map(|a| &a.status));
        md.push_str(&format!("| {} |", group_label(group)));
        for status in Status::ALL {
            md.push_str(&format!(" {} |", counts.get(status)));
        }
        md.push_str(&format!(" {} |\n", counts.total()));
    }
    md.push('\n');

    md.push_str("### Not yet implemented\n\n");
    let mut open: Vec<&Assessment> = assessments
        .iter()
        .filter(|a| a.status != Status::Implemented)
        .collect();
    open.sort_by(|a, b| {
        (&a.source.group, a.status, &a.source.name).cmp(&(&b.source.group, b.status, &b.source.name))
    });
    if open.is_empty() {
        md.push_str("- none\n");
    }
    for entry in open {
        let group = if entry.source.group.is_empty() {
            "root"
        } else {
            entry.source.group.as_str()
        };
        md.push_str(&format!(
            "- {} {group}.{}\n",
            entry.status.glyph(),
            entry.source.name
        ));
    }
    md.push('\n');

    md.push_str(&config.end_marker);
    md.push('\n');
    md
}
