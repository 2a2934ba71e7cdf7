use crate::config::ReportConfig;
use crate::group::by_group;
use portmap_protocol::{Assessment, Status};

fn legend(status: Status) -> &'static str {
    match status {
        Status::Implemented => "a real implementation exists in the target tree",
        Status::Planned => "missing, or still a placeholder skeleton",
        Status::Subset => "ported with a reduced feature set",
        Status::Unsupported => "no sensible equivalent on the target platform",
    }
}

/// Full status matrix: every source declaration, one section per group.
pub fn render_matrix(assessments: &[Assessment], config: &ReportConfig, root_package: &str) -> String {
    let mut md = String::new();
    md.push_str(&format!("# {}\n\n", config.title));
    md.push_str(&format!(
        "Generated from the public top-level declarations under `{root_package}` ({} total), \
         matched against the target source tree.\n\n",
        assessments.len()
    ));

    md.push_str("Legend:\n\n");
    for status in Status::ALL {
        md.push_str(&format!("- {} {}: {}\n", status.glyph(), status.label(), legend(status)));
    }
    md.push('\n');

    for (group, entries) in by_group(assessments) {
        if group.is_empty() {
            md.push_str(&format!("## Root package `{root_package}`\n\n"));
        } else {
            md.push_str(&format!("## `{group}`\n\n"));
        }
        for entry in entries {
            md.push_str(&format!("- {} {}", entry.status.glyph(), entry.source.name));
            if let Some(best) = &entry.best {
                md.push_str(&format!(" → `{}`", best.fqcn()));
            }
            md.push('\n');
        }
        md.push('\n');
    }

    let mut out = md.trim_end().to_string();
    out.push('\n');
    out
}
