use crate::error::{ReportError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// What [`upsert_section`] did to the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The region between the markers was replaced.
    Replaced,
    /// No marker pair was found; the section was added at the end.
    Appended,
    /// The document already held exactly this section.
    Unchanged,
}

/// Offsets of `marker` on every line that holds nothing else but whitespace.
fn sentinel_lines<'a>(document: &'a str, marker: &'a str) -> impl Iterator<Item = usize> + 'a {
    let mut line_start = 0;
    document.split_inclusive('\n').filter_map(move |line| {
        let start = line_start;
        line_start += line.len();
        if line.trim() != marker {
            return None;
        }
        line.find(marker).map(|col| start + col)
    })
}

/// Marker-delimited region of `document`, markers inclusive.
///
/// The region closes at the first end line that has a begin line above it and
/// opens at the last such begin line, so a stray begin marker earlier in the
/// document never swallows the text after it.
fn marked_region(document: &str, begin: &str, end: &str) -> Option<(usize, usize)> {
    let (begin, end) = (begin.trim(), end.trim());
    let begins: Vec<usize> = sentinel_lines(document, begin).collect();
    sentinel_lines(document, end).find_map(|stop| {
        begins
            .iter()
            .rev()
            .find(|&&start| start < stop)
            .map(|&start| (start, stop + end.len()))
    })
}

/// Put `section` into `document` between `begin` and `end`.
///
/// Markers only count when they sit alone on a line. With both present (end
/// after begin) everything outside the region
/// is kept byte for byte; the section's trailing newline is dropped because
/// the text after the end marker already carries its own. Otherwise the
/// section is appended after a blank line.
pub fn merge_section(document: &str, section: &str, begin: &str, end: &str) -> String {
    if let Some((start, stop)) = marked_region(document, begin, end) {
        let body = section.strip_suffix('\n').unwrap_or(section);
        let mut out = String::with_capacity(document.len() - (stop - start) + body.len());
        out.push_str(&document[..start]);
        out.push_str(body);
        out.push_str(&document[stop..]);
        return out;
    }

    let separator = if document.is_empty() || document.ends_with("\n\n") {
        ""
    } else if document.ends_with('\n') {
        "\n"
    } else {
        "\n\n"
    };
    format!("{document}{separator}{section}")
}

/// Merge `section` into the document at `path`. A missing document is
/// treated as empty and created; the file is only written when it changes.
pub fn upsert_section(path: &Path, section: &str, begin: &str, end: &str) -> Result<MergeOutcome> {
    let document = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::info!("{} does not exist yet, creating it", path.display());
            String::new()
        }
        Err(e) => return Err(ReportError::io(path, e)),
    };

    let merged = merge_section(&document, section, begin, end);
    if merged == document {
        return Ok(MergeOutcome::Unchanged);
    }

    let outcome = if marked_region(&document, begin, end).is_some() {
        MergeOutcome::Replaced
    } else {
        MergeOutcome::Appended
    };
    write_document(path, &merged)?;
    Ok(outcome)
}

/// Overwrite `path` with `contents`, creating parent directories.
pub fn write_document(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| ReportError::io(parent, e))?;
    }
    fs::write(path, contents).map_err(|e| ReportError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use tempfile::tempdir;

    const BEGIN: &str = "<!-- AUTO-GENERATED:LANG3-GAPS:BEGIN -->";
    const END: &str = "<!-- AUTO-GENERATED:LANG3-GAPS:END -->";

    fn section(body: &str) -> String {
        format!("{BEGIN}\n{body}\n{END}\n")
    }

    #[test]
    fn replaces_region_and_keeps_surroundings() {
        let doc = format!("# Notes\n\nhand written\n\n{BEGIN}\nold\n{END}\n\n## Later\ntrailing");
        let merged = merge_section(&doc, &section("new"), BEGIN, END);
        assert_eq!(
            merged,
            format!("# Notes\n\nhand written\n\n{BEGIN}\nnew\n{END}\n\n## Later\ntrailing")
        );
    }

    #[test]
    fn merge_is_idempotent() {
        let doc = format!("intro\n{BEGIN}\nold\n{END}\noutro\n");
        let once = merge_section(&doc, &section("new"), BEGIN, END);
        let twice = merge_section(&once, &section("new"), BEGIN, END);
        assert_eq!(once, twice);
    }

    #[test]
    fn appends_when_markers_missing() {
        assert_eq!(merge_section("", &section("x"), BEGIN, END), section("x"));
        assert_eq!(
            merge_section("intro\n", &section("x"), BEGIN, END),
            format!("intro\n\n{}", section("x"))
        );
        assert_eq!(
            merge_section("intro", &section("x"), BEGIN, END),
            format!("intro\n\n{}", section("x"))
        );

        let appended = merge_section("intro\n", &section("x"), BEGIN, END);
        assert_eq!(merge_section(&appended, &section("x"), BEGIN, END), appended);
    }

    #[test]
    fn end_marker_before_begin_is_not_a_region() {
        let doc = format!("{END}\nstray\n{BEGIN}\n");
        let merged = merge_section(&doc, &section("x"), BEGIN, END);
        assert_eq!(merged, format!("{doc}\n{}", section("x")));
        assert_eq!(merge_section(&merged, &section("x"), BEGIN, END), merged);
    }

    #[test]
    fn lone_begin_marker_survives_repeated_merges() {
        let doc = format!("# Gaps\n{BEGIN}\nhand notes\n");
        let once = merge_section(&doc, &section("x"), BEGIN, END);
        assert_eq!(once, format!("{doc}\n{}", section("x")));

        let twice = merge_section(&once, &section("x"), BEGIN, END);
        assert_eq!(twice, once);

        let updated = merge_section(&once, &section("y"), BEGIN, END);
        assert_eq!(updated, format!("{doc}\n{}", section("y")));
    }

    #[test]
    fn inline_marker_mentions_are_ignored() {
        let doc = format!("Regenerated between `{BEGIN}` and `{END}`.\n");
        let merged = merge_section(&doc, &section("x"), BEGIN, END);
        assert_eq!(merged, format!("{doc}\n{}", section("x")));
        assert_eq!(merge_section(&merged, &section("x"), BEGIN, END), merged);
    }

    #[test]
    fn indented_marker_lines_still_count() {
        let doc = format!("intro\n  {BEGIN}\nold\n{END}  \noutro\n");
        let merged = merge_section(&doc, &section("new"), BEGIN, END);
        assert_eq!(merged, format!("intro\n  {BEGIN}\nnew\n{END}  \noutro\n"));
    }

    #[test]
    fn upsert_creates_then_reports_unchanged() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("doc").join("gaps.md");

        let first = upsert_section(&path, &section("a"), BEGIN, END).unwrap();
        assert_eq!(first, MergeOutcome::Appended);
        assert_eq!(fs::read_to_string(&path).unwrap(), section("a"));

        let second = upsert_section(&path, &section("a"), BEGIN, END).unwrap();
        assert_eq!(second, MergeOutcome::Unchanged);

        let third = upsert_section(&path, &section("b"), BEGIN, END).unwrap();
        assert_eq!(third, MergeOutcome::Replaced);
        assert_eq!(fs::read_to_string(&path).unwrap(), section("b"));
    }

    proptest! {
        #[test]
        fn proptest_merge_preserves_outside_bytes(
            prefix in "([a-z #]{0,10}\n){0,4}",
            suffix in "(\n[a-z #]{0,10}){0,4}",
            old in "[a-z\n]{0,20}",
            new in "[a-z\n]{0,20}",
        ) {
            let doc = format!("{prefix}{BEGIN}\n{old}\n{END}{suffix}");
            let merged = merge_section(&doc, &section(&new), BEGIN, END);
            prop_assert!(merged.starts_with(&prefix));
            prop_assert!(merged.ends_with(&suffix));
            prop_assert_eq!(
                merged.clone(),
                format!("{prefix}{BEGIN}\n{new}\n{END}{suffix}")
            );
            prop_assert_eq!(merge_section(&merged, &section(&new), BEGIN, END), merged);
        }
    }
}
