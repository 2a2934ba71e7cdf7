use portmap_protocol::Assessment;
use std::collections::BTreeMap;

/// Label used for the root group where a name is required.
pub const ROOT_GROUP_LABEL: &str = "(root)";

/// Assessments keyed by group, root group (empty key) first, names sorted
/// within each group. Same-named entries keep their input order.
pub(crate) fn by_group(assessments: &[Assessment]) -> BTreeMap<&str, Vec<&Assessment>> {
    let mut groups: BTreeMap<&str, Vec<&Assessment>> = BTreeMap::new();
    for assessment in assessments {
        groups
            .entry(assessment.source.group.as_str())
            .or_default()
            .push(assessment);
    }
    for entries in groups.values_mut() {
        entries.sort_by(|a, b| a.source.name.cmp(&b.source.name));
    }
    groups
}

pub(crate) fn group_label(group: &str) -> &str {
    if group.is_empty() {
        ROOT_GROUP_LABEL
    } else {
        group
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::assessment;
    use super::*;
    use portmap_protocol::Status;
    use pretty_assertions::assert_eq;

    #[test]
    fn root_group_comes_first_and_names_are_sorted() {
        let input = vec![
            assessment("tuple", "Pair", Status::Planned, None),
            assessment("", "StringUtils", Status::Planned, None),
            assessment("builder", "ToStringBuilder", Status::Planned, None),
            assessment("", "ArrayUtils", Status::Planned, None),
        ];
        let groups = by_group(&input);
        let keys: Vec<&str> = groups.keys().copied().collect();
        assert_eq!(keys, vec!["", "builder", "tuple"]);

        let root: Vec<&str> = groups[""].iter().map(|a| a.source.name.as_str()).collect();
        assert_eq!(root, vec!["ArrayUtils", "StringUtils"]);
    }

    #[test]
    fn root_label() {
        assert_eq!(group_label(""), "(root)");
        assert_eq!(group_label("text"), "text");
    }
}
