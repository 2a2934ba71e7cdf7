pub fn is_active(exclude_paths: &[String]) -> bool {
    exclude_paths
        .iter()
        .any(|p| !normalize_filter_path(p).is_empty())
}

/// `rel_path` is relative to a scanned root. Excludes are directory or file
/// prefixes matched on whole path components.
pub fn path_allowed(rel_path: &str, exclude_paths: &[String]) -> bool {
    let rel_path = rel_path.replace('\\', "/");

    for exclude in exclude_paths {
        let normalized = normalize_filter_path(exclude);
        if normalized.is_empty() {
            continue;
        }
        if path_prefix_matches_normalized(&normalized, &rel_path) {
            return false;
        }
    }

    true
}

fn normalize_filter_path(raw: &str) -> String {
    let mut value = raw.trim().replace('\\', "/");
    while value.starts_with("./") {
        value = value[2..].to_string();
    }
    let value = value.trim_matches('/');
    if value == "." {
        return String::new();
    }
    value.to_string()
}

fn path_prefix_matches_normalized(prefix: &str, path: &str) -> bool {
    if path == prefix {
        return true;
    }

    if !path.starts_with(prefix) {
        return false;
    }

    path.as_bytes().get(prefix.len()) == Some(&b'/')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exclude_is_component_prefix_match() {
        let exclude = vec!["test".to_string()];
        assert!(!path_allowed("test/lang_test.cj", &exclude));
        assert!(path_allowed("testing/util.cj", &exclude));
        assert!(path_allowed("utils/string_utils.cj", &exclude));
    }

    #[test]
    fn backslashes_are_normalized() {
        let exclude = vec!["./gen/".to_string()];
        assert!(!path_allowed("gen\\stub.cj", &exclude));
    }

    #[test]
    fn invalid_prefixes_do_not_activate_filters() {
        let exclude = vec!["".to_string(), ".".to_string(), "////".to_string()];
        assert!(!is_active(&exclude));
        assert!(path_allowed("src/lib.cj", &exclude));
    }
}
