use once_cell::sync::Lazy;
use regex::Regex;

static WORD_START: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(.)([A-Z][a-z]+)").expect("word start pattern"));
static LOWER_UPPER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("lower-upper pattern"));

/// `CamelCase` identifier to the `snake_case` file stem used by the target tree.
///
/// `HTTPServer` becomes `http_server` and `ArrayUtils` becomes `array_utils`.
pub fn to_snake_case(name: &str) -> String {
    let spaced = WORD_START.replace_all(name, "${1}_${2}");
    let spaced = LOWER_UPPER.replace_all(&spaced, "${1}_${2}");
    spaced.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::to_snake_case;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn converts_common_shapes() {
        let cases = [
            ("StringUtils", "string_utils"),
            ("HTTPServer", "http_server"),
            ("CharSequenceUtils", "char_sequence_utils"),
            ("Int2Obj", "int2_obj"),
            ("BinaryOperator", "binary_operator"),
            ("FooException", "foo_exception"),
            ("ABC", "abc"),
            ("x", "x"),
        ];
        for (input, expected) in cases {
            assert_eq!(to_snake_case(input), expected, "{input}");
        }
    }

    proptest! {
        #[test]
        fn proptest_is_idempotent(name in "[A-Za-z0-9]{1,24}") {
            let once = to_snake_case(&name);
            prop_assert_eq!(to_snake_case(&once), once);
        }

        #[test]
        fn proptest_never_empties_input(name in "[A-Za-z0-9]{1,24}") {
            let converted = to_snake_case(&name);
            prop_assert!(!converted.is_empty());
            prop_assert!(converted.len() >= name.len());
            prop_assert!(!converted.chars().any(|c| c.is_ascii_uppercase()));
        }
    }
}
