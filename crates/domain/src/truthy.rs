//! Boolean coercion for loosely typed on/off values.
//!
//! The backend and the rendered page both express "on" in several ways
//! (`true`, `1`, `"on"`, `"Yes"`, …). Everything funnels through the two
//! functions here so the rule is applied identically everywhere.

use serde_json::Value;

/// Strings (after trimming and lowercasing) that count as "on".
const TRUTHY_WORDS: [&str; 4] = ["1", "true", "on", "yes"];

/// Coerce a displayed text into a boolean.
///
/// `true` only for `1`, `true`, `on` or `yes`, ignoring surrounding
/// whitespace and case. Every other string, including the empty one, is
/// `false`.
#[must_use]
pub fn text_is_truthy(text: &str) -> bool {
    let normalized = text.trim().to_ascii_lowercase();
    TRUTHY_WORDS.contains(&normalized.as_str())
}

/// Coerce an optional JSON value into a boolean.
///
/// - literal booleans map to themselves;
/// - numbers are `true` when non-zero;
/// - strings follow [`text_is_truthy`];
/// - `null`, a missing value, arrays and objects are `false`.
#[must_use]
pub fn value_is_truthy(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(flag)) => *flag,
        Some(Value::Number(number)) => number.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(text)) => text_is_truthy(text),
        Some(Value::Null | Value::Array(_) | Value::Object(_)) | None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn coerce(value: &Value) -> bool {
        value_is_truthy(Some(value))
    }

    #[test]
    fn should_keep_literal_booleans() {
        assert!(coerce(&json!(true)));
        assert!(!coerce(&json!(false)));
    }

    #[test]
    fn should_treat_non_zero_numbers_as_true() {
        assert!(coerce(&json!(1)));
        assert!(coerce(&json!(3.5)));
        assert!(coerce(&json!(-1)));
    }

    #[test]
    fn should_treat_zero_as_false() {
        assert!(!coerce(&json!(0)));
        assert!(!coerce(&json!(0.0)));
    }

    #[test]
    fn should_accept_truthy_words_in_any_case() {
        for word in ["1", "true", "TRUE", "on", "Yes", "  on  "] {
            assert!(coerce(&json!(word)), "{word:?} should be truthy");
        }
    }

    #[test]
    fn should_reject_other_strings() {
        for word in ["0", "", "off", "no", "2", "enabled"] {
            assert!(!coerce(&json!(word)), "{word:?} should be falsy");
        }
    }

    #[test]
    fn should_treat_null_and_missing_as_false() {
        assert!(!coerce(&Value::Null));
        assert!(!value_is_truthy(None));
    }

    #[test]
    fn should_treat_containers_as_false() {
        assert!(!coerce(&json!([1])));
        assert!(!coerce(&json!({"on": true})));
    }

    #[test]
    fn should_coerce_displayed_text() {
        assert!(text_is_truthy("ON"));
        assert!(text_is_truthy("\n yes\t"));
        assert!(!text_is_truthy("OFF"));
        assert!(!text_is_truthy(""));
    }
}
