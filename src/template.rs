//! Prompt template rendering
//!
//! Templates are plain text with two kinds of markers:
//!
//! - `{{key}}` substitutes the value bound to `key`
//! - `{{#if key}}...{{/if}}` keeps the enclosed text only when `key` is
//!   bound to a truthy value
//!
//! Rendering runs in three passes over the whole template: conditionals
//! first, then substitution, then a cleanup pass that deletes any marker
//! left unresolved. Substituted values are not expanded again, though
//! the cleanup pass strips any marker-shaped text they introduce.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;

use crate::config::ArgumentSpec;

/// Variable bindings for a single render, keyed by argument name.
pub type Variables = serde_json::Map<String, Value>;

/// `{{#if name}}body{{/if}}`, non-greedy so sibling blocks stay separate.
/// `(?s)` lets the body span lines.
static CONDITIONAL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\{\{#if\s+(\w+)\}\}(.*?)\{\{/if\}\}").unwrap());

/// A plain `{{...}}` marker. Never matches across a `}`, so an unclosed
/// `{{name` is left alone rather than swallowing the rest of the line.
static MARKER_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{\{([^}]*)\}\}").unwrap());

/// Placeholder values that count as "not provided" in conditionals. A
/// defaulted argument carrying one of these must not switch optional
/// sections on.
const SENTINEL_DEFAULTS: &[&str] = &["auto-detect", "general"];

/// Render `template` against `variables`.
///
/// Unknown markers and conditionals over unbound names disappear from
/// the output; rendering itself never fails.
pub fn render(template: &str, variables: &Variables) -> String {
    let conditioned = CONDITIONAL_PATTERN.replace_all(template, |caps: &Captures| {
        if is_truthy(variables.get(&caps[1])) {
            caps[2].to_string()
        } else {
            String::new()
        }
    });

    let substituted = MARKER_PATTERN.replace_all(&conditioned, |caps: &Captures| {
        match variables.get(&caps[1]) {
            Some(value) if !value.is_null() => stringify(value),
            // Leave the marker in place for the cleanup pass.
            _ => caps[0].to_string(),
        }
    });

    MARKER_PATTERN.replace_all(&substituted, "").into_owned()
}

/// Whether a binding switches a `{{#if}}` section on.
///
/// Absent and null are off; so are the empty string and the sentinel
/// placeholders. Everything else, including `false` and `0`, is on:
/// the caller bound a real value, whatever it was.
fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty() && !SENTINEL_DEFAULTS.contains(&s.as_str()),
        Some(_) => true,
    }
}

/// String form of a bound value. Strings substitute verbatim; anything
/// else uses its compact JSON encoding.
fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Default value for a declared argument the caller did not provide.
pub fn default_for(name: &str) -> &'static str {
    match name {
        "focus_areas" => "general",
        "language" => "auto-detect",
        "format" => "markdown",
        _ => "",
    }
}

/// Merge caller-supplied `arguments` with defaults for every declared
/// argument that is missing or explicitly null. Undeclared arguments
/// pass through untouched.
pub fn fill_defaults(arguments: &Variables, declared: &[ArgumentSpec]) -> Variables {
    let mut merged = arguments.clone();
    for spec in declared {
        if matches!(merged.get(&spec.name), None | Some(Value::Null)) {
            merged.insert(spec.name.clone(), Value::String(default_for(&spec.name).to_string()));
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn vars(pairs: &[(&str, Value)]) -> Variables {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn spec(name: &str, required: bool) -> ArgumentSpec {
        ArgumentSpec {
            name: name.to_string(),
            required,
            description: String::new(),
        }
    }

    #[test]
    fn test_plain_text_passes_through() {
        let out = render("no markers here", &Variables::new());
        assert_eq!(out, "no markers here");
    }

    #[test]
    fn test_substitutes_bound_marker() {
        let out = render(
            "Hello {{name}} and {{other}}!",
            &vars(&[("name", json!("World"))]),
        );
        assert_eq!(out, "Hello World and !");
    }

    #[test]
    fn test_unknown_marker_deleted() {
        let out = render("a {{missing}} b", &Variables::new());
        assert_eq!(out, "a  b");
    }

    #[test]
    fn test_null_binding_treated_as_absent() {
        let out = render("x{{name}}y", &vars(&[("name", Value::Null)]));
        assert_eq!(out, "xy");
    }

    #[test]
    fn test_non_string_values_stringified() {
        let out = render(
            "n={{n}} b={{b}} l={{l}}",
            &vars(&[("n", json!(3)), ("b", json!(true)), ("l", json!([1, 2]))]),
        );
        assert_eq!(out, "n=3 b=true l=[1,2]");
    }

    #[test]
    fn test_conditional_kept_when_truthy() {
        let out = render(
            "Start{{#if x}}Middle{{/if}}End",
            &vars(&[("x", json!("yes"))]),
        );
        assert_eq!(out, "StartMiddleEnd");
    }

    #[test]
    fn test_conditional_dropped_when_absent() {
        let out = render("Start{{#if x}}Middle{{/if}}End", &Variables::new());
        assert_eq!(out, "StartEnd");
    }

    #[test]
    fn test_conditional_dropped_when_empty_string() {
        let out = render("Start{{#if x}}Middle{{/if}}End", &vars(&[("x", json!(""))]));
        assert_eq!(out, "StartEnd");
    }

    #[test]
    fn test_conditional_dropped_for_sentinel_values() {
        for sentinel in ["auto-detect", "general"] {
            let out = render(
                "Start{{#if x}}Middle{{/if}}End",
                &vars(&[("x", json!(sentinel))]),
            );
            assert_eq!(out, "StartEnd", "sentinel {sentinel:?} should read as falsy");
        }
    }

    #[test]
    fn test_conditional_kept_for_false_and_zero() {
        // Non-string bindings are truthy regardless of their value.
        let out = render(
            "{{#if a}}A{{/if}}{{#if b}}B{{/if}}",
            &vars(&[("a", json!(false)), ("b", json!(0))]),
        );
        assert_eq!(out, "AB");
    }

    #[test]
    fn test_conditional_body_substitutes_markers() {
        let out = render(
            "{{#if lang}}Language: {{lang}}{{/if}}",
            &vars(&[("lang", json!("rust"))]),
        );
        assert_eq!(out, "Language: rust");
    }

    #[test]
    fn test_sibling_conditionals_stay_separate() {
        let out = render(
            "{{#if a}}A{{/if}}-{{#if b}}B{{/if}}",
            &vars(&[("b", json!("on"))]),
        );
        assert_eq!(out, "-B");
    }

    #[test]
    fn test_conditionals_resolve_before_substitution() {
        // The marker inside a dropped section must vanish with the
        // section, never substitute first.
        let out = render(
            "{{#if gate}}{{secret}}{{/if}}ok",
            &vars(&[("secret", json!("leak"))]),
        );
        assert_eq!(out, "ok");
    }

    #[test]
    fn test_substituted_value_not_rescanned() {
        // A value that happens to contain marker syntax substitutes
        // verbatim in the pass it lands in, but the cleanup pass still
        // removes it since it reads as an unresolved marker.
        let out = render(
            "{{a}} {{b}}",
            &vars(&[("a", json!("{{b}}")), ("b", json!("B"))]),
        );
        assert_eq!(out, " B");
    }

    #[test]
    fn test_unclosed_marker_left_alone() {
        let out = render("keep {{name here", &vars(&[("name", json!("x"))]));
        assert_eq!(out, "keep {{name here");
    }

    #[test]
    fn test_orphan_close_tag_deleted() {
        let out = render("a{{/if}}b", &Variables::new());
        assert_eq!(out, "ab");
    }

    #[test]
    fn test_multiline_conditional_body() {
        let out = render(
            "Head\n{{#if x}}line one\nline two\n{{/if}}Tail",
            &vars(&[("x", json!("go"))]),
        );
        assert_eq!(out, "Head\nline one\nline two\nTail");
    }

    #[test]
    fn test_default_table() {
        assert_eq!(default_for("focus_areas"), "general");
        assert_eq!(default_for("language"), "auto-detect");
        assert_eq!(default_for("format"), "markdown");
        assert_eq!(default_for("anything_else"), "");
        assert_eq!(default_for("severity"), "");
    }

    #[test]
    fn test_fill_defaults_adds_missing_declared() {
        let merged = fill_defaults(
            &Variables::new(),
            &[spec("language", false), spec("topic", false)],
        );
        assert_eq!(merged.get("language"), Some(&json!("auto-detect")));
        assert_eq!(merged.get("topic"), Some(&json!("")));
    }

    #[test]
    fn test_fill_defaults_keeps_caller_values() {
        let merged = fill_defaults(
            &vars(&[("language", json!("rust"))]),
            &[spec("language", false)],
        );
        assert_eq!(merged.get("language"), Some(&json!("rust")));
    }

    #[test]
    fn test_fill_defaults_replaces_explicit_null() {
        let merged = fill_defaults(
            &vars(&[("format", Value::Null)]),
            &[spec("format", false)],
        );
        assert_eq!(merged.get("format"), Some(&json!("markdown")));
    }

    #[test]
    fn test_fill_defaults_passes_undeclared_through() {
        let merged = fill_defaults(&vars(&[("extra", json!("kept"))]), &[spec("topic", false)]);
        assert_eq!(merged.get("extra"), Some(&json!("kept")));
        assert_eq!(merged.get("topic"), Some(&json!("")));
    }

    #[test]
    fn test_defaulted_sentinel_does_not_enable_conditional() {
        // End to end: a declared-but-unsupplied language gets the
        // auto-detect default, which must leave the section off.
        let merged = fill_defaults(&Variables::new(), &[spec("language", false)]);
        let out = render("{{#if language}}Language: {{language}}{{/if}}done", &merged);
        assert_eq!(out, "done");
    }
}
