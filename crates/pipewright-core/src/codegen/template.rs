//! Literal `{name}` placeholder substitution for component templates.

use std::collections::BTreeMap;

use crate::graph::ParamValue;

/// Substitute node parameters into a component template.
///
/// A placeholder is recognized only as a whole `{name}` token whose
/// interior is an identifier. Any other brace run survives untouched, so
/// dict literals and f-string expressions inside a template are safe.
/// Placeholders naming a parameter the node does not carry are also left
/// as literal text.
pub fn substitute(template: &str, parameters: &BTreeMap<String, ParamValue>) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        output.push_str(&rest[..open]);
        let tail = &rest[open + 1..];
        match tail.find('}') {
            Some(close) if is_identifier(&tail[..close]) => {
                let name = &tail[..close];
                match parameters.get(name) {
                    Some(value) => output.push_str(&value.render_literal()),
                    None => {
                        output.push('{');
                        output.push_str(name);
                        output.push('}');
                    }
                }
                rest = &tail[close + 1..];
            }
            _ => {
                output.push('{');
                rest = tail;
            }
        }
    }

    output.push_str(rest);
    output
}

fn is_identifier(token: &str) -> bool {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(entries: &[(&str, ParamValue)]) -> BTreeMap<String, ParamValue> {
        entries
            .iter()
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect()
    }

    #[test]
    fn test_substitutes_each_kind() {
        let result = substitute(
            "split({test_size}, shuffle={shuffle}, target={column})",
            &params(&[
                ("test_size", ParamValue::Number(0.2)),
                ("shuffle", ParamValue::Bool(true)),
                ("column", ParamValue::Text("label".to_string())),
            ]),
        );
        assert_eq!(result, "split(0.2, shuffle=True, target='label')");
    }

    #[test]
    fn test_unknown_placeholder_is_left_literal() {
        let result = substitute("value = {missing}", &params(&[]));
        assert_eq!(result, "value = {missing}");
    }

    #[test]
    fn test_substitution_repeats_for_every_occurrence() {
        let result = substitute(
            "a = {x}\nb = {x}",
            &params(&[("x", ParamValue::Number(7.0))]),
        );
        assert_eq!(result, "a = 7\nb = 7");
    }

    #[test]
    fn test_non_identifier_brace_runs_survive() {
        let template = "config = {'depth': 3}\nprint(f\"rows: {data.shape[0]}\")";
        assert_eq!(substitute(template, &params(&[])), template);
    }

    #[test]
    fn test_whole_token_only_no_partial_match() {
        // `rate` must not be substituted inside `{learning_rate}`.
        let result = substitute(
            "lr = {learning_rate}",
            &params(&[("rate", ParamValue::Number(0.1))]),
        );
        assert_eq!(result, "lr = {learning_rate}");
    }

    #[test]
    fn test_unclosed_brace_is_literal() {
        let result = substitute("f({x", &params(&[("x", ParamValue::Number(1.0))]));
        assert_eq!(result, "f({x");
    }

    #[test]
    fn test_adjacent_braces() {
        let result = substitute("{{x}}", &params(&[("x", ParamValue::Number(2.0))]));
        assert_eq!(result, "{2}");
    }
}
