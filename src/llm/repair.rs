//! Response repair and parsing
//!
//! Model output is expected to contain one JSON object but frequently
//! arrives malformed: wrapped in code fences or prose, with unquoted keys,
//! single-quoted strings, Python literals, or trailing commas. The repair
//! passes here fix those defects with string scanners that never touch the
//! interior of a double-quoted string; `serde_json` does all structural
//! parsing. Unrepairable text surfaces as a malformed-response error, and
//! nothing is retried at this layer.

use crate::error::{Result, VerbForgeError};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Repair common model-generated JSON defects.
pub fn repair(raw: &str) -> String {
    let text = strip_code_fences(raw);
    let text = extract_object(text);
    let text = normalize_single_quotes(text);
    let text = quote_bare_tokens(&text);
    strip_trailing_commas(&text)
}

/// Repair and parse model output into a JSON mapping.
pub fn parse(raw: &str) -> Result<Value> {
    let repaired = repair(raw);
    serde_json::from_str(&repaired)
        .map_err(|e| VerbForgeError::MalformedResponse(format!("unrepairable model output: {}", e)))
}

/// Repair and parse model output into a typed payload.
pub fn parse_as<T: DeserializeOwned>(raw: &str) -> Result<T> {
    let value = parse(raw)?;
    serde_json::from_value(value)
        .map_err(|e| VerbForgeError::MalformedResponse(format!("unexpected response shape: {}", e)))
}

/// Drop markdown code fences around the payload.
fn strip_code_fences(s: &str) -> &str {
    let t = s.trim();
    let t = t
        .strip_prefix("```json")
        .or_else(|| t.strip_prefix("```"))
        .unwrap_or(t);
    let t = t.strip_suffix("```").unwrap_or(t);
    t.trim()
}

/// Cut the span from the first `{` to the last `}`, shedding any prose the
/// model wrapped around the object.
fn extract_object(s: &str) -> &str {
    match (s.find('{'), s.rfind('}')) {
        (Some(start), Some(end)) if start < end => &s[start..=end],
        _ => s,
    }
}

/// Copy a double-quoted string starting at `i` (the opening quote) into
/// `out`, returning the index just past the closing quote.
fn copy_string(chars: &[char], mut i: usize, out: &mut String) -> usize {
    out.push('"');
    i += 1;
    while i < chars.len() {
        let c = chars[i];
        out.push(c);
        i += 1;
        if c == '\\' && i < chars.len() {
            out.push(chars[i]);
            i += 1;
        } else if c == '"' {
            break;
        }
    }
    i
}

/// Convert single-quoted strings to double-quoted ones. Apostrophes inside
/// French words (j'ai, n'est) must survive, so a quote only opens a string
/// right after a structural character, and only a quote followed by a
/// structural character closes it.
fn normalize_single_quotes(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c == '"' {
            i = copy_string(&chars, i, &mut out);
        } else if c == '\'' && opens_string(&out) {
            match find_single_quote_end(&chars, i + 1) {
                Some(end) => {
                    out.push('"');
                    for &d in &chars[i + 1..end] {
                        if d == '"' {
                            out.push('\\');
                        }
                        out.push(d);
                    }
                    out.push('"');
                    i = end + 1;
                }
                None => {
                    out.push(c);
                    i += 1;
                }
            }
        } else {
            out.push(c);
            i += 1;
        }
    }

    out
}

fn opens_string(out: &str) -> bool {
    match out.trim_end().chars().last() {
        None => true,
        Some(c) => matches!(c, ':' | ',' | '{' | '['),
    }
}

fn find_single_quote_end(chars: &[char], from: usize) -> Option<usize> {
    let mut i = from;
    while i < chars.len() {
        if chars[i] == '\'' {
            let mut j = i + 1;
            while j < chars.len() && chars[j].is_whitespace() {
                j += 1;
            }
            match chars.get(j) {
                None => return Some(i),
                Some(&c) if matches!(c, ',' | '}' | ']' | ':') => return Some(i),
                _ => {}
            }
        }
        i += 1;
    }
    None
}

/// Quote bare keys and bare string values, normalizing Python literals on
/// the way. A bare token ending at `:` is a key; one ending at `,`, `}` or
/// `]` is a value and stays unquoted only if it is already a JSON scalar.
fn quote_bare_tokens(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len() + 16);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c == '"' {
            i = copy_string(&chars, i, &mut out);
        } else if matches!(c, '{' | '}' | '[' | ']' | ',' | ':') || c.is_whitespace() {
            out.push(c);
            i += 1;
        } else {
            let start = i;
            while i < chars.len()
                && !matches!(chars[i], '{' | '}' | '[' | ']' | ',' | ':' | '"')
            {
                i += 1;
            }
            let token: String = chars[start..i].iter().collect();
            let token = match token.trim() {
                "True" => "true",
                "False" => "false",
                "None" => "null",
                t => t,
            };
            let is_key = matches!(chars.get(i), Some(&':'));
            if !is_key && is_scalar(token) {
                out.push_str(token);
            } else {
                out.push('"');
                out.push_str(token);
                out.push('"');
            }
        }
    }

    out
}

fn is_scalar(token: &str) -> bool {
    matches!(token, "true" | "false" | "null") || token.parse::<f64>().is_ok()
}

/// Remove commas that directly precede a closing brace or bracket.
fn strip_trailing_commas(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c == '"' {
            i = copy_string(&chars, i, &mut out);
        } else if c == ',' {
            let mut j = i + 1;
            while j < chars.len() && chars[j].is_whitespace() {
                j += 1;
            }
            if matches!(chars.get(j), Some(&'}') | Some(&']')) {
                i += 1;
            } else {
                out.push(c);
                i += 1;
            }
        } else {
            out.push(c);
            i += 1;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_well_formed_json_passes_through() {
        let raw = r#"{"auxiliary": "avoir", "count": 3, "flags": [true, null, -1.5]}"#;
        assert_eq!(
            parse(raw).unwrap(),
            json!({"auxiliary": "avoir", "count": 3, "flags": [true, null, -1.5]})
        );
    }

    #[test]
    fn test_trailing_commas_are_removed() {
        let raw = r#"{"tenses": [{"tense": "present",}, ], }"#;
        assert_eq!(
            parse(raw).unwrap(),
            json!({"tenses": [{"tense": "present"}]})
        );
    }

    #[test]
    fn test_bare_keys_and_values_are_quoted() {
        let raw = "{tense: present, pronoun: -, verb: suis}";
        assert_eq!(
            parse(raw).unwrap(),
            json!({"tense": "present", "pronoun": "-", "verb": "suis"})
        );
    }

    #[test]
    fn test_code_fences_and_prose_are_shed() {
        let fenced = "```json\n{\"sentence\": \"Je suis là.\"}\n```";
        assert_eq!(parse(fenced).unwrap(), json!({"sentence": "Je suis là."}));

        let prose = "Here is the JSON you asked for: {\"sentence\": \"Je suis là.\"} Hope it helps!";
        assert_eq!(parse(prose).unwrap(), json!({"sentence": "Je suis là."}));
    }

    #[test]
    fn test_python_literals_are_normalized() {
        let raw = "{\"is_correct\": True, \"negation\": None, \"is_negated\": False}";
        assert_eq!(
            parse(raw).unwrap(),
            json!({"is_correct": true, "negation": null, "is_negated": false})
        );
    }

    #[test]
    fn test_single_quotes_preserve_french_apostrophes() {
        let raw = "{'verb': 'j'ai mangé', 'pronoun': 'j''}";
        assert_eq!(
            parse(raw).unwrap(),
            json!({"verb": "j'ai mangé", "pronoun": "j'"})
        );
    }

    #[test]
    fn test_malformed_verb_schema_matches_well_formed_equivalent() {
        let well_formed = r#"{
            "auxiliary": "être",
            "infinitive": "aller",
            "reflexivity": "no",
            "tenses": [
                {"tense": "present", "conjugations": [
                    {"pronoun": "je", "verb": "vais", "translation": "I go"}
                ]}
            ]
        }"#;

        let malformed = r#"{
            auxiliary: 'être',
            infinitive: aller,
            reflexivity: no,
            tenses: [
                {tense: present, conjugations: [
                    {pronoun: je, verb: vais, translation: 'I go'},
                ],},
            ],
        }"#;

        assert_eq!(parse(malformed).unwrap(), parse(well_formed).unwrap());
    }

    #[test]
    fn test_unrepairable_text_is_an_error() {
        let err = parse("the model had nothing to say").unwrap_err();
        assert!(matches!(err, VerbForgeError::MalformedResponse(_)));
    }
}
