//! Wire schemas of sentence and correction responses.

use serde::Deserialize;

/// Sentence payload: `{sentence, translation, is_correct, negation,
/// direct_object, indirect_pronoun}`.
#[derive(Debug, Clone, Deserialize)]
pub struct SentencePayload {
    pub sentence: String,
    #[serde(default)]
    pub translation: Option<String>,
    pub is_correct: BoolLike,
    #[serde(default)]
    pub negation: Option<String>,
    #[serde(default)]
    pub direct_object: Option<String>,
    #[serde(default)]
    pub indirect_pronoun: Option<String>,
}

/// Correction payload: `{corrected_sentence, corrected_translation}`.
#[derive(Debug, Clone, Deserialize)]
pub struct CorrectionPayload {
    pub corrected_sentence: String,
    #[serde(default)]
    pub corrected_translation: Option<String>,
}

/// A boolean the model may render as a JSON bool or as prose ('True',
/// "false", ...).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum BoolLike {
    Bool(bool),
    Text(String),
}

impl BoolLike {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            BoolLike::Bool(value) => Some(*value),
            BoolLike::Text(text) => match text.trim().to_lowercase().as_str() {
                "true" | "yes" => Some(true),
                "false" | "no" => Some(false),
                _ => None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentence_payload_with_string_bool() {
        let body = r#"{
            "sentence": "Je ne mange pas.",
            "translation": "I am not eating.",
            "is_correct": "True",
            "negation": "pas",
            "direct_object": "none",
            "indirect_pronoun": "none"
        }"#;

        let payload: SentencePayload = serde_json::from_str(body).unwrap();
        assert_eq!(payload.is_correct.as_bool(), Some(true));
        assert_eq!(payload.negation.as_deref(), Some("pas"));
    }

    #[test]
    fn test_sentence_payload_with_real_bool() {
        let body = r#"{"sentence": "Je mange.", "is_correct": false}"#;
        let payload: SentencePayload = serde_json::from_str(body).unwrap();
        assert_eq!(payload.is_correct.as_bool(), Some(false));
        assert!(payload.translation.is_none());
    }

    #[test]
    fn test_unusable_bool_text() {
        let like = BoolLike::Text("maybe".to_string());
        assert_eq!(like.as_bool(), None);
    }

    #[test]
    fn test_correction_payload() {
        let body = r#"{"corrected_sentence": "Je suis là.", "corrected_translation": "I am here."}"#;
        let payload: CorrectionPayload = serde_json::from_str(body).unwrap();
        assert_eq!(payload.corrected_sentence, "Je suis là.");
        assert_eq!(payload.corrected_translation.as_deref(), Some("I am here."));
    }
}
