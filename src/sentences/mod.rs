//! Sentence generation, validation and correction
//!
//! A `SentenceSpec` parameterizes the prompt; the generator sends it out,
//! normalizes the payload's enumeration fields, and persists the resulting
//! sentence row. Validation and correction reuse the same provider plumbing
//! on existing sentence text.

pub mod payload;
pub mod prompts;

use crate::db::models::Sentence;
use crate::db::{store, Database};
use crate::error::{Result, VerbForgeError};
use crate::grammar::{
    DirectObject, IndirectPronoun, Negation, Pronoun, ReflexivePronoun, Tense,
};
use crate::llm::repair;
use crate::llm::ChatProvider;
use crate::sentences::payload::{CorrectionPayload, SentencePayload};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info};

/// Parameters of one sentence request.
///
/// `random` variants leave the concrete choice to the model; the payload
/// reports what it actually picked.
#[derive(Debug, Clone)]
pub struct SentenceSpec {
    pub infinitive: String,
    pub auxiliary: String,
    pub pronoun: Pronoun,
    pub tense: Tense,
    pub direct_object: DirectObject,
    pub indirect_pronoun: IndirectPronoun,
    pub reflexive_pronoun: ReflexivePronoun,
    pub negation: Negation,
    pub is_correct: bool,
}

impl SentenceSpec {
    /// Spec with the usual defaults: present tense, first person, correct,
    /// complements and negation left to the model.
    pub fn new(infinitive: impl Into<String>, auxiliary: impl Into<String>) -> Self {
        Self {
            infinitive: infinitive.into(),
            auxiliary: auxiliary.into(),
            pronoun: Pronoun::FirstPerson,
            tense: Tense::Present,
            direct_object: DirectObject::Random,
            indirect_pronoun: IndirectPronoun::Random,
            reflexive_pronoun: ReflexivePronoun::None,
            negation: Negation::Random,
            is_correct: true,
        }
    }
}

/// A corrected sentence with its translation.
#[derive(Debug, Clone)]
pub struct Correction {
    pub sentence: String,
    pub translation: String,
}

/// Generates and persists example sentences.
#[derive(Clone)]
pub struct SentenceGenerator {
    provider: Arc<dyn ChatProvider>,
    db: Database,
}

impl SentenceGenerator {
    pub fn new(provider: Arc<dyn ChatProvider>, db: Database) -> Self {
        Self { provider, db }
    }

    /// Generate one sentence for a spec and persist it.
    pub async fn generate(&self, spec: &SentenceSpec) -> Result<Sentence> {
        info!(verb = %spec.infinitive, tense = %spec.tense, "generating sentence");

        let prompt = prompts::sentence_prompt(spec);
        debug!(%prompt, "sentence prompt");

        let raw = self.provider.complete(&prompt).await?;
        debug!(raw = %raw, "raw completion");

        let payload: SentencePayload = repair::parse_as(&raw)?;
        let sentence = resolve_sentence(spec, payload)?;

        store::insert_sentence(self.db.pool(), &sentence).await
    }

    /// Ask whether a sentence is grammatically correct.
    pub async fn check(&self, content: &str) -> Result<bool> {
        let raw = self
            .provider
            .complete(&prompts::validation_prompt(content))
            .await?;

        let answer = raw.to_lowercase();
        if answer.contains("true") {
            Ok(true)
        } else if answer.contains("false") {
            Ok(false)
        } else {
            Err(VerbForgeError::MalformedResponse(format!(
                "expected 'True' or 'False', got '{}'",
                raw.trim()
            )))
        }
    }

    /// Ask for a corrected version of a sentence.
    pub async fn correct(&self, content: &str) -> Result<Correction> {
        let raw = self
            .provider
            .complete(&prompts::correction_prompt(content))
            .await?;

        let payload: CorrectionPayload = repair::parse_as(&raw)?;
        Ok(Correction {
            sentence: payload.corrected_sentence,
            translation: payload.corrected_translation.unwrap_or_default(),
        })
    }
}

/// Merge the spec and the payload into a sentence row, normalizing the
/// string-encoded fields the model reports back.
fn resolve_sentence(spec: &SentenceSpec, payload: SentencePayload) -> Result<Sentence> {
    let is_correct = payload.is_correct.as_bool().ok_or_else(|| {
        VerbForgeError::MalformedResponse(
            "is_correct was neither a boolean nor 'True'/'False'".to_string(),
        )
    })?;

    Ok(Sentence {
        id: 0,
        infinitive: spec.infinitive.clone(),
        auxiliary: spec.auxiliary.clone(),
        pronoun: spec.pronoun,
        tense: spec.tense,
        direct_object: normalize_field(payload.direct_object.as_deref(), DirectObject::None)?,
        indirect_pronoun: normalize_field(
            payload.indirect_pronoun.as_deref(),
            IndirectPronoun::None,
        )?,
        reflexive_pronoun: spec.reflexive_pronoun,
        negation: normalize_field(payload.negation.as_deref(), Negation::None)?,
        content: payload.sentence,
        // Incorrect sentences are requested without a translation.
        translation: payload.translation.unwrap_or_default(),
        is_correct,
    })
}

/// Parse a reported enumeration value, tolerating case and absence.
fn normalize_field<T>(value: Option<&str>, default: T) -> Result<T>
where
    T: FromStr<Err = VerbForgeError>,
{
    match value {
        None => Ok(default),
        Some(raw) => {
            let trimmed = raw.trim().to_lowercase();
            if trimmed.is_empty() {
                Ok(default)
            } else {
                trimmed.parse()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentences::payload::BoolLike;

    fn spec() -> SentenceSpec {
        SentenceSpec::new("manger", "avoir")
    }

    #[test]
    fn test_resolve_sentence_normalizes_fields() {
        let payload = SentencePayload {
            sentence: "Je ne mange pas.".to_string(),
            translation: Some("I am not eating.".to_string()),
            is_correct: BoolLike::Text("True".to_string()),
            negation: Some("Pas".to_string()),
            direct_object: Some("none".to_string()),
            indirect_pronoun: Some("NONE".to_string()),
        };

        let sentence = resolve_sentence(&spec(), payload).unwrap();
        assert_eq!(sentence.negation, Negation::Pas);
        assert_eq!(sentence.direct_object, DirectObject::None);
        assert_eq!(sentence.indirect_pronoun, IndirectPronoun::None);
        assert!(sentence.is_correct);
        assert_eq!(sentence.infinitive, "manger");
    }

    #[test]
    fn test_resolve_sentence_defaults_missing_fields() {
        let payload = SentencePayload {
            sentence: "Je mange.".to_string(),
            translation: None,
            is_correct: BoolLike::Bool(true),
            negation: None,
            direct_object: None,
            indirect_pronoun: None,
        };

        let sentence = resolve_sentence(&spec(), payload).unwrap();
        assert_eq!(sentence.negation, Negation::None);
        assert_eq!(sentence.translation, "");
    }

    #[test]
    fn test_resolve_sentence_rejects_unusable_is_correct() {
        let payload = SentencePayload {
            sentence: "Je mange.".to_string(),
            translation: None,
            is_correct: BoolLike::Text("peut-être".to_string()),
            negation: None,
            direct_object: None,
            indirect_pronoun: None,
        };

        let error = resolve_sentence(&spec(), payload).unwrap_err();
        assert!(matches!(error, VerbForgeError::MalformedResponse(_)));
    }

    #[test]
    fn test_resolve_sentence_rejects_unknown_negation() {
        let payload = SentencePayload {
            sentence: "Je mange.".to_string(),
            translation: None,
            is_correct: BoolLike::Bool(true),
            negation: Some("guère".to_string()),
            direct_object: None,
            indirect_pronoun: None,
        };

        let error = resolve_sentence(&spec(), payload).unwrap_err();
        assert!(matches!(error, VerbForgeError::UnknownVariant { .. }));
    }
}
