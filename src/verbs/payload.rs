//! Wire schema of a verb response.
//!
//! Deserialized from the repaired model JSON; field values are still raw
//! strings at this point and get normalized during reconciliation.

use serde::Deserialize;

/// Top-level verb payload: `{auxiliary, infinitive, reflexivity, tenses}`.
#[derive(Debug, Clone, Deserialize)]
pub struct VerbPayload {
    pub auxiliary: String,
    pub infinitive: String,
    pub reflexivity: String,
    #[serde(default)]
    pub tenses: Vec<TensePayload>,
}

/// One tense block: `{tense, conjugations}`.
#[derive(Debug, Clone, Deserialize)]
pub struct TensePayload {
    pub tense: String,
    #[serde(default)]
    pub conjugations: Vec<PronounEntry>,
}

/// One conjugated form: `{pronoun, verb, translation}`.
///
/// The model sometimes omits or nulls the verb; such entries are skipped
/// during reconciliation.
#[derive(Debug, Clone, Deserialize)]
pub struct PronounEntry {
    pub pronoun: String,
    #[serde(default)]
    pub verb: Option<String>,
    #[serde(default)]
    pub translation: Option<String>,
}
