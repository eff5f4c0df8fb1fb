//! Prompt assembly for sentence generation, validation and correction.
//!
//! Each clause is its own function; `sentence_prompt` joins them in a fixed
//! order. All builders are pure.

use crate::grammar::{DirectObject, IndirectPronoun, Negation};
use crate::sentences::SentenceSpec;

fn direct_object_clause(spec: &SentenceSpec) -> String {
    match spec.direct_object {
        DirectObject::None => format!(
            "The sentence must not contain a COD (direct object) unless the verb {} requires it.",
            spec.infinitive
        ),
        DirectObject::Random => format!(
            "The sentence must return a random COD (direct object) with the verb {verb} \
             if it is possible to do with the verb {verb}.",
            verb = spec.infinitive
        ),
        gender => format!(
            "The sentence must return a COD (direct object) of gender {gender} \
             if it is possible to do with the verb {verb}.",
            gender = gender,
            verb = spec.infinitive
        ),
    }
}

fn indirect_pronoun_clause(spec: &SentenceSpec) -> String {
    match spec.indirect_pronoun {
        IndirectPronoun::None => format!(
            "The sentence must not contain a COI (indirect pronoun) unless the verb {} requires it.",
            spec.infinitive
        ),
        IndirectPronoun::Random => format!(
            "The sentence must return a random COI (indirect pronoun) with the verb {verb} \
             if it is possible to do with the verb {verb}.",
            verb = spec.infinitive
        ),
        gender => format!(
            "The sentence must return a COI (indirect pronoun) of gender {gender} \
             with the verb {verb} if possible to do with the verb {verb}.",
            gender = gender,
            verb = spec.infinitive
        ),
    }
}

fn object_ordering_rule() -> &'static str {
    "If the sentence has a COD (direct object) and a COI (indirect pronoun), \
     put them in the right order.  Switch them if necessary."
}

fn negation_clause(spec: &SentenceSpec) -> String {
    match spec.negation {
        Negation::None => "The sentence must not contain a negation.".to_string(),
        Negation::Random => {
            let supported = Negation::ALL
                .iter()
                .map(|negation| negation.key())
                .collect::<Vec<_>>()
                .join(" ");
            format!(
                "The sentence may randomly contain a negation from the list {supported}, \
                 or no negation at all.  'Ne' must always come before any direct objects \
                 or indirect pronouns.  The negation must come directly after the object."
            )
        }
        negation => format!(
            "The sentence must contain the negation {}.  The sentence must always include 'ne'.",
            negation
        ),
    }
}

fn verb_properties_clause(spec: &SentenceSpec) -> String {
    format!(
        "The sentence has the verb infinitive {} in the {} tense, \
         and may start with a {} subject pronoun.",
        spec.infinitive,
        spec.tense.prompt(),
        spec.pronoun.prompt()
    )
}

fn compliment_agreement_rule() -> &'static str {
    "If the verb requires additional objects or infinitives afterwards, add some.  \
     They must agree in gender and number."
}

fn preposition_rule() -> &'static str {
    "All prepositions match their indirect, or subordinate pronouns."
}

fn correctness_clause(spec: &SentenceSpec) -> String {
    if !spec.is_correct {
        // With no optional complements requested, the only place to hide an
        // error is the conjugation itself.
        if spec.direct_object == DirectObject::None
            && spec.indirect_pronoun == IndirectPronoun::None
            && spec.negation == Negation::None
        {
            "The sentence must contain an error in its pronoun or verb conjugation.".to_string()
        } else {
            "The sentence must contain an error in any of its direct objects, \
             indirect pronouns, or negations."
                .to_string()
        }
    } else {
        "The sentence should be correctly formed.".to_string()
    }
}

fn translation_clause(spec: &SentenceSpec) -> &'static str {
    if spec.is_correct {
        "The response should include an English translation."
    } else {
        "The response should not include a translation."
    }
}

// TODO: feed the supported negation list into this clause instead of
// leaving the detection open-ended.
fn negation_detection_rule() -> &'static str {
    "If the sentence has any French language negation present, set is_negated in the \
     response to 'True'.  Otherwise set it to 'False'."
}

fn response_schema() -> &'static str {
    r#"The response should be returned as raw json in the format below.  All six fields must be present.  Do not use json code fencing.
    {
        "sentence": "",
        "translation": "",
        "is_correct": "",
        "negation": "",
        "direct_object": "",
        "indirect_pronoun": ""
    }
    "#
}

fn negation_field_rule(spec: &SentenceSpec) -> String {
    format!(
        "If the sentence contains a negation, set the negation field to that negation \
         without the 'ne' prefix, or an n' prefix.  If it is two words, only use the first.  \
         Otherwise set it to none.  If {} it must contain 'ne' or 'n''.",
        spec.is_correct
    )
}

fn object_field_rule(object_type: &str, field: &str) -> String {
    format!(
        "If the generated sentence has a {object_type}, set {field} to 'masculine' if it is \
         masculine, 'feminine' if it is feminine, or 'plural' if it is plural.  \
         Set it to 'none' if it does not have a {object_type}."
    )
}

fn elision_rule() -> &'static str {
    "The sentence should have correct French elisions.  This includes que and qui connectors."
}

fn extra_rules() -> &'static str {
    "The JSON must be properly formatted, with all properties and values in double quotes.  \
     The sentence must not include the word 'random'."
}

/// Build the sentence-generation prompt for a spec.
pub fn sentence_prompt(spec: &SentenceSpec) -> String {
    [
        direct_object_clause(spec),
        indirect_pronoun_clause(spec),
        object_ordering_rule().to_string(),
        negation_clause(spec),
        verb_properties_clause(spec),
        compliment_agreement_rule().to_string(),
        preposition_rule().to_string(),
        correctness_clause(spec),
        translation_clause(spec).to_string(),
        negation_detection_rule().to_string(),
        response_schema().to_string(),
        negation_field_rule(spec),
        object_field_rule("COD", "direct_object"),
        object_field_rule("COI", "indirect_pronoun"),
        elision_rule().to_string(),
        extra_rules().to_string(),
    ]
    .join("\n")
}

/// Ask whether a sentence is grammatically correct; the model answers
/// 'True' or 'False'.
pub fn validation_prompt(content: &str) -> String {
    format!(
        "Is the sentence '{content}' grammatically correct in terms of French syntax, \
         verb usage, object placement, pronoun placement, and preposition usage? \
         If it is correct for all, return 'True', or if not, return 'False'."
    )
}

/// Ask for a corrected version of a sentence.
pub fn correction_prompt(content: &str) -> String {
    [
        format!(
            "Correct any grammatical errors in the sentence '{content}' in terms of French \
             syntax, verb usage, direct object placement, indirect pronoun placement, \
             and preposition usage."
        ),
        r#"The response should be returned as raw json in the format below.  Both fields must be present.  Do not return as a fenced code block.
    {
        "corrected_sentence": "",
        "corrected_translation": ""
    }
    "#
        .to_string(),
        "Return only the corrected sentence as 'corrected_sentence'.  \
         Return a corrected translation as 'corrected_translation'."
            .to_string(),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{Negation, Pronoun, ReflexivePronoun, Tense};

    fn spec() -> SentenceSpec {
        SentenceSpec {
            infinitive: "manger".to_string(),
            auxiliary: "avoir".to_string(),
            pronoun: Pronoun::FirstPerson,
            tense: Tense::Present,
            direct_object: DirectObject::None,
            indirect_pronoun: IndirectPronoun::None,
            reflexive_pronoun: ReflexivePronoun::None,
            negation: Negation::None,
            is_correct: true,
        }
    }

    #[test]
    fn test_prompt_is_deterministic() {
        assert_eq!(sentence_prompt(&spec()), sentence_prompt(&spec()));
    }

    #[test]
    fn test_clause_order_is_fixed() {
        let prompt = sentence_prompt(&spec());

        let markers = [
            "COD (direct object)",
            "COI (indirect pronoun)",
            "right order",
            "negation",
            "verb infinitive manger",
            "agree in gender and number",
            "prepositions",
            "correctly formed",
            "English translation",
            "is_negated",
            "raw json",
            "negation field",
            "elisions",
            "properly formatted",
        ];

        let mut last = 0;
        for marker in markers {
            let position = prompt[last..]
                .find(marker)
                .unwrap_or_else(|| panic!("marker '{}' out of order", marker));
            last += position;
        }
    }

    #[test]
    fn test_incorrect_sentence_without_complements_targets_conjugation() {
        let mut spec = spec();
        spec.is_correct = false;

        let prompt = sentence_prompt(&spec);
        assert!(prompt.contains("error in its pronoun or verb conjugation"));
        assert!(prompt.contains("should not include a translation"));
    }

    #[test]
    fn test_incorrect_sentence_with_complements_targets_complements() {
        let mut spec = spec();
        spec.is_correct = false;
        spec.negation = Negation::Pas;

        let prompt = sentence_prompt(&spec);
        assert!(prompt.contains("error in any of its direct objects"));
        assert!(!prompt.contains("error in its pronoun or verb conjugation"));
    }

    #[test]
    fn test_random_negation_lists_the_closed_set() {
        let mut spec = spec();
        spec.negation = Negation::Random;

        let prompt = sentence_prompt(&spec);
        for negation in Negation::ALL {
            assert!(prompt.contains(negation.key()));
        }
    }

    #[test]
    fn test_fixed_negation_is_required() {
        let mut spec = spec();
        spec.negation = Negation::Jamais;

        let prompt = sentence_prompt(&spec);
        assert!(prompt.contains("must contain the negation jamais"));
        assert!(prompt.contains("must always include 'ne'"));
    }

    #[test]
    fn test_validation_and_correction_prompts_embed_content() {
        let validation = validation_prompt("Je suis content.");
        assert!(validation.contains("Je suis content."));
        assert!(validation.contains("'True'"));

        let correction = correction_prompt("Je suis content.");
        assert!(correction.contains("corrected_sentence"));
        assert!(correction.contains("corrected_translation"));
    }
}
