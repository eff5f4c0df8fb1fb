//! Prompt assembly for verb conjugation requests.
//!
//! Pure string builders: the same infinitive always yields the same prompt
//! byte for byte.

/// Rule the model follows to report reflexivity.
fn reflexivity_rule() -> &'static str {
    "If the verb can only be used reflexively then return 'mandatory', \
     if the verb can be used both reflexively and non-reflexively return 'conditional', \
     otherwise return 'no'."
}

/// Shape of one tense block in the response.
fn tense_block_format() -> &'static str {
    "{ verb tense (as 'tense'): conjugations: [ { french pronoun (as 'pronoun'): \
     conjugated verb, without its pronoun (as 'verb'): \
     english translation (as 'translation'): } ] }"
}

/// Normalization rules the responses must follow.
fn formatting_rules() -> &'static str {
    "Do not return any newlines in the response. \
     Always use both genders in the 3rd person pronouns. \
     Always include 'on' for the 3rd person singular form. \
     Replace spaces with _ in the tense names. \
     Remove all accent marks on the tense names. \
     The first person pronoun should always be 'je' instead of j' or j. \
     The pronouns should always be \"-\" for participles. \
     All json property names and values need to be enclosed in double quotes."
}

/// Build the instruction requesting a verb's conjugations, participle and
/// auxiliary as a single JSON object.
pub fn build_verb_prompt(infinitive: &str) -> String {
    format!(
        "Give me the present, passé composé (as passe_compose), imparfait, \
         future simple tense (as future_simple), and past participle (as participle), \
         and auxiliary verb of the French verb {infinitive}, with english translations, \
         with the response being a json object of the format: \
         auxiliary: infinitive: {infinitive} reflexivity: {reflexivity} \
         verb tenses (as 'tenses'): [ {tense_format} ] {rules}",
        infinitive = infinitive,
        reflexivity = reflexivity_rule(),
        tense_format = tense_block_format(),
        rules = formatting_rules(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_is_deterministic() {
        assert_eq!(build_verb_prompt("être"), build_verb_prompt("être"));
        assert_ne!(build_verb_prompt("être"), build_verb_prompt("avoir"));
    }

    #[test]
    fn test_prompt_names_every_requested_tense() {
        let prompt = build_verb_prompt("aller");
        for marker in [
            "present",
            "passe_compose",
            "imparfait",
            "future_simple",
            "participle",
        ] {
            assert!(prompt.contains(marker), "missing {}", marker);
        }
    }

    #[test]
    fn test_prompt_embeds_the_infinitive_and_rules() {
        let prompt = build_verb_prompt("se lever");
        assert!(prompt.contains("se lever"));
        assert!(prompt.contains("auxiliary"));
        assert!(prompt.contains("reflexivity"));
        assert!(prompt.contains("double quotes"));
        assert!(prompt.contains("Do not return any newlines"));
    }
}
