//! Pronoun-label reconciliation
//!
//! Maps the pronoun labels of a parsed tense block onto the six
//! person/number slots of a conjugation record. The mapping is a fixed,
//! case-sensitive dispatch table; the `-` label (participles, which have no
//! person) populates every slot. Labels outside the table are logged and
//! ignored so one drifted label cannot abort a whole verb.

use crate::db::models::Conjugation;
use crate::grammar::Person;
use crate::verbs::payload::TensePayload;
use tracing::warn;

const FIRST_SINGULAR: &[Person] = &[Person::FirstSingular];
const SECOND_SINGULAR: &[Person] = &[Person::SecondSingular];
const THIRD_SINGULAR: &[Person] = &[Person::ThirdSingular];
const FIRST_PLURAL: &[Person] = &[Person::FirstPlural];
const SECOND_FORMAL: &[Person] = &[Person::SecondFormal];
const THIRD_PLURAL: &[Person] = &[Person::ThirdPlural];
const ALL_PERSONS: &[Person] = &Person::ALL;

/// Accepted spellings per slot.
const DISPATCH: &[(&str, &[Person])] = &[
    ("je", FIRST_SINGULAR),
    ("j'", FIRST_SINGULAR),
    ("j", FIRST_SINGULAR),
    ("tu", SECOND_SINGULAR),
    ("il/elle/on", THIRD_SINGULAR),
    ("il", THIRD_SINGULAR),
    ("elle", THIRD_SINGULAR),
    ("on", THIRD_SINGULAR),
    ("nous", FIRST_PLURAL),
    ("vous", SECOND_FORMAL),
    ("ils/elles", THIRD_PLURAL),
    ("ils", THIRD_PLURAL),
    ("elles", THIRD_PLURAL),
    ("-", ALL_PERSONS),
];

/// Slots a pronoun label resolves to, if any.
pub fn slots_for_label(label: &str) -> Option<&'static [Person]> {
    DISPATCH
        .iter()
        .find(|(candidate, _)| *candidate == label)
        .map(|(_, slots)| *slots)
}

/// Populate a conjugation record from one parsed tense block.
pub fn apply_tense_block(record: &mut Conjugation, block: &TensePayload) {
    for entry in &block.conjugations {
        // Null forms happen; only set a slot the model actually filled.
        let Some(form) = entry.verb.as_deref() else {
            continue;
        };

        match slots_for_label(&entry.pronoun) {
            Some(slots) => {
                for person in slots {
                    record.set_form(*person, form);
                }
            }
            None => {
                warn!(pronoun = %entry.pronoun, "ignoring unrecognized pronoun label");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verbs::payload::PronounEntry;

    fn entry(pronoun: &str, verb: &str) -> PronounEntry {
        PronounEntry {
            pronoun: pronoun.to_string(),
            verb: Some(verb.to_string()),
            translation: None,
        }
    }

    fn block(entries: Vec<PronounEntry>) -> TensePayload {
        TensePayload {
            tense: "present".to_string(),
            conjugations: entries,
        }
    }

    #[test]
    fn test_every_label_sets_exactly_its_slot() {
        let cases: &[(&str, Person)] = &[
            ("je", Person::FirstSingular),
            ("j'", Person::FirstSingular),
            ("j", Person::FirstSingular),
            ("tu", Person::SecondSingular),
            ("il/elle/on", Person::ThirdSingular),
            ("il", Person::ThirdSingular),
            ("elle", Person::ThirdSingular),
            ("on", Person::ThirdSingular),
            ("nous", Person::FirstPlural),
            ("vous", Person::SecondFormal),
            ("ils/elles", Person::ThirdPlural),
            ("ils", Person::ThirdPlural),
            ("elles", Person::ThirdPlural),
        ];

        for (label, expected) in cases {
            let mut record = Conjugation::new("être", "present", 1);
            apply_tense_block(&mut record, &block(vec![entry(label, "X")]));

            for person in Person::ALL {
                if person == *expected {
                    assert_eq!(record.form(person), Some("X"), "label {}", label);
                } else {
                    assert_eq!(record.form(person), None, "label {}", label);
                }
            }
        }
    }

    #[test]
    fn test_dash_label_sets_all_six_slots() {
        let mut record = Conjugation::new("être", "participle", 1);
        apply_tense_block(&mut record, &block(vec![entry("-", "été")]));

        for person in Person::ALL {
            assert_eq!(record.form(person), Some("été"));
        }
    }

    #[test]
    fn test_unrecognized_label_is_ignored() {
        let mut record = Conjugation::new("être", "present", 1);
        apply_tense_block(&mut record, &block(vec![entry("foo", "X")]));

        for person in Person::ALL {
            assert_eq!(record.form(person), None);
        }
    }

    #[test]
    fn test_dispatch_is_case_sensitive() {
        assert!(slots_for_label("Je").is_none());
        assert!(slots_for_label("VOUS").is_none());
    }

    #[test]
    fn test_null_form_leaves_slot_untouched() {
        let mut record = Conjugation::new("être", "present", 1);
        record.set_form(Person::FirstSingular, "suis");

        let null_entry = PronounEntry {
            pronoun: "je".to_string(),
            verb: None,
            translation: None,
        };
        apply_tense_block(&mut record, &block(vec![null_entry]));

        assert_eq!(record.form(Person::FirstSingular), Some("suis"));
    }

    #[test]
    fn test_full_tense_block() {
        let mut record = Conjugation::new("être", "present", 1);
        apply_tense_block(
            &mut record,
            &block(vec![
                entry("je", "suis"),
                entry("tu", "es"),
                entry("il/elle/on", "est"),
                entry("nous", "sommes"),
                entry("vous", "êtes"),
                entry("ils/elles", "sont"),
            ]),
        );

        assert_eq!(record.form(Person::FirstSingular), Some("suis"));
        assert_eq!(record.form(Person::SecondSingular), Some("es"));
        assert_eq!(record.form(Person::ThirdSingular), Some("est"));
        assert_eq!(record.form(Person::FirstPlural), Some("sommes"));
        assert_eq!(record.form(Person::SecondFormal), Some("êtes"));
        assert_eq!(record.form(Person::ThirdPlural), Some("sont"));
    }
}
