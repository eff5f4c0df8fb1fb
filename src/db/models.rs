//! Record types for the three tables.

use crate::error::Result;
use crate::grammar::{
    DirectObject, IndirectPronoun, Negation, Person, Pronoun, Reflexivity, ReflexivePronoun,
    Tense,
};
use sqlx::any::AnyRow;
use sqlx::Row;

/// A French verb, keyed by its infinitive.
#[derive(Debug, Clone, PartialEq)]
pub struct Verb {
    pub id: i64,
    pub infinitive: String,
    pub auxiliary: String,
    pub reflexivity: Reflexivity,
}

impl Verb {
    pub(crate) fn from_row(row: &AnyRow) -> Result<Self> {
        let reflexivity: String = row.try_get("reflexivity")?;
        Ok(Self {
            id: row.try_get("id")?,
            infinitive: row.try_get("infinitive")?,
            auxiliary: row.try_get("auxiliary")?,
            reflexivity: reflexivity.parse()?,
        })
    }
}

/// One tense of a verb: the six person/number surface forms.
///
/// Slots are either a surface form or unset; model output that never named
/// a slot leaves it untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Conjugation {
    pub id: i64,
    pub infinitive: String,
    pub tense: String,
    pub verb_id: i64,
    pub first_person_singular: Option<String>,
    pub second_person_singular: Option<String>,
    pub third_person_singular: Option<String>,
    pub first_person_plural: Option<String>,
    pub second_person_formal: Option<String>,
    pub third_person_plural: Option<String>,
}

impl Conjugation {
    /// Create an empty record for a verb/tense pair.
    pub fn new(infinitive: impl Into<String>, tense: impl Into<String>, verb_id: i64) -> Self {
        Self {
            id: 0,
            infinitive: infinitive.into(),
            tense: tense.into(),
            verb_id,
            first_person_singular: None,
            second_person_singular: None,
            third_person_singular: None,
            first_person_plural: None,
            second_person_formal: None,
            third_person_plural: None,
        }
    }

    /// Read the surface form of a person slot.
    pub fn form(&self, person: Person) -> Option<&str> {
        match person {
            Person::FirstSingular => self.first_person_singular.as_deref(),
            Person::SecondSingular => self.second_person_singular.as_deref(),
            Person::ThirdSingular => self.third_person_singular.as_deref(),
            Person::FirstPlural => self.first_person_plural.as_deref(),
            Person::SecondFormal => self.second_person_formal.as_deref(),
            Person::ThirdPlural => self.third_person_plural.as_deref(),
        }
    }

    /// Set the surface form of a person slot.
    pub fn set_form(&mut self, person: Person, form: impl Into<String>) {
        let form = Some(form.into());
        match person {
            Person::FirstSingular => self.first_person_singular = form,
            Person::SecondSingular => self.second_person_singular = form,
            Person::ThirdSingular => self.third_person_singular = form,
            Person::FirstPlural => self.first_person_plural = form,
            Person::SecondFormal => self.second_person_formal = form,
            Person::ThirdPlural => self.third_person_plural = form,
        }
    }

    pub(crate) fn from_row(row: &AnyRow) -> Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            infinitive: row.try_get("infinitive")?,
            tense: row.try_get("tense")?,
            verb_id: row.try_get("verb_id")?,
            first_person_singular: row.try_get("first_person_singular")?,
            second_person_singular: row.try_get("second_person_singular")?,
            third_person_singular: row.try_get("third_person_singular")?,
            first_person_plural: row.try_get("first_person_plural")?,
            second_person_formal: row.try_get("second_person_formal")?,
            third_person_plural: row.try_get("third_person_plural")?,
        })
    }
}

/// A generated example sentence.
#[derive(Debug, Clone, PartialEq)]
pub struct Sentence {
    pub id: i64,
    pub infinitive: String,
    pub auxiliary: String,
    pub pronoun: Pronoun,
    pub tense: Tense,
    pub direct_object: DirectObject,
    pub indirect_pronoun: IndirectPronoun,
    pub reflexive_pronoun: ReflexivePronoun,
    pub negation: Negation,
    pub content: String,
    pub translation: String,
    /// False when the sentence was generated intentionally wrong for
    /// training material.
    pub is_correct: bool,
}

impl Sentence {
    pub(crate) fn from_row(row: &AnyRow) -> Result<Self> {
        let pronoun: String = row.try_get("pronoun")?;
        let tense: String = row.try_get("tense")?;
        let direct_object: String = row.try_get("direct_object")?;
        let indirect_pronoun: String = row.try_get("indirect_pronoun")?;
        let reflexive_pronoun: String = row.try_get("reflexive_pronoun")?;
        let negation: String = row.try_get("negation")?;
        let is_correct: i32 = row.try_get("is_correct")?;

        Ok(Self {
            id: row.try_get("id")?,
            infinitive: row.try_get("infinitive")?,
            auxiliary: row.try_get("auxiliary")?,
            pronoun: pronoun.parse()?,
            tense: tense.parse()?,
            direct_object: direct_object.parse()?,
            indirect_pronoun: indirect_pronoun.parse()?,
            reflexive_pronoun: reflexive_pronoun.parse()?,
            negation: negation.parse()?,
            content: row.try_get("content")?,
            translation: row.try_get("translation")?,
            is_correct: is_correct != 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conjugation_slots_start_unset() {
        let conjugation = Conjugation::new("être", "present", 1);
        for person in Person::ALL {
            assert_eq!(conjugation.form(person), None);
        }
    }

    #[test]
    fn test_set_form_targets_one_slot() {
        let mut conjugation = Conjugation::new("être", "present", 1);
        conjugation.set_form(Person::ThirdSingular, "est");

        assert_eq!(conjugation.form(Person::ThirdSingular), Some("est"));
        for person in Person::ALL {
            if person != Person::ThirdSingular {
                assert_eq!(conjugation.form(person), None);
            }
        }
    }
}
