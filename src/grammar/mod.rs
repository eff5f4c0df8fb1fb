//! Grammatical enumerations
//!
//! Closed sets used across prompts, persistence and reconciliation. Each
//! variant carries a stable storage key (`key`) and, where prompts need one,
//! a human-readable fragment (`prompt`). Both are plain lookup tables so the
//! mappings stay exhaustive and testable.

use crate::error::VerbForgeError;
use std::fmt;
use std::str::FromStr;

/// The two French auxiliary verbs.
pub const AUXILIARIES: [&str; 2] = ["avoir", "être"];

/// Common irregular verbs fetched alongside the auxiliaries during
/// database initialization.
pub const COMMON_IRREGULARS: [&str; 10] = [
    "aller", "devoir", "dire", "faire", "pouvoir", "prendre", "savoir", "venir", "voir", "vouloir",
];

/// Verb tenses (and the participle pseudo-tense) requested from the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tense {
    Present,
    PasseCompose,
    Imparfait,
    FutureSimple,
    Participle,
}

impl Tense {
    pub const ALL: [Tense; 5] = [
        Tense::Present,
        Tense::PasseCompose,
        Tense::Imparfait,
        Tense::FutureSimple,
        Tense::Participle,
    ];

    /// Storage key: lowercase, underscores for spaces, accents stripped.
    pub fn key(&self) -> &'static str {
        match self {
            Tense::Present => "present",
            Tense::PasseCompose => "passe_compose",
            Tense::Imparfait => "imparfait",
            Tense::FutureSimple => "future_simple",
            Tense::Participle => "participle",
        }
    }

    /// Fragment used when naming the tense inside a prompt.
    pub fn prompt(&self) -> &'static str {
        match self {
            Tense::Present => "present",
            Tense::PasseCompose => "passé composé",
            Tense::Imparfait => "imparfait",
            Tense::FutureSimple => "future simple",
            Tense::Participle => "past participle",
        }
    }
}

impl FromStr for Tense {
    type Err = VerbForgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "present" => Ok(Tense::Present),
            "passe_compose" => Ok(Tense::PasseCompose),
            "imparfait" => Ok(Tense::Imparfait),
            "future_simple" => Ok(Tense::FutureSimple),
            "participle" => Ok(Tense::Participle),
            _ => Err(VerbForgeError::UnknownVariant {
                kind: "tense",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Tense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Whether a verb takes a reflexive pronoun.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reflexivity {
    None,
    Conditional,
    Mandatory,
}

impl Reflexivity {
    pub fn key(&self) -> &'static str {
        match self {
            Reflexivity::None => "none",
            Reflexivity::Conditional => "conditional",
            Reflexivity::Mandatory => "mandatory",
        }
    }
}

impl FromStr for Reflexivity {
    type Err = VerbForgeError;

    // The verb prompt asks the model for 'no' rather than 'none'; accept both.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" | "no" => Ok(Reflexivity::None),
            "conditional" => Ok(Reflexivity::Conditional),
            "mandatory" => Ok(Reflexivity::Mandatory),
            _ => Err(VerbForgeError::UnknownVariant {
                kind: "reflexivity",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Reflexivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// The six person/number slots of a conjugation record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Person {
    FirstSingular,
    SecondSingular,
    ThirdSingular,
    FirstPlural,
    SecondFormal,
    ThirdPlural,
}

impl Person {
    pub const ALL: [Person; 6] = [
        Person::FirstSingular,
        Person::SecondSingular,
        Person::ThirdSingular,
        Person::FirstPlural,
        Person::SecondFormal,
        Person::ThirdPlural,
    ];

    /// Column name of the slot in the `conjugations` table.
    pub fn column(&self) -> &'static str {
        match self {
            Person::FirstSingular => "first_person_singular",
            Person::SecondSingular => "second_person_singular",
            Person::ThirdSingular => "third_person_singular",
            Person::FirstPlural => "first_person_plural",
            Person::SecondFormal => "second_person_formal",
            Person::ThirdPlural => "third_person_plural",
        }
    }
}

/// Subject pronoun classes for generated sentences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pronoun {
    FirstPerson,
    SecondPerson,
    ThirdPerson,
    FirstPersonPlural,
    SecondPersonPlural,
    ThirdPersonPlural,
}

impl Pronoun {
    pub fn key(&self) -> &'static str {
        match self {
            Pronoun::FirstPerson => "first_person",
            Pronoun::SecondPerson => "second_person",
            Pronoun::ThirdPerson => "third_person",
            Pronoun::FirstPersonPlural => "first_person_plural",
            Pronoun::SecondPersonPlural => "second_person_plural",
            Pronoun::ThirdPersonPlural => "third_person_plural",
        }
    }

    pub fn prompt(&self) -> &'static str {
        match self {
            Pronoun::FirstPerson => "first person",
            Pronoun::SecondPerson => "second person",
            Pronoun::ThirdPerson => "third person",
            Pronoun::FirstPersonPlural => "first person plural",
            Pronoun::SecondPersonPlural => "second person plural",
            Pronoun::ThirdPersonPlural => "third person plural",
        }
    }
}

impl FromStr for Pronoun {
    type Err = VerbForgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first_person" => Ok(Pronoun::FirstPerson),
            "second_person" => Ok(Pronoun::SecondPerson),
            "third_person" => Ok(Pronoun::ThirdPerson),
            "first_person_plural" => Ok(Pronoun::FirstPersonPlural),
            "second_person_plural" => Ok(Pronoun::SecondPersonPlural),
            "third_person_plural" => Ok(Pronoun::ThirdPersonPlural),
            _ => Err(VerbForgeError::UnknownVariant {
                kind: "pronoun",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Pronoun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Direct object (COD) gender class requested for a sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectObject {
    None,
    Masculine,
    Feminine,
    Plural,
    Random,
}

impl DirectObject {
    pub fn key(&self) -> &'static str {
        match self {
            DirectObject::None => "none",
            DirectObject::Masculine => "masculine",
            DirectObject::Feminine => "feminine",
            DirectObject::Plural => "plural",
            DirectObject::Random => "random",
        }
    }
}

impl FromStr for DirectObject {
    type Err = VerbForgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(DirectObject::None),
            "masculine" => Ok(DirectObject::Masculine),
            "feminine" => Ok(DirectObject::Feminine),
            "plural" => Ok(DirectObject::Plural),
            "random" => Ok(DirectObject::Random),
            _ => Err(VerbForgeError::UnknownVariant {
                kind: "direct object",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for DirectObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Indirect pronoun (COI) gender class requested for a sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndirectPronoun {
    None,
    Masculine,
    Feminine,
    Plural,
    Random,
}

impl IndirectPronoun {
    pub fn key(&self) -> &'static str {
        match self {
            IndirectPronoun::None => "none",
            IndirectPronoun::Masculine => "masculine",
            IndirectPronoun::Feminine => "feminine",
            IndirectPronoun::Plural => "plural",
            IndirectPronoun::Random => "random",
        }
    }
}

impl FromStr for IndirectPronoun {
    type Err = VerbForgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(IndirectPronoun::None),
            "masculine" => Ok(IndirectPronoun::Masculine),
            "feminine" => Ok(IndirectPronoun::Feminine),
            "plural" => Ok(IndirectPronoun::Plural),
            "random" => Ok(IndirectPronoun::Random),
            _ => Err(VerbForgeError::UnknownVariant {
                kind: "indirect pronoun",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for IndirectPronoun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Reflexive pronoun person for a sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReflexivePronoun {
    None,
    FirstPerson,
    SecondPerson,
    ThirdPerson,
}

impl ReflexivePronoun {
    pub fn key(&self) -> &'static str {
        match self {
            ReflexivePronoun::None => "none",
            ReflexivePronoun::FirstPerson => "first_person",
            ReflexivePronoun::SecondPerson => "second_person",
            ReflexivePronoun::ThirdPerson => "third_person",
        }
    }
}

impl FromStr for ReflexivePronoun {
    type Err = VerbForgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(ReflexivePronoun::None),
            "first_person" => Ok(ReflexivePronoun::FirstPerson),
            "second_person" => Ok(ReflexivePronoun::SecondPerson),
            "third_person" => Ok(ReflexivePronoun::ThirdPerson),
            _ => Err(VerbForgeError::UnknownVariant {
                kind: "reflexive pronoun",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ReflexivePronoun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Negation types a sentence may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Negation {
    None,
    Pas,
    Jamais,
    Rien,
    Personne,
    Plus,
    Aucun,
    Encore,
    Random,
}

impl Negation {
    pub const ALL: [Negation; 9] = [
        Negation::None,
        Negation::Pas,
        Negation::Jamais,
        Negation::Rien,
        Negation::Personne,
        Negation::Plus,
        Negation::Aucun,
        Negation::Encore,
        Negation::Random,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Negation::None => "none",
            Negation::Pas => "pas",
            Negation::Jamais => "jamais",
            Negation::Rien => "rien",
            Negation::Personne => "personne",
            Negation::Plus => "plus",
            Negation::Aucun => "aucun",
            Negation::Encore => "encore",
            Negation::Random => "random",
        }
    }
}

impl FromStr for Negation {
    type Err = VerbForgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Negation::None),
            "pas" => Ok(Negation::Pas),
            "jamais" => Ok(Negation::Jamais),
            "rien" => Ok(Negation::Rien),
            "personne" => Ok(Negation::Personne),
            "plus" => Ok(Negation::Plus),
            "aucun" => Ok(Negation::Aucun),
            "encore" => Ok(Negation::Encore),
            "random" => Ok(Negation::Random),
            _ => Err(VerbForgeError::UnknownVariant {
                kind: "negation",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Negation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}
