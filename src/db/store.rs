//! Natural-key upserts and lookups
//!
//! Verbs are keyed by infinitive, conjugations by (infinitive, tense).
//! An upsert selects the most recent row for the key, updates it in place
//! when present, and inserts otherwise. Upserts run inside the per-verb
//! transaction; a failure anywhere in the scope rolls the verb back whole.

use crate::db::models::{Conjugation, Sentence, Verb};
use crate::error::Result;
use crate::grammar::Reflexivity;
use sqlx::{Any, AnyPool, Row, Transaction};
use tracing::info;

/// Fields of a verb row, as reconciled from a model response.
#[derive(Debug, Clone)]
pub struct VerbFields {
    pub infinitive: String,
    pub auxiliary: String,
    pub reflexivity: Reflexivity,
}

const SELECT_VERB: &str =
    "SELECT id, infinitive, auxiliary, reflexivity FROM verbs WHERE infinitive = $1 \
     ORDER BY id DESC LIMIT 1";

const SELECT_CONJUGATION_COLUMNS: &str =
    "SELECT id, infinitive, tense, verb_id, first_person_singular, second_person_singular, \
     third_person_singular, first_person_plural, second_person_formal, third_person_plural \
     FROM conjugations";

/// Insert or update a verb row by infinitive.
pub async fn upsert_verb(tx: &mut Transaction<'_, Any>, fields: &VerbFields) -> Result<Verb> {
    let existing = sqlx::query(SELECT_VERB)
        .bind(&fields.infinitive)
        .fetch_optional(&mut **tx)
        .await?;

    match existing {
        Some(row) => {
            let current = Verb::from_row(&row)?;
            info!(
                infinitive = %fields.infinitive,
                "verb already exists and will be updated if needed"
            );

            sqlx::query("UPDATE verbs SET auxiliary = $1, reflexivity = $2 WHERE id = $3")
                .bind(&fields.auxiliary)
                .bind(fields.reflexivity.key())
                .bind(current.id)
                .execute(&mut **tx)
                .await?;

            Ok(Verb {
                id: current.id,
                infinitive: fields.infinitive.clone(),
                auxiliary: fields.auxiliary.clone(),
                reflexivity: fields.reflexivity,
            })
        }
        None => {
            info!(
                infinitive = %fields.infinitive,
                "verb does not yet exist in the database"
            );

            let row = sqlx::query(
                "INSERT INTO verbs (infinitive, auxiliary, reflexivity) VALUES ($1, $2, $3) \
                 RETURNING id",
            )
            .bind(&fields.infinitive)
            .bind(&fields.auxiliary)
            .bind(fields.reflexivity.key())
            .fetch_one(&mut **tx)
            .await?;

            Ok(Verb {
                id: row.try_get("id")?,
                infinitive: fields.infinitive.clone(),
                auxiliary: fields.auxiliary.clone(),
                reflexivity: fields.reflexivity,
            })
        }
    }
}

/// Look up the most recent conjugation row for a verb/tense pair.
pub async fn find_conjugation(
    tx: &mut Transaction<'_, Any>,
    infinitive: &str,
    tense: &str,
) -> Result<Option<Conjugation>> {
    let query = format!(
        "{} WHERE infinitive = $1 AND tense = $2 ORDER BY id DESC LIMIT 1",
        SELECT_CONJUGATION_COLUMNS
    );

    let row = sqlx::query(&query)
        .bind(infinitive)
        .bind(tense)
        .fetch_optional(&mut **tx)
        .await?;

    row.map(|row| Conjugation::from_row(&row)).transpose()
}

/// Insert or update a conjugation row by (infinitive, tense).
pub async fn upsert_conjugation(
    tx: &mut Transaction<'_, Any>,
    record: &Conjugation,
) -> Result<Conjugation> {
    let existing = find_conjugation(tx, &record.infinitive, &record.tense).await?;

    let id = match existing {
        Some(current) => {
            info!(
                infinitive = %record.infinitive,
                tense = %record.tense,
                "updating conjugation"
            );

            sqlx::query(
                "UPDATE conjugations SET verb_id = $1, first_person_singular = $2, \
                 second_person_singular = $3, third_person_singular = $4, \
                 first_person_plural = $5, second_person_formal = $6, \
                 third_person_plural = $7 WHERE id = $8",
            )
            .bind(record.verb_id)
            .bind(&record.first_person_singular)
            .bind(&record.second_person_singular)
            .bind(&record.third_person_singular)
            .bind(&record.first_person_plural)
            .bind(&record.second_person_formal)
            .bind(&record.third_person_plural)
            .bind(current.id)
            .execute(&mut **tx)
            .await?;

            current.id
        }
        None => {
            info!(
                infinitive = %record.infinitive,
                tense = %record.tense,
                "adding conjugation"
            );

            let row = sqlx::query(
                "INSERT INTO conjugations (infinitive, tense, verb_id, first_person_singular, \
                 second_person_singular, third_person_singular, first_person_plural, \
                 second_person_formal, third_person_plural) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING id",
            )
            .bind(&record.infinitive)
            .bind(&record.tense)
            .bind(record.verb_id)
            .bind(&record.first_person_singular)
            .bind(&record.second_person_singular)
            .bind(&record.third_person_singular)
            .bind(&record.first_person_plural)
            .bind(&record.second_person_formal)
            .bind(&record.third_person_plural)
            .fetch_one(&mut **tx)
            .await?;

            row.try_get("id")?
        }
    };

    Ok(Conjugation {
        id,
        ..record.clone()
    })
}

/// Look up a verb by infinitive (most recent row wins).
pub async fn find_verb(pool: &AnyPool, infinitive: &str) -> Result<Option<Verb>> {
    let row = sqlx::query(SELECT_VERB)
        .bind(infinitive)
        .fetch_optional(pool)
        .await?;

    row.map(|row| Verb::from_row(&row)).transpose()
}

/// All conjugation rows of a verb, in insertion order.
pub async fn find_conjugations(pool: &AnyPool, infinitive: &str) -> Result<Vec<Conjugation>> {
    let query = format!(
        "{} WHERE infinitive = $1 ORDER BY id",
        SELECT_CONJUGATION_COLUMNS
    );

    let rows = sqlx::query(&query).bind(infinitive).fetch_all(pool).await?;

    rows.iter().map(Conjugation::from_row).collect()
}

/// Pick one stored verb at random.
pub async fn random_verb(pool: &AnyPool) -> Result<Option<Verb>> {
    let row = sqlx::query(
        "SELECT id, infinitive, auxiliary, reflexivity FROM verbs ORDER BY RANDOM() LIMIT 1",
    )
    .fetch_optional(pool)
    .await?;

    row.map(|row| Verb::from_row(&row)).transpose()
}

/// Persist a generated sentence.
pub async fn insert_sentence(pool: &AnyPool, sentence: &Sentence) -> Result<Sentence> {
    let row = sqlx::query(
        "INSERT INTO sentences (infinitive, auxiliary, pronoun, tense, direct_object, \
         indirect_pronoun, reflexive_pronoun, negation, content, translation, is_correct) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) RETURNING id",
    )
    .bind(&sentence.infinitive)
    .bind(&sentence.auxiliary)
    .bind(sentence.pronoun.key())
    .bind(sentence.tense.key())
    .bind(sentence.direct_object.key())
    .bind(sentence.indirect_pronoun.key())
    .bind(sentence.reflexive_pronoun.key())
    .bind(sentence.negation.key())
    .bind(&sentence.content)
    .bind(&sentence.translation)
    .bind(if sentence.is_correct { 1_i32 } else { 0_i32 })
    .fetch_one(pool)
    .await?;

    Ok(Sentence {
        id: row.try_get("id")?,
        ..sentence.clone()
    })
}

/// All stored sentences for a verb, in insertion order.
pub async fn find_sentences(pool: &AnyPool, infinitive: &str) -> Result<Vec<Sentence>> {
    let rows = sqlx::query(
        "SELECT id, infinitive, auxiliary, pronoun, tense, direct_object, indirect_pronoun, \
         reflexive_pronoun, negation, content, translation, is_correct \
         FROM sentences WHERE infinitive = $1 ORDER BY id",
    )
    .bind(infinitive)
    .fetch_all(pool)
    .await?;

    rows.iter().map(Sentence::from_row).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::Database;
    use crate::grammar::{
        DirectObject, IndirectPronoun, Negation, Person, Pronoun, ReflexivePronoun, Tense,
    };

    async fn test_database() -> Database {
        let database = Database::connect_with_options("sqlite::memory:", 1)
            .await
            .unwrap();
        database.ensure_schema().await.unwrap();
        database
    }

    async fn verb_count(pool: &AnyPool, infinitive: &str) -> i64 {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM verbs WHERE infinitive = $1")
            .bind(infinitive)
            .fetch_one(pool)
            .await
            .unwrap();
        row.try_get("n").unwrap()
    }

    fn etre_fields() -> VerbFields {
        VerbFields {
            infinitive: "être".to_string(),
            auxiliary: "avoir".to_string(),
            reflexivity: Reflexivity::None,
        }
    }

    #[test]
    fn test_upsert_verb_is_idempotent() {
        tokio_test::block_on(async {
            let database = test_database().await;

            let mut tx = database.pool().begin().await.unwrap();
            let first = upsert_verb(&mut tx, &etre_fields()).await.unwrap();
            tx.commit().await.unwrap();

            let mut tx = database.pool().begin().await.unwrap();
            let second = upsert_verb(&mut tx, &etre_fields()).await.unwrap();
            tx.commit().await.unwrap();

            assert_eq!(first, second);
            assert_eq!(verb_count(database.pool(), "être").await, 1);
        });
    }

    #[test]
    fn test_upsert_verb_updates_in_place() {
        tokio_test::block_on(async {
            let database = test_database().await;

            let mut tx = database.pool().begin().await.unwrap();
            let first = upsert_verb(&mut tx, &etre_fields()).await.unwrap();
            tx.commit().await.unwrap();

            let mut changed = etre_fields();
            changed.auxiliary = "être".to_string();

            let mut tx = database.pool().begin().await.unwrap();
            let second = upsert_verb(&mut tx, &changed).await.unwrap();
            tx.commit().await.unwrap();

            assert_eq!(second.id, first.id);
            assert_eq!(verb_count(database.pool(), "être").await, 1);

            let stored = find_verb(database.pool(), "être").await.unwrap().unwrap();
            assert_eq!(stored.auxiliary, "être");
        });
    }

    #[test]
    fn test_upsert_conjugation_keyed_by_infinitive_and_tense() {
        tokio_test::block_on(async {
            let database = test_database().await;

            let mut tx = database.pool().begin().await.unwrap();
            let verb = upsert_verb(&mut tx, &etre_fields()).await.unwrap();

            let mut present = Conjugation::new("être", "present", verb.id);
            present.set_form(Person::FirstSingular, "suis");
            let present = upsert_conjugation(&mut tx, &present).await.unwrap();

            let mut imparfait = Conjugation::new("être", "imparfait", verb.id);
            imparfait.set_form(Person::FirstSingular, "étais");
            upsert_conjugation(&mut tx, &imparfait).await.unwrap();

            // Same key again: updates the existing row.
            let mut replacement = Conjugation::new("être", "present", verb.id);
            replacement.set_form(Person::FirstSingular, "suis");
            replacement.set_form(Person::SecondSingular, "es");
            let replacement = upsert_conjugation(&mut tx, &replacement).await.unwrap();
            tx.commit().await.unwrap();

            assert_eq!(replacement.id, present.id);

            let stored = find_conjugations(database.pool(), "être").await.unwrap();
            assert_eq!(stored.len(), 2);
            assert_eq!(stored[0].form(Person::SecondSingular), Some("es"));
        });
    }

    #[test]
    fn test_random_verb_on_empty_database() {
        tokio_test::block_on(async {
            let database = test_database().await;
            assert!(random_verb(database.pool()).await.unwrap().is_none());
        });
    }

    #[test]
    fn test_sentence_round_trip() {
        tokio_test::block_on(async {
            let database = test_database().await;

            let sentence = Sentence {
                id: 0,
                infinitive: "être".to_string(),
                auxiliary: "avoir".to_string(),
                pronoun: Pronoun::FirstPerson,
                tense: Tense::Present,
                direct_object: DirectObject::None,
                indirect_pronoun: IndirectPronoun::None,
                reflexive_pronoun: ReflexivePronoun::None,
                negation: Negation::Pas,
                content: "Je ne suis pas fatigué.".to_string(),
                translation: "I am not tired.".to_string(),
                is_correct: true,
            };

            let inserted = insert_sentence(database.pool(), &sentence).await.unwrap();
            assert!(inserted.id > 0);

            let stored = find_sentences(database.pool(), "être").await.unwrap();
            assert_eq!(stored.len(), 1);
            assert_eq!(stored[0].negation, Negation::Pas);
            assert_eq!(stored[0].content, sentence.content);
            assert!(stored[0].is_correct);
        });
    }
}
