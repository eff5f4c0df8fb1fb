//! Verb fetch orchestration
//!
//! The per-verb pipeline is strictly sequential: build prompt, call the
//! provider, repair and parse the response, then upsert the verb row and
//! one conjugation row per tense block inside a single transaction. Batch
//! initialization fans out over the hardcoded verb lists under a
//! semaphore-bounded gate owned by the fetcher; each verb's failure is
//! collected, never re-raised into its siblings.

pub mod payload;
pub mod prompts;
pub mod reconcile;

use crate::db::models::{Conjugation, Verb};
use crate::db::{store, Database};
use crate::error::{Result, VerbForgeError};
use crate::grammar::{Reflexivity, AUXILIARIES, COMMON_IRREGULARS};
use crate::llm::repair;
use crate::llm::ChatProvider;
use crate::verbs::payload::VerbPayload;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// A verb together with its stored conjugations.
#[derive(Debug, Clone)]
pub struct FetchedVerb {
    pub verb: Verb,
    pub conjugations: Vec<Conjugation>,
}

/// Outcome of a batch initialization run.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Infinitives fetched and persisted.
    pub succeeded: Vec<String>,
    /// Infinitives whose pipeline failed, with the failure.
    pub failed: Vec<(String, VerbForgeError)>,
}

/// Orchestrates verb fetches against one provider and one database.
#[derive(Clone)]
pub struct VerbFetcher {
    provider: Arc<dyn ChatProvider>,
    db: Database,
    gate: Arc<Semaphore>,
}

impl VerbFetcher {
    /// Create a fetcher with its own concurrency gate.
    pub fn new(provider: Arc<dyn ChatProvider>, db: Database, concurrency: usize) -> Self {
        Self {
            provider,
            db,
            gate: Arc::new(Semaphore::new(concurrency)),
        }
    }

    /// Fetch a verb from the model and persist it.
    ///
    /// Any failure (API, parse, persistence) aborts this verb's flow and
    /// rolls back its pending changes.
    pub async fn fetch_verb(&self, requested_verb: &str) -> Result<FetchedVerb> {
        info!(verb = %requested_verb, "fetching verb");

        let prompt = prompts::build_verb_prompt(requested_verb);
        debug!(%prompt, "verb prompt");

        let raw = self.provider.complete(&prompt).await?;
        debug!(raw = %raw, "raw completion");

        let payload: VerbPayload = repair::parse_as(&raw)?;
        let reflexivity: Reflexivity = payload.reflexivity.parse()?;

        let mut tx = self.db.pool().begin().await?;

        let verb = store::upsert_verb(
            &mut tx,
            &store::VerbFields {
                infinitive: payload.infinitive.clone(),
                auxiliary: payload.auxiliary.clone(),
                reflexivity,
            },
        )
        .await?;

        let mut conjugations = Vec::with_capacity(payload.tenses.len());
        for block in &payload.tenses {
            let existing =
                store::find_conjugation(&mut tx, &payload.infinitive, &block.tense).await?;

            let mut record = existing
                .unwrap_or_else(|| Conjugation::new(&payload.infinitive, &block.tense, verb.id));
            record.verb_id = verb.id;

            reconcile::apply_tense_block(&mut record, block);

            conjugations.push(store::upsert_conjugation(&mut tx, &record).await?);
        }

        tx.commit().await?;

        Ok(FetchedVerb { verb, conjugations })
    }

    /// Read a verb from the database, fetching it from the model on a miss.
    pub async fn get_verb(&self, infinitive: &str) -> Result<FetchedVerb> {
        if let Some(verb) = store::find_verb(self.db.pool(), infinitive).await? {
            let conjugations = store::find_conjugations(self.db.pool(), infinitive).await?;
            return Ok(FetchedVerb { verb, conjugations });
        }

        self.fetch_verb(infinitive).await
    }

    /// Pick a stored verb at random.
    pub async fn random_verb(&self) -> Result<FetchedVerb> {
        let verb = store::random_verb(self.db.pool()).await?.ok_or_else(|| {
            VerbForgeError::NotFound(
                "no verbs in the database; run `database init` first".to_string(),
            )
        })?;

        let conjugations = store::find_conjugations(self.db.pool(), &verb.infinitive).await?;
        Ok(FetchedVerb { verb, conjugations })
    }

    /// Fetch the auxiliaries (and optionally the common irregulars),
    /// bounded by the concurrency gate. Failures are collected per verb.
    pub async fn init_defaults(&self, with_common_irregulars: bool) -> BatchReport {
        let mut verbs: Vec<&str> = AUXILIARIES.to_vec();
        if with_common_irregulars {
            verbs.extend(COMMON_IRREGULARS);
        }

        let mut tasks = JoinSet::new();
        for verb in verbs {
            let fetcher = self.clone();
            let gate = self.gate.clone();
            let verb = verb.to_string();

            tasks.spawn(async move {
                let _permit = gate.acquire_owned().await.expect("concurrency gate closed");
                let result = fetcher.fetch_verb(&verb).await;
                (verb, result)
            });
        }

        let mut report = BatchReport::default();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((verb, Ok(_))) => report.succeeded.push(verb),
                Ok((verb, Err(error))) => {
                    warn!(verb = %verb, error = %error, "verb fetch failed");
                    report.failed.push((verb, error));
                }
                Err(join_error) => {
                    warn!(error = %join_error, "verb fetch task aborted");
                }
            }
        }

        report
    }
}
