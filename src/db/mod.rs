//! Database module
//!
//! Connection handling, record types and the natural-key upsert store for
//! the `verbs`, `conjugations` and `sentences` tables.

pub mod connection;
pub mod models;
pub mod store;

pub use connection::{Database, DatabaseBackend};
pub use models::{Conjugation, Sentence, Verb};
