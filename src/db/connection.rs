//! Database connection abstraction
//!
//! Backend detection from the connection URL and a pooled handle used by
//! the store. The schema is bootstrapped here; the only deletion path in
//! the system is the whole-database `clear`.

use crate::error::{Result, VerbForgeError};
use sqlx::any::AnyPoolOptions;
use sqlx::AnyPool;
use std::fmt;
use std::str::FromStr;

/// Default maximum number of pooled connections
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Supported database backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseBackend {
    /// SQLite
    SQLite,
    /// PostgreSQL
    PostgreSQL,
}

impl DatabaseBackend {
    /// Parse database URL to determine backend
    pub fn from_url(url: &str) -> Result<Self> {
        let url_lower = url.to_lowercase();

        if url_lower.starts_with("postgres://") || url_lower.starts_with("postgresql://") {
            Ok(DatabaseBackend::PostgreSQL)
        } else if url_lower.starts_with("sqlite://") || url_lower.starts_with("sqlite:") {
            Ok(DatabaseBackend::SQLite)
        } else {
            Err(VerbForgeError::InvalidDatabaseUrl(format!(
                "Unable to determine database type from URL: {}",
                url
            )))
        }
    }

    /// Get the name of this database backend
    pub fn name(&self) -> &'static str {
        match self {
            DatabaseBackend::SQLite => "SQLite",
            DatabaseBackend::PostgreSQL => "PostgreSQL",
        }
    }

    /// DDL fragment for an auto-incrementing primary key column
    fn id_column(&self) -> &'static str {
        match self {
            DatabaseBackend::SQLite => "INTEGER PRIMARY KEY AUTOINCREMENT",
            DatabaseBackend::PostgreSQL => "BIGSERIAL PRIMARY KEY",
        }
    }
}

impl FromStr for DatabaseBackend {
    type Err = VerbForgeError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sqlite" | "sqlite3" => Ok(DatabaseBackend::SQLite),
            "postgresql" | "postgres" | "pg" => Ok(DatabaseBackend::PostgreSQL),
            _ => Err(VerbForgeError::InvalidDatabaseUrl(s.to_string())),
        }
    }
}

impl fmt::Display for DatabaseBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Pooled database handle
#[derive(Clone)]
pub struct Database {
    /// Connection pool
    pool: AnyPool,
    /// Database backend type
    backend: DatabaseBackend,
}

impl Database {
    /// Connect with default pool settings
    pub async fn connect(url: &str) -> Result<Self> {
        Self::connect_with_options(url, DEFAULT_MAX_CONNECTIONS).await
    }

    /// Connect with a custom pool size.
    ///
    /// Tests against `sqlite::memory:` must use a single connection, since
    /// every new in-memory connection starts an empty database.
    pub async fn connect_with_options(url: &str, max_connections: u32) -> Result<Self> {
        sqlx::any::install_default_drivers();

        let backend = DatabaseBackend::from_url(url)?;
        let pool = AnyPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await?;

        let database = Self { pool, backend };
        database.test_connection().await?;

        Ok(database)
    }

    /// Get the connection pool
    pub fn pool(&self) -> &AnyPool {
        &self.pool
    }

    /// Get the database backend
    pub fn backend(&self) -> DatabaseBackend {
        self.backend
    }

    /// Test the connection
    pub async fn test_connection(&self) -> Result<()> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }

    /// Create the three tables when they do not exist yet.
    pub async fn ensure_schema(&self) -> Result<()> {
        let id = self.backend.id_column();

        let verbs = format!(
            "CREATE TABLE IF NOT EXISTS verbs ( \
                id {id}, \
                infinitive TEXT NOT NULL, \
                auxiliary TEXT NOT NULL, \
                reflexivity TEXT NOT NULL \
            )"
        );

        let conjugations = format!(
            "CREATE TABLE IF NOT EXISTS conjugations ( \
                id {id}, \
                infinitive TEXT NOT NULL, \
                tense TEXT NOT NULL, \
                verb_id BIGINT NOT NULL, \
                first_person_singular TEXT, \
                second_person_singular TEXT, \
                third_person_singular TEXT, \
                first_person_plural TEXT, \
                second_person_formal TEXT, \
                third_person_plural TEXT \
            )"
        );

        let sentences = format!(
            "CREATE TABLE IF NOT EXISTS sentences ( \
                id {id}, \
                infinitive TEXT NOT NULL, \
                auxiliary TEXT NOT NULL, \
                pronoun TEXT NOT NULL, \
                tense TEXT NOT NULL, \
                direct_object TEXT NOT NULL, \
                indirect_pronoun TEXT NOT NULL, \
                reflexive_pronoun TEXT NOT NULL, \
                negation TEXT NOT NULL, \
                content TEXT NOT NULL, \
                translation TEXT NOT NULL, \
                is_correct INTEGER NOT NULL \
            )"
        );

        sqlx::query(&verbs).execute(&self.pool).await?;
        sqlx::query(&conjugations).execute(&self.pool).await?;
        sqlx::query(&sentences).execute(&self.pool).await?;

        Ok(())
    }

    /// Remove all user data and history.
    pub async fn clear(&self) -> Result<()> {
        sqlx::query("DELETE FROM sentences").execute(&self.pool).await?;
        sqlx::query("DELETE FROM conjugations").execute(&self.pool).await?;
        sqlx::query("DELETE FROM verbs").execute(&self.pool).await?;
        Ok(())
    }
}
