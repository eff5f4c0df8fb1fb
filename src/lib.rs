//! verb-forge library
//!
//! Builds a French verb conjugation and example sentence database with LLM
//! assistance. The binary is in src/main.rs.

pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod grammar;
pub mod llm;
pub mod sentences;
pub mod verbs;
