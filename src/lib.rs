//! # Religi - Jakarta religious heritage directory
//!
//! A small directory of places of worship and heritage sites in Jakarta.
//!
//! Religi provides:
//! - An in-memory triple store persisted as a Turtle file
//! - A static schema mapping flat `Site` records onto typed triples
//! - Snapshot-before-write backups with retention pruning
//! - A record repository with CRUD and facet enumeration
//! - An optional SQLite backend exposing the same record contract
//! - A JSON HTTP API and a CLI on top of the repository

pub mod vocab;
pub mod term;
pub mod graph;
pub mod turtle;
pub mod site;
pub mod schema;
pub mod storage;
pub mod repository;
pub mod seed;
pub mod server;
pub mod output;
pub mod config;
pub mod ui;

// Re-exports for convenient access
pub use graph::TripleStore;
pub use repository::{GraphSiteStore, SiteCounts, SiteStore};
pub use schema::{Field, SiteMapper};
pub use site::{Coordinates, Site};
pub use storage::{BackupManager, GraphFile, SqliteSiteStore};
pub use term::{Datatype, Literal, Term, Triple};

use std::path::PathBuf;

/// Result type alias for Religi operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Religi operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Site not found: {0}")]
    NotFound(String),

    #[error("Site already exists: {0}")]
    Conflict(String),

    #[error("Cannot read {field} value {value:?} as {expected}")]
    Coercion {
        field: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Failed to persist {}: {source}", path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Turtle error: {0}")]
    Turtle(#[from] turtle::TurtleError),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Site store lock poisoned")]
    LockPoisoned,
}

impl Error {
    /// Build a coercion error for a field value that does not parse as its declared type
    pub fn coercion(field: &'static str, value: impl Into<String>, expected: &'static str) -> Self {
        Error::Coercion {
            field,
            value: value.into(),
            expected,
        }
    }

    /// Build a persistence error for a failed write to `path`
    pub fn persistence(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Persistence {
            path: path.into(),
            source,
        }
    }

    /// True for errors caused by caller input rather than the store itself
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::NotFound(_)
                | Error::Conflict(_)
                | Error::Coercion { .. }
                | Error::MissingField(_)
                | Error::UnknownField(_)
        )
    }
}
