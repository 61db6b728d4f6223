//! Storage Layer - files and databases behind the site stores
//!
//! - `graph_file`: the canonical Turtle file (graceful load, atomic flush)
//! - `backup`: timestamped snapshots with retention pruning
//! - `sqlite`: relational `SiteStore` with a single `sites` table

pub mod backup;
pub mod graph_file;
pub mod schema;
pub mod sqlite;

pub use backup::{BackupManager, DEFAULT_RETENTION};
pub use graph_file::GraphFile;
pub use sqlite::SqliteSiteStore;
