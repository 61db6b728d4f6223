//! The canonical Turtle file backing a [`TripleStore`].

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::graph::TripleStore;
use crate::turtle;
use crate::{Error, Result};

/// Location of the persisted graph.
#[derive(Debug, Clone)]
pub struct GraphFile {
    path: PathBuf,
}

impl GraphFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Load the graph, falling back to an empty store.
    ///
    /// A missing file is the normal first-run state. An unreadable or
    /// malformed file is logged and also yields an empty store so startup
    /// can continue.
    pub fn load(&self) -> TripleStore {
        match self.load_strict() {
            Ok(store) => {
                tracing::info!(
                    "Loaded {} statements from {}",
                    store.len(),
                    self.path.display()
                );
                store
            }
            Err(Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(
                    "No graph file at {}, starting with an empty store",
                    self.path.display()
                );
                TripleStore::new()
            }
            Err(e) => {
                tracing::warn!(
                    "Could not load {}: {}; starting with an empty store",
                    self.path.display(),
                    e
                );
                TripleStore::new()
            }
        }
    }

    /// Load the graph, returning read and parse errors to the caller.
    pub fn load_strict(&self) -> Result<TripleStore> {
        let text = fs::read_to_string(&self.path)?;
        Ok(turtle::parse(&text)?)
    }

    /// Write the whole store to the canonical path.
    ///
    /// Content goes to a temporary file in the same directory which is then
    /// renamed over the canonical file, so a failed write never leaves a
    /// truncated graph behind.
    pub fn flush(&self, store: &TripleStore) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let text = turtle::write_turtle(store);

        let write = || -> std::io::Result<()> {
            fs::create_dir_all(&dir)?;
            let mut tmp = NamedTempFile::new_in(&dir)?;
            tmp.write_all(text.as_bytes())?;
            tmp.as_file().sync_all()?;
            tmp.persist(&self.path).map_err(|e| e.error)?;
            Ok(())
        };
        write().map_err(|e| Error::persistence(&self.path, e))?;

        tracing::debug!("Flushed {} statements to {}", store.len(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::{Literal, Term, Triple};
    use tempfile::TempDir;

    fn sample() -> TripleStore {
        let mut store = TripleStore::new();
        store.insert(Triple::new(
            Term::iri("http://example.org/a"),
            "http://example.org/name",
            Literal::string("A"),
        ));
        store
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let file = GraphFile::new(dir.path().join("none.ttl"));
        assert!(!file.exists());
        assert!(file.load().is_empty());
        assert!(matches!(file.load_strict(), Err(Error::Io(_))));
    }

    #[test]
    fn test_malformed_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.ttl");
        fs::write(&path, "<http://example.org/a> <http://example.org/p> \"open").unwrap();

        let file = GraphFile::new(&path);
        assert!(file.load().is_empty());
        assert!(matches!(file.load_strict(), Err(Error::Turtle(_))));
    }

    #[test]
    fn test_flush_then_load() {
        let dir = TempDir::new().unwrap();
        let file = GraphFile::new(dir.path().join("nested").join("graph.ttl"));
        let store = sample();

        file.flush(&store).unwrap();
        assert!(file.exists());
        assert_eq!(file.load(), store);
    }

    #[test]
    fn test_failed_flush_is_persistence_error() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let file = GraphFile::new(blocker.join("graph.ttl"));
        let err = file.flush(&sample()).unwrap_err();
        assert!(matches!(err, Error::Persistence { .. }));
        assert_eq!(fs::read_to_string(&blocker).unwrap(), "not a directory");
    }
}
