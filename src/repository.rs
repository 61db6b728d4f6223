//! Record Repository - CRUD and facets over stored sites
//!
//! [`SiteStore`] is the contract the HTTP layer and the CLI program
//! against. [`GraphSiteStore`] implements it over the Turtle-backed triple
//! store; the SQLite backend lives in [`crate::storage::sqlite`].

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Serialize;

use crate::graph::TripleStore;
use crate::schema::{Field, SiteMapper};
use crate::site::Site;
use crate::storage::{BackupManager, GraphFile};
use crate::{Error, Result};

/// Site totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SiteCounts {
    #[serde(rename = "total_sites")]
    pub total: usize,
    #[serde(rename = "total_heritage")]
    pub heritage: usize,
}

/// Record-oriented access to the site directory.
pub trait SiteStore: Send + Sync {
    fn exists(&self, id: &str) -> Result<bool>;

    /// `Ok(None)` when the site does not exist
    fn get(&self, id: &str) -> Result<Option<Site>>;

    /// All sites ordered by name, then id
    fn list(&self) -> Result<Vec<Site>>;

    /// Add a new site. Fails with `Conflict` if the id is taken.
    fn create(&self, site: Site) -> Result<Site>;

    /// Replace every field of an existing site. The `id` argument wins over `site.id`.
    fn replace(&self, id: &str, site: Site) -> Result<Site>;

    /// Remove a site. Returns false, without touching storage, if it was absent.
    fn delete(&self, id: &str) -> Result<bool>;

    /// Take a backup of the backing file now
    fn backup(&self) -> Result<Option<PathBuf>>;

    /// Sorted, de-duplicated non-empty values of `field` across all sites
    fn distinct_values(&self, field: Field) -> Result<Vec<String>> {
        let mut values = BTreeSet::new();
        for site in self.list()? {
            if let Some(value) = site.value(field) {
                values.extend(
                    value
                        .display_values()
                        .into_iter()
                        .filter(|v| !v.trim().is_empty()),
                );
            }
        }
        Ok(values.into_iter().collect())
    }

    /// [`SiteStore::distinct_values`] for a field given by key or alias
    fn distinct_values_by_name(&self, field: &str) -> Result<Vec<String>> {
        self.distinct_values(field.parse()?)
    }

    fn count(&self) -> Result<SiteCounts> {
        let sites = self.list()?;
        Ok(SiteCounts {
            total: sites.len(),
            heritage: sites.iter().filter(|s| s.is_heritage).count(),
        })
    }

    /// Insert `sites` if the store holds none. Returns how many were added.
    fn seed_if_empty(&self, sites: &[Site]) -> Result<usize> {
        if self.count()?.total > 0 {
            return Ok(0);
        }
        for site in sites {
            self.create(site.clone())?;
        }
        Ok(sites.len())
    }
}

/// Writes need a name and in-range values; every other field is optional.
pub(crate) fn validate_for_write(site: &Site) -> Result<()> {
    match site.name.as_deref() {
        Some(name) if !name.trim().is_empty() => SiteMapper::validate(site),
        _ => Err(Error::MissingField("nama")),
    }
}

/// Sort order shared by both backends
pub(crate) fn sort_sites(sites: &mut [Site]) {
    sites.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
}

/// [`SiteStore`] over an in-memory triple store persisted as Turtle.
///
/// All mutations run under the write lock: the change is staged on a copy of
/// the graph, the canonical file is backed up, the copy is flushed, and only
/// then does it replace the live graph. A failed backup or flush leaves the
/// live graph untouched.
pub struct GraphSiteStore {
    graph: RwLock<TripleStore>,
    file: GraphFile,
    backups: BackupManager,
    mapper: SiteMapper,
}

impl GraphSiteStore {
    /// Open a store, loading whatever the graph file holds.
    pub fn open(file: GraphFile, backups: BackupManager, mapper: SiteMapper) -> Self {
        let graph = file.load();
        Self {
            graph: RwLock::new(graph),
            file,
            backups,
            mapper,
        }
    }

    pub fn file(&self) -> &GraphFile {
        &self.file
    }

    pub fn backups(&self) -> &BackupManager {
        &self.backups
    }

    /// Total statement count of the underlying graph
    pub fn triple_count(&self) -> Result<usize> {
        Ok(self.read()?.len())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, TripleStore>> {
        self.graph.read().map_err(|_| Error::LockPoisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, TripleStore>> {
        self.graph.write().map_err(|_| Error::LockPoisoned)
    }

    /// Back up, flush `staged`, then make it the live graph.
    fn commit(&self, live: &mut TripleStore, staged: TripleStore) -> Result<()> {
        self.backups.snapshot(self.file.path())?;
        self.file.flush(&staged)?;
        *live = staged;
        Ok(())
    }

    fn read_site(&self, graph: &TripleStore, id: &str) -> Result<Site> {
        self.mapper
            .read(graph, id)?
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }
}

impl SiteStore for GraphSiteStore {
    fn exists(&self, id: &str) -> Result<bool> {
        Ok(self.mapper.exists(&*self.read()?, id))
    }

    fn get(&self, id: &str) -> Result<Option<Site>> {
        self.mapper.read(&*self.read()?, id)
    }

    fn list(&self) -> Result<Vec<Site>> {
        let graph = self.read()?;
        let mut sites = self
            .mapper
            .ids(&graph)
            .into_iter()
            .map(|id| self.read_site(&graph, id))
            .collect::<Result<Vec<_>>>()?;
        sort_sites(&mut sites);
        Ok(sites)
    }

    fn create(&self, site: Site) -> Result<Site> {
        validate_for_write(&site)?;
        let mut graph = self.write()?;
        if self.mapper.exists(&graph, &site.id) {
            return Err(Error::Conflict(site.id));
        }

        let mut staged = graph.clone();
        staged.extend(self.mapper.to_triples(&site));
        self.commit(&mut graph, staged)?;

        tracing::info!("Created site {}", site.id);
        self.read_site(&graph, &site.id)
    }

    fn replace(&self, id: &str, mut site: Site) -> Result<Site> {
        site.id = id.to_string();
        validate_for_write(&site)?;
        let mut graph = self.write()?;
        if !self.mapper.exists(&graph, id) {
            return Err(Error::NotFound(id.to_string()));
        }

        let mut staged = graph.clone();
        let removed = self.mapper.clear_fields(&mut staged, id);
        staged.extend(self.mapper.to_triples(&site));
        self.commit(&mut graph, staged)?;

        tracing::info!("Replaced site {} ({} old statements)", id, removed);
        self.read_site(&graph, id)
    }

    fn delete(&self, id: &str) -> Result<bool> {
        let mut graph = self.write()?;
        if !self.mapper.exists(&graph, id) {
            tracing::debug!("Delete of absent site {} is a no-op", id);
            return Ok(false);
        }

        let mut staged = graph.clone();
        let removed = staged.remove_subject(&self.mapper.subject(id));
        self.commit(&mut graph, staged)?;

        tracing::info!("Deleted site {} ({} statements)", id, removed);
        Ok(true)
    }

    fn backup(&self) -> Result<Option<PathBuf>> {
        // Hold the write lock so no flush races the copy
        let _graph = self.write()?;
        self.backups.snapshot(self.file.path())
    }

    fn seed_if_empty(&self, sites: &[Site]) -> Result<usize> {
        let mut graph = self.write()?;
        if !self.mapper.ids(&graph).is_empty() {
            return Ok(0);
        }
        for site in sites {
            validate_for_write(site)?;
        }

        let mut staged = graph.clone();
        for site in sites {
            staged.extend(self.mapper.to_triples(site));
        }
        self.commit(&mut graph, staged)?;

        tracing::info!("Seeded {} sites into {}", sites.len(), self.file.path().display());
        Ok(sites.len())
    }
}
