//! `religi.toml` configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::repository::{GraphSiteStore, SiteStore};
use crate::schema::SiteMapper;
use crate::storage::{BackupManager, DEFAULT_RETENTION, GraphFile, SqliteSiteStore};
use crate::vocab::rj;

/// Which store backs the directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Graph,
    Sqlite,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReligiConfig {
    pub backend: Backend,
    /// Turtle file for the graph backend
    pub data_file: PathBuf,
    /// Database file for the sqlite backend
    pub database: PathBuf,
    pub backup_dir: PathBuf,
    pub backup_retention: usize,
    /// Namespace site ids are appended to
    pub base_iri: String,
    pub port: u16,
    /// Bearer token for the admin endpoints; admin routes are open when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_token: Option<String>,
}

impl Default for ReligiConfig {
    fn default() -> Self {
        Self {
            backend: Backend::Graph,
            data_file: PathBuf::from("ReligiJakarta.ttl"),
            database: PathBuf::from("sites.db"),
            backup_dir: PathBuf::from("backup"),
            backup_retention: DEFAULT_RETENTION,
            base_iri: rj::NS.to_string(),
            port: 1083,
            admin_token: None,
        }
    }
}

impl ReligiConfig {
    /// Resolve relative paths against `base`
    pub fn relative_to(mut self, base: &Path) -> Self {
        for path in [&mut self.data_file, &mut self.database, &mut self.backup_dir] {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
        self
    }

    pub fn backup_manager(&self) -> BackupManager {
        BackupManager::new(&self.backup_dir, self.backup_retention)
    }

    /// Open the configured backend
    pub fn open_store(&self) -> crate::Result<Box<dyn SiteStore>> {
        match self.backend {
            Backend::Graph => Ok(Box::new(self.open_graph_store())),
            Backend::Sqlite => {
                ensure_parent_dir(&self.database)?;
                Ok(Box::new(SqliteSiteStore::open(
                    &self.database,
                    self.backup_manager(),
                )?))
            }
        }
    }

    pub fn open_graph_store(&self) -> GraphSiteStore {
        GraphSiteStore::open(
            GraphFile::new(&self.data_file),
            self.backup_manager(),
            SiteMapper::new(&self.base_iri),
        )
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("religi.toml")
}

/// Load the config file, falling back to defaults when it does not exist
pub fn load_config(path: Option<&Path>) -> anyhow::Result<ReligiConfig> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        tracing::debug!("No config at {}, using defaults", path.display());
        return Ok(ReligiConfig::default());
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: ReligiConfig = toml::from_str(&contents)?;
    Ok(config)
}

pub fn write_config(path: &Path, config: &ReligiConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_config_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = load_config(Some(&dir.path().join("religi.toml"))).unwrap();
        assert_eq!(config, ReligiConfig::default());
        assert_eq!(config.port, 1083);
        assert_eq!(config.backup_retention, 10);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("religi.toml");
        std::fs::write(&path, "backend = \"sqlite\"\nport = 8080\nadmin_token = \"s3cret\"\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.backend, Backend::Sqlite);
        assert_eq!(config.port, 8080);
        assert_eq!(config.admin_token.as_deref(), Some("s3cret"));
        assert_eq!(config.data_file, PathBuf::from("ReligiJakarta.ttl"));
    }

    #[test]
    fn test_write_config_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("religi.toml");
        let config = ReligiConfig::default();

        write_config(&path, &config, false).unwrap();
        assert!(write_config(&path, &config, false).is_err());
        write_config(&path, &config, true).unwrap();
        assert_eq!(load_config(Some(&path)).unwrap(), config);
    }

    #[test]
    fn test_relative_paths_resolve_against_base() {
        let config = ReligiConfig::default().relative_to(Path::new("/srv/religi"));
        assert_eq!(config.data_file, PathBuf::from("/srv/religi/ReligiJakarta.ttl"));
        assert_eq!(config.backup_dir, PathBuf::from("/srv/religi/backup"));
    }
}
