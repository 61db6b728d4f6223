//! SQLite storage implementation
//!
//! Same record contract as the graph store, kept in one `sites` table. The
//! transport list is stored joined with `", "`. Saves are not backed up
//! individually; the database file is snapshotted once when opened.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use rusqlite::{Connection, OptionalExtension, params};

use super::BackupManager;
use super::schema;
use crate::repository::{SiteCounts, SiteStore, validate_for_write};
use crate::site::{Coordinates, Site, split_list};
use crate::{Error, Result};

/// SQLite-backed [`SiteStore`]
pub struct SqliteSiteStore {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
    backups: Option<BackupManager>,
}

impl SqliteSiteStore {
    /// Open a database file (creates if doesn't exist), backing it up first
    pub fn open(path: &Path, backups: BackupManager) -> Result<Self> {
        backups.snapshot(path)?;
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
            path: Some(path.to_path_buf()),
            backups: Some(backups),
        };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
            path: None,
            backups: None,
        };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&self) -> Result<()> {
        let conn = self.conn()?;
        for stmt in schema::all_schema_statements() {
            conn.execute(stmt, [])?;
        }
        Ok(())
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| Error::LockPoisoned)
    }

    fn select_one(conn: &Connection, id: &str) -> Result<Option<Site>> {
        conn.query_row(
            &format!("SELECT {} FROM sites WHERE id = ?1", schema::SITE_COLUMNS),
            [id],
            row_to_site,
        )
        .optional()
        .map_err(Into::into)
    }

    fn exists_in(conn: &Connection, id: &str) -> Result<bool> {
        let found: Option<i64> = conn
            .query_row("SELECT 1 FROM sites WHERE id = ?1", [id], |row| row.get(0))
            .optional()?;
        Ok(found.is_some())
    }

    fn insert(conn: &Connection, site: &Site) -> Result<()> {
        let transport = (!site.transport.is_empty()).then(|| site.transport.join(", "));
        conn.execute(
            &format!(
                "INSERT INTO sites ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, \
                 ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20)",
                schema::SITE_COLUMNS
            ),
            params![
                site.id,
                site.name,
                site.address,
                site.region,
                site.district,
                site.postal_code,
                site.building_type,
                site.religion,
                site.opening_hours,
                site.capacity,
                site.land_area,
                site.architect,
                site.founding_year,
                site.is_heritage,
                site.heritage_code,
                transport,
                site.coordinates.map(|c| c.latitude),
                site.coordinates.map(|c| c.longitude),
                site.image_url,
                site.description,
            ],
        )?;
        Ok(())
    }
}

fn row_to_site(row: &rusqlite::Row) -> rusqlite::Result<Site> {
    let transport: Option<String> = row.get(15)?;
    let latitude: Option<f64> = row.get(16)?;
    let longitude: Option<f64> = row.get(17)?;

    Ok(Site {
        id: row.get(0)?,
        name: row.get(1)?,
        address: row.get(2)?,
        region: row.get(3)?,
        district: row.get(4)?,
        postal_code: row.get(5)?,
        building_type: row.get(6)?,
        religion: row.get(7)?,
        opening_hours: row.get(8)?,
        capacity: row.get(9)?,
        land_area: row.get(10)?,
        architect: row.get(11)?,
        founding_year: row.get(12)?,
        is_heritage: row.get(13)?,
        heritage_code: row.get(14)?,
        transport: transport.as_deref().map(split_list).unwrap_or_default(),
        // Rows are only ever written with both or neither
        coordinates: latitude.zip(longitude).map(|(latitude, longitude)| Coordinates {
            latitude,
            longitude,
        }),
        image_url: row.get(18)?,
        description: row.get(19)?,
    })
}

impl SiteStore for SqliteSiteStore {
    fn exists(&self, id: &str) -> Result<bool> {
        Self::exists_in(&*self.conn()?, id)
    }

    fn get(&self, id: &str) -> Result<Option<Site>> {
        Self::select_one(&*self.conn()?, id)
    }

    fn list(&self) -> Result<Vec<Site>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM sites ORDER BY nama, id",
            schema::SITE_COLUMNS
        ))?;
        let sites = stmt
            .query_map([], row_to_site)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(sites)
    }

    fn create(&self, site: Site) -> Result<Site> {
        validate_for_write(&site)?;
        let conn = self.conn()?;
        if Self::exists_in(&conn, &site.id)? {
            return Err(Error::Conflict(site.id));
        }
        Self::insert(&conn, &site)?;
        tracing::info!("Created site {}", site.id);
        Self::select_one(&conn, &site.id)?.ok_or(Error::NotFound(site.id))
    }

    fn replace(&self, id: &str, mut site: Site) -> Result<Site> {
        site.id = id.to_string();
        validate_for_write(&site)?;
        let mut conn = self.conn()?;
        if !Self::exists_in(&conn, id)? {
            return Err(Error::NotFound(id.to_string()));
        }

        let tx = conn.transaction()?;
        tx.execute("DELETE FROM sites WHERE id = ?1", [id])?;
        Self::insert(&tx, &site)?;
        tx.commit()?;

        tracing::info!("Replaced site {}", id);
        Self::select_one(&conn, id)?.ok_or_else(|| Error::NotFound(id.to_string()))
    }

    fn delete(&self, id: &str) -> Result<bool> {
        let removed = self.conn()?.execute("DELETE FROM sites WHERE id = ?1", [id])?;
        if removed > 0 {
            tracing::info!("Deleted site {}", id);
        }
        Ok(removed > 0)
    }

    fn backup(&self) -> Result<Option<PathBuf>> {
        match (&self.path, &self.backups) {
            (Some(path), Some(backups)) => {
                let _conn = self.conn()?;
                backups.snapshot(path)
            }
            _ => Ok(None),
        }
    }

    fn count(&self) -> Result<SiteCounts> {
        let conn = self.conn()?;
        let total: i64 = conn.query_row("SELECT COUNT(*) FROM sites", [], |row| row.get(0))?;
        let heritage: i64 = conn.query_row(
            "SELECT COUNT(*) FROM sites WHERE is_heritage = 1",
            [],
            |row| row.get(0),
        )?;
        Ok(SiteCounts {
            total: total as usize,
            heritage: heritage as usize,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Field;
    use tempfile::TempDir;

    fn sample_site(id: &str, name: &str, religion: &str) -> Site {
        Site {
            religion: Some(religion.to_string()),
            region: Some("JakartaPusat".to_string()),
            transport: vec!["Stasiun Juanda (KRL)".to_string(), "Halte Juanda".to_string()],
            founding_year: Some(1901),
            is_heritage: true,
            coordinates: Some(Coordinates {
                latitude: -6.169516,
                longitude: 106.832194,
            }),
            ..Site::new(id, name)
        }
    }

    #[test]
    fn test_site_crud() {
        let store = SqliteSiteStore::open_in_memory().unwrap();
        let site = sample_site("GerejaKatedral", "GEREJA KATEDRAL JAKARTA", "Katolik");

        assert_eq!(store.create(site.clone()).unwrap(), site);
        assert_eq!(store.get("GerejaKatedral").unwrap(), Some(site.clone()));
        assert!(matches!(store.create(site), Err(Error::Conflict(_))));

        let replaced = store
            .replace("GerejaKatedral", Site::new("ignored", "KATEDRAL"))
            .unwrap();
        assert_eq!(replaced.id, "GerejaKatedral");
        assert_eq!(replaced.religion, None);
        assert!(replaced.transport.is_empty());

        assert!(store.delete("GerejaKatedral").unwrap());
        assert!(!store.delete("GerejaKatedral").unwrap());
        assert!(!store.exists("GerejaKatedral").unwrap());
    }

    #[test]
    fn test_list_facets_and_counts() {
        let store = SqliteSiteStore::open_in_memory().unwrap();
        store.create(sample_site("b", "Beta", "Islam")).unwrap();
        store.create(sample_site("a", "Alpha", "Katolik")).unwrap();
        store.create(Site::new("c", "Gamma")).unwrap();

        let names: Vec<_> = store.list().unwrap().into_iter().map(|s| s.id).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(
            store.distinct_values(Field::Religion).unwrap(),
            vec!["Islam", "Katolik"]
        );
        assert_eq!(
            store.count().unwrap(),
            SiteCounts {
                total: 3,
                heritage: 2
            }
        );
    }

    #[test]
    fn test_open_backs_up_existing_file() {
        let dir = TempDir::new().unwrap();
        let db = dir.path().join("sites.db");
        let backups = BackupManager::new(dir.path().join("backup"), 10);

        {
            let store = SqliteSiteStore::open(&db, backups.clone()).unwrap();
            store.create(Site::new("a", "Alpha")).unwrap();
            assert!(backups.list(&db).unwrap().is_empty());
        }

        let store = SqliteSiteStore::open(&db, backups.clone()).unwrap();
        assert_eq!(backups.list(&db).unwrap().len(), 1);
        assert!(store.exists("a").unwrap());
    }
}
