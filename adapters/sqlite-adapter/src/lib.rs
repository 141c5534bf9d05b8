//! sqlite-adapter — SQLite implementation of the ContentRepository port.
//!
//! Purpose
//! - Serve the features and testimonials listings from a file-based database.
//! - Implements the `ContentRepository` trait from the `domain` crate.
//! - Owns the versioned schema migrations (see `migrations`).
//!
//! Notes
//! - Uses `rusqlite` with the `bundled` feature for portability.
//! - A single connection sits behind a mutex; each query waits at most the
//!   configured busy timeout for database locks.

use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use domain::{ContentRepository, CoreError, Feature, Testimonial};
use rusqlite::Connection;

pub mod migrations;

/// Lock wait applied when no explicit timeout is given.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// SQLite-backed content repository.
pub struct SqliteContentRepo {
    conn: Mutex<Connection>,
}

impl SqliteContentRepo {
    /// Open (or create) the database, verify it answers, and apply migrations.
    #[cfg(test)]
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, CoreError> {
        let repo = Self::open(path, DEFAULT_BUSY_TIMEOUT)?;
        repo.migrate()?;
        Ok(repo)
    }

    /// Open (or create) the database without touching the schema.
    pub fn open<P: AsRef<Path>>(path: P, busy_timeout: Duration) -> Result<Self, CoreError> {
        if let Some(dir) = path.as_ref().parent() {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir).map_err(|e| {
                    CoreError::Repository(format!("create {}: {e}", dir.display()))
                })?;
            }
        }
        let conn = Connection::open(path).map_err(map_sqerr)?;
        conn.busy_timeout(busy_timeout).map_err(map_sqerr)?;
        // Ping
        conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))
            .map_err(map_sqerr)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Apply pending migrations and return the versions applied.
    pub fn migrate(&self) -> Result<Vec<i64>, CoreError> {
        let mut conn = self.conn.lock().map_err(|_| CoreError::Repository("mutex poisoned".into()))?;
        migrations::apply(&mut conn, migrations::MIGRATIONS)
            .map_err(|e| CoreError::Migration(e.to_string()))
    }

    /// Highest applied schema version.
    pub fn schema_version(&self) -> Result<i64, CoreError> {
        let conn = self.conn.lock().map_err(|_| CoreError::Repository("mutex poisoned".into()))?;
        migrations::current_version(&conn).map_err(map_sqerr)
    }
}

fn map_sqerr<E: std::fmt::Display>(e: E) -> CoreError { CoreError::Repository(format!("sqlite error: {e}")) }

fn row_to_feature(row: &rusqlite::Row) -> Result<Feature, CoreError> {
    Ok(Feature {
        icon: row.get(0).map_err(map_sqerr)?,
        title: row.get(1).map_err(map_sqerr)?,
        description: row.get(2).map_err(map_sqerr)?,
    })
}

fn row_to_testimonial(row: &rusqlite::Row) -> Result<Testimonial, CoreError> {
    Ok(Testimonial {
        name: row.get(0).map_err(map_sqerr)?,
        company: row.get(1).map_err(map_sqerr)?,
        text: row.get(2).map_err(map_sqerr)?,
        avatar: row.get(3).map_err(map_sqerr)?,
    })
}

// Statement and cursor are locals: they are dropped on success, on a scan
// error and on early return alike.
impl ContentRepository for SqliteContentRepo {
    fn list_features(&self) -> Result<Vec<Feature>, CoreError> {
        let conn = self.conn.lock().map_err(|_| CoreError::Repository("mutex poisoned".into()))?;
        let mut stmt = conn
            .prepare("SELECT icon, title, description FROM features ORDER BY id")
            .map_err(map_sqerr)?;
        let mut rows = stmt.query([]).map_err(map_sqerr)?;
        let mut out = Vec::new();
        while let Some(row) = rows.next().map_err(map_sqerr)? {
            out.push(row_to_feature(row)?);
        }
        Ok(out)
    }

    fn list_testimonials(&self) -> Result<Vec<Testimonial>, CoreError> {
        let conn = self.conn.lock().map_err(|_| CoreError::Repository("mutex poisoned".into()))?;
        let mut stmt = conn
            .prepare("SELECT name, company, text, avatar FROM testimonials ORDER BY id")
            .map_err(map_sqerr)?;
        let mut rows = stmt.query([]).map_err(map_sqerr)?;
        let mut out = Vec::new();
        while let Some(row) = rows.next().map_err(map_sqerr)? {
            out.push(row_to_testimonial(row)?);
        }
        Ok(out)
    }
}
