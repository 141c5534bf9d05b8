//! Versioned schema migrations.
//!
//! Scripts are embedded at compile time and applied in ascending version
//! order. Applied versions are recorded in `schema_migrations`, so running
//! the migrator again without new scripts is a no-op.

use rusqlite::{params, Connection};

/// One embedded migration script.
#[derive(Debug, Clone, Copy)]
pub struct Migration {
    pub version: i64,
    pub name: &'static str,
    pub sql: &'static str,
}

/// All migrations known to this build, sorted by version.
pub const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "create_content_tables",
        sql: include_str!("../migrations/0001_create_content_tables.sql"),
    },
    Migration {
        version: 2,
        name: "seed_demo_content",
        sql: include_str!("../migrations/0002_seed_demo_content.sql"),
    },
];

fn ensure_history_table(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            applied_at INTEGER NOT NULL
        );
        "#,
    )
}

/// Highest applied version, or 0 on a fresh database.
pub fn current_version(conn: &Connection) -> rusqlite::Result<i64> {
    ensure_history_table(conn)?;
    conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
        [],
        |row| row.get(0),
    )
}

/// Apply every pending migration from `migrations`.
///
/// Each script runs in its own transaction together with its history row.
/// Returns the versions applied by this call.
pub fn apply(conn: &mut Connection, migrations: &[Migration]) -> rusqlite::Result<Vec<i64>> {
    let current = current_version(conn)?;
    let mut applied = Vec::new();

    for migration in migrations.iter().filter(|m| m.version > current) {
        let tx = conn.transaction()?;
        tx.execute_batch(migration.sql)?;
        tx.execute(
            "INSERT INTO schema_migrations(version, name, applied_at) VALUES (?1, ?2, strftime('%s', 'now'))",
            params![migration.version, migration.name],
        )?;
        tx.commit()?;
        applied.push(migration.version);
    }

    Ok(applied)
}
