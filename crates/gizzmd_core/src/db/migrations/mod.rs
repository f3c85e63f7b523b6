//! Schema steps for the document store, tracked in `PRAGMA user_version`.
//!
//! # Invariants
//! - Step versions are contiguous from 1; the last one is the schema version
//!   repositories check for.
//! - Pending steps run in a single transaction: either every step lands
//!   together with its `user_version`, or nothing does.

use crate::db::{DbError, DbResult};
use log::{debug, info};
use rusqlite::Connection;

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "init",
        sql: include_str!("0001_init.sql"),
    },
    Migration {
        version: 2,
        name: "doc_time_indexes",
        sql: include_str!("0002_doc_time_indexes.sql"),
    },
];

/// Outcome of one [`apply_migrations`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationReport {
    pub from_version: u32,
    pub to_version: u32,
    /// Names of the steps run, in order.
    pub applied: Vec<&'static str>,
}

impl MigrationReport {
    pub fn is_noop(&self) -> bool {
        self.applied.is_empty()
    }
}

/// Schema version this build writes.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Reads `PRAGMA user_version` from `conn`.
pub fn schema_version(conn: &Connection) -> rusqlite::Result<u32> {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
}

/// Brings `conn` up to [`latest_version`].
pub fn apply_migrations(conn: &mut Connection) -> DbResult<MigrationReport> {
    let from_version = schema_version(conn)?;
    let supported = latest_version();
    if from_version > supported {
        return Err(DbError::SchemaTooNew {
            found: from_version,
            supported,
        });
    }

    let pending: Vec<&Migration> = MIGRATIONS
        .iter()
        .filter(|step| step.version > from_version)
        .collect();
    let mut report = MigrationReport {
        from_version,
        to_version: from_version,
        applied: Vec::with_capacity(pending.len()),
    };
    if pending.is_empty() {
        return Ok(report);
    }

    let tx = conn.transaction()?;
    for step in pending {
        let batch = format!("{}\nPRAGMA user_version = {};", step.sql, step.version);
        tx.execute_batch(&batch)
            .map_err(|source| DbError::Migration {
                version: step.version,
                name: step.name,
                source,
            })?;
        debug!(
            "event=db_migrate_step module=db status=ok version={} name={}",
            step.version, step.name
        );
        report.to_version = step.version;
        report.applied.push(step.name);
    }
    tx.commit()?;

    info!(
        "event=db_migrate module=db status=ok from_version={} to_version={} steps={}",
        report.from_version,
        report.to_version,
        report.applied.len()
    );
    Ok(report)
}
