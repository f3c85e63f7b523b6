use gizzmd_core::db::migrations::latest_version;
use gizzmd_core::db::{apply_migrations, open_db, open_db_in_memory, schema_version, DbError};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn).unwrap(), latest_version());
    assert_table_exists(&conn, "docs");
    assert_table_exists(&conn, "users");
}

#[test]
fn fresh_connection_reports_every_step_then_nothing() {
    let mut conn = Connection::open_in_memory().unwrap();

    let first = apply_migrations(&mut conn).unwrap();
    assert_eq!(first.from_version, 0);
    assert_eq!(first.to_version, latest_version());
    assert_eq!(first.applied, ["init", "doc_time_indexes"]);

    let second = apply_migrations(&mut conn).unwrap();
    assert!(second.is_noop());
    assert_eq!(second.from_version, latest_version());
    assert_eq!(second.to_version, latest_version());
}

#[test]
fn partially_migrated_file_resumes_from_its_version() {
    let mut conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(include_str!("../src/db/migrations/0001_init.sql"))
        .unwrap();
    conn.execute_batch("PRAGMA user_version = 1;").unwrap();

    let report = apply_migrations(&mut conn).unwrap();
    assert_eq!(report.from_version, 1);
    assert_eq!(report.applied, ["doc_time_indexes"]);
}

#[test]
fn failed_step_is_named_and_rolled_back() {
    let mut conn = Connection::open_in_memory().unwrap();
    conn.execute_batch("CREATE TABLE users (id TEXT PRIMARY KEY);")
        .unwrap();

    match apply_migrations(&mut conn).unwrap_err() {
        DbError::Migration { version, name, .. } => {
            assert_eq!(version, 1);
            assert_eq!(name, "init");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(schema_version(&conn).unwrap(), 0);
    let docs: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'docs';",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(docs, 0);
}

#[test]
fn reopening_file_database_keeps_data_and_version() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gizzmd.db");

    let conn_first = open_db(&path).unwrap();
    conn_first
        .execute(
            "INSERT INTO users (id, email, author_name) VALUES ('u', 'u@example.com', 'U');",
            [],
        )
        .unwrap();
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second).unwrap(), latest_version());
    let users: i64 = conn_second
        .query_row("SELECT COUNT(*) FROM users;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(users, 1);
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::SchemaTooNew { found, supported } => {
            assert_eq!(found, 999);
            assert_eq!(supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn ui_theme_column_rejects_unknown_values() {
    let conn = open_db_in_memory().unwrap();
    let result = conn.execute(
        "INSERT INTO users (id, email, author_name, ui_theme)
         VALUES ('u', 'u@example.com', 'U', 'neon');",
        [],
    );
    assert!(result.is_err());
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
