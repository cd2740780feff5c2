use liquidmemo_core::db::migrations::{apply_migrations, latest_version};
use liquidmemo_core::db::{open_db, open_db_in_memory, DbError};
use liquidmemo_core::{SlotError, SlotRepository, SqliteSlotRepository};
use rusqlite::Connection;

fn user_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version", [], |row| row.get(0))
        .unwrap()
}

#[test]
fn open_db_in_memory_lands_on_the_latest_schema() {
    let conn = open_db_in_memory().unwrap();
    assert_eq!(user_version(&conn), latest_version());

    let foreign_keys: i64 = conn
        .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
        .unwrap();
    assert_eq!(foreign_keys, 1);
}

#[test]
fn open_db_creates_a_file_backed_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("memo.db");

    {
        let conn = open_db(&path).unwrap();
        let repo = SqliteSlotRepository::try_new(&conn).unwrap();
        repo.write_slot("smoke", "{}").unwrap();
    }

    // Reopening finds the previous write and stays at the same version.
    let conn = open_db(&path).unwrap();
    assert_eq!(user_version(&conn), latest_version());
    let repo = SqliteSlotRepository::try_new(&conn).unwrap();
    assert_eq!(repo.read_slot("smoke").unwrap().as_deref(), Some("{}"));
}

#[test]
fn migrations_are_idempotent() {
    let mut conn = open_db_in_memory().unwrap();
    apply_migrations(&mut conn).unwrap();
    apply_migrations(&mut conn).unwrap();
    assert_eq!(user_version(&conn), latest_version());
}

#[test]
fn a_database_from_the_future_is_refused() {
    let mut conn = Connection::open_in_memory().unwrap();
    conn.pragma_update(None, "user_version", latest_version() + 1)
        .unwrap();

    let err = apply_migrations(&mut conn).unwrap_err();
    assert!(matches!(
        err,
        DbError::UnsupportedSchemaVersion { db_version, .. } if db_version == latest_version() + 1
    ));
}

#[test]
fn repository_refuses_an_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();
    let err = SqliteSlotRepository::try_new(&conn).unwrap_err();
    assert!(matches!(err, SlotError::UninitializedConnection { .. }));
}

#[test]
fn repository_refuses_a_connection_missing_the_slots_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.pragma_update(None, "user_version", latest_version())
        .unwrap();

    let err = SqliteSlotRepository::try_new(&conn).unwrap_err();
    assert!(matches!(err, SlotError::MissingRequiredTable("slots")));
}

#[test]
fn repository_refuses_a_slots_table_missing_a_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.pragma_update(None, "user_version", latest_version())
        .unwrap();
    conn.execute(
        "CREATE TABLE slots (slot_key TEXT PRIMARY KEY NOT NULL, payload TEXT NOT NULL)",
        [],
    )
    .unwrap();

    let err = SqliteSlotRepository::try_new(&conn).unwrap_err();
    assert!(matches!(
        err,
        SlotError::MissingRequiredColumn {
            table: "slots",
            column: "updated_at",
        }
    ));
}

#[test]
fn missing_slots_read_as_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSlotRepository::try_new(&conn).unwrap();
    assert_eq!(repo.read_slot("nothing-here").unwrap(), None);
}

#[test]
fn writes_to_the_same_key_overwrite() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSlotRepository::try_new(&conn).unwrap();

    repo.write_slot("workspace", r#"{"version":1}"#).unwrap();
    repo.write_slot("workspace", r#"{"version":2}"#).unwrap();
    repo.write_slot("scratch", "{}").unwrap();

    assert_eq!(
        repo.read_slot("workspace").unwrap().as_deref(),
        Some(r#"{"version":2}"#)
    );
    assert_eq!(repo.read_slot("scratch").unwrap().as_deref(), Some("{}"));

    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM slots", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 2);
}
