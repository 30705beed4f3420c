//! SQL schema for the rollcall SQLite store.
//!
//! Executed once at connection startup.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// Value columns carry no constraints: the store keeps whatever it is given.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS materias (
    id        TEXT PRIMARY KEY,   -- UUID v4, store-assigned
    materia   TEXT NOT NULL,
    professor TEXT NOT NULL,
    semestre  INTEGER NOT NULL,
    faltas    INTEGER NOT NULL
);

PRAGMA user_version = 1;
";
