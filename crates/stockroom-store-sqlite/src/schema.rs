//! SQL schema for the Stockroom SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// Reference columns carry no `REFERENCES` clause: an asset may point at a
/// model or location that does not exist (yet).
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS manufacturers (
    manufacturer_id TEXT PRIMARY KEY,
    created_at      TEXT NOT NULL,
    name            TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS locations (
    location_id TEXT PRIMARY KEY,
    created_at  TEXT NOT NULL,
    name        TEXT NOT NULL,
    street1     TEXT NOT NULL,
    street2     TEXT,
    suburb      TEXT NOT NULL,
    postcode    INTEGER NOT NULL,
    state       TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS models (
    model_id        TEXT PRIMARY KEY,
    created_at      TEXT NOT NULL,
    name            TEXT NOT NULL,
    manufacturer_id TEXT NOT NULL,
    category        TEXT NOT NULL,
    purchase_price  REAL NOT NULL,
    daily_hire      REAL NOT NULL,
    weekly_hire     REAL NOT NULL,
    weight          REAL NOT NULL
);

CREATE TABLE IF NOT EXISTS assets (
    asset_id      TEXT PRIMARY KEY,
    created_at    TEXT NOT NULL,   -- RFC 3339 UTC; server-assigned
    asset_tag     TEXT NOT NULL UNIQUE,
    model_id      TEXT NOT NULL,
    location_id   TEXT NOT NULL,
    serial_number TEXT,
    name          TEXT,
    purchase_date TEXT             -- YYYY-MM-DD or NULL
);

PRAGMA user_version = 1;
";
