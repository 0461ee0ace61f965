//! SQL schema for the tourdesk SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per booking event. The same person appears once per trip,
-- linked only by cpf.
CREATE TABLE IF NOT EXISTS clients (
    id            TEXT PRIMARY KEY,
    first_name    TEXT NOT NULL DEFAULT '',
    last_name     TEXT NOT NULL DEFAULT '',
    cpf           TEXT NOT NULL DEFAULT '',
    birthdate     TEXT,            -- YYYY-MM-DD or NULL
    phone         TEXT NOT NULL DEFAULT '',
    email         TEXT,
    address       TEXT,
    destination   TEXT NOT NULL DEFAULT '',
    travel_date   TEXT,            -- YYYY-MM-DD or NULL
    travel_price  REAL,
    created_at    TEXT NOT NULL    -- RFC 3339 UTC
);

CREATE TABLE IF NOT EXISTS destinations (
    id        TEXT PRIMARY KEY,
    name      TEXT NOT NULL DEFAULT '',
    country   TEXT,
    operator  TEXT
);

-- Companions hang off a client id, not a trip; no foreign key because
-- imports may carry companions of bookings that were deleted upstream.
CREATE TABLE IF NOT EXISTS companions (
    id               TEXT PRIMARY KEY,
    client_id        TEXT NOT NULL DEFAULT '',
    name             TEXT NOT NULL DEFAULT '',
    birthdate        TEXT,
    phone            TEXT,
    rg               TEXT,
    cpf              TEXT,
    passport_number  TEXT,
    relationship     TEXT,
    price            REAL
);

CREATE INDEX IF NOT EXISTS clients_cpf_idx         ON clients(cpf);
CREATE INDEX IF NOT EXISTS destinations_name_idx   ON destinations(name);
CREATE INDEX IF NOT EXISTS companions_client_idx   ON companions(client_id);

PRAGMA user_version = 1;
";
