//! SQL schema for the tour SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// `name_key` columns hold the lowercased name and carry no UNIQUE
/// constraint: duplicates that predate the reconciler are tolerated and the
/// earliest row wins on lookup.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS cities (
    city_id     TEXT PRIMARY KEY,
    name        TEXT NOT NULL,
    name_key    TEXT NOT NULL,
    country     TEXT,
    created_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS tags (
    tag_id      TEXT PRIMARY KEY,
    name        TEXT NOT NULL,
    name_key    TEXT NOT NULL,
    created_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS locations (
    location_id     TEXT PRIMARY KEY,
    name            TEXT NOT NULL,
    name_key        TEXT NOT NULL,
    city_id         TEXT NOT NULL REFERENCES cities(city_id),
    address         TEXT NOT NULL DEFAULT '',
    category        TEXT NOT NULL DEFAULT '',
    description     TEXT NOT NULL DEFAULT '',
    recommendations TEXT NOT NULL DEFAULT '',
    source          TEXT NOT NULL DEFAULT '',   -- provenance, e.g. 'guide'
    verified        INTEGER NOT NULL DEFAULT 0,
    created_at      TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS tours (
    tour_id         TEXT PRIMARY KEY,
    title           TEXT NOT NULL,
    description     TEXT NOT NULL DEFAULT '',
    city_id         TEXT REFERENCES cities(city_id),
    duration_value  INTEGER NOT NULL DEFAULT 0,
    duration_type   TEXT NOT NULL DEFAULT 'days',
    is_published    INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS tour_tags (
    tour_id  TEXT NOT NULL REFERENCES tours(tour_id),
    tag_id   TEXT NOT NULL REFERENCES tags(tag_id),
    PRIMARY KEY (tour_id, tag_id)
);

CREATE TABLE IF NOT EXISTS tour_days (
    day_id      TEXT PRIMARY KEY,
    tour_id     TEXT NOT NULL REFERENCES tours(tour_id),
    day_number  INTEGER NOT NULL,
    title       TEXT NOT NULL DEFAULT '',
    date_hint   TEXT NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS tour_blocks (
    block_id    TEXT PRIMARY KEY,
    day_id      TEXT NOT NULL REFERENCES tour_days(day_id),
    start_time  TEXT NOT NULL DEFAULT '',
    end_time    TEXT NOT NULL DEFAULT '',
    title       TEXT NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS tour_items (
    item_id                 TEXT PRIMARY KEY,
    block_id                TEXT NOT NULL REFERENCES tour_blocks(block_id),
    location_id             TEXT NOT NULL REFERENCES locations(location_id),
    custom_title            TEXT NOT NULL DEFAULT '',
    custom_description      TEXT NOT NULL DEFAULT '',
    custom_recommendations  TEXT NOT NULL DEFAULT '',
    order_index             INTEGER NOT NULL,
    approx_cost             TEXT NOT NULL DEFAULT ''
);

CREATE INDEX IF NOT EXISTS cities_name_key_idx     ON cities(name_key);
CREATE INDEX IF NOT EXISTS tags_name_key_idx       ON tags(name_key);
CREATE INDEX IF NOT EXISTS locations_city_name_idx ON locations(city_id, name_key);
CREATE INDEX IF NOT EXISTS tour_days_tour_idx      ON tour_days(tour_id);
CREATE INDEX IF NOT EXISTS tour_blocks_day_idx     ON tour_blocks(day_id);
CREATE INDEX IF NOT EXISTS tour_items_block_idx    ON tour_items(block_id);

PRAGMA user_version = 1;
";
