//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings and UUIDs as hyphenated
//! lowercase strings. Rows are first read into `Raw*` structs of plain column
//! values inside the connection thread, then decoded on the async side.

use chrono::{DateTime, Utc};
use tourseed_core::model::{City, Location, Tag, Tour, TourBlock, TourDay, TourItem};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

pub fn encode_uuids(ids: &[Uuid]) -> Vec<String> {
  ids.iter().copied().map(encode_uuid).collect()
}

/// `?, ?, ?` with one placeholder per value, for `IN (...)` filters.
pub fn placeholders(n: usize) -> String { vec!["?"; n].join(", ") }

// ─── DateTime<Utc>
// ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Raw row types ───────────────────────────────────────────────────────────

pub const CITY_COLUMNS: &str = "city_id, name, country, created_at";

pub struct RawCity {
  pub city_id:    String,
  pub name:       String,
  pub country:    Option<String>,
  pub created_at: String,
}

impl RawCity {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      city_id:    row.get(0)?,
      name:       row.get(1)?,
      country:    row.get(2)?,
      created_at: row.get(3)?,
    })
  }

  pub fn into_city(self) -> Result<City> {
    Ok(City {
      city_id:    decode_uuid(&self.city_id)?,
      name:       self.name,
      country:    self.country,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}

pub const TAG_COLUMNS: &str = "tag_id, name, created_at";

pub struct RawTag {
  pub tag_id:     String,
  pub name:       String,
  pub created_at: String,
}

impl RawTag {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self { tag_id: row.get(0)?, name: row.get(1)?, created_at: row.get(2)? })
  }

  pub fn into_tag(self) -> Result<Tag> {
    Ok(Tag {
      tag_id:     decode_uuid(&self.tag_id)?,
      name:       self.name,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}

pub const LOCATION_COLUMNS: &str = "location_id, name, city_id, address, category, \
                                    description, recommendations, source, verified, created_at";

pub struct RawLocation {
  pub location_id:     String,
  pub name:            String,
  pub city_id:         String,
  pub address:         String,
  pub category:        String,
  pub description:     String,
  pub recommendations: String,
  pub source:          String,
  pub verified:        bool,
  pub created_at:      String,
}

impl RawLocation {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      location_id:     row.get(0)?,
      name:            row.get(1)?,
      city_id:         row.get(2)?,
      address:         row.get(3)?,
      category:        row.get(4)?,
      description:     row.get(5)?,
      recommendations: row.get(6)?,
      source:          row.get(7)?,
      verified:        row.get(8)?,
      created_at:      row.get(9)?,
    })
  }

  pub fn into_location(self) -> Result<Location> {
    Ok(Location {
      location_id:     decode_uuid(&self.location_id)?,
      name:            self.name,
      city_id:         decode_uuid(&self.city_id)?,
      address:         self.address,
      category:        self.category,
      description:     self.description,
      recommendations: self.recommendations,
      source:          self.source,
      verified:        self.verified,
      created_at:      decode_dt(&self.created_at)?,
    })
  }
}

pub const TOUR_COLUMNS: &str =
  "tour_id, title, description, city_id, duration_value, duration_type, is_published";

pub struct RawTour {
  pub tour_id:        String,
  pub title:          String,
  pub description:    String,
  pub city_id:        Option<String>,
  pub duration_value: i64,
  pub duration_type:  String,
  pub is_published:   bool,
}

impl RawTour {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      tour_id:        row.get(0)?,
      title:          row.get(1)?,
      description:    row.get(2)?,
      city_id:        row.get(3)?,
      duration_value: row.get(4)?,
      duration_type:  row.get(5)?,
      is_published:   row.get(6)?,
    })
  }

  pub fn into_tour(self) -> Result<Tour> {
    Ok(Tour {
      tour_id:        decode_uuid(&self.tour_id)?,
      title:          self.title,
      description:    self.description,
      city_id:        self.city_id.as_deref().map(decode_uuid).transpose()?,
      duration_value: self.duration_value,
      duration_type:  self.duration_type,
      is_published:   self.is_published,
    })
  }
}

pub const DAY_COLUMNS: &str = "day_id, tour_id, day_number, title, date_hint";

pub struct RawDay {
  pub day_id:     String,
  pub tour_id:    String,
  pub day_number: i64,
  pub title:      String,
  pub date_hint:  String,
}

impl RawDay {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      day_id:     row.get(0)?,
      tour_id:    row.get(1)?,
      day_number: row.get(2)?,
      title:      row.get(3)?,
      date_hint:  row.get(4)?,
    })
  }

  pub fn into_day(self) -> Result<TourDay> {
    Ok(TourDay {
      day_id:     decode_uuid(&self.day_id)?,
      tour_id:    decode_uuid(&self.tour_id)?,
      day_number: self.day_number,
      title:      self.title,
      date_hint:  self.date_hint,
    })
  }
}

pub const BLOCK_COLUMNS: &str = "block_id, day_id, start_time, end_time, title";

pub struct RawBlock {
  pub block_id:   String,
  pub day_id:     String,
  pub start_time: String,
  pub end_time:   String,
  pub title:      String,
}

impl RawBlock {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      block_id:   row.get(0)?,
      day_id:     row.get(1)?,
      start_time: row.get(2)?,
      end_time:   row.get(3)?,
      title:      row.get(4)?,
    })
  }

  pub fn into_block(self) -> Result<TourBlock> {
    Ok(TourBlock {
      block_id:   decode_uuid(&self.block_id)?,
      day_id:     decode_uuid(&self.day_id)?,
      start_time: self.start_time,
      end_time:   self.end_time,
      title:      self.title,
    })
  }
}

pub const ITEM_COLUMNS: &str = "item_id, block_id, location_id, custom_title, \
                                custom_description, custom_recommendations, order_index, \
                                approx_cost";

pub struct RawItem {
  pub item_id:                String,
  pub block_id:               String,
  pub location_id:            String,
  pub custom_title:           String,
  pub custom_description:     String,
  pub custom_recommendations: String,
  pub order_index:            i64,
  pub approx_cost:            String,
}

impl RawItem {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      item_id:                row.get(0)?,
      block_id:               row.get(1)?,
      location_id:            row.get(2)?,
      custom_title:           row.get(3)?,
      custom_description:     row.get(4)?,
      custom_recommendations: row.get(5)?,
      order_index:            row.get(6)?,
      approx_cost:            row.get(7)?,
    })
  }

  pub fn into_item(self) -> Result<TourItem> {
    Ok(TourItem {
      item_id:                decode_uuid(&self.item_id)?,
      block_id:               decode_uuid(&self.block_id)?,
      location_id:            decode_uuid(&self.location_id)?,
      custom_title:           self.custom_title,
      custom_description:     self.custom_description,
      custom_recommendations: self.custom_recommendations,
      order_index:            self.order_index,
      approx_cost:            self.approx_cost,
    })
  }
}
