//! Persisted entities and the shapes used to insert or patch them.
//!
//! Reference entities (cities, tags, locations) are resolved-or-created and
//! never updated. Tours are mutated in place. The itinerary tree beneath a
//! tour (days, blocks, items) is always replaced wholesale.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Provenance stamped on locations created from curated seed data.
pub const GUIDE_SOURCE: &str = "guide";

/// The only duration unit tours carry.
pub const DURATION_DAYS: &str = "days";

/// Normalise a name into its case-insensitive identity key.
pub fn name_key(name: &str) -> String { name.to_lowercase() }

// ─── Reference entities ──────────────────────────────────────────────────────

/// A city, unique per case-insensitive name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
  pub city_id:    Uuid,
  pub name:       String,
  pub country:    Option<String>,
  pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct NewCity {
  pub name:    String,
  pub country: Option<String>,
}

/// A tag, unique per case-insensitive name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
  pub tag_id:     Uuid,
  pub name:       String,
  pub created_at: DateTime<Utc>,
}

/// A point of interest, unique per (case-insensitive name, city).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
  pub location_id:     Uuid,
  pub name:            String,
  pub city_id:         Uuid,
  pub address:         String,
  pub category:        String,
  pub description:     String,
  pub recommendations: String,
  /// Provenance marker, e.g. [`GUIDE_SOURCE`].
  pub source:          String,
  pub verified:        bool,
  pub created_at:      DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct NewLocation {
  pub name:            String,
  pub city_id:         Uuid,
  pub address:         String,
  pub category:        String,
  pub description:     String,
  pub recommendations: String,
  pub source:          String,
  pub verified:        bool,
}

// ─── Tours ───────────────────────────────────────────────────────────────────

/// The top-level itinerary aggregate. `title` is the catalog lookup key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tour {
  pub tour_id:        Uuid,
  pub title:          String,
  pub description:    String,
  pub city_id:        Option<Uuid>,
  pub duration_value: i64,
  pub duration_type:  String,
  pub is_published:   bool,
}

#[derive(Debug, Clone, Default)]
pub struct NewTour {
  pub title:          String,
  pub description:    String,
  pub city_id:        Option<Uuid>,
  pub duration_value: i64,
  pub duration_type:  String,
  pub is_published:   bool,
}

/// The descriptive fields the reconciler overwrites on an existing tour.
#[derive(Debug, Clone)]
pub struct TourPatch {
  pub description:    String,
  pub city_id:        Uuid,
  pub duration_value: i64,
  pub duration_type:  String,
}

// ─── Itinerary tree ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TourDay {
  pub day_id:     Uuid,
  pub tour_id:    Uuid,
  /// 1-based, matches the catalog's day number.
  pub day_number: i64,
  pub title:      String,
  pub date_hint:  String,
}

#[derive(Debug, Clone)]
pub struct NewTourDay {
  pub tour_id:    Uuid,
  pub day_number: i64,
  pub title:      String,
  pub date_hint:  String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TourBlock {
  pub block_id:   Uuid,
  pub day_id:     Uuid,
  pub start_time: String,
  pub end_time:   String,
  pub title:      String,
}

#[derive(Debug, Clone)]
pub struct NewTourBlock {
  pub day_id:     Uuid,
  pub start_time: String,
  pub end_time:   String,
  pub title:      String,
}

/// One stop within a block. The `custom_*` fields override the location's
/// own description and recommendations when displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TourItem {
  pub item_id:                Uuid,
  pub block_id:               Uuid,
  pub location_id:            Uuid,
  pub custom_title:           String,
  pub custom_description:     String,
  pub custom_recommendations: String,
  /// 0-based position within the block.
  pub order_index:            i64,
  pub approx_cost:            String,
}

#[derive(Debug, Clone)]
pub struct NewTourItem {
  pub block_id:               Uuid,
  pub location_id:            Uuid,
  pub custom_title:           String,
  pub custom_description:     String,
  pub custom_recommendations: String,
  pub order_index:            i64,
  pub approx_cost:            String,
}
