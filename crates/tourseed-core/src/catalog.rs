//! The desired-state catalog: what each tour's itinerary should look like.
//!
//! A catalog is a plain document keyed by exact tour title. It is loaded once
//! and handed to the reconciler by reference; nothing mutates it at runtime.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Separator between the start and end of a block's time range.
pub const TIME_RANGE_SEPARATOR: &str = " - ";

// ─── Document ────────────────────────────────────────────────────────────────

/// Desired itineraries keyed by exact tour title.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
  tours: BTreeMap<String, TourDesired>,
}

/// The desired state of one tour.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TourDesired {
  pub city:        String,
  #[serde(default)]
  pub country:     Option<String>,
  #[serde(default)]
  pub description: String,
  #[serde(default)]
  pub tags:        Vec<String>,
  #[serde(default)]
  pub daily_plan:  Vec<DayPlan>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayPlan {
  pub day:    i64,
  #[serde(default)]
  pub blocks: Vec<BlockPlan>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockPlan {
  /// A range such as `"09:00 - 11:00"`.
  pub time:  String,
  #[serde(default)]
  pub items: Vec<ItemPlan>,
}

/// A stop in a block. `title` names the location it resolves to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemPlan {
  pub title:           String,
  #[serde(default)]
  pub address:         String,
  #[serde(default)]
  pub category:        String,
  #[serde(default)]
  pub description:     String,
  #[serde(default)]
  pub recommendations: String,
}

/// On-disk encodings a catalog can be read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
  Json,
  Toml,
}

impl CatalogFormat {
  /// Pick a format from a file extension (`json` or `toml`).
  pub fn from_extension(ext: &str) -> Result<Self> {
    match ext.to_ascii_lowercase().as_str() {
      "json" => Ok(Self::Json),
      "toml" => Ok(Self::Toml),
      other => Err(Error::UnsupportedFormat(other.to_owned())),
    }
  }
}

impl Catalog {
  pub fn parse(text: &str, format: CatalogFormat) -> Result<Self> {
    match format {
      CatalogFormat::Json => Ok(serde_json::from_str(text)?),
      CatalogFormat::Toml => Ok(toml::from_str(text)?),
    }
  }

  /// Exact-title lookup. No case folding, no fuzzy matching.
  pub fn get(&self, title: &str) -> Option<&TourDesired> { self.tours.get(title) }

  pub fn len(&self) -> usize { self.tours.len() }

  pub fn is_empty(&self) -> bool { self.tours.is_empty() }
}

impl FromIterator<(String, TourDesired)> for Catalog {
  fn from_iter<I: IntoIterator<Item = (String, TourDesired)>>(iter: I) -> Self {
    Self { tours: iter.into_iter().collect() }
  }
}

impl TourDesired {
  /// The highest day number in the plan; `0` for an empty plan.
  ///
  /// This is not the number of days: a plan numbered `[1, 3]` lasts 3 days.
  pub fn duration_days(&self) -> i64 {
    self.daily_plan.iter().map(|d| d.day).max().unwrap_or(0)
  }

  pub fn block_count(&self) -> usize {
    self.daily_plan.iter().map(|d| d.blocks.len()).sum()
  }

  pub fn item_count(&self) -> usize {
    self
      .daily_plan
      .iter()
      .flat_map(|d| &d.blocks)
      .map(|b| b.items.len())
      .sum()
  }
}

// ─── Time ranges ─────────────────────────────────────────────────────────────

/// The start and end of a block, as written in the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeRange {
  pub start: String,
  pub end:   String,
}

impl TimeRange {
  /// Split `"09:00 - 11:00"` into its two sides at the first separator. Text
  /// without the separator yields an empty start and end.
  pub fn parse(text: &str) -> Self {
    match text.split_once(TIME_RANGE_SEPARATOR) {
      Some((start, end)) => Self { start: start.to_owned(), end: end.to_owned() },
      None => Self::default(),
    }
  }
}
