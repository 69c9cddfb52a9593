//! Read-only structural audit of published tours.
//!
//! The audit never writes. Warnings are advisory: a tour with no items or
//! only a handful is flagged for an operator to look at, nothing more.

use std::collections::HashMap;

use serde::Serialize;
use tourseed_core::{model::Tour, store::TourStore};
use uuid::Uuid;

use crate::{Error, Result};

/// Below this many items a tour is flagged as having very few locations.
pub const DEFAULT_FEW_ITEMS_THRESHOLD: usize = 5;

#[derive(Debug, Clone, Copy)]
pub struct AuditOptions {
  pub few_items_threshold: usize,
}

impl Default for AuditOptions {
  fn default() -> Self { Self { few_items_threshold: DEFAULT_FEW_ITEMS_THRESHOLD } }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditWarning {
  NoLocations,
  FewLocations,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayBreakdown {
  pub day_number:  i64,
  pub block_count: usize,
  pub item_count:  usize,
}

/// The structure found beneath one published tour.
#[derive(Debug, Clone, Serialize)]
pub struct TourAudit {
  pub tour_id:           Uuid,
  pub title:             String,
  /// `None` when the tour has no city or its city row is gone.
  pub city:              Option<String>,
  pub declared_duration: i64,
  pub day_count:         usize,
  pub block_count:       usize,
  pub item_count:        usize,
  pub blocks_per_day:    Vec<DayBreakdown>,
  pub warning:           Option<AuditWarning>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuditFailure {
  pub tour_id: Uuid,
  pub title:   String,
  pub message: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AuditReport {
  pub tours:    Vec<TourAudit>,
  pub failures: Vec<AuditFailure>,
}

impl AuditReport {
  pub fn warning_count(&self) -> usize {
    self.tours.iter().filter(|t| t.warning.is_some()).count()
  }

  pub fn tour(&self, title: &str) -> Option<&TourAudit> {
    self.tours.iter().find(|t| t.title == title)
  }
}

fn classify(item_count: usize, options: &AuditOptions) -> Option<AuditWarning> {
  if item_count == 0 {
    Some(AuditWarning::NoLocations)
  } else if item_count < options.few_items_threshold {
    Some(AuditWarning::FewLocations)
  } else {
    None
  }
}

/// Audit every published tour.
///
/// Only a failure to list the tours is returned as an error; a read failure
/// for one tour is recorded and the audit moves on.
pub async fn audit<S: TourStore>(store: &S, options: &AuditOptions) -> Result<AuditReport> {
  let tours = store.list_published_tours().await.map_err(Error::store)?;

  let mut report = AuditReport::default();
  for tour in &tours {
    match audit_tour(store, tour, options).await {
      Ok(audit) => {
        if let Some(warning) = audit.warning {
          tracing::warn!(tour = %audit.title, items = audit.item_count, ?warning, "suspect tour");
        }
        report.tours.push(audit);
      }
      Err(e) => {
        tracing::warn!(tour = %tour.title, error = %e, "audit read failed");
        report.failures.push(AuditFailure {
          tour_id: tour.tour_id,
          title:   tour.title.clone(),
          message: e.to_string(),
        });
      }
    }
  }
  Ok(report)
}

async fn audit_tour<S: TourStore>(
  store: &S,
  tour: &Tour,
  options: &AuditOptions,
) -> Result<TourAudit> {
  let days = store.list_days(tour.tour_id).await.map_err(Error::store)?;
  let day_ids: Vec<Uuid> = days.iter().map(|d| d.day_id).collect();

  let blocks = store.list_blocks(&day_ids).await.map_err(Error::store)?;
  let block_ids: Vec<Uuid> = blocks.iter().map(|b| b.block_id).collect();

  let items = store.list_items(&block_ids).await.map_err(Error::store)?;

  let mut items_per_block: HashMap<Uuid, usize> = HashMap::new();
  for item in &items {
    *items_per_block.entry(item.block_id).or_default() += 1;
  }

  let mut per_day: HashMap<Uuid, (usize, usize)> = HashMap::new();
  for block in &blocks {
    let entry = per_day.entry(block.day_id).or_default();
    entry.0 += 1;
    entry.1 += items_per_block.get(&block.block_id).copied().unwrap_or(0);
  }

  let blocks_per_day = days
    .iter()
    .map(|day| {
      let (block_count, item_count) = per_day.get(&day.day_id).copied().unwrap_or_default();
      DayBreakdown { day_number: day.day_number, block_count, item_count }
    })
    .collect();

  let city = match tour.city_id {
    Some(city_id) => store.get_city(city_id).await.map_err(Error::store)?.map(|c| c.name),
    None => None,
  };

  Ok(TourAudit {
    tour_id: tour.tour_id,
    title: tour.title.clone(),
    city,
    declared_duration: tour.duration_value,
    day_count: days.len(),
    block_count: blocks.len(),
    item_count: items.len(),
    blocks_per_day,
    warning: classify(items.len(), options),
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn classify_thresholds() {
    let options = AuditOptions::default();
    assert_eq!(classify(0, &options), Some(AuditWarning::NoLocations));
    assert_eq!(classify(1, &options), Some(AuditWarning::FewLocations));
    assert_eq!(classify(4, &options), Some(AuditWarning::FewLocations));
    assert_eq!(classify(5, &options), None);

    let lax = AuditOptions { few_items_threshold: 0 };
    assert_eq!(classify(1, &lax), None);
    assert_eq!(classify(0, &lax), Some(AuditWarning::NoLocations));
  }
}
