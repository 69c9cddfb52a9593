//! Reporting types for a reconciliation run.
//!
//! Row-level failures never abort a tour. Each one is recorded as a
//! [`DroppedRow`] on the tour's [`TourOutcome`] so callers can see exactly
//! which rows are missing and why.

use serde::Serialize;
use tourseed_core::model::Tour;
use uuid::Uuid;

use crate::Error;

// ─── Dropped rows ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowKind {
  Tag,
  Day,
  Block,
  Item,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", content = "detail", rename_all = "snake_case")]
pub enum DropReason {
  /// The tag could not be found or created.
  TagUnresolved(String),
  /// The item's location could not be found or created.
  LocationUnresolved(String),
  /// The row's own insert failed.
  InsertFailed(String),
  /// The enclosing day or block was not inserted.
  ParentMissing,
}

/// A catalog row that did not make it into the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DroppedRow {
  pub kind:   RowKind,
  /// Human-readable identification: tag name, `day 2`, block time, item title.
  pub label:  String,
  pub reason: DropReason,
}

// ─── Per-tour outcome ────────────────────────────────────────────────────────

/// Rows removed from the previous itinerary before rebuilding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RemovedTree {
  pub days:   usize,
  pub blocks: usize,
  pub items:  usize,
}

/// What reconciliation did to one tour that was updated.
#[derive(Debug, Clone, Serialize)]
pub struct TourOutcome {
  pub tour_id:        Uuid,
  pub title:          String,
  pub city_id:        Uuid,
  pub duration_value: i64,
  pub removed:        RemovedTree,
  pub removed_tags:   usize,
  pub tags:           usize,
  pub days:           usize,
  pub blocks:         usize,
  pub items:          usize,
  pub dropped:        Vec<DroppedRow>,
}

impl TourOutcome {
  pub(crate) fn new(tour: &Tour, city_id: Uuid, duration_value: i64) -> Self {
    Self {
      tour_id: tour.tour_id,
      title: tour.title.clone(),
      city_id,
      duration_value,
      removed: RemovedTree::default(),
      removed_tags: 0,
      tags: 0,
      days: 0,
      blocks: 0,
      items: 0,
      dropped: Vec::new(),
    }
  }

  pub(crate) fn drop_row(&mut self, kind: RowKind, label: impl Into<String>, reason: DropReason) {
    let label = label.into();
    tracing::warn!(tour = %self.title, ?kind, %label, ?reason, "dropped row");
    self.dropped.push(DroppedRow { kind, label, reason });
  }

  /// Dropped rows of one kind.
  pub fn dropped_of(&self, kind: RowKind) -> impl Iterator<Item = &DroppedRow> {
    self.dropped.iter().filter(move |d| d.kind == kind)
  }
}

// ─── Per-tour failure ────────────────────────────────────────────────────────

/// The step at which a tour's reconciliation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureStage {
  /// The tour's city could not be resolved; nothing was written.
  City,
  /// The tour row could not be updated; the old tree was left in place.
  Update,
  /// The old tree or tag links could not be read or removed; the tour row
  /// was already updated but nothing was rebuilt.
  ClearTree,
}

#[derive(Debug, Clone, Serialize)]
pub struct TourFailure {
  pub tour_id: Uuid,
  pub title:   String,
  pub stage:   FailureStage,
  pub message: String,
}

impl TourFailure {
  pub(crate) fn new(tour: &Tour, stage: FailureStage, err: &Error) -> Self {
    Self {
      tour_id: tour.tour_id,
      title: tour.title.clone(),
      stage,
      message: err.to_string(),
    }
  }
}

// ─── Run report ──────────────────────────────────────────────────────────────

/// The summary of one reconciliation run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReconcileReport {
  pub updated:  Vec<TourOutcome>,
  /// Titles of published tours with no catalog entry.
  pub skipped:  Vec<String>,
  pub failures: Vec<TourFailure>,
}

impl ReconcileReport {
  pub fn updated_count(&self) -> usize { self.updated.len() }

  pub fn skipped_count(&self) -> usize { self.skipped.len() }

  /// Items inserted across every updated tour.
  pub fn item_count(&self) -> usize { self.updated.iter().map(|o| o.items).sum() }

  pub fn dropped_count(&self) -> usize { self.updated.iter().map(|o| o.dropped.len()).sum() }

  pub fn outcome(&self, title: &str) -> Option<&TourOutcome> {
    self.updated.iter().find(|o| o.title == title)
  }
}
