//! The reconciler: bring every published tour that has a catalog entry into
//! line with that entry.
//!
//! Per tour, in order:
//!
//! 1. Look the tour up in the catalog by exact title; skip it if absent.
//! 2. Resolve the city. Failure stops the tour before anything is written.
//! 3. Resolve each tag. A failed tag is dropped, the rest still apply.
//! 4. Update the tour row. Failure stops the tour with its old tree intact.
//! 5. Clear the old tree and tag links, then insert the new ones.
//!
//! Nothing is transactional. A run interrupted midway can leave a tour with
//! a partial tree; the next run clears it fully before rebuilding, so
//! repeated runs converge.

use tourseed_core::{
  catalog::{Catalog, TourDesired},
  model::{DURATION_DAYS, Tour, TourPatch},
  store::TourStore,
};
use uuid::Uuid;

use crate::{
  Error, Result,
  outcome::{DropReason, FailureStage, ReconcileReport, RowKind, TourFailure, TourOutcome},
  rebuild::{build_tree, clear_tree},
  resolve::{resolve_city, resolve_tag},
};

/// Reconcile every published tour in `store` against `catalog`.
///
/// Only a failure to list the published tours is returned as an error; every
/// per-tour failure is recorded in the report.
pub async fn reconcile<S: TourStore>(store: &S, catalog: &Catalog) -> Result<ReconcileReport> {
  Reconciler::new(store, catalog).run().await
}

pub struct Reconciler<'a, S> {
  store:   &'a S,
  catalog: &'a Catalog,
}

impl<'a, S: TourStore> Reconciler<'a, S> {
  pub fn new(store: &'a S, catalog: &'a Catalog) -> Self { Self { store, catalog } }

  pub async fn run(&self) -> Result<ReconcileReport> {
    let tours = self.store.list_published_tours().await.map_err(Error::store)?;
    tracing::info!(
      published = tours.len(),
      catalog = self.catalog.len(),
      "reconciling tours"
    );

    let mut report = ReconcileReport::default();
    for tour in &tours {
      let Some(desired) = self.catalog.get(&tour.title) else {
        tracing::debug!(tour = %tour.title, "no catalog entry; skipped");
        report.skipped.push(tour.title.clone());
        continue;
      };

      match self.reconcile_tour(tour, desired).await {
        Ok(outcome) => {
          tracing::info!(
            tour = %outcome.title,
            days = outcome.days,
            blocks = outcome.blocks,
            items = outcome.items,
            dropped = outcome.dropped.len(),
            "tour updated"
          );
          report.updated.push(outcome);
        }
        Err(failure) => {
          tracing::warn!(
            tour = %failure.title,
            stage = ?failure.stage,
            error = %failure.message,
            "tour not reconciled"
          );
          report.failures.push(failure);
        }
      }
    }

    tracing::info!(
      updated = report.updated_count(),
      skipped = report.skipped_count(),
      failed = report.failures.len(),
      "reconciliation finished"
    );
    Ok(report)
  }

  /// Bring one tour in line with its catalog entry.
  pub async fn reconcile_tour(
    &self,
    tour: &Tour,
    desired: &TourDesired,
  ) -> Result<TourOutcome, TourFailure> {
    let store = self.store;

    let city_id = resolve_city(store, &desired.city, desired.country.as_deref())
      .await
      .map_err(|e| TourFailure::new(tour, FailureStage::City, &e))?;

    let duration_value = desired.duration_days();
    let mut outcome = TourOutcome::new(tour, city_id, duration_value);
    let tag_ids = self.resolve_tags(desired, &mut outcome).await;

    store
      .update_tour(tour.tour_id, TourPatch {
        description: desired.description.clone(),
        city_id,
        duration_value,
        duration_type: DURATION_DAYS.to_owned(),
      })
      .await
      .map_err(|e| TourFailure::new(tour, FailureStage::Update, &Error::store(e)))?;

    outcome.removed = clear_tree(store, tour.tour_id)
      .await
      .map_err(|e| TourFailure::new(tour, FailureStage::ClearTree, &e))?;
    outcome.removed_tags = store
      .delete_tour_tags(tour.tour_id)
      .await
      .map_err(|e| TourFailure::new(tour, FailureStage::ClearTree, &Error::store(e)))?;

    for (tag_id, name) in tag_ids {
      match store.insert_tour_tag(tour.tour_id, tag_id).await {
        Ok(()) => outcome.tags += 1,
        Err(e) => outcome.drop_row(RowKind::Tag, name, DropReason::InsertFailed(e.to_string())),
      }
    }

    build_tree(store, tour.tour_id, city_id, &desired.daily_plan, &mut outcome).await;
    Ok(outcome)
  }

  /// Resolve the catalog's tags, dropping failures and collapsing names that
  /// resolve to the same tag.
  async fn resolve_tags(
    &self,
    desired: &TourDesired,
    outcome: &mut TourOutcome,
  ) -> Vec<(Uuid, String)> {
    let mut resolved: Vec<(Uuid, String)> = Vec::with_capacity(desired.tags.len());
    for name in &desired.tags {
      match resolve_tag(self.store, name).await {
        Ok(id) if resolved.iter().any(|(seen, _)| *seen == id) => {}
        Ok(id) => resolved.push((id, name.clone())),
        Err(e) => {
          outcome.drop_row(RowKind::Tag, name.clone(), DropReason::TagUnresolved(e.to_string()))
        }
      }
    }
    resolved
  }
}
