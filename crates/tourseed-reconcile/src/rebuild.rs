//! Tearing down and rebuilding a tour's day → block → item tree.
//!
//! Teardown runs children before parents: items, then blocks, then days.
//! Any failure there stops the teardown, since rebuilding on top of a partly
//! cleared tree would duplicate rows. Rebuilding is best-effort: a row that
//! fails to insert is recorded on the outcome and its siblings carry on.

use tourseed_core::{
  catalog::{BlockPlan, DayPlan, TimeRange},
  model::{NewTourBlock, NewTourDay, NewTourItem},
  store::TourStore,
};
use uuid::Uuid;

use crate::{
  Error, Result,
  outcome::{DropReason, RemovedTree, RowKind, TourOutcome},
  resolve::resolve_location,
};

/// Delete every item, block and day beneath `tour_id`.
pub async fn clear_tree<S: TourStore>(store: &S, tour_id: Uuid) -> Result<RemovedTree> {
  let days = store.list_days(tour_id).await.map_err(Error::store)?;
  let day_ids: Vec<Uuid> = days.iter().map(|d| d.day_id).collect();

  let blocks = store.list_blocks(&day_ids).await.map_err(Error::store)?;
  let block_ids: Vec<Uuid> = blocks.iter().map(|b| b.block_id).collect();

  let items = store.delete_items_in_blocks(&block_ids).await.map_err(Error::store)?;
  let blocks = store.delete_blocks(&block_ids).await.map_err(Error::store)?;
  let days = store.delete_days(&day_ids).await.map_err(Error::store)?;

  let removed = RemovedTree { days, blocks, items };
  tracing::debug!(
    %tour_id,
    days = removed.days,
    blocks = removed.blocks,
    items = removed.items,
    "cleared itinerary"
  );
  Ok(removed)
}

/// Insert the catalog's plan beneath `tour_id`, resolving each item's
/// location within `city_id`. Counts and dropped rows land on `outcome`.
pub async fn build_tree<S: TourStore>(
  store: &S,
  tour_id: Uuid,
  city_id: Uuid,
  plan: &[DayPlan],
  outcome: &mut TourOutcome,
) {
  for day in plan {
    let inserted = store
      .insert_day(NewTourDay {
        tour_id,
        day_number: day.day,
        title: String::new(),
        date_hint: String::new(),
      })
      .await;

    let day_id = match inserted {
      Ok(row) => {
        outcome.days += 1;
        row.day_id
      }
      Err(e) => {
        outcome.drop_row(RowKind::Day, day_label(day), DropReason::InsertFailed(e.to_string()));
        for block in &day.blocks {
          drop_block(outcome, day, block, DropReason::ParentMissing);
        }
        continue;
      }
    };

    for block in &day.blocks {
      build_block(store, day_id, city_id, day, block, outcome).await;
    }
  }
}

async fn build_block<S: TourStore>(
  store: &S,
  day_id: Uuid,
  city_id: Uuid,
  day: &DayPlan,
  block: &BlockPlan,
  outcome: &mut TourOutcome,
) {
  let range = TimeRange::parse(&block.time);
  let inserted = store
    .insert_block(NewTourBlock {
      day_id,
      start_time: range.start,
      end_time: range.end,
      title: String::new(),
    })
    .await;

  let block_id = match inserted {
    Ok(row) => {
      outcome.blocks += 1;
      row.block_id
    }
    Err(e) => {
      drop_block(outcome, day, block, DropReason::InsertFailed(e.to_string()));
      return;
    }
  };

  for (index, item) in block.items.iter().enumerate() {
    let location_id = match resolve_location(store, city_id, item).await {
      Ok(id) => id,
      Err(e) => {
        outcome.drop_row(
          RowKind::Item,
          item.title.clone(),
          DropReason::LocationUnresolved(e.to_string()),
        );
        continue;
      }
    };

    let inserted = store
      .insert_item(NewTourItem {
        block_id,
        location_id,
        custom_title: item.title.clone(),
        custom_description: item.description.clone(),
        custom_recommendations: item.recommendations.clone(),
        order_index: index as i64,
        approx_cost: String::new(),
      })
      .await;

    match inserted {
      Ok(_) => outcome.items += 1,
      Err(e) => outcome.drop_row(
        RowKind::Item,
        item.title.clone(),
        DropReason::InsertFailed(e.to_string()),
      ),
    }
  }
}

/// Record a block as dropped along with every item beneath it.
fn drop_block(outcome: &mut TourOutcome, day: &DayPlan, block: &BlockPlan, reason: DropReason) {
  outcome.drop_row(RowKind::Block, format!("{} {}", day_label(day), block.time), reason);
  for item in &block.items {
    outcome.drop_row(RowKind::Item, item.title.clone(), DropReason::ParentMissing);
  }
}

fn day_label(day: &DayPlan) -> String { format!("day {}", day.day) }
