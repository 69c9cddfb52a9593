//! A `TourStore` wrapper that fails selected operations on demand.

use thiserror::Error;
use tourseed_core::{
  model::{
    City, Location, NewCity, NewLocation, NewTour, NewTourBlock, NewTourDay, NewTourItem, Tag,
    Tour, TourBlock, TourDay, TourItem, TourPatch,
  },
  store::TourStore,
};
use tourseed_store_sqlite::SqliteStore;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum FlakyError {
  #[error("injected failure: {0}")]
  Injected(&'static str),

  #[error(transparent)]
  Store(#[from] tourseed_store_sqlite::Error),
}

/// Which operations fail. Name-keyed faults match exactly.
#[derive(Debug, Default)]
pub struct Faults {
  pub city_lookup:     bool,
  pub city_insert:     bool,
  pub tag_lookup:      Option<String>,
  pub tag_insert:      Option<String>,
  pub location_insert: Option<String>,
  pub update_tour:     bool,
  /// Fail inserting a block with this start time.
  pub block_insert:    Option<String>,
  pub list_days:       bool,
}

pub struct FlakyStore {
  inner:  SqliteStore,
  faults: Faults,
}

impl FlakyStore {
  pub fn new(inner: SqliteStore, faults: Faults) -> Self { Self { inner, faults } }
}

fn fail<T>(what: &'static str) -> Result<T, FlakyError> { Err(FlakyError::Injected(what)) }

impl TourStore for FlakyStore {
  type Error = FlakyError;

  async fn find_city_by_name(&self, name: &str) -> Result<Option<City>, FlakyError> {
    if self.faults.city_lookup {
      return fail("city lookup");
    }
    Ok(self.inner.find_city_by_name(name).await?)
  }

  async fn insert_city(&self, city: NewCity) -> Result<City, FlakyError> {
    if self.faults.city_insert {
      return fail("city insert");
    }
    Ok(self.inner.insert_city(city).await?)
  }

  async fn get_city(&self, city_id: Uuid) -> Result<Option<City>, FlakyError> {
    Ok(self.inner.get_city(city_id).await?)
  }

  async fn find_tag_by_name(&self, name: &str) -> Result<Option<Tag>, FlakyError> {
    if self.faults.tag_lookup.as_deref() == Some(name) {
      return fail("tag lookup");
    }
    Ok(self.inner.find_tag_by_name(name).await?)
  }

  async fn insert_tag(&self, name: String) -> Result<Tag, FlakyError> {
    if self.faults.tag_insert.as_deref() == Some(name.as_str()) {
      return fail("tag insert");
    }
    Ok(self.inner.insert_tag(name).await?)
  }

  async fn find_location(&self, name: &str, city_id: Uuid) -> Result<Option<Location>, FlakyError> {
    Ok(self.inner.find_location(name, city_id).await?)
  }

  async fn insert_location(&self, location: NewLocation) -> Result<Location, FlakyError> {
    if self.faults.location_insert.as_deref() == Some(location.name.as_str()) {
      return fail("location insert");
    }
    Ok(self.inner.insert_location(location).await?)
  }

  async fn list_published_tours(&self) -> Result<Vec<Tour>, FlakyError> {
    Ok(self.inner.list_published_tours().await?)
  }

  async fn get_tour(&self, tour_id: Uuid) -> Result<Option<Tour>, FlakyError> {
    Ok(self.inner.get_tour(tour_id).await?)
  }

  async fn insert_tour(&self, tour: NewTour) -> Result<Tour, FlakyError> {
    Ok(self.inner.insert_tour(tour).await?)
  }

  async fn update_tour(&self, tour_id: Uuid, patch: TourPatch) -> Result<(), FlakyError> {
    if self.faults.update_tour {
      return fail("tour update");
    }
    Ok(self.inner.update_tour(tour_id, patch).await?)
  }

  async fn list_tour_tags(&self, tour_id: Uuid) -> Result<Vec<Uuid>, FlakyError> {
    Ok(self.inner.list_tour_tags(tour_id).await?)
  }

  async fn insert_tour_tag(&self, tour_id: Uuid, tag_id: Uuid) -> Result<(), FlakyError> {
    Ok(self.inner.insert_tour_tag(tour_id, tag_id).await?)
  }

  async fn delete_tour_tags(&self, tour_id: Uuid) -> Result<usize, FlakyError> {
    Ok(self.inner.delete_tour_tags(tour_id).await?)
  }

  async fn list_days(&self, tour_id: Uuid) -> Result<Vec<TourDay>, FlakyError> {
    if self.faults.list_days {
      return fail("list days");
    }
    Ok(self.inner.list_days(tour_id).await?)
  }

  async fn list_blocks(&self, day_ids: &[Uuid]) -> Result<Vec<TourBlock>, FlakyError> {
    Ok(self.inner.list_blocks(day_ids).await?)
  }

  async fn list_items(&self, block_ids: &[Uuid]) -> Result<Vec<TourItem>, FlakyError> {
    Ok(self.inner.list_items(block_ids).await?)
  }

  async fn insert_day(&self, day: NewTourDay) -> Result<TourDay, FlakyError> {
    Ok(self.inner.insert_day(day).await?)
  }

  async fn insert_block(&self, block: NewTourBlock) -> Result<TourBlock, FlakyError> {
    if self.faults.block_insert.as_deref() == Some(block.start_time.as_str()) {
      return fail("block insert");
    }
    Ok(self.inner.insert_block(block).await?)
  }

  async fn insert_item(&self, item: NewTourItem) -> Result<TourItem, FlakyError> {
    Ok(self.inner.insert_item(item).await?)
  }

  async fn delete_items_in_blocks(&self, block_ids: &[Uuid]) -> Result<usize, FlakyError> {
    Ok(self.inner.delete_items_in_blocks(block_ids).await?)
  }

  async fn delete_blocks(&self, block_ids: &[Uuid]) -> Result<usize, FlakyError> {
    Ok(self.inner.delete_blocks(block_ids).await?)
  }

  async fn delete_days(&self, day_ids: &[Uuid]) -> Result<usize, FlakyError> {
    Ok(self.inner.delete_days(day_ids).await?)
  }
}
