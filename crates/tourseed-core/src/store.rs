//! The `TourStore` trait: the relational boundary the reconciler and auditor
//! talk to.
//!
//! The trait is implemented by storage backends (e.g.
//! `tourseed-store-sqlite`). Every method is a single independent statement;
//! nothing here spans a transaction.

use std::future::Future;

use uuid::Uuid;

use crate::model::{
  City, Location, NewCity, NewLocation, NewTour, NewTourBlock, NewTourDay, NewTourItem, Tag,
  Tour, TourBlock, TourDay, TourItem, TourPatch,
};

/// Abstraction over the relational store holding tours and their reference
/// data.
///
/// Name lookups are case-insensitive and return the earliest inserted row
/// when duplicates already exist. Inserts assign and return the row's id.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes.
pub trait TourStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Cities ────────────────────────────────────────────────────────────

  fn find_city_by_name<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<Option<City>, Self::Error>> + Send + 'a;

  fn insert_city(
    &self,
    city: NewCity,
  ) -> impl Future<Output = Result<City, Self::Error>> + Send + '_;

  fn get_city(
    &self,
    city_id: Uuid,
  ) -> impl Future<Output = Result<Option<City>, Self::Error>> + Send + '_;

  // ── Tags ──────────────────────────────────────────────────────────────

  fn find_tag_by_name<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<Option<Tag>, Self::Error>> + Send + 'a;

  fn insert_tag(
    &self,
    name: String,
  ) -> impl Future<Output = Result<Tag, Self::Error>> + Send + '_;

  // ── Locations ─────────────────────────────────────────────────────────

  /// Look up a location by case-insensitive name within one city.
  fn find_location<'a>(
    &'a self,
    name: &'a str,
    city_id: Uuid,
  ) -> impl Future<Output = Result<Option<Location>, Self::Error>> + Send + 'a;

  fn insert_location(
    &self,
    location: NewLocation,
  ) -> impl Future<Output = Result<Location, Self::Error>> + Send + '_;

  // ── Tours ─────────────────────────────────────────────────────────────

  /// All tours with `is_published` set, in store order.
  fn list_published_tours(
    &self,
  ) -> impl Future<Output = Result<Vec<Tour>, Self::Error>> + Send + '_;

  fn get_tour(
    &self,
    tour_id: Uuid,
  ) -> impl Future<Output = Result<Option<Tour>, Self::Error>> + Send + '_;

  fn insert_tour(
    &self,
    tour: NewTour,
  ) -> impl Future<Output = Result<Tour, Self::Error>> + Send + '_;

  /// Overwrite a tour's descriptive fields. Errors if the tour is missing.
  fn update_tour(
    &self,
    tour_id: Uuid,
    patch: TourPatch,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Tour ↔ tag links ──────────────────────────────────────────────────

  fn list_tour_tags(
    &self,
    tour_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Uuid>, Self::Error>> + Send + '_;

  fn insert_tour_tag(
    &self,
    tour_id: Uuid,
    tag_id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Remove every tag link of a tour, returning how many were removed.
  fn delete_tour_tags(
    &self,
    tour_id: Uuid,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;

  // ── Itinerary tree: reads ─────────────────────────────────────────────

  /// Days of a tour ordered by `day_number`.
  fn list_days(
    &self,
    tour_id: Uuid,
  ) -> impl Future<Output = Result<Vec<TourDay>, Self::Error>> + Send + '_;

  /// Blocks belonging to any of `day_ids`, in insertion order.
  fn list_blocks<'a>(
    &'a self,
    day_ids: &'a [Uuid],
  ) -> impl Future<Output = Result<Vec<TourBlock>, Self::Error>> + Send + 'a;

  /// Items belonging to any of `block_ids`, ordered by `order_index`.
  fn list_items<'a>(
    &'a self,
    block_ids: &'a [Uuid],
  ) -> impl Future<Output = Result<Vec<TourItem>, Self::Error>> + Send + 'a;

  // ── Itinerary tree: writes ────────────────────────────────────────────

  fn insert_day(
    &self,
    day: NewTourDay,
  ) -> impl Future<Output = Result<TourDay, Self::Error>> + Send + '_;

  fn insert_block(
    &self,
    block: NewTourBlock,
  ) -> impl Future<Output = Result<TourBlock, Self::Error>> + Send + '_;

  fn insert_item(
    &self,
    item: NewTourItem,
  ) -> impl Future<Output = Result<TourItem, Self::Error>> + Send + '_;

  /// Delete every item whose block is in `block_ids`. An empty set is a
  /// no-op.
  fn delete_items_in_blocks<'a>(
    &'a self,
    block_ids: &'a [Uuid],
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + 'a;

  fn delete_blocks<'a>(
    &'a self,
    block_ids: &'a [Uuid],
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + 'a;

  fn delete_days<'a>(
    &'a self,
    day_ids: &'a [Uuid],
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + 'a;
}
