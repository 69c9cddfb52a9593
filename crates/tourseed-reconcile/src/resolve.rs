//! Get-or-create resolution of reference entities.
//!
//! Cities and tags are keyed by case-insensitive name; locations by
//! case-insensitive name within a city. A match is returned as-is and never
//! updated, even when the catalog carries different attributes.
//!
//! A failed lookup is logged and treated as "not found", so the caller goes
//! on to create. Only a failed create surfaces as an error.

use std::fmt;

use tourseed_core::{
  catalog::ItemPlan,
  model::{GUIDE_SOURCE, NewCity, NewLocation},
  store::TourStore,
};
use uuid::Uuid;

use crate::{Error, Result};

/// The reference entities resolved by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
  City,
  Tag,
  Location,
}

impl fmt::Display for EntityKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::City => "city",
      Self::Tag => "tag",
      Self::Location => "location",
    })
  }
}

/// Collapse a lookup result into a hit or a miss, logging lookup errors.
fn hit_or_miss<T, E: fmt::Display>(
  kind: EntityKind,
  name: &str,
  lookup: std::result::Result<Option<T>, E>,
) -> Option<T> {
  match lookup {
    Ok(hit) => hit,
    Err(error) => {
      tracing::warn!(%kind, name, %error, "lookup failed; attempting create");
      None
    }
  }
}

fn create_failed<E>(kind: EntityKind, name: &str, err: E) -> Error
where
  E: std::error::Error + Send + Sync + 'static,
{
  tracing::warn!(%kind, name, error = %err, "create failed");
  Error::Create { kind, name: name.to_owned(), source: Box::new(err) }
}

/// Resolve a city by name, creating it with `country` if absent.
pub async fn resolve_city<S: TourStore>(
  store: &S,
  name: &str,
  country: Option<&str>,
) -> Result<Uuid> {
  let lookup = store.find_city_by_name(name).await;
  if let Some(city) = hit_or_miss(EntityKind::City, name, lookup) {
    return Ok(city.city_id);
  }

  let city = store
    .insert_city(NewCity { name: name.to_owned(), country: country.map(str::to_owned) })
    .await
    .map_err(|e| create_failed(EntityKind::City, name, e))?;
  tracing::info!(city = %city.name, "created city");
  Ok(city.city_id)
}

/// Resolve a tag by name, creating it if absent.
pub async fn resolve_tag<S: TourStore>(store: &S, name: &str) -> Result<Uuid> {
  let lookup = store.find_tag_by_name(name).await;
  if let Some(tag) = hit_or_miss(EntityKind::Tag, name, lookup) {
    return Ok(tag.tag_id);
  }

  let tag = store
    .insert_tag(name.to_owned())
    .await
    .map_err(|e| create_failed(EntityKind::Tag, name, e))?;
  tracing::info!(tag = %tag.name, "created tag");
  Ok(tag.tag_id)
}

/// Resolve the location an itinerary item points at, scoped to `city_id`.
///
/// New locations are stamped as curated guide data: `source = "guide"` and
/// `verified = true`.
pub async fn resolve_location<S: TourStore>(
  store: &S,
  city_id: Uuid,
  item: &ItemPlan,
) -> Result<Uuid> {
  let name = item.title.as_str();
  let lookup = store.find_location(name, city_id).await;
  if let Some(location) = hit_or_miss(EntityKind::Location, name, lookup) {
    return Ok(location.location_id);
  }

  let location = store
    .insert_location(NewLocation {
      name: name.to_owned(),
      city_id,
      address: item.address.clone(),
      category: item.category.clone(),
      description: item.description.clone(),
      recommendations: item.recommendations.clone(),
      source: GUIDE_SOURCE.to_owned(),
      verified: true,
    })
    .await
    .map_err(|e| create_failed(EntityKind::Location, name, e))?;
  tracing::debug!(location = %location.name, %city_id, "created location");
  Ok(location.location_id)
}
