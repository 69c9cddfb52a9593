//! [`SqliteStore`] — the SQLite implementation of [`TourStore`].

use std::path::Path;

use chrono::Utc;
use tourseed_core::{
  model::{
    City, Location, NewCity, NewLocation, NewTour, NewTourBlock, NewTourDay, NewTourItem, Tag,
    Tour, TourBlock, TourDay, TourItem, TourPatch, name_key,
  },
  store::TourStore,
};
use uuid::Uuid;

use crate::{
  Error, Result,
  encode::{
    BLOCK_COLUMNS, CITY_COLUMNS, DAY_COLUMNS, ITEM_COLUMNS, LOCATION_COLUMNS, RawBlock, RawCity,
    RawDay, RawItem, RawLocation, RawTag, RawTour, TAG_COLUMNS, TOUR_COLUMNS, decode_uuid,
    encode_dt, encode_uuid, encode_uuids, placeholders,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A tour store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. Every
/// method runs exactly one statement, which SQLite commits on its own.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run a `SELECT` with text parameters and collect every row through `map`.
  async fn select<R, F>(&self, sql: String, params: Vec<String>, map: F) -> Result<Vec<R>>
  where
    R: Send + 'static,
    F: Fn(&rusqlite::Row<'_>) -> rusqlite::Result<R> + Send + 'static,
  {
    let rows = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(params.iter()), |row| map(row))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(rows)
  }

  /// Run a `DELETE ... WHERE <column> IN (...)` over `ids`. An empty id set
  /// issues no statement.
  async fn delete_in(
    &self,
    table: &'static str,
    column: &'static str,
    ids: &[Uuid],
  ) -> Result<usize> {
    if ids.is_empty() {
      return Ok(0);
    }
    let sql = format!("DELETE FROM {table} WHERE {column} IN ({})", placeholders(ids.len()));
    let params = encode_uuids(ids);

    let removed = self
      .conn
      .call(move |conn| Ok(conn.execute(&sql, rusqlite::params_from_iter(params.iter()))?))
      .await?;
    Ok(removed)
  }
}

// ─── TourStore impl ──────────────────────────────────────────────────────────

impl TourStore for SqliteStore {
  type Error = Error;

  // ── Cities ────────────────────────────────────────────────────────────────

  async fn find_city_by_name(&self, name: &str) -> Result<Option<City>> {
    let raws = self
      .select(
        format!("SELECT {CITY_COLUMNS} FROM cities WHERE name_key = ?1 ORDER BY rowid LIMIT 1"),
        vec![name_key(name)],
        RawCity::from_row,
      )
      .await?;
    raws.into_iter().next().map(RawCity::into_city).transpose()
  }

  async fn insert_city(&self, input: NewCity) -> Result<City> {
    let city = City {
      city_id:    Uuid::new_v4(),
      name:       input.name,
      country:    input.country,
      created_at: Utc::now(),
    };

    let id_str  = encode_uuid(city.city_id);
    let name    = city.name.clone();
    let key     = name_key(&city.name);
    let country = city.country.clone();
    let at_str  = encode_dt(city.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO cities (city_id, name, name_key, country, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![id_str, name, key, country, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(city)
  }

  async fn get_city(&self, city_id: Uuid) -> Result<Option<City>> {
    let raws = self
      .select(
        format!("SELECT {CITY_COLUMNS} FROM cities WHERE city_id = ?1"),
        vec![encode_uuid(city_id)],
        RawCity::from_row,
      )
      .await?;
    raws.into_iter().next().map(RawCity::into_city).transpose()
  }

  // ── Tags ──────────────────────────────────────────────────────────────────

  async fn find_tag_by_name(&self, name: &str) -> Result<Option<Tag>> {
    let raws = self
      .select(
        format!("SELECT {TAG_COLUMNS} FROM tags WHERE name_key = ?1 ORDER BY rowid LIMIT 1"),
        vec![name_key(name)],
        RawTag::from_row,
      )
      .await?;
    raws.into_iter().next().map(RawTag::into_tag).transpose()
  }

  async fn insert_tag(&self, name: String) -> Result<Tag> {
    let tag = Tag { tag_id: Uuid::new_v4(), name, created_at: Utc::now() };

    let id_str = encode_uuid(tag.tag_id);
    let name   = tag.name.clone();
    let key    = name_key(&tag.name);
    let at_str = encode_dt(tag.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO tags (tag_id, name, name_key, created_at) VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![id_str, name, key, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(tag)
  }

  // ── Locations ─────────────────────────────────────────────────────────────

  async fn find_location(&self, name: &str, city_id: Uuid) -> Result<Option<Location>> {
    let raws = self
      .select(
        format!(
          "SELECT {LOCATION_COLUMNS} FROM locations
           WHERE name_key = ?1 AND city_id = ?2
           ORDER BY rowid LIMIT 1"
        ),
        vec![name_key(name), encode_uuid(city_id)],
        RawLocation::from_row,
      )
      .await?;
    raws.into_iter().next().map(RawLocation::into_location).transpose()
  }

  async fn insert_location(&self, input: NewLocation) -> Result<Location> {
    let location = Location {
      location_id:     Uuid::new_v4(),
      name:            input.name,
      city_id:         input.city_id,
      address:         input.address,
      category:        input.category,
      description:     input.description,
      recommendations: input.recommendations,
      source:          input.source,
      verified:        input.verified,
      created_at:      Utc::now(),
    };

    let id_str          = encode_uuid(location.location_id);
    let name            = location.name.clone();
    let key             = name_key(&location.name);
    let city_str        = encode_uuid(location.city_id);
    let address         = location.address.clone();
    let category        = location.category.clone();
    let description     = location.description.clone();
    let recommendations = location.recommendations.clone();
    let source          = location.source.clone();
    let verified        = location.verified;
    let at_str          = encode_dt(location.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO locations (
             location_id, name, name_key, city_id, address, category,
             description, recommendations, source, verified, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
          rusqlite::params![
            id_str,
            name,
            key,
            city_str,
            address,
            category,
            description,
            recommendations,
            source,
            verified,
            at_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(location)
  }

  // ── Tours ─────────────────────────────────────────────────────────────────

  async fn list_published_tours(&self) -> Result<Vec<Tour>> {
    let raws = self
      .select(
        format!("SELECT {TOUR_COLUMNS} FROM tours WHERE is_published = 1 ORDER BY rowid"),
        vec![],
        RawTour::from_row,
      )
      .await?;
    raws.into_iter().map(RawTour::into_tour).collect()
  }

  async fn get_tour(&self, tour_id: Uuid) -> Result<Option<Tour>> {
    let raws = self
      .select(
        format!("SELECT {TOUR_COLUMNS} FROM tours WHERE tour_id = ?1"),
        vec![encode_uuid(tour_id)],
        RawTour::from_row,
      )
      .await?;
    raws.into_iter().next().map(RawTour::into_tour).transpose()
  }

  async fn insert_tour(&self, input: NewTour) -> Result<Tour> {
    let tour = Tour {
      tour_id:        Uuid::new_v4(),
      title:          input.title,
      description:    input.description,
      city_id:        input.city_id,
      duration_value: input.duration_value,
      duration_type:  input.duration_type,
      is_published:   input.is_published,
    };

    let id_str         = encode_uuid(tour.tour_id);
    let title          = tour.title.clone();
    let description    = tour.description.clone();
    let city_str       = tour.city_id.map(encode_uuid);
    let duration_value = tour.duration_value;
    let duration_type  = tour.duration_type.clone();
    let is_published   = tour.is_published;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO tours (
             tour_id, title, description, city_id,
             duration_value, duration_type, is_published
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
          rusqlite::params![
            id_str,
            title,
            description,
            city_str,
            duration_value,
            duration_type,
            is_published,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(tour)
  }

  async fn update_tour(&self, tour_id: Uuid, patch: TourPatch) -> Result<()> {
    let id_str   = encode_uuid(tour_id);
    let city_str = encode_uuid(patch.city_id);

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE tours
           SET description = ?2, city_id = ?3, duration_value = ?4, duration_type = ?5
           WHERE tour_id = ?1",
          rusqlite::params![
            id_str,
            patch.description,
            city_str,
            patch.duration_value,
            patch.duration_type,
          ],
        )?)
      })
      .await?;

    if changed == 0 {
      return Err(Error::TourNotFound(tour_id));
    }
    Ok(())
  }

  // ── Tour ↔ tag links ──────────────────────────────────────────────────────

  async fn list_tour_tags(&self, tour_id: Uuid) -> Result<Vec<Uuid>> {
    let raws: Vec<String> = self
      .select(
        "SELECT tag_id FROM tour_tags WHERE tour_id = ?1 ORDER BY rowid".to_owned(),
        vec![encode_uuid(tour_id)],
        |row| row.get(0),
      )
      .await?;
    raws.iter().map(|s| decode_uuid(s)).collect()
  }

  async fn insert_tour_tag(&self, tour_id: Uuid, tag_id: Uuid) -> Result<()> {
    let tour_str = encode_uuid(tour_id);
    let tag_str  = encode_uuid(tag_id);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO tour_tags (tour_id, tag_id) VALUES (?1, ?2)",
          rusqlite::params![tour_str, tag_str],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn delete_tour_tags(&self, tour_id: Uuid) -> Result<usize> {
    self.delete_in("tour_tags", "tour_id", &[tour_id]).await
  }

  // ── Itinerary tree: reads ─────────────────────────────────────────────────

  async fn list_days(&self, tour_id: Uuid) -> Result<Vec<TourDay>> {
    let raws = self
      .select(
        format!(
          "SELECT {DAY_COLUMNS} FROM tour_days WHERE tour_id = ?1 ORDER BY day_number, rowid"
        ),
        vec![encode_uuid(tour_id)],
        RawDay::from_row,
      )
      .await?;
    raws.into_iter().map(RawDay::into_day).collect()
  }

  async fn list_blocks(&self, day_ids: &[Uuid]) -> Result<Vec<TourBlock>> {
    if day_ids.is_empty() {
      return Ok(Vec::new());
    }
    let raws = self
      .select(
        format!(
          "SELECT {BLOCK_COLUMNS} FROM tour_blocks WHERE day_id IN ({}) ORDER BY rowid",
          placeholders(day_ids.len())
        ),
        encode_uuids(day_ids),
        RawBlock::from_row,
      )
      .await?;
    raws.into_iter().map(RawBlock::into_block).collect()
  }

  async fn list_items(&self, block_ids: &[Uuid]) -> Result<Vec<TourItem>> {
    if block_ids.is_empty() {
      return Ok(Vec::new());
    }
    let raws = self
      .select(
        format!(
          "SELECT {ITEM_COLUMNS} FROM tour_items WHERE block_id IN ({})
           ORDER BY order_index, rowid",
          placeholders(block_ids.len())
        ),
        encode_uuids(block_ids),
        RawItem::from_row,
      )
      .await?;
    raws.into_iter().map(RawItem::into_item).collect()
  }

  // ── Itinerary tree: writes ────────────────────────────────────────────────

  async fn insert_day(&self, input: NewTourDay) -> Result<TourDay> {
    let day = TourDay {
      day_id:     Uuid::new_v4(),
      tour_id:    input.tour_id,
      day_number: input.day_number,
      title:      input.title,
      date_hint:  input.date_hint,
    };

    let id_str     = encode_uuid(day.day_id);
    let tour_str   = encode_uuid(day.tour_id);
    let day_number = day.day_number;
    let title      = day.title.clone();
    let date_hint  = day.date_hint.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO tour_days (day_id, tour_id, day_number, title, date_hint)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![id_str, tour_str, day_number, title, date_hint],
        )?;
        Ok(())
      })
      .await?;

    Ok(day)
  }

  async fn insert_block(&self, input: NewTourBlock) -> Result<TourBlock> {
    let block = TourBlock {
      block_id:   Uuid::new_v4(),
      day_id:     input.day_id,
      start_time: input.start_time,
      end_time:   input.end_time,
      title:      input.title,
    };

    let id_str     = encode_uuid(block.block_id);
    let day_str    = encode_uuid(block.day_id);
    let start_time = block.start_time.clone();
    let end_time   = block.end_time.clone();
    let title      = block.title.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO tour_blocks (block_id, day_id, start_time, end_time, title)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![id_str, day_str, start_time, end_time, title],
        )?;
        Ok(())
      })
      .await?;

    Ok(block)
  }

  async fn insert_item(&self, input: NewTourItem) -> Result<TourItem> {
    let item = TourItem {
      item_id:                Uuid::new_v4(),
      block_id:               input.block_id,
      location_id:            input.location_id,
      custom_title:           input.custom_title,
      custom_description:     input.custom_description,
      custom_recommendations: input.custom_recommendations,
      order_index:            input.order_index,
      approx_cost:            input.approx_cost,
    };

    let id_str          = encode_uuid(item.item_id);
    let block_str       = encode_uuid(item.block_id);
    let location_str    = encode_uuid(item.location_id);
    let title           = item.custom_title.clone();
    let description     = item.custom_description.clone();
    let recommendations = item.custom_recommendations.clone();
    let order_index     = item.order_index;
    let approx_cost     = item.approx_cost.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO tour_items (
             item_id, block_id, location_id, custom_title, custom_description,
             custom_recommendations, order_index, approx_cost
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
          rusqlite::params![
            id_str,
            block_str,
            location_str,
            title,
            description,
            recommendations,
            order_index,
            approx_cost,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(item)
  }

  async fn delete_items_in_blocks(&self, block_ids: &[Uuid]) -> Result<usize> {
    self.delete_in("tour_items", "block_id", block_ids).await
  }

  async fn delete_blocks(&self, block_ids: &[Uuid]) -> Result<usize> {
    self.delete_in("tour_blocks", "block_id", block_ids).await
  }

  async fn delete_days(&self, day_ids: &[Uuid]) -> Result<usize> {
    self.delete_in("tour_days", "day_id", day_ids).await
  }
}
