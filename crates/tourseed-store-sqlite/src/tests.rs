//! Integration tests for `SqliteStore` against an in-memory database.

use tourseed_core::{
  model::{
    DURATION_DAYS, NewCity, NewLocation, NewTour, NewTourBlock, NewTourDay, NewTourItem,
    TourPatch,
  },
  store::TourStore,
};
use uuid::Uuid;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn new_city(name: &str) -> NewCity {
  NewCity { name: name.into(), country: Some("Italy".into()) }
}

fn new_tour(title: &str, published: bool) -> NewTour {
  NewTour {
    title:          title.into(),
    description:    "old".into(),
    city_id:        None,
    duration_value: 0,
    duration_type:  DURATION_DAYS.into(),
    is_published:   published,
  }
}

fn new_location(name: &str, city_id: Uuid) -> NewLocation {
  NewLocation {
    name: name.into(),
    city_id,
    address: "Piazza del Colosseo".into(),
    source: "guide".into(),
    verified: true,
    ..Default::default()
  }
}

// ─── Reference entities ──────────────────────────────────────────────────────

#[tokio::test]
async fn city_lookup_is_case_insensitive() {
  let s = store().await;
  let rome = s.insert_city(new_city("Rome")).await.unwrap();

  let found = s.find_city_by_name("rOME").await.unwrap().unwrap();
  assert_eq!(found.city_id, rome.city_id);
  assert_eq!(found.name, "Rome");
  assert_eq!(found.country.as_deref(), Some("Italy"));

  assert!(s.find_city_by_name("Roma").await.unwrap().is_none());
}

#[tokio::test]
async fn city_lookup_prefers_earliest_duplicate() {
  let s = store().await;
  let first = s.insert_city(new_city("Paris")).await.unwrap();
  s.insert_city(new_city("PARIS")).await.unwrap();

  let found = s.find_city_by_name("paris").await.unwrap().unwrap();
  assert_eq!(found.city_id, first.city_id);
}

#[tokio::test]
async fn get_city_by_id() {
  let s = store().await;
  let city = s.insert_city(new_city("Florence")).await.unwrap();

  let fetched = s.get_city(city.city_id).await.unwrap().unwrap();
  assert_eq!(fetched, city);
  assert!(s.get_city(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn tag_lookup_is_case_insensitive() {
  let s = store().await;
  let tag = s.insert_tag("History".into()).await.unwrap();

  let found = s.find_tag_by_name("history").await.unwrap().unwrap();
  assert_eq!(found.tag_id, tag.tag_id);
}

#[tokio::test]
async fn location_lookup_is_scoped_to_city() {
  let s = store().await;
  let rome = s.insert_city(new_city("Rome")).await.unwrap();
  let paris = s.insert_city(new_city("Paris")).await.unwrap();
  let loc = s.insert_location(new_location("Old Town", rome.city_id)).await.unwrap();

  let found = s.find_location("old town", rome.city_id).await.unwrap().unwrap();
  assert_eq!(found.location_id, loc.location_id);
  assert_eq!(found.source, "guide");
  assert!(found.verified);

  assert!(s.find_location("Old Town", paris.city_id).await.unwrap().is_none());
}

#[tokio::test]
async fn location_requires_existing_city() {
  let s = store().await;
  let err = s
    .insert_location(new_location("Nowhere", Uuid::new_v4()))
    .await
    .unwrap_err();
  assert!(matches!(err, crate::Error::Database(_)));
}

// ─── Tours ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_published_tours_filters_drafts() {
  let s = store().await;
  s.insert_tour(new_tour("Published", true)).await.unwrap();
  s.insert_tour(new_tour("Draft", false)).await.unwrap();

  let tours = s.list_published_tours().await.unwrap();
  assert_eq!(tours.len(), 1);
  assert_eq!(tours[0].title, "Published");
}

#[tokio::test]
async fn update_tour_overwrites_fields() {
  let s = store().await;
  let city = s.insert_city(new_city("Rome")).await.unwrap();
  let tour = s.insert_tour(new_tour("Test Tour", true)).await.unwrap();

  s.update_tour(tour.tour_id, TourPatch {
    description:    "new".into(),
    city_id:        city.city_id,
    duration_value: 3,
    duration_type:  DURATION_DAYS.into(),
  })
  .await
  .unwrap();

  let fetched = s.get_tour(tour.tour_id).await.unwrap().unwrap();
  assert_eq!(fetched.description, "new");
  assert_eq!(fetched.city_id, Some(city.city_id));
  assert_eq!(fetched.duration_value, 3);
  assert_eq!(fetched.title, "Test Tour");
}

#[tokio::test]
async fn update_missing_tour_errors() {
  let s = store().await;
  let city = s.insert_city(new_city("Rome")).await.unwrap();
  let missing = Uuid::new_v4();

  let err = s
    .update_tour(missing, TourPatch {
      description:    String::new(),
      city_id:        city.city_id,
      duration_value: 1,
      duration_type:  DURATION_DAYS.into(),
    })
    .await
    .unwrap_err();
  assert!(matches!(err, crate::Error::TourNotFound(id) if id == missing));
}

#[tokio::test]
async fn tour_tags_insert_list_delete() {
  let s = store().await;
  let tour = s.insert_tour(new_tour("Test Tour", true)).await.unwrap();
  let a = s.insert_tag("a".into()).await.unwrap();
  let b = s.insert_tag("b".into()).await.unwrap();

  s.insert_tour_tag(tour.tour_id, a.tag_id).await.unwrap();
  s.insert_tour_tag(tour.tour_id, b.tag_id).await.unwrap();
  assert_eq!(s.list_tour_tags(tour.tour_id).await.unwrap(), [a.tag_id, b.tag_id]);

  // The link table's primary key rejects a duplicate pair.
  assert!(s.insert_tour_tag(tour.tour_id, a.tag_id).await.is_err());

  assert_eq!(s.delete_tour_tags(tour.tour_id).await.unwrap(), 2);
  assert!(s.list_tour_tags(tour.tour_id).await.unwrap().is_empty());
}

// ─── Itinerary tree ──────────────────────────────────────────────────────────

struct Tree {
  tour_id:  Uuid,
  day_ids:  Vec<Uuid>,
  block_id: Uuid,
}

async fn seed_tree(s: &SqliteStore) -> Tree {
  let city = s.insert_city(new_city("Rome")).await.unwrap();
  let loc = s.insert_location(new_location("Colosseum", city.city_id)).await.unwrap();
  let tour = s.insert_tour(new_tour("Test Tour", true)).await.unwrap();

  // Insert day 2 first to check ordering by day_number.
  let day2 = s
    .insert_day(NewTourDay {
      tour_id:    tour.tour_id,
      day_number: 2,
      title:      String::new(),
      date_hint:  String::new(),
    })
    .await
    .unwrap();
  let day1 = s
    .insert_day(NewTourDay {
      tour_id:    tour.tour_id,
      day_number: 1,
      title:      String::new(),
      date_hint:  String::new(),
    })
    .await
    .unwrap();
  let block = s
    .insert_block(NewTourBlock {
      day_id:     day1.day_id,
      start_time: "10:00".into(),
      end_time:   "12:00".into(),
      title:      String::new(),
    })
    .await
    .unwrap();
  for (index, title) in ["second", "first"].into_iter().enumerate().rev() {
    s.insert_item(NewTourItem {
      block_id:               block.block_id,
      location_id:            loc.location_id,
      custom_title:           title.into(),
      custom_description:     String::new(),
      custom_recommendations: String::new(),
      order_index:            index as i64,
      approx_cost:            String::new(),
    })
    .await
    .unwrap();
  }

  Tree { tour_id: tour.tour_id, day_ids: vec![day1.day_id, day2.day_id], block_id: block.block_id }
}

#[tokio::test]
async fn tree_reads_are_ordered() {
  let s = store().await;
  let tree = seed_tree(&s).await;

  let days = s.list_days(tree.tour_id).await.unwrap();
  assert_eq!(days.iter().map(|d| d.day_number).collect::<Vec<_>>(), [1, 2]);

  let blocks = s.list_blocks(&tree.day_ids).await.unwrap();
  assert_eq!(blocks.len(), 1);
  assert_eq!(blocks[0].start_time, "10:00");
  assert_eq!(blocks[0].end_time, "12:00");

  let items = s.list_items(&[tree.block_id]).await.unwrap();
  assert_eq!(
    items.iter().map(|i| i.custom_title.as_str()).collect::<Vec<_>>(),
    ["second", "first"]
  );
  assert_eq!(items[0].order_index, 0);
}

#[tokio::test]
async fn deleting_parent_before_children_is_rejected() {
  let s = store().await;
  let tree = seed_tree(&s).await;

  assert!(s.delete_blocks(&[tree.block_id]).await.is_err());
  assert!(s.delete_days(&tree.day_ids).await.is_err());
}

#[tokio::test]
async fn deleting_children_first_clears_tree() {
  let s = store().await;
  let tree = seed_tree(&s).await;

  assert_eq!(s.delete_items_in_blocks(&[tree.block_id]).await.unwrap(), 2);
  assert_eq!(s.delete_blocks(&[tree.block_id]).await.unwrap(), 1);
  assert_eq!(s.delete_days(&tree.day_ids).await.unwrap(), 2);
  assert!(s.list_days(tree.tour_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn empty_id_sets_are_noops() {
  let s = store().await;
  assert_eq!(s.delete_items_in_blocks(&[]).await.unwrap(), 0);
  assert_eq!(s.delete_blocks(&[]).await.unwrap(), 0);
  assert_eq!(s.delete_days(&[]).await.unwrap(), 0);
  assert!(s.list_blocks(&[]).await.unwrap().is_empty());
  assert!(s.list_items(&[]).await.unwrap().is_empty());
}
