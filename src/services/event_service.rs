use chrono::{DateTime, TimeZone, Utc};

use crate::models::{Event, EventCategories, EventForm, Record};
use crate::store::{to_fields, SharedStore};

use super::records::{fetch, fetch_document, list};
use super::ServiceError;

/// Partition events into past, today and upcoming relative to `now`.
///
/// "Today" is the calendar date of `now` in its own zone and takes
/// precedence, so an event earlier today is still listed under today.
/// Relative order is preserved within each group.
pub fn categorize_events<Tz: TimeZone>(events: Vec<Event>, now: &DateTime<Tz>) -> EventCategories {
    let zone = now.timezone();
    let today = now.date_naive();
    let now_utc = now.with_timezone(&Utc);

    let mut categories = EventCategories::default();
    for event in events {
        if event.start_time.with_timezone(&zone).date_naive() == today {
            categories.today.push(event);
        } else if event.start_time < now_utc {
            categories.past.push(event);
        } else {
            categories.upcoming.push(event);
        }
    }
    categories
}

#[derive(Clone)]
pub struct EventService {
    store: SharedStore,
}

impl EventService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    pub async fn list_categorized<Tz: TimeZone>(
        &self,
        now: &DateTime<Tz>,
    ) -> Result<EventCategories, ServiceError> {
        let events = list::<Event>(self.store.as_ref()).await?;
        Ok(categorize_events(events, now))
    }

    pub async fn get(&self, id: &str) -> Result<Event, ServiceError> {
        fetch::<Event>(self.store.as_ref(), id).await
    }

    pub async fn create(&self, form: EventForm, now: DateTime<Utc>) -> Result<Event, ServiceError> {
        let mut event = form.validate(now)?;

        let id = self
            .store
            .create(Event::COLLECTION, to_fields(&event)?)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create event: {}", e);
                e
            })?;

        tracing::info!("Created event {} ({})", id, event.title);
        event.id = id;
        Ok(event)
    }

    /// Merge the submitted form into an existing event.
    pub async fn update(
        &self,
        id: &str,
        form: EventForm,
        now: DateTime<Utc>,
    ) -> Result<Event, ServiceError> {
        fetch_document::<Event>(self.store.as_ref(), id).await?;
        let mut event = form.validate(now)?;

        self.store
            .update(Event::COLLECTION, id, to_fields(&event)?)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update event {}: {}", id, e);
                e
            })?;

        tracing::info!("Updated event {}", id);
        event.id = id.to_string();
        Ok(event)
    }

    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        fetch_document::<Event>(self.store.as_ref(), id).await?;

        self.store
            .delete(Event::COLLECTION, id)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete event {}: {}", id, e);
                e
            })?;

        tracing::info!("Deleted event {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Collection, DocumentStore, MemoryStore, MockDocumentStore};
    use chrono::{Duration, FixedOffset};
    use proptest::prelude::*;
    use serde_json::json;
    use std::collections::HashSet;
    use std::sync::Arc;

    fn event(id: &str, start_time: DateTime<Utc>) -> Event {
        Event {
            id: id.to_string(),
            title: format!("Event {}", id),
            event_id: id.to_string(),
            email: "events@scout.fit".to_string(),
            description: String::new(),
            contact_number: String::new(),
            event_link: String::new(),
            location: String::new(),
            price: 0.0,
            is_free: true,
            start_time,
        }
    }

    fn ids(events: &[Event]) -> Vec<&str> {
        events.iter().map(|e| e.id.as_str()).collect()
    }

    fn ist() -> FixedOffset {
        FixedOffset::east_opt(5 * 3600 + 1800).unwrap()
    }

    #[test]
    fn test_categorize_basic_partition() {
        // 2030-03-01 15:00 +05:30
        let now = ist().with_ymd_and_hms(2030, 3, 1, 15, 0, 0).unwrap();
        let at = |d: u32, h: u32| ist().with_ymd_and_hms(2030, 3, d, h, 0, 0).unwrap().with_timezone(&Utc);

        let events = vec![
            event("yesterday", at(1, 0) - Duration::hours(1)),
            event("this-morning", at(1, 8)),
            event("tonight", at(1, 21)),
            event("next-week", at(8, 9)),
            event("last-week", at(1, 9) - Duration::days(7)),
        ];

        let categories = categorize_events(events, &now);
        assert_eq!(ids(&categories.past), vec!["yesterday", "last-week"]);
        assert_eq!(ids(&categories.today), vec!["this-morning", "tonight"]);
        assert_eq!(ids(&categories.upcoming), vec!["next-week"]);
    }

    #[test]
    fn test_today_follows_the_zone_of_now() {
        // 00:30 local on 2 March is still 1 March in UTC
        let now = ist().with_ymd_and_hms(2030, 3, 2, 0, 30, 0).unwrap();
        let late_utc_evening = Utc.with_ymd_and_hms(2030, 3, 1, 19, 0, 0).unwrap(); // 00:30 local
        let categories = categorize_events(vec![event("a", late_utc_evening)], &now);
        assert_eq!(ids(&categories.today), vec!["a"]);
    }

    #[test]
    fn test_empty_input() {
        let categories = categorize_events(Vec::new(), &Utc::now());
        assert!(categories.is_empty());
    }

    proptest! {
        #[test]
        fn prop_every_event_lands_in_exactly_one_group(
            offsets in prop::collection::vec(-5 * 86_400i64..5 * 86_400, 0..50),
            now_secs in 1_800_000_000i64..1_900_000_000,
        ) {
            let now = ist().timestamp_opt(now_secs, 0).unwrap();
            let events: Vec<Event> = offsets
                .iter()
                .enumerate()
                .map(|(i, offset)| {
                    let start = now.with_timezone(&Utc) + Duration::seconds(*offset);
                    event(&format!("{:03}", i), start)
                })
                .collect();

            let categories = categorize_events(events.clone(), &now);
            prop_assert_eq!(categories.len(), events.len());

            let mut seen = HashSet::new();
            for group in [&categories.past, &categories.today, &categories.upcoming] {
                let group_ids = ids(group);
                let mut sorted = group_ids.clone();
                sorted.sort();
                prop_assert_eq!(&group_ids, &sorted);
                for id in group_ids {
                    prop_assert!(seen.insert(id.to_string()));
                }
            }

            for e in &categories.today {
                prop_assert_eq!(e.start_time.with_timezone(&ist()).date_naive(), now.date_naive());
            }
            for e in &categories.past {
                prop_assert!(e.start_time < now);
                prop_assert_ne!(e.start_time.with_timezone(&ist()).date_naive(), now.date_naive());
            }
            for e in &categories.upcoming {
                prop_assert!(e.start_time >= now);
                prop_assert_ne!(e.start_time.with_timezone(&ist()).date_naive(), now.date_naive());
            }
        }
    }

    fn form(start_time: &str) -> EventForm {
        EventForm {
            title: "Spring Marathon".to_string(),
            event_id: "EVT-001".to_string(),
            email: "events@scout.fit".to_string(),
            description: "42k through the old town".to_string(),
            contact_number: "5550100".to_string(),
            event_link: "https://scout.fit/marathon".to_string(),
            location: "City Park".to_string(),
            price: Some(150.0),
            start_time: start_time.to_string(),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 3, 1, 12, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_create_update_delete() {
        let store = MemoryStore::new();
        let service = EventService::new(Arc::new(store.clone()));

        let created = service
            .create(form("2030-04-01T09:00:00Z"), now())
            .await
            .unwrap();
        assert!(!created.is_free);

        let mut changed = form("2030-04-02T09:00:00Z");
        changed.price = Some(0.0);
        let updated = service.update(&created.id, changed, now()).await.unwrap();
        assert!(updated.is_free);

        let doc = store.get(Collection::Events, &created.id).await.unwrap().unwrap();
        assert_eq!(doc.fields["startTime"], json!("2030-04-02T09:00:00Z"));
        assert_eq!(doc.fields["isFree"], json!(true));

        let fetched = service.get(&created.id).await.unwrap();
        assert_eq!(fetched, updated);

        service.delete(&created.id).await.unwrap();
        assert!(matches!(
            service.get(&created.id).await,
            Err(ServiceError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_update_keeps_unknown_fields() {
        let store = MemoryStore::new();
        store
            .insert(
                Collection::Events,
                "e1",
                json!({"title": "Old", "startTime": "2030-04-01T09:00:00Z", "organizerNote": "keep"})
                    .as_object()
                    .cloned()
                    .unwrap(),
            )
            .await;

        EventService::new(Arc::new(store.clone()))
            .update("e1", form("2030-05-01T09:00:00Z"), now())
            .await
            .unwrap();

        let doc = store.get(Collection::Events, "e1").await.unwrap().unwrap();
        assert_eq!(doc.fields["title"], json!("Spring Marathon"));
        assert_eq!(doc.fields["organizerNote"], json!("keep"));
    }

    #[tokio::test]
    async fn test_past_start_time_blocks_create() {
        let mut store = MockDocumentStore::new();
        store.expect_create().times(0);

        let result = EventService::new(Arc::new(store))
            .create(form("2030-02-01T09:00:00Z"), now())
            .await;

        match result {
            Err(ServiceError::Validation(errors)) => {
                assert_eq!(errors.get("startTime"), Some("Start Time cannot be in the past"));
            }
            other => panic!("expected validation failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_update_missing_event() {
        let store = MemoryStore::new();
        let result = EventService::new(Arc::new(store))
            .update("nope", form("2030-04-01T09:00:00Z"), now())
            .await;
        assert!(matches!(result, Err(ServiceError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_list_categorized_skips_events_without_start_time() {
        let store = MemoryStore::new();
        store
            .insert(
                Collection::Events,
                "ok",
                json!({"title": "Ok", "startTime": "2030-03-05T09:00:00Z"}).as_object().cloned().unwrap(),
            )
            .await;
        store
            .insert(
                Collection::Events,
                "broken",
                json!({"title": "No time"}).as_object().cloned().unwrap(),
            )
            .await;

        let categories = EventService::new(Arc::new(store))
            .list_categorized(&now())
            .await
            .unwrap();
        assert_eq!(ids(&categories.upcoming), vec!["ok"]);
        assert_eq!(categories.len(), 1);
    }
}
