use anyhow::Result;
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::models::{DietPlanDraft, Event, MealEntryForm, MealSlot};
use crate::services::DietPlanService;
use crate::store::{to_fields, Collection, Fields, MemoryStore};

/// Fills an empty in-memory store with a small, browsable data set.
pub struct DemoSeeder {
    store: MemoryStore,
}

fn object(value: Value) -> Fields {
    match value {
        Value::Object(fields) => fields,
        _ => Fields::new(),
    }
}

impl DemoSeeder {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }

    pub async fn seed_all(&self) -> Result<()> {
        if !self.store.is_empty().await {
            tracing::info!("Store already has data, skipping demo seed");
            return Ok(());
        }

        tracing::info!("Starting demo data seeding...");

        self.seed_users().await;
        self.seed_gyms().await;
        self.seed_diet_plans().await?;
        self.seed_events().await?;

        tracing::info!("Demo data seeding completed!");
        Ok(())
    }

    async fn seed_users(&self) {
        let users = [
            ("demo-user-1", json!({
                "firstName": "Asha",
                "lastName": "Rao",
                "userName": "asha_r",
                "email": "asha.rao@example.com",
                "phoneNumber": "9876543210",
                "height": 168,
                "weight": "61.5",
                "currentPackage": "Gold"
            })),
            ("demo-user-2", json!({
                "firstName": "Vikram",
                "lastName": "Mehta",
                "userName": "vik",
                "email": "vikram.mehta@example.com",
                "phoneNumber": 9123456780u64,
                "height": "180",
                "weight": 82
            })),
        ];

        for (id, fields) in users {
            self.store.insert(Collection::Users, id, object(fields)).await;
        }
        tracing::info!("Created demo users");
    }

    async fn seed_gyms(&self) {
        let gyms = [
            ("demo-gym-pending", json!({
                "gym_name": "Iron Temple",
                "address": "12 Harbour Road, Pune",
                "contact_number": "5551234",
                "email": "owner@irontemple.example.com",
                "description": "Strength focused gym with olympic platforms",
                "images": ["https://images.example.com/iron-temple.jpg"],
                "amenities": [
                    {"name": "Sauna", "isSelected": true},
                    {"name": "Pool", "isSelected": false},
                    {"name": "Parking", "isSelected": true}
                ],
                "license": "https://images.example.com/iron-temple-license.jpg",
                "isApproved": "Pending",
                "gymType": "Silver",
                "gym_type": "Not_Decided",
                "opening_hours": ["Mon-Sat 05:30-22:00", "Sun 07:00-12:00"],
                "transactions": [],
                "visitors": []
            })),
            ("demo-gym-approved", json!({
                "gym_name": "Flex Hall",
                "address": "4 Lake View, Mumbai",
                "contact_number": 5559876,
                "email": "hello@flexhall.example.com",
                "description": "Family gym with group classes",
                "images": ["https://images.example.com/flex-hall.jpg"],
                "amenities": [{"name": "Yoga Studio", "isSelected": true}],
                "isApproved": "Approved",
                "gym_type": "Diamond",
                "ratings": 4.6,
                "opening_hours": ["Daily 06:00-23:00"],
                "transactions": [
                    {
                        "requested_date": "2024-05-01",
                        "transactionMethod": "UPI",
                        "transactionStatus": "Pending",
                        "widthDrawAmount": 12500,
                        "message": "May payout"
                    },
                    {
                        "requested_date": "2024-04-01",
                        "transactionMethod": "Bank Transfer",
                        "transactionStatus": "Paid",
                        "widthDrawAmount": 11800,
                        "message": "April payout"
                    }
                ],
                "visitors": [{"userId": "demo-user-1"}, {"userId": "demo-user-2"}]
            })),
            ("demo-gym-rejected", json!({
                "gym_name": "Corner Weights",
                "address": "Unknown",
                "isApproved": "Not-Approved",
                "gym_type": "Not_Decided"
            })),
        ];

        for (id, fields) in gyms {
            self.store.insert(Collection::Gyms, id, object(fields)).await;
        }
        tracing::info!("Created demo gyms");
    }

    async fn seed_diet_plans(&self) -> Result<()> {
        let service = DietPlanService::new(Arc::new(self.store.clone()));

        let mut draft = DietPlanDraft::new();
        draft.dietary_preference = "Vegetarian".to_string();
        draft.calories = Some(1900.0);

        let meals = [
            (MealSlot::Breakfast, "Oats with berries", 350.0),
            (MealSlot::Lunch, "Paneer rice bowl", 650.0),
            (MealSlot::Dinner, "Lentil soup", 500.0),
            (MealSlot::Snacks, "Roasted chana", 180.0),
        ];
        for (slot, name, calories) in meals {
            if let Some(entry) = draft.entry_mut(slot, 0) {
                *entry = MealEntryForm {
                    name: name.to_string(),
                    image_url: format!("https://images.example.com/{}.jpg", slot),
                    calories: Some(calories),
                    carbs: "45g".to_string(),
                    fat: "12g".to_string(),
                    protein: "20g".to_string(),
                };
            }
        }

        service.create(draft).await?;
        tracing::info!("Created demo diet plan");
        Ok(())
    }

    async fn seed_events(&self) -> Result<()> {
        let now = Utc::now();
        let events = [
            ("demo-event-past", "City 10k", now - Duration::days(10), 0.0),
            ("demo-event-today", "Sunset Yoga", now + Duration::minutes(1), 0.0),
            ("demo-event-upcoming", "Powerlifting Meet", now + Duration::days(14), 499.0),
        ];

        for (id, title, start_time, price) in events {
            let event = Event {
                id: String::new(),
                title: title.to_string(),
                event_id: id.to_uppercase(),
                email: "events@fitnessscout.example.com".to_string(),
                description: format!("{} hosted by Fitness Scout", title),
                contact_number: "5550100".to_string(),
                event_link: "https://events.example.com".to_string(),
                location: "Community Park".to_string(),
                price,
                is_free: price <= 0.0,
                start_time,
            };
            self.store
                .insert(Collection::Events, id, to_fields(&event)?)
                .await;
        }

        tracing::info!("Created demo events");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seed_fills_every_collection_once() {
        let store = MemoryStore::new();
        let seeder = DemoSeeder::new(store.clone());

        seeder.seed_all().await.unwrap();
        assert_eq!(store.len(Collection::Users).await, 2);
        assert_eq!(store.len(Collection::Gyms).await, 3);
        assert_eq!(store.len(Collection::DietPlans).await, 1);
        assert_eq!(store.len(Collection::Events).await, 3);

        seeder.seed_all().await.unwrap();
        assert_eq!(store.len(Collection::Gyms).await, 3);
    }
}
