use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::lenient;
use super::validation::{require, require_email, require_non_negative, require_url, FormErrors};
use super::Record;
use crate::store::Collection;

const LOCAL_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

/// Parse an RFC 3339 instant or a `datetime-local` value in the local zone.
pub fn parse_start_time(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Some(instant.with_timezone(&Utc));
    }

    LOCAL_FORMATS.iter().find_map(|format| {
        let naive = NaiveDateTime::parse_from_str(value, format).ok()?;
        Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|local| local.with_timezone(&Utc))
    })
}

fn deserialize_start_time<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_start_time(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid startTime: {:?}", raw)))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: String,
    #[serde(rename = "eventId", default, deserialize_with = "lenient::string")]
    pub event_id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub email: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: String,
    #[serde(rename = "contactNumber", default, deserialize_with = "lenient::string")]
    pub contact_number: String,
    #[serde(rename = "eventLink", default, deserialize_with = "lenient::string")]
    pub event_link: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub location: String,
    #[serde(default, deserialize_with = "lenient::f64")]
    pub price: f64,
    #[serde(rename = "isFree", default)]
    pub is_free: bool,
    #[serde(rename = "startTime", deserialize_with = "deserialize_start_time")]
    pub start_time: DateTime<Utc>,
}

impl Event {
    pub fn price_label(&self) -> String {
        if self.is_free {
            "Free".to_string()
        } else {
            format!("{} Rs", self.price)
        }
    }
}

impl Record for Event {
    const COLLECTION: Collection = Collection::Events;

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

/// Events split by start time relative to "now".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventCategories {
    pub past: Vec<Event>,
    pub today: Vec<Event>,
    pub upcoming: Vec<Event>,
}

impl EventCategories {
    pub fn len(&self) -> usize {
        self.past.len() + self.today.len() + self.upcoming.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_events(self) -> Vec<Event> {
        let mut events = self.past;
        events.extend(self.today);
        events.extend(self.upcoming);
        events
    }
}

/// Create/update form for an event. Every field is kept as entered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventForm {
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: String,
    #[serde(rename = "eventId", default, deserialize_with = "lenient::string")]
    pub event_id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub email: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: String,
    #[serde(rename = "contactNumber", default, deserialize_with = "lenient::string")]
    pub contact_number: String,
    #[serde(rename = "eventLink", default, deserialize_with = "lenient::string")]
    pub event_link: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub location: String,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub price: Option<f64>,
    #[serde(rename = "startTime", default, deserialize_with = "lenient::string")]
    pub start_time: String,
}

impl EventForm {
    /// Check the form against `now` and build the event to store.
    pub fn validate(&self, now: DateTime<Utc>) -> Result<Event, FormErrors> {
        let mut errors = FormErrors::new();

        require(&mut errors, "title", &self.title, "Title is required");
        require(&mut errors, "eventId", &self.event_id, "Event ID is required");
        require_email(&mut errors, "email", &self.email, "Email is required", "Invalid email");
        require(&mut errors, "description", &self.description, "Description is required");
        require(
            &mut errors,
            "contactNumber",
            &self.contact_number,
            "Contact Number is required",
        );
        require_url(
            &mut errors,
            "eventLink",
            &self.event_link,
            "Event Link is required",
            "Invalid URL",
        );
        require(&mut errors, "location", &self.location, "Location is required");
        let price = require_non_negative(
            &mut errors,
            "price",
            self.price,
            "Price is required",
            "Price must be at least 0",
        );

        let start_time = if require(&mut errors, "startTime", &self.start_time, "Start Time is required") {
            match parse_start_time(&self.start_time) {
                Some(start) if start < now => {
                    errors.add("startTime", "Start Time cannot be in the past");
                    None
                }
                Some(start) => Some(start),
                None => {
                    errors.add("startTime", "Invalid date");
                    None
                }
            }
        } else {
            None
        };

        match (price, start_time) {
            (Some(price), Some(start_time)) if errors.is_empty() => Ok(Event {
                id: String::new(),
                title: self.title.trim().to_string(),
                event_id: self.event_id.trim().to_string(),
                email: self.email.trim().to_string(),
                description: self.description.trim().to_string(),
                contact_number: self.contact_number.trim().to_string(),
                event_link: self.event_link.trim().to_string(),
                location: self.location.trim().to_string(),
                price,
                is_free: price <= 0.0,
                start_time,
            }),
            _ => Err(errors),
        }
    }
}

impl From<&Event> for EventForm {
    fn from(event: &Event) -> Self {
        Self {
            title: event.title.clone(),
            event_id: event.event_id.clone(),
            email: event.email.clone(),
            description: event.description.clone(),
            contact_number: event.contact_number.clone(),
            event_link: event.event_link.clone(),
            location: event.location.clone(),
            price: Some(event.price),
            start_time: event.start_time.to_rfc3339(),
        }
    }
}
