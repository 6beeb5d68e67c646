use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{Event, Fight, Fighter};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EventResponse {
    pub event_id: Uuid,
    pub name: String,
    pub location: String,
    pub venue: String,
    pub date: NaiveDate,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Event with its fight card and participating fighters
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EventDetailResponse {
    #[serde(flatten)]
    pub event: EventResponse,
    pub fights: Vec<Fight>,
    pub fighters: Vec<Fighter>,
}

/// Request payload for creating a new event
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateEventRequest {
    #[validate(length(
        min = 2,
        max = 100,
        message = "Name must be between 2 and 100 characters"
    ))]
    pub name: String,

    #[validate(length(min = 1, max = 255, message = "Location is required"))]
    pub location: String,

    #[validate(length(min = 1, max = 255, message = "Venue is required"))]
    pub venue: String,

    pub date: NaiveDate,

    /// Fighters taking part in the event
    pub fighter_ids: Option<Vec<Uuid>>,

    /// Already recorded fights to move onto this event's card
    pub fight_ids: Option<Vec<Uuid>>,
}

/// Request payload for updating an existing event
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateEventRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 255))]
    pub location: Option<String>,

    #[validate(length(min = 1, max = 255))]
    pub venue: Option<String>,

    pub date: Option<NaiveDate>,

    /// Replaces the participating fighters when present
    pub fighter_ids: Option<Vec<Uuid>>,

    pub fight_ids: Option<Vec<Uuid>>,
}

impl From<Event> for EventResponse {
    fn from(event: Event) -> Self {
        Self {
            event_id: event.event_id,
            name: event.name,
            location: event.location,
            venue: event.venue,
            date: event.date,
            created_at: event.created_at,
            updated_at: event.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_event_parses_optional_relations() {
        let req: CreateEventRequest = serde_json::from_str(
            r#"{
                "name": "Fight Night 12",
                "location": "Las Vegas, NV",
                "venue": "Apex",
                "date": "2026-11-14"
            }"#,
        )
        .unwrap();

        assert!(req.validate().is_ok());
        assert!(req.fighter_ids.is_none());
        assert!(req.fight_ids.is_none());
    }

    #[test]
    fn test_create_event_requires_venue() {
        let req = CreateEventRequest {
            name: "Fight Night 12".to_string(),
            location: "Las Vegas, NV".to_string(),
            venue: String::new(),
            date: NaiveDate::from_ymd_opt(2026, 11, 14).unwrap(),
            fighter_ids: None,
            fight_ids: None,
        };

        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("venue"));
    }

    #[test]
    fn test_update_rejects_one_letter_name() {
        let req = UpdateEventRequest {
            name: Some("X".to_string()),
            ..Default::default()
        };
        assert!(req.validate().is_err());
    }
}
