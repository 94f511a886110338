use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::events::repo::Event;

#[derive(Debug, Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    pub description: Option<String>,
    pub family_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub start_time: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub end_time: OffsetDateTime,
    #[serde(default)]
    pub assignee_ids: Vec<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct EventOut {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub family_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub start_time: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub end_time: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub assignee_ids: Vec<Uuid>,
}

impl EventOut {
    pub fn from_event(event: Event, assignee_ids: Vec<Uuid>) -> Self {
        Self {
            id: event.id,
            title: event.title,
            description: event.description,
            family_id: event.family_id,
            start_time: event.start_time,
            end_time: event.end_time,
            created_at: event.created_at,
            assignee_ids,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_parses_rfc3339_times_and_defaults_assignees() {
        let json = format!(
            r#"{{"title":"Dinner","family_id":"{}",
                "start_time":"2026-09-01T18:00:00Z","end_time":"2026-09-01T20:00:00Z"}}"#,
            Uuid::new_v4()
        );
        let req: CreateEventRequest = serde_json::from_str(&json).unwrap();
        assert!(req.assignee_ids.is_empty());
        assert!(req.end_time > req.start_time);
    }
}
