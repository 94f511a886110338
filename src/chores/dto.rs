use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::chores::repo::Chore;

#[derive(Debug, Deserialize)]
pub struct CreateChoreRequest {
    pub title: String,
    pub description: Option<String>,
    pub family_id: Uuid,
    pub assigned_to_id: Uuid,
}

/// PUT payload: full replace, status included. Partial updates are not
/// supported; toggling completion re-sends the whole record.
#[derive(Debug, Deserialize)]
pub struct UpdateChoreRequest {
    pub title: String,
    pub description: Option<String>,
    pub family_id: Uuid,
    pub assigned_to_id: Uuid,
    #[serde(default)]
    pub status: bool,
}

#[derive(Debug, Serialize)]
pub struct ChoreOut {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub family_id: Uuid,
    pub assigned_to_id: Uuid,
    pub status: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<Chore> for ChoreOut {
    fn from(c: Chore) -> Self {
        Self {
            id: c.id,
            title: c.title,
            description: c.description,
            family_id: c.family_id,
            assigned_to_id: c.assigned_to_id,
            status: c.status,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_request_defaults_status_to_pending() {
        let json = format!(
            r#"{{"title":"Dishes","family_id":"{}","assigned_to_id":"{}"}}"#,
            Uuid::new_v4(),
            Uuid::new_v4()
        );
        let req: UpdateChoreRequest = serde_json::from_str(&json).unwrap();
        assert!(!req.status);
        assert!(req.description.is_none());
    }

    #[test]
    fn chore_timestamps_serialize_as_rfc3339() {
        let out = ChoreOut {
            id: Uuid::new_v4(),
            title: "Dishes".into(),
            description: None,
            family_id: Uuid::new_v4(),
            assigned_to_id: Uuid::new_v4(),
            status: false,
            created_at: time::macros::datetime!(2026-08-30 12:00:00 UTC),
            updated_at: time::macros::datetime!(2026-08-30 12:30:00 UTC),
        };
        let json = serde_json::to_string(&out).unwrap();
        assert!(json.contains("\"created_at\":\"2026-08-30T12:00:00Z\""));
        assert!(json.contains("\"updated_at\":\"2026-08-30T12:30:00Z\""));
    }
}
