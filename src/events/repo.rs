use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgExecutor};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub family_id: Uuid,
    pub start_time: OffsetDateTime,
    pub end_time: OffsetDateTime,
    pub created_at: OffsetDateTime,
}

pub async fn create(
    ex: impl PgExecutor<'_>,
    title: &str,
    description: Option<&str>,
    family_id: Uuid,
    start_time: OffsetDateTime,
    end_time: OffsetDateTime,
) -> anyhow::Result<Event> {
    let event = sqlx::query_as::<_, Event>(
        r#"
        INSERT INTO events (title, description, family_id, start_time, end_time)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, title, description, family_id, start_time, end_time, created_at
        "#,
    )
    .bind(title)
    .bind(description)
    .bind(family_id)
    .bind(start_time)
    .bind(end_time)
    .fetch_one(ex)
    .await?;
    Ok(event)
}

pub async fn link_assignee(
    ex: impl PgExecutor<'_>,
    event_id: Uuid,
    user_id: Uuid,
) -> anyhow::Result<()> {
    sqlx::query("INSERT INTO event_assignees (event_id, user_id) VALUES ($1, $2)")
        .bind(event_id)
        .bind(user_id)
        .execute(ex)
        .await?;
    Ok(())
}

pub async fn list_by_family(
    ex: impl PgExecutor<'_>,
    family_id: Uuid,
) -> anyhow::Result<Vec<Event>> {
    let rows = sqlx::query_as::<_, Event>(
        r#"
        SELECT id, title, description, family_id, start_time, end_time, created_at
        FROM events
        WHERE family_id = $1
        ORDER BY start_time ASC
        "#,
    )
    .bind(family_id)
    .fetch_all(ex)
    .await?;
    Ok(rows)
}

#[derive(Debug, FromRow)]
struct AssigneeRow {
    event_id: Uuid,
    user_id: Uuid,
}

/// Assignee ids for all of a family's events, grouped by event. Events with
/// no assignees simply have no entry.
pub async fn assignees_by_family(
    ex: impl PgExecutor<'_>,
    family_id: Uuid,
) -> anyhow::Result<HashMap<Uuid, Vec<Uuid>>> {
    let rows = sqlx::query_as::<_, AssigneeRow>(
        r#"
        SELECT ea.event_id, ea.user_id
        FROM event_assignees ea
        JOIN events e ON e.id = ea.event_id
        WHERE e.family_id = $1
        "#,
    )
    .bind(family_id)
    .fetch_all(ex)
    .await?;

    let mut by_event: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
    for row in rows {
        by_event.entry(row.event_id).or_default().push(row.user_id);
    }
    Ok(by_event)
}

/// Scoped delete; assignee links go with the event via ON DELETE CASCADE.
pub async fn delete_scoped(
    ex: impl PgExecutor<'_>,
    id: Uuid,
    family_id: Uuid,
) -> anyhow::Result<bool> {
    let result = sqlx::query("DELETE FROM events WHERE id = $1 AND family_id = $2")
        .bind(id)
        .bind(family_id)
        .execute(ex)
        .await?;
    Ok(result.rows_affected() > 0)
}
