use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgExecutor};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Chore {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub family_id: Uuid,
    pub assigned_to_id: Uuid,
    pub status: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

pub async fn create(
    ex: impl PgExecutor<'_>,
    title: &str,
    description: Option<&str>,
    family_id: Uuid,
    assigned_to_id: Uuid,
) -> anyhow::Result<Chore> {
    let chore = sqlx::query_as::<_, Chore>(
        r#"
        INSERT INTO chores (title, description, family_id, assigned_to_id)
        VALUES ($1, $2, $3, $4)
        RETURNING id, title, description, family_id, assigned_to_id, status, created_at, updated_at
        "#,
    )
    .bind(title)
    .bind(description)
    .bind(family_id)
    .bind(assigned_to_id)
    .fetch_one(ex)
    .await?;
    Ok(chore)
}

pub async fn list_by_family(
    ex: impl PgExecutor<'_>,
    family_id: Uuid,
) -> anyhow::Result<Vec<Chore>> {
    let rows = sqlx::query_as::<_, Chore>(
        r#"
        SELECT id, title, description, family_id, assigned_to_id, status, created_at, updated_at
        FROM chores
        WHERE family_id = $1
        ORDER BY created_at ASC
        "#,
    )
    .bind(family_id)
    .fetch_all(ex)
    .await?;
    Ok(rows)
}

/// Wholesale replace of all mutable fields, scoped to the caller's family.
/// `None` means the chore does not exist in that family's scope.
#[allow(clippy::too_many_arguments)]
pub async fn update_scoped(
    ex: impl PgExecutor<'_>,
    id: Uuid,
    scope_family_id: Uuid,
    title: &str,
    description: Option<&str>,
    family_id: Uuid,
    assigned_to_id: Uuid,
    status: bool,
) -> anyhow::Result<Option<Chore>> {
    let chore = sqlx::query_as::<_, Chore>(
        r#"
        UPDATE chores
        SET title = $3, description = $4, family_id = $5, assigned_to_id = $6,
            status = $7, updated_at = now()
        WHERE id = $1 AND family_id = $2
        RETURNING id, title, description, family_id, assigned_to_id, status, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(scope_family_id)
    .bind(title)
    .bind(description)
    .bind(family_id)
    .bind(assigned_to_id)
    .bind(status)
    .fetch_optional(ex)
    .await?;
    Ok(chore)
}

/// Scoped delete; returns whether a row was removed.
pub async fn delete_scoped(
    ex: impl PgExecutor<'_>,
    id: Uuid,
    family_id: Uuid,
) -> anyhow::Result<bool> {
    let result = sqlx::query("DELETE FROM chores WHERE id = $1 AND family_id = $2")
        .bind(id)
        .bind(family_id)
        .execute(ex)
        .await?;
    Ok(result.rows_affected() > 0)
}
