use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgExecutor};
use time::OffsetDateTime;
use uuid::Uuid;

/// Family record. `admin_id`, when set, must point at a user whose
/// `family_id` is this family; the membership service maintains that.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Family {
    pub id: Uuid,
    pub name: String,
    pub admin_id: Option<Uuid>,
    pub created_at: OffsetDateTime,
}

pub async fn find_by_id(ex: impl PgExecutor<'_>, id: Uuid) -> anyhow::Result<Option<Family>> {
    let family = sqlx::query_as::<_, Family>(
        r#"
        SELECT id, name, admin_id, created_at
        FROM families
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(ex)
    .await?;
    Ok(family)
}

pub async fn create(
    ex: impl PgExecutor<'_>,
    name: &str,
    admin_id: Uuid,
) -> anyhow::Result<Family> {
    let family = sqlx::query_as::<_, Family>(
        r#"
        INSERT INTO families (name, admin_id)
        VALUES ($1, $2)
        RETURNING id, name, admin_id, created_at
        "#,
    )
    .bind(name)
    .bind(admin_id)
    .fetch_one(ex)
    .await?;
    Ok(family)
}
