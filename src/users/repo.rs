use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgExecutor};
use time::OffsetDateTime;
use uuid::Uuid;

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub family_id: Option<Uuid>,
    pub created_at: OffsetDateTime,
}

pub async fn find_by_id(ex: impl PgExecutor<'_>, id: Uuid) -> anyhow::Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, email, password_hash, family_id, created_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(ex)
    .await?;
    Ok(user)
}

pub async fn find_by_username(
    ex: impl PgExecutor<'_>,
    username: &str,
) -> anyhow::Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, email, password_hash, family_id, created_at
        FROM users
        WHERE username = $1
        "#,
    )
    .bind(username)
    .fetch_optional(ex)
    .await?;
    Ok(user)
}

pub async fn find_by_email(ex: impl PgExecutor<'_>, email: &str) -> anyhow::Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, email, password_hash, family_id, created_at
        FROM users
        WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(ex)
    .await?;
    Ok(user)
}

/// Member of the given family with the given id, if any. Scoped lookup, so a
/// missing row is indistinguishable from another family's member.
pub async fn find_in_family(
    ex: impl PgExecutor<'_>,
    id: Uuid,
    family_id: Uuid,
) -> anyhow::Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, email, password_hash, family_id, created_at
        FROM users
        WHERE id = $1 AND family_id = $2
        "#,
    )
    .bind(id)
    .bind(family_id)
    .fetch_optional(ex)
    .await?;
    Ok(user)
}

/// Roster of a family, in insertion order.
pub async fn list_by_family(ex: impl PgExecutor<'_>, family_id: Uuid) -> anyhow::Result<Vec<User>> {
    let rows = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, email, password_hash, family_id, created_at
        FROM users
        WHERE family_id = $1
        ORDER BY created_at ASC
        "#,
    )
    .bind(family_id)
    .fetch_all(ex)
    .await?;
    Ok(rows)
}

pub async fn create(
    ex: impl PgExecutor<'_>,
    username: &str,
    email: &str,
    password_hash: &str,
) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (username, email, password_hash)
        VALUES ($1, $2, $3)
        RETURNING id, username, email, password_hash, family_id, created_at
        "#,
    )
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .fetch_one(ex)
    .await
}

/// Point a user at a family, or detach with `None`. The membership service is
/// the only caller; it wraps this in the same transaction as its other writes.
pub async fn set_family(
    ex: impl PgExecutor<'_>,
    user_id: Uuid,
    family_id: Option<Uuid>,
) -> anyhow::Result<()> {
    sqlx::query("UPDATE users SET family_id = $2 WHERE id = $1")
        .bind(user_id)
        .bind(family_id)
        .execute(ex)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_is_not_serialized() {
        let user = User {
            id: Uuid::new_v4(),
            username: "alice".into(),
            email: "alice@example.com".into(),
            password_hash: "$argon2id$secret".into(),
            family_id: None,
            created_at: OffsetDateTime::now_utc(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("argon2"));
        assert!(json.contains("alice@example.com"));
    }
}
