//! Membership service: the only writer of `users.family_id` and
//! `families.admin_id`. Two-entity writes run in a single transaction so a
//! family can never exist without its admin being a member.

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::auth::password::{generate_temp_password, hash_password};
use crate::error::{ApiError, ApiResult};
use crate::families::repo::{self, Family};
use crate::policy;
use crate::users::repo as users;
use crate::users::repo::User;

/// A user can only be linked while they belong to no family; poaching
/// members of other families (or re-adding current ones) is rejected.
fn require_unaffiliated(user: &User) -> Result<(), ApiError> {
    if user.family_id.is_some() {
        return Err(ApiError::BadRequest(
            "User already belongs to a family".to_string(),
        ));
    }
    Ok(())
}

/// The admin cannot remove themself; with no transfer path that would
/// strand the family behind a non-member admin.
fn require_not_self_removal(target_id: Uuid, acting_id: Uuid) -> Result<(), ApiError> {
    if target_id == acting_id {
        return Err(ApiError::BadRequest(
            "The family admin cannot remove themself".to_string(),
        ));
    }
    Ok(())
}

/// Create a family with the acting user as sole member and admin.
///
/// A user already in a family is rejected outright; re-parenting would leave
/// the old family's admin pointer dangling at a non-member.
pub async fn create_family(db: &PgPool, acting: &User, name: &str) -> ApiResult<Family> {
    if acting.family_id.is_some() {
        return Err(ApiError::Conflict(
            "You already belong to a family".to_string(),
        ));
    }

    let mut tx = db.begin().await?;
    let family = repo::create(&mut *tx, name, acting.id).await?;
    users::set_family(&mut *tx, acting.id, Some(family.id)).await?;
    tx.commit().await?;

    info!(family_id = %family.id, admin_id = %acting.id, "family created");
    Ok(family)
}

pub async fn my_family(db: &PgPool, acting: &User) -> ApiResult<Family> {
    let family_id = acting
        .family_id
        .ok_or_else(|| ApiError::NotFound("You are not part of a family".to_string()))?;
    repo::find_by_id(db, family_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Family not found".to_string()))
}

/// Membership-gated roster read; no admin privilege required.
pub async fn list_members(db: &PgPool, family_id: Uuid, acting: &User) -> ApiResult<Vec<User>> {
    if acting.family_id != Some(family_id) {
        return Err(ApiError::Forbidden(
            "You can only list members of your own family".to_string(),
        ));
    }
    Ok(users::list_by_family(db, family_id).await?)
}

/// Admin-only: link an existing free user by username, or provision a new
/// account and link it.
pub async fn add_member(
    db: &PgPool,
    family_id: Uuid,
    acting: &User,
    username: &str,
    email: &str,
) -> ApiResult<User> {
    let family = repo::find_by_id(db, family_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Family not found".to_string()))?;
    policy::require_admin(&family, acting.id)?;

    let member = match users::find_by_username(db, username).await? {
        Some(existing) => link_existing(db, family_id, existing).await?,
        None => provision_and_link(db, family_id, username, email).await?,
    };

    info!(family_id = %family_id, user_id = %member.id, "member added");
    Ok(member)
}

async fn link_existing(db: &PgPool, family_id: Uuid, user: User) -> ApiResult<User> {
    require_unaffiliated(&user)?;
    users::set_family(db, user.id, Some(family_id)).await?;
    Ok(User {
        family_id: Some(family_id),
        ..user
    })
}

async fn provision_and_link(
    db: &PgPool,
    family_id: Uuid,
    username: &str,
    email: &str,
) -> ApiResult<User> {
    let temp_password = generate_temp_password();
    let hash = hash_password(&temp_password)?;

    let mut tx = db.begin().await?;
    let user = users::create(&mut *tx, username, email, &hash).await?;
    users::set_family(&mut *tx, user.id, Some(family_id)).await?;
    tx.commit().await?;

    Ok(User {
        family_id: Some(family_id),
        ..user
    })
}

/// Admin-only removal.
pub async fn remove_member(
    db: &PgPool,
    family_id: Uuid,
    user_id: Uuid,
    acting: &User,
) -> ApiResult<()> {
    let family = repo::find_by_id(db, family_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Family not found".to_string()))?;
    policy::require_admin(&family, acting.id)?;
    require_not_self_removal(user_id, acting.id)?;

    let member = users::find_in_family(db, user_id, family_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found in this family".to_string()))?;

    users::set_family(db, member.id, None).await?;
    info!(family_id = %family_id, user_id = %member.id, "member removed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;

    fn user(family_id: Option<Uuid>) -> User {
        User {
            id: Uuid::new_v4(),
            username: "bob".into(),
            email: "bob@example.com".into(),
            password_hash: "hash".into(),
            family_id,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn linking_rejects_user_already_in_a_family() {
        let err = require_unaffiliated(&user(Some(Uuid::new_v4()))).unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
        assert!(err.to_string().contains("already belongs"));
    }

    #[test]
    fn linking_accepts_user_without_family() {
        require_unaffiliated(&user(None)).unwrap();
    }

    #[test]
    fn admin_cannot_remove_themself() {
        let admin = Uuid::new_v4();
        let err = require_not_self_removal(admin, admin).unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[test]
    fn admin_can_remove_another_member() {
        require_not_self_removal(Uuid::new_v4(), Uuid::new_v4()).unwrap();
    }
}
