//! Scoping policy for family-scoped resources. Pure checks over already
//! loaded rows; every chore/event operation and the membership service gate
//! through here before touching the store.

use uuid::Uuid;

use crate::error::ApiError;
use crate::families::repo::Family;
use crate::users::repo::User;

/// The acting user must belong to a family. Returns that family's id.
pub fn require_family_member(user: &User, action: &str) -> Result<Uuid, ApiError> {
    user.family_id.ok_or_else(|| {
        ApiError::BadRequest(format!("You must be part of a family to {action}"))
    })
}

/// A caller-supplied family id must match the acting user's own family.
pub fn require_same_family(
    user: &User,
    resource_family_id: Uuid,
    resource: &str,
) -> Result<(), ApiError> {
    if user.family_id != Some(resource_family_id) {
        return Err(ApiError::Forbidden(format!(
            "You can only {resource} for your family"
        )));
    }
    Ok(())
}

/// Only the family's admin may manage its roster. An unset admin authorizes
/// nobody.
pub fn require_admin(family: &Family, user_id: Uuid) -> Result<(), ApiError> {
    match family.admin_id {
        Some(admin_id) if admin_id == user_id => Ok(()),
        _ => Err(ApiError::Forbidden(
            "Only the family admin can manage members".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;

    fn user(family_id: Option<Uuid>) -> User {
        User {
            id: Uuid::new_v4(),
            username: "alice".into(),
            email: "alice@example.com".into(),
            password_hash: "hash".into(),
            family_id,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    fn family(admin_id: Option<Uuid>) -> Family {
        Family {
            id: Uuid::new_v4(),
            name: "Smiths".into(),
            admin_id,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn member_gate_rejects_user_without_family() {
        let err = require_family_member(&user(None), "create a chore").unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
        assert!(err.to_string().contains("part of a family"));
    }

    #[test]
    fn member_gate_returns_family_id() {
        let fid = Uuid::new_v4();
        assert_eq!(
            require_family_member(&user(Some(fid)), "create a chore").unwrap(),
            fid
        );
    }

    #[test]
    fn same_family_gate_rejects_foreign_family() {
        let u = user(Some(Uuid::new_v4()));
        let err = require_same_family(&u, Uuid::new_v4(), "create chores").unwrap_err();
        assert!(matches!(err, ApiError::Forbidden(_)));
    }

    #[test]
    fn same_family_gate_rejects_user_without_family() {
        let err = require_same_family(&user(None), Uuid::new_v4(), "create chores").unwrap_err();
        assert!(matches!(err, ApiError::Forbidden(_)));
    }

    #[test]
    fn same_family_gate_accepts_own_family() {
        let fid = Uuid::new_v4();
        require_same_family(&user(Some(fid)), fid, "create chores").unwrap();
    }

    #[test]
    fn admin_gate_accepts_the_admin() {
        let admin = Uuid::new_v4();
        require_admin(&family(Some(admin)), admin).unwrap();
    }

    #[test]
    fn admin_gate_rejects_non_admin() {
        let err = require_admin(&family(Some(Uuid::new_v4())), Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, ApiError::Forbidden(_)));
    }

    #[test]
    fn unset_admin_authorizes_nobody() {
        let err = require_admin(&family(None), Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, ApiError::Forbidden(_)));
    }
}
