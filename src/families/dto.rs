use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::families::repo::Family;
use crate::users::repo::User;

#[derive(Debug, Deserialize)]
pub struct CreateFamilyRequest {
    pub name: String,
}

/// Add-member payload: one entry point for both linking an existing user and
/// provisioning a new one. Which path runs is decided by username lookup.
#[derive(Debug, Deserialize)]
pub struct AddMemberRequest {
    pub username: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct FamilyOut {
    pub id: Uuid,
    pub name: String,
    pub admin_id: Option<Uuid>,
}

impl From<Family> for FamilyOut {
    fn from(f: Family) -> Self {
        Self {
            id: f.id,
            name: f.name,
            admin_id: f.admin_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MemberOut {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub family_id: Option<Uuid>,
}

impl From<User> for MemberOut {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            email: u.email,
            family_id: u.family_id,
        }
    }
}
