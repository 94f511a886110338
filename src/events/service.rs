use std::collections::HashSet;

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::events::repo::{self, Event};
use crate::users::repo as users;

/// Requested assignee ids that are not in the family roster.
fn invalid_assignees(requested: &[Uuid], roster: &HashSet<Uuid>) -> Vec<Uuid> {
    requested
        .iter()
        .filter(|id| !roster.contains(id))
        .copied()
        .collect()
}

/// First-occurrence-order dedupe; a repeated id must not trip the composite
/// primary key on the link table.
fn dedupe_assignees(ids: &[Uuid]) -> Vec<Uuid> {
    let mut seen = HashSet::new();
    ids.iter().filter(|id| seen.insert(**id)).copied().collect()
}

/// Create an event and its assignee links as one atomic write. Every
/// assignee must be a current member of the family; otherwise nothing is
/// written and the invalid ids are reported back. Returns the event together
/// with the assignee ids actually linked.
#[allow(clippy::too_many_arguments)]
pub async fn create_event(
    db: &PgPool,
    family_id: Uuid,
    title: &str,
    description: Option<&str>,
    start_time: time::OffsetDateTime,
    end_time: time::OffsetDateTime,
    assignee_ids: &[Uuid],
) -> ApiResult<(Event, Vec<Uuid>)> {
    let roster: HashSet<Uuid> = users::list_by_family(db, family_id)
        .await?
        .into_iter()
        .map(|u| u.id)
        .collect();

    let invalid = invalid_assignees(assignee_ids, &roster);
    if !invalid.is_empty() {
        return Err(ApiError::BadRequest(format!(
            "Invalid assignee ids: {invalid:?}. They must be family members"
        )));
    }

    let unique = dedupe_assignees(assignee_ids);

    let mut tx = db.begin().await?;
    let event = repo::create(&mut *tx, title, description, family_id, start_time, end_time).await?;
    for user_id in &unique {
        repo::link_assignee(&mut *tx, event.id, *user_id).await?;
    }
    tx.commit().await?;

    info!(event_id = %event.id, family_id = %family_id, "event created");
    Ok((event, unique))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_roster_members_are_valid() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let roster: HashSet<Uuid> = [a, b].into_iter().collect();
        assert!(invalid_assignees(&[a, b], &roster).is_empty());
    }

    #[test]
    fn non_members_are_reported() {
        let member = Uuid::new_v4();
        let stranger = Uuid::new_v4();
        let roster: HashSet<Uuid> = [member].into_iter().collect();
        assert_eq!(invalid_assignees(&[member, stranger], &roster), vec![stranger]);
    }

    #[test]
    fn empty_assignee_list_is_valid() {
        let roster: HashSet<Uuid> = HashSet::new();
        assert!(invalid_assignees(&[], &roster).is_empty());
    }

    #[test]
    fn dedupe_drops_repeats_and_keeps_order() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        assert_eq!(dedupe_assignees(&[a, b, a, b, a]), vec![a, b]);
    }
}
