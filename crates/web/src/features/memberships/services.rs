use chrono::NaiveDateTime;
use club_client::{ClubApi, Result, Snapshot};
use membership::ActiveMembership;

/// Fetch a fresh snapshot and project the active memberships at `now`
pub async fn active_memberships(
    api: &dyn ClubApi,
    now: NaiveDateTime,
) -> Result<Vec<ActiveMembership>> {
    let snapshot = Snapshot::fetch(api).await?;
    let active = snapshot.active_memberships(now);
    tracing::debug!(
        "{} of {} fees active at {}",
        active.len(),
        snapshot.fees.len(),
        now
    );

    Ok(active)
}
