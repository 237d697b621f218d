use chrono::NaiveDateTime;
use membership::{
    ActiveMembership, Athlete, AthleteDirectory, Fee, dto::fee::FeeWithAthlete,
    project_active_memberships,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{ClubApi, Result};

/// Both collections, fetched together so projections see one consistent refresh.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub fees: Vec<Fee>,
    pub athletes: Vec<Athlete>,
}

impl Snapshot {
    /// Requests fees and athletes concurrently. Fails as soon as either request
    /// fails; dropping the future abandons the one still in flight.
    pub async fn fetch(api: &dyn ClubApi) -> Result<Self> {
        let (fees, athletes) = tokio::try_join!(api.list_fees(), api.list_athletes())?;
        debug!(
            "Fetched snapshot with {} fees and {} athletes",
            fees.len(),
            athletes.len()
        );

        Ok(Self { fees, athletes })
    }

    pub fn active_memberships(&self, now: NaiveDateTime) -> Vec<ActiveMembership> {
        project_active_memberships(&self.fees, &self.athletes, now)
    }

    pub fn fee_listing(&self) -> Vec<FeeWithAthlete> {
        FeeWithAthlete::list(&self.fees, &AthleteDirectory::new(&self.athletes))
    }
}
