use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Athlete;

/// A fee whose membership window is in the active range, joined with its athlete.
///
/// Built fresh on every projection and never written back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ActiveMembership {
    pub id: i64,
    pub athlete_id: Option<i64>,
    /// `None` when no athlete with `athlete_id` exists in the snapshot
    pub athlete: Option<Athlete>,
    pub starting_date: NaiveDate,
    pub expires_on: NaiveDate,
    pub fee: Decimal,
    pub taken: Decimal,
    pub remainder: Decimal,
    pub remaining_days: u32,
}

impl ActiveMembership {
    pub fn is_expired(&self) -> bool {
        self.remaining_days == 0
    }
}
