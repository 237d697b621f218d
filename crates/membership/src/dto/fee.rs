use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::{AthleteDirectory, Fee};

/// Request payload for creating or updating a fee
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct FeeForm {
    pub athlete: i64,

    #[validate(custom(function = "validate_non_negative"))]
    pub fee: Decimal,

    #[serde(default)]
    #[validate(custom(function = "validate_non_negative"))]
    pub taken: Decimal,

    pub starting_date: NaiveDate,
}

/// Body sent to the backend. `remainder` is fixed at write time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeePayload {
    pub athlete: i64,
    pub fee: Decimal,
    pub taken: Decimal,
    pub remainder: Decimal,
    pub starting_date: NaiveDate,
}

impl FeeForm {
    pub fn remainder(&self) -> Decimal {
        self.fee - self.taken
    }

    pub fn payload(&self) -> FeePayload {
        FeePayload {
            athlete: self.athlete,
            fee: self.fee,
            taken: self.taken,
            remainder: self.remainder(),
            starting_date: self.starting_date,
        }
    }
}

fn validate_non_negative(value: &Decimal) -> Result<(), validator::ValidationError> {
    if *value < Decimal::ZERO {
        let mut error = validator::ValidationError::new("negative_amount");
        error.message = Some("Amount must not be negative".into());
        Err(error)
    } else {
        Ok(())
    }
}

/// Fee row joined with the display name of its athlete
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FeeWithAthlete {
    #[serde(flatten)]
    pub fee: Fee,
    /// `None` when the athlete no longer exists
    pub athlete_name: Option<String>,
}

impl FeeWithAthlete {
    pub fn list(fees: &[Fee], directory: &AthleteDirectory<'_>) -> Vec<Self> {
        fees.iter()
            .map(|fee| Self {
                fee: fee.clone(),
                athlete_name: fee
                    .athlete
                    .and_then(|id| directory.get(id))
                    .map(|a| a.full_name()),
            })
            .collect()
    }
}
