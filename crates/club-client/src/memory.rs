//! In-memory stand-in for the club backend, used by tests.

use std::sync::{Mutex, MutexGuard};

use membership::{
    Athlete, Fee,
    dto::{
        athlete::{AthleteAttachments, AthleteForm},
        fee::FeeForm,
    },
};
use reqwest::StatusCode;
use validator::Validate;

use crate::error::{ClientError, Result};
use crate::traits::ClubApi;

#[derive(Default)]
struct State {
    athletes: Vec<Athlete>,
    fees: Vec<Fee>,
    next_id: i64,
}

#[derive(Default)]
pub struct InMemoryClub {
    state: Mutex<State>,
    fail_fees: bool,
}

impl InMemoryClub {
    pub fn new(athletes: Vec<Athlete>, fees: Vec<Fee>) -> Self {
        let next_id = athletes
            .iter()
            .map(|a| a.id)
            .chain(fees.iter().map(|f| f.id))
            .max()
            .unwrap_or(0)
            + 1;

        Self {
            state: Mutex::new(State {
                athletes,
                fees,
                next_id,
            }),
            fail_fees: false,
        }
    }

    /// Makes every fee listing fail with a 503.
    pub fn with_failing_fees(mut self) -> Self {
        self.fail_fees = true;
        self
    }

    pub fn athletes(&self) -> Vec<Athlete> {
        self.lock().athletes.clone()
    }

    pub fn fees(&self) -> Vec<Fee> {
        self.lock().fees.clone()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn not_found() -> ClientError {
        ClientError::StatusError {
            status: StatusCode::NOT_FOUND,
            body: r#"{"detail":"Not found."}"#.to_string(),
        }
    }

    fn athlete_from_form(id: i64, form: &AthleteForm) -> Athlete {
        Athlete {
            id,
            name: form.name.clone(),
            last_name: form.last_name.clone(),
            father_name: form.father_name.clone(),
            current_location: form.current_location.clone(),
            permanent_location: form.permanent_location.clone(),
            date_of_birth: form.date_of_birth.map(|d| d.to_string()),
            picture: None,
            nic: None,
            document: None,
        }
    }

    fn fee_from_form(id: i64, form: &FeeForm) -> Fee {
        let payload = form.payload();
        Fee {
            id,
            athlete: Some(payload.athlete),
            starting_date: Some(payload.starting_date.to_string()),
            fee: payload.fee,
            taken: payload.taken,
            remainder: payload.remainder,
        }
    }
}

#[async_trait::async_trait]
impl ClubApi for InMemoryClub {
    async fn list_athletes(&self) -> Result<Vec<Athlete>> {
        Ok(self.athletes())
    }

    async fn get_athlete(&self, id: i64) -> Result<Athlete> {
        self.lock()
            .athletes
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(Self::not_found)
    }

    async fn create_athlete(
        &self,
        form: &AthleteForm,
        _attachments: &AthleteAttachments,
    ) -> Result<Athlete> {
        form.validate()?;
        let mut state = self.lock();
        let athlete = Self::athlete_from_form(state.next_id, form);
        state.next_id += 1;
        state.athletes.push(athlete.clone());
        Ok(athlete)
    }

    async fn update_athlete(
        &self,
        id: i64,
        form: &AthleteForm,
        _attachments: &AthleteAttachments,
    ) -> Result<Athlete> {
        form.validate()?;
        let mut state = self.lock();
        let slot = state
            .athletes
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(Self::not_found)?;
        *slot = Self::athlete_from_form(id, form);
        Ok(slot.clone())
    }

    async fn delete_athlete(&self, id: i64) -> Result<()> {
        let mut state = self.lock();
        let before = state.athletes.len();
        state.athletes.retain(|a| a.id != id);
        if state.athletes.len() == before {
            return Err(Self::not_found());
        }
        Ok(())
    }

    async fn list_fees(&self) -> Result<Vec<Fee>> {
        if self.fail_fees {
            return Err(ClientError::StatusError {
                status: StatusCode::SERVICE_UNAVAILABLE,
                body: "fees unavailable".to_string(),
            });
        }
        Ok(self.fees())
    }

    async fn create_fee(&self, form: &FeeForm) -> Result<Fee> {
        form.validate()?;
        let mut state = self.lock();
        let fee = Self::fee_from_form(state.next_id, form);
        state.next_id += 1;
        state.fees.push(fee.clone());
        Ok(fee)
    }

    async fn update_fee(&self, id: i64, form: &FeeForm) -> Result<Fee> {
        form.validate()?;
        let mut state = self.lock();
        let slot = state
            .fees
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(Self::not_found)?;
        *slot = Self::fee_from_form(id, form);
        Ok(slot.clone())
    }

    async fn delete_fee(&self, id: i64) -> Result<()> {
        let mut state = self.lock();
        let before = state.fees.len();
        state.fees.retain(|f| f.id != id);
        if state.fees.len() == before {
            return Err(Self::not_found());
        }
        Ok(())
    }
}
