use membership::{
    Athlete, Fee,
    dto::{
        athlete::{AthleteAttachments, AthleteForm},
        fee::FeeForm,
    },
};

use crate::Result;

/// The club backend's `athletes` and `fees` resources.
#[async_trait::async_trait]
pub trait ClubApi: Send + Sync {
    async fn list_athletes(&self) -> Result<Vec<Athlete>>;

    async fn get_athlete(&self, id: i64) -> Result<Athlete>;

    async fn create_athlete(
        &self,
        form: &AthleteForm,
        attachments: &AthleteAttachments,
    ) -> Result<Athlete>;

    async fn update_athlete(
        &self,
        id: i64,
        form: &AthleteForm,
        attachments: &AthleteAttachments,
    ) -> Result<Athlete>;

    async fn delete_athlete(&self, id: i64) -> Result<()>;

    async fn list_fees(&self) -> Result<Vec<Fee>>;

    async fn create_fee(&self, form: &FeeForm) -> Result<Fee>;

    async fn update_fee(&self, id: i64, form: &FeeForm) -> Result<Fee>;

    async fn delete_fee(&self, id: i64) -> Result<()>;
}
