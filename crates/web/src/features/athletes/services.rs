use club_client::{ClubApi, Result};
use membership::{
    Athlete,
    dto::athlete::{AthleteAttachments, AthleteForm},
};

/// List all athletes
pub async fn list_athletes(api: &dyn ClubApi) -> Result<Vec<Athlete>> {
    api.list_athletes().await
}

/// Get athlete by id
pub async fn get_athlete(api: &dyn ClubApi, id: i64) -> Result<Athlete> {
    api.get_athlete(id).await
}

/// Create a new athlete. Files are uploaded through the CLI only.
pub async fn create_athlete(api: &dyn ClubApi, form: &AthleteForm) -> Result<Athlete> {
    let athlete = api
        .create_athlete(form, &AthleteAttachments::default())
        .await?;
    tracing::info!("Created athlete {}", athlete.id);
    Ok(athlete)
}

/// Update an athlete
pub async fn update_athlete(api: &dyn ClubApi, id: i64, form: &AthleteForm) -> Result<Athlete> {
    api.update_athlete(id, form, &AthleteAttachments::default())
        .await
}

/// Delete an athlete
pub async fn delete_athlete(api: &dyn ClubApi, id: i64) -> Result<()> {
    api.delete_athlete(id).await?;
    tracing::info!("Deleted athlete {}", id);
    Ok(())
}
