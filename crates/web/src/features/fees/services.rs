use club_client::{ClubApi, Result, Snapshot};
use membership::{
    Fee,
    dto::fee::{FeeForm, FeeWithAthlete},
};

/// List all fees with the name of the athlete they belong to
pub async fn list_fees(api: &dyn ClubApi) -> Result<Vec<FeeWithAthlete>> {
    let snapshot = Snapshot::fetch(api).await?;
    Ok(snapshot.fee_listing())
}

/// Create a new fee. The remainder is derived from the form.
pub async fn create_fee(api: &dyn ClubApi, form: &FeeForm) -> Result<Fee> {
    if form.taken > form.fee {
        tracing::warn!(
            "Fee for athlete {} records {} taken out of {}",
            form.athlete,
            form.taken,
            form.fee
        );
    }

    let fee = api.create_fee(form).await?;
    tracing::info!("Created fee {} for athlete {}", fee.id, form.athlete);
    Ok(fee)
}

/// Update a fee
pub async fn update_fee(api: &dyn ClubApi, id: i64, form: &FeeForm) -> Result<Fee> {
    api.update_fee(id, form).await
}

/// Delete a fee
pub async fn delete_fee(api: &dyn ClubApi, id: i64) -> Result<()> {
    api.delete_fee(id).await?;
    tracing::info!("Deleted fee {}", id);
    Ok(())
}
