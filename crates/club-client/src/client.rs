use std::time::Duration;

use membership::{
    Athlete, Fee,
    dto::{
        athlete::{AthleteAttachments, AthleteForm},
        fee::FeeForm,
    },
};
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use validator::Validate;

use crate::error::{ClientError, Result};
use crate::traits::ClubApi;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const ATHLETES: &str = "athletes";
const FEES: &str = "fees";

/// HTTP client for the club backend's REST resources.
pub struct ClubClient {
    base_url: String,
    client: reqwest::Client,
}

impl ClubClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ClientError::ConfigError(format!(
                "base URL must start with http:// or https://, got '{}'",
                base_url
            )));
        }

        let client = reqwest::Client::builder()
            .user_agent(concat!("club-admin/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self, resource: &str) -> String {
        format!("{}/core/{}/", self.base_url, resource)
    }

    fn item_url(&self, resource: &str, id: i64) -> String {
        format!("{}/core/{}/{}/", self.base_url, resource, id)
    }

    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        warn!("Club API returned error {} for {}", status, body);

        Err(ClientError::StatusError { status, body })
    }

    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let response = Self::ensure_success(response).await?;
        let bytes = response.bytes().await?;

        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        Self::read_json(response).await
    }

    async fn delete(&self, url: &str) -> Result<()> {
        debug!("DELETE {}", url);
        let response = self.client.delete(url).send().await?;
        Self::ensure_success(response).await?;
        Ok(())
    }

    async fn athlete_multipart(
        form: &AthleteForm,
        attachments: &AthleteAttachments,
    ) -> Result<Form> {
        let mut multipart = Form::new();
        for (key, value) in form.fields() {
            multipart = multipart.text(key, value);
        }

        for (field, path) in attachments.files() {
            let bytes = tokio::fs::read(path)
                .await
                .map_err(|source| ClientError::AttachmentError {
                    path: path.to_path_buf(),
                    source,
                })?;
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| field.to_string());

            debug!("Attaching {} ({} bytes) as '{}'", file_name, bytes.len(), field);
            multipart = multipart.part(field, Part::bytes(bytes).file_name(file_name));
        }

        Ok(multipart)
    }
}

#[async_trait::async_trait]
impl ClubApi for ClubClient {
    async fn list_athletes(&self) -> Result<Vec<Athlete>> {
        self.get_json(&self.collection_url(ATHLETES)).await
    }

    async fn get_athlete(&self, id: i64) -> Result<Athlete> {
        self.get_json(&self.item_url(ATHLETES, id)).await
    }

    async fn create_athlete(
        &self,
        form: &AthleteForm,
        attachments: &AthleteAttachments,
    ) -> Result<Athlete> {
        form.validate()?;
        let url = self.collection_url(ATHLETES);
        let multipart = Self::athlete_multipart(form, attachments).await?;

        debug!("POST {}", url);
        let response = self.client.post(&url).multipart(multipart).send().await?;
        Self::read_json(response).await
    }

    async fn update_athlete(
        &self,
        id: i64,
        form: &AthleteForm,
        attachments: &AthleteAttachments,
    ) -> Result<Athlete> {
        form.validate()?;
        let url = self.item_url(ATHLETES, id);
        let multipart = Self::athlete_multipart(form, attachments).await?;

        debug!("PUT {}", url);
        let response = self.client.put(&url).multipart(multipart).send().await?;
        Self::read_json(response).await
    }

    async fn delete_athlete(&self, id: i64) -> Result<()> {
        self.delete(&self.item_url(ATHLETES, id)).await
    }

    async fn list_fees(&self) -> Result<Vec<Fee>> {
        self.get_json(&self.collection_url(FEES)).await
    }

    async fn create_fee(&self, form: &FeeForm) -> Result<Fee> {
        form.validate()?;
        let url = self.collection_url(FEES);

        debug!("POST {}", url);
        let response = self.client.post(&url).json(&form.payload()).send().await?;
        Self::read_json(response).await
    }

    async fn update_fee(&self, id: i64, form: &FeeForm) -> Result<Fee> {
        form.validate()?;
        let url = self.item_url(FEES, id);

        debug!("PUT {}", url);
        let response = self.client.put(&url).json(&form.payload()).send().await?;
        Self::read_json(response).await
    }

    async fn delete_fee(&self, id: i64) -> Result<()> {
        self.delete(&self.item_url(FEES, id)).await
    }
}
