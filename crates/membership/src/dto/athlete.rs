use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::{Athlete, calendar::parse_calendar_date};

/// Request payload for creating or updating an athlete
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct AthleteForm {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Name must be between 1 and 255 characters"
    ))]
    pub name: String,

    #[validate(length(
        min = 1,
        max = 255,
        message = "Last name must be between 1 and 255 characters"
    ))]
    pub last_name: String,

    #[validate(length(max = 255))]
    pub father_name: Option<String>,

    #[validate(length(max = 255))]
    pub current_location: Option<String>,

    #[validate(length(max = 255))]
    pub permanent_location: Option<String>,

    pub date_of_birth: Option<NaiveDate>,
}

impl AthleteForm {
    /// Text fields to send, skipping the blank ones so an update never
    /// overwrites a stored value with an empty string.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        let optional = [
            ("father_name", self.father_name.clone()),
            ("current_location", self.current_location.clone()),
            ("permanent_location", self.permanent_location.clone()),
            (
                "date_of_birth",
                self.date_of_birth.map(|date| date.format("%Y-%m-%d").to_string()),
            ),
        ];

        [
            ("name", Some(self.name.clone())),
            ("last_name", Some(self.last_name.clone())),
        ]
        .into_iter()
        .chain(optional)
        .filter_map(|(key, value)| {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .map(|v| (key, v))
        })
        .collect()
    }
}

impl From<&Athlete> for AthleteForm {
    fn from(athlete: &Athlete) -> Self {
        Self {
            name: athlete.name.clone(),
            last_name: athlete.last_name.clone(),
            father_name: athlete.father_name.clone(),
            current_location: athlete.current_location.clone(),
            permanent_location: athlete.permanent_location.clone(),
            date_of_birth: athlete.date_of_birth.as_deref().and_then(parse_calendar_date),
        }
    }
}

/// Files uploaded together with an athlete form
#[derive(Debug, Clone, Default)]
pub struct AthleteAttachments {
    pub nic: Option<PathBuf>,
    pub picture: Option<PathBuf>,
    pub document: Option<PathBuf>,
}

impl AthleteAttachments {
    pub fn files(&self) -> impl Iterator<Item = (&'static str, &Path)> {
        [
            ("nic", self.nic.as_deref()),
            ("picture", self.picture.as_deref()),
            ("document", self.document.as_deref()),
        ]
        .into_iter()
        .filter_map(|(field, path)| path.map(|p| (field, p)))
    }

    pub fn is_empty(&self) -> bool {
        self.files().next().is_none()
    }
}
