use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Athlete record as served by the club backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Athlete {
    pub id: i64,
    pub name: String,
    pub last_name: String,
    pub father_name: Option<String>,
    pub current_location: Option<String>,
    pub permanent_location: Option<String>,
    /// Kept as sent by the backend; only displayed, never computed on.
    pub date_of_birth: Option<String>,
    /// URI of the profile picture
    pub picture: Option<String>,
    /// URI of the national id scan
    pub nic: Option<String>,
    pub document: Option<String>,
}

impl Athlete {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.last_name).trim().to_string()
    }
}

/// Lookup of athletes by id, built once per snapshot.
///
/// When the backend returns the same id twice the first record wins, which
/// keeps lookups consistent with a front-to-back search of the collection.
#[derive(Debug, Clone)]
pub struct AthleteDirectory<'a> {
    by_id: HashMap<i64, &'a Athlete>,
}

impl<'a> AthleteDirectory<'a> {
    pub fn new(athletes: &'a [Athlete]) -> Self {
        let mut by_id = HashMap::with_capacity(athletes.len());
        for athlete in athletes {
            by_id.entry(athlete.id).or_insert(athlete);
        }

        Self { by_id }
    }

    pub fn get(&self, id: i64) -> Option<&'a Athlete> {
        self.by_id.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
