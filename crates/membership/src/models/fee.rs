use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, de::IgnoredAny};
use utoipa::ToSchema;

use super::calendar::parse_calendar_date;

/// Membership fee as served by the club backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Fee {
    pub id: i64,
    /// Id of the athlete paying this fee. The athlete may have been deleted
    /// since, and a null or non-integer reference decodes as `None`.
    #[serde(default, deserialize_with = "lenient_id")]
    pub athlete: Option<i64>,
    /// Raw wire value; see [`Fee::start_date`]. Non-string values decode as `None`.
    #[serde(default, deserialize_with = "lenient_text")]
    pub starting_date: Option<String>,
    pub fee: Decimal,
    #[serde(default)]
    pub taken: Decimal,
    /// `fee - taken`, computed by whoever wrote the record.
    #[serde(default)]
    pub remainder: Decimal,
}

impl Fee {
    /// First day of the membership, or `None` when the backend sent a
    /// missing or malformed date.
    pub fn start_date(&self) -> Option<NaiveDate> {
        self.starting_date.as_deref().and_then(parse_calendar_date)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Lenient<T> {
    Value(T),
    Other(IgnoredAny),
}

impl<T> Lenient<T> {
    fn into_option(self) -> Option<T> {
        match self {
            Self::Value(value) => Some(value),
            Self::Other(_) => None,
        }
    }
}

fn lenient_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Lenient::<i64>::deserialize(deserializer).map(Lenient::into_option)
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Lenient::<String>::deserialize(deserializer).map(Lenient::into_option)
}
