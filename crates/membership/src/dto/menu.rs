use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::MenuItem;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MenuEntry {
    pub value: MenuItem,
    pub label: String,
}

impl From<MenuItem> for MenuEntry {
    fn from(item: MenuItem) -> Self {
        Self {
            value: item,
            label: item.label().to_string(),
        }
    }
}
