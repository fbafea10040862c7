//! Client profile row.

use clienthub_core::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};

/// A row from the `profiles` table. `id` equals the auth identity id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: EntityId,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub contact_name: Option<String>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

impl Profile {
    /// First word of the contact name, or `"Client"` when unknown.
    pub fn greeting_name(&self) -> String {
        self.contact_name
            .as_deref()
            .and_then(|name| name.split_whitespace().next())
            .unwrap_or("Client")
            .to_string()
    }

    /// Company name, or `"your company"` when unknown.
    pub fn company_label(&self) -> String {
        self.company_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or("your company")
            .to_string()
    }
}
