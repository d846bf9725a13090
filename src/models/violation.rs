//! ILS request rejection

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of a `FirehoseViolation` response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Violation {
    pub code: Option<String>,
    pub message: Option<String>,
}

impl Violation {
    pub fn message_contains(&self, phrase: &str) -> bool {
        self.message
            .as_deref()
            .map_or(false, |m| m.to_lowercase().contains(&phrase.to_lowercase()))
    }
}
