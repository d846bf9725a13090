//! Bibliographic document as supplied by the catalog index

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

/// The slice of a catalog record the availability engine consumes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BibDocument {
    /// Catalog identifier, e.g. `u1234567`
    pub id: String,
    /// Patron-driven acquisition (on-demand) record
    #[serde(default)]
    pub pda: bool,
    /// Journal or other serial
    #[serde(default)]
    pub journal: bool,
    /// Pipe-delimited `library|location|text|note|label|call number info` rows
    #[serde(default)]
    pub summary_holdings: Vec<String>,
    /// Patron-visible barcodes extracted from the record's holdings
    #[serde(default)]
    pub barcodes: Vec<String>,
    /// Availability embedded in the index record, used instead of the ILS
    #[serde(default)]
    pub availability_json: Option<String>,
}

impl BibDocument {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// ILS item key for this document
    pub fn item_key(&self) -> AppResult<String> {
        item_key(&self.id)
    }

    pub fn uses_json_availability(&self) -> bool {
        self.availability_json
            .as_deref()
            .map_or(false, |json| !json.trim().is_empty())
    }
}

/// Strip the one-character catalog prefix and any `pda` marker from a document id
pub fn item_key(document_id: &str) -> AppResult<String> {
    let trimmed = document_id.trim();
    let mut chars = trimmed.chars();
    chars.next();
    let rest = chars.as_str();
    let rest = rest
        .strip_prefix("pda")
        .or_else(|| rest.strip_suffix("pda"))
        .unwrap_or(rest);

    if rest.is_empty() {
        return Err(AppError::NotFound(format!(
            "No catalog item for document '{}'",
            document_id
        )));
    }
    Ok(rest.to_string())
}
