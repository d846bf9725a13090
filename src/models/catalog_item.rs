//! Catalog item: the ILS view of one bibliographic record

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::document::BibDocument;
use super::holding::Holding;
use crate::error::{AppError, AppResult};

/// Whether the item can be requested, with the ILS explanation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Holdability {
    /// `yes`, `no` or `maybe`
    pub value: String,
    pub message: Option<String>,
}

impl Holdability {
    pub fn is_holdable(&self) -> bool {
        matches!(self.value.trim().to_ascii_lowercase().as_str(), "yes" | "maybe")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CatalogItem {
    pub key: String,
    pub status: Option<i32>,
    #[serde(default)]
    pub holdability: Holdability,
    #[serde(default)]
    pub holdings: Vec<Holding>,
    #[serde(skip)]
    document: OnceCell<BibDocument>,
}

impl CatalogItem {
    pub fn new(key: impl Into<String>, status: Option<i32>, holdability: Holdability, holdings: Vec<Holding>) -> Self {
        Self {
            key: key.into(),
            status,
            holdability,
            holdings,
            document: OnceCell::new(),
        }
    }

    /// Catalog document id for this item (`u` + key)
    pub fn document_id(&self) -> String {
        if self.key.starts_with('u') {
            self.key.clone()
        } else {
            format!("u{}", self.key)
        }
    }

    pub fn document(&self) -> Option<&BibDocument> {
        self.document.get()
    }

    /// Resolve the bibliographic document once; later calls return the same document
    pub fn resolve_document<F>(&self, lookup: F) -> Option<&BibDocument>
    where
        F: FnOnce(&str) -> Option<BibDocument>,
    {
        let id = self.document_id();
        self.document.get_or_try_init(|| lookup(&id).ok_or(())).ok()
    }

    /// Attach an already-known document; fails if one was resolved before
    pub fn attach_document(&self, document: BibDocument) -> AppResult<()> {
        self.document.set(document).map_err(|_| {
            AppError::Conflict(format!("Document for catalog item {} already resolved", self.key))
        })
    }

    pub fn existing_copies(&self) -> usize {
        self.holdings.iter().map(Holding::existing_copies).sum()
    }

    pub fn available_copies(&self) -> usize {
        self.holdings.iter().map(Holding::available_copies).sum()
    }

    pub fn reserve_copies(&self) -> usize {
        self.holdings.iter().map(Holding::reserve_copies).sum()
    }

    pub fn circulating_copies(&self) -> usize {
        self.holdings.iter().map(Holding::circulating_copies).sum()
    }

    pub fn special_collections_copies(&self) -> usize {
        self.holdings
            .iter()
            .map(Holding::special_collections_copies)
            .sum()
    }
}

impl PartialEq for CatalogItem {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
            && self.status == other.status
            && self.holdability == other.holdability
            && self.holdings == other.holdings
    }
}
