//! Holding (call-number level grouping of copies)

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::copy::ItemCopy;
use super::location::Library;

/// A call number at a library with its copies
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Holding {
    pub call_sequence: i32,
    pub call_number: String,
    #[serde(default)]
    pub holdable: bool,
    #[serde(default)]
    pub shadowed: bool,
    #[serde(default)]
    pub shelving_key: String,
    #[serde(default)]
    pub catalog_key: Option<String>,
    #[serde(default)]
    pub copies: Vec<ItemCopy>,
    pub library: Library,
}

impl Holding {
    /// Call numbers marked VOID are placeholders never shown to patrons
    pub fn is_void(&self) -> bool {
        self.call_number.to_uppercase().contains("VOID")
    }

    pub fn existing_copies(&self) -> usize {
        self.copies.iter().filter(|c| c.exists()).count()
    }

    pub fn available_copies(&self) -> usize {
        self.copies
            .iter()
            .filter(|c| c.exists() && c.is_available())
            .count()
    }

    pub fn reserve_copies(&self) -> usize {
        self.copies
            .iter()
            .filter(|c| c.exists() && c.is_on_reserve())
            .count()
    }

    pub fn circulating_copies(&self) -> usize {
        self.copies.iter().filter(|c| c.is_circulating()).count()
    }

    pub fn special_collections_copies(&self) -> usize {
        if self.library.is_special_collections() {
            self.existing_copies()
        } else {
            0
        }
    }

    pub fn is_special_collections(&self) -> bool {
        self.library.is_special_collections()
    }

    pub fn is_in_ivy(&self) -> bool {
        self.library.hold_library() == Some(crate::classifier::HoldLibrary::Ivy)
            || self.copies.iter().any(|c| c.is_in_ivy())
    }
}
