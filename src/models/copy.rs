//! Physical copy model

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::location::{ItemType, Location};

/// A single physical copy under a holding
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ItemCopy {
    pub copy_number: i32,
    pub barcode: String,
    #[serde(default)]
    pub shadowed: bool,
    #[serde(default)]
    pub current_periodical: bool,
    pub last_checkout: Option<NaiveDateTime>,
    /// ILS circulation flag, `Y` when the copy may leave the building
    #[serde(default)]
    pub circulate: String,
    pub current_location: Location,
    pub home_location: Location,
    #[serde(default)]
    pub item_type: ItemType,
}

impl ItemCopy {
    /// Classification always looks at the current location
    pub fn code(&self) -> &str {
        &self.current_location.code
    }

    /// Counted as held: not shadowed, not on a never-ordered or pending record
    pub fn exists(&self) -> bool {
        !self.shadowed && !self.current_location.is_not_ordered() && !self.current_location.is_pending()
    }

    pub fn is_available(&self) -> bool {
        if self.shadowed {
            return false;
        }
        if self.current_location.is_in_process() && self.home_location.is_special_collections_ivy() {
            return true;
        }
        !self.current_location.is_unavailable()
    }

    pub fn is_on_reserve(&self) -> bool {
        self.current_location.is_on_reserve()
    }

    pub fn is_reference(&self) -> bool {
        self.current_location.is_reference()
    }

    pub fn is_desk_only(&self) -> bool {
        self.current_location.is_desk_only()
    }

    pub fn is_lost(&self) -> bool {
        self.current_location.is_lost()
    }

    pub fn is_missing(&self) -> bool {
        self.current_location.is_missing()
    }

    pub fn is_hidden(&self) -> bool {
        self.current_location.is_hidden()
    }

    pub fn is_in_ivy(&self) -> bool {
        self.current_location.is_in_ivy() || self.home_location.is_in_ivy()
    }

    /// Stays in the building: reserve, reference or desk-only
    pub fn is_non_circulating_location(&self) -> bool {
        self.is_on_reserve() || self.is_reference() || self.is_desk_only()
    }

    pub fn is_circulating(&self) -> bool {
        self.exists()
            && self.circulate.trim().eq_ignore_ascii_case("y")
            && !self.is_non_circulating_location()
    }
}

#[cfg(test)]
pub(crate) fn copy_at(barcode: &str, code: &str) -> ItemCopy {
    ItemCopy {
        copy_number: 1,
        barcode: barcode.to_string(),
        circulate: "Y".to_string(),
        current_location: Location::new(code, code),
        home_location: Location::new("STACKS", "Stacks"),
        ..ItemCopy::default()
    }
}
