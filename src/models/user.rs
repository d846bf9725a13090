//! Patron account models returned by the ILS

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::catalog_item::CatalogItem;
use super::location::Library;

/// Patron account with its circulation lists
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub computing_id: String,
    pub sirsi_id: Option<String>,
    pub key: Option<String>,
    pub display_name: Option<String>,
    pub organizational_unit: Option<String>,
    pub library_group: Option<String>,
    pub profile: Option<String>,
    pub email: Option<String>,
    pub barred: bool,
    pub bursarred: bool,
    pub delinquent: bool,
    pub total_checkouts: i32,
    pub total_holds: i32,
    pub total_overdue: i32,
    pub total_recalls: i32,
    pub total_reserves: i32,
    pub checkouts: Vec<Checkout>,
    pub holds: Vec<Hold>,
    pub reserves: Vec<Reserve>,
    pub courses: Vec<Course>,
}

impl User {
    /// Barred, bursarred or delinquent patrons cannot place requests
    pub fn can_make_requests(&self) -> bool {
        !(self.barred || self.bursarred || self.delinquent)
    }

    pub fn overdue_checkouts(&self) -> impl Iterator<Item = &Checkout> {
        self.checkouts.iter().filter(|c| c.overdue)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Checkout {
    pub catalog_item: CatalogItem,
    pub date_charged: Option<NaiveDateTime>,
    pub date_due: Option<NaiveDateTime>,
    pub date_renewed: Option<NaiveDateTime>,
    pub date_recalled: Option<NaiveDateTime>,
    pub circulation_rule: Option<String>,
    pub overdue: bool,
    pub number_renewals: i32,
    pub status: Option<String>,
}

impl Checkout {
    pub fn is_recalled(&self) -> bool {
        self.date_recalled.is_some()
    }

    pub fn is_renewable(&self) -> bool {
        !self.is_recalled()
    }

    /// True if this checkout is a copy of `key` shelved under `call_number`
    pub fn matches(&self, key: &str, call_number: &str) -> bool {
        self.catalog_item.key == key
            && self
                .catalog_item
                .holdings
                .iter()
                .any(|h| h.call_number == call_number)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Hold {
    pub key: Option<String>,
    pub catalog_item: CatalogItem,
    pub pickup_library: Option<Library>,
    pub date_placed: Option<NaiveDateTime>,
    pub date_notified: Option<NaiveDateTime>,
    pub date_expires: Option<NaiveDateTime>,
    pub level: Option<String>,
    pub hold_type: Option<String>,
    pub active: bool,
    pub priority: Option<i32>,
    pub inactive_reason: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Reserve {
    pub catalog_item: CatalogItem,
    pub course_id: Option<String>,
    pub reserve_desk: Option<Library>,
    pub date_effective: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Course {
    pub code: String,
    pub key: Option<String>,
    pub name: Option<String>,
    pub reserves: Vec<Reserve>,
}
