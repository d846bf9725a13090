//! Wire shape of ILS XML documents
//!
//! These structs mirror the XML exactly (attributes are `@name`, child
//! elements by tag) and hold every scalar as text. Coercion into typed
//! values happens in [`super::decoder`].

use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCatalogItem {
    #[serde(rename = "@key")]
    pub key: Option<String>,
    pub status: Option<String>,
    pub can_hold: Option<RawHoldability>,
    #[serde(default, rename = "holding")]
    pub holdings: Vec<RawHolding>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawHoldability {
    #[serde(rename = "@value")]
    pub value: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawHolding {
    #[serde(rename = "@callNumber")]
    pub call_number: Option<String>,
    #[serde(rename = "@callSequence")]
    pub call_sequence: Option<String>,
    #[serde(rename = "@holdable")]
    pub holdable: Option<String>,
    #[serde(rename = "@shadowed")]
    pub shadowed: Option<String>,
    pub catalog_key: Option<String>,
    pub shelving_key: Option<String>,
    #[serde(default, rename = "copy")]
    pub copies: Vec<RawCopy>,
    pub library: Option<RawLibrary>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCopy {
    #[serde(rename = "@copyNumber")]
    pub copy_number: Option<String>,
    #[serde(rename = "@barCode")]
    pub barcode: Option<String>,
    #[serde(rename = "@shadowed")]
    pub shadowed: Option<String>,
    #[serde(rename = "@currentPeriodical")]
    pub current_periodical: Option<String>,
    pub last_checkout: Option<String>,
    pub circulate: Option<String>,
    pub current_location: Option<RawLocation>,
    pub home_location: Option<RawLocation>,
    pub item_type: Option<RawLocation>,
}

/// Shared by locations and item types
#[derive(Debug, Default, Deserialize)]
pub struct RawLocation {
    #[serde(rename = "@id")]
    pub id: Option<String>,
    #[serde(rename = "@code")]
    pub code: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawLibrary {
    #[serde(rename = "@id")]
    pub id: Option<String>,
    #[serde(rename = "@code")]
    pub code: Option<String>,
    pub name: Option<String>,
    pub deliverable: Option<String>,
    pub holdable: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawLibraries {
    #[serde(default, rename = "library")]
    pub libraries: Vec<RawLibrary>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawLocations {
    #[serde(default, rename = "location")]
    pub locations: Vec<RawLocation>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawUser {
    #[serde(rename = "@computingId")]
    pub computing_id: Option<String>,
    #[serde(rename = "@sirsiId")]
    pub sirsi_id: Option<String>,
    #[serde(rename = "@key")]
    pub key: Option<String>,
    pub display_name: Option<String>,
    pub organizational_unit: Option<String>,
    pub library_group: Option<String>,
    pub profile: Option<String>,
    pub email: Option<String>,
    pub barred: Option<String>,
    pub bursarred: Option<String>,
    pub delinquent: Option<String>,
    pub total_checkouts: Option<String>,
    pub total_holds: Option<String>,
    pub total_overdue: Option<String>,
    pub total_recalls: Option<String>,
    pub total_reserves: Option<String>,
    #[serde(default, rename = "checkout")]
    pub checkouts: Vec<RawCheckout>,
    #[serde(default, rename = "hold")]
    pub holds: Vec<RawHold>,
    #[serde(default, rename = "reserve")]
    pub reserves: Vec<RawReserve>,
    #[serde(default, rename = "course")]
    pub courses: Vec<RawCourse>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCheckout {
    pub catalog_item: Option<RawCatalogItem>,
    pub date_charged: Option<String>,
    pub date_due: Option<String>,
    pub date_renewed: Option<String>,
    pub date_recalled: Option<String>,
    pub circulation_rule: Option<String>,
    pub overdue: Option<String>,
    pub number_renewals: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawHold {
    #[serde(rename = "@key")]
    pub key: Option<String>,
    pub catalog_item: Option<RawCatalogItem>,
    pub pickup_library: Option<RawLibrary>,
    pub date_placed: Option<String>,
    pub date_notified: Option<String>,
    pub date_expires: Option<String>,
    pub level: Option<String>,
    #[serde(rename = "type")]
    pub hold_type: Option<String>,
    pub active: Option<String>,
    pub priority: Option<String>,
    pub inactive_reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawReserve {
    pub catalog_item: Option<RawCatalogItem>,
    pub course_id: Option<String>,
    pub reserve_desk: Option<RawLibrary>,
    pub date_effective: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawCourse {
    #[serde(rename = "@code")]
    pub code: Option<String>,
    #[serde(rename = "@key")]
    pub key: Option<String>,
    pub name: Option<String>,
    #[serde(default, rename = "reserve")]
    pub reserves: Vec<RawReserve>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawViolation {
    pub code: Option<String>,
    pub message: Option<String>,
}
