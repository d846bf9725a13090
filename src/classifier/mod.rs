//! Location and library code classification
//!
//! Every predicate here is a pure function of a code string evaluated
//! against the static tables in [`tables`]. Codes absent from every table
//! match nothing, so an unknown location is treated as available.

pub mod tables;

use serde::Serialize;
use utoipa::ToSchema;

use tables::CodeTable;

pub use tables::normalize;

/// Named classification categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Hidden,
    Unavailable,
    Hold,
    Reserve,
    Reference,
    Desk,
    RemoteLibrary,
    SpecialCollections,
    Lost,
    Missing,
    Suppressed,
    ByRequest,
    Ivy,
    InIvy,
    SpecialCollectionsIvy,
    NotOrdered,
    Pending,
    InProcess,
    InTransit,
    Exhibit,
}

impl Category {
    /// Look up a category by its table name (`"hidden"`, `"in-ivy"`, ...)
    pub fn from_name(name: &str) -> Option<Self> {
        let category = match name.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "hidden" => Category::Hidden,
            "unavailable" => Category::Unavailable,
            "hold" => Category::Hold,
            "reserve" => Category::Reserve,
            "reference" => Category::Reference,
            "desk" => Category::Desk,
            "remote-library" => Category::RemoteLibrary,
            "special-collections" => Category::SpecialCollections,
            "lost" => Category::Lost,
            "missing" => Category::Missing,
            "suppressed" => Category::Suppressed,
            "by-request" => Category::ByRequest,
            "ivy" => Category::Ivy,
            "in-ivy" => Category::InIvy,
            "special-collections-ivy" => Category::SpecialCollectionsIvy,
            "not-ordered" => Category::NotOrdered,
            "pending" => Category::Pending,
            "in-process" => Category::InProcess,
            "in-transit" => Category::InTransit,
            "exhibit" => Category::Exhibit,
            _ => return None,
        };
        Some(category)
    }

    fn table(self) -> Option<&'static CodeTable> {
        let table: &'static CodeTable = match self {
            Category::Hidden => &*tables::HIDDEN,
            Category::Hold => &*tables::HOLD,
            Category::Reserve => &*tables::RESERVE,
            Category::Reference => &*tables::REFERENCE,
            Category::Desk => &*tables::DESK,
            Category::RemoteLibrary => &*tables::REMOTE_LIBRARY,
            Category::SpecialCollections => &*tables::SPECIAL_COLLECTIONS,
            Category::Lost => &*tables::LOST,
            Category::Missing => &*tables::MISSING,
            Category::Suppressed => &*tables::SUPPRESSED,
            Category::ByRequest => &*tables::BY_REQUEST,
            Category::Ivy => &*tables::IVY,
            Category::SpecialCollectionsIvy => &*tables::SPECIAL_COLLECTIONS_IVY,
            Category::NotOrdered => &*tables::NOT_ORDERED,
            Category::Pending => &*tables::PENDING,
            Category::InProcess => &*tables::IN_PROCESS,
            Category::InTransit => &*tables::IN_TRANSIT,
            Category::Exhibit => &*tables::EXHIBIT,
            // Composite categories
            Category::Unavailable | Category::InIvy => return None,
        };
        Some(table)
    }
}

/// Test a code against a category
pub fn classify(code: &str, category: Category) -> bool {
    let normalized = normalize(code);
    if normalized.is_empty() {
        return false;
    }
    match category {
        Category::Unavailable => {
            tables::HIDDEN.matches_normalized(&normalized)
                || tables::HOLD.matches_normalized(&normalized)
                || tables::UNAVAILABLE.matches_normalized(&normalized)
        }
        Category::InIvy => {
            tables::IVY.matches_normalized(&normalized)
                || tables::BY_REQUEST.matches_normalized(&normalized)
        }
        other => other
            .table()
            .map_or(false, |table| table.matches_normalized(&normalized)),
    }
}

pub fn is_hidden(code: &str) -> bool {
    classify(code, Category::Hidden)
}

pub fn is_unavailable(code: &str) -> bool {
    classify(code, Category::Unavailable)
}

pub fn is_lost(code: &str) -> bool {
    classify(code, Category::Lost)
}

pub fn is_missing(code: &str) -> bool {
    classify(code, Category::Missing)
}

pub fn is_reserve(code: &str) -> bool {
    classify(code, Category::Reserve)
}

pub fn is_reference(code: &str) -> bool {
    classify(code, Category::Reference)
}

pub fn is_desk(code: &str) -> bool {
    classify(code, Category::Desk)
}

/// Libraries whose holdings are always listed last, in this order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum HoldLibrary {
    Ivy,
    Blandy,
    MtLake,
    AtSea,
}

impl HoldLibrary {
    pub const ALL: [HoldLibrary; 4] = [
        HoldLibrary::Ivy,
        HoldLibrary::Blandy,
        HoldLibrary::MtLake,
        HoldLibrary::AtSea,
    ];

    pub fn key(self) -> &'static str {
        match self {
            HoldLibrary::Ivy => "ivy",
            HoldLibrary::Blandy => "blandy",
            HoldLibrary::MtLake => "mt_lake",
            HoldLibrary::AtSea => "at_sea",
        }
    }

    /// Name shown to patrons for this library
    pub fn display_name(self) -> &'static str {
        match self {
            HoldLibrary::Ivy => "Ivy Stacks",
            HoldLibrary::Blandy => "Blandy Experimental Farm",
            HoldLibrary::MtLake => "Mountain Lake",
            HoldLibrary::AtSea => "Semester at Sea",
        }
    }

    fn table(self) -> &'static CodeTable {
        match self {
            HoldLibrary::Ivy => &*tables::IVY,
            HoldLibrary::Blandy => &*tables::BLANDY,
            HoldLibrary::MtLake => &*tables::MT_LAKE,
            HoldLibrary::AtSea => &*tables::AT_SEA,
        }
    }

    /// Match a library code
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|lib| lib.table().matches(code))
    }

    /// Match a library display name, as found in summary holdings text.
    ///
    /// Only the canonical name matches; code patterns do not apply to names.
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized = normalize(name);
        if normalized.is_empty() {
            return None;
        }
        Self::ALL
            .into_iter()
            .find(|lib| normalize(lib.display_name()) == normalized)
    }
}
