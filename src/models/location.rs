//! Library, location and item type models

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::classifier::{self, Category, HoldLibrary};

/// A library (branch) as reported by the ILS
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Library {
    pub id: Option<String>,
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub deliverable: bool,
    #[serde(default)]
    pub holdable: bool,
}

impl Library {
    pub fn is_special_collections(&self) -> bool {
        classifier::classify(&self.code, Category::SpecialCollections)
    }

    pub fn is_remote(&self) -> bool {
        classifier::classify(&self.code, Category::RemoteLibrary)
    }

    /// The hold library this library's code belongs to, if any
    pub fn hold_library(&self) -> Option<HoldLibrary> {
        HoldLibrary::from_code(&self.code)
    }

    /// Name used for patron-facing summaries; hold libraries use their canonical name
    pub fn display_name(&self) -> &str {
        match self.hold_library() {
            Some(lib) => lib.display_name(),
            None if self.name.is_empty() => &self.code,
            None => &self.name,
        }
    }
}

/// A shelving location.
///
/// The same shape serves as a copy's current location, its home location,
/// and the generic entries of the location list. Every predicate is a pure
/// function of `code`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Location {
    pub id: Option<String>,
    pub code: String,
    pub name: String,
}

impl Location {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: None,
            code: code.into(),
            name: name.into(),
        }
    }

    pub fn matches(&self, category: Category) -> bool {
        classifier::classify(&self.code, category)
    }

    pub fn is_hidden(&self) -> bool {
        self.matches(Category::Hidden)
    }

    pub fn is_unavailable(&self) -> bool {
        self.matches(Category::Unavailable)
    }

    pub fn is_on_hold(&self) -> bool {
        self.matches(Category::Hold)
    }

    pub fn is_lost(&self) -> bool {
        self.matches(Category::Lost)
    }

    pub fn is_missing(&self) -> bool {
        self.matches(Category::Missing)
    }

    pub fn is_on_reserve(&self) -> bool {
        self.matches(Category::Reserve)
    }

    pub fn is_reference(&self) -> bool {
        self.matches(Category::Reference)
    }

    pub fn is_desk_only(&self) -> bool {
        self.matches(Category::Desk)
    }

    pub fn is_suppressed(&self) -> bool {
        self.matches(Category::Suppressed)
    }

    pub fn is_by_request(&self) -> bool {
        self.matches(Category::ByRequest)
    }

    pub fn is_ivy(&self) -> bool {
        self.matches(Category::Ivy)
    }

    pub fn is_in_ivy(&self) -> bool {
        self.matches(Category::InIvy)
    }

    pub fn is_special_collections_ivy(&self) -> bool {
        self.matches(Category::SpecialCollectionsIvy)
    }

    pub fn is_not_ordered(&self) -> bool {
        self.matches(Category::NotOrdered)
    }

    pub fn is_pending(&self) -> bool {
        self.matches(Category::Pending)
    }

    pub fn is_in_process(&self) -> bool {
        self.matches(Category::InProcess)
    }

    pub fn is_in_transit(&self) -> bool {
        self.matches(Category::InTransit)
    }

    pub fn is_exhibit(&self) -> bool {
        self.matches(Category::Exhibit)
    }
}

/// Material type of a copy (BOOK, SERIAL, ...)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ItemType {
    pub id: Option<String>,
    pub code: String,
    pub name: String,
}

/// One free-text summary holdings statement
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Summary {
    pub text: String,
    pub note: Option<String>,
    pub label: Option<String>,
    pub call_number_information: Option<String>,
}

/// A location named in summary holdings, owning its statements
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HomeLocation {
    pub location: Location,
    pub summaries: Vec<Summary>,
}

/// A library named in summary holdings, owning its locations in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HomeLibrary {
    pub library: Library,
    pub locations: Vec<HomeLocation>,
}

impl HomeLibrary {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            library: Library {
                name: name.into(),
                ..Library::default()
            },
            locations: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.library.name
    }

    /// Find the location with this name, creating it on first sight
    pub fn location_mut(&mut self, name: &str) -> &mut HomeLocation {
        let index = match self.locations.iter().position(|l| l.location.name == name) {
            Some(index) => index,
            None => {
                self.locations.push(HomeLocation {
                    location: Location::new("", name),
                    summaries: Vec::new(),
                });
                self.locations.len() - 1
            }
        };
        &mut self.locations[index]
    }
}
