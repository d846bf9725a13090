//! Domain models for ILS holdings and accounts

pub mod catalog_item;
pub mod copy;
pub mod document;
pub mod holding;
pub mod location;
pub mod user;
pub mod violation;

// Re-export commonly used types
pub use catalog_item::{CatalogItem, Holdability};
pub use copy::ItemCopy;
pub use document::BibDocument;
pub use holding::Holding;
pub use location::{HomeLibrary, HomeLocation, ItemType, Library, Location, Summary};
pub use user::{Checkout, Course, Hold, Reserve, User};
pub use violation::Violation;
