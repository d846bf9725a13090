//! Availability resolution
//!
//! An [`Availability`] is the patron-facing view of a catalog item: the ILS
//! holdings after weeding and display ordering, the lost/missing notes and
//! the summary holdings text from the catalog record. It is built once per
//! lookup by [`crate::services::AvailabilityService::find`] and not changed
//! afterwards; every derived view is computed at construction.

pub mod order;
pub mod summary;
pub mod weed;

use indexmap::IndexMap;

use crate::error::AppResult;
use crate::firehose::Payload;
use crate::models::{BibDocument, CatalogItem, Holding, HomeLibrary, User};

pub use order::{order_holdings, order_summary_libraries};
pub use summary::parse_summary_holdings;
pub use weed::{describe_absences, reduce_absences, weed, Absence};

#[derive(Debug)]
pub struct Availability {
    catalog_item: CatalogItem,
    payload: Payload,
    barcodes: Option<Vec<String>>,
    lost: IndexMap<String, String>,
    summary_libraries: Vec<HomeLibrary>,
    holdings_by_library: IndexMap<String, usize>,
    available_by_library: IndexMap<String, usize>,
    leoable: bool,
}

impl Availability {
    /// Weed, order and index a freshly decoded catalog item
    pub(crate) fn build(
        document: BibDocument,
        mut catalog_item: CatalogItem,
        payload: Payload,
        barcodes: Option<Vec<String>>,
    ) -> AppResult<Self> {
        let journal = document.journal;
        let summary_libraries = order_summary_libraries(parse_summary_holdings(&document.summary_holdings));

        let absences = weed(&mut catalog_item.holdings, barcodes.as_deref());
        let lost = reduce_absences(absences);
        let holdings = std::mem::take(&mut catalog_item.holdings);
        catalog_item.holdings = order_holdings(holdings, journal);

        let mut holdings_by_library = IndexMap::new();
        let mut available_by_library = IndexMap::new();
        for holding in &catalog_item.holdings {
            let code = holding.library.code.clone();
            *holdings_by_library.entry(code.clone()).or_insert(0) += 1;
            *available_by_library.entry(code).or_insert(0) += holding.available_copies();
        }

        let leoable = catalog_item.holdings.iter().any(|h| {
            h.library.deliverable
                && h.copies.iter().any(|c| {
                    c.exists() && c.is_available() && !c.is_on_reserve() && !c.is_reference() && !c.is_desk_only()
                })
        });

        catalog_item.attach_document(document)?;

        Ok(Self {
            catalog_item,
            payload,
            barcodes,
            lost,
            summary_libraries,
            holdings_by_library,
            available_by_library,
            leoable,
        })
    }

    pub fn catalog_item(&self) -> &CatalogItem {
        &self.catalog_item
    }

    pub fn document(&self) -> Option<&BibDocument> {
        self.catalog_item.document()
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn barcodes(&self) -> Option<&[String]> {
        self.barcodes.as_deref()
    }

    /// Surviving holdings in display order
    pub fn holdings(&self) -> &[Holding] {
        &self.catalog_item.holdings
    }

    pub fn special_collections_holdings(&self) -> impl Iterator<Item = &Holding> {
        self.holdings().iter().filter(|h| h.is_special_collections())
    }

    /// Number of holdings per library code
    pub fn holdings_by_library(&self) -> &IndexMap<String, usize> {
        &self.holdings_by_library
    }

    /// Number of available copies per library code
    pub fn available_by_library(&self) -> &IndexMap<String, usize> {
        &self.available_by_library
    }

    /// Lost/missing note per library display name
    pub fn lost(&self) -> &IndexMap<String, String> {
        &self.lost
    }

    pub fn summary_libraries(&self) -> &[HomeLibrary] {
        &self.summary_libraries
    }

    pub fn existing_copies(&self) -> usize {
        self.catalog_item.existing_copies()
    }

    pub fn available_copies(&self) -> usize {
        self.catalog_item.available_copies()
    }

    pub fn reserve_copies(&self) -> usize {
        self.catalog_item.reserve_copies()
    }

    pub fn circulating_copies(&self) -> usize {
        self.catalog_item.circulating_copies()
    }

    pub fn special_collections_copies(&self) -> usize {
        self.catalog_item.special_collections_copies()
    }

    pub fn has_ivy_holdings(&self) -> bool {
        self.holdings().iter().any(Holding::is_in_ivy)
    }

    /// Eligible for delivery to a departmental address
    pub fn is_leoable(&self) -> bool {
        self.leoable
    }

    pub fn holdability(&self) -> &str {
        &self.catalog_item.holdability.value
    }

    pub fn holdability_message(&self) -> Option<&str> {
        self.catalog_item.holdability.message.as_deref()
    }

    pub fn is_holdable(&self) -> bool {
        self.catalog_item.holdability.is_holdable()
    }

    pub fn has_holdable_holding(&self, call_number: &str) -> bool {
        self.holdings()
            .iter()
            .any(|h| h.holdable && h.call_number == call_number)
    }

    /// Call numbers of holdable holdings, first occurrence only
    pub fn holdable_call_numbers(&self) -> Vec<&str> {
        let mut call_numbers: Vec<&str> = Vec::new();
        for holding in self.holdings().iter().filter(|h| h.holdable) {
            if !call_numbers.contains(&holding.call_number.as_str()) {
                call_numbers.push(&holding.call_number);
            }
        }
        call_numbers
    }

    /// Whether the user has a copy of this item under the given call number.
    ///
    /// Without a call number the item's only holdable call number is used;
    /// if there is not exactly one, the answer is no.
    pub fn user_has_checked_out(&self, user: &User, call_number: Option<&str>) -> bool {
        let call_number = match call_number {
            Some(call_number) => call_number,
            None => match self.holdable_call_numbers().as_slice() {
                [only] => *only,
                _ => return false,
            },
        };
        user.checkouts
            .iter()
            .any(|checkout| checkout.matches(&self.catalog_item.key, call_number))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::copy::copy_at;
    use crate::models::{Checkout, Holdability, Library, Location};

    fn library(code: &str, name: &str, deliverable: bool) -> Library {
        Library {
            code: code.to_string(),
            name: name.to_string(),
            deliverable,
            ..Library::default()
        }
    }

    fn holding(call_number: &str, library: Library, codes: &[&str]) -> Holding {
        Holding {
            call_number: call_number.to_string(),
            shelving_key: call_number.to_string(),
            holdable: true,
            library,
            copies: codes
                .iter()
                .enumerate()
                .map(|(i, code)| copy_at(&format!("X{}", i), code))
                .collect(),
            ..Holding::default()
        }
    }

    fn build(holdings: Vec<Holding>) -> Availability {
        let item = CatalogItem::new(
            "1234567",
            Some(1),
            Holdability {
                value: "yes".into(),
                message: Some("Request this item".into()),
            },
            holdings,
        );
        Availability::build(BibDocument::new("u1234567"), item, Payload::Xml(String::new()), None).unwrap()
    }

    #[test]
    fn test_lost_copy_scenario() {
        let availability = build(vec![holding(
            "PS3537 .A1",
            library("ALDERMAN", "Alderman", true),
            &["STACKS", "LOST-1"],
        )]);

        assert_eq!(availability.holdings()[0].copies.len(), 1);
        assert_eq!(availability.available_copies(), 1);
        assert_eq!(availability.lost().get("Alderman").map(String::as_str), Some("lost"));
    }

    #[test]
    fn test_special_collections_in_process_is_available() {
        let mut h = holding("MSS 123", library("SPEC-COLL", "Special Collections", false), &["IN-PROCESS"]);
        h.copies[0].home_location = Location::new("SC-IVY", "Special Collections Ivy");
        let availability = build(vec![h]);

        assert!(availability.holdings()[0].copies[0].is_available());
        assert_eq!(availability.special_collections_holdings().count(), 1);
    }

    #[test]
    fn test_library_indexes() {
        let availability = build(vec![
            holding("A1", library("CLEMONS", "Clemons", true), &["STACKS", "CHECKEDOUT"]),
            holding("A2", library("ALDERMAN", "Alderman", true), &["STACKS"]),
            holding("A3", library("ALDERMAN", "Alderman", true), &["STACKS", "STACKS"]),
        ]);

        let codes: Vec<_> = availability.holdings_by_library().keys().cloned().collect();
        assert_eq!(codes, vec!["ALDERMAN", "CLEMONS"]);
        assert_eq!(availability.holdings_by_library()["ALDERMAN"], 2);
        assert_eq!(availability.available_by_library()["ALDERMAN"], 3);
        assert_eq!(availability.available_by_library()["CLEMONS"], 1);
        assert!(availability.available_copies() <= availability.existing_copies());
    }

    #[test]
    fn test_leoable_requires_deliverable_available_copy() {
        let reserve_only = build(vec![holding("A1", library("CLEMONS", "Clemons", true), &["RESERVE"])]);
        assert!(!reserve_only.is_leoable());

        let undeliverable = build(vec![holding("A1", library("SPEC-COLL", "Special", false), &["STACKS"])]);
        assert!(!undeliverable.is_leoable());

        let deliverable = build(vec![holding("A1", library("ALDERMAN", "Alderman", true), &["STACKS"])]);
        assert!(deliverable.is_leoable());
    }

    #[test]
    fn test_ivy_holdings() {
        let at_ivy = build(vec![holding("A1", library("IVY", "Ivy", false), &["STACKS"])]);
        assert!(at_ivy.has_ivy_holdings());

        let by_request = build(vec![holding("A1", library("ALDERMAN", "Alderman", true), &["BY-REQUEST"])]);
        assert!(by_request.has_ivy_holdings());

        let elsewhere = build(vec![holding("A1", library("ALDERMAN", "Alderman", true), &["STACKS"])]);
        assert!(!elsewhere.has_ivy_holdings());
    }

    #[test]
    fn test_holdability() {
        let availability = build(vec![holding("A1", library("ALDERMAN", "Alderman", true), &["STACKS"])]);
        assert!(availability.is_holdable());
        assert_eq!(availability.holdability(), "yes");
        assert_eq!(availability.holdability_message(), Some("Request this item"));
    }

    #[test]
    fn test_holdable_call_numbers_are_deduplicated() {
        let mut unholdable = holding("C3", library("CLEMONS", "Clemons", true), &["STACKS"]);
        unholdable.holdable = false;
        let availability = build(vec![
            holding("A1", library("ALDERMAN", "Alderman", true), &["STACKS"]),
            holding("A1", library("CLEMONS", "Clemons", true), &["STACKS"]),
            unholdable,
        ]);

        assert_eq!(availability.holdable_call_numbers(), vec!["A1"]);
        assert!(availability.has_holdable_holding("A1"));
        assert!(!availability.has_holdable_holding("C3"));
    }

    fn borrower(key: &str, call_number: &str) -> User {
        let checked_out = CatalogItem::new(
            key,
            None,
            Holdability::default(),
            vec![Holding {
                call_number: call_number.to_string(),
                ..Holding::default()
            }],
        );
        User {
            computing_id: "mst3k".into(),
            checkouts: vec![Checkout {
                catalog_item: checked_out,
                ..Checkout::default()
            }],
            ..User::default()
        }
    }

    #[test]
    fn test_user_has_checked_out() {
        let availability = build(vec![holding("A1", library("ALDERMAN", "Alderman", true), &["STACKS"])]);

        assert!(availability.user_has_checked_out(&borrower("1234567", "A1"), Some("A1")));
        assert!(availability.user_has_checked_out(&borrower("1234567", "A1"), None));
        assert!(!availability.user_has_checked_out(&borrower("1234567", "B2"), Some("A1")));
        assert!(!availability.user_has_checked_out(&borrower("7654321", "A1"), None));
    }

    #[test]
    fn test_ambiguous_call_number_is_not_checked_out() {
        let availability = build(vec![
            holding("A1", library("ALDERMAN", "Alderman", true), &["STACKS"]),
            holding("B2", library("ALDERMAN", "Alderman", true), &["STACKS"]),
        ]);
        assert!(!availability.user_has_checked_out(&borrower("1234567", "A1"), None));
    }

    #[test]
    fn test_summary_libraries_are_ordered() {
        let mut document = BibDocument::new("u1");
        document.summary_holdings = vec![
            "Ivy Stacks|Stacks|v.1-10".to_string(),
            "Alderman|Stacks|v.11-".to_string(),
        ];
        let item = CatalogItem::new("1", None, Holdability::default(), Vec::new());
        let availability = Availability::build(document, item, Payload::Xml(String::new()), None).unwrap();

        let names: Vec<_> = availability.summary_libraries().iter().map(|l| l.name()).collect();
        assert_eq!(names, vec!["Alderman", "Ivy Stacks"]);
        assert_eq!(availability.document().map(|d| d.id.as_str()), Some("u1"));
    }

    #[test]
    fn test_document_is_attached_once() {
        let item = CatalogItem::new("1", None, Holdability::default(), Vec::new());
        item.attach_document(BibDocument::new("u1")).unwrap();
        let result = Availability::build(BibDocument::new("u1"), item, Payload::Xml(String::new()), None);
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }
}
