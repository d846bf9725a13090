//! Conversion from wire structs to domain models

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use super::schema::{
    RawCatalogItem, RawCheckout, RawCopy, RawCourse, RawHold, RawHoldability, RawHolding, RawLibraries,
    RawLibrary, RawLocation, RawLocations, RawReserve, RawUser, RawViolation,
};
use super::{parse_root, root_element, MappingError};
use crate::models::{
    CatalogItem, Checkout, Course, Hold, Holdability, Holding, ItemCopy, ItemType, Library, Location,
    Reserve, User, Violation,
};

// ---------------------------------------------------------------------------
// Scalar coercions
// ---------------------------------------------------------------------------

fn text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn text_or_default(value: Option<String>) -> String {
    text(value).unwrap_or_default()
}

fn boolean(field: &'static str, value: Option<String>) -> Result<bool, MappingError> {
    let Some(value) = text(value) else {
        return Ok(false);
    };
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Ok(true),
        "false" | "no" | "n" | "0" => Ok(false),
        _ => Err(MappingError::Invalid { field, value }),
    }
}

fn integer(field: &'static str, value: Option<String>) -> Result<Option<i32>, MappingError> {
    match text(value) {
        None => Ok(None),
        Some(value) => value
            .parse::<i32>()
            .map(Some)
            .map_err(|_| MappingError::Invalid { field, value }),
    }
}

fn date(field: &'static str, value: Option<String>) -> Result<Option<NaiveDateTime>, MappingError> {
    let Some(value) = text(value) else {
        return Ok(None);
    };
    if let Ok(parsed) = DateTime::parse_from_rfc3339(&value) {
        return Ok(Some(parsed.naive_local()));
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(&value, "%Y-%m-%dT%H:%M:%S") {
        return Ok(Some(parsed));
    }
    if let Some(midnight) = NaiveDate::parse_from_str(&value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    {
        return Ok(Some(midnight));
    }
    Err(MappingError::Invalid { field, value })
}

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

fn location(raw: Option<RawLocation>) -> Location {
    let raw = raw.unwrap_or_default();
    Location {
        id: text(raw.id),
        code: text_or_default(raw.code),
        name: text_or_default(raw.name),
    }
}

fn item_type(raw: Option<RawLocation>) -> ItemType {
    let raw = raw.unwrap_or_default();
    ItemType {
        id: text(raw.id),
        code: text_or_default(raw.code),
        name: text_or_default(raw.name),
    }
}

fn library(raw: RawLibrary) -> Result<Library, MappingError> {
    Ok(Library {
        id: text(raw.id),
        code: text_or_default(raw.code),
        name: text_or_default(raw.name),
        deliverable: boolean("library.deliverable", raw.deliverable)?,
        holdable: boolean("library.holdable", raw.holdable)?,
    })
}

fn copy(raw: RawCopy) -> Result<ItemCopy, MappingError> {
    Ok(ItemCopy {
        copy_number: integer("copy@copyNumber", raw.copy_number)?.unwrap_or(0),
        barcode: text_or_default(raw.barcode),
        shadowed: boolean("copy@shadowed", raw.shadowed)?,
        current_periodical: boolean("copy@currentPeriodical", raw.current_periodical)?,
        last_checkout: date("copy.lastCheckout", raw.last_checkout)?,
        circulate: text_or_default(raw.circulate),
        current_location: location(raw.current_location),
        home_location: location(raw.home_location),
        item_type: item_type(raw.item_type),
    })
}

fn holding(raw: RawHolding) -> Result<Holding, MappingError> {
    Ok(Holding {
        call_sequence: integer("holding@callSequence", raw.call_sequence)?.unwrap_or(0),
        call_number: text_or_default(raw.call_number),
        holdable: boolean("holding@holdable", raw.holdable)?,
        shadowed: boolean("holding@shadowed", raw.shadowed)?,
        shelving_key: text_or_default(raw.shelving_key),
        catalog_key: text(raw.catalog_key),
        copies: raw.copies.into_iter().map(copy).collect::<Result<_, _>>()?,
        library: library(raw.library.unwrap_or_default())?,
    })
}

fn holdability(raw: Option<RawHoldability>) -> Holdability {
    let raw = raw.unwrap_or_default();
    Holdability {
        value: text_or_default(raw.value),
        message: text(raw.message),
    }
}

fn catalog_item(raw: RawCatalogItem) -> Result<CatalogItem, MappingError> {
    let key = text(raw.key).ok_or(MappingError::Missing("catalogItem@key"))?;
    let holdings = raw
        .holdings
        .into_iter()
        .map(holding)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(CatalogItem::new(
        key,
        integer("catalogItem.status", raw.status)?,
        holdability(raw.can_hold),
        holdings,
    ))
}

fn nested_item(raw: Option<RawCatalogItem>) -> Result<CatalogItem, MappingError> {
    catalog_item(raw.ok_or(MappingError::Missing("catalogItem"))?)
}

fn checkout(raw: RawCheckout) -> Result<Checkout, MappingError> {
    Ok(Checkout {
        catalog_item: nested_item(raw.catalog_item)?,
        date_charged: date("checkout.dateCharged", raw.date_charged)?,
        date_due: date("checkout.dateDue", raw.date_due)?,
        date_renewed: date("checkout.dateRenewed", raw.date_renewed)?,
        date_recalled: date("checkout.dateRecalled", raw.date_recalled)?,
        circulation_rule: text(raw.circulation_rule),
        overdue: boolean("checkout.overdue", raw.overdue)?,
        number_renewals: integer("checkout.numberRenewals", raw.number_renewals)?.unwrap_or(0),
        status: text(raw.status),
    })
}

fn hold(raw: RawHold) -> Result<Hold, MappingError> {
    Ok(Hold {
        key: text(raw.key),
        catalog_item: nested_item(raw.catalog_item)?,
        pickup_library: raw.pickup_library.map(library).transpose()?,
        date_placed: date("hold.datePlaced", raw.date_placed)?,
        date_notified: date("hold.dateNotified", raw.date_notified)?,
        date_expires: date("hold.dateExpires", raw.date_expires)?,
        level: text(raw.level),
        hold_type: text(raw.hold_type),
        active: boolean("hold.active", raw.active)?,
        priority: integer("hold.priority", raw.priority)?,
        inactive_reason: text(raw.inactive_reason),
    })
}

fn reserve(raw: RawReserve) -> Result<Reserve, MappingError> {
    Ok(Reserve {
        catalog_item: nested_item(raw.catalog_item)?,
        course_id: text(raw.course_id),
        reserve_desk: raw.reserve_desk.map(library).transpose()?,
        date_effective: date("reserve.dateEffective", raw.date_effective)?,
    })
}

fn course(raw: RawCourse) -> Result<Course, MappingError> {
    Ok(Course {
        code: text_or_default(raw.code),
        key: text(raw.key),
        name: text(raw.name),
        reserves: raw.reserves.into_iter().map(reserve).collect::<Result<_, _>>()?,
    })
}

fn user(raw: RawUser) -> Result<User, MappingError> {
    Ok(User {
        computing_id: text(raw.computing_id).ok_or(MappingError::Missing("user@computingId"))?,
        sirsi_id: text(raw.sirsi_id),
        key: text(raw.key),
        display_name: text(raw.display_name),
        organizational_unit: text(raw.organizational_unit),
        library_group: text(raw.library_group),
        profile: text(raw.profile),
        email: text(raw.email),
        barred: boolean("user.barred", raw.barred)?,
        bursarred: boolean("user.bursarred", raw.bursarred)?,
        delinquent: boolean("user.delinquent", raw.delinquent)?,
        total_checkouts: integer("user.totalCheckouts", raw.total_checkouts)?.unwrap_or(0),
        total_holds: integer("user.totalHolds", raw.total_holds)?.unwrap_or(0),
        total_overdue: integer("user.totalOverdue", raw.total_overdue)?.unwrap_or(0),
        total_recalls: integer("user.totalRecalls", raw.total_recalls)?.unwrap_or(0),
        total_reserves: integer("user.totalReserves", raw.total_reserves)?.unwrap_or(0),
        checkouts: raw.checkouts.into_iter().map(checkout).collect::<Result<_, _>>()?,
        holds: raw.holds.into_iter().map(hold).collect::<Result<_, _>>()?,
        reserves: raw.reserves.into_iter().map(reserve).collect::<Result<_, _>>()?,
        courses: raw.courses.into_iter().map(course).collect::<Result<_, _>>()?,
    })
}

// ---------------------------------------------------------------------------
// Documents
// ---------------------------------------------------------------------------

/// Decode a `<catalogItem>` document
pub fn decode_catalog_item(xml: &str) -> Result<CatalogItem, MappingError> {
    catalog_item(parse_root::<RawCatalogItem>(xml, "catalogItem")?)
}

/// Decode the JSON rendering of a catalog item (embedded availability)
pub fn decode_catalog_item_json(json: &str) -> Result<CatalogItem, MappingError> {
    if json.trim().is_empty() {
        return Err(MappingError::Empty);
    }
    let item: CatalogItem = serde_json::from_str(json).map_err(|e| MappingError::Json(e.to_string()))?;
    if item.key.trim().is_empty() {
        return Err(MappingError::Missing("catalog item key"));
    }
    Ok(item)
}

/// Decode a `<user>` document
pub fn decode_user(xml: &str) -> Result<User, MappingError> {
    user(parse_root::<RawUser>(xml, "user")?)
}

/// Decode a `<libraries>` list
pub fn decode_libraries(xml: &str) -> Result<Vec<Library>, MappingError> {
    parse_root::<RawLibraries>(xml, "libraries")?
        .libraries
        .into_iter()
        .map(library)
        .collect()
}

/// Decode a `<locations>` list
pub fn decode_locations(xml: &str) -> Result<Vec<Location>, MappingError> {
    Ok(parse_root::<RawLocations>(xml, "locations")?
        .locations
        .into_iter()
        .map(|raw| location(Some(raw)))
        .collect())
}

/// Decode a `<FirehoseViolation>` body; any other well-formed document yields `None`
pub fn decode_violation(xml: &str) -> Result<Option<Violation>, MappingError> {
    if root_element(xml)? != "FirehoseViolation" {
        return Ok(None);
    }
    let raw = parse_root::<RawViolation>(xml, "FirehoseViolation")?;
    Ok(Some(Violation {
        code: text(raw.code),
        message: text(raw.message),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ITEM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<catalogItem key="2470431">
  <canHold value="yes"><message>Request this item</message></canHold>
  <holding callNumber="PS3545 .I345 Z5 1990" callSequence="1" holdable="true" shadowed="false">
    <catalogKey>2470431</catalogKey>
    <copy copyNumber="1" barCode="X001234567" shadowed="false" currentPeriodical="false">
      <circulate>Y</circulate>
      <currentLocation code="STACKS" id="1"><name>Stacks</name></currentLocation>
      <homeLocation code="STACKS" id="1"><name>Stacks</name></homeLocation>
      <itemType code="BOOK" id="2"><name>Book</name></itemType>
      <lastCheckout>2011-09-14T00:00:00-04:00</lastCheckout>
    </copy>
    <copy copyNumber="2" barCode="X001234568" shadowed="true">
      <currentLocation code="LOST" id="9"><name>Lost</name></currentLocation>
      <homeLocation code="STACKS" id="1"><name>Stacks</name></homeLocation>
    </copy>
    <library code="ALDERMAN" id="1">
      <name>Alderman</name>
      <deliverable>true</deliverable>
      <holdable>true</holdable>
    </library>
    <shelvingKey>PS 03545.I345 Z5 1990</shelvingKey>
  </holding>
  <status>1</status>
  <unknownElement ignored="yes"/>
</catalogItem>"#;

    #[test]
    fn test_decode_catalog_item() {
        let item = decode_catalog_item(ITEM).unwrap();
        assert_eq!(item.key, "2470431");
        assert_eq!(item.status, Some(1));
        assert!(item.holdability.is_holdable());
        assert_eq!(item.holdability.message.as_deref(), Some("Request this item"));
        assert_eq!(item.holdings.len(), 1);

        let holding = &item.holdings[0];
        assert_eq!(holding.call_number, "PS3545 .I345 Z5 1990");
        assert_eq!(holding.call_sequence, 1);
        assert!(holding.holdable);
        assert_eq!(holding.library.code, "ALDERMAN");
        assert!(holding.library.deliverable);
        assert_eq!(holding.shelving_key, "PS 03545.I345 Z5 1990");
        assert_eq!(holding.copies.len(), 2);

        let first = &holding.copies[0];
        assert_eq!(first.barcode, "X001234567");
        assert_eq!(first.current_location.code, "STACKS");
        assert_eq!(first.item_type.code, "BOOK");
        assert!(first.last_checkout.is_some());
        assert!(holding.copies[1].shadowed);
        assert_eq!(holding.copies[1].item_type, ItemType::default());
    }

    #[test]
    fn test_missing_key_is_an_error() {
        assert_eq!(
            decode_catalog_item("<catalogItem><status>1</status></catalogItem>").unwrap_err(),
            MappingError::Missing("catalogItem@key")
        );
    }

    #[test]
    fn test_wrong_root_is_an_error() {
        assert!(matches!(
            decode_catalog_item("<user computingId=\"mst3k\"/>"),
            Err(MappingError::UnexpectedRoot { .. })
        ));
    }

    #[test]
    fn test_malformed_xml_is_an_error() {
        assert!(matches!(
            decode_catalog_item("<catalogItem key=\"1\"><holding>"),
            Err(MappingError::Malformed(_))
        ));
        assert_eq!(decode_catalog_item("  ").unwrap_err(), MappingError::Empty);
    }

    #[test]
    fn test_invalid_scalar_is_an_error() {
        let xml = r#"<catalogItem key="1"><holding callSequence="first"/></catalogItem>"#;
        assert!(matches!(
            decode_catalog_item(xml),
            Err(MappingError::Invalid { field: "holding@callSequence", .. })
        ));
    }

    #[test]
    fn test_decode_lists() {
        let libraries = decode_libraries(
            r#"<libraries>
                 <library code="ALDERMAN" id="1"><name>Alderman</name><deliverable>true</deliverable></library>
                 <library code="IVY" id="2"><name>Ivy</name></library>
               </libraries>"#,
        )
        .unwrap();
        assert_eq!(libraries.len(), 2);
        assert!(libraries[0].deliverable);
        assert!(!libraries[1].holdable);

        let locations = decode_locations(
            r#"<locations><location code="STACKS" id="1"><name>Stacks</name></location></locations>"#,
        )
        .unwrap();
        assert_eq!(locations, vec![Location {
            id: Some("1".into()),
            code: "STACKS".into(),
            name: "Stacks".into(),
        }]);
    }

    #[test]
    fn test_decode_user() {
        let xml = r#"<user computingId="mst3k" sirsiId="123" key="55">
            <displayName>Mike Nelson</displayName>
            <barred>false</barred>
            <totalCheckouts>1</totalCheckouts>
            <checkout>
              <catalogItem key="2470431">
                <holding callNumber="PS3545 .I345" callSequence="1"/>
              </catalogItem>
              <dateDue>2026-11-01</dateDue>
              <overdue>false</overdue>
              <numberRenewals>2</numberRenewals>
            </checkout>
            <hold key="h1">
              <catalogItem key="99"/>
              <pickupLibrary code="CLEMONS"><name>Clemons</name></pickupLibrary>
              <type>COPY</type>
              <active>true</active>
            </hold>
          </user>"#;
        let user = decode_user(xml).unwrap();
        assert_eq!(user.computing_id, "mst3k");
        assert_eq!(user.display_name.as_deref(), Some("Mike Nelson"));
        assert!(user.can_make_requests());
        assert_eq!(user.checkouts.len(), 1);
        assert!(user.checkouts[0].matches("2470431", "PS3545 .I345"));
        assert_eq!(user.checkouts[0].number_renewals, 2);
        assert!(user.checkouts[0].date_due.is_some());
        assert_eq!(user.holds[0].hold_type.as_deref(), Some("COPY"));
        assert!(user.holds[0].active);
    }

    #[test]
    fn test_decode_violation() {
        let violation = decode_violation(
            "<FirehoseViolation><code>hatNoItems</code><message>There are no items available</message></FirehoseViolation>",
        )
        .unwrap()
        .unwrap();
        assert_eq!(violation.code.as_deref(), Some("hatNoItems"));
        assert!(violation.message_contains("no items"));

        assert_eq!(decode_violation("<ok/>").unwrap(), None);
    }

    #[test]
    fn test_decode_json_item() {
        let json = r#"{"key":"77","status":1,"holdability":{"value":"no","message":null},
            "holdings":[{"call_sequence":1,"call_number":"QA76","library":{"id":null,"code":"SCI","name":"Science"},
            "copies":[{"copy_number":1,"barcode":"X9","last_checkout":null,
              "current_location":{"id":null,"code":"STACKS","name":"Stacks"},
              "home_location":{"id":null,"code":"STACKS","name":"Stacks"}}]}]}"#;
        let item = decode_catalog_item_json(json).unwrap();
        assert_eq!(item.key, "77");
        assert_eq!(item.holdings[0].copies[0].barcode, "X9");
        assert!(matches!(decode_catalog_item_json("{"), Err(MappingError::Json(_))));
    }
}
