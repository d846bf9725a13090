//! Availability resolution through the cached gateway

use holdings_engine::{
    classifier::HoldLibrary,
    error::{AppError, GatewayError},
    models::BibDocument,
    repository::{CacheOptions, HttpReply},
};

use crate::support::{self, ScriptedTransport, ITEM, USER_CHECKOUTS};

const ITEM_PATH: &str = "/items/2470431";

#[tokio::test]
async fn test_find_weeds_and_orders_holdings() {
    let transport = ScriptedTransport::new();
    transport.ok(ITEM_PATH, ITEM);
    let (services, _) = support::services(transport.clone());

    let availability = services
        .availability
        .find(BibDocument::new("u2470431"), None, &CacheOptions::default())
        .await
        .unwrap()
        .expect("availability");

    let codes: Vec<_> = availability
        .holdings()
        .iter()
        .map(|h| h.library.code.as_str())
        .collect();
    assert_eq!(codes, vec!["ALDERMAN", "SPEC-COLL", "IVY"]);
    assert_eq!(availability.holdings()[2].library.hold_library(), Some(HoldLibrary::Ivy));

    // the lost copy is reported, not shown
    assert_eq!(availability.holdings()[0].copies.len(), 1);
    assert_eq!(availability.lost().get("Alderman").map(String::as_str), Some("lost"));

    // in process at special collections with an SC-IVY home stays available
    assert!(availability.holdings()[1].copies[0].is_available());

    assert!(availability.has_ivy_holdings());
    assert!(availability.is_leoable());
    assert!(availability.is_holdable());
    assert_eq!(availability.holdable_call_numbers().len(), 2);
    for holding in availability.holdings() {
        assert!(holding.available_copies() <= holding.existing_copies());
        assert!(!holding.copies.is_empty());
    }
}

#[tokio::test]
async fn test_cached_body_is_reused_until_discarded() {
    let transport = ScriptedTransport::new();
    transport.ok(ITEM_PATH, ITEM);
    let (services, _) = support::services(transport.clone());
    let document = || BibDocument::new("u2470431");

    services.availability.find(document(), None, &CacheOptions::default()).await.unwrap();
    services.availability.find(document(), None, &CacheOptions::default()).await.unwrap();
    assert_eq!(transport.calls_to(ITEM_PATH), 1);

    services.availability.discard("u2470431").await.unwrap();
    services.availability.find(document(), None, &CacheOptions::default()).await.unwrap();
    assert_eq!(transport.calls_to(ITEM_PATH), 2);

    services.availability.find(document(), None, &CacheOptions::refresh()).await.unwrap();
    assert_eq!(transport.calls_to(ITEM_PATH), 3);
}

#[tokio::test]
async fn test_connection_reset_propagates_and_purges() {
    let transport = ScriptedTransport::new();
    transport.script(ITEM_PATH, Err(GatewayError::ConnectionReset("Connection reset by peer".into())));
    transport.ok(ITEM_PATH, ITEM);
    let (services, store) = support::services(transport.clone());

    let result = services
        .availability
        .find(BibDocument::new("u2470431"), None, &CacheOptions::default())
        .await;
    assert!(matches!(result, Err(AppError::Ils(GatewayError::ConnectionReset(_)))));
    assert_eq!(store.len().await, 0);

    // a retry goes back to the ILS
    let retried = services
        .availability
        .find(BibDocument::new("u2470431"), None, &CacheOptions::default())
        .await
        .unwrap();
    assert!(retried.is_some());
    assert_eq!(transport.calls_to(ITEM_PATH), 2);
}

#[tokio::test]
async fn test_unreadable_body_degrades_to_nothing() {
    let transport = ScriptedTransport::new();
    transport.script(ITEM_PATH, Ok(HttpReply::new(200, "<catalogItem key=\"2470431\"><holding>")));
    let (services, store) = support::services(transport.clone());

    let result = services
        .availability
        .find(BibDocument::new("u2470431"), None, &CacheOptions::default())
        .await
        .unwrap();
    assert!(result.is_none());
    assert_eq!(store.len().await, 0);
}

#[tokio::test]
async fn test_barcode_allow_list_limits_copies() {
    let transport = ScriptedTransport::new();
    transport.ok(ITEM_PATH, ITEM);
    let (services, _) = support::services(transport);

    let availability = services
        .availability
        .find(
            BibDocument::new("u2470431"),
            Some(vec!["X0004".to_string()]),
            &CacheOptions::default(),
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(availability.holdings().len(), 1);
    assert_eq!(availability.holdings()[0].library.code, "IVY");
}

#[tokio::test]
async fn test_user_has_checked_out() {
    let transport = ScriptedTransport::new();
    transport.ok(ITEM_PATH, ITEM);
    transport.ok("/users/mst3k/checkouts", USER_CHECKOUTS);
    let (services, _) = support::services(transport);
    let options = CacheOptions::default();

    let availability = services
        .availability
        .find(BibDocument::new("u2470431"), None, &options)
        .await
        .unwrap()
        .unwrap();
    let user = services.accounts.user_with_checkouts("mst3k", &options).await.unwrap();

    assert!(availability.user_has_checked_out(&user, Some("PS3545 .I345 Z5 1990")));
    assert!(!availability.user_has_checked_out(&user, Some("PS3545 .I345 Z5 1990 c.2")));
    // two holdable call numbers, so none is assumed
    assert!(!availability.user_has_checked_out(&user, None));
}

#[tokio::test]
async fn test_hold_rejected_with_no_items() {
    let transport = ScriptedTransport::new();
    transport.ok(
        "/request/hold",
        "<FirehoseViolation><code>hold.error</code><message>There were no items available</message></FirehoseViolation>",
    );
    let (services, _) = support::services(transport.clone());

    let err = services
        .requests
        .place_hold("mst3k", "2470431", "CLEMONS", "PS3545 .I345 Z5 1990")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Hold(ref m) if m == "There were no items to request"));

    let form = transport.last_form().unwrap();
    assert!(form.contains(&("pickupLibraryId".to_string(), "CLEMONS".to_string())));
}
