//! Router tests: requests go through the full axum stack in-process

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
};
use holdings_engine::error::GatewayError;
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::support::{self, ScriptedTransport, ITEM, USER_CHECKOUTS};

async fn send(app: axum::Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn test_health_check() {
    let app = support::app(ScriptedTransport::new());
    let (status, body) = send(app, Method::GET, "/api/v1/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_readiness_check() {
    let app = support::app(ScriptedTransport::new());
    let (status, body) = send(app, Method::GET, "/api/v1/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_resolve_availability() {
    let transport = ScriptedTransport::new();
    transport.ok("/items/2470431", ITEM);
    let app = support::app(transport);

    let request = json!({
        "document": {
            "id": "u2470431",
            "summary_holdings": ["Alderman|Stacks|v.1-20"]
        }
    });
    let (status, body) = send(app, Method::POST, "/api/v1/availability", Some(request)).await;
    assert_eq!(status, StatusCode::OK);

    let availability = &body["availability"];
    assert_eq!(body["document_id"], "u2470431");
    assert_eq!(availability["key"], "2470431");
    assert_eq!(availability["holdable"], true);
    assert_eq!(availability["holdings"].as_array().unwrap().len(), 3);
    assert_eq!(availability["lost"][0], json!({"library": "Alderman", "note": "lost"}));
    assert_eq!(availability["summary_libraries"][0]["library"]["name"], "Alderman");
    assert_eq!(availability["holdings_by_library"][0], json!({"library": "ALDERMAN", "count": 1}));
}

#[tokio::test]
async fn test_unavailable_item_reports_no_information() {
    let transport = ScriptedTransport::new();
    transport.ok("/items/999", "<html>maintenance</html>");
    let app = support::app(transport);

    let (status, body) = send(app, Method::GET, "/api/v1/items/u999/availability", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["availability"].is_null());
    assert_eq!(body["message"], "No information available");
}

#[tokio::test]
async fn test_transient_failure_is_service_unavailable() {
    let transport = ScriptedTransport::new();
    transport.script("/items/999", Err(GatewayError::PrematureEof("end of file".into())));
    let app = support::app(transport);

    let (status, body) = send(app, Method::GET, "/api/v1/items/u999/availability", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], 30);
}

#[tokio::test]
async fn test_bad_document_id_is_not_found() {
    let app = support::app(ScriptedTransport::new());
    let (status, _) = send(app, Method::DELETE, "/api/v1/items/u/cache", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_discard_item_cache() {
    let transport = ScriptedTransport::new();
    transport.ok("/items/2470431", ITEM);
    let app = support::app(transport.clone());

    send(app.clone(), Method::GET, "/api/v1/items/u2470431/availability", None).await;
    let (status, _) = send(app.clone(), Method::DELETE, "/api/v1/items/u2470431/cache", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    send(app, Method::GET, "/api/v1/items/u2470431/availability", None).await;

    assert_eq!(transport.calls_to("/items/2470431"), 2);
}

#[tokio::test]
async fn test_checked_out() {
    let transport = ScriptedTransport::new();
    transport.ok("/items/2470431", ITEM);
    transport.ok("/users/mst3k/checkouts", USER_CHECKOUTS);
    let app = support::app(transport);

    let (status, body) = send(
        app,
        Method::GET,
        "/api/v1/users/mst3k/checked-out/u2470431?call_number=PS3545%20.I345%20Z5%201990",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["checked_out"], true);
}

#[tokio::test]
async fn test_libraries() {
    let transport = ScriptedTransport::new();
    transport.ok(
        "/list/libraries",
        r#"<libraries><library code="CLEMONS" id="3"><name>Clemons</name></library></libraries>"#,
    );
    let app = support::app(transport);

    let (status, body) = send(app, Method::GET, "/api/v1/libraries", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["code"], "CLEMONS");
}

#[tokio::test]
async fn test_hold_rejection_message() {
    let transport = ScriptedTransport::new();
    transport.ok(
        "/request/hold",
        "<FirehoseViolation><message>Item does not exist</message></FirehoseViolation>",
    );
    let app = support::app(transport);

    let request = json!({
        "computing_id": "mst3k",
        "document_id": "u2470431",
        "pickup_library": "CLEMONS",
        "call_number": "PS3545 .I345 Z5 1990"
    });
    let (status, body) = send(app, Method::POST, "/api/v1/requests/hold", Some(request)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["message"], "This item is not available for requests yet");
}

#[tokio::test]
async fn test_hold_needs_a_call_number_when_ambiguous() {
    let transport = ScriptedTransport::new();
    transport.ok("/items/2470431", ITEM);
    let app = support::app(transport);

    let request = json!({
        "computing_id": "mst3k",
        "document_id": "u2470431",
        "pickup_library": "CLEMONS"
    });
    let (status, _) = send(app, Method::POST, "/api/v1/requests/hold", Some(request)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_renew_all() {
    let transport = ScriptedTransport::new();
    transport.ok("/request/renewAll", "");
    let app = support::app(transport.clone());

    let (status, body) = send(app, Method::POST, "/api/v1/requests/renew-all", Some(json!({"computing_id": "mst3k"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(
        transport.last_form(),
        Some(vec![("computingId".to_string(), "mst3k".to_string())])
    );
}

#[tokio::test]
async fn test_openapi_document() {
    let app = support::app(ScriptedTransport::new());
    let (status, body) = send(app, Method::GET, "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/availability"].is_object());
}
