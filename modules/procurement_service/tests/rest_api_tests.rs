//! HTTP surface tests driving the full router over in-memory repositories.

mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use common::TestEnv;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("infallible router");
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::String(
            String::from_utf8_lossy(&bytes).into_owned(),
        ))
    };
    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn patch_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("PATCH")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn put(uri: &str) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn ping_answers_pong() {
    let router = TestEnv::new().into_router();

    let response = router
        .oneshot(get("/api/ping"))
        .await
        .expect("infallible router");
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"pong");
}

#[tokio::test]
async fn employee_creation_and_duplicate_username() {
    let router = TestEnv::new().into_router();

    let req = json!({
        "username": "carol",
        "firstName": "Carol",
        "lastName": "Smith"
    });
    let (status, body) = send(&router, post_json("/api/employees/new", req.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "carol");
    assert_eq!(body["firstName"], "Carol");

    let (status, _) = send(&router, post_json("/api/employees/new", req)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn tender_create_edit_rollback_over_http() {
    let env = TestEnv::new();
    let org_id = env.org_id;
    let router = env.into_router();

    let (status, created) = send(
        &router,
        post_json(
            "/api/tenders/new",
            json!({
                "name": "Road works",
                "description": "Resurface the ring road",
                "serviceType": "Construction",
                "organizationId": org_id,
                "creatorUsername": "alice"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["version"], 1);
    assert_eq!(created["status"], "Created");
    assert_eq!(created["serviceType"], "Construction");
    let id = created["id"].as_str().unwrap().to_string();

    let (status, edited) = send(
        &router,
        patch_json(
            &format!("/api/tenders/{id}/edit?username=alice"),
            json!({ "name": "Road works, phase 2" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(edited["version"], 2);
    assert_eq!(edited["name"], "Road works, phase 2");

    let (status, rolled) = send(
        &router,
        put(&format!("/api/tenders/{id}/rollback/1?username=alice")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rolled["version"], 3);
    assert_eq!(rolled["name"], "Road works");
}

#[tokio::test]
async fn missing_username_is_unauthorized() {
    let env = TestEnv::new();
    let tender = env.alice_tender("T").await;
    let router = env.into_router();

    let (status, body) = send(&router, get(&format!("/api/tenders/{}/status", tender.id))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["status"], 401);
}

#[tokio::test]
async fn unknown_tender_is_not_found() {
    let router = TestEnv::new().into_router();

    let (status, _) = send(
        &router,
        get(&format!(
            "/api/tenders/{}/status?username=alice",
            uuid::Uuid::new_v4()
        )),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_status_value_is_bad_request() {
    let env = TestEnv::new();
    let tender = env.alice_tender("T").await;
    let router = env.into_router();

    let (status, _) = send(
        &router,
        put(&format!(
            "/api/tenders/{}/status?status=Opened&username=alice",
            tender.id
        )),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &router,
        get(&format!("/api/tenders/{}/status?username=alice", tender.id)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("Created".to_string()));
}

#[tokio::test]
async fn tender_list_defaults_to_five_items() {
    let env = TestEnv::new();
    for i in 0..7 {
        env.alice_tender(&format!("Tender {i}")).await;
    }
    let router = env.into_router();

    let (status, body) = send(&router, get("/api/tenders")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(5));

    let (status, body) = send(&router, get("/api/tenders?limit=2&offset=6")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn malformed_pagination_is_bad_request() {
    let env = TestEnv::new();
    env.alice_tender("T").await;
    let router = env.into_router();

    let (status, _) = send(&router, get("/api/tenders?limit=abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&router, get("/api/tenders?offset=-1")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // well-formed values still pass
    let (status, _) = send(&router, get("/api/tenders?limit=3&offset=0")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn bid_flow_over_http() {
    let env = TestEnv::new();
    let tender = env.alice_tender("T").await;
    let bob_id = env.bob.id;
    let router = env.into_router();

    let (status, bid) = send(
        &router,
        post_json(
            "/api/bids/new",
            json!({
                "name": "Offer",
                "description": "good price",
                "tenderId": tender.id,
                "authorType": "User",
                "authorId": bob_id
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bid["version"], 1);
    assert_eq!(bid["authorType"], "User");
    // the bid response never carries the description
    assert!(bid.get("description").is_none());
    let id = bid["id"].as_str().unwrap().to_string();

    let (status, decided) = send(
        &router,
        put(&format!(
            "/api/bids/{id}/submit_decision?decision=Approved&username=bob"
        )),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(decided["status"], "Created");
    assert_eq!(decided["version"], 1);

    let (status, _) = send(
        &router,
        put(&format!(
            "/api/bids/{id}/feedback?bidFeedback=solid%20offer&username=alice"
        )),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, reviews) = send(
        &router,
        get(&format!(
            "/api/bids/{}/reviews?authorUsername=bob&requesterUsername=alice",
            tender.id
        )),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let reviews = reviews.as_array().unwrap();
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0]["description"], "solid offer");
}
