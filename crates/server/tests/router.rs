use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use http_body_util::BodyExt;
use sea_orm::{ConnectionTrait, Database, Statement};
use serde_json::{Value, json};
use tower::ServiceExt;

use engine::Engine;
use migration::MigratorTrait;

async fn app() -> Router {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let backend = db.get_database_backend();
    for user in ["alice", "bob", "carol"] {
        db.execute(Statement::from_sql_and_values(
            backend,
            "INSERT INTO users (username, password) VALUES (?, ?)",
            vec![user.into(), "password".into()],
        ))
        .await
        .unwrap();
    }
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    server::router(engine, db)
}

fn basic(user: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{user}:{password}")))
}

async fn call(
    app: &Router,
    method: &str,
    uri: &str,
    user: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, basic(user, "password"));
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

/// Company + asset owned by alice; returns the asset id.
async fn new_asset(app: &Router) -> String {
    let (status, company) = call(app, "POST", "/companies", "alice", Some(json!({"name": "Acme"}))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, asset) = call(
        app,
        "POST",
        "/assets",
        "alice",
        Some(json!({
            "name": "House",
            "kind": "real_estate",
            "company_id": company["id"],
            "bank_id": null,
            "value_minor": 25_000_000
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    asset["id"].as_str().unwrap().to_string()
}

async fn invite(app: &Router, asset_id: &str, receiver: &str, share: f64) -> (StatusCode, Value) {
    call(
        app,
        "POST",
        "/invitations",
        "alice",
        Some(json!({
            "asset_id": asset_id,
            "receiver_id": receiver,
            "share_percentage": share,
            "message": null
        })),
    )
    .await
}

#[tokio::test]
async fn wrong_password_is_unauthorized() {
    let app = app().await;
    let request = Request::builder()
        .uri("/assets")
        .header(header::AUTHORIZATION, basic("alice", "nope"))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn invitation_flow_and_revenue_split() {
    let app = app().await;
    let asset_id = new_asset(&app).await;

    let (status, invitation) = invite(&app, &asset_id, "bob", 40.0).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(invitation["status"], "pending");

    let uri = format!("/invitations/{}/accept", invitation["id"].as_str().unwrap());
    let (status, response) = call(&app, "POST", &uri, "bob", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["invitation"]["status"], "accepted");
    assert_eq!(response["partnership"]["share_percentage"], 40.0);

    // Answering again conflicts.
    let (status, _) = call(&app, "POST", &uri, "bob", None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, revenue) = call(
        &app,
        "POST",
        "/revenues",
        "alice",
        Some(json!({
            "asset_id": asset_id,
            "amount_minor": 1000,
            "source": "rent",
            "note": null,
            "occurred_at": "2026-10-01T12:00:00+02:00"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(revenue["kind"], "revenue");
    assert_eq!(revenue["allocations"][0]["user_id"], "bob");
    assert_eq!(revenue["allocations"][0]["amount_minor"], 400);
    assert_eq!(revenue["allocations"][1]["user_id"], "alice");
    assert_eq!(revenue["allocations"][1]["amount_minor"], 600);

    let (status, position) = call(&app, "GET", "/position", "bob", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(position["net_minor"], 400);

    let (status, summary) = call(
        &app,
        "GET",
        &format!("/assets/{asset_id}/partnerships"),
        "bob",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["available_percentage"], 60.0);
}

#[tokio::test]
async fn errors_map_to_status_codes() {
    let app = app().await;
    let asset_id = new_asset(&app).await;

    // Carol cannot see alice's asset.
    let (status, _) = call(&app, "GET", &format!("/assets/{asset_id}"), "carol", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = invite(&app, &asset_id, "bob", 150.0).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, first) = invite(&app, &asset_id, "bob", 80.0).await;
    let (_, second) = invite(&app, &asset_id, "carol", 30.0).await;
    let accept = |invitation: &Value| format!("/invitations/{}/accept", invitation["id"].as_str().unwrap());

    let (status, _) = call(&app, "POST", &accept(&first), "bob", None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = call(&app, "POST", &accept(&second), "carol", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("Capacity exceeded"));

    let uri = format!("/invitations/{}/maybe", second["id"].as_str().unwrap());
    let (status, _) = call(&app, "POST", &uri, "carol", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = call(
        &app,
        "DELETE",
        &format!("/assets/{asset_id}/partnerships/alice"),
        "alice",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}
