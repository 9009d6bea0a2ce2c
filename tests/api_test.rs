use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use lateshow::model::{NewEpisode, NewGuest};
use lateshow::{app, connect_in_memory, AppState, ShowService};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tower::ServiceExt;

async fn seeded_app() -> (Router, SqlitePool) {
    let pool = connect_in_memory().await.unwrap();
    ShowService::insert_episode(&pool, &NewEpisode { id: Some(1), date: Some("1-1".into()), number: Some(1) })
        .await
        .unwrap();
    ShowService::insert_episode(&pool, &NewEpisode { id: Some(2), date: Some("1-2".into()), number: Some(2) })
        .await
        .unwrap();
    ShowService::insert_guest(&pool, &NewGuest { id: Some(1), name: Some("A".into()), occupation: "actor".into() })
        .await
        .unwrap();
    (app(AppState::new(pool.clone())), pool)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(v) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn post_appearance(app: &Router, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, "/appearances", Some(body)).await
}

#[tokio::test]
async fn index_welcomes() {
    let (app, _) = seeded_app().await;
    let (status, body) = send(&app, Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Welcome to the lateshow."}));
}

#[tokio::test]
async fn scenario_create_appearance() {
    let (app, _) = seeded_app().await;
    let (status, body) = post_appearance(&app, json!({"rating": 3, "episode_id": 1, "guest_id": 1})).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["rating"], 3);
    assert_eq!(body["episode_id"], 1);
    assert_eq!(body["guest_id"], 1);
    assert_eq!(body["episode"]["id"], 1);
    assert_eq!(body["guest"]["id"], 1);
    assert!(body["id"].is_i64());
    assert!(body["episode"].get("appearances").is_none());
    assert!(body["guest"].get("appearances").is_none());
}

#[tokio::test]
async fn every_valid_rating_round_trips() {
    let (app, pool) = seeded_app().await;
    for r in 1..=5 {
        let (status, body) = post_appearance(&app, json!({"rating": r, "episode_id": 1, "guest_id": 1})).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["rating"], r);
    }
    assert_eq!(ShowService::count_appearances(&pool).await.unwrap(), 5);
}

#[tokio::test]
async fn out_of_range_ratings_are_422_and_persist_nothing() {
    let (app, pool) = seeded_app().await;
    for r in [json!(0), json!(6), json!(-1), json!(100), json!(2.5), json!("3"), Value::Null] {
        let (status, body) = post_appearance(&app, json!({"rating": r, "episode_id": 1, "guest_id": 1})).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body, json!({"errors": ["Rating must be between 1 and 5."]}));
    }
    assert_eq!(ShowService::count_appearances(&pool).await.unwrap(), 0);
}

#[tokio::test]
async fn unknown_references_are_404_and_persist_nothing() {
    let (app, pool) = seeded_app().await;
    for body in [
        json!({"rating": 3, "episode_id": 99, "guest_id": 1}),
        json!({"rating": 3, "episode_id": 1, "guest_id": 99}),
        json!({"rating": 3}),
    ] {
        let (status, body) = post_appearance(&app, body).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"errors": ["Episode or guest not found."]}));
    }
    assert_eq!(ShowService::count_appearances(&pool).await.unwrap(), 0);
}

#[tokio::test]
async fn string_ids_resolve() {
    let (app, _) = seeded_app().await;
    let (status, body) = post_appearance(&app, json!({"rating": 3, "episode_id": "1", "guest_id": "1"})).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["episode_id"], 1);
    assert_eq!(body["guest"]["id"], 1);

    let (status, _) = post_appearance(&app, json!({"rating": 3, "episode_id": "one", "guest_id": 1})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn float_ids_resolve() {
    let (app, pool) = seeded_app().await;
    let (status, body) = post_appearance(&app, json!({"rating": 2, "episode_id": 2.0, "guest_id": 1.0})).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["episode"]["id"], 2);
    assert_eq!(body["guest_id"], 1);

    let (status, _) = post_appearance(&app, json!({"rating": 2, "episode_id": 1.5, "guest_id": 1})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(ShowService::count_appearances(&pool).await.unwrap(), 1);
}

#[tokio::test]
async fn missing_reference_wins_over_bad_rating() {
    let (app, _) = seeded_app().await;
    let (status, _) = post_appearance(&app, json!({"rating": 42, "episode_id": 99, "guest_id": 1})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_body_is_400() {
    let (app, _) = seeded_app().await;
    let req = Request::builder()
        .method(Method::POST)
        .uri("/appearances")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let res = app.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let (status, body) = post_appearance(&app, json!([1, 2, 3])).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"].is_array());
}

#[tokio::test]
async fn episode_list_never_has_appearances() {
    let (app, _) = seeded_app().await;
    post_appearance(&app, json!({"rating": 3, "episode_id": 1, "guest_id": 1})).await;
    let (status, body) = send(&app, Method::GET, "/episodes", None).await;
    assert_eq!(status, StatusCode::OK);
    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0], json!({"id": 1, "date": "1-1", "number": 1}));
    assert!(list.iter().all(|e| e.get("appearances").is_none()));
}

#[tokio::test]
async fn episode_detail_always_has_appearances() {
    let (app, _) = seeded_app().await;
    post_appearance(&app, json!({"rating": 4, "episode_id": 1, "guest_id": 1})).await;

    let (status, body) = send(&app, Method::GET, "/episodes/1", None).await;
    assert_eq!(status, StatusCode::OK);
    let appearances = body["appearances"].as_array().unwrap();
    assert_eq!(appearances.len(), 1);
    assert_eq!(appearances[0]["rating"], 4);
    assert_eq!(appearances[0]["guest"], json!({"id": 1, "name": "A", "occupation": "actor"}));

    let (status, body) = send(&app, Method::GET, "/episodes/2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["appearances"], json!([]));
}

#[tokio::test]
async fn unknown_episode_is_404() {
    let (app, _) = seeded_app().await;
    for uri in ["/episodes/999", "/episodes/abc", "/episodes/+1", "/episodes/-1", "/episodes/1.0"] {
        let (status, body) = send(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "Episode not found."}));
    }
}

#[tokio::test]
async fn guest_list_never_has_appearances() {
    let (app, _) = seeded_app().await;
    post_appearance(&app, json!({"rating": 2, "episode_id": 1, "guest_id": 1})).await;
    let (status, body) = send(&app, Method::GET, "/guests", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{"id": 1, "name": "A", "occupation": "actor"}]));
}

#[tokio::test]
async fn deleted_episode_takes_its_appearances() {
    let (app, pool) = seeded_app().await;
    post_appearance(&app, json!({"rating": 2, "episode_id": 1, "guest_id": 1})).await;
    post_appearance(&app, json!({"rating": 5, "episode_id": 2, "guest_id": 1})).await;
    assert!(ShowService::delete_episode(&pool, 1).await.unwrap());
    assert_eq!(ShowService::count_appearances(&pool).await.unwrap(), 1);
    let (status, _) = send(&app, Method::GET, "/episodes/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn persistence_failure_is_500_with_message() {
    let (app, pool) = seeded_app().await;
    pool.close().await;
    let (status, body) = post_appearance(&app, json!({"rating": 3, "episode_id": 1, "guest_id": 1})).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let errors = body["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert!(!errors[0].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn failed_insert_is_500_and_rolled_back() {
    let (app, pool) = seeded_app().await;
    sqlx::query(
        "CREATE TRIGGER appearances_frozen BEFORE INSERT ON appearances \
         BEGIN SELECT RAISE(ABORT, 'appearances are frozen'); END",
    )
    .execute(&pool)
    .await
    .unwrap();

    let (status, body) = post_appearance(&app, json!({"rating": 3, "episode_id": 1, "guest_id": 1})).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let errors = body["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].as_str().unwrap().contains("appearances are frozen"));
    assert_eq!(ShowService::count_appearances(&pool).await.unwrap(), 0);

    // The connection is usable again after the rollback.
    let (status, _) = send(&app, Method::GET, "/episodes/1", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn operational_routes() {
    let (app, pool) = seeded_app().await;
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));

    let (status, body) = send(&app, Method::GET, "/version", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "lateshow");

    let (status, body) = send(&app, Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], "ok");

    pool.close().await;
    let (status, body) = send(&app, Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body, json!({"errors": ["database unavailable"]}));
}
