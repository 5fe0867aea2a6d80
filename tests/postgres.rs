//! Round trips against a real PostgreSQL.
//! Run with: DB_HOST=... DB_NAME=... DB_USER=... DB_PASSWORD=... cargo test -- --ignored

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::sync::OnceCell;
use tower::ServiceExt;
use user_registry::{
    app, ensure_schema, AppState, ConnectionProvider, DbConfig, Link, NewUser, PgUserStore, QueryExecutor, Role,
    UserStore,
};

/// Tests run in parallel; concurrent CREATE TABLE IF NOT EXISTS on a fresh database can collide.
static SCHEMA: OnceCell<()> = OnceCell::const_new();

async fn executor() -> QueryExecutor {
    let config = DbConfig::from_env().expect("DB_* environment variables required");
    let executor = QueryExecutor::new(ConnectionProvider::new(&config));
    SCHEMA
        .get_or_init(|| async { ensure_schema(&executor).await.expect("schema bootstrap failed") })
        .await;
    executor
}

/// Emails unique per run so the test can share a database with earlier runs.
fn unique(prefix: &str) -> String {
    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
    format!("{}-{}-{}@example.com", prefix, std::process::id(), nanos)
}

async fn post(router: &axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
#[ignore = "requires database"]
async fn register_link_and_list() {
    let executor = executor().await;
    let store = PgUserStore::new(executor);
    let router = app(AppState::new(store.clone()), 64 * 1024);

    let admin_email = unique("admin");
    let non_admin_email = unique("member");

    let (status, admin) = post(
        &router,
        "/api/registerUser",
        json!({ "name": "Ann", "email": admin_email, "role": "SuperAdmin" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, member) = post(
        &router,
        "/api/registerUser",
        json!({ "name": "Nia", "email": non_admin_email, "role": "Non-Admin" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = post(
        &router,
        "/api/registerUser",
        json!({ "name": "Nia again", "email": non_admin_email, "role": "Non-Admin" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Email must be unique.");

    let (status, _) = post(
        &router,
        "/api/linkAdminToNonAdmin",
        json!({ "admin_email": admin_email, "non_admin_email": unique("ghost") }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = post(
        &router,
        "/api/linkAdminToNonAdmin",
        json!({ "admin_email": admin_email, "non_admin_email": non_admin_email }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(
        store.admin_id_by_email(&admin_email).await.unwrap().map(i64::from),
        admin["id"].as_i64()
    );
    assert_eq!(
        store.non_admin_id_by_email(&non_admin_email).await.unwrap().map(i64::from),
        member["id"].as_i64()
    );

    let admin_id = admin["id"].as_i64().unwrap() as i32;
    let member_id = member["id"].as_i64().unwrap() as i32;
    assert_eq!(
        store.links_for_admin(admin_id).await.unwrap(),
        vec![Link {
            admin_id,
            non_admin_id: member_id,
            admin_email: admin_email.clone(),
        }]
    );

    let users = store.list_users().await.unwrap();
    let ann = users.iter().find(|u| u.email == admin_email).unwrap();
    assert_eq!(ann.role, Role::SuperAdmin);
    assert!(ann.permissions.unwrap().manage_users);
    let nia = users.iter().find(|u| u.email == non_admin_email).unwrap();
    assert_eq!(nia.family_member_count, Some(0));
}

#[tokio::test]
#[ignore = "requires database"]
async fn save_returns_generated_id() {
    let executor = executor().await;
    let user = NewUser::new("Ann", unique("save"), "Admin", None).unwrap();
    let id = user.save_to_db(&executor).await.unwrap();
    assert!(id > 0);
    let store = PgUserStore::new(executor);
    assert_eq!(store.admin_id_by_email(user.email()).await.unwrap(), Some(id));
    store.ping().await.unwrap();
}
