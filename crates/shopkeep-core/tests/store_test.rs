#![allow(clippy::unwrap_used)]

//! Store lifecycle tests against a mock backend.

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shopkeep_api::types::{CategoryDraft, OrderStatus, TagDraft};
use shopkeep_api::{ApiClient, TransportConfig};
use shopkeep_core::{
    AppStore, CoreError, MemorySessionPersistence, Session, SessionPersistence,
};

fn session(token: &str) -> Session {
    Session {
        token: Some(token.into()),
        id: Some(1),
        username: Some("admin".into()),
        permissions: vec!["ADMIN".into()],
    }
}

async fn app_store(server: &MockServer) -> AppStore {
    let api = ApiClient::new(&server.uri(), &TransportConfig::default()).unwrap();
    AppStore::new(
        Arc::new(api),
        Arc::new(MemorySessionPersistence::new()),
    )
}

// ── Lifecycle over the wire ──────────────────────────────────────────

#[tokio::test]
async fn fetch_sends_the_session_token_and_fills_the_store() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/categories"))
        .and(header("authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "Desks"},
            {"id": 2, "name": "Chairs"},
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let store = app_store(&server).await;
    store.auth.set_session(session("tok-1"));

    let items = store.categories.fetch_all().await.unwrap();
    assert_eq!(items.len(), 2);

    let state = store.categories.current();
    assert_eq!(state.items, items);
    assert_eq!(state.last_error, None);
    assert!(!state.in_flight.any_busy());
}

#[tokio::test]
async fn failed_fetch_empties_the_list_and_records_the_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1, "name": "Desks"}])))
        .expect(1)
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/categories"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"message": "database offline"})),
        )
        .mount(&server)
        .await;

    let store = app_store(&server).await;
    store.categories.fetch_all().await.unwrap();
    assert_eq!(store.categories.current().items.len(), 1);

    let err = store.categories.fetch_all().await.unwrap_err();
    assert!(matches!(err, CoreError::Api { status: Some(500), .. }));

    let state = store.categories.current();
    assert!(state.items.is_empty(), "stale items are dropped on failure");
    assert_eq!(state.last_error.as_deref(), Some("database offline"));
}

#[tokio::test]
async fn create_appends_and_clears_the_selection() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/tags"))
        .and(body_json(json!({"name": "sale"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 9, "name": "sale"})))
        .expect(1)
        .mount(&server)
        .await;

    let store = app_store(&server).await;
    store.tags.set_selected(shopkeep_api::types::Tag {
        id: 3,
        name: "old".into(),
    });

    let created = store
        .tags
        .create(&TagDraft { name: "sale".into() })
        .await
        .unwrap();
    assert_eq!(created.id, 9);

    let state = store.tags.current();
    assert_eq!(state.items, vec![created]);
    assert_eq!(state.selected, None);
}

#[tokio::test]
async fn update_replaces_the_matching_item_in_place() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "Desks"},
            {"id": 2, "name": "Chairs"},
        ])))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/categories/2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": 2, "name": "Seating"})),
        )
        .mount(&server)
        .await;

    let store = app_store(&server).await;
    store.categories.fetch_all().await.unwrap();
    store
        .categories
        .update(
            2,
            &CategoryDraft {
                name: "Seating".into(),
                description: None,
            },
        )
        .await
        .unwrap();

    let state = store.categories.current();
    assert_eq!(state.items.len(), 2);
    assert_eq!(state.items[1].name, "Seating");
    assert_eq!(state.items[0].name, "Desks");
    assert_eq!(state.selected, None);
}

#[tokio::test]
async fn delete_removes_exactly_the_matching_item() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "sale"},
            {"id": 2, "name": "new"},
        ])))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/tags/1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let store = app_store(&server).await;
    store.tags.fetch_all().await.unwrap();
    store.tags.delete(1).await.unwrap();

    let state = store.tags.current();
    assert_eq!(state.items.len(), 1);
    assert_eq!(state.items[0].id, 2);
}

#[tokio::test]
async fn overlapping_updates_land_last_write_wins() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/categories"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{"id": 1, "name": "Desks"}])),
        )
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/categories/1"))
        .and(body_json(json!({"name": "Slow", "description": null})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": 1, "name": "Slow"}))
                .set_delay(Duration::from_millis(200)),
        )
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/categories/1"))
        .and(body_json(json!({"name": "Fast", "description": null})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1, "name": "Fast"})))
        .mount(&server)
        .await;

    let store = app_store(&server).await;
    store.categories.fetch_all().await.unwrap();

    let slow_draft = CategoryDraft {
        name: "Slow".into(),
        description: None,
    };
    let fast_draft = CategoryDraft {
        name: "Fast".into(),
        description: None,
    };
    let slow = store.categories.update(1, &slow_draft);
    let fast = store.categories.update(1, &fast_draft);
    let (slow, fast) = tokio::join!(slow, fast);
    slow.unwrap();
    fast.unwrap();

    // The delayed response resolves after the fast one, so its payload
    // is the one left in the store.
    assert_eq!(store.categories.current().items[0].name, "Slow");
}

// ── Relationship edits ───────────────────────────────────────────────

#[tokio::test]
async fn role_grant_refreshes_the_selected_user_only_when_it_matches() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "username": "amara", "enabled": true, "roles": []},
            {"id": 2, "username": "bode", "enabled": true, "roles": []},
        ])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/users/1/roles/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1,
            "username": "amara",
            "enabled": true,
            "roles": [{"id": 5, "name": "MANAGER", "permissions": []}],
        })))
        .mount(&server)
        .await;

    let store = app_store(&server).await;
    store.users.fetch_all().await.unwrap();
    let bode = store.users.current().items[1].clone();
    store.users.set_selected(bode.clone());

    let updated = store.users.add_role(1, 5).await.unwrap();
    assert_eq!(updated.roles.len(), 1);

    let state = store.users.current();
    assert_eq!(state.items[0].roles.len(), 1, "amara gained the role");
    assert_eq!(state.selected, Some(bode), "unrelated selection untouched");
}

// ── Order status ─────────────────────────────────────────────────────

#[tokio::test]
async fn status_update_goes_to_the_wire_and_refreshes_the_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/orders/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 10, "userId": 1, "status": "PENDING", "totalAmount": 40.0},
        ])))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/orders/10/status"))
        .and(wiremock::matchers::query_param("status", "CONFIRMED"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({"id": 10, "userId": 1, "status": "CONFIRMED", "totalAmount": 40.0}),
        ))
        .expect(1)
        .mount(&server)
        .await;

    let store = app_store(&server).await;
    store.orders.fetch_all().await.unwrap();

    let order = store
        .orders
        .update_status(10, OrderStatus::Confirmed)
        .await
        .unwrap();
    assert_eq!(order.status, OrderStatus::Confirmed);
    assert_eq!(store.orders.current().items[0].status, OrderStatus::Confirmed);
}

#[tokio::test]
async fn status_update_forwards_any_status_the_caller_chose() {
    // Transition legality is a presentation concern; the store forwards
    // whatever it is given and the backend has the final say.
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/orders/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 10, "userId": 1, "status": "PENDING", "totalAmount": 40.0},
        ])))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/orders/10/status"))
        .and(wiremock::matchers::query_param("status", "DELIVERED"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({"id": 10, "userId": 1, "status": "DELIVERED", "totalAmount": 40.0}),
        ))
        .mount(&server)
        .await;

    let store = app_store(&server).await;
    store.orders.fetch_all().await.unwrap();

    let order = store
        .orders
        .update_status(10, OrderStatus::Delivered)
        .await
        .unwrap();
    assert_eq!(order.status, OrderStatus::Delivered);
}

// ── Session persistence ──────────────────────────────────────────────

#[tokio::test]
async fn persistence_task_writes_the_session_through_on_every_change() {
    let server = MockServer::start().await;
    let api = ApiClient::new(&server.uri(), &TransportConfig::default()).unwrap();
    let persistence = Arc::new(MemorySessionPersistence::new());
    let store = Arc::new(AppStore::new(
        Arc::new(api),
        Arc::clone(&persistence) as Arc<dyn SessionPersistence>,
    ));

    let task = {
        let store = Arc::clone(&store);
        tokio::spawn(async move { store.persistence_task().await })
    };

    store.auth.set_session(session("tok-2"));
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(persistence.load(), Some(session("tok-2")));

    store.auth.clear_session();
    store.reset_resources();
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(persistence.load(), None, "logout leaves no persisted copy");

    task.abort();
}

#[tokio::test]
async fn app_store_rehydrates_the_session_at_construction() {
    let server = MockServer::start().await;
    let api = ApiClient::new(&server.uri(), &TransportConfig::default()).unwrap();
    let persistence = Arc::new(MemorySessionPersistence::new());
    persistence.save(&session("tok-3"));

    let store = AppStore::new(
        Arc::new(api),
        Arc::clone(&persistence) as Arc<dyn SessionPersistence>,
    );
    assert_eq!(store.auth.current(), session("tok-3"));
    assert!(store.auth.current().is_authenticated());
}
