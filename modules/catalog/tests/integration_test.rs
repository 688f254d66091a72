//! Router-level tests for the catalog module against the in-memory store.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use catalog::{config::CatalogConfig, CatalogModule};
use docstore::{
    bson::Document, Filter, InMemoryStore, ObjectId, StoreBackend, StoreEngine, StoreError,
    StoreResult,
};
use modkit::RestModule;
use serde_json::{json, Value};
use tower::ServiceExt;

fn app_with(store: Arc<dyn StoreBackend>) -> Router {
    CatalogModule::new(store, &CatalogConfig::default())
        .register_rest(Router::new())
        .unwrap()
}

fn app() -> Router {
    app_with(Arc::new(InMemoryStore::new()))
}

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            req = req.header(header::CONTENT_TYPE, "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };
    let resp = app.clone().oneshot(req.body(body).unwrap()).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

fn message(v: &Value) -> &str {
    v["message"].as_str().unwrap_or_default()
}

fn heat() -> Value {
    json!({
        "title": "  Heat ",
        "description": "LA crime saga",
        "releaseDate": "1995-12-15",
        "genre": ["crime", "drama"]
    })
}

/// Id from a "... id: <hex>" message.
fn id_of(v: &Value) -> String {
    message(v).rsplit(' ').next().unwrap().to_string()
}

#[tokio::test]
async fn genre_lifecycle() {
    let app = app();

    let (status, body) = call(&app, Method::GET, "/genre", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(message(&body), "There are no genres in the catalog");

    let (status, body) = call(&app, Method::POST, "/genre", Some(json!({"name": " comedy "}))).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = id_of(&body);
    assert_eq!(message(&body), format!("Genre comedy created, id: {id}"));

    let (status, body) = call(&app, Method::POST, "/genre", Some(json!({"name": "comedy"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(message(&body), "This category already exists");

    let (status, body) = call(&app, Method::GET, "/genre", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{"_id": id, "name": "comedy"}]));

    let (status, body) = call(&app, Method::DELETE, &format!("/genre/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(message(&body), format!("Genre with id: {id} deleted"));

    let (status, body) = call(&app, Method::DELETE, &format!("/genre/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(message(&body), format!("Genre with id {id} not found"));
}

#[tokio::test]
async fn genre_create_and_rename_validation() {
    let app = app();

    let (status, body) = call(&app, Method::POST, "/genre", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(message(&body), "Name is required");

    let (_, body) = call(&app, Method::POST, "/genre", Some(json!({"name": "noir"}))).await;
    let id = id_of(&body);

    let (status, body) =
        call(&app, Method::PATCH, &format!("/genre/{id}"), Some(json!({"name": "  "}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(message(&body), "Not valid name");

    let (status, body) =
        call(&app, Method::PATCH, &format!("/genre/{id}"), Some(json!({"name": "neo-noir"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(message(&body), format!("Genre with id: {id} edited"));

    let (_, body) = call(&app, Method::GET, "/genre", None).await;
    assert_eq!(body[0]["name"], "neo-noir");

    let missing = ObjectId::new().to_hex();
    let (status, body) =
        call(&app, Method::PATCH, &format!("/genre/{missing}"), Some(json!({"name": "x"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(message(&body), format!("Genre with id {missing} not found"));

    let (status, body) = call(&app, Method::DELETE, "/genre/all", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(message(&body), "All genres deleted");
    let (status, _) = call(&app, Method::GET, "/genre", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn movie_lifecycle() {
    let app = app();

    let (status, body) = call(&app, Method::GET, "/movies", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(message(&body), "There are no films in the catalog");

    let (status, body) = call(&app, Method::POST, "/movies", Some(heat())).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = id_of(&body);
    assert_eq!(message(&body), format!("Movie created, id: {id}"));

    let (status, body) = call(&app, Method::GET, &format!("/movies/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "_id": id,
            "title": "Heat",
            "description": "LA crime saga",
            "releaseDate": "1995-12-15T00:00:00Z",
            "genre": ["crime", "drama"]
        })
    );

    let (status, body) = call(
        &app,
        Method::PATCH,
        &format!("/movies/{id}"),
        Some(json!({"title": "Heat (1995)", "releaseDate": "02-July-1997"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(message(&body), format!("Movie with id: {id} edited"));

    let (_, body) = call(&app, Method::GET, &format!("/movies/{id}"), None).await;
    assert_eq!(body["title"], "Heat (1995)");
    assert_eq!(body["description"], "LA crime saga");
    assert_eq!(body["releaseDate"], "1997-07-02T00:00:00Z");

    let (status, body) = call(&app, Method::GET, "/movies", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(1));

    let (status, body) = call(&app, Method::DELETE, &format!("/movies/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(message(&body), format!("Movie with id: {id} deleted"));

    let (status, body) = call(&app, Method::GET, &format!("/movies/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(message(&body), format!("Movie with id {id} not found"));
}

#[tokio::test]
async fn movies_by_genre() {
    let app = app();
    call(&app, Method::POST, "/movies", Some(heat())).await;
    let mut other = heat();
    other["title"] = json!("Airplane!");
    other["genre"] = json!(["comedy"]);
    call(&app, Method::POST, "/movies", Some(other)).await;

    let (status, body) = call(&app, Method::GET, "/movies/genre/drama", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["title"], "Heat");

    let (status, body) = call(&app, Method::GET, "/movies/genre/western", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        message(&body),
        "There are no films in the catalog with genre: western"
    );
}

#[tokio::test]
async fn movie_create_validation_messages() {
    let app = app();
    let cases = [
        ("title", json!("   "), "Title is required"),
        ("description", Value::Null, "Description is required"),
        ("releaseDate", Value::Null, "Release date is required"),
        ("releaseDate", json!("someday"), "Release date is not a valid date"),
        ("genre", json!([]), "Genre must be not empty array of strings"),
        ("genre", json!("crime"), "Genre must be not empty array of strings"),
        ("genre", json!([1, 2]), "Genre must be not empty array of strings"),
    ];
    for (field, value, expected) in cases {
        let mut body = heat();
        body[field] = value;
        let (status, resp) = call(&app, Method::POST, "/movies", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{field}");
        assert_eq!(message(&resp), expected, "{field}");
    }

    let (status, _) = call(&app, Method::GET, "/movies", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND, "nothing was stored");
}

#[tokio::test]
async fn movie_patch_and_delete_edge_cases() {
    let app = app();
    let (_, body) = call(&app, Method::POST, "/movies", Some(heat())).await;
    let id = id_of(&body);

    let (status, body) = call(
        &app,
        Method::PATCH,
        &format!("/movies/{id}"),
        Some(json!({"genre": []})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(message(&body), "Genre must be not empty array of strings");

    let (status, _) = call(&app, Method::PATCH, &format!("/movies/{id}"), Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);

    let missing = ObjectId::new().to_hex();
    let (status, body) = call(
        &app,
        Method::PATCH,
        &format!("/movies/{missing}"),
        Some(json!({"title": "x"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(message(&body), format!("Movie with id {missing} not found"));

    let (status, _) = call(&app, Method::DELETE, &format!("/movies/{missing}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = call(&app, Method::DELETE, "/movies/all", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(message(&body), "All movies deleted");
    let (status, body) = call(&app, Method::GET, "/movies", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(message(&body), "There are no films in the catalog");
}

#[tokio::test]
async fn malformed_json_body_is_400() {
    let app = app();
    let req = Request::builder()
        .method(Method::POST)
        .uri("/movies")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"title\": "))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(!message(&body).is_empty());
}

/// Counts every store call and delegates to an in-memory store.
#[derive(Debug, Default)]
struct CountingStore {
    inner: InMemoryStore,
    calls: AtomicUsize,
}

impl CountingStore {
    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl StoreBackend for CountingStore {
    fn engine(&self) -> StoreEngine {
        StoreEngine::Memory
    }
    async fn find(&self, c: &str, f: &Filter) -> StoreResult<Vec<Document>> {
        self.hit();
        self.inner.find(c, f).await
    }
    async fn find_one(&self, c: &str, f: &Filter) -> StoreResult<Option<Document>> {
        self.hit();
        self.inner.find_one(c, f).await
    }
    async fn insert_one(&self, c: &str, d: Document) -> StoreResult<ObjectId> {
        self.hit();
        self.inner.insert_one(c, d).await
    }
    async fn update_by_id(&self, c: &str, id: ObjectId, set: Document) -> StoreResult<Option<Document>> {
        self.hit();
        self.inner.update_by_id(c, id, set).await
    }
    async fn delete_by_id(&self, c: &str, id: ObjectId) -> StoreResult<Option<Document>> {
        self.hit();
        self.inner.delete_by_id(c, id).await
    }
    async fn delete_many(&self, c: &str, f: &Filter) -> StoreResult<u64> {
        self.hit();
        self.inner.delete_many(c, f).await
    }
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
    async fn close(&self) -> StoreResult<()> {
        Ok(())
    }
}

#[tokio::test]
async fn invalid_ids_never_reach_the_store() {
    let store = Arc::new(CountingStore::default());
    let app = app_with(store.clone());

    for raw in ["123", "not-an-id", "6533836e919d683ce4eee55Z", "6533836e919d683ce4eee5591"] {
        for (method, uri, body) in [
            (Method::GET, format!("/movies/{raw}"), None),
            (Method::PATCH, format!("/movies/{raw}"), Some(json!({"title": "x"}))),
            (Method::DELETE, format!("/movies/{raw}"), None),
            (Method::PATCH, format!("/genre/{raw}"), Some(json!({"name": "x"}))),
            (Method::DELETE, format!("/genre/{raw}"), None),
        ] {
            let (status, resp) = call(&app, method.clone(), &uri, body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{method} {uri}");
            assert_eq!(message(&resp), "Not valid ID");
        }
    }
    assert_eq!(store.calls.load(Ordering::SeqCst), 0);

    // `all` is only an action for DELETE; every other `{id}` method rejects it.
    for (method, uri, body) in [
        (Method::GET, "/movies/all", None),
        (Method::PATCH, "/movies/all", Some(json!({"title": "x"}))),
        (Method::PATCH, "/genre/all", Some(json!({"name": "x"}))),
    ] {
        let (status, resp) = call(&app, method.clone(), uri, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{method} {uri}");
        assert_eq!(message(&resp), "Not valid ID", "{method} {uri}");
    }
    assert_eq!(store.calls.load(Ordering::SeqCst), 0);

    // Body validation also short-circuits before the store.
    call(&app, Method::POST, "/movies", Some(json!({"title": "x"}))).await;
    call(&app, Method::POST, "/genre", Some(json!({"name": ""}))).await;
    assert_eq!(store.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn undecodable_path_segments_get_a_json_message() {
    let store = Arc::new(CountingStore::default());
    let app = app_with(store.clone());

    for (method, uri) in [
        (Method::GET, "/movies/%FF"),
        (Method::DELETE, "/movies/%FF"),
        (Method::DELETE, "/genre/%FF"),
        (Method::GET, "/movies/genre/%FF"),
    ] {
        let req = Request::builder()
            .method(method.clone())
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let resp = app.clone().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{method} {uri}");
        assert_eq!(resp.headers()[header::CONTENT_TYPE], "application/json");
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert!(message(&body).contains("UTF-8"), "{method} {uri}: {body}");
    }
    assert_eq!(store.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn openapi_lists_every_catalog_operation() {
    let doc = CatalogModule::new(Arc::new(InMemoryStore::new()), &CatalogConfig::default())
        .openapi();
    let paths = &doc.paths.paths;
    let ops = |path: &str| {
        let item = paths
            .get(path)
            .unwrap_or_else(|| panic!("missing path {path}"));
        [
            ("get", item.get.is_some()),
            ("post", item.post.is_some()),
            ("patch", item.patch.is_some()),
            ("delete", item.delete.is_some()),
        ]
        .into_iter()
        .filter_map(|(name, present)| present.then_some(name))
        .collect::<Vec<_>>()
    };

    assert_eq!(ops("/movies"), ["get", "post"]);
    assert_eq!(ops("/movies/{id}"), ["get", "patch", "delete"]);
    assert_eq!(ops("/movies/all"), ["delete"]);
    assert_eq!(ops("/movies/genre/{genreName}"), ["get"]);
    assert_eq!(ops("/genre"), ["get", "post"]);
    assert_eq!(ops("/genre/{id}"), ["patch", "delete"]);
    assert_eq!(ops("/genre/all"), ["delete"]);
    assert_eq!(paths.len(), 7);
}

/// Fails every operation with the same message.
#[derive(Debug)]
struct FailingStore;

fn down<T>() -> StoreResult<T> {
    Err(StoreError::Connection("connection refused".into()))
}

#[async_trait]
impl StoreBackend for FailingStore {
    fn engine(&self) -> StoreEngine {
        StoreEngine::MongoDb
    }
    async fn find(&self, _: &str, _: &Filter) -> StoreResult<Vec<Document>> {
        down()
    }
    async fn find_one(&self, _: &str, _: &Filter) -> StoreResult<Option<Document>> {
        down()
    }
    async fn insert_one(&self, _: &str, _: Document) -> StoreResult<ObjectId> {
        down()
    }
    async fn update_by_id(&self, _: &str, _: ObjectId, _: Document) -> StoreResult<Option<Document>> {
        down()
    }
    async fn delete_by_id(&self, _: &str, _: ObjectId) -> StoreResult<Option<Document>> {
        down()
    }
    async fn delete_many(&self, _: &str, _: &Filter) -> StoreResult<u64> {
        down()
    }
    async fn ping(&self) -> StoreResult<()> {
        down()
    }
    async fn close(&self) -> StoreResult<()> {
        Ok(())
    }
}

#[tokio::test]
async fn store_failures_are_400_with_the_store_message() {
    let app = app_with(Arc::new(FailingStore));
    let id = ObjectId::new().to_hex();

    for (method, uri, body) in [
        (Method::GET, "/movies".to_string(), None),
        (Method::GET, "/movies/genre/drama".to_string(), None),
        (Method::GET, format!("/movies/{id}"), None),
        (Method::POST, "/movies".to_string(), Some(heat())),
        (Method::PATCH, format!("/movies/{id}"), Some(json!({"title": "x"}))),
        (Method::DELETE, format!("/movies/{id}"), None),
        (Method::DELETE, "/movies/all".to_string(), None),
        (Method::GET, "/genre".to_string(), None),
        (Method::POST, "/genre".to_string(), Some(json!({"name": "x"}))),
        (Method::PATCH, format!("/genre/{id}"), Some(json!({"name": "x"}))),
        (Method::DELETE, format!("/genre/{id}"), None),
        (Method::DELETE, "/genre/all".to_string(), None),
    ] {
        let (status, resp) = call(&app, method.clone(), &uri, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{method} {uri}");
        assert_eq!(message(&resp), "connection refused", "{method} {uri}");
    }
}
