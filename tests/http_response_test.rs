use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::{Request, StatusCode, header::CONTENT_RANGE};
use axum::{Router, routing::get};
use pagecrate::{Filters, Page, PageRequest, PaginateError, SelectExt, Sorts, paginate_filtered_async};
use sea_orm::{ColumnTrait, Database, DatabaseConnection, DbErr, EntityTrait};
use serde::Deserialize;
use serde_json::Value;
use tower::ServiceExt;

mod common;
use common::person_entity::{self, Column, Entity as Person};
use common::{PeopleQuery, init_tracing, setup_abc};

#[derive(Debug, Deserialize)]
struct PeopleParams {
    min_age: Option<i32>,
    #[serde(default)]
    oldest_first: bool,
}

async fn list_people(
    Query(request): Query<PageRequest>,
    Query(params): Query<PeopleParams>,
    State(db): State<DatabaseConnection>,
) -> Result<Page<person_entity::Model>, PaginateError<DbErr>> {
    let mut sorts: Sorts<PeopleQuery> = Sorts::new();
    sorts
        .add(true, Column::Age, params.oldest_first)
        .add(true, Column::Id, false);

    let mut filters: Filters<PeopleQuery> = Filters::new();
    filters.add_with(params.min_age.is_some(), || {
        Column::Age.gte(params.min_age.unwrap_or_default())
    });

    paginate_filtered_async(
        Person::find().bind(&db),
        request.page(),
        request.per_page(),
        &sorts,
        filters,
    )
    .await
}

fn app(db: DatabaseConnection) -> Router {
    Router::new()
        .route("/people", get(list_people))
        .with_state(db)
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Option<String>, Value) {
    init_tracing();
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();

    let status = response.status();
    let range = response
        .headers()
        .get(CONTENT_RANGE)
        .map(|value| value.to_str().unwrap().to_string());
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, range, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_first_page_response() {
    let db = setup_abc().await.expect("Failed to setup test database");

    let (status, range, body) = get_json(app(db), "/people?page=1&per_page=2").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(range.as_deref(), Some("items 0-1/3"));
    assert_eq!(body["record_count"], 3);
    assert_eq!(body["page_count"], 2);
    assert_eq!(body["results"][0]["name"], "B");
    assert_eq!(body["results"][1]["name"], "C");
}

#[tokio::test]
async fn test_default_page_request() {
    let db = setup_abc().await.expect("Failed to setup test database");

    let (status, _, body) = get_json(app(db), "/people").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["current_page"], 1);
    assert_eq!(body["page_size"], PageRequest::DEFAULT_PER_PAGE);
    assert_eq!(body["results"].as_array().map(Vec::len), Some(3));
}

#[tokio::test]
async fn test_conditional_filter_and_sort_from_query_string() {
    let db = setup_abc().await.expect("Failed to setup test database");

    let (status, range, body) =
        get_json(app(db), "/people?min_age=25&oldest_first=true").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(range.as_deref(), Some("items 0-1/2"));
    assert_eq!(body["results"][0]["name"], "A");
    assert_eq!(body["results"][1]["name"], "C");
}

#[tokio::test]
async fn test_empty_page_range() {
    let db = setup_abc().await.expect("Failed to setup test database");

    let (status, range, body) = get_json(app(db), "/people?page=9&per_page=2").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(range.as_deref(), Some("items */3"));
    assert_eq!(body["results"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn test_invalid_page_is_bad_request() {
    let db = setup_abc().await.expect("Failed to setup test database");

    let (status, range, body) = get_json(app(db), "/people?page=0").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(range.is_none());
    assert_eq!(body["error"], "Invalid page number 0: pages start at 1");
}

#[tokio::test]
async fn test_engine_error_is_hidden_from_client() {
    // No migrations, so the table does not exist.
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect");

    let (status, range, body) = get_json(app(db), "/people").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(range.is_none());
    assert_eq!(body["error"], "A database error occurred");
    assert!(!body["error"].as_str().unwrap_or_default().contains("people"));
}

#[tokio::test]
async fn test_oversized_page_size_is_bad_request() {
    let db = setup_abc().await.expect("Failed to setup test database");

    let (status, range, body) =
        get_json(app(db), "/people?page=1&per_page=9223372036854775808").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(range.is_none());
    assert_eq!(
        body["error"],
        "Page 1 with page size 9223372036854775808 is out of range"
    );
}
