//! # Axum Responses
//!
//! A [`Page`] answers with its JSON body and a `Content-Range` header, so both
//! page-aware clients and range-based clients (React Admin) can read it:
//!
//! ```rust,ignore
//! async fn list_people(
//!     Query(request): Query<PageRequest>,
//!     State(db): State<DatabaseConnection>,
//! ) -> Result<Page<person::Model>, PaginateError<DbErr>> {
//!     let mut sorts = Sorts::new();
//!     sorts.add(true, person::Column::Id, false);
//!     paginate_sorted_async(person::Entity::find().bind(&db), request.page(), request.per_page(), &sorts).await
//! }
//! ```
//!
//! [`PaginateError`] answers `400 Bad Request` for rejected arguments. Engine
//! errors become a generic `500 Internal Server Error`; the details are logged
//! with `tracing` and never sent to the client.

use std::fmt;

use axum::{
    Json,
    http::{HeaderMap, HeaderValue, StatusCode, header::CONTENT_RANGE},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::errors::PaginateError;
use crate::page::Page;

/// Range unit used when a page is turned into a response.
const DEFAULT_UNIT: &str = "items";

/// Removes characters that are not allowed in a header value.
fn sanitize_unit(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii() && !c.is_ascii_control() && *c != ' ')
        .collect()
}

/// `Content-Range` header describing `page`.
///
/// `<unit> <first>-<last>/<total>` for a page with results, `<unit> */<total>`
/// for an empty one. Control characters and spaces are stripped from `unit`.
#[must_use]
pub fn content_range<T>(page: &Page<T>, unit: &str) -> HeaderMap {
    let unit = match sanitize_unit(unit) {
        unit if unit.is_empty() => DEFAULT_UNIT.to_string(),
        unit => unit,
    };
    let total = page.record_count();
    let returned = u64::try_from(page.results().len()).unwrap_or(u64::MAX);

    let value = if returned == 0 {
        format!("{unit} */{total}")
    } else {
        let first = page.offset();
        let last = first.saturating_add(returned - 1);
        format!("{unit} {first}-{last}/{total}")
    };

    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(&value) {
        headers.insert(CONTENT_RANGE, value);
    }
    headers
}

impl<T: Serialize> IntoResponse for Page<T> {
    fn into_response(self) -> Response {
        let headers = content_range(&self, DEFAULT_UNIT);
        (headers, Json(self)).into_response()
    }
}

/// Error body sent to clients.
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl<E: fmt::Display> IntoResponse for PaginateError<E> {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::Query(err) => {
                tracing::error!(error = %err, "Paginated query failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A database error occurred".to_string(),
                )
            }
            _ => {
                tracing::debug!(error = %self, "Rejected pagination request");
                (StatusCode::BAD_REQUEST, self.to_string())
            }
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
