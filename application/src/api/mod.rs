//! HTTP API definitions.

pub mod cars;
pub mod makes;

use axum::{
    response::{self, IntoResponse},
    routing::get,
    Extension, Json, Router,
};
use common::{Page, Pagination};
use serde::Serialize;

use crate::Service;

pub use self::cars::MaxLimit;

/// Body of a successful HTTP API response.
#[derive(Clone, Debug, Serialize)]
pub struct Response<T> {
    /// Always `true`.
    success: bool,

    /// Requested data.
    pub data: T,

    /// [`Pagination`] of the `data`, if it's a page of items.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

impl<T> Response<T> {
    /// Creates a new [`Response`] with the provided `data`.
    #[must_use]
    pub const fn new(data: T) -> Self {
        Self {
            success: true,
            data,
            pagination: None,
        }
    }
}

impl<T> From<Page<T>> for Response<Vec<T>> {
    fn from(page: Page<T>) -> Self {
        Self {
            success: true,
            data: page.items,
            pagination: Some(page.pagination),
        }
    }
}

impl<T: Serialize> IntoResponse for Response<T> {
    fn into_response(self) -> response::Response {
        Json(self).into_response()
    }
}

/// Creates a new [`Router`] serving the HTTP API.
pub fn router(service: Service, max_limit: MaxLimit) -> Router {
    Router::new()
        .route("/api/cars/new", get(cars::new_cars))
        .route("/api/cars/used", get(cars::used_cars))
        .route("/api/cars/:slug", get(cars::by_slug))
        .route("/api/makes", get(makes::list))
        .layer(Extension(service))
        .layer(Extension(max_limit))
}

#[cfg(test)]
mod spec {
    use common::{pagination::Arguments, Page};
    use serde_json::json;

    use super::Response;

    #[test]
    fn page_envelope() {
        let page = Page::new(vec!["a", "b"], 14, &Arguments::default());

        assert_eq!(
            serde_json::to_value(Response::from(page)).unwrap(),
            json!({
                "success": true,
                "data": ["a", "b"],
                "pagination": {
                    "total": 14,
                    "page": 1,
                    "limit": 12,
                    "totalPages": 2,
                },
            }),
        );
    }

    #[test]
    fn data_envelope() {
        assert_eq!(
            serde_json::to_value(Response::new(json!({"$id": "x"}))).unwrap(),
            json!({"success": true, "data": {"$id": "x"}}),
        );
    }
}
