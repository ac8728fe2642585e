//! [`Make`]s HTTP API.

use axum::Extension;
use service::{domain::Make, query, Query as _};

use crate::{api, AsError, Error, Service};

/// Lists all the [`Make`]s ordered by their names.
///
/// # Errors
///
/// If the document store fails.
#[tracing::instrument(skip_all, fields(http.handler = "makes.list"))]
pub async fn list(
    Extension(service): Extension<Service>,
) -> Result<api::Response<Vec<Make>>, Error> {
    service
        .execute(query::makes::List)
        .await
        .map(api::Response::new)
        .map_err(AsError::into_error)
}
