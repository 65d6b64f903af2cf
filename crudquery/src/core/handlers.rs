use axum::{Json, extract::State, http::header::HeaderMap};
use sea_orm::{DatabaseConnection, EntityTrait};
use serde::Serialize;

use super::traits::ListResource;
use crate::errors::ApiError;
use crate::filtering::Page;
use crate::models::QueryParameters;

/// Generic list endpoint for any [`ListResource`].
///
/// Responds with the [`Page`] envelope as JSON and a `Content-Range` header.
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/workers", get(list_handler::<Worker>))
///     .with_state(db);
/// ```
///
/// # Errors
///
/// See [`ListResource::list`].
pub async fn list_handler<R>(
    State(db): State<DatabaseConnection>,
    params: QueryParameters,
) -> Result<(HeaderMap, Json<Page<R>>), ApiError>
where
    R: ListResource + Serialize,
    <R::EntityType as EntityTrait>::Model: Sync,
{
    let page = R::list(&db, &params).await?;
    let headers = page.content_range(R::RESOURCE_NAME_PLURAL);
    Ok((headers, Json(page)))
}
