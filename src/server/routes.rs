use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    Form, Json,
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::repository::{SiteCounts, SiteStore};
use crate::schema::Field;
use crate::server::AppState;
use crate::site::Site;
use crate::Error;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub deleted: bool,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

fn not_found() -> ApiError {
    api_error(StatusCode::NOT_FOUND, "Site not found")
}

impl From<Error> for ErrorResponse {
    fn from(e: Error) -> Self {
        Self { error: e.to_string() }
    }
}

/// Map a store error to its HTTP status
fn store_error(e: Error) -> ApiError {
    let status = match &e {
        Error::NotFound(_) => return not_found(),
        Error::Conflict(_) => StatusCode::CONFLICT,
        e if e.is_client_error() => StatusCode::BAD_REQUEST,
        _ => {
            tracing::error!("Store failure: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, Json(e.into()))
}

/// On reads a coercion failure comes from stored data, not from the caller
fn read_error(e: Error) -> ApiError {
    match e {
        Error::Coercion { .. } => {
            tracing::error!("Stored site data is unreadable: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, Json(e.into()))
        }
        other => store_error(other),
    }
}

/// Run a store call off the async runtime; store locks and file writes block.
async fn blocking<T, F>(state: &Arc<AppState>, f: F) -> Result<crate::Result<T>, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&dyn SiteStore) -> crate::Result<T> + Send + 'static,
{
    let store = Arc::clone(&state.store);
    tokio::task::spawn_blocking(move || f(store.as_ref()))
        .await
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}

async fn with_store<T, F>(state: &Arc<AppState>, f: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&dyn SiteStore) -> crate::Result<T> + Send + 'static,
{
    blocking(state, f).await?.map_err(store_error)
}

async fn read_store<T, F>(state: &Arc<AppState>, f: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&dyn SiteStore) -> crate::Result<T> + Send + 'static,
{
    blocking(state, f).await?.map_err(read_error)
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), ApiError> {
    let Some(expected) = state.admin_token.as_deref() else {
        return Ok(());
    };
    let presented = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));
    if presented == Some(expected) {
        Ok(())
    } else {
        Err(api_error(StatusCode::UNAUTHORIZED, "Unauthorized"))
    }
}

pub async fn list_sites(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Site>>, ApiError> {
    read_store(&state, |store| store.list()).await.map(Json)
}

pub async fn get_site(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Site>, ApiError> {
    read_store(&state, move |store| store.get(&id))
        .await?
        .map(Json)
        .ok_or_else(not_found)
}

pub async fn get_locations(State(state): State<Arc<AppState>>) -> Result<Json<Vec<String>>, ApiError> {
    read_store(&state, |store| store.distinct_values(Field::Region))
        .await
        .map(Json)
}

pub async fn get_religions(State(state): State<Arc<AppState>>) -> Result<Json<Vec<String>>, ApiError> {
    read_store(&state, |store| store.distinct_values(Field::Religion))
        .await
        .map(Json)
}

pub async fn get_facet(
    State(state): State<Arc<AppState>>,
    Path(field): Path<String>,
) -> Result<Json<Vec<String>>, ApiError> {
    read_store(&state, move |store| store.distinct_values_by_name(&field))
        .await
        .map(Json)
}

pub async fn get_stats(State(state): State<Arc<AppState>>) -> Result<Json<SiteCounts>, ApiError> {
    read_store(&state, |store| store.count()).await.map(Json)
}

pub async fn create_site(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Form(form): Form<BTreeMap<String, String>>,
) -> Result<(StatusCode, Json<Site>), ApiError> {
    authorize(&state, &headers)?;
    let site = Site::from_form(&form).map_err(store_error)?;
    let created = with_store(&state, move |store| store.create(site)).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn replace_site(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Form(mut form): Form<BTreeMap<String, String>>,
) -> Result<Json<Site>, ApiError> {
    authorize(&state, &headers)?;
    form.insert("id".to_string(), id.clone());
    let site = Site::from_form(&form).map_err(store_error)?;
    with_store(&state, move |store| store.replace(&id, site))
        .await
        .map(Json)
}

pub async fn delete_site(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<DeleteResponse>, ApiError> {
    authorize(&state, &headers)?;
    let deleted = with_store(&state, move |store| store.delete(&id)).await?;
    Ok(Json(DeleteResponse { deleted }))
}
