use axum::{extract::{Path, State}, http::StatusCode, Json};
use serde::Serialize;
use serde_json::Value;
use service::cats::{domain::{CreateCatInput, UpdateCatInput}, Cat};

use crate::{errors::JsonApiError, routes::AppState};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedResponse {
    pub message: String,
    pub new_cat: Cat,
    pub cats: Vec<Cat>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedResponse {
    pub message: String,
    pub updated_cat: Cat,
    pub cats: Vec<Cat>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdoptedResponse {
    pub message: String,
    pub deleted_cat: Cat,
    pub cats: Vec<Cat>,
}

/// Decode a raw body, turning shape errors into a 400 that echoes the body.
fn decode<T: serde::de::DeserializeOwned>(body: &Value, expected: &str) -> Result<T, JsonApiError> {
    serde_json::from_value(body.clone())
        .map_err(|e| JsonApiError::validation(format!("malformed request: {expected} ({e})"), body.clone()))
}

#[utoipa::path(
    post, path = "/cat", tag = "cats",
    request_body = crate::openapi::CreateCatRequest,
    responses(
        (status = 201, description = "Cat added", body = crate::openapi::CreatedResponseDoc),
        (status = 400, description = "Missing or malformed name/age", body = crate::openapi::MessageDoc)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<CreatedResponse>), JsonApiError> {
    let input: CreateCatInput = decode(&body, "name and age properties expected")?;
    let new_cat = state.cats.create(&input).await.map_err(|e| JsonApiError::from_service(e, Some(&body)))?;
    let cats = state.cats.list().await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { message: "cat added!".into(), new_cat, cats })))
}

#[utoipa::path(
    get, path = "/cats", tag = "cats",
    responses((status = 200, description = "All cats in insertion order", body = [crate::openapi::CatDoc]))
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Cat>>, JsonApiError> {
    Ok(Json(state.cats.list().await?))
}

#[utoipa::path(
    get, path = "/cat/{id}", tag = "cats",
    params(("id" = String, Path, description = "Cat ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::CatDoc),
        (status = 404, description = "Not Found", body = crate::openapi::MessageDoc)
    )
)]
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Cat>, JsonApiError> {
    Ok(Json(state.cats.get(&id).await?))
}

#[utoipa::path(
    put, path = "/cat", tag = "cats",
    request_body = crate::openapi::UpdateCatRequest,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::UpdatedResponseDoc),
        (status = 400, description = "Missing or malformed id/name/age", body = crate::openapi::MessageDoc),
        (status = 404, description = "Not Found", body = crate::openapi::MessageDoc)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<UpdatedResponse>, JsonApiError> {
    let input: UpdateCatInput = decode(&body, "id, name and age properties expected")?;
    let updated_cat = state.cats.update(&input).await.map_err(|e| JsonApiError::from_service(e, Some(&body)))?;
    let cats = state.cats.list().await?;
    Ok(Json(UpdatedResponse { message: "updated".into(), updated_cat, cats }))
}

#[utoipa::path(
    delete, path = "/cat/{id}", tag = "cats",
    params(("id" = String, Path, description = "Cat ID")),
    responses(
        (status = 200, description = "Adopted", body = crate::openapi::AdoptedResponseDoc),
        (status = 404, description = "Not Found", body = crate::openapi::MessageDoc)
    )
)]
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<AdoptedResponse>, JsonApiError> {
    let deleted_cat = state.cats.delete(&id).await?;
    let cats = state.cats.list().await?;
    Ok(Json(AdoptedResponse { message: format!("adopted cat with id {id}"), deleted_cat, cats }))
}
