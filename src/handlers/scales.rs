//! Scale CRUD handlers: create, show, update, delete, list.

use crate::error::AppError;
use crate::model::ScaleCandidate;
use crate::response::{success_many, success_one, success_one_ok};
use crate::service::{resolve_filters, validate_scale};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

/// Ids are positive by construction; anything that does not parse maps to
/// NotFound, same as an id that parses but matches nothing.
fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str.parse().map_err(|_| AppError::NotFound)
}

/// Missing fields fall back to zero values so validation reports them all
/// at once instead of the decoder rejecting the body piecemeal.
#[derive(Deserialize, Default)]
#[serde(default)]
pub struct CreateScaleRequest {
    pub model: String,
    pub price: f64,
    pub year: i32,
    pub dimensions: Option<Vec<f64>>,
    pub runtime: i32,
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct UpdateScaleRequest {
    pub model: Option<String>,
    pub price: Option<f64>,
    pub year: Option<i32>,
    pub dimensions: Option<Vec<f64>>,
    pub runtime: Option<i32>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct ListScalesParams {
    pub model: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub sort: Option<String>,
}

pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateScaleRequest>,
) -> Result<impl IntoResponse, AppError> {
    let candidate = ScaleCandidate {
        model: body.model,
        price: body.price,
        year: body.year,
        dimensions: body.dimensions,
        runtime: body.runtime,
    };
    validate_scale(&candidate).into_result()?;
    let scale = state.scales.insert(&candidate).await?;
    let location = [(header::LOCATION, format!("/v1/scales/{}", scale.id))];
    Ok((location, success_one(scale)))
}

pub async fn show(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let scale = state.scales.get(id).await?;
    Ok(success_one_ok(scale))
}

/// Partial update: fetch the current record, merge the provided fields,
/// re-validate, then write conditioned on the fetched version. A concurrent
/// writer in between surfaces as 409.
pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    Json(body): Json<UpdateScaleRequest>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let mut scale = state.scales.get(id).await?;

    if let Some(model) = body.model {
        scale.model = model;
    }
    if let Some(price) = body.price {
        scale.price = price;
    }
    if let Some(year) = body.year {
        scale.year = year;
    }
    if let Some(dimensions) = body.dimensions {
        scale.dimensions = dimensions;
    }
    if let Some(runtime) = body.runtime {
        scale.runtime = runtime;
    }

    validate_scale(&ScaleCandidate::from_scale(&scale)).into_result()?;
    scale.version = state.scales.update(&scale).await?;
    Ok(success_one_ok(scale))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    state.scales.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListScalesParams>,
) -> Result<impl IntoResponse, AppError> {
    let filters = resolve_filters(params.page, params.page_size, params.sort.as_deref())?;
    let model = params.model.unwrap_or_default();
    let (scales, metadata) = state.scales.list(&model, &filters).await?;
    Ok(success_many(scales, metadata))
}
