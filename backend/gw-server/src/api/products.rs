use crate::api::{Envelope, created, json_body, ok, policies};
use crate::{ApiError, ApiResult, AppState, RequestContext};

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{HeaderMap, StatusCode},
};
use gw_listing::{ListingPage, ListingParams, ListingQuery};
use gw_rpc::ServiceRequest;
use serde_json::Value;
use uuid::Uuid;

const PRODUCTS_PATH: &str = "/v1/products";

/// GET /api/products
///
/// Tenant-scoped cursor listing served through the listing cache.
pub async fn list_products(
    State(state): State<AppState>,
    ctx: RequestContext,
    headers: HeaderMap,
    params: Result<Query<ListingParams>, QueryRejection>,
) -> ApiResult<Envelope<ListingPage>> {
    let request = policies::PRODUCTS_LIST
        .authorize(&state, ctx, &headers)
        .await?;
    let Query(params) = params.map_err(|e| ApiError::invalid_input(e.body_text()))?;

    let query = ListingQuery::new(request.tenant()?.clone(), params, &state.page_limits);
    let page = state.listings.list(&query, &request.call_context()).await?;

    Ok(ok(page))
}

/// GET /api/products/{id}
pub async fn get_product(
    State(state): State<AppState>,
    ctx: RequestContext,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult<Envelope<Value>> {
    let request = policies::PRODUCTS_READ
        .authorize(&state, ctx, &headers)
        .await?;
    let path = product_path(&id)?;

    let product: Value = state
        .products
        .call(ServiceRequest::get(path), &request.call_context())
        .await?;

    Ok(ok(product))
}

/// POST /api/products
pub async fn create_product(
    State(state): State<AppState>,
    ctx: RequestContext,
    headers: HeaderMap,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Envelope<Value>)> {
    let request = policies::PRODUCTS_CREATE
        .authorize(&state, ctx, &headers)
        .await?;
    let body = json_body(body)?;

    let product: Value = state
        .products
        .call(
            ServiceRequest::post(PRODUCTS_PATH).json(body),
            &request.call_context(),
        )
        .await?;

    Ok(created(product))
}

/// PUT /api/products/{id}
pub async fn update_product(
    State(state): State<AppState>,
    ctx: RequestContext,
    headers: HeaderMap,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Envelope<Value>> {
    let request = policies::PRODUCTS_UPDATE
        .authorize(&state, ctx, &headers)
        .await?;
    let path = product_path(&id)?;
    let body = json_body(body)?;

    let product: Value = state
        .products
        .call(ServiceRequest::put(path).json(body), &request.call_context())
        .await?;

    Ok(ok(product))
}

/// DELETE /api/products/{id}
pub async fn delete_product(
    State(state): State<AppState>,
    ctx: RequestContext,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult<Envelope<Value>> {
    let request = policies::PRODUCTS_DELETE
        .authorize(&state, ctx, &headers)
        .await?;
    let path = product_path(&id)?;

    let reply: Value = state
        .products
        .call(ServiceRequest::delete(path), &request.call_context())
        .await?;

    Ok(ok(reply))
}

/// Backend path for one product. Ids must be UUIDs so a decoded path
/// parameter can never address anything but a single product.
#[track_caller]
fn product_path(id: &str) -> ApiResult<String> {
    let id = Uuid::parse_str(id)
        .map_err(|_| ApiError::invalid_input(format!("product id {:?} is not a UUID", id)))?;
    Ok(format!("{}/{}", PRODUCTS_PATH, id))
}
