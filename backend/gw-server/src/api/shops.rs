use crate::api::{Envelope, created, json_body, ok, policies};
use crate::{ApiResult, AppState, RequestContext};

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
};
use gw_rpc::ServiceRequest;
use log::info;
use serde_json::Value;

const SHOPS_PATH: &str = "/v1/shops";
const MY_SHOP_PATH: &str = "/v1/shops/me";

/// POST /api/shops
pub async fn create_shop(
    State(state): State<AppState>,
    ctx: RequestContext,
    headers: HeaderMap,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Envelope<Value>)> {
    let request = policies::SHOPS_CREATE
        .authorize(&state, ctx, &headers)
        .await?;
    let body = json_body(body)?;

    let shop: Value = state
        .shops
        .call(ServiceRequest::post(SHOPS_PATH).json(body), &request.call_context())
        .await?;

    Ok(created(shop))
}

/// GET /api/shops/me
pub async fn get_my_shop(
    State(state): State<AppState>,
    ctx: RequestContext,
    headers: HeaderMap,
) -> ApiResult<Envelope<Value>> {
    let request = policies::SHOPS_READ.authorize(&state, ctx, &headers).await?;

    let shop: Value = state
        .shops
        .call(ServiceRequest::get(MY_SHOP_PATH), &request.call_context())
        .await?;

    Ok(ok(shop))
}

/// PUT /api/shops/me
pub async fn update_my_shop(
    State(state): State<AppState>,
    ctx: RequestContext,
    headers: HeaderMap,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Envelope<Value>> {
    let request = policies::SHOPS_UPDATE
        .authorize(&state, ctx, &headers)
        .await?;
    let body = json_body(body)?;

    let shop: Value = state
        .tenant_shops
        .call(ServiceRequest::put(MY_SHOP_PATH).json(body), &request.call_context())
        .await?;

    Ok(ok(shop))
}

/// DELETE /api/shops/me
///
/// The caller's cached grant for the deleted shop is revoked so the next
/// tenant-scoped request re-checks ownership.
pub async fn delete_my_shop(
    State(state): State<AppState>,
    ctx: RequestContext,
    headers: HeaderMap,
) -> ApiResult<Envelope<Value>> {
    let request = policies::SHOPS_DELETE
        .authorize(&state, ctx, &headers)
        .await?;

    let reply: Value = state
        .tenant_shops
        .call(ServiceRequest::delete(MY_SHOP_PATH), &request.call_context())
        .await?;

    let tenant = request.tenant()?;
    state.tenants.revoke(&request.identity, tenant).await;
    info!(
        "{} Shop {} deleted by {}",
        request.context.log_prefix(),
        tenant,
        request.identity.subject_id
    );

    Ok(ok(reply))
}
