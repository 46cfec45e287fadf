use crate::api::{Envelope, ok, policies};
use crate::{ApiResult, AppState, RequestContext};

use axum::{extract::State, http::HeaderMap};
use gw_rpc::ServiceRequest;
use serde_json::Value;

/// GET /api/users/me
pub async fn get_me(
    State(state): State<AppState>,
    ctx: RequestContext,
    headers: HeaderMap,
) -> ApiResult<Envelope<Value>> {
    let request = policies::USERS_ME.authorize(&state, ctx, &headers).await?;

    let user: Value = state
        .users
        .call(ServiceRequest::get("/v1/users/me"), &request.call_context())
        .await?;

    Ok(ok(user))
}
