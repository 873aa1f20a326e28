use std::str::FromStr;

use axum::extract::{Request, State};
use axum::http::{HeaderMap, header};
use axum::middleware::Next;
use axum::response::Response;
use canvass_core::{AppError, UserId, UserIdentity};
use subtle::ConstantTimeEq;

use crate::error::ApiResult;
use crate::state::AppState;

/// Header carrying the authenticated user id forwarded by the gateway.
pub const USER_ID_HEADER: &str = "x-canvass-user-id";

/// Trusts the identity forwarded by the gateway once its shared secret matches.
pub async fn require_identity(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let identity = identity_from_headers(request.headers(), &state.gateway_shared_secret)?;

    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

fn identity_from_headers(headers: &HeaderMap, shared_secret: &str) -> ApiResult<UserIdentity> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::Unauthorized("missing gateway credentials".to_owned()))?;

    if token.as_bytes().ct_eq(shared_secret.as_bytes()).unwrap_u8() != 1 {
        return Err(AppError::Unauthorized("invalid gateway credentials".to_owned()).into());
    }

    let raw_user_id = headers
        .get(USER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("authentication required".to_owned()))?;
    let user_id = UserId::from_str(raw_user_id)
        .map_err(|_| AppError::Unauthorized("authentication required".to_owned()))?;

    Ok(UserIdentity::new(user_id))
}
