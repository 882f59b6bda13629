use axum::extract::Request;
use axum::extract::State;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::Response;

use super::handlers::ApiError;
use crate::domain::user::models::User;
use crate::inbound::http::router::AppState;

const BEARER_PREFIX: &str = "Bearer ";
const INVALID_TOKEN: &str = "Invalid or expired token";

/// Identity resolved from a valid bearer token, stored in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user: User,
}

/// Middleware that validates JWT tokens and adds the user to request extensions
///
/// Rejections use the same `{status_code, data}` envelope as the handlers.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token_from_header(&req)?;

    let email = state.authenticator.extract_username(&token).map_err(|e| {
        tracing::warn!(error = %e, "JWT decoding failed");
        ApiError::Unauthorized(INVALID_TOKEN.to_string())
    })?;

    let user = state
        .user_repository
        .find_by_email(&email)
        .await
        .map_err(|e| ApiError::InternalServerError(e.to_string()))?
        .ok_or_else(|| {
            tracing::warn!(email = %email, "Token subject is not a registered user");
            ApiError::Unauthorized(INVALID_TOKEN.to_string())
        })?;

    match state.authenticator.is_token_valid(&token, &user) {
        Ok(true) => {}
        Ok(false) => {
            tracing::warn!(email = %email, "Token expired or issued for another subject");
            return Err(ApiError::Unauthorized(INVALID_TOKEN.to_string()));
        }
        Err(e) => {
            tracing::warn!(error = %e, "JWT validation failed");
            return Err(ApiError::Unauthorized(INVALID_TOKEN.to_string()));
        }
    }

    req.extensions_mut().insert(AuthenticatedUser { user });

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<String, ApiError> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::Unauthorized("Invalid Authorization header".to_string()))?;

    match auth_str.strip_prefix(BEARER_PREFIX) {
        Some(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
        _ => Err(ApiError::Unauthorized(
            "Invalid Authorization header format. Expected: Bearer <token>".to_string(),
        )),
    }
}
