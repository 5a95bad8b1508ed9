//! Bearer-token authentication extractor for webhook handlers.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::errors::AppError;
use crate::AppState;

/// Proof that the request carried the configured webhook bearer credential.
///
/// Use as an Axum extractor in handlers that accept CI webhook traffic:
/// ```ignore
/// async fn handler(_auth: WebhookAuth, ...) -> impl IntoResponse { ... }
/// ```
/// A missing header, a non-Bearer scheme, or an unrecognized token all reject
/// with `Unauthorized` before the body is touched.
#[derive(Debug, Clone, Copy)]
pub struct WebhookAuth;

impl FromRequestParts<AppState> for WebhookAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::Unauthorized)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AppError::Unauthorized)?;

        if token.is_empty() || token != state.config.webhook_secret {
            return Err(AppError::Unauthorized);
        }

        Ok(WebhookAuth)
    }
}
