//! Bearer authentication and the `AuthUser` extractor.

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use chedreg_core::error::AppError;
use chedreg_core::result::AppResult;
use chedreg_entity::principal::Principal;
use chedreg_service::context::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

use super::client::{client_ip, user_agent};

/// Principal resolved once per request by the activity middleware and
/// stored in the request extensions.
#[derive(Debug, Clone, Default)]
pub struct CurrentPrincipal(pub Option<Principal>);

/// Resolve the principal behind the `Authorization` header.
///
/// Returns `Ok(None)` when no header is present or the token's subject no
/// longer exists, and an unauthorized error for a malformed or invalid
/// token.
pub async fn authenticate(state: &AppState, headers: &HeaderMap) -> AppResult<Option<Principal>> {
    let Some(header) = headers.get(AUTHORIZATION) else {
        return Ok(None);
    };

    let token = header
        .to_str()
        .ok()
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::unauthorized("Invalid Authorization header format"))?;

    let claims = state.jwt_decoder.decode_access_token(token.trim())?;
    state.principals.find_principal(claims.user_id()).await
}

/// Extracted authenticated user context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl AuthUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let principal = match parts.extensions.get::<CurrentPrincipal>() {
            Some(CurrentPrincipal(principal)) => principal.clone(),
            None => authenticate(state, &parts.headers).await?,
        };

        let principal =
            principal.ok_or_else(|| AppError::unauthorized("Authentication required"))?;

        Ok(AuthUser(RequestContext::new(
            principal,
            client_ip(&parts.headers),
            user_agent(&parts.headers),
        )))
    }
}
