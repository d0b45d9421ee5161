use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;

use crate::auth::tokens::bearer_token;
use crate::db::guards;
use crate::error::AppError;
use crate::messages;
use crate::state::AppState;

/// The caller identified by a valid bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub id: i64,
}

/// Extractor that requires a valid, unexpired token belonging to a live user.
/// Returns 401 otherwise.
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let unauthorized = || AppError::Unauthorized(messages::auth::INVALID_TOKEN);

        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(bearer_token)
            .ok_or_else(unauthorized)?;

        let claims = state.tokens.verify(token).map_err(|err| {
            tracing::debug!("Rejected bearer token: {}", err);
            unauthorized()
        })?;

        let conn = state.db.get()?;
        if guards::user_is_live(&conn, claims.user_id)? {
            Ok(AuthUser {
                id: claims.user_id,
            })
        } else {
            Err(unauthorized())
        }
    }
}
