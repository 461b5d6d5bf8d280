//! Role-based access control extractors.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use cinema_core::error::CoreError;
use cinema_core::roles::ROLE_ADMIN;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `admin` role. Every catalog mutation takes this extractor.
///
/// No token or a bad token rejects with 401; a valid token with another role
/// rejects with 403.
///
/// ```ignore
/// async fn delete_movie(RequireAdmin(admin): RequireAdmin) -> AppResult<StatusCode> {
///     Ok(StatusCode::NO_CONTENT)
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_ADMIN {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}
