//! Request authorization gate.

use axum::extract::FromRequestParts;
use http::request::Parts;
use uuid::Uuid;

use campus_auth_types::bearer::bearer_token;
use campus_auth_types::token::{AuthError, validate_token};
use campus_domain::role::Role;

use crate::domain::repository::UserRepository;
use crate::domain::view::UserView;
use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated identity attached to the request.
///
/// Extraction verifies the bearer token, loads the identity plus its role
/// profile, and flattens both into a view with the credential hash
/// stripped. Failure modes:
///
/// - no credential, or expired token → 401
/// - malformed/forged token, or token for a deleted identity → 403
///
/// The role is taken from the stored row, not the token claim, so a role
/// change invalidates stale claims immediately.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: Uuid,
    pub role: Role,
    pub view: UserView,
}

impl CurrentUser {
    /// Enforce a required role set. An empty set admits any authenticated
    /// identity.
    pub fn require_role(&self, roles: &[Role]) -> Result<(), ApiError> {
        if roles.is_empty() || roles.contains(&self.role) {
            return Ok(());
        }
        Err(ApiError::Forbidden)
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    // axum-core defines this as `fn -> impl Future + Send` (not `async fn`).
    // Extract values synchronously, then return a 'static async move block
    // to avoid precise-capturing lifetime mismatches (E0195).
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let token = bearer_token(&parts.headers).map(str::to_owned);
        let jwt_secret = state.jwt_secret.clone();
        let repo = state.user_repo();

        async move {
            let token = token.ok_or(ApiError::Unauthenticated)?;
            let info = validate_token(&token, &jwt_secret).map_err(|e| match e {
                AuthError::Expired => ApiError::Unauthenticated,
                AuthError::InvalidSignature | AuthError::Malformed => ApiError::Forbidden,
            })?;

            // Token may outlive its identity.
            let (user, profile) = repo
                .find_with_profile(info.user_id)
                .await?
                .ok_or(ApiError::Forbidden)?;

            Ok(Self {
                id: user.id,
                role: user.role,
                view: UserView::compose(user, profile),
            })
        }
    }
}
