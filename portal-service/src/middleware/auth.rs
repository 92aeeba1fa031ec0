use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::IntoResponse,
};
use portal_core::error::AppError;
use uuid::Uuid;

use crate::{
    models::Role,
    services::resolve_role,
    AppState,
};

/// Authenticated request context: verified identity plus resolved role.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: Uuid,
    pub email: String,
    pub role: Role,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Role path of authorization: ADMIN or nothing.
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::Forbidden(anyhow::anyhow!(
                "Administrator role required"
            )))
        }
    }

    /// Ownership path of authorization: the resource's creator, or ADMIN.
    pub fn ensure_owner_or_admin(&self, owner_id: Uuid) -> Result<(), AppError> {
        if self.user_id == owner_id || self.is_admin() {
            Ok(())
        } else {
            Err(AppError::Forbidden(anyhow::anyhow!(
                "Not the owner of this resource"
            )))
        }
    }
}

/// Middleware to require a valid provider session.
///
/// Verifies the bearer credential, resolves the subject's role against the
/// directory (provisioning lazily), and stores a [`CurrentUser`] in request
/// extensions for handlers.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<impl IntoResponse, AppError> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    let token = token.ok_or_else(|| {
        AppError::Unauthorized(anyhow::anyhow!("Missing or invalid Authorization header"))
    })?;

    let claims = state.identity.verify(token)?;
    let resolution = resolve_role(state.store.as_ref(), &claims).await;

    let current = CurrentUser {
        user_id: claims.sub,
        email: claims.email,
        role: resolution.effective_role(),
    };
    req.extensions_mut().insert(current);

    Ok(next.run(req).await)
}

/// Extractor to easily get the authenticated user in handlers.
pub struct AuthUser(pub CurrentUser);

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let current = parts.extensions.get::<CurrentUser>().ok_or_else(|| {
            AppError::InternalError(anyhow::anyhow!(
                "Auth context missing from request extensions"
            ))
        })?;

        Ok(AuthUser(current.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with(role: Role) -> CurrentUser {
        CurrentUser {
            user_id: Uuid::new_v4(),
            email: "member@campus.edu".to_string(),
            role,
        }
    }

    #[test]
    fn only_admin_passes_role_check() {
        assert!(user_with(Role::Admin).require_admin().is_ok());
        assert!(user_with(Role::Moderator).require_admin().is_err());
        assert!(user_with(Role::User).require_admin().is_err());
    }

    #[test]
    fn owner_passes_ownership_check() {
        let user = user_with(Role::User);
        assert!(user.ensure_owner_or_admin(user.user_id).is_ok());
        assert!(user.ensure_owner_or_admin(Uuid::new_v4()).is_err());
    }

    #[test]
    fn admin_passes_ownership_check_for_any_resource() {
        let admin = user_with(Role::Admin);
        assert!(admin.ensure_owner_or_admin(Uuid::new_v4()).is_ok());
    }
}
