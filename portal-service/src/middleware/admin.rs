use axum::{extract::Request, middleware::Next, response::Response};
use portal_core::error::AppError;

use crate::middleware::CurrentUser;

/// Middleware guarding the admin route group. Must run inside
/// [`super::auth_middleware`] so the request carries a [`CurrentUser`].
pub async fn require_admin_middleware(req: Request, next: Next) -> Result<Response, AppError> {
    let Some(current) = req.extensions().get::<CurrentUser>() else {
        return Err(AppError::Unauthorized(anyhow::anyhow!(
            "Authentication required"
        )));
    };

    if let Err(e) = current.require_admin() {
        tracing::warn!(subject = %current.user_id, "Rejected non-admin dashboard access");
        return Err(e);
    }

    Ok(next.run(req).await)
}
