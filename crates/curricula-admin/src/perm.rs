//! Admin permission middleware

use axum::{extract::Request, middleware::Next, response::Response};

use curricula_core::extract::Auth;
use curricula_types::auth::ADMIN_ROLE;

use crate::prelude::*;

/// Middleware that checks if the current user has the admin role
///
/// Must run after `require_auth`, which provides the `Auth` extension.
pub async fn require_admin(Auth(auth_ctx): Auth, req: Request, next: Next) -> ClResult<Response> {
	if !auth_ctx.has_role(ADMIN_ROLE) {
		warn!(
			user_id = %auth_ctx.user_id,
			roles = ?auth_ctx.roles,
			"Admin permission denied - ADMIN role required"
		);
		return Err(Error::PermissionDenied);
	}

	Ok(next.run(req).await)
}

// vim: ts=4
