//! Authentication context and access token claims

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::prelude::*;

/// Role required by every admin endpoint
pub const ADMIN_ROLE: &str = "ADMIN";

/// Access token lifetime in seconds
pub const ACCESS_TOKEN_EXPIRY: i64 = 3600 * 8;

/// Access tokens are used to authenticate users
#[skip_serializing_none]
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct AccessToken<S> {
	pub sub: UserId,
	/// Comma separated role list
	pub r: Option<S>,
	pub exp: Timestamp,
}

/// Context struct for an authenticated user
#[derive(Clone, Debug)]
pub struct AuthCtx {
	pub user_id: UserId,
	pub roles: Box<[Box<str>]>,
}

impl AuthCtx {
	pub fn has_role(&self, role: &str) -> bool {
		self.roles.iter().any(|r| r.as_ref() == role)
	}
}

// vim: ts=4
