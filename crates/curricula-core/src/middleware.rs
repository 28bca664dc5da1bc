//! Bearer token authentication
//!
//! Access tokens are HS256 JWTs carrying the user id (`sub`), a comma separated
//! role list (`r`) and an expiry (`exp`).

use axum::{
	extract::{Request, State},
	http::header,
	middleware::Next,
	response::Response,
};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::extract::Auth;
use crate::prelude::*;
use curricula_types::auth::{AccessToken, AuthCtx, ACCESS_TOKEN_EXPIRY};

/// Issue an access token for a user
pub fn generate_access_token(
	secret: &str,
	user_id: UserId,
	roles: Option<&str>,
) -> ClResult<Box<str>> {
	let claims = AccessToken::<&str> {
		sub: user_id,
		r: roles,
		exp: Timestamp::now().add_seconds(ACCESS_TOKEN_EXPIRY),
	};

	let token = jsonwebtoken::encode(
		&Header::new(Algorithm::HS256),
		&claims,
		&EncodingKey::from_secret(secret.as_bytes()),
	)
	.map_err(|err| Error::Internal(format!("token encoding failed: {}", err)))?;

	Ok(token.into())
}

/// Validate an access token and build the auth context from its claims
pub fn validate_access_token(secret: &str, token: &str) -> ClResult<AuthCtx> {
	let token_data = jsonwebtoken::decode::<AccessToken<Box<str>>>(
		token,
		&DecodingKey::from_secret(secret.as_bytes()),
		&Validation::new(Algorithm::HS256),
	)
	.map_err(|err| {
		debug!("Invalid access token: {}", err);
		Error::Unauthorized
	})?;

	let roles = token_data
		.claims
		.r
		.as_deref()
		.unwrap_or_default()
		.split(',')
		.map(str::trim)
		.filter(|r| !r.is_empty())
		.map(Box::from)
		.collect();

	Ok(AuthCtx { user_id: token_data.claims.sub, roles })
}

/// Reject requests without a valid `Authorization: Bearer` token
pub async fn require_auth(
	State(app): State<App>,
	mut req: Request,
	next: Next,
) -> ClResult<Response> {
	let token = req
		.headers()
		.get(header::AUTHORIZATION)
		.and_then(|h| h.to_str().ok())
		.and_then(|h| h.strip_prefix("Bearer "))
		.map(str::trim)
		.ok_or(Error::Unauthorized)?;

	let auth_ctx = validate_access_token(&app.opts.jwt_secret, token)?;
	req.extensions_mut().insert(Auth(auth_ctx));

	Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
	use super::*;

	const SECRET: &str = "test-secret";

	#[test]
	fn test_token_roundtrip() {
		let token = generate_access_token(SECRET, UserId(42), Some("ADMIN, USER"))
			.expect("token should be generated");
		let ctx = validate_access_token(SECRET, &token).expect("token should be valid");

		assert_eq!(ctx.user_id, UserId(42));
		assert!(ctx.has_role("ADMIN"));
		assert!(ctx.has_role("USER"));
		assert!(!ctx.has_role("GUEST"));
	}

	#[test]
	fn test_token_without_roles() {
		let token = generate_access_token(SECRET, UserId(1), None).expect("token");
		let ctx = validate_access_token(SECRET, &token).expect("token should be valid");

		assert!(ctx.roles.is_empty());
	}

	#[test]
	fn test_wrong_secret_is_rejected() {
		let token = generate_access_token(SECRET, UserId(1), Some("ADMIN")).expect("token");

		assert!(matches!(validate_access_token("other", &token), Err(Error::Unauthorized)));
	}

	#[test]
	fn test_expired_token_is_rejected() {
		let claims = AccessToken::<&str> {
			sub: UserId(1),
			r: Some("ADMIN"),
			exp: Timestamp::now().add_seconds(-3600),
		};
		let token = jsonwebtoken::encode(
			&Header::new(Algorithm::HS256),
			&claims,
			&EncodingKey::from_secret(SECRET.as_bytes()),
		)
		.expect("token");

		assert!(matches!(validate_access_token(SECRET, &token), Err(Error::Unauthorized)));
	}

	#[test]
	fn test_garbage_is_rejected() {
		assert!(matches!(validate_access_token(SECRET, "not.a.jwt"), Err(Error::Unauthorized)));
	}
}

// vim: ts=4
