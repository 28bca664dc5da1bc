//! Error type shared by handlers and adapters

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

pub type ClResult<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
	NotFound,
	PermissionDenied,
	Unauthorized,
	DbError,
	ValidationError(String),
	ConfigError(String),
	Internal(String),

	// externals
	Io(std::io::Error),
}

impl Error {
	fn status(&self) -> StatusCode {
		match self {
			Error::NotFound => StatusCode::NOT_FOUND,
			Error::PermissionDenied => StatusCode::FORBIDDEN,
			Error::Unauthorized => StatusCode::UNAUTHORIZED,
			Error::ValidationError(_) => StatusCode::BAD_REQUEST,
			Error::DbError | Error::ConfigError(_) | Error::Internal(_) | Error::Io(_) => {
				StatusCode::INTERNAL_SERVER_ERROR
			}
		}
	}

	fn code(&self) -> &'static str {
		match self {
			Error::NotFound => "E-CORE-NOTFOUND",
			Error::PermissionDenied => "E-AUTH-NOPERM",
			Error::Unauthorized => "E-AUTH-UNAUTH",
			Error::ValidationError(_) => "E-VAL-INVALID",
			Error::DbError => "E-CORE-DBERR",
			Error::ConfigError(_) => "E-CORE-CONFIG",
			Error::Internal(_) | Error::Io(_) => "E-CORE-INTERNAL",
		}
	}
}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		Self::Io(err)
	}
}

impl std::fmt::Display for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Error::NotFound => write!(f, "not found"),
			Error::PermissionDenied => write!(f, "permission denied"),
			Error::Unauthorized => write!(f, "unauthorized"),
			Error::DbError => write!(f, "database error"),
			Error::ValidationError(msg) => write!(f, "validation error: {}", msg),
			Error::ConfigError(msg) => write!(f, "configuration error: {}", msg),
			Error::Internal(msg) => write!(f, "internal error: {}", msg),
			Error::Io(err) => write!(f, "io error: {}", err),
		}
	}
}

impl std::error::Error for Error {}

#[derive(Serialize)]
struct ErrorBody<'a> {
	code: &'a str,
	message: String,
}

#[derive(Serialize)]
struct ErrorResponse<'a> {
	error: ErrorBody<'a>,
}

impl IntoResponse for Error {
	fn into_response(self) -> axum::response::Response {
		let status = self.status();
		// Internal details stay in the logs
		let message = if status.is_server_error() {
			tracing::warn!("request failed: {}", self);
			"internal server error".to_string()
		} else {
			self.to_string()
		};
		let body = ErrorResponse { error: ErrorBody { code: self.code(), message } };
		(status, Json(body)).into_response()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_status_mapping() {
		assert_eq!(Error::NotFound.status(), StatusCode::NOT_FOUND);
		assert_eq!(Error::PermissionDenied.status(), StatusCode::FORBIDDEN);
		assert_eq!(Error::Unauthorized.status(), StatusCode::UNAUTHORIZED);
		assert_eq!(Error::ValidationError("x".into()).status(), StatusCode::BAD_REQUEST);
		assert_eq!(Error::DbError.status(), StatusCode::INTERNAL_SERVER_ERROR);
	}

	#[test]
	fn test_into_response_status() {
		let res = Error::NotFound.into_response();
		assert_eq!(res.status(), StatusCode::NOT_FOUND);

		let res = Error::DbError.into_response();
		assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
	}
}

// vim: ts=4
