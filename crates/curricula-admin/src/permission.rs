//! Access permission handlers
//!
//! Every hierarchy level exposes the same pair of endpoints under its own
//! prefix: `PATCH .../permissions/{id}` applies a change and
//! `GET .../permissions/{id}` lists the users with access.

use axum::{
	extract::{Path, State},
	http::StatusCode,
	Json,
};
use serde::Serialize;

use curricula_types::meta_adapter::PermissionChange;
use curricula_types::types::{ApiResponse, SuccessResponse};

use crate::prelude::*;

/// Users holding a permission on an entity
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionList {
	pub user_ids: Vec<UserId>,
	pub total: usize,
}

async fn update(
	app: &App,
	level: Level,
	entity_id: i64,
	change: &PermissionChange,
) -> ClResult<(StatusCode, Json<SuccessResponse>)> {
	info!(
		kind = %level,
		entity_id,
		added = change.added_users.len(),
		removed = change.removed_users.len(),
		relatives = change.add_relatives,
		"PATCH permissions - Updating access"
	);

	app.meta_adapter.update_permissions(level, entity_id, change).await?;

	Ok((StatusCode::OK, Json(SuccessResponse::ok())))
}

async fn list(
	app: &App,
	level: Level,
	entity_id: i64,
) -> ClResult<(StatusCode, Json<ApiResponse<PermissionList>>)> {
	let user_ids = app.meta_adapter.list_permissions(level, entity_id).await?;
	let total = user_ids.len();

	Ok((StatusCode::OK, Json(ApiResponse::new(PermissionList { user_ids, total }))))
}

// Trainings
//***********
/// PATCH /training-admin/permissions/{id}
#[axum::debug_handler]
pub async fn patch_training_permissions(
	State(app): State<App>,
	Path(training_id): Path<i64>,
	Json(change): Json<PermissionChange>,
) -> ClResult<(StatusCode, Json<SuccessResponse>)> {
	update(&app, Level::Training, training_id, &change).await
}

/// GET /training-admin/permissions/{id}
#[axum::debug_handler]
pub async fn get_training_permissions(
	State(app): State<App>,
	Path(training_id): Path<i64>,
) -> ClResult<(StatusCode, Json<ApiResponse<PermissionList>>)> {
	list(&app, Level::Training, training_id).await
}

// Modules
//*********
/// PATCH /training-modules-admin/permissions/{id}
#[axum::debug_handler]
pub async fn patch_module_permissions(
	State(app): State<App>,
	Path(module_id): Path<i64>,
	Json(change): Json<PermissionChange>,
) -> ClResult<(StatusCode, Json<SuccessResponse>)> {
	update(&app, Level::Module, module_id, &change).await
}

/// GET /training-modules-admin/permissions/{id}
#[axum::debug_handler]
pub async fn get_module_permissions(
	State(app): State<App>,
	Path(module_id): Path<i64>,
) -> ClResult<(StatusCode, Json<ApiResponse<PermissionList>>)> {
	list(&app, Level::Module, module_id).await
}

// Submodules
//************
/// PATCH /sub-modules-admin/permissions/{id}
#[axum::debug_handler]
pub async fn patch_submodule_permissions(
	State(app): State<App>,
	Path(submodule_id): Path<i64>,
	Json(change): Json<PermissionChange>,
) -> ClResult<(StatusCode, Json<SuccessResponse>)> {
	update(&app, Level::Submodule, submodule_id, &change).await
}

/// GET /sub-modules-admin/permissions/{id}
#[axum::debug_handler]
pub async fn get_submodule_permissions(
	State(app): State<App>,
	Path(submodule_id): Path<i64>,
) -> ClResult<(StatusCode, Json<ApiResponse<PermissionList>>)> {
	list(&app, Level::Submodule, submodule_id).await
}

// vim: ts=4
