//! Admin submodule management handlers

use axum::{
	extract::{Path, Query, State},
	http::StatusCode,
	Json,
};
use serde::Deserialize;

use curricula_types::meta_adapter::{CreateSubmodule, Submodule, UpdateSubmoduleData};
use curricula_types::types::{ApiResponse, PageQuery, SuccessResponse};

use crate::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSubmodulesQuery {
	pub module_id: Option<i64>,
	pub page: Option<u32>,
	pub take: Option<u32>,
}

/// GET /sub-modules-admin - List submodules, optionally of one module
#[axum::debug_handler]
pub async fn list_submodules(
	State(app): State<App>,
	Query(query): Query<ListSubmodulesQuery>,
) -> ClResult<(StatusCode, Json<ApiResponse<Vec<Submodule>>>)> {
	info!(
		module_id = ?query.module_id,
		page = ?query.page,
		take = ?query.take,
		"GET /sub-modules-admin - Listing submodules"
	);

	let page = PageQuery { page: query.page, take: query.take };
	let res = app.meta_adapter.list_submodules(query.module_id, &page).await?;

	Ok((StatusCode::OK, Json(ApiResponse::with_pagination(res.items, &page, res.total))))
}

#[axum::debug_handler]
pub async fn get_submodule(
	State(app): State<App>,
	Path(submodule_id): Path<i64>,
) -> ClResult<(StatusCode, Json<ApiResponse<Submodule>>)> {
	let submodule = app.meta_adapter.read_submodule(submodule_id).await?;

	Ok((StatusCode::OK, Json(ApiResponse::new(submodule))))
}

#[axum::debug_handler]
pub async fn post_submodule(
	State(app): State<App>,
	Json(data): Json<CreateSubmodule>,
) -> ClResult<(StatusCode, Json<ApiResponse<Submodule>>)> {
	let submodule_id = app.meta_adapter.create_submodule(&data).await?;
	info!(submodule_id, module_id = data.module_id, "POST /sub-modules-admin - Submodule created");

	let submodule = app.meta_adapter.read_submodule(submodule_id).await?;
	Ok((StatusCode::CREATED, Json(ApiResponse::new(submodule))))
}

#[axum::debug_handler]
pub async fn patch_submodule(
	State(app): State<App>,
	Path(submodule_id): Path<i64>,
	Json(data): Json<UpdateSubmoduleData>,
) -> ClResult<(StatusCode, Json<ApiResponse<Submodule>>)> {
	info!(submodule_id, "PATCH /sub-modules-admin/:id - Updating submodule");

	app.meta_adapter.update_submodule(submodule_id, &data).await?;
	let submodule = app.meta_adapter.read_submodule(submodule_id).await?;

	Ok((StatusCode::OK, Json(ApiResponse::new(submodule))))
}

#[axum::debug_handler]
pub async fn delete_submodule(
	State(app): State<App>,
	Path(submodule_id): Path<i64>,
) -> ClResult<(StatusCode, Json<SuccessResponse>)> {
	info!(submodule_id, "DELETE /sub-modules-admin/:id - Deleting submodule");

	app.meta_adapter.delete_submodule(submodule_id).await?;

	Ok((StatusCode::OK, Json(SuccessResponse::ok())))
}

// vim: ts=4
