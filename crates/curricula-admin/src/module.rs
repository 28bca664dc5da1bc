//! Admin module management handlers

use axum::{
	extract::{Path, Query, State},
	http::StatusCode,
	Json,
};
use serde::Deserialize;

use curricula_types::meta_adapter::{CreateModule, Module, UpdateModuleData};
use curricula_types::types::{ApiResponse, PageQuery, SuccessResponse};

use crate::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListModulesQuery {
	pub training_id: Option<i64>,
	pub page: Option<u32>,
	pub take: Option<u32>,
}

/// GET /training-modules-admin - List modules, optionally of one training
#[axum::debug_handler]
pub async fn list_modules(
	State(app): State<App>,
	Query(query): Query<ListModulesQuery>,
) -> ClResult<(StatusCode, Json<ApiResponse<Vec<Module>>>)> {
	info!(
		training_id = ?query.training_id,
		page = ?query.page,
		take = ?query.take,
		"GET /training-modules-admin - Listing modules"
	);

	let page = PageQuery { page: query.page, take: query.take };
	let res = app.meta_adapter.list_modules(query.training_id, &page).await?;

	Ok((StatusCode::OK, Json(ApiResponse::with_pagination(res.items, &page, res.total))))
}

#[axum::debug_handler]
pub async fn get_module(
	State(app): State<App>,
	Path(module_id): Path<i64>,
) -> ClResult<(StatusCode, Json<ApiResponse<Module>>)> {
	let module = app.meta_adapter.read_module(module_id).await?;

	Ok((StatusCode::OK, Json(ApiResponse::new(module))))
}

#[axum::debug_handler]
pub async fn post_module(
	State(app): State<App>,
	Json(data): Json<CreateModule>,
) -> ClResult<(StatusCode, Json<ApiResponse<Module>>)> {
	let module_id = app.meta_adapter.create_module(&data).await?;
	info!(
		module_id,
		training_id = data.training_id,
		"POST /training-modules-admin - Module created"
	);

	let module = app.meta_adapter.read_module(module_id).await?;
	Ok((StatusCode::CREATED, Json(ApiResponse::new(module))))
}

#[axum::debug_handler]
pub async fn patch_module(
	State(app): State<App>,
	Path(module_id): Path<i64>,
	Json(data): Json<UpdateModuleData>,
) -> ClResult<(StatusCode, Json<ApiResponse<Module>>)> {
	info!(module_id, "PATCH /training-modules-admin/:id - Updating module");

	app.meta_adapter.update_module(module_id, &data).await?;
	let module = app.meta_adapter.read_module(module_id).await?;

	Ok((StatusCode::OK, Json(ApiResponse::new(module))))
}

#[axum::debug_handler]
pub async fn delete_module(
	State(app): State<App>,
	Path(module_id): Path<i64>,
) -> ClResult<(StatusCode, Json<SuccessResponse>)> {
	info!(module_id, "DELETE /training-modules-admin/:id - Deleting module");

	app.meta_adapter.delete_module(module_id).await?;

	Ok((StatusCode::OK, Json(SuccessResponse::ok())))
}

// vim: ts=4
