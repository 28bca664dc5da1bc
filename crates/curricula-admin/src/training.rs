//! Admin training management handlers

use axum::{
	extract::{Path, Query, State},
	http::StatusCode,
	Json,
};
use serde::Deserialize;

use curricula_types::meta_adapter::{
	CreateTraining, ListTrainingOptions, Training, TrainingStatus, UpdateTrainingData,
};
use curricula_types::types::{ApiResponse, PageQuery, SuccessResponse};

use crate::prelude::*;

/// Query parameters for listing trainings
#[derive(Debug, Default, Deserialize)]
pub struct ListTrainingsQuery {
	pub status: Option<TrainingStatus>,
	pub q: Option<String>,
	pub page: Option<u32>,
	pub take: Option<u32>,
}

/// GET /training-admin - List trainings
#[axum::debug_handler]
pub async fn list_trainings(
	State(app): State<App>,
	Query(query): Query<ListTrainingsQuery>,
) -> ClResult<(StatusCode, Json<ApiResponse<Vec<Training>>>)> {
	info!(
		status = ?query.status,
		q = ?query.q,
		page = ?query.page,
		take = ?query.take,
		"GET /training-admin - Listing trainings"
	);

	let page = PageQuery { page: query.page, take: query.take };
	let opts = ListTrainingOptions { status: query.status, q: query.q };
	let res = app.meta_adapter.list_trainings(&opts, &page).await?;

	Ok((StatusCode::OK, Json(ApiResponse::with_pagination(res.items, &page, res.total))))
}

/// GET /training-admin/{id} - Read one training
#[axum::debug_handler]
pub async fn get_training(
	State(app): State<App>,
	Path(training_id): Path<i64>,
) -> ClResult<(StatusCode, Json<ApiResponse<Training>>)> {
	let training = app.meta_adapter.read_training(training_id).await?;

	Ok((StatusCode::OK, Json(ApiResponse::new(training))))
}

/// POST /training-admin - Create a training
#[axum::debug_handler]
pub async fn post_training(
	State(app): State<App>,
	Json(data): Json<CreateTraining>,
) -> ClResult<(StatusCode, Json<ApiResponse<Training>>)> {
	let training_id = app.meta_adapter.create_training(&data).await?;
	info!(training_id, title = %data.title, "POST /training-admin - Training created");

	let training = app.meta_adapter.read_training(training_id).await?;
	Ok((StatusCode::CREATED, Json(ApiResponse::new(training))))
}

/// PATCH /training-admin/{id} - Update a training
#[axum::debug_handler]
pub async fn patch_training(
	State(app): State<App>,
	Path(training_id): Path<i64>,
	Json(data): Json<UpdateTrainingData>,
) -> ClResult<(StatusCode, Json<ApiResponse<Training>>)> {
	info!(training_id, "PATCH /training-admin/:id - Updating training");

	app.meta_adapter.update_training(training_id, &data).await?;
	let training = app.meta_adapter.read_training(training_id).await?;

	Ok((StatusCode::OK, Json(ApiResponse::new(training))))
}

/// DELETE /training-admin/{id} - Delete a training with everything below it
#[axum::debug_handler]
pub async fn delete_training(
	State(app): State<App>,
	Path(training_id): Path<i64>,
) -> ClResult<(StatusCode, Json<SuccessResponse>)> {
	info!(training_id, "DELETE /training-admin/:id - Deleting training");

	app.meta_adapter.delete_training(training_id).await?;

	Ok((StatusCode::OK, Json(SuccessResponse::ok())))
}

// vim: ts=4
