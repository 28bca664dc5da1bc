//! Admin lesson handlers

use axum::{
	extract::{Path, Query, State},
	http::StatusCode,
	Json,
};
use serde::{Deserialize, Serialize};

use curricula_types::meta_adapter::{CreateLesson, Lesson};
use curricula_types::types::{ApiResponse, PageQuery, SuccessResponse};

use crate::prelude::*;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListLessonsQuery {
	pub submodule_id: i64,
	pub page: Option<u32>,
	pub take: Option<u32>,
}

/// Identifier of a newly created lesson
#[derive(Debug, Serialize)]
pub struct LessonCreated {
	pub id: i64,
}

/// GET /lessons-admin?submoduleId= - List the lessons of a submodule
#[axum::debug_handler]
pub async fn list_lessons(
	State(app): State<App>,
	Query(query): Query<ListLessonsQuery>,
) -> ClResult<(StatusCode, Json<ApiResponse<Vec<Lesson>>>)> {
	info!(
		submodule_id = query.submodule_id,
		page = ?query.page,
		take = ?query.take,
		"GET /lessons-admin - Listing lessons"
	);

	let page = PageQuery { page: query.page, take: query.take };
	let res = app.meta_adapter.list_lessons(query.submodule_id, &page).await?;

	Ok((StatusCode::OK, Json(ApiResponse::with_pagination(res.items, &page, res.total))))
}

#[axum::debug_handler]
pub async fn post_lesson(
	State(app): State<App>,
	Json(data): Json<CreateLesson>,
) -> ClResult<(StatusCode, Json<ApiResponse<LessonCreated>>)> {
	let lesson_id = app.meta_adapter.create_lesson(&data).await?;
	info!(lesson_id, submodule_id = data.submodule_id, "POST /lessons-admin - Lesson created");

	Ok((StatusCode::CREATED, Json(ApiResponse::new(LessonCreated { id: lesson_id }))))
}

#[axum::debug_handler]
pub async fn delete_lesson(
	State(app): State<App>,
	Path(lesson_id): Path<i64>,
) -> ClResult<(StatusCode, Json<SuccessResponse>)> {
	info!(lesson_id, "DELETE /lessons-admin/:id - Deleting lesson");

	app.meta_adapter.delete_lesson(lesson_id).await?;

	Ok((StatusCode::OK, Json(SuccessResponse::ok())))
}

// vim: ts=4
