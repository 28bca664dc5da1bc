//! API routes

use axum::{
	middleware,
	routing::{delete, get, patch},
	Json, Router,
};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use curricula_admin::{lesson, module, perm::require_admin, permission, submodule, training};
use curricula_core::app::VERSION;
use curricula_core::middleware::require_auth;

use crate::prelude::*;

#[derive(Debug, Serialize)]
struct Health {
	status: &'static str,
	version: &'static str,
}

async fn get_health() -> Json<Health> {
	Json(Health { status: "ok", version: VERSION })
}

fn init_admin(app: &App) -> Router<App> {
	Router::new()
		// Trainings
		.route("/training-admin", get(training::list_trainings).post(training::post_training))
		.route(
			"/training-admin/{id}",
			get(training::get_training)
				.patch(training::patch_training)
				.delete(training::delete_training),
		)
		.route(
			"/training-admin/permissions/{id}",
			get(permission::get_training_permissions)
				.patch(permission::patch_training_permissions),
		)
		// Modules
		.route("/training-modules-admin", get(module::list_modules).post(module::post_module))
		.route(
			"/training-modules-admin/{id}",
			get(module::get_module).patch(module::patch_module).delete(module::delete_module),
		)
		.route(
			"/training-modules-admin/permissions/{id}",
			get(permission::get_module_permissions).patch(permission::patch_module_permissions),
		)
		// Submodules
		.route(
			"/sub-modules-admin",
			get(submodule::list_submodules).post(submodule::post_submodule),
		)
		.route(
			"/sub-modules-admin/{id}",
			get(submodule::get_submodule)
				.patch(submodule::patch_submodule)
				.delete(submodule::delete_submodule),
		)
		.route(
			"/sub-modules-admin/permissions/{id}",
			patch(permission::patch_submodule_permissions)
				.get(permission::get_submodule_permissions),
		)
		// Lessons
		.route("/lessons-admin", get(lesson::list_lessons).post(lesson::post_lesson))
		.route("/lessons-admin/{id}", delete(lesson::delete_lesson))
		// Layers run bottom-up: authenticate first, then check the role
		.layer(middleware::from_fn(require_admin))
		.layer(middleware::from_fn_with_state(app.clone(), require_auth))
}

/// Build the complete application router
pub fn init(app: App) -> Router {
	Router::new()
		.route("/health", get(get_health))
		.merge(init_admin(&app))
		.layer(TraceLayer::new_for_http())
		.with_state(app)
}

// vim: ts=4
