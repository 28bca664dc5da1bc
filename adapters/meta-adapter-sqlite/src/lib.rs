//! SQLite implementation of the Curricula meta adapter
//!
//! Stores the training hierarchy (trainings, modules, submodules, lessons) and
//! the per-user access permissions of the first three levels.

use async_trait::async_trait;
use sqlx::sqlite::{self, SqlitePool};
use std::path::Path;

use curricula_types::meta_adapter::*;
use curricula_types::prelude::*;
use curricula_types::types::{Page, PageQuery};

mod hierarchy;
mod lesson;
mod module;
mod permission;
mod schema;
mod submodule;
mod training;
mod utils;

use utils::inspect;

#[derive(Debug)]
pub struct MetaAdapterSqlite {
	db: SqlitePool,
}

impl MetaAdapterSqlite {
	/// Open (or create) the database in the `path` directory
	pub async fn new(path: impl AsRef<Path>) -> ClResult<Self> {
		tokio::fs::create_dir_all(path.as_ref()).await?;

		let opts = sqlite::SqliteConnectOptions::new()
			.filename(path.as_ref().join("meta.db"))
			.create_if_missing(true)
			.journal_mode(sqlite::SqliteJournalMode::Wal);
		let db = sqlite::SqlitePoolOptions::new()
			.max_connections(5)
			.connect_with(opts)
			.await
			.inspect_err(inspect)
			.map_err(|_| Error::DbError)?;

		schema::init_db(&db).await.inspect_err(inspect).map_err(|_| Error::DbError)?;
		info!(path = %path.as_ref().display(), "Meta database opened");

		Ok(Self { db })
	}
}

#[async_trait]
impl MetaAdapter for MetaAdapterSqlite {
	// Trainings
	//***********
	async fn read_training(&self, training_id: i64) -> ClResult<Training> {
		training::read(&self.db, training_id).await
	}

	async fn list_trainings(
		&self,
		opts: &ListTrainingOptions,
		page: &PageQuery,
	) -> ClResult<Page<Training>> {
		training::list(&self.db, opts, page).await
	}

	async fn create_training(&self, data: &CreateTraining) -> ClResult<i64> {
		training::create(&self.db, data).await
	}

	async fn update_training(&self, training_id: i64, data: &UpdateTrainingData) -> ClResult<()> {
		training::update(&self.db, training_id, data).await
	}

	async fn delete_training(&self, training_id: i64) -> ClResult<()> {
		training::delete(&self.db, training_id).await
	}

	// Modules
	//*********
	async fn read_module(&self, module_id: i64) -> ClResult<Module> {
		module::read(&self.db, module_id).await
	}

	async fn list_modules(
		&self,
		training_id: Option<i64>,
		page: &PageQuery,
	) -> ClResult<Page<Module>> {
		module::list(&self.db, training_id, page).await
	}

	async fn create_module(&self, data: &CreateModule) -> ClResult<i64> {
		module::create(&self.db, data).await
	}

	async fn update_module(&self, module_id: i64, data: &UpdateModuleData) -> ClResult<()> {
		module::update(&self.db, module_id, data).await
	}

	async fn delete_module(&self, module_id: i64) -> ClResult<()> {
		module::delete(&self.db, module_id).await
	}

	// Submodules
	//************
	async fn read_submodule(&self, submodule_id: i64) -> ClResult<Submodule> {
		submodule::read(&self.db, submodule_id).await
	}

	async fn list_submodules(
		&self,
		module_id: Option<i64>,
		page: &PageQuery,
	) -> ClResult<Page<Submodule>> {
		submodule::list(&self.db, module_id, page).await
	}

	async fn create_submodule(&self, data: &CreateSubmodule) -> ClResult<i64> {
		submodule::create(&self.db, data).await
	}

	async fn update_submodule(
		&self,
		submodule_id: i64,
		data: &UpdateSubmoduleData,
	) -> ClResult<()> {
		submodule::update(&self.db, submodule_id, data).await
	}

	async fn delete_submodule(&self, submodule_id: i64) -> ClResult<()> {
		submodule::delete(&self.db, submodule_id).await
	}

	// Lessons
	//*********
	async fn list_lessons(&self, submodule_id: i64, page: &PageQuery) -> ClResult<Page<Lesson>> {
		lesson::list(&self.db, submodule_id, page).await
	}

	async fn create_lesson(&self, data: &CreateLesson) -> ClResult<i64> {
		lesson::create(&self.db, data).await
	}

	async fn delete_lesson(&self, lesson_id: i64) -> ClResult<()> {
		lesson::delete(&self.db, lesson_id).await
	}

	// Permissions
	//*************
	async fn update_permissions(
		&self,
		level: Level,
		entity_id: i64,
		change: &PermissionChange,
	) -> ClResult<()> {
		permission::update(&self.db, level, entity_id, change).await
	}

	async fn list_permissions(&self, level: Level, entity_id: i64) -> ClResult<Vec<UserId>> {
		permission::list(&self.db, level, entity_id).await
	}
}

// vim: ts=4
