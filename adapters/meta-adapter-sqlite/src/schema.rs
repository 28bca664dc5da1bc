//! Database schema initialization
//!
//! This module handles creating tables and indexes to ensure the database
//! schema is up to date.

use sqlx::SqlitePool;

/// Initialize the database schema with all required tables and indexes
pub(crate) async fn init_db(db: &SqlitePool) -> Result<(), sqlx::Error> {
	let mut tx = db.begin().await?;

	/***********/
	/* Content */
	/***********/

	// Trainings
	//***********
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS trainings (
		training_id integer NOT NULL,
		title text NOT NULL,
		description text,
		tutor text,
		thumbnail text,
		sort_order integer NOT NULL DEFAULT 0,
		status char(1) NOT NULL DEFAULT 'D',	-- 'A' - Active, 'D' - Draft, 'X' - Archived
		created_at datetime DEFAULT (unixepoch()),
		PRIMARY KEY(training_id)
	)",
	)
	.execute(&mut *tx)
	.await?;

	// Modules
	//*********
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS modules (
		module_id integer NOT NULL,
		training_id integer NOT NULL,
		title text NOT NULL,
		description text,
		thumbnail text,
		sort_order integer NOT NULL DEFAULT 0,
		created_at datetime DEFAULT (unixepoch()),
		PRIMARY KEY(module_id)
	)",
	)
	.execute(&mut *tx)
	.await?;
	sqlx::query("CREATE INDEX IF NOT EXISTS idx_modules_training ON modules(training_id)")
		.execute(&mut *tx)
		.await?;

	// Submodules
	//************
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS submodules (
		submodule_id integer NOT NULL,
		module_id integer NOT NULL,
		title text NOT NULL,
		description text,
		thumbnail text,
		sort_order integer NOT NULL DEFAULT 0,
		created_at datetime DEFAULT (unixepoch()),
		PRIMARY KEY(submodule_id)
	)",
	)
	.execute(&mut *tx)
	.await?;
	sqlx::query("CREATE INDEX IF NOT EXISTS idx_submodules_module ON submodules(module_id)")
		.execute(&mut *tx)
		.await?;

	// Lessons
	//*********
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS lessons (
		lesson_id integer NOT NULL,
		submodule_id integer NOT NULL,
		title text NOT NULL,
		content text,
		sort_order integer NOT NULL DEFAULT 0,
		created_at datetime DEFAULT (unixepoch()),
		PRIMARY KEY(lesson_id)
	)",
	)
	.execute(&mut *tx)
	.await?;
	sqlx::query("CREATE INDEX IF NOT EXISTS idx_lessons_submodule ON lessons(submodule_id)")
		.execute(&mut *tx)
		.await?;

	/***************/
	/* Permissions */
	/***************/

	// One row per (user, entity), the primary key keeps them unique
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS permission_user_trainings (
		user_id integer NOT NULL,
		training_id integer NOT NULL,
		created_at datetime DEFAULT (unixepoch()),
		PRIMARY KEY(user_id, training_id)
	)",
	)
	.execute(&mut *tx)
	.await?;
	sqlx::query(
		"CREATE INDEX IF NOT EXISTS idx_perm_trainings_entity ON permission_user_trainings(training_id)",
	)
	.execute(&mut *tx)
	.await?;

	sqlx::query(
		"CREATE TABLE IF NOT EXISTS permission_user_modules (
		user_id integer NOT NULL,
		module_id integer NOT NULL,
		created_at datetime DEFAULT (unixepoch()),
		PRIMARY KEY(user_id, module_id)
	)",
	)
	.execute(&mut *tx)
	.await?;
	sqlx::query(
		"CREATE INDEX IF NOT EXISTS idx_perm_modules_entity ON permission_user_modules(module_id)",
	)
	.execute(&mut *tx)
	.await?;

	sqlx::query(
		"CREATE TABLE IF NOT EXISTS permission_user_submodules (
		user_id integer NOT NULL,
		submodule_id integer NOT NULL,
		created_at datetime DEFAULT (unixepoch()),
		PRIMARY KEY(user_id, submodule_id)
	)",
	)
	.execute(&mut *tx)
	.await?;
	sqlx::query(
		"CREATE INDEX IF NOT EXISTS idx_perm_submodules_entity ON permission_user_submodules(submodule_id)",
	)
	.execute(&mut *tx)
	.await?;

	tx.commit().await?;

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use sqlx::sqlite::SqlitePoolOptions;

	#[tokio::test]
	async fn test_init_db_tables() {
		let db = SqlitePoolOptions::new()
			.max_connections(1)
			.connect("sqlite::memory:")
			.await
			.expect("open in-memory db");

		init_db(&db).await.expect("init schema");
		init_db(&db).await.expect("init is idempotent");

		let tables: Vec<String> = sqlx::query_scalar(
			"SELECT name FROM sqlite_master WHERE type='table' ORDER BY name",
		)
		.fetch_all(&db)
		.await
		.expect("list tables");

		assert_eq!(
			tables,
			vec![
				"lessons",
				"modules",
				"permission_user_modules",
				"permission_user_submodules",
				"permission_user_trainings",
				"submodules",
				"trainings",
			]
		);
	}
}

// vim: ts=4
