//! Module management operations

use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

use crate::hierarchy;
use crate::utils::*;
use curricula_types::meta_adapter::*;
use curricula_types::prelude::*;
use curricula_types::types::{Page, PageQuery};

fn from_row(row: &SqliteRow) -> Result<Module, sqlx::Error> {
	Ok(Module {
		module_id: row.try_get("module_id")?,
		training_id: row.try_get("training_id")?,
		title: row.try_get("title")?,
		description: row.try_get("description")?,
		thumbnail: row.try_get("thumbnail")?,
		order: row.try_get("sort_order")?,
		created_at: row.try_get("created_at").map(Timestamp)?,
	})
}

pub(crate) async fn read(dbr: &SqlitePool, module_id: i64) -> ClResult<Module> {
	let res = sqlx::query(
		"SELECT module_id, training_id, title, description, thumbnail, sort_order, created_at
		FROM modules WHERE module_id=?",
	)
	.bind(module_id)
	.fetch_one(dbr)
	.await;

	map_res(res, |row| from_row(&row))
}

/// List modules, optionally restricted to one training
pub(crate) async fn list(
	dbr: &SqlitePool,
	training_id: Option<i64>,
	page: &PageQuery,
) -> ClResult<Page<Module>> {
	let mut count_query = sqlx::QueryBuilder::new("SELECT COUNT(*) FROM modules");
	if let Some(training_id) = training_id {
		count_query.push(" WHERE training_id=").push_bind(training_id);
	}
	let total = count_query
		.build_query_scalar::<i64>()
		.fetch_one(dbr)
		.await
		.inspect_err(inspect)
		.map_err(|_| Error::DbError)?;

	let mut query = sqlx::QueryBuilder::new(
		"SELECT module_id, training_id, title, description, thumbnail, sort_order, created_at
		FROM modules",
	);
	if let Some(training_id) = training_id {
		query.push(" WHERE training_id=").push_bind(training_id);
	}
	query
		.push(" ORDER BY sort_order, module_id LIMIT ")
		.push_bind(i64::from(page.take()))
		.push(" OFFSET ")
		.push_bind(i64::from(page.offset()));

	let rows =
		query.build().fetch_all(dbr).await.inspect_err(inspect).map_err(|_| Error::DbError)?;

	Ok(Page {
		items: collect_res(rows.iter().map(from_row))?,
		total: u64::try_from(total).unwrap_or_default(),
	})
}

/// Create a module under an existing training
pub(crate) async fn create(db: &SqlitePool, data: &CreateModule) -> ClResult<i64> {
	let mut tx = db.begin().await.inspect_err(inspect).map_err(|_| Error::DbError)?;

	if !hierarchy::exists(&mut tx, Level::Training, data.training_id).await? {
		return Err(Error::NotFound);
	}

	let res = sqlx::query(
		"INSERT INTO modules (training_id, title, description, thumbnail, sort_order)
		VALUES (?1, ?2, ?3, ?4, coalesce(?5,
			(SELECT coalesce(max(sort_order), 0) + 1 FROM modules WHERE training_id=?1)))
		RETURNING module_id",
	)
	.bind(data.training_id)
	.bind(&data.title)
	.bind(&data.description)
	.bind(&data.thumbnail)
	.bind(data.order)
	.fetch_one(&mut *tx)
	.await
	.inspect_err(inspect)
	.map_err(|_| Error::DbError)?;
	let module_id = res.try_get::<i64, _>(0).inspect_err(inspect).map_err(|_| Error::DbError)?;

	tx.commit().await.inspect_err(inspect).map_err(|_| Error::DbError)?;
	Ok(module_id)
}

pub(crate) async fn update(
	db: &SqlitePool,
	module_id: i64,
	data: &UpdateModuleData,
) -> ClResult<()> {
	require_not_null(&data.title, "title")?;
	require_not_null(&data.order, "order")?;

	let mut query = sqlx::QueryBuilder::new("UPDATE modules SET ");
	let mut has_updates = false;

	has_updates = push_patch!(query, has_updates, "title", &data.title);
	has_updates = push_patch!(query, has_updates, "description", &data.description);
	has_updates = push_patch!(query, has_updates, "thumbnail", &data.thumbnail);
	has_updates = push_patch!(query, has_updates, "sort_order", &data.order);

	if !has_updates {
		return Ok(());
	}

	query.push(" WHERE module_id=").push_bind(module_id);

	let res =
		query.build().execute(db).await.inspect_err(inspect).map_err(|_| Error::DbError)?;

	if res.rows_affected() == 0 {
		return Err(Error::NotFound);
	}

	Ok(())
}

/// Delete a module with its submodules, lessons and permissions
pub(crate) async fn delete(db: &SqlitePool, module_id: i64) -> ClResult<()> {
	let mut tx = db.begin().await.inspect_err(inspect).map_err(|_| Error::DbError)?;

	if !hierarchy::exists(&mut tx, Level::Module, module_id).await? {
		return Err(Error::NotFound);
	}
	let deleted = hierarchy::delete_subtree(&mut tx, Level::Module, &[module_id]).await?;

	tx.commit().await.inspect_err(inspect).map_err(|_| Error::DbError)?;
	debug!(module_id, deleted, "Module deleted");
	Ok(())
}

// vim: ts=4
