//! Submodule management operations

use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

use crate::hierarchy;
use crate::utils::*;
use curricula_types::meta_adapter::*;
use curricula_types::prelude::*;
use curricula_types::types::{Page, PageQuery};

fn from_row(row: &SqliteRow) -> Result<Submodule, sqlx::Error> {
	Ok(Submodule {
		submodule_id: row.try_get("submodule_id")?,
		module_id: row.try_get("module_id")?,
		title: row.try_get("title")?,
		description: row.try_get("description")?,
		thumbnail: row.try_get("thumbnail")?,
		order: row.try_get("sort_order")?,
		created_at: row.try_get("created_at").map(Timestamp)?,
	})
}

pub(crate) async fn read(dbr: &SqlitePool, submodule_id: i64) -> ClResult<Submodule> {
	let res = sqlx::query(
		"SELECT submodule_id, module_id, title, description, thumbnail, sort_order, created_at
		FROM submodules WHERE submodule_id=?",
	)
	.bind(submodule_id)
	.fetch_one(dbr)
	.await;

	map_res(res, |row| from_row(&row))
}

pub(crate) async fn list(
	dbr: &SqlitePool,
	module_id: Option<i64>,
	page: &PageQuery,
) -> ClResult<Page<Submodule>> {
	let mut count_query = sqlx::QueryBuilder::new("SELECT COUNT(*) FROM submodules");
	if let Some(module_id) = module_id {
		count_query.push(" WHERE module_id=").push_bind(module_id);
	}
	let total = count_query
		.build_query_scalar::<i64>()
		.fetch_one(dbr)
		.await
		.inspect_err(inspect)
		.map_err(|_| Error::DbError)?;

	let mut query = sqlx::QueryBuilder::new(
		"SELECT submodule_id, module_id, title, description, thumbnail, sort_order, created_at
		FROM submodules",
	);
	if let Some(module_id) = module_id {
		query.push(" WHERE module_id=").push_bind(module_id);
	}
	query
		.push(" ORDER BY sort_order, submodule_id LIMIT ")
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

/// Create a submodule under an existing module
pub(crate) async fn create(db: &SqlitePool, data: &CreateSubmodule) -> ClResult<i64> {
	let mut tx = db.begin().await.inspect_err(inspect).map_err(|_| Error::DbError)?;

	if !hierarchy::exists(&mut tx, Level::Module, data.module_id).await? {
		return Err(Error::NotFound);
	}

	let res = sqlx::query(
		"INSERT INTO submodules (module_id, title, description, thumbnail, sort_order)
		VALUES (?1, ?2, ?3, ?4, coalesce(?5,
			(SELECT coalesce(max(sort_order), 0) + 1 FROM submodules WHERE module_id=?1)))
		RETURNING submodule_id",
	)
	.bind(data.module_id)
	.bind(&data.title)
	.bind(&data.description)
	.bind(&data.thumbnail)
	.bind(data.order)
	.fetch_one(&mut *tx)
	.await
	.inspect_err(inspect)
	.map_err(|_| Error::DbError)?;
	let submodule_id =
		res.try_get::<i64, _>(0).inspect_err(inspect).map_err(|_| Error::DbError)?;

	tx.commit().await.inspect_err(inspect).map_err(|_| Error::DbError)?;
	Ok(submodule_id)
}

pub(crate) async fn update(
	db: &SqlitePool,
	submodule_id: i64,
	data: &UpdateSubmoduleData,
) -> ClResult<()> {
	require_not_null(&data.title, "title")?;
	require_not_null(&data.order, "order")?;

	let mut query = sqlx::QueryBuilder::new("UPDATE submodules SET ");
	let mut has_updates = false;

	has_updates = push_patch!(query, has_updates, "title", &data.title);
	has_updates = push_patch!(query, has_updates, "description", &data.description);
	has_updates = push_patch!(query, has_updates, "thumbnail", &data.thumbnail);
	has_updates = push_patch!(query, has_updates, "sort_order", &data.order);

	if !has_updates {
		return Ok(());
	}

	query.push(" WHERE submodule_id=").push_bind(submodule_id);

	let res =
		query.build().execute(db).await.inspect_err(inspect).map_err(|_| Error::DbError)?;

	if res.rows_affected() == 0 {
		return Err(Error::NotFound);
	}

	Ok(())
}

/// Delete a submodule with its lessons and permissions
pub(crate) async fn delete(db: &SqlitePool, submodule_id: i64) -> ClResult<()> {
	let mut tx = db.begin().await.inspect_err(inspect).map_err(|_| Error::DbError)?;

	if !hierarchy::exists(&mut tx, Level::Submodule, submodule_id).await? {
		return Err(Error::NotFound);
	}
	let deleted = hierarchy::delete_subtree(&mut tx, Level::Submodule, &[submodule_id]).await?;

	tx.commit().await.inspect_err(inspect).map_err(|_| Error::DbError)?;
	debug!(submodule_id, deleted, "Submodule deleted");
	Ok(())
}

// vim: ts=4
