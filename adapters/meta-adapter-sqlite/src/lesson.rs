//! Lessons. They carry no permissions of their own.

use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

use crate::hierarchy;
use crate::utils::*;
use curricula_types::meta_adapter::*;
use curricula_types::prelude::*;
use curricula_types::types::{Page, PageQuery};

fn from_row(row: &SqliteRow) -> Result<Lesson, sqlx::Error> {
	Ok(Lesson {
		lesson_id: row.try_get("lesson_id")?,
		submodule_id: row.try_get("submodule_id")?,
		title: row.try_get("title")?,
		content: row.try_get("content")?,
		order: row.try_get("sort_order")?,
		created_at: row.try_get("created_at").map(Timestamp)?,
	})
}

pub(crate) async fn list(
	dbr: &SqlitePool,
	submodule_id: i64,
	page: &PageQuery,
) -> ClResult<Page<Lesson>> {
	let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM lessons WHERE submodule_id=?")
		.bind(submodule_id)
		.fetch_one(dbr)
		.await
		.inspect_err(inspect)
		.map_err(|_| Error::DbError)?;

	let rows = sqlx::query(
		"SELECT lesson_id, submodule_id, title, content, sort_order, created_at
		FROM lessons WHERE submodule_id=?
		ORDER BY sort_order, lesson_id LIMIT ? OFFSET ?",
	)
	.bind(submodule_id)
	.bind(i64::from(page.take()))
	.bind(i64::from(page.offset()))
	.fetch_all(dbr)
	.await
	.inspect_err(inspect)
	.map_err(|_| Error::DbError)?;

	Ok(Page {
		items: collect_res(rows.iter().map(from_row))?,
		total: u64::try_from(total).unwrap_or_default(),
	})
}

/// Create a lesson under an existing submodule
pub(crate) async fn create(db: &SqlitePool, data: &CreateLesson) -> ClResult<i64> {
	let mut tx = db.begin().await.inspect_err(inspect).map_err(|_| Error::DbError)?;

	if !hierarchy::exists(&mut tx, Level::Submodule, data.submodule_id).await? {
		return Err(Error::NotFound);
	}

	let res = sqlx::query(
		"INSERT INTO lessons (submodule_id, title, content, sort_order)
		VALUES (?1, ?2, ?3, coalesce(?4,
			(SELECT coalesce(max(sort_order), 0) + 1 FROM lessons WHERE submodule_id=?1)))
		RETURNING lesson_id",
	)
	.bind(data.submodule_id)
	.bind(&data.title)
	.bind(&data.content)
	.bind(data.order)
	.fetch_one(&mut *tx)
	.await
	.inspect_err(inspect)
	.map_err(|_| Error::DbError)?;
	let lesson_id = res.try_get::<i64, _>(0).inspect_err(inspect).map_err(|_| Error::DbError)?;

	tx.commit().await.inspect_err(inspect).map_err(|_| Error::DbError)?;
	Ok(lesson_id)
}

pub(crate) async fn delete(db: &SqlitePool, lesson_id: i64) -> ClResult<()> {
	let res = sqlx::query("DELETE FROM lessons WHERE lesson_id=?")
		.bind(lesson_id)
		.execute(db)
		.await
		.inspect_err(inspect)
		.map_err(|_| Error::DbError)?;

	if res.rows_affected() == 0 {
		return Err(Error::NotFound);
	}
	Ok(())
}

// vim: ts=4
