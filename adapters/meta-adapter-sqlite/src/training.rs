//! Training management operations
//!
//! Handles CRUD operations for trainings, including the cascading deletion of
//! all modules, submodules, lessons and permissions below a training.

use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

use crate::hierarchy;
use crate::utils::*;
use curricula_types::meta_adapter::*;
use curricula_types::prelude::*;
use curricula_types::types::{Page, PageQuery};

fn from_row(row: &SqliteRow) -> Result<Training, sqlx::Error> {
	let status: &str = row.try_get("status")?;
	Ok(Training {
		training_id: row.try_get("training_id")?,
		title: row.try_get("title")?,
		description: row.try_get("description")?,
		tutor: row.try_get("tutor")?,
		thumbnail: row.try_get("thumbnail")?,
		order: row.try_get("sort_order")?,
		status: TrainingStatus::from_db(status)
			.ok_or_else(|| sqlx::Error::Decode("invalid training status".into()))?,
		created_at: row.try_get("created_at").map(Timestamp)?,
	})
}

/// Read a single training by ID
pub(crate) async fn read(dbr: &SqlitePool, training_id: i64) -> ClResult<Training> {
	let res = sqlx::query(
		"SELECT training_id, title, description, tutor, thumbnail, sort_order, status, created_at
		FROM trainings WHERE training_id=?",
	)
	.bind(training_id)
	.fetch_one(dbr)
	.await;

	map_res(res, |row| from_row(&row))
}

fn push_filter<'a>(query: &mut sqlx::QueryBuilder<'a, sqlx::Sqlite>, opts: &'a ListTrainingOptions) {
	query.push(" WHERE 1=1");
	if let Some(status) = opts.status {
		query.push(" AND status=").push_bind(status.as_db());
	}
	if let Some(q) = &opts.q {
		let pattern = q.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_");
		query.push(" AND title LIKE '%' || ").push_bind(pattern).push(" || '%' ESCAPE '\\'");
	}
}

/// List trainings, ordered by their sort order
pub(crate) async fn list(
	dbr: &SqlitePool,
	opts: &ListTrainingOptions,
	page: &PageQuery,
) -> ClResult<Page<Training>> {
	let mut count_query = sqlx::QueryBuilder::new("SELECT COUNT(*) FROM trainings");
	push_filter(&mut count_query, opts);
	let total: i64 = count_query
		.build_query_scalar::<i64>()
		.fetch_one(dbr)
		.await
		.inspect_err(inspect)
		.map_err(|_| Error::DbError)?;

	let mut query = sqlx::QueryBuilder::new(
		"SELECT training_id, title, description, tutor, thumbnail, sort_order, status, created_at
		FROM trainings",
	);
	push_filter(&mut query, opts);
	query
		.push(" ORDER BY sort_order, training_id LIMIT ")
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

/// Create a new training. Without an explicit order it is appended last.
pub(crate) async fn create(db: &SqlitePool, data: &CreateTraining) -> ClResult<i64> {
	let status = data.status.unwrap_or(TrainingStatus::Draft);
	let res = sqlx::query(
		"INSERT INTO trainings (title, description, tutor, thumbnail, sort_order, status)
		VALUES (?, ?, ?, ?, coalesce(?, (SELECT coalesce(max(sort_order), 0) + 1 FROM trainings)), ?)
		RETURNING training_id",
	)
	.bind(&data.title)
	.bind(&data.description)
	.bind(&data.tutor)
	.bind(&data.thumbnail)
	.bind(data.order)
	.bind(status.as_db())
	.fetch_one(db)
	.await
	.inspect_err(inspect)
	.map_err(|_| Error::DbError)?;

	res.try_get::<i64, _>(0).inspect_err(inspect).map_err(|_| Error::DbError)
}

/// Update an existing training
pub(crate) async fn update(
	db: &SqlitePool,
	training_id: i64,
	data: &UpdateTrainingData,
) -> ClResult<()> {
	require_not_null(&data.title, "title")?;
	require_not_null(&data.order, "order")?;
	require_not_null(&data.status, "status")?;

	// Build dynamic UPDATE query based on what fields are present
	let mut query = sqlx::QueryBuilder::new("UPDATE trainings SET ");
	let mut has_updates = false;

	has_updates = push_patch!(query, has_updates, "title", &data.title);
	has_updates = push_patch!(query, has_updates, "description", &data.description);
	has_updates = push_patch!(query, has_updates, "tutor", &data.tutor);
	has_updates = push_patch!(query, has_updates, "thumbnail", &data.thumbnail);
	has_updates = push_patch!(query, has_updates, "sort_order", &data.order);
	has_updates = push_patch!(query, has_updates, "status", &data.status, |v| v.as_db());

	if !has_updates {
		// No fields to update, but not an error
		return Ok(());
	}

	query.push(" WHERE training_id=").push_bind(training_id);

	let res =
		query.build().execute(db).await.inspect_err(inspect).map_err(|_| Error::DbError)?;

	if res.rows_affected() == 0 {
		return Err(Error::NotFound);
	}

	Ok(())
}

/// Delete a training and all its associated data (cascading delete)
pub(crate) async fn delete(db: &SqlitePool, training_id: i64) -> ClResult<()> {
	let mut tx = db.begin().await.inspect_err(inspect).map_err(|_| Error::DbError)?;

	if !hierarchy::exists(&mut tx, Level::Training, training_id).await? {
		return Err(Error::NotFound);
	}
	let deleted = hierarchy::delete_subtree(&mut tx, Level::Training, &[training_id]).await?;

	tx.commit().await.inspect_err(inspect).map_err(|_| Error::DbError)?;
	debug!(training_id, deleted, "Training deleted");
	Ok(())
}

// vim: ts=4
