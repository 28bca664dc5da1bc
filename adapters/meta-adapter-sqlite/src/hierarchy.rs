//! Level-generic hierarchy queries
//!
//! Parent and child lookups, relative resolution and cascading subtree
//! deletion. Table and column names come from the static `Level` layout table,
//! only ids are bound as parameters.

use sqlx::{Row, SqliteConnection};

use crate::utils::*;
use curricula_types::prelude::*;

/// Entities related to one entity of the hierarchy
#[derive(Debug, Default)]
pub(crate) struct Relatives {
	/// One entry per ancestor level, nearest first
	pub ancestors: Vec<(Level, i64)>,
	/// All entities of each descendant level, nearest level first
	pub descendants: Vec<(Level, Vec<i64>)>,
}

/// Check whether an entity exists
pub(crate) async fn exists(conn: &mut SqliteConnection, level: Level, id: i64) -> ClResult<bool> {
	let table = level.table();
	let count: i64 = sqlx::query_scalar(&format!(
		"SELECT COUNT(*) FROM {} WHERE {}=?",
		table.table, table.id_column
	))
	.bind(id)
	.fetch_one(&mut *conn)
	.await
	.inspect_err(inspect)
	.map_err(|_| Error::DbError)?;

	Ok(count > 0)
}

/// Read the parent id of an entity. `None` for top-level entities.
pub(crate) async fn parent_id(
	conn: &mut SqliteConnection,
	level: Level,
	id: i64,
) -> ClResult<Option<i64>> {
	let table = level.table();
	let Some(parent_column) = table.parent_column else {
		return Ok(None);
	};

	let res = sqlx::query(&format!(
		"SELECT {} FROM {} WHERE {}=?",
		parent_column, table.table, table.id_column
	))
	.bind(id)
	.fetch_one(&mut *conn)
	.await;

	map_res(res, |row| row.try_get::<i64, _>(0)).map(Some)
}

/// Ids of all direct children of the given parents at `child_level`
pub(crate) async fn child_ids(
	conn: &mut SqliteConnection,
	child_level: Level,
	parent_ids: &[i64],
) -> ClResult<Vec<i64>> {
	let table = child_level.table();
	let Some(parent_column) = table.parent_column else {
		return Ok(Vec::new());
	};

	let mut ids = Vec::new();
	for chunk in parent_ids.chunks(BIND_CHUNK) {
		let mut query = sqlx::QueryBuilder::new(format!(
			"SELECT {} FROM {} WHERE {} IN ",
			table.id_column, table.table, parent_column
		));
		push_in_ids(&mut query, chunk.iter().copied());

		let rows = query
			.build()
			.fetch_all(&mut *conn)
			.await
			.inspect_err(inspect)
			.map_err(|_| Error::DbError)?;
		ids.extend(collect_res(rows.iter().map(|row| row.try_get::<i64, _>(0)))?);
	}
	ids.sort_unstable();

	Ok(ids)
}

/// Delete every row of `table` whose `column` is one of `ids`
async fn delete_in(
	conn: &mut SqliteConnection,
	table: &str,
	column: &str,
	ids: &[i64],
) -> ClResult<u64> {
	let mut deleted = 0;
	for chunk in ids.chunks(BIND_CHUNK) {
		let mut query =
			sqlx::QueryBuilder::new(format!("DELETE FROM {} WHERE {} IN ", table, column));
		push_in_ids(&mut query, chunk.iter().copied());

		let res = query
			.build()
			.execute(&mut *conn)
			.await
			.inspect_err(inspect)
			.map_err(|_| Error::DbError)?;
		deleted += res.rows_affected();
	}
	Ok(deleted)
}

/// Resolve all ancestors and descendants of an entity
pub(crate) async fn relatives(
	conn: &mut SqliteConnection,
	level: Level,
	id: i64,
) -> ClResult<Relatives> {
	let mut res = Relatives::default();

	let mut current = (level, id);
	while let Some(parent_level) = current.0.parent() {
		let Some(pid) = parent_id(conn, current.0, current.1).await? else {
			break;
		};
		res.ancestors.push((parent_level, pid));
		current = (parent_level, pid);
	}

	let mut ids = vec![id];
	for child_level in level.descendants() {
		ids = child_ids(conn, child_level, &ids).await?;
		if ids.is_empty() {
			break;
		}
		res.descendants.push((child_level, ids.clone()));
	}

	Ok(res)
}

/// Delete entities together with everything below them.
///
/// Children go first, then the permission rows, then the entities themselves.
/// Lessons are removed along with their submodules.
pub(crate) async fn delete_subtree(
	conn: &mut SqliteConnection,
	level: Level,
	ids: &[i64],
) -> ClResult<u64> {
	if ids.is_empty() {
		return Ok(0);
	}

	// Collect each level's ids top-down, then delete bottom-up
	let mut levels: Vec<(Level, Vec<i64>)> = vec![(level, ids.to_vec())];
	for child_level in level.descendants() {
		let parent_ids = levels.last().map(|(_, ids)| ids.as_slice()).unwrap_or_default();
		let child = child_ids(conn, child_level, parent_ids).await?;
		if child.is_empty() {
			break;
		}
		levels.push((child_level, child));
	}

	let mut deleted = 0;
	for (lvl, lvl_ids) in levels.iter().rev() {
		let table = lvl.table();

		if *lvl == Level::Submodule {
			delete_in(conn, "lessons", "submodule_id", lvl_ids).await?;
		}
		delete_in(conn, table.perm_table, table.id_column, lvl_ids).await?;
		deleted += delete_in(conn, table.table, table.id_column, lvl_ids).await?;
	}

	Ok(deleted)
}

// vim: ts=4
