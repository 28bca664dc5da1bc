//! User access permissions and their propagation through the hierarchy

use sqlx::{Row, SqliteConnection, SqlitePool};

use crate::hierarchy::{self, Relatives};
use crate::utils::*;
use curricula_types::meta_adapter::PermissionChange;
use curricula_types::prelude::*;

/// Insert one permission row per (user, entity) pair. Existing rows are kept.
async fn insert_rows(
	conn: &mut SqliteConnection,
	level: Level,
	entity_ids: &[i64],
	users: &[UserId],
) -> ClResult<u64> {
	if entity_ids.is_empty() || users.is_empty() {
		return Ok(0);
	}
	let table = level.table();

	let pairs: Vec<(i64, i64)> = users
		.iter()
		.flat_map(|user| entity_ids.iter().map(move |id| (user.0, *id)))
		.collect();

	let mut inserted = 0;
	// Two binds per row
	for chunk in pairs.chunks(BIND_CHUNK / 2) {
		let mut query = sqlx::QueryBuilder::new(format!(
			"INSERT OR IGNORE INTO {} (user_id, {}) ",
			table.perm_table, table.id_column
		));
		query.push_values(chunk, |mut b, (user_id, entity_id)| {
			b.push_bind(*user_id).push_bind(*entity_id);
		});

		let res = query
			.build()
			.execute(&mut *conn)
			.await
			.inspect_err(inspect)
			.map_err(|_| Error::DbError)?;
		inserted += res.rows_affected();
	}

	Ok(inserted)
}

/// Delete the permission rows of the given users on the given entities
async fn delete_rows(
	conn: &mut SqliteConnection,
	level: Level,
	entity_ids: &[i64],
	users: &[UserId],
) -> ClResult<u64> {
	if entity_ids.is_empty() || users.is_empty() {
		return Ok(0);
	}
	let table = level.table();

	let mut deleted = 0;
	for entity_chunk in entity_ids.chunks(BIND_CHUNK / 2) {
		for user_chunk in users.chunks(BIND_CHUNK / 2) {
			let mut query = sqlx::QueryBuilder::new(format!(
				"DELETE FROM {} WHERE {} IN ",
				table.perm_table, table.id_column
			));
			push_in_ids(&mut query, entity_chunk.iter().copied());
			query.push(" AND user_id IN ");
			push_in_ids(&mut query, user_chunk.iter().map(|u| u.0));

			let res = query
				.build()
				.execute(&mut *conn)
				.await
				.inspect_err(inspect)
				.map_err(|_| Error::DbError)?;
			deleted += res.rows_affected();
		}
	}

	Ok(deleted)
}

/// Apply a permission change to an entity and optionally to its relatives
pub(crate) async fn update(
	db: &SqlitePool,
	level: Level,
	entity_id: i64,
	change: &PermissionChange,
) -> ClResult<()> {
	let mut tx = db.begin().await.inspect_err(inspect).map_err(|_| Error::DbError)?;

	// Dropping the transaction on any early return rolls it back
	if !hierarchy::exists(&mut tx, level, entity_id).await? {
		return Err(Error::NotFound);
	}

	let mut removed = 0;
	let mut added = 0;

	// 1. Revoke at this level
	removed += delete_rows(&mut tx, level, &[entity_id], &change.removed_users).await?;

	// 2. Resolve relatives
	let relatives = if change.add_relatives && !change.is_noop() {
		hierarchy::relatives(&mut tx, level, entity_id).await?
	} else {
		Relatives::default()
	};

	// 3. Grant at this level, then at every relative
	if !change.added_users.is_empty() {
		added += insert_rows(&mut tx, level, &[entity_id], &change.added_users).await?;
		for (ancestor_level, ancestor_id) in &relatives.ancestors {
			added +=
				insert_rows(&mut tx, *ancestor_level, &[*ancestor_id], &change.added_users).await?;
		}
		for (descendant_level, ids) in &relatives.descendants {
			added += insert_rows(&mut tx, *descendant_level, ids, &change.added_users).await?;
		}
	}

	// 4. Revoke at the descendants, and at the ancestors where the level allows it
	if !change.removed_users.is_empty() && change.add_relatives {
		for (descendant_level, ids) in &relatives.descendants {
			removed += delete_rows(&mut tx, *descendant_level, ids, &change.removed_users).await?;
		}
		if level.table().revoke_ancestors {
			for (ancestor_level, ancestor_id) in &relatives.ancestors {
				removed +=
					delete_rows(&mut tx, *ancestor_level, &[*ancestor_id], &change.removed_users)
						.await?;
			}
		}
	}

	tx.commit().await.inspect_err(inspect).map_err(|_| Error::DbError)?;

	debug!(
		kind = %level,
		entity_id,
		added,
		removed,
		relatives = change.add_relatives,
		"Permissions updated"
	);
	Ok(())
}

/// List the users with access to an entity
pub(crate) async fn list(db: &SqlitePool, level: Level, entity_id: i64) -> ClResult<Vec<UserId>> {
	let mut conn = db.acquire().await.inspect_err(inspect).map_err(|_| Error::DbError)?;

	if !hierarchy::exists(&mut conn, level, entity_id).await? {
		return Err(Error::NotFound);
	}

	let table = level.table();
	let rows = sqlx::query(&format!(
		"SELECT user_id FROM {} WHERE {}=? ORDER BY user_id",
		table.perm_table, table.id_column
	))
	.bind(entity_id)
	.fetch_all(&mut *conn)
	.await
	.inspect_err(inspect)
	.map_err(|_| Error::DbError)?;

	collect_res(rows.iter().map(|row| row.try_get::<i64, _>("user_id").map(UserId)))
}

// vim: ts=4
