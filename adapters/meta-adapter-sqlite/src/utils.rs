//! Shared utilities for SQLite adapter
//!
//! This module contains helper functions, macros, and error mapping utilities
//! used across all domain modules.

use curricula_types::prelude::*;
use sqlx::sqlite::SqliteRow;

/// Simple helper for Patch fields - applies field to query with proper binding
/// Returns true if field was added (for tracking has_updates)
macro_rules! push_patch {
	// For bindable values (strings, numbers, bools)
	($query:expr, $has_updates:expr, $field:literal, $patch:expr) => {{
		match $patch {
			Patch::Undefined => $has_updates,
			Patch::Null => {
				if $has_updates {
					$query.push(", ");
				}
				$query.push(concat!($field, "=NULL"));
				true
			}
			Patch::Value(v) => {
				if $has_updates {
					$query.push(", ");
				}
				$query.push(concat!($field, "=")).push_bind(v);
				true
			}
		}
	}};
	// For fields that need conversion before binding
	($query:expr, $has_updates:expr, $field:literal, $patch:expr, |$v:ident| $convert:expr) => {{
		match $patch {
			Patch::Undefined => $has_updates,
			Patch::Null => {
				if $has_updates {
					$query.push(", ");
				}
				$query.push(concat!($field, "=NULL"));
				true
			}
			Patch::Value($v) => {
				if $has_updates {
					$query.push(", ");
				}
				$query.push(concat!($field, "=")).push_bind($convert);
				true
			}
		}
	}};
}

pub(crate) use push_patch;

/// Upper bound of bound parameters per statement, well below SQLite's 32766
pub(crate) const BIND_CHUNK: usize = 10_000;

/// Build an IN clause with parameterized integer ids
pub(crate) fn push_in_ids<'a>(
	query: &mut sqlx::QueryBuilder<'a, sqlx::Sqlite>,
	values: impl IntoIterator<Item = i64>,
) {
	query.push("(");
	for (i, value) in values.into_iter().enumerate() {
		if i > 0 {
			query.push(", ");
		}
		query.push_bind(value);
	}
	query.push(")");
}

/// Reject an explicit null on a column that cannot be cleared
pub(crate) fn require_not_null<T>(patch: &Patch<T>, field: &str) -> ClResult<()> {
	if patch.is_null() {
		return Err(Error::ValidationError(format!("{} cannot be null", field)));
	}
	Ok(())
}

/// Log database error for debugging
pub(crate) fn inspect(err: &sqlx::Error) {
	warn!("DB: {:#?}", err);
}

/// Map a single-row query result, translating SQL errors to ClResult
pub(crate) fn map_res<T, F>(row: Result<SqliteRow, sqlx::Error>, f: F) -> ClResult<T>
where
	F: FnOnce(SqliteRow) -> Result<T, sqlx::Error>,
{
	match row {
		Ok(row) => f(row).inspect_err(inspect).map_err(|_| Error::DbError),
		Err(sqlx::Error::RowNotFound) => Err(Error::NotFound),
		Err(err) => {
			inspect(&err);
			Err(Error::DbError)
		}
	}
}

/// Collect an iterator of query results, translating errors
pub(crate) fn collect_res<T>(
	iter: impl Iterator<Item = Result<T, sqlx::Error>> + Unpin,
) -> ClResult<Vec<T>> {
	let mut items = Vec::new();
	for item in iter {
		items.push(item.inspect_err(inspect).map_err(|_| Error::DbError)?);
	}
	Ok(items)
}

// vim: ts=4
