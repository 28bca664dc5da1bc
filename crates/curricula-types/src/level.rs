//! Content hierarchy levels that carry per-user permissions
//!
//! Training → Module → Submodule form the permission-bearing part of the
//! hierarchy (lessons inherit access from their submodule). Every level knows
//! its storage layout, so one routine can handle all of them.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Level {
	Training,
	Module,
	Submodule,
}

/// Storage layout of a level
#[derive(Debug)]
pub struct LevelTable {
	/// Entity table
	pub table: &'static str,
	/// Permission join table
	pub perm_table: &'static str,
	/// Primary key of the entity table, the join table references it by the same name
	pub id_column: &'static str,
	/// Column of the entity table referencing the parent entity
	pub parent_column: Option<&'static str>,
	/// Remove-with-relatives also revokes at the ancestors. Descendants are
	/// always revoked; only submodules reach upwards.
	pub revoke_ancestors: bool,
}

const TRAINING: LevelTable = LevelTable {
	table: "trainings",
	perm_table: "permission_user_trainings",
	id_column: "training_id",
	parent_column: None,
	revoke_ancestors: false,
};

const MODULE: LevelTable = LevelTable {
	table: "modules",
	perm_table: "permission_user_modules",
	id_column: "module_id",
	parent_column: Some("training_id"),
	revoke_ancestors: false,
};

const SUBMODULE: LevelTable = LevelTable {
	table: "submodules",
	perm_table: "permission_user_submodules",
	id_column: "submodule_id",
	parent_column: Some("module_id"),
	revoke_ancestors: true,
};

impl Level {
	pub const ALL: [Level; 3] = [Level::Training, Level::Module, Level::Submodule];

	pub fn table(self) -> &'static LevelTable {
		match self {
			Level::Training => &TRAINING,
			Level::Module => &MODULE,
			Level::Submodule => &SUBMODULE,
		}
	}

	pub fn parent(self) -> Option<Level> {
		match self {
			Level::Training => None,
			Level::Module => Some(Level::Training),
			Level::Submodule => Some(Level::Module),
		}
	}

	pub fn child(self) -> Option<Level> {
		match self {
			Level::Training => Some(Level::Module),
			Level::Module => Some(Level::Submodule),
			Level::Submodule => None,
		}
	}

	/// All levels above this one, nearest first
	pub fn ancestors(self) -> impl Iterator<Item = Level> {
		std::iter::successors(self.parent(), |l| l.parent())
	}

	/// All levels below this one, nearest first
	pub fn descendants(self) -> impl Iterator<Item = Level> {
		std::iter::successors(self.child(), |l| l.child())
	}

	pub fn name(self) -> &'static str {
		match self {
			Level::Training => "training",
			Level::Module => "module",
			Level::Submodule => "submodule",
		}
	}
}

impl std::fmt::Display for Level {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.name())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_ancestors() {
		assert_eq!(Level::Training.ancestors().collect::<Vec<_>>(), vec![]);
		assert_eq!(Level::Module.ancestors().collect::<Vec<_>>(), vec![Level::Training]);
		assert_eq!(
			Level::Submodule.ancestors().collect::<Vec<_>>(),
			vec![Level::Module, Level::Training]
		);
	}

	#[test]
	fn test_descendants() {
		assert_eq!(
			Level::Training.descendants().collect::<Vec<_>>(),
			vec![Level::Module, Level::Submodule]
		);
		assert_eq!(Level::Module.descendants().collect::<Vec<_>>(), vec![Level::Submodule]);
		assert_eq!(Level::Submodule.descendants().collect::<Vec<_>>(), vec![]);
	}

	#[test]
	fn test_revoke_direction() {
		assert!(!Level::Training.table().revoke_ancestors);
		assert!(!Level::Module.table().revoke_ancestors);
		assert!(Level::Submodule.table().revoke_ancestors);
	}

	#[test]
	fn test_parent_column_matches_parent_id_column() {
		for level in Level::ALL {
			match (level.parent(), level.table().parent_column) {
				(Some(parent), Some(col)) => assert_eq!(parent.table().id_column, col),
				(None, None) => {}
				_ => panic!("inconsistent parent layout for {}", level),
			}
		}
	}
}

// vim: ts=4
