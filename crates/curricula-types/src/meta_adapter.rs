//! Adapter that manages and stores the training hierarchy and its access permissions.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use std::fmt::Debug;

use crate::prelude::*;
use crate::types::{Page, PageQuery};

// Trainings
//***********
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrainingStatus {
	Active,
	Draft,
	Archived,
}

impl TrainingStatus {
	pub fn as_db(self) -> &'static str {
		match self {
			TrainingStatus::Active => "A",
			TrainingStatus::Draft => "D",
			TrainingStatus::Archived => "X",
		}
	}

	pub fn from_db(s: &str) -> Option<Self> {
		match s {
			"A" => Some(TrainingStatus::Active),
			"D" => Some(TrainingStatus::Draft),
			"X" => Some(TrainingStatus::Archived),
			_ => None,
		}
	}
}

#[skip_serializing_none]
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Training {
	#[serde(rename = "id")]
	pub training_id: i64,
	pub title: Box<str>,
	pub description: Option<Box<str>>,
	pub tutor: Option<Box<str>>,
	pub thumbnail: Option<Box<str>>,
	pub order: i64,
	pub status: TrainingStatus,
	pub created_at: Timestamp,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTraining {
	pub title: String,
	pub description: Option<String>,
	pub tutor: Option<String>,
	pub thumbnail: Option<String>,
	pub order: Option<i64>,
	pub status: Option<TrainingStatus>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTrainingData {
	#[serde(default)]
	pub title: Patch<String>,
	#[serde(default)]
	pub description: Patch<String>,
	#[serde(default)]
	pub tutor: Patch<String>,
	#[serde(default)]
	pub thumbnail: Patch<String>,
	#[serde(default)]
	pub order: Patch<i64>,
	#[serde(default)]
	pub status: Patch<TrainingStatus>,
}

#[derive(Debug, Default)]
pub struct ListTrainingOptions {
	pub status: Option<TrainingStatus>,
	/// Case-insensitive title search
	pub q: Option<String>,
}

// Modules
//*********
#[skip_serializing_none]
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
	#[serde(rename = "id")]
	pub module_id: i64,
	pub training_id: i64,
	pub title: Box<str>,
	pub description: Option<Box<str>>,
	pub thumbnail: Option<Box<str>>,
	pub order: i64,
	pub created_at: Timestamp,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateModule {
	pub training_id: i64,
	pub title: String,
	pub description: Option<String>,
	pub thumbnail: Option<String>,
	pub order: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateModuleData {
	#[serde(default)]
	pub title: Patch<String>,
	#[serde(default)]
	pub description: Patch<String>,
	#[serde(default)]
	pub thumbnail: Patch<String>,
	#[serde(default)]
	pub order: Patch<i64>,
}

// Submodules
//************
#[skip_serializing_none]
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Submodule {
	#[serde(rename = "id")]
	pub submodule_id: i64,
	pub module_id: i64,
	pub title: Box<str>,
	pub description: Option<Box<str>>,
	pub thumbnail: Option<Box<str>>,
	pub order: i64,
	pub created_at: Timestamp,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubmodule {
	pub module_id: i64,
	pub title: String,
	pub description: Option<String>,
	pub thumbnail: Option<String>,
	pub order: Option<i64>,
}

/// Modules and submodules share the same updatable fields
pub type UpdateSubmoduleData = UpdateModuleData;

// Lessons
//*********
#[skip_serializing_none]
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
	#[serde(rename = "id")]
	pub lesson_id: i64,
	pub submodule_id: i64,
	pub title: Box<str>,
	pub content: Option<Box<str>>,
	pub order: i64,
	pub created_at: Timestamp,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLesson {
	pub submodule_id: i64,
	pub title: String,
	pub content: Option<String>,
	pub order: Option<i64>,
}

// Permissions
//*************
/// A requested change of user access at one entity
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionChange {
	#[serde(default, deserialize_with = "null_as_default")]
	pub removed_users: Vec<UserId>,
	#[serde(default, deserialize_with = "null_as_default")]
	pub added_users: Vec<UserId>,
	/// Propagate the change to related entities of the hierarchy
	#[serde(default, deserialize_with = "null_as_default")]
	pub add_relatives: bool,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
	D: serde::Deserializer<'de>,
	T: Default + Deserialize<'de>,
{
	Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl PermissionChange {
	pub fn is_noop(&self) -> bool {
		self.removed_users.is_empty() && self.added_users.is_empty()
	}
}

#[async_trait]
pub trait MetaAdapter: Debug + Send + Sync {
	// Trainings
	//***********
	async fn read_training(&self, training_id: i64) -> ClResult<Training>;
	async fn list_trainings(
		&self,
		opts: &ListTrainingOptions,
		page: &PageQuery,
	) -> ClResult<Page<Training>>;
	async fn create_training(&self, data: &CreateTraining) -> ClResult<i64>;
	async fn update_training(&self, training_id: i64, data: &UpdateTrainingData) -> ClResult<()>;
	/// Deletes the training with all of its modules, submodules, lessons and permissions
	async fn delete_training(&self, training_id: i64) -> ClResult<()>;

	// Modules
	//*********
	async fn read_module(&self, module_id: i64) -> ClResult<Module>;
	async fn list_modules(
		&self,
		training_id: Option<i64>,
		page: &PageQuery,
	) -> ClResult<Page<Module>>;
	async fn create_module(&self, data: &CreateModule) -> ClResult<i64>;
	async fn update_module(&self, module_id: i64, data: &UpdateModuleData) -> ClResult<()>;
	async fn delete_module(&self, module_id: i64) -> ClResult<()>;

	// Submodules
	//************
	async fn read_submodule(&self, submodule_id: i64) -> ClResult<Submodule>;
	async fn list_submodules(
		&self,
		module_id: Option<i64>,
		page: &PageQuery,
	) -> ClResult<Page<Submodule>>;
	async fn create_submodule(&self, data: &CreateSubmodule) -> ClResult<i64>;
	async fn update_submodule(
		&self,
		submodule_id: i64,
		data: &UpdateSubmoduleData,
	) -> ClResult<()>;
	async fn delete_submodule(&self, submodule_id: i64) -> ClResult<()>;

	// Lessons
	//*********
	async fn list_lessons(&self, submodule_id: i64, page: &PageQuery) -> ClResult<Page<Lesson>>;
	async fn create_lesson(&self, data: &CreateLesson) -> ClResult<i64>;
	async fn delete_lesson(&self, lesson_id: i64) -> ClResult<()>;

	// Permissions
	//*************
	/// Applies a permission change to an entity and, if requested, to its relatives.
	///
	/// Adding cascades to ancestors and descendants. Removing cascades to
	/// descendants, and for submodules to the ancestors; a module never revokes
	/// at its training. Everything runs in a single transaction. Returns
	/// `Error::NotFound` without writing anything if the entity does not exist.
	async fn update_permissions(
		&self,
		level: Level,
		entity_id: i64,
		change: &PermissionChange,
	) -> ClResult<()>;

	/// Lists the users with a permission row on an entity, ascending
	async fn list_permissions(&self, level: Level, entity_id: i64) -> ClResult<Vec<UserId>>;
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_permission_change_defaults() {
		let change: PermissionChange = serde_json::from_str("{}").unwrap();
		assert!(change.is_noop());
		assert!(!change.add_relatives);
	}

	#[test]
	fn test_permission_change_camel_case() {
		let change: PermissionChange = serde_json::from_str(
			r#"{"removedUsers": [1], "addedUsers": [2, 3], "addRelatives": true}"#,
		)
		.unwrap();
		assert_eq!(change.removed_users, vec![UserId(1)]);
		assert_eq!(change.added_users, vec![UserId(2), UserId(3)]);
		assert!(change.add_relatives);
	}

	#[test]
	fn test_permission_change_nulls() {
		let change: PermissionChange = serde_json::from_str(
			r#"{"removedUsers": null, "addedUsers": [5], "addRelatives": null}"#,
		)
		.unwrap();
		assert!(change.removed_users.is_empty());
		assert_eq!(change.added_users, vec![UserId(5)]);
		assert!(!change.add_relatives);
	}

	#[test]
	fn test_training_status_db_codes() {
		for status in [TrainingStatus::Active, TrainingStatus::Draft, TrainingStatus::Archived] {
			assert_eq!(TrainingStatus::from_db(status.as_db()), Some(status));
		}
		assert_eq!(TrainingStatus::from_db("?"), None);
	}

	#[test]
	fn test_update_training_patch_states() {
		let data: UpdateTrainingData =
			serde_json::from_str(r#"{"title": "New", "tutor": null}"#).unwrap();
		assert_eq!(data.title, Patch::Value("New".to_string()));
		assert!(data.tutor.is_null());
		assert!(data.description.is_undefined());
		assert!(data.status.is_undefined());
	}
}

// vim: ts=4
