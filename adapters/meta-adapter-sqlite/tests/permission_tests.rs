//! Permission propagation tests
//!
//! Builds small training trees and checks which permission rows a change
//! creates or removes on each level.

use curricula_meta_adapter_sqlite::MetaAdapterSqlite;
use curricula_types::error::Error;
use curricula_types::level::Level;
use curricula_types::meta_adapter::*;
use curricula_types::types::UserId;
use tempfile::TempDir;

async fn create_test_adapter() -> (MetaAdapterSqlite, TempDir) {
	let temp_dir = TempDir::new().expect("Failed to create temp directory");

	let adapter =
		MetaAdapterSqlite::new(temp_dir.path()).await.expect("Failed to create adapter");

	(adapter, temp_dir)
}

/// T ⊃ {M1 ⊃ {S1, S2}, M2 ⊃ {S3}}
struct Tree {
	t: i64,
	m1: i64,
	m2: i64,
	s1: i64,
	s2: i64,
	s3: i64,
}

async fn create_tree(adapter: &MetaAdapterSqlite) -> Tree {
	let t = adapter
		.create_training(&CreateTraining {
			title: "T".to_string(),
			description: None,
			tutor: None,
			thumbnail: None,
			order: None,
			status: None,
		})
		.await
		.expect("create training");

	let mut modules = Vec::new();
	for title in ["M1", "M2"] {
		let id = adapter
			.create_module(&CreateModule {
				training_id: t,
				title: title.to_string(),
				description: None,
				thumbnail: None,
				order: None,
			})
			.await
			.expect("create module");
		modules.push(id);
	}

	let mut subs = Vec::new();
	for (module_id, title) in [(modules[0], "S1"), (modules[0], "S2"), (modules[1], "S3")] {
		let id = adapter
			.create_submodule(&CreateSubmodule {
				module_id,
				title: title.to_string(),
				description: None,
				thumbnail: None,
				order: None,
			})
			.await
			.expect("create submodule");
		subs.push(id);
	}

	Tree { t, m1: modules[0], m2: modules[1], s1: subs[0], s2: subs[1], s3: subs[2] }
}

fn add(users: &[i64], add_relatives: bool) -> PermissionChange {
	PermissionChange {
		added_users: users.iter().copied().map(UserId).collect(),
		add_relatives,
		..Default::default()
	}
}

fn remove(users: &[i64], add_relatives: bool) -> PermissionChange {
	PermissionChange {
		removed_users: users.iter().copied().map(UserId).collect(),
		add_relatives,
		..Default::default()
	}
}

async fn users(adapter: &MetaAdapterSqlite, level: Level, id: i64) -> Vec<i64> {
	adapter
		.list_permissions(level, id)
		.await
		.expect("list permissions")
		.into_iter()
		.map(|u| u.0)
		.collect()
}

#[tokio::test]
async fn test_add_module_with_relatives() {
	let (adapter, _temp) = create_test_adapter().await;
	let tree = create_tree(&adapter).await;

	adapter
		.update_permissions(Level::Module, tree.m1, &add(&[42], true))
		.await
		.expect("update permissions");

	assert_eq!(users(&adapter, Level::Module, tree.m1).await, vec![42]);
	assert_eq!(users(&adapter, Level::Submodule, tree.s1).await, vec![42]);
	assert_eq!(users(&adapter, Level::Submodule, tree.s2).await, vec![42]);
	assert_eq!(users(&adapter, Level::Training, tree.t).await, vec![42]);
	// Other branches stay untouched
	assert!(users(&adapter, Level::Module, tree.m2).await.is_empty());
	assert!(users(&adapter, Level::Submodule, tree.s3).await.is_empty());
}

#[tokio::test]
async fn test_add_without_relatives() {
	let (adapter, _temp) = create_test_adapter().await;
	let tree = create_tree(&adapter).await;

	adapter
		.update_permissions(Level::Module, tree.m1, &add(&[1, 2], false))
		.await
		.expect("update permissions");

	assert_eq!(users(&adapter, Level::Module, tree.m1).await, vec![1, 2]);
	assert!(users(&adapter, Level::Training, tree.t).await.is_empty());
	assert!(users(&adapter, Level::Submodule, tree.s1).await.is_empty());
}

#[tokio::test]
async fn test_repeated_add_keeps_one_row() {
	let (adapter, _temp) = create_test_adapter().await;
	let tree = create_tree(&adapter).await;

	for _ in 0..2 {
		adapter
			.update_permissions(Level::Training, tree.t, &add(&[5, 5], true))
			.await
			.expect("update permissions");
	}

	assert_eq!(users(&adapter, Level::Training, tree.t).await, vec![5]);
	assert_eq!(users(&adapter, Level::Submodule, tree.s3).await, vec![5]);
}

#[tokio::test]
async fn test_remove_missing_row_is_noop() {
	let (adapter, _temp) = create_test_adapter().await;
	let tree = create_tree(&adapter).await;

	adapter
		.update_permissions(Level::Submodule, tree.s1, &add(&[1], false))
		.await
		.expect("grant");
	adapter
		.update_permissions(Level::Submodule, tree.s1, &remove(&[99], true))
		.await
		.expect("removing an absent user succeeds");

	assert_eq!(users(&adapter, Level::Submodule, tree.s1).await, vec![1]);
}

#[tokio::test]
async fn test_submodule_cascades_upwards_only() {
	let (adapter, _temp) = create_test_adapter().await;
	let tree = create_tree(&adapter).await;

	adapter
		.update_permissions(Level::Submodule, tree.s1, &add(&[8], true))
		.await
		.expect("update permissions");

	assert_eq!(users(&adapter, Level::Submodule, tree.s1).await, vec![8]);
	assert_eq!(users(&adapter, Level::Module, tree.m1).await, vec![8]);
	assert_eq!(users(&adapter, Level::Training, tree.t).await, vec![8]);
	assert!(users(&adapter, Level::Submodule, tree.s2).await.is_empty(), "No sibling rows");
	assert!(users(&adapter, Level::Module, tree.m2).await.is_empty());
}

#[tokio::test]
async fn test_training_cascades_to_whole_subtree() {
	let (adapter, _temp) = create_test_adapter().await;
	let tree = create_tree(&adapter).await;

	adapter
		.update_permissions(Level::Training, tree.t, &add(&[3], true))
		.await
		.expect("update permissions");

	for m in [tree.m1, tree.m2] {
		assert_eq!(users(&adapter, Level::Module, m).await, vec![3]);
	}
	for s in [tree.s1, tree.s2, tree.s3] {
		assert_eq!(users(&adapter, Level::Submodule, s).await, vec![3]);
	}
}

#[tokio::test]
async fn test_module_removal_keeps_training_row() {
	let (adapter, _temp) = create_test_adapter().await;
	let tree = create_tree(&adapter).await;

	adapter
		.update_permissions(Level::Module, tree.m1, &add(&[4], true))
		.await
		.expect("grant");
	adapter
		.update_permissions(Level::Module, tree.m1, &remove(&[4], true))
		.await
		.expect("revoke");

	assert!(users(&adapter, Level::Module, tree.m1).await.is_empty());
	assert!(users(&adapter, Level::Submodule, tree.s1).await.is_empty());
	assert!(users(&adapter, Level::Submodule, tree.s2).await.is_empty());
	assert_eq!(users(&adapter, Level::Training, tree.t).await, vec![4]);
}

#[tokio::test]
async fn test_submodule_removal_reaches_ancestors() {
	let (adapter, _temp) = create_test_adapter().await;
	let tree = create_tree(&adapter).await;

	adapter
		.update_permissions(Level::Submodule, tree.s1, &add(&[6], true))
		.await
		.expect("grant");
	adapter
		.update_permissions(Level::Submodule, tree.s2, &add(&[6], false))
		.await
		.expect("grant sibling");
	adapter
		.update_permissions(Level::Submodule, tree.s1, &remove(&[6], true))
		.await
		.expect("revoke");

	assert!(users(&adapter, Level::Submodule, tree.s1).await.is_empty());
	assert!(users(&adapter, Level::Module, tree.m1).await.is_empty());
	assert!(users(&adapter, Level::Training, tree.t).await.is_empty());
	// Siblings are not relatives
	assert_eq!(users(&adapter, Level::Submodule, tree.s2).await, vec![6]);
}

#[tokio::test]
async fn test_removal_without_relatives_stays_local() {
	let (adapter, _temp) = create_test_adapter().await;
	let tree = create_tree(&adapter).await;

	adapter
		.update_permissions(Level::Training, tree.t, &add(&[2], true))
		.await
		.expect("grant");
	adapter
		.update_permissions(Level::Training, tree.t, &remove(&[2], false))
		.await
		.expect("revoke");

	assert!(users(&adapter, Level::Training, tree.t).await.is_empty());
	assert_eq!(users(&adapter, Level::Module, tree.m1).await, vec![2]);
	assert_eq!(users(&adapter, Level::Submodule, tree.s3).await, vec![2]);
}

#[tokio::test]
async fn test_user_in_both_lists() {
	let (adapter, _temp) = create_test_adapter().await;
	let tree = create_tree(&adapter).await;

	let change = PermissionChange {
		removed_users: vec![UserId(9)],
		added_users: vec![UserId(9)],
		add_relatives: true,
	};
	adapter.update_permissions(Level::Module, tree.m1, &change).await.expect("update");

	// Re-added at this level and the ancestors, removed again below
	assert_eq!(users(&adapter, Level::Module, tree.m1).await, vec![9]);
	assert_eq!(users(&adapter, Level::Training, tree.t).await, vec![9]);
	assert!(users(&adapter, Level::Submodule, tree.s1).await.is_empty());
}

#[tokio::test]
async fn test_noop_change() {
	let (adapter, _temp) = create_test_adapter().await;
	let tree = create_tree(&adapter).await;

	adapter
		.update_permissions(Level::Module, tree.m1, &add(&[1], false))
		.await
		.expect("grant");
	adapter
		.update_permissions(Level::Module, tree.m1, &PermissionChange::default())
		.await
		.expect("empty change succeeds");
	adapter
		.update_permissions(Level::Module, tree.m1, &add(&[], true))
		.await
		.expect("empty lists with relatives succeed");

	assert_eq!(users(&adapter, Level::Module, tree.m1).await, vec![1]);
	assert!(users(&adapter, Level::Training, tree.t).await.is_empty());
}

#[tokio::test]
async fn test_missing_entity() {
	let (adapter, _temp) = create_test_adapter().await;
	let tree = create_tree(&adapter).await;

	for level in Level::ALL {
		let result = adapter.update_permissions(level, 999, &add(&[1], true)).await;
		assert!(matches!(result, Err(Error::NotFound)), "{level} 999 should be missing");
		assert!(matches!(adapter.list_permissions(level, 999).await, Err(Error::NotFound)));
	}

	assert!(users(&adapter, Level::Training, tree.t).await.is_empty());
}

#[tokio::test]
async fn test_wide_tree_propagation() {
	let (adapter, _temp) = create_test_adapter().await;

	let t = adapter
		.create_training(&CreateTraining {
			title: "Wide".to_string(),
			description: None,
			tutor: None,
			thumbnail: None,
			order: None,
			status: None,
		})
		.await
		.expect("create training");
	let m = adapter
		.create_module(&CreateModule {
			training_id: t,
			title: "M".to_string(),
			description: None,
			thumbnail: None,
			order: None,
		})
		.await
		.expect("create module");

	let mut subs = Vec::new();
	for i in 0..400 {
		let id = adapter
			.create_submodule(&CreateSubmodule {
				module_id: m,
				title: format!("S{}", i),
				description: None,
				thumbnail: None,
				order: None,
			})
			.await
			.expect("create submodule");
		subs.push(id);
	}

	// 400 submodules x 50 users is more rows than one statement can bind
	let user_ids: Vec<i64> = (1..=50).collect();
	adapter
		.update_permissions(Level::Training, t, &add(&user_ids, true))
		.await
		.expect("grant to wide tree");

	assert_eq!(users(&adapter, Level::Training, t).await, user_ids);
	assert_eq!(users(&adapter, Level::Module, m).await, user_ids);
	for id in [subs[0], subs[199], subs[399]] {
		assert_eq!(users(&adapter, Level::Submodule, id).await, user_ids);
	}

	adapter
		.update_permissions(Level::Training, t, &remove(&user_ids, true))
		.await
		.expect("revoke from wide tree");

	assert!(users(&adapter, Level::Training, t).await.is_empty());
	assert!(users(&adapter, Level::Module, m).await.is_empty());
	for id in [subs[0], subs[399]] {
		assert!(users(&adapter, Level::Submodule, id).await.is_empty());
	}
}

// vim: ts=4
