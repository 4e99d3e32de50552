//! Integration tests for snapshot persistence and snapshot diffs

use hmtree::crawler::DirectoryCrawler;
use hmtree::error::ApiError;
use hmtree::snapshot::{Snapshot, SNAPSHOT_VERSION};
use hmtree::tree::walker::WalkerConfig;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn snapshot_of(root: &Path) -> Snapshot {
    let crawler = DirectoryCrawler::new(root, WalkerConfig::default()).unwrap();
    Snapshot::from_crawl(&crawler.crawl().unwrap()).unwrap()
}

fn write_files(root: &Path, files: &[(&str, &str)]) {
    for (name, content) in files {
        fs::write(root.join(name), content).unwrap();
    }
}

#[test]
fn test_snapshot_survives_disk_round_trip() {
    let workspace = TempDir::new().unwrap();
    write_files(workspace.path(), &[("a", "1"), ("b", "2"), ("c", "3")]);
    let store = TempDir::new().unwrap();
    let path = store.path().join("snapshot.json");

    let snapshot = snapshot_of(workspace.path());
    snapshot.write(&path).unwrap();
    let loaded = Snapshot::read(&path).unwrap();

    assert_eq!(loaded.version, SNAPSHOT_VERSION);
    assert_eq!(loaded.root, snapshot.root);
    let paths: Vec<Option<String>> = loaded.leaves.iter().map(|l| l.path.clone()).collect();
    assert_eq!(
        paths,
        vec![Some("a".to_string()), Some("b".to_string()), Some("c".to_string())]
    );
    loaded.verify().unwrap();
}

#[test]
fn test_modified_file_is_reported() {
    let workspace = TempDir::new().unwrap();
    write_files(workspace.path(), &[("a", "1"), ("b", "2"), ("c", "3"), ("d", "4")]);
    let before = snapshot_of(workspace.path());

    fs::write(workspace.path().join("b"), "two").unwrap();
    let after = snapshot_of(workspace.path());

    let delta = before.verify().unwrap().diff(&after.verify().unwrap()).unwrap();
    assert_eq!(after.changed_paths(&delta).unwrap(), vec!["b".to_string()]);
    assert_eq!(delta.subtree.map(|n| n.node_count()), Some(3));
}

#[test]
fn test_added_file_is_reported() {
    let workspace = TempDir::new().unwrap();
    write_files(workspace.path(), &[("a", "1"), ("b", "2"), ("c", "3"), ("d", "4")]);
    let before = snapshot_of(workspace.path());

    write_files(workspace.path(), &[("e", "5")]);
    let after = snapshot_of(workspace.path());

    let delta = before.to_tree().unwrap().diff(&after.to_tree().unwrap()).unwrap();
    assert_eq!(after.changed_paths(&delta).unwrap(), vec!["e".to_string()]);
}

#[test]
fn test_unsupported_version_is_rejected() {
    let workspace = TempDir::new().unwrap();
    write_files(workspace.path(), &[("a", "1")]);
    let store = TempDir::new().unwrap();
    let path = store.path().join("snapshot.json");

    let mut snapshot = snapshot_of(workspace.path());
    snapshot.version = SNAPSHOT_VERSION + 1;
    fs::write(&path, serde_json::to_string(&snapshot).unwrap()).unwrap();

    assert!(matches!(Snapshot::read(&path), Err(ApiError::Snapshot(_))));
}

#[test]
fn test_malformed_snapshot_is_rejected() {
    let store = TempDir::new().unwrap();
    let path = store.path().join("snapshot.json");
    fs::write(&path, "{ not json").unwrap();
    assert!(matches!(Snapshot::read(&path), Err(ApiError::Snapshot(_))));

    let missing = store.path().join("missing.json");
    assert!(matches!(Snapshot::read(&missing), Err(ApiError::Io(_))));
}
