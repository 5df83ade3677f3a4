use cleanset::duplicates::{DedupEngine, EngineConfig, FinderError};
use cleanset::scanner::ScanError;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn write(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn folders(root: &Path, names: &[&str]) -> Vec<PathBuf> {
    names
        .iter()
        .map(|name| {
            let path = root.join(name);
            fs::create_dir_all(&path).unwrap();
            path
        })
        .collect()
}

#[test]
fn test_across_two_folders_scenario() {
    let root = tempdir().unwrap();
    let dirs = folders(root.path(), &["A", "B"]);
    let f1 = write(&dirs[0], "f1", b"aa");
    write(&dirs[0], "f2", b"bb");
    let f3 = write(&dirs[1], "f3", b"aa");
    write(&dirs[1], "f4", b"cc");

    let report = DedupEngine::with_defaults().dedup_across_folders(&dirs).unwrap();

    assert_eq!(report.pairs.len(), 1);
    assert_eq!(report.pairs[0].duplicate.path, f3);
    assert_eq!(report.pairs[0].canonical.path, f1);
    assert_eq!(report.pairs[0].canonical.origin, "folder 1");
    assert_eq!(report.pairs[0].duplicate.origin, "folder 2");
    assert_eq!(report.summary.total_entries, 4);
}

#[test]
fn test_across_earlier_folder_wins() {
    let root = tempdir().unwrap();
    let dirs = folders(root.path(), &["train", "val", "test"]);
    // The later folder sorts first by name but still loses.
    let keep = write(&dirs[0], "zzz.png", b"image");
    write(&dirs[1], "aaa.png", b"image");
    write(&dirs[2], "mmm.png", b"image");

    let report = DedupEngine::with_defaults().dedup_across_folders(&dirs).unwrap();

    assert_eq!(report.pairs.len(), 2);
    assert!(report.pairs.iter().all(|p| p.canonical.path == keep));
    assert_eq!(report.pairs[0].duplicate.origin, "folder 2");
    assert_eq!(report.pairs[1].duplicate.origin, "folder 3");
}

#[test]
fn test_across_duplicates_inside_one_folder_are_reported() {
    let root = tempdir().unwrap();
    let dirs = folders(root.path(), &["A", "B"]);
    let canonical = write(&dirs[1], "x1", b"same");
    let dup = write(&dirs[1], "x2", b"same");

    let report = DedupEngine::with_defaults().dedup_across_folders(&dirs).unwrap();

    assert_eq!(report.pairs.len(), 1);
    assert_eq!(report.pairs[0].canonical.path, canonical);
    assert_eq!(report.pairs[0].duplicate.path, dup);
}

#[test]
fn test_across_missing_folder_fails_before_hashing() {
    let root = tempdir().unwrap();
    let dirs = folders(root.path(), &["A"]);
    write(&dirs[0], "f", b"x");
    let missing = root.path().join("missing");

    let result = DedupEngine::with_defaults().dedup_across_folders(&[dirs[0].clone(), missing.clone()]);

    match result {
        Err(FinderError::Scan(ScanError::NotFound(path))) => assert_eq!(path, missing),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn test_across_same_folder_twice_is_scanned_once() {
    let root = tempdir().unwrap();
    let dirs = folders(root.path(), &["A"]);
    write(&dirs[0], "f1", b"one");
    write(&dirs[0], "f2", b"two");

    let report = DedupEngine::with_defaults()
        .dedup_across_folders(&[dirs[0].clone(), dirs[0].clone()])
        .unwrap();

    assert!(report.pairs.is_empty());
    assert_eq!(report.summary.total_entries, 2);
    assert_eq!(report.warnings.len(), 1);
}

#[test]
fn test_across_single_folder_matches_within() {
    let root = tempdir().unwrap();
    let dirs = folders(root.path(), &["A"]);
    write(&dirs[0], "a", b"1");
    write(&dirs[0], "b", b"1");
    write(&dirs[0], "c", b"2");

    let engine = DedupEngine::new(EngineConfig::default());
    let across = engine.dedup_across_folders(&dirs).unwrap();
    let within = engine.dedup_within_folder(&dirs[0]).unwrap();

    let across_paths: Vec<_> = across.pairs.iter().map(|p| p.duplicate.path.clone()).collect();
    let within_paths: Vec<_> = within.pairs.iter().map(|p| p.duplicate.path.clone()).collect();
    assert_eq!(across_paths, within_paths);
}

#[test]
fn test_across_no_common_files() {
    let root = tempdir().unwrap();
    let dirs = folders(root.path(), &["A", "B", "C"]);
    write(&dirs[0], "a", b"1");
    write(&dirs[1], "b", b"2");
    write(&dirs[2], "c", b"3");

    let report = DedupEngine::with_defaults().dedup_across_folders(&dirs).unwrap();

    assert!(report.pairs.is_empty());
    assert_eq!(report.summary.unique_identities, 3);
}
