use cleanset::duplicates::{CanonicalPolicy, DedupEngine, EngineConfig};
use cleanset::scanner::EnumerationOrder;
use filetime::{set_file_mtime, FileTime};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn write(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn engine() -> DedupEngine {
    DedupEngine::new(EngineConfig::default())
}

#[test]
fn test_within_empty_folder() {
    let dir = tempdir().unwrap();

    let report = engine().dedup_within_folder(dir.path()).unwrap();

    assert!(report.pairs.is_empty());
    assert!(report.warnings.is_empty());
    assert_eq!(report.summary.total_entries, 0);
    assert!(!report.summary.has_duplicates());
}

#[test]
fn test_within_unique_files() {
    let dir = tempdir().unwrap();
    write(dir.path(), "a.txt", b"content a");
    write(dir.path(), "b.txt", b"content b");
    write(dir.path(), "c.txt", b"content c");

    let report = engine().dedup_within_folder(dir.path()).unwrap();

    assert!(report.pairs.is_empty());
    assert_eq!(report.summary.hashed, 3);
    assert_eq!(report.summary.unique_identities, 3);
}

#[test]
fn test_within_first_listed_is_canonical() {
    let dir = tempdir().unwrap();
    let a = write(dir.path(), "a.png", b"same bytes");
    let b = write(dir.path(), "b.png", b"same bytes");
    let c = write(dir.path(), "c.png", b"same bytes");
    write(dir.path(), "d.png", b"other");

    let report = engine().dedup_within_folder(dir.path()).unwrap();

    assert_eq!(report.pairs.len(), 2);
    assert_eq!(report.pairs[0].duplicate.path, b);
    assert_eq!(report.pairs[0].canonical.path, a);
    assert_eq!(report.pairs[1].duplicate.path, c);
    assert_eq!(report.pairs[1].canonical.path, a);
    assert_eq!(report.summary.duplicate_groups, 1);
    assert_eq!(report.summary.duplicate_files, 2);
    assert_eq!(report.summary.wasted_bytes, 20);
}

#[test]
fn test_within_pairs_share_hash_and_size() {
    let dir = tempdir().unwrap();
    write(dir.path(), "1", b"xx");
    write(dir.path(), "2", b"yyy");
    write(dir.path(), "3", b"xx");
    write(dir.path(), "4", b"yyy");

    let report = engine().dedup_within_folder(dir.path()).unwrap();

    assert_eq!(report.pairs.len(), 2);
    for pair in &report.pairs {
        assert_ne!(pair.duplicate.path, pair.canonical.path);
        assert_eq!(pair.duplicate.size, pair.canonical.size);
        assert_eq!(
            fs::read(&pair.duplicate.path).unwrap(),
            fs::read(&pair.canonical.path).unwrap()
        );
    }
    // Group order follows the first appearance of each content.
    assert!(report.pairs[0].duplicate.path.ends_with("3"));
    assert!(report.pairs[1].duplicate.path.ends_with("4"));
}

#[test]
fn test_within_empty_files_are_duplicates() {
    let dir = tempdir().unwrap();
    write(dir.path(), "empty1", b"");
    write(dir.path(), "empty2", b"");

    let report = engine().dedup_within_folder(dir.path()).unwrap();

    assert_eq!(report.pairs.len(), 1);
    assert_eq!(report.pairs[0].size(), 0);
}

#[test]
fn test_within_ignores_subfolders() {
    let dir = tempdir().unwrap();
    write(dir.path(), "top.txt", b"nested copy");
    let sub = dir.path().join("sub");
    fs::create_dir(&sub).unwrap();
    write(&sub, "inner.txt", b"nested copy");

    let report = engine().dedup_within_folder(dir.path()).unwrap();

    assert!(report.pairs.is_empty());
    assert_eq!(report.summary.total_entries, 2);
    assert_eq!(report.summary.skipped_entries, 1);
}

#[test]
fn test_within_missing_folder_is_error() {
    let dir = tempdir().unwrap();
    let result = engine().dedup_within_folder(&dir.path().join("missing"));
    assert!(result.is_err());
}

#[test]
fn test_within_file_instead_of_folder_is_error() {
    let dir = tempdir().unwrap();
    let file = write(dir.path(), "plain", b"x");
    assert!(engine().dedup_within_folder(&file).is_err());
}

#[test]
fn test_within_oldest_modified_policy() {
    let dir = tempdir().unwrap();
    let a = write(dir.path(), "a", b"dup");
    let b = write(dir.path(), "b", b"dup");
    set_file_mtime(&a, FileTime::from_unix_time(2_000_000_000, 0)).unwrap();
    set_file_mtime(&b, FileTime::from_unix_time(1_000_000_000, 0)).unwrap();

    let engine = DedupEngine::new(EngineConfig::default().with_canonical(CanonicalPolicy::OldestModified));
    let report = engine.dedup_within_folder(dir.path()).unwrap();

    assert_eq!(report.pairs.len(), 1);
    assert_eq!(report.pairs[0].canonical.path, b);
    assert_eq!(report.pairs[0].duplicate.path, a);
}

#[test]
fn test_within_newest_modified_policy() {
    let dir = tempdir().unwrap();
    let a = write(dir.path(), "a", b"dup");
    let b = write(dir.path(), "b", b"dup");
    set_file_mtime(&a, FileTime::from_unix_time(1_000_000_000, 0)).unwrap();
    set_file_mtime(&b, FileTime::from_unix_time(2_000_000_000, 0)).unwrap();

    let engine = DedupEngine::new(EngineConfig::default().with_canonical(CanonicalPolicy::NewestModified));
    let report = engine.dedup_within_folder(dir.path()).unwrap();

    assert_eq!(report.pairs[0].canonical.path, b);
}

#[test]
fn test_within_skip_hidden() {
    let dir = tempdir().unwrap();
    write(dir.path(), ".hidden", b"dup");
    write(dir.path(), "visible", b"dup");

    let engine = DedupEngine::new(EngineConfig::default().with_skip_hidden(true));
    let report = engine.dedup_within_folder(dir.path()).unwrap();

    assert!(report.pairs.is_empty());
    assert_eq!(report.summary.total_entries, 1);
}

#[test]
fn test_within_filesystem_order_finds_same_pairs() {
    let dir = tempdir().unwrap();
    for i in 0..6 {
        let content: &[u8] = if i % 2 == 0 { b"even" } else { b"odd" };
        write(dir.path(), &format!("f{i}"), content);
    }

    let by_name = engine().dedup_within_folder(dir.path()).unwrap();
    let raw = DedupEngine::new(EngineConfig::default().with_order(EnumerationOrder::Filesystem))
        .dedup_within_folder(dir.path())
        .unwrap();

    assert_eq!(by_name.pairs.len(), 4);
    assert_eq!(raw.pairs.len(), 4);
    assert_eq!(by_name.summary.duplicate_groups, raw.summary.duplicate_groups);
}

#[test]
fn test_within_parallel_matches_sequential() {
    let dir = tempdir().unwrap();
    for i in 0..150 {
        write(dir.path(), &format!("file{i:03}"), format!("content {}", i % 10).as_bytes());
    }

    let sequential = DedupEngine::new(EngineConfig::default().with_io_threads(1))
        .dedup_within_folder(dir.path())
        .unwrap();
    let parallel = DedupEngine::new(EngineConfig::default().with_io_threads(8))
        .dedup_within_folder(dir.path())
        .unwrap();

    assert_eq!(sequential.pairs, parallel.pairs);
    assert_eq!(sequential.pairs.len(), 140);
}
