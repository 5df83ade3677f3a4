use cleanset::actions::{
    delete_duplicates, AssumeYes, Decline, DeleteConfig, DeleteError, DeletionPlan, NoDeleteProgress,
};
use cleanset::duplicates::{DedupEngine, DuplicatePair};
use cleanset::scanner::{hash_bytes, FileRecord};
use std::cell::Cell;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn write(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_delete_within_folder_keeps_canonicals() {
    let dir = tempdir().unwrap();
    let a = write(dir.path(), "a", b"dup");
    let b = write(dir.path(), "b", b"dup");
    let c = write(dir.path(), "c", b"dup");
    let u = write(dir.path(), "u", b"unique");

    let report = DedupEngine::with_defaults().dedup_within_folder(dir.path()).unwrap();
    let result = delete_duplicates(
        &report.pairs,
        &DeleteConfig::permanent(),
        &AssumeYes,
        None::<&NoDeleteProgress>,
    )
    .unwrap();

    assert_eq!(result.success_count(), 2);
    assert_eq!(result.bytes_freed, 6);
    assert!(a.exists());
    assert!(!b.exists());
    assert!(!c.exists());
    assert!(u.exists());
}

#[test]
fn test_declined_gate_deletes_nothing() {
    let dir = tempdir().unwrap();
    write(dir.path(), "a", b"dup");
    let b = write(dir.path(), "b", b"dup");

    let report = DedupEngine::with_defaults().dedup_within_folder(dir.path()).unwrap();
    let result = delete_duplicates(
        &report.pairs,
        &DeleteConfig::permanent(),
        &Decline,
        None::<&NoDeleteProgress>,
    );

    assert!(matches!(result, Err(DeleteError::NotConfirmed { count: 1 })));
    assert!(b.exists());
}

#[test]
fn test_gate_sees_full_plan_before_deleting() {
    let dir = tempdir().unwrap();
    write(dir.path(), "a", b"dup");
    let b = write(dir.path(), "b", b"dup");
    let c = write(dir.path(), "c", b"dup");

    let report = DedupEngine::with_defaults().dedup_within_folder(dir.path()).unwrap();
    let asked = Cell::new(false);
    let gate = |plan: &DeletionPlan| {
        asked.set(true);
        assert_eq!(plan.targets, vec![b.clone(), c.clone()]);
        assert!(b.exists() && c.exists());
        true
    };
    delete_duplicates(&report.pairs, &DeleteConfig::permanent(), &gate, None::<&NoDeleteProgress>).unwrap();

    assert!(asked.get());
    assert!(!b.exists());
}

#[test]
fn test_empty_pairs_skip_gate() {
    let gate = |_: &DeletionPlan| -> bool { panic!("gate must not be consulted") };
    let result = delete_duplicates(&[], &DeleteConfig::permanent(), &gate, None::<&NoDeleteProgress>).unwrap();
    assert_eq!(result.total_count(), 0);
}

#[test]
fn test_canonical_of_another_pair_is_protected() {
    let dir = tempdir().unwrap();
    let x = write(dir.path(), "x", b"a");
    let y = write(dir.path(), "y", b"a");
    let z = write(dir.path(), "z", b"a");
    let record = |p: &Path| FileRecord::new(p.to_path_buf(), 1, None);
    let pairs = vec![
        DuplicatePair {
            duplicate: record(&y),
            canonical: record(&x),
            hash: hash_bytes(b"a"),
        },
        DuplicatePair {
            duplicate: record(&x),
            canonical: record(&z),
            hash: hash_bytes(b"a"),
        },
    ];

    let result =
        delete_duplicates(&pairs, &DeleteConfig::permanent(), &AssumeYes, None::<&NoDeleteProgress>).unwrap();

    assert_eq!(result.protected, vec![x.clone()]);
    assert!(x.exists());
    assert!(!y.exists());
    assert!(z.exists());
}

#[test]
fn test_missing_target_is_recorded_not_fatal() {
    let dir = tempdir().unwrap();
    write(dir.path(), "a", b"dup");
    let b = write(dir.path(), "b", b"dup");
    let c = write(dir.path(), "c", b"dup");

    let report = DedupEngine::with_defaults().dedup_within_folder(dir.path()).unwrap();
    fs::remove_file(&b).unwrap();

    let result = delete_duplicates(
        &report.pairs,
        &DeleteConfig::permanent(),
        &AssumeYes,
        None::<&NoDeleteProgress>,
    )
    .unwrap();

    assert_eq!(result.failure_count(), 1);
    assert_eq!(result.success_count(), 1);
    assert!(!c.exists());
}
