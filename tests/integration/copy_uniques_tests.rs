use cleanset::duplicates::{DedupEngine, EngineConfig, FinderError};
use filetime::{set_file_mtime, FileTime};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn write(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

struct Layout {
    _root: tempfile::TempDir,
    source: PathBuf,
    existing: PathBuf,
    output: PathBuf,
}

fn layout() -> Layout {
    let root = tempdir().unwrap();
    let source = root.path().join("source");
    let existing = root.path().join("existing");
    let output = root.path().join("output");
    fs::create_dir(&source).unwrap();
    fs::create_dir(&existing).unwrap();
    Layout {
        _root: root,
        source,
        existing,
        output,
    }
}

fn output_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn test_copy_skips_content_already_present() {
    let l = layout();
    let s1 = write(&l.source, "s1", b"aa");
    let e1 = write(&l.existing, "e1", b"aa");

    let report = DedupEngine::with_defaults()
        .copy_uniques(&l.source, &l.existing, &l.output)
        .unwrap();

    assert_eq!(report.copied, 0);
    assert_eq!(report.pairs.len(), 1);
    assert_eq!(report.pairs[0].duplicate.path, s1);
    assert_eq!(report.pairs[0].canonical.path, e1);
    assert!(l.output.is_dir());
    assert!(output_names(&l.output).is_empty());
}

#[test]
fn test_copy_into_empty_existing() {
    let l = layout();
    write(&l.source, "s1.png", b"aa");
    write(&l.source, "s2.png", b"bb");

    let report = DedupEngine::with_defaults()
        .copy_uniques(&l.source, &l.existing, &l.output)
        .unwrap();

    assert_eq!(report.copied, 2);
    assert!(report.pairs.is_empty());
    assert_eq!(output_names(&l.output), vec!["clean_1.png", "clean_2.png"]);
    assert_eq!(fs::read(l.output.join("clean_1.png")).unwrap(), b"aa");
    assert_eq!(fs::read(l.output.join("clean_2.png")).unwrap(), b"bb");
}

#[test]
fn test_copy_partition_of_source() {
    let l = layout();
    write(&l.existing, "old1", b"one");
    write(&l.existing, "old2", b"two");
    write(&l.source, "a", b"one");
    write(&l.source, "b", b"three");
    write(&l.source, "c", b"two");
    write(&l.source, "d", b"four");

    let report = DedupEngine::with_defaults()
        .copy_uniques(&l.source, &l.existing, &l.output)
        .unwrap();

    assert_eq!(report.copied + report.pairs.len(), 4);
    assert_eq!(report.copied, 2);
    let copied: Vec<_> = report.copied_files.iter().map(|c| c.source.clone()).collect();
    assert_eq!(copied, vec![l.source.join("b"), l.source.join("d")]);
    assert_eq!(fs::read(l.output.join("clean_1")).unwrap(), b"three");
    assert_eq!(fs::read(l.output.join("clean_2")).unwrap(), b"four");
}

#[test]
fn test_copy_identical_source_files_are_each_copied() {
    let l = layout();
    write(&l.source, "x.jpg", b"same");
    write(&l.source, "y.jpg", b"same");

    let report = DedupEngine::with_defaults()
        .copy_uniques(&l.source, &l.existing, &l.output)
        .unwrap();

    assert_eq!(report.copied, 2);
    assert_eq!(output_names(&l.output), vec!["clean_1.jpg", "clean_2.jpg"]);
}

#[test]
fn test_copy_custom_prefix() {
    let l = layout();
    write(&l.source, "doc.txt", b"hello");

    let engine = DedupEngine::new(EngineConfig::default().with_output_prefix("new_"));
    let report = engine.copy_uniques(&l.source, &l.existing, &l.output).unwrap();

    assert_eq!(report.copied, 1);
    assert_eq!(output_names(&l.output), vec!["new_1.txt"]);
}

#[test]
fn test_copy_preserves_modification_time() {
    let l = layout();
    let src = write(&l.source, "photo.png", b"pixels");
    let mtime = FileTime::from_unix_time(1_500_000_000, 0);
    set_file_mtime(&src, mtime).unwrap();

    DedupEngine::with_defaults()
        .copy_uniques(&l.source, &l.existing, &l.output)
        .unwrap();

    let copied = fs::metadata(l.output.join("clean_1.png")).unwrap();
    assert_eq!(FileTime::from_last_modification_time(&copied), mtime);
}

#[test]
fn test_copy_never_overwrites_existing_output() {
    let l = layout();
    write(&l.source, "a.txt", b"fresh");
    write(&l.source, "b.txt", b"other");
    fs::create_dir(&l.output).unwrap();
    write(&l.output, "clean_1.txt", b"stale");

    let report = DedupEngine::with_defaults()
        .copy_uniques(&l.source, &l.existing, &l.output)
        .unwrap();

    assert_eq!(report.copied, 2);
    assert!(report.warnings.is_empty());
    assert_eq!(fs::read(l.output.join("clean_1.txt")).unwrap(), b"stale");
    assert_eq!(fs::read(l.output.join("clean_2.txt")).unwrap(), b"fresh");
    assert_eq!(fs::read(l.output.join("clean_3.txt")).unwrap(), b"other");
}

#[test]
fn test_copy_twice_into_same_output_keeps_first_run() {
    let l = layout();
    write(&l.source, "a.png", b"aa");
    let engine = DedupEngine::with_defaults();

    engine.copy_uniques(&l.source, &l.existing, &l.output).unwrap();
    let second = engine.copy_uniques(&l.source, &l.existing, &l.output).unwrap();

    assert_eq!(second.copied, 1);
    assert_eq!(output_names(&l.output), vec!["clean_1.png", "clean_2.png"]);
}

#[test]
fn test_copy_into_source_folder_is_refused() {
    let l = layout();
    let first = write(&l.source, "a.png", b"first");
    let second = write(&l.source, "b.png", b"second");

    let result = DedupEngine::with_defaults().copy_uniques(&l.source, &l.existing, &l.source);

    assert!(matches!(result, Err(FinderError::OutputOverlap { .. })));
    assert_eq!(output_names(&l.source), vec!["a.png", "b.png"]);
    assert_eq!(fs::read(&first).unwrap(), b"first");
    assert_eq!(fs::read(&second).unwrap(), b"second");
}

#[test]
fn test_copy_into_existing_folder_is_refused() {
    let l = layout();
    write(&l.source, "a.png", b"new");
    write(&l.existing, "e.png", b"old");
    let aliased = l.existing.join(".").join("..").join("existing");

    let result = DedupEngine::with_defaults().copy_uniques(&l.source, &l.existing, &aliased);

    assert!(matches!(result, Err(FinderError::OutputOverlap { .. })));
    assert_eq!(output_names(&l.existing), vec!["e.png"]);
}

#[test]
fn test_copy_missing_source_fails_without_creating_output() {
    let l = layout();
    let missing = l.source.join("nope");

    let result = DedupEngine::with_defaults().copy_uniques(&missing, &l.existing, &l.output);

    assert!(result.is_err());
    assert!(!l.output.exists());
}

#[test]
fn test_copy_ignores_subfolders() {
    let l = layout();
    fs::create_dir(l.source.join("nested")).unwrap();
    write(&l.source, "file", b"data");

    let report = DedupEngine::with_defaults()
        .copy_uniques(&l.source, &l.existing, &l.output)
        .unwrap();

    assert_eq!(report.copied, 1);
    assert_eq!(report.summary.skipped_entries, 1);
}
