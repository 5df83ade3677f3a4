use clap::Parser;
use cleanset::cli::Cli;
use cleanset::commands;
use cleanset::error::ExitCode;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

fn write(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Empty config file so runs never read the user's own settings.
fn isolated_config(dir: &TempDir) -> String {
    let path = dir.path().join("config.toml");
    fs::write(&path, "").unwrap();
    path.to_string_lossy().into_owned()
}

fn run(args: &[&str]) -> ExitCode {
    let cli = Cli::try_parse_from(args).unwrap();
    commands::run(&cli).unwrap()
}

#[test]
fn test_within_exit_codes() {
    let cfg_dir = tempdir().unwrap();
    let config = isolated_config(&cfg_dir);
    let dir = tempdir().unwrap();
    write(dir.path(), "a", b"one");
    write(dir.path(), "b", b"two");
    let folder = dir.path().to_string_lossy().into_owned();

    let code = run(&["cleanset", "-q", "--config", config.as_str(), "within", folder.as_str(), "--format", "json"]);
    assert_eq!(code, ExitCode::NoDuplicates);

    write(dir.path(), "c", b"one");
    let code = run(&["cleanset", "-q", "--config", config.as_str(), "within", folder.as_str(), "--format", "csv"]);
    assert_eq!(code, ExitCode::Success);
}

#[test]
fn test_within_delete_with_yes() {
    let cfg_dir = tempdir().unwrap();
    let config = isolated_config(&cfg_dir);
    let dir = tempdir().unwrap();
    let a = write(dir.path(), "a", b"dup");
    let b = write(dir.path(), "b", b"dup");
    let folder = dir.path().to_string_lossy().into_owned();

    let code = run(&[
        "cleanset", "-q", "--no-color", "--config", config.as_str(), "within", folder.as_str(), "--format", "json", "--delete",
        "--permanent", "-y",
    ]);

    assert_eq!(code, ExitCode::Success);
    assert!(a.exists());
    assert!(!b.exists());
}

#[test]
fn test_across_missing_folder_is_error() {
    let cfg_dir = tempdir().unwrap();
    let config = isolated_config(&cfg_dir);
    let dir = tempdir().unwrap();
    let present = dir.path().to_string_lossy().into_owned();
    let missing = dir.path().join("missing").to_string_lossy().into_owned();

    let cli = Cli::try_parse_from(["cleanset", "-q", "--config", config.as_str(), "across", present.as_str(), missing.as_str()]).unwrap();
    let err = commands::run(&cli).unwrap_err();

    assert_eq!(ExitCode::for_error(&err), ExitCode::GeneralError);
}

#[test]
fn test_merge_copies_uniques() {
    let cfg_dir = tempdir().unwrap();
    let config = isolated_config(&cfg_dir);
    let root = tempdir().unwrap();
    let source = root.path().join("src");
    let existing = root.path().join("old");
    let output = root.path().join("out");
    fs::create_dir(&source).unwrap();
    fs::create_dir(&existing).unwrap();
    write(&source, "s1.txt", b"aa");
    write(&source, "s2.txt", b"bb");
    write(&existing, "e1.txt", b"aa");

    let source_arg = source.to_string_lossy().into_owned();
    let existing_arg = existing.to_string_lossy().into_owned();
    let output_arg = output.to_string_lossy().into_owned();
    let code = run(&[
        "cleanset",
        "-q",
        "--config",
        config.as_str(),
        "merge",
        "--source",
        source_arg.as_str(),
        "--existing",
        existing_arg.as_str(),
        "--output",
        output_arg.as_str(),
        "--prefix",
        "u_",
        "--format",
        "json",
    ]);

    assert_eq!(code, ExitCode::Success);
    assert_eq!(fs::read(output.join("u_1.txt")).unwrap(), b"bb");
    assert!(!output.join("u_2.txt").exists());
}

#[test]
fn test_merge_delete_removes_source_files_already_kept() {
    let cfg_dir = tempdir().unwrap();
    let config = isolated_config(&cfg_dir);
    let root = tempdir().unwrap();
    let source = root.path().join("src");
    let existing = root.path().join("old");
    let output = root.path().join("out");
    fs::create_dir(&source).unwrap();
    fs::create_dir(&existing).unwrap();
    let known = write(&source, "s1.txt", b"aa");
    let fresh = write(&source, "s2.txt", b"bb");
    let kept = write(&existing, "e1.txt", b"aa");

    let source_arg = source.to_string_lossy().into_owned();
    let existing_arg = existing.to_string_lossy().into_owned();
    let output_arg = output.to_string_lossy().into_owned();
    let code = run(&[
        "cleanset",
        "-q",
        "--config",
        config.as_str(),
        "merge",
        "--source",
        source_arg.as_str(),
        "--existing",
        existing_arg.as_str(),
        "--output",
        output_arg.as_str(),
        "--format",
        "json",
        "--delete",
        "--permanent",
        "-y",
    ]);

    assert_eq!(code, ExitCode::Success);
    assert!(!known.exists());
    assert!(fresh.exists());
    assert_eq!(fs::read(&kept).unwrap(), b"aa");
    assert_eq!(fs::read(output.join("clean_1.txt")).unwrap(), b"bb");
}

#[test]
fn test_merge_into_source_is_error() {
    let cfg_dir = tempdir().unwrap();
    let config = isolated_config(&cfg_dir);
    let root = tempdir().unwrap();
    let source = write(root.path(), "keep.txt", b"data").parent().unwrap().to_path_buf();
    let existing = root.path().join("old");
    fs::create_dir(&existing).unwrap();

    let source_arg = source.to_string_lossy().into_owned();
    let existing_arg = existing.to_string_lossy().into_owned();
    let cli = Cli::try_parse_from([
        "cleanset",
        "-q",
        "--config",
        config.as_str(),
        "merge",
        "--source",
        source_arg.as_str(),
        "--existing",
        existing_arg.as_str(),
        "--output",
        source_arg.as_str(),
    ])
    .unwrap();
    let err = commands::run(&cli).unwrap_err();

    assert_eq!(ExitCode::for_error(&err), ExitCode::GeneralError);
    assert!(format!("{err:#}").contains("same as input folder"));
    assert_eq!(fs::read(source.join("keep.txt")).unwrap(), b"data");
}
