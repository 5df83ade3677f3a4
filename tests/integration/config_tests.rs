use cleanset::config::Config;
use cleanset::duplicates::CanonicalPolicy;
use cleanset::scanner::EnumerationOrder;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_config_load_defaults() {
    // Figment without Env so other tests cannot interfere
    let config: Config = Figment::from(Serialized::defaults(Config::default()))
        .extract()
        .unwrap();
    assert_eq!(config.io_threads, 4);
    assert_eq!(config.order, EnumerationOrder::Name);
    assert_eq!(config.output_prefix, "clean_");
    assert!(!config.permanent_delete);
}

#[test]
fn test_config_load_from_env() {
    std::env::set_var("CLEANSET_ENVTEST_IO_THREADS", "16");
    std::env::set_var("CLEANSET_ENVTEST_CANONICAL", "newest");

    let config: Config = Figment::from(Serialized::defaults(Config::default()))
        .merge(Env::prefixed("CLEANSET_ENVTEST_"))
        .extract()
        .unwrap();

    assert_eq!(config.io_threads, 16);
    assert_eq!(config.canonical, CanonicalPolicy::NewestModified);

    std::env::remove_var("CLEANSET_ENVTEST_IO_THREADS");
    std::env::remove_var("CLEANSET_ENVTEST_CANONICAL");
}

#[test]
fn test_config_load_from_explicit_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("cleanset.toml");
    fs::write(
        &path,
        r#"
io_threads = 2
order = "filesystem"
canonical = "oldest"
strict = true
read_timeout_secs = 30
output_prefix = "kept_"
"#,
    )
    .unwrap();

    let config = Config::load_from(Some(&path)).unwrap();

    assert_eq!(config.io_threads, 2);
    assert_eq!(config.order, EnumerationOrder::Filesystem);
    assert_eq!(config.canonical, CanonicalPolicy::OldestModified);
    assert!(config.strict);
    assert_eq!(config.read_timeout_secs, Some(30));
    assert_eq!(config.output_prefix, "kept_");
}

#[test]
fn test_config_partial_file_keeps_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "strict = true\n").unwrap();

    let config: Config = Figment::from(Serialized::defaults(Config::default()))
        .merge(Toml::file(&path))
        .extract()
        .unwrap();

    assert!(config.strict);
    assert_eq!(config.io_threads, 4);
    assert_eq!(config.canonical, CanonicalPolicy::FirstDiscovered);
}

#[test]
fn test_config_invalid_value_is_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");

    fs::write(&path, "canonical = \"largest\"\n").unwrap();
    assert!(Config::load_from(Some(&path)).is_err());

    fs::write(&path, "io_threads = 0\n").unwrap();
    assert!(Config::load_from(Some(&path)).is_err());
}

#[test]
fn test_config_save_toml() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.toml");

    let config = Config {
        skip_hidden: true,
        permanent_delete: true,
        ..Config::default()
    };
    config.save_to(&path).unwrap();

    let loaded = Config::load_from(Some(&path)).unwrap();
    assert!(loaded.skip_hidden);
    assert!(loaded.permanent_delete);
}
