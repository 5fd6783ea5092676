use dupfinder::config::Config;
use dupfinder::scanner::ExcludeRule;
use figment::providers::{Env, Serialized};
use figment::Figment;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_config_load_defaults() {
    // Figment without Env so other tests cannot interfere
    let figment = Figment::from(Serialized::defaults(Config::default()));
    let config: Config = figment.extract().unwrap();

    assert_eq!(config, Config::default());
    assert_eq!(config.exclude, vec![ExcludeRule::default_rule()]);
}

#[test]
fn test_config_load_from_env() {
    std::env::set_var("DUPFINDER_ENVTEST_IO_THREADS", "16");
    std::env::set_var("DUPFINDER_ENVTEST_FOLLOW_SYMLINKS", "true");

    let figment = Figment::from(Serialized::defaults(Config::default()))
        .merge(Env::prefixed("DUPFINDER_ENVTEST_").split("__"));
    let config: Config = figment.extract().unwrap();

    assert_eq!(config.io_threads, 16);
    assert!(config.follow_symlinks);
    assert_eq!(config.buffer_size, 64 * 1024);

    std::env::remove_var("DUPFINDER_ENVTEST_IO_THREADS");
    std::env::remove_var("DUPFINDER_ENVTEST_FOLLOW_SYMLINKS");
}

#[test]
fn test_config_load_from_toml() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");

    let toml_content = r#"
io_threads = 8
buffer_size = 1048576
follow_symlinks = true

[[exclude]]
kind = "segment"
pattern = "node_modules"

[[exclude]]
kind = "glob"
pattern = "**/*.tmp"
"#;
    fs::write(&config_path, toml_content).unwrap();

    let config = Config::load_from(Some(&config_path)).unwrap();

    assert_eq!(config.io_threads, 8);
    assert_eq!(config.buffer_size, 1_048_576);
    assert!(config.follow_symlinks);
    assert_eq!(
        config.exclude,
        vec![
            ExcludeRule::Segment("node_modules".into()),
            ExcludeRule::Glob("**/*.tmp".into()),
        ]
    );
}

#[test]
fn test_config_partial_toml_keeps_defaults() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "io_threads = 2\n").unwrap();

    let config = Config::load_from(Some(&config_path)).unwrap();

    assert_eq!(config.io_threads, 2);
    assert_eq!(config.exclude, vec![ExcludeRule::default_rule()]);
    assert!(!config.follow_symlinks);
}

#[test]
fn test_config_missing_file_uses_defaults() {
    let temp_dir = tempdir().unwrap();
    let config = Config::load_from(Some(&temp_dir.path().join("absent.toml"))).unwrap();
    assert_eq!(config.io_threads, Config::default().io_threads);
}

#[test]
fn test_config_wrong_type_is_error() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "io_threads = \"many\"\n").unwrap();

    assert!(Config::load_from(Some(&config_path)).is_err());
}
