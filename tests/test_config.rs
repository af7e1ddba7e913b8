use shrubbery::config::{Config, CONFIG_ENV};
use std::path::PathBuf;
use std::time::Duration;

#[test]
fn test_config_defaults() {
    let cfg = Config::default();

    assert_eq!(cfg.listen_addr, "127.0.0.1:10000");
    assert_eq!(cfg.root, PathBuf::from("webroot"));
    assert_eq!(cfg.max_request_bytes, 8192);
    assert_eq!(cfg.read_timeout(), Duration::from_secs(10));
    assert_eq!(cfg.connection_timeout(), Duration::from_secs(30));
    assert!(cfg.concurrent);
}

// Environment variables are process-wide, so every env-dependent assertion
// lives in this one test.
#[test]
fn test_config_load_from_env() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("shrubbery.yaml");
    std::fs::write(&file, "listen_addr: 0.0.0.0:3000\nconcurrent: false\n").unwrap();

    unsafe {
        std::env::remove_var(CONFIG_ENV);
        std::env::remove_var("LISTEN");
        std::env::remove_var("WEBROOT");
    }
    assert_eq!(Config::load().unwrap(), Config::default());

    unsafe {
        std::env::set_var(CONFIG_ENV, &file);
    }
    let cfg = Config::load().unwrap();
    assert_eq!(cfg.listen_addr, "0.0.0.0:3000");
    assert!(!cfg.concurrent);

    unsafe {
        std::env::set_var("LISTEN", "127.0.0.1:8000");
        std::env::set_var("WEBROOT", "/srv/www");
    }
    let cfg = Config::load().unwrap();
    assert_eq!(cfg.listen_addr, "127.0.0.1:8000");
    assert_eq!(cfg.root, PathBuf::from("/srv/www"));
    assert!(!cfg.concurrent);

    unsafe {
        std::env::set_var(CONFIG_ENV, dir.path().join("missing.yaml"));
    }
    assert!(Config::load().is_err());

    unsafe {
        std::env::remove_var(CONFIG_ENV);
        std::env::remove_var("LISTEN");
        std::env::remove_var("WEBROOT");
    }
}

#[test]
fn test_config_partial_yaml_keeps_defaults() {
    let cfg = Config::from_yaml_str("root: public\nmax_request_bytes: 1024\n").unwrap();

    assert_eq!(cfg.root, PathBuf::from("public"));
    assert_eq!(cfg.max_request_bytes, 1024);
    assert_eq!(cfg.listen_addr, "127.0.0.1:10000");
}

#[test]
fn test_config_empty_yaml_is_default() {
    assert_eq!(Config::from_yaml_str("").unwrap(), Config::default());
}

#[test]
fn test_config_rejects_unknown_keys() {
    assert!(Config::from_yaml_str("backends: []\n").is_err());
}

#[test]
fn test_config_rejects_wrong_types() {
    assert!(Config::from_yaml_str("read_timeout_secs: soon\n").is_err());
}

#[test]
fn test_config_clone() {
    let cfg1 = Config::from_yaml_str("listen_addr: 0.0.0.0:5000\n").unwrap();
    let cfg2 = cfg1.clone();
    assert_eq!(cfg1, cfg2);
}
