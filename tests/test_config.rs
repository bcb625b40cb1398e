use box_server::config::{Config, MalformedPolicy};
use std::time::Duration;

#[test]
fn test_config_defaults() {
    let cfg = Config::default();

    assert_eq!(cfg.server.listen_addr, "0.0.0.0:3000");
    assert_eq!(cfg.server.workers, None);
    assert_eq!(cfg.connection.read_timeout(), None);
    assert_eq!(cfg.connection.on_malformed, MalformedPolicy::Close);
}

#[test]
fn test_config_from_yaml() {
    let cfg = Config::from_yaml_str(
        r#"
server:
  listen_addr: "127.0.0.1:8000"
  workers: 8
connection:
  read_timeout_secs: 30
  on_malformed: bad_request
"#,
    )
    .unwrap();

    assert_eq!(cfg.server.listen_addr, "127.0.0.1:8000");
    assert_eq!(cfg.server.workers, Some(8));
    assert_eq!(cfg.connection.read_timeout(), Some(Duration::from_secs(30)));
    assert_eq!(cfg.connection.on_malformed, MalformedPolicy::BadRequest);
}

#[test]
fn test_config_partial_yaml_uses_defaults() {
    let cfg = Config::from_yaml_str("connection:\n  read_timeout_secs: 5\n").unwrap();

    assert_eq!(cfg.server.listen_addr, "0.0.0.0:3000");
    assert_eq!(cfg.connection.read_timeout_secs, Some(5));
    assert_eq!(cfg.connection.on_malformed, MalformedPolicy::Close);
}

#[test]
fn test_config_rejects_unknown_policy() {
    let result = Config::from_yaml_str("connection:\n  on_malformed: shrug\n");
    assert!(result.is_err());
}

#[test]
fn test_config_clone() {
    let cfg1 = Config::default();
    let cfg2 = cfg1.clone();
    assert_eq!(cfg1.server.listen_addr, cfg2.server.listen_addr);
}

// Environment is process-wide, so every env-dependent case lives in this one test.
#[test]
fn test_config_load_from_environment() {
    let path = std::env::temp_dir().join(format!("box-server-{}.yaml", std::process::id()));
    std::fs::write(&path, "server:\n  listen_addr: \"127.0.0.1:9000\"\n  workers: 2\n").unwrap();

    unsafe {
        std::env::remove_var("BOX_CONFIG");
        std::env::remove_var("LISTEN");
    }
    let cfg = Config::load().unwrap();
    assert_eq!(cfg.server.listen_addr, "0.0.0.0:3000");

    unsafe {
        std::env::set_var("BOX_CONFIG", &path);
    }
    let cfg = Config::load().unwrap();
    assert_eq!(cfg.server.listen_addr, "127.0.0.1:9000");
    assert_eq!(cfg.server.workers, Some(2));

    unsafe {
        std::env::set_var("LISTEN", "0.0.0.0:5000");
    }
    let cfg = Config::load().unwrap();
    assert!(cfg.server.listen_addr.starts_with("0.0.0.0"));
    assert!(cfg.server.listen_addr.contains("5000"));
    assert_eq!(cfg.server.workers, Some(2));

    unsafe {
        std::env::set_var("BOX_CONFIG", "/nonexistent/box-server.yaml");
    }
    assert!(Config::load().is_err());

    unsafe {
        std::env::remove_var("BOX_CONFIG");
        std::env::remove_var("LISTEN");
    }
    let _ = std::fs::remove_file(&path);
}
