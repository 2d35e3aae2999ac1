#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use promtext_http::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
server:
  listen: "0.0.0.0:9100"
  chunk_bytez: 123 # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert!(err.to_string().contains("invalid config"));
}

#[test]
fn ok_minimal_config() {
    let ok = r#"
version: 1
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.server.listen, "0.0.0.0:9100");
    assert_eq!(cfg.server.metrics_path, "/metrics");
    assert_eq!(cfg.server.chunk_bytes, 1024);
    assert!(cfg.global_labels().is_empty());
}

#[test]
fn rejects_wrong_version() {
    let bad = "version: 2\n";
    config::load_from_str(bad).expect_err("must fail");
}

#[test]
fn rejects_relative_metrics_path() {
    let bad = r#"
version: 1
server:
  metrics_path: "metrics"
"#;
    config::load_from_str(bad).expect_err("must fail");
}

#[test]
fn rejects_out_of_range_chunk_bytes() {
    let bad = r#"
version: 1
server:
  chunk_bytes: 8
"#;
    config::load_from_str(bad).expect_err("must fail");
}

#[test]
fn global_labels_become_a_label_set() {
    let ok = r#"
version: 1
global_labels:
  instance: "dev"
  zone: "eu"
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    let labels = cfg.global_labels();
    assert_eq!(labels.get("instance"), Some("dev"));
    assert_eq!(labels.get("zone"), Some("eu"));
}
