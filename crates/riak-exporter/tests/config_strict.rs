#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use riak_exporter::cli::CliOptions;
use riak_exporter::config;
use riak_exporter_core::error::ErrorKind;

#[test]
fn defaults_match_documented_values() {
    let cfg = config::load_from_str("{}").expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.web.listen_address, ":9104");
    assert_eq!(cfg.web.telemetry_path, "/metrics");
    assert_eq!(cfg.riak.uri, "http://localhost:8098");
    assert_eq!(cfg.riak.timeout_ms, 5000);

    let addr = cfg.web.socket_addr().unwrap();
    assert_eq!(addr.port(), 9104);
    assert!(addr.ip().is_unspecified());
}

#[test]
fn full_config() {
    let ok = r#"
version: 1
web:
  listen_address: "127.0.0.1:9200"
  telemetry_path: "/riak"
riak:
  uri: "http://riak-1.internal:8098/"
  timeout_ms: 2500
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.web.socket_addr().unwrap().to_string(), "127.0.0.1:9200");
    assert_eq!(cfg.web.telemetry_path, "/riak");
    assert_eq!(cfg.riak.base_url().unwrap(), "http://riak-1.internal:8098");
    assert_eq!(cfg.riak.timeout_ms, 2500);
}

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
riak:
  url: "http://localhost:8098" # typo should fail
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.kind(), ErrorKind::Config);
}

#[test]
fn rejects_invalid_values() {
    let cases = [
        "version: 2",
        "riak: { uri: \"localhost:8098\" }",
        "riak: { uri: \"not a url\" }",
        "riak: { uri: \"ftp://localhost:8098\" }",
        "riak: { timeout_ms: 10 }",
        "riak: { timeout_ms: 600000 }",
        "web: { telemetry_path: \"metrics\" }",
        "web: { telemetry_path: \"/\" }",
        "web: { telemetry_path: \"/healthz\" }",
        "web: { telemetry_path: \"/metrics/*\" }",
        "web: { telemetry_path: \"/:metrics\" }",
        "web: { telemetry_path: \"/{metrics}\" }",
        "web: { listen_address: \"nonsense\" }",
    ];
    for case in cases {
        let err = config::load_from_str(case).expect_err(case);
        assert_eq!(err.kind().as_str(), "CONFIG", "{case}");
    }
}

#[test]
fn cli_overrides_file() {
    let dir = std::env::temp_dir().join(format!("riak-exporter-cfg-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("riak-exporter.yaml");
    std::fs::write(
        &path,
        "web:\n  telemetry_path: \"/from-file\"\nriak:\n  uri: \"http://file:8098\"\n",
    )
    .unwrap();

    let opts = CliOptions {
        config_file: Some(path.to_string_lossy().into_owned()),
        riak_uri: Some("http://flag:8098".into()),
        timeout_ms: Some(750),
        ..CliOptions::default()
    };
    let cfg = config::resolve(&opts).unwrap();
    assert_eq!(cfg.web.telemetry_path, "/from-file");
    assert_eq!(cfg.riak.uri, "http://flag:8098");
    assert_eq!(cfg.riak.timeout_ms, 750);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn missing_config_file_is_fatal() {
    let opts = CliOptions {
        config_file: Some("/nonexistent/riak-exporter.yaml".into()),
        ..CliOptions::default()
    };
    let err = config::resolve(&opts).expect_err("must fail");
    assert_eq!(err.kind(), ErrorKind::Config);
}

#[test]
fn invalid_override_is_fatal() {
    let opts = CliOptions {
        riak_uri: Some("::::".into()),
        ..CliOptions::default()
    };
    assert!(config::resolve(&opts).is_err());
}

#[test]
fn pattern_telemetry_path_override_is_a_config_error() {
    for path in ["/metrics/*", "/:metrics"] {
        let opts = CliOptions {
            telemetry_path: Some(path.into()),
            ..CliOptions::default()
        };
        let err = config::resolve(&opts).expect_err(path);
        assert_eq!(err.kind(), ErrorKind::Config, "{path}");
    }
}
