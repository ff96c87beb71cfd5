//! Integration tests for objprobe
//!
//! These tests require a running S3-compatible server holding one known
//! object. objprobe never writes, so seed the object with any other client.
//!
//! Run with:
//! ```bash
//! # Start a RustFS container
//! docker run -d --name rustfs -p 9000:9000 \
//!     -e RUSTFS_ACCESS_KEY=accesskey \
//!     -e RUSTFS_SECRET_KEY=secretkey \
//!     rustfs/rustfs:1.0.0-alpha.81
//!
//! # Seed an object, e.g. with the aws cli
//! aws --endpoint-url http://localhost:9000 s3 mb s3://probe-test
//! aws --endpoint-url http://localhost:9000 s3 cp photo.png s3://probe-test/profiles/photo.png
//!
//! # Run tests
//! TEST_S3_ENDPOINT=http://localhost:9000 TEST_S3_ACCESS_KEY=accesskey \
//! TEST_S3_SECRET_KEY=secretkey TEST_S3_BUCKET=probe-test \
//! TEST_S3_KEY=profiles/photo.png cargo test --features integration
//! ```

#![cfg(feature = "integration")]

use std::process::{Command, Output};

use tempfile::TempDir;

/// Connection details and a known object
struct TestConfig {
    endpoint: String,
    access_key: String,
    secret_key: String,
    bucket: String,
    key: String,
}

/// Get S3 test configuration from environment
fn get_test_config() -> Option<TestConfig> {
    Some(TestConfig {
        endpoint: std::env::var("TEST_S3_ENDPOINT").ok()?,
        access_key: std::env::var("TEST_S3_ACCESS_KEY").ok()?,
        secret_key: std::env::var("TEST_S3_SECRET_KEY").ok()?,
        bucket: std::env::var("TEST_S3_BUCKET").ok()?,
        key: std::env::var("TEST_S3_KEY").ok()?,
    })
}

/// Run objprobe with storage settings passed through the environment
fn run_objprobe(args: &[&str], config: &TestConfig, secret_key: &str) -> Output {
    let config_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = config_dir.path().join("config.toml");
    std::fs::write(&config_path, "schema_version = 1\n").expect("Failed to write config");

    Command::new(env!("CARGO_BIN_EXE_objprobe"))
        .args(args)
        .env("OBJPROBE_CONFIG", &config_path)
        .env("S3_ENDPOINT", &config.endpoint)
        .env("S3_ACCESS_KEY", &config.access_key)
        .env("S3_SECRET_KEY", secret_key)
        .output()
        .expect("Failed to execute objprobe")
}

fn stdout_json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("Invalid JSON output")
}

fn stderr_json(output: &Output) -> serde_json::Value {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let start = stderr.find('{').expect("JSON document on stderr");
    serde_json::Deserializer::from_str(&stderr[start..])
        .into_iter()
        .next()
        .expect("JSON document on stderr")
        .expect("Invalid JSON output")
}

mod found {
    use super::*;

    #[test]
    fn test_existing_object() {
        let config = match get_test_config() {
            Some(c) => c,
            None => {
                eprintln!("Skipping: S3 test config not available");
                return;
            }
        };

        let output = run_objprobe(
            &["--json", &config.bucket, &config.key],
            &config,
            &config.secret_key,
        );
        assert!(
            output.status.success(),
            "Probe failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        let json = stdout_json(&output);
        assert_eq!(json["status"], "found");
        assert!(json["content_length"].as_i64().unwrap_or(0) > 0);

        let modified = json["last_modified"]
            .as_str()
            .expect("Expected last_modified in output");
        assert!(
            modified.parse::<jiff::Timestamp>().is_ok(),
            "Malformed timestamp: {modified}"
        );
    }

    #[test]
    fn test_repeated_probe_is_stable() {
        let config = match get_test_config() {
            Some(c) => c,
            None => {
                eprintln!("Skipping: S3 test config not available");
                return;
            }
        };

        let args = ["--json", config.bucket.as_str(), config.key.as_str()];
        let first = stdout_json(&run_objprobe(&args, &config, &config.secret_key));
        let second = stdout_json(&run_objprobe(&args, &config, &config.secret_key));

        assert_eq!(first["content_length"], second["content_length"]);
        assert_eq!(first["content_type"], second["content_type"]);
    }

    #[test]
    fn test_human_output() {
        let config = match get_test_config() {
            Some(c) => c,
            None => {
                eprintln!("Skipping: S3 test config not available");
                return;
            }
        };

        let output = run_objprobe(
            &["--no-color", &config.bucket, &config.key],
            &config,
            &config.secret_key,
        );
        assert!(output.status.success());

        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains(&format!("Checking bucket: {}", config.bucket)));
        assert!(stdout.contains(&format!("Checking key: {}", config.key)));
        assert!(stdout.contains("Object found"));
        assert!(stdout.contains("Content-Length"));
    }
}

mod error_handling {
    use super::*;

    #[test]
    fn test_missing_key() {
        let config = match get_test_config() {
            Some(c) => c,
            None => {
                eprintln!("Skipping: S3 test config not available");
                return;
            }
        };

        let output = run_objprobe(
            &["--json", &config.bucket, "objprobe/definitely-missing.bin"],
            &config,
            &config.secret_key,
        );
        assert_eq!(output.status.code(), Some(5));

        let json = stderr_json(&output);
        assert_eq!(json["status"], "error");
        assert_eq!(json["error_kind"], "NotFound");
    }

    #[test]
    fn test_invalid_credentials() {
        let config = match get_test_config() {
            Some(c) => c,
            None => {
                eprintln!("Skipping: S3 test config not available");
                return;
            }
        };

        let output = run_objprobe(
            &["--json", &config.bucket, &config.key],
            &config,
            "not-the-secret-key",
        );
        assert_eq!(
            output.status.code(),
            Some(4),
            "Expected exit code 4 (AUTH_ERROR), stderr: {}",
            String::from_utf8_lossy(&output.stderr)
        );
    }
}
