//! probe command - Check that an object exists and show its metadata
//!
//! Issues a single metadata-only request for bucket/key and reports either
//! the object's metadata or the backend's error classification.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use objprobe_core::{
    ConfigManager, Error, FailureClass, ObjectTarget, ProbeConfig, ProbeFailure, ProbeResult,
    StorageSettings, config, parse_target, probe,
};
use objprobe_s3::S3Client;

use crate::exit_code::ExitCode;
use crate::output::{ErrorOutput, FoundOutput, Formatter, OutputConfig, failure_lines, success_lines};

/// Check that an object exists and show its metadata
#[derive(Args, Debug)]
pub struct ProbeArgs {
    /// Bucket name, or bucket/key when KEY is omitted
    #[arg(env = "OBJPROBE_BUCKET")]
    pub bucket: String,

    /// Object key
    #[arg(env = "OBJPROBE_KEY")]
    pub key: Option<String>,

    /// Storage endpoint; https:// is assumed without a scheme. Overrides S3_ENDPOINT
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Region, defaults to ap-southeast-1. Overrides S3_REGION
    #[arg(long)]
    pub region: Option<String>,

    /// Access key ID. Overrides S3_ACCESS_KEY
    #[arg(long)]
    pub access_key: Option<String>,

    /// Secret access key. Overrides S3_SECRET_KEY
    #[arg(long)]
    pub secret_key: Option<String>,

    /// Use virtual-hosted bucket addressing instead of path style
    #[arg(long, default_value = "false")]
    pub virtual_host: bool,

    /// Connection timeout in milliseconds
    #[arg(long)]
    pub connect_timeout_ms: Option<u64>,

    /// Whole-request timeout in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Configuration file. Overrides OBJPROBE_CONFIG
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Exit with status 0 even when the probe fails
    #[arg(long, default_value = "false")]
    pub exit_zero: bool,
}

impl ProbeArgs {
    /// Settings given on the command line
    ///
    /// Empty values count as unset, as they do in the environment.
    fn flag_settings(&self) -> StorageSettings {
        let non_empty = |value: &Option<String>| value.clone().filter(|v| !v.trim().is_empty());
        StorageSettings {
            endpoint: non_empty(&self.endpoint),
            region: non_empty(&self.region),
            access_key: non_empty(&self.access_key),
            secret_key: non_empty(&self.secret_key),
            path_style: self.virtual_host.then_some(false),
            connect_timeout_ms: self.connect_timeout_ms,
            operation_timeout_ms: self.timeout_ms,
        }
    }

    fn exit_status(&self, class: FailureClass) -> ExitCode {
        if self.exit_zero {
            ExitCode::Success
        } else {
            ExitCode::from_failure(class)
        }
    }
}

/// Execute the probe command
pub async fn execute(args: ProbeArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let target = match &args.key {
        Some(key) => ObjectTarget::new(&args.bucket, key),
        None => parse_target(&args.bucket),
    };
    let target = match target {
        Ok(t) => t,
        Err(e) => {
            let failure = ProbeFailure::from(&e);
            report_failure(&formatter, None, &failure);
            return args.exit_status(failure.class);
        }
    };

    let probe_config = match load_config(&args) {
        Ok(c) => c,
        Err(e) => {
            let failure = config_failure(&e);
            report_failure(&formatter, Some(&target), &failure);
            return args.exit_status(failure.class);
        }
    };

    if !formatter.is_json() {
        formatter.println(&format!("Checking bucket: {}", target.bucket));
        formatter.println(&format!("Checking key: {}", target.key));
    }

    let client = match S3Client::new(&probe_config).await {
        Ok(c) => c,
        Err(e) => {
            let failure = ProbeFailure::from(&e);
            report_failure(&formatter, Some(&target), &failure);
            return args.exit_status(failure.class);
        }
    };

    let result = probe(&client, &target).await;
    report(&formatter, &target, &result);

    if args.exit_zero {
        ExitCode::Success
    } else {
        ExitCode::from_result(&result)
    }
}

/// Merge defaults, config file, environment and flags into a validated config
fn load_config(args: &ProbeArgs) -> anyhow::Result<ProbeConfig> {
    let manager = match &args.config {
        Some(path) => ConfigManager::explicit(path.clone()),
        None => ConfigManager::new(),
    };
    let file = manager.load().with_context(|| match manager.config_path() {
        Some(path) => format!("Failed to load configuration file {}", path.display()),
        None => "Failed to load configuration".to_string(),
    })?;

    let settings = resolve_settings(file.storage, StorageSettings::from_env(), args.flag_settings());
    let probe_config = ProbeConfig::from_settings(settings)?;
    tracing::debug!(config = ?probe_config, "configuration loaded");
    Ok(probe_config)
}

/// Describe a configuration failure in the same terms as a failed probe
fn config_failure(err: &anyhow::Error) -> ProbeFailure {
    let error_kind = err
        .downcast_ref::<Error>()
        .map_or("ConfigError", |e| e.kind())
        .to_string();
    let message = err
        .chain()
        .map(|cause| {
            cause
                .downcast_ref::<Error>()
                .map_or_else(|| cause.to_string(), Error::message)
        })
        .collect::<Vec<_>>()
        .join(": ");

    ProbeFailure {
        class: FailureClass::Config,
        error_kind,
        message,
    }
}

/// Layer settings: file, then environment, then flags
fn resolve_settings(
    file: StorageSettings,
    env: StorageSettings,
    flags: StorageSettings,
) -> StorageSettings {
    StorageSettings {
        region: Some(config::DEFAULT_REGION.to_string()),
        ..Default::default()
    }
    .merge(file)
    .merge(env)
    .merge(flags)
}

fn report(formatter: &Formatter, target: &ObjectTarget, result: &ProbeResult) {
    match result {
        ProbeResult::Success(meta) => {
            if formatter.is_json() {
                formatter.json(&FoundOutput::new(target, meta));
            } else {
                formatter.success("Object found");
                for line in success_lines(meta) {
                    formatter.println(&format!("  {line}"));
                }
            }
        }
        ProbeResult::Failure(failure) => report_failure(formatter, Some(target), failure),
    }
}

fn report_failure(formatter: &Formatter, target: Option<&ObjectTarget>, failure: &ProbeFailure) {
    if formatter.is_json() {
        formatter.json_error(&ErrorOutput::new(target, failure));
    } else {
        formatter.error("Object probe failed");
        for line in failure_lines(failure) {
            formatter.eprintln(&format!("  {line}"));
        }
    }
}
