//! S3 client implementation
//!
//! Wraps aws-sdk-s3 and implements the ObjectStore trait from objprobe-core.

use async_trait::async_trait;
use aws_config::retry::RetryConfig;
use aws_config::timeout::TimeoutConfig;
use aws_sdk_s3::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_s3::operation::head_object::HeadObjectError;
use aws_smithy_types::error::display::DisplayErrorContext;

use objprobe_core::{Error, ObjectMetadata, ObjectStore, ObjectTarget, ProbeConfig, Result};

/// S3 client wrapper
pub struct S3Client {
    inner: aws_sdk_s3::Client,
}

impl S3Client {
    /// Create a new S3 client from a validated configuration
    pub async fn new(config: &ProbeConfig) -> Result<Self> {
        let credentials = aws_credential_types::Credentials::new(
            config.access_key.clone(),
            config.secret_key.clone(),
            None, // session token
            None, // expiry
            "objprobe-static-credentials",
        );

        // One request per run: the SDK must not retry behind our back
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .credentials_provider(credentials)
            .region(aws_config::Region::new(config.region.clone()))
            .endpoint_url(&config.endpoint)
            .retry_config(RetryConfig::disabled());

        if config.connect_timeout.is_some() || config.operation_timeout.is_some() {
            let mut timeouts = TimeoutConfig::builder();
            if let Some(t) = config.connect_timeout {
                timeouts = timeouts.connect_timeout(t);
            }
            if let Some(t) = config.operation_timeout {
                timeouts = timeouts.operation_timeout(t);
            }
            loader = loader.timeout_config(timeouts.build());
        }

        let sdk_config = loader.load().await;

        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(config.path_style)
            .build();

        tracing::debug!(
            endpoint = %config.endpoint,
            region = %config.region,
            path_style = config.path_style,
            "created S3 client"
        );

        Ok(Self {
            inner: aws_sdk_s3::Client::from_conf(s3_config),
        })
    }
}

#[async_trait]
impl ObjectStore for S3Client {
    async fn head_object(&self, target: &ObjectTarget) -> Result<ObjectMetadata> {
        let response = self
            .inner
            .head_object()
            .bucket(&target.bucket)
            .key(&target.key)
            .send()
            .await
            .map_err(classify_head_error)?;

        let mut info = ObjectMetadata::new(&target.key, response.content_length().unwrap_or(0));

        if let Some(modified) = response.last_modified() {
            info.last_modified =
                jiff::Timestamp::new(modified.secs(), modified.subsec_nanos() as i32).ok();
        }

        if let Some(ct) = response.content_type() {
            info.content_type = Some(ct.to_string());
        }

        if let Some(etag) = response.e_tag() {
            info.etag = Some(etag.trim_matches('"').to_string());
        }

        if let Some(sc) = response.storage_class() {
            info.storage_class = Some(sc.as_str().to_string());
        }

        Ok(info)
    }
}

/// Map a HeadObject SDK error onto the core error taxonomy
fn classify_head_error(err: SdkError<HeadObjectError>) -> Error {
    match &err {
        SdkError::ServiceError(context) => {
            let service_err = context.err();
            let status = context.raw().status().as_u16();
            if service_err.is_not_found() {
                return Error::NotFound {
                    code: service_err.code().unwrap_or("NotFound").to_string(),
                    message: service_err
                        .message()
                        .unwrap_or(NOT_FOUND_MESSAGE)
                        .to_string(),
                };
            }
            classify_service_error(status, service_err.code(), service_err.message())
        }
        SdkError::TimeoutError(_) => Error::Network {
            kind: "TimeoutError".into(),
            message: DisplayErrorContext(&err).to_string(),
        },
        SdkError::DispatchFailure(_) => Error::Network {
            kind: "DispatchFailure".into(),
            message: DisplayErrorContext(&err).to_string(),
        },
        SdkError::ResponseError(_) => Error::Network {
            kind: "ResponseError".into(),
            message: DisplayErrorContext(&err).to_string(),
        },
        _ => Error::General(DisplayErrorContext(&err).to_string()),
    }
}

const NOT_FOUND_MESSAGE: &str = "The specified key does not exist.";
const ACCESS_DENIED_MESSAGE: &str = "Access Denied";

/// Classify a service error from its HTTP status and error metadata
///
/// HEAD responses carry no body, so the code and message are often absent;
/// the status code then decides, with canonical S3 wording as the message.
pub fn classify_service_error(status: u16, code: Option<&str>, message: Option<&str>) -> Error {
    match code {
        Some(code @ ("NotFound" | "NoSuchKey" | "NoSuchBucket")) => {
            return Error::NotFound {
                code: code.to_string(),
                message: message.unwrap_or(NOT_FOUND_MESSAGE).to_string(),
            };
        }
        Some(
            code @ ("AccessDenied"
            | "Forbidden"
            | "InvalidAccessKeyId"
            | "SignatureDoesNotMatch"
            | "ExpiredToken"),
        ) => {
            return Error::AccessDenied {
                code: code.to_string(),
                message: message.unwrap_or(ACCESS_DENIED_MESSAGE).to_string(),
            };
        }
        _ => {}
    }

    match status {
        404 => Error::NotFound {
            code: code.unwrap_or("NotFound").to_string(),
            message: message.unwrap_or(NOT_FOUND_MESSAGE).to_string(),
        },
        403 => Error::AccessDenied {
            code: code.unwrap_or("AccessDenied").to_string(),
            message: message.unwrap_or(ACCESS_DENIED_MESSAGE).to_string(),
        },
        401 => Error::AccessDenied {
            code: code.unwrap_or("Unauthorized").to_string(),
            message: message.unwrap_or("Unauthorized").to_string(),
        },
        _ => Error::Service {
            code: code.map_or_else(|| format!("Http{status}"), str::to_string),
            message: message
                .map_or_else(|| format!("Request failed with HTTP status {status}"), str::to_string),
        },
    }
}
