//! Exit code definitions for objprobe
//!
//! Scripts rely on these values to tell a missing object from a broken
//! connection. Changing them is a breaking change.

use objprobe_core::{FailureClass, ProbeResult};

/// Exit codes for the objprobe CLI application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Object found
    Success = 0,

    /// General/unspecified error, including unclassified service errors
    GeneralError = 1,

    /// User input or configuration error: missing credentials, bad endpoint, etc.
    UsageError = 2,

    /// Network error: unreachable endpoint, timeout, unreadable response
    NetworkError = 3,

    /// Authentication or permission failure
    AuthError = 4,

    /// Resource not found: bucket or object does not exist
    NotFound = 5,
}

impl ExitCode {
    /// Convert exit code to i32 for use with std::process::exit
    #[inline]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }

    /// Exit code for a class of probe failure
    pub const fn from_failure(class: FailureClass) -> Self {
        match class {
            FailureClass::Config => Self::UsageError,
            FailureClass::NotFound => Self::NotFound,
            FailureClass::AccessDenied => Self::AuthError,
            FailureClass::Network => Self::NetworkError,
            FailureClass::Service => Self::GeneralError,
        }
    }

    /// Exit code for a probe outcome
    pub fn from_result(result: &ProbeResult) -> Self {
        match result {
            ProbeResult::Success(_) => Self::Success,
            ProbeResult::Failure(failure) => Self::from_failure(failure.class),
        }
    }
}
