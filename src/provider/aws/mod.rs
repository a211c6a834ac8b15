//! # AWS Providers
//!
//! AWS SDK implementations of the remote API traits.
//!
//! Every request:
//! - runs inside a debug span named `<service>.<operation>`
//! - is counted and timed in [`crate::observability::metrics`]
//! - has SDK failures converted into [`Error::Remote`] carrying the provider error code

use crate::error::{Error, Result};
use crate::observability::metrics;
use aws_sdk_elasticache::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use chrono::{DateTime, Utc};
use std::future::Future;
use std::time::Instant;
use tracing::debug;

pub mod ec2;
pub mod elasticache;
pub mod secrets_manager;

pub use ec2::AwsEc2;
pub use elasticache::AwsElastiCache;
pub use secrets_manager::AwsSecretsManager;

/// Convert an SDK failure into a remote error, keeping the provider error code
pub(crate) fn remote_error<E, R>(
    service: &'static str,
    operation: &'static str,
    err: &SdkError<E, R>,
) -> Error
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    let message = err
        .message()
        .map_or_else(|| DisplayErrorContext(err).to_string(), ToString::to_string);
    Error::Remote {
        service,
        operation,
        code: err.code().map(ToString::to_string),
        message,
    }
}

/// Await one remote request, recording request/error metrics and duration
pub(crate) async fn observe<T, F>(
    service: &'static str,
    operation: &'static str,
    request: F,
) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    let start = Instant::now();
    let result = request.await;
    let elapsed = start.elapsed();
    let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
    metrics::record_remote_request(service, operation, elapsed.as_secs_f64());

    match &result {
        Ok(_) => debug!(
            service,
            operation,
            duration_ms,
            "request completed"
        ),
        Err(e) => {
            metrics::increment_remote_request_errors(service, operation);
            debug!(
                service,
                operation,
                duration_ms,
                error.code = e.code().unwrap_or("none"),
                "request failed"
            );
        }
    }
    result
}

pub(crate) fn empty_response(
    service: &'static str,
    operation: &'static str,
    field: &'static str,
) -> Error {
    Error::EmptyResponse {
        service,
        operation,
        field,
    }
}

pub(crate) fn to_chrono(value: &aws_sdk_elasticache::primitives::DateTime) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(value.secs(), value.subsec_nanos())
}

pub(crate) fn owned(value: Option<&str>) -> Option<String> {
    value.map(ToString::to_string)
}

/// Empty lists are sent as "absent" rather than as an empty member
pub(crate) fn non_empty<T: Clone>(values: &[T]) -> Option<Vec<T>> {
    (!values.is_empty()).then(|| values.to_vec())
}
