// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for `retry.rs`

#[cfg(test)]
mod tests {
    use super::super::{backoff_with_budget, is_retryable_error, retry_api_call};
    use crate::constants::DEFAULT_RETRY_MAX_ELAPSED_SECS;
    use crate::errors::ProviderError;
    use kube::core::Status;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    fn api_error(code: u16, reason: &str) -> kube::Error {
        let message = format!("{reason} from test");
        kube::Error::Api(Status::failure(&message, reason).with_code(code).boxed())
    }

    fn default_budget() -> super::super::ExponentialBackoff {
        backoff_with_budget(Some(Duration::from_secs(DEFAULT_RETRY_MAX_ELAPSED_SECS)))
    }

    /// Test that backoff configuration has expected values
    #[test]
    fn test_backoff_configuration() {
        let backoff = default_budget();

        assert_eq!(backoff.initial_interval, Duration::from_millis(100));
        assert_eq!(backoff.max_interval, Duration::from_secs(10));
        assert_eq!(backoff.max_elapsed_time, Some(Duration::from_secs(120)));

        #[allow(clippy::float_cmp)]
        {
            assert_eq!(backoff.multiplier, 2.0);
        }
    }

    /// Test that HTTP 429 and 5xx errors are retryable
    #[test]
    fn test_transient_api_errors_are_retryable() {
        assert!(is_retryable_error(&api_error(429, "TooManyRequests")));
        assert!(is_retryable_error(&api_error(500, "InternalError")));
        assert!(is_retryable_error(&api_error(503, "ServiceUnavailable")));
        assert!(is_retryable_error(&api_error(599, "ServerError")));
    }

    /// Test that 4xx client errors (except 429) are not retryable
    #[test]
    fn test_4xx_not_retryable() {
        for (code, reason) in [
            (400, "BadRequest"),
            (401, "Unauthorized"),
            (404, "NotFound"),
            (409, "Conflict"),
            (422, "Invalid"),
        ] {
            assert!(
                !is_retryable_error(&api_error(code, reason)),
                "HTTP {code} should not be retryable"
            );
        }
    }

    /// Test that service/network errors are retryable
    #[test]
    fn test_service_errors_retryable() {
        let service_error: Box<dyn std::error::Error + Send + Sync> = Box::new(
            std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "Connection failed"),
        );
        assert!(is_retryable_error(&kube::Error::Service(service_error)));
    }

    /// Test exponential growth and capping
    #[test]
    fn test_backoff_progression_caps_at_max_interval() {
        let mut backoff = backoff_with_budget(None);

        let intervals: Vec<Duration> = (0..10).filter_map(|_| backoff.next_backoff()).collect();
        assert_eq!(intervals[0], Duration::from_millis(100));
        assert_eq!(intervals[1], Duration::from_millis(200));
        assert_eq!(intervals[2], Duration::from_millis(400));
        assert_eq!(intervals[9], Duration::from_secs(10));
    }

    /// Test that a zero budget never schedules a retry
    #[test]
    fn test_zero_budget_is_exhausted_immediately() {
        let mut backoff = backoff_with_budget(Some(Duration::ZERO));
        assert_eq!(backoff.next_backoff(), None);
    }

    #[tokio::test]
    async fn test_retry_recovers_from_transient_error() {
        let calls = AtomicU32::new(0);
        let counter = &calls;
        let result = retry_api_call(
            move || async move {
                if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err(api_error(503, "ServiceUnavailable"))
                } else {
                    Ok("applied")
                }
            },
            "apply default/example-com",
            default_budget(),
        )
        .await;

        assert_eq!(result.unwrap(), "applied");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_retry_fails_fast_on_permanent_error() {
        let calls = AtomicU32::new(0);
        let counter = &calls;
        let result: Result<(), ProviderError> = retry_api_call(
            move || async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(api_error(422, "Invalid"))
            },
            "apply default/example-com",
            default_budget(),
        )
        .await;

        assert!(matches!(result, Err(ProviderError::Kube { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_retry_reports_exhaustion() {
        let result: Result<(), ProviderError> = retry_api_call(
            || async { Err(api_error(500, "InternalError")) },
            "get default/example-com",
            backoff_with_budget(Some(Duration::ZERO)),
        )
        .await;

        match result {
            Err(ProviderError::RetriesExhausted { attempts, operation, .. }) => {
                assert_eq!(attempts, 1);
                assert_eq!(operation, "get default/example-com");
            }
            other => panic!("expected RetriesExhausted, got {other:?}"),
        }
    }
}
