//! AWS test utilities
//!
//! Provides region detection and unique session names for AWS integration tests.

/// Get the AWS region for tests.
///
/// Checks environment variables in order:
/// 1. AWS_REGION
/// 2. AWS_DEFAULT_REGION
/// 3. Falls back to us-east-1
///
/// # Example
///
/// ```
/// use account_baseline_test_utils::aws::get_test_region;
///
/// let region = get_test_region();
/// assert!(!region.is_empty());
/// ```
pub fn get_test_region() -> String {
    std::env::var("AWS_REGION")
        .or_else(|_| std::env::var("AWS_DEFAULT_REGION"))
        .unwrap_or_else(|_| "us-east-1".to_string())
}

/// Role to assume in integration tests, from `TEST_ROLE_ARN`.
pub fn test_role_arn() -> Option<String> {
    std::env::var("TEST_ROLE_ARN").ok().filter(|arn| !arn.is_empty())
}

/// Generate a unique role session name for a test.
///
/// Format: `baseline-test-{timestamp_ms}-{counter}`, which stays within the
/// 64-character limit STS puts on session names.
///
/// # Example
///
/// ```
/// use account_baseline_test_utils::aws::test_session_name;
///
/// let name = test_session_name();
/// assert!(name.starts_with("baseline-test-"));
/// ```
pub fn test_session_name() -> String {
    use std::sync::atomic::{AtomicU32, Ordering};
    static COUNTER: AtomicU32 = AtomicU32::new(0);

    let ts = chrono::Utc::now().timestamp_millis();
    let counter = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("baseline-test-{ts}-{counter}")
}
