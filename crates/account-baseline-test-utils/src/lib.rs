//! Shared test utilities for account-baseline
//!
//! - [`aws`]: region detection and session names for AWS integration tests
//! - [`fixtures`]: configuration documents and trigger notifications

pub mod aws;
pub mod fixtures;
