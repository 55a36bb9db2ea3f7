//! Default configuration values shared by the handlers
//!
//! These constants keep the handlers and the configuration document in agreement.

/// Region processed first in every sweep
pub const PREFERRED_REGION: &str = "us-east-1";

/// Default session name for cross-account role assumption
pub const DEFAULT_ROLE_SESSION_NAME: &str = "account-baseline";

/// "no-preference" value accepted by the instance metadata defaults API
pub const NO_PREFERENCE: &str = "no-preference";

/// Default IMDS PUT response hop limit
pub const DEFAULT_HOP_LIMIT: i32 = 1;

/// Snapshot block public access state applied by the EBS handler
pub const SNAPSHOT_BLOCK_STATE: &str = "block-all-sharing";

/// Account creation state that allows the chain to proceed
pub const CREATE_ACCOUNT_SUCCEEDED: &str = "SUCCEEDED";

// Serde default functions for struct field defaults

/// Returns "no-preference"
pub fn default_no_preference() -> String {
    NO_PREFERENCE.to_string()
}

/// Returns the default hop limit
pub fn default_hop_limit() -> i32 {
    DEFAULT_HOP_LIMIT
}
