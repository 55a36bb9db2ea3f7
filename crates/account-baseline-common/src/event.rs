//! The event object threaded through the handler chain
//!
//! Every handler consumes the event produced by the previous one and returns
//! a new value. Handlers only ever add messages; nothing else changes after
//! the configuration loader builds the event.

use crate::config::GlobalConfig;
use crate::error::TriggerError;
use serde::{Deserialize, Deserializer, Serialize};

/// Strongly-typed AWS account ID (12-digit string)
///
/// This newtype prevents accidentally mixing account IDs with other strings
/// and ensures validation happens once, when the notification is parsed.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::Deref,
)]
#[serde(try_from = "String", into = "String")]
pub struct AccountId(String);

impl AccountId {
    /// Role ARN for `role_name` in this account
    pub fn role_arn(&self, role_name: &str) -> String {
        format!("arn:aws:iam::{}:role/{}", self.0, role_name)
    }
}

impl TryFrom<String> for AccountId {
    type Error = TriggerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.len() == 12 && value.bytes().all(|b| b.is_ascii_digit()) {
            Ok(AccountId(value))
        } else {
            Err(TriggerError::InvalidAccountId(value))
        }
    }
}

impl TryFrom<&str> for AccountId {
    type Error = TriggerError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        AccountId::try_from(value.to_string())
    }
}

impl From<AccountId> for String {
    fn from(id: AccountId) -> Self {
        id.0
    }
}

/// Cross-handler event object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineEvent {
    /// Parsed configuration document, validated again whenever an event is read
    #[serde(deserialize_with = "validated_config")]
    pub global_config: GlobalConfig,
    /// The account being baselined
    pub new_aws_account_id: AccountId,
    /// Role assumed in the new account
    pub cross_account_role_arn: String,
    /// Human-readable progress, in order
    #[serde(default)]
    pub messages: Vec<String>,
}

fn validated_config<'de, D>(deserializer: D) -> Result<GlobalConfig, D::Error>
where
    D: Deserializer<'de>,
{
    let config = GlobalConfig::deserialize(deserializer)?;
    config.ensure_valid().map_err(serde::de::Error::custom)?;
    Ok(config)
}

impl BaselineEvent {
    /// Create the initial event for a freshly provisioned account
    pub fn new(
        global_config: GlobalConfig,
        account_id: AccountId,
        cross_account_role_arn: impl Into<String>,
    ) -> Self {
        Self {
            global_config,
            new_aws_account_id: account_id,
            cross_account_role_arn: cross_account_role_arn.into(),
            messages: Vec::new(),
        }
    }

    /// Return this event with `message` appended
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.messages.push(message.into());
        self
    }

    /// Return this event with `messages` appended, in order
    pub fn with_messages(mut self, messages: impl IntoIterator<Item = String>) -> Self {
        self.messages.extend(messages);
        self
    }

    /// The account id as a plain string
    pub fn account_id(&self) -> &str {
        &self.new_aws_account_id
    }
}
