//! Account-creation notification
//!
//! The chain is started by the organizations `CreateAccountResult` event.
//! Only the fields the handlers need are modelled; everything else is ignored.

use crate::defaults::CREATE_ACCOUNT_SUCCEEDED;
use crate::error::TriggerError;
use crate::event::AccountId;
use serde::Deserialize;

/// Notification delivered when account creation finishes
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAccountNotification {
    pub detail: NotificationDetail,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationDetail {
    pub service_event_details: ServiceEventDetails,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceEventDetails {
    pub create_account_status: CreateAccountStatus,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountStatus {
    pub state: String,
    #[serde(default)]
    pub account_id: Option<String>,
    #[serde(default)]
    pub failure_reason: Option<String>,
}

impl CreateAccountNotification {
    /// Parse a notification from its JSON form
    pub fn from_json(json: &str) -> Result<Self, TriggerError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Raw creation status
    pub fn status(&self) -> &CreateAccountStatus {
        &self.detail.service_event_details.create_account_status
    }

    /// The new account id, provided account creation succeeded
    pub fn succeeded_account(&self) -> Result<AccountId, TriggerError> {
        let status = self.status();
        if status.state != CREATE_ACCOUNT_SUCCEEDED {
            let state = match &status.failure_reason {
                Some(reason) => format!("{} ({})", status.state, reason),
                None => status.state.clone(),
            };
            return Err(TriggerError::NotSucceeded { state });
        }

        let account_id = status.account_id.clone().unwrap_or_default();
        AccountId::try_from(account_id)
    }
}
