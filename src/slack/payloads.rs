use serde::{Deserialize, Serialize};

use super::interaction::InteractionCallback;
use crate::error::DecodeError;

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Team {
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub domain: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub enterprise_id: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Channel {
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct User {
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub username: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub team_id: String,
}

/// The form body Slack POSTs to an interactivity request URL:
/// `payload=<url-encoded JSON>`.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct SlackInteraction {
    pub payload: String,
}

impl SlackInteraction {
    pub fn decode(&self) -> Result<InteractionCallback, DecodeError> {
        InteractionCallback::from_slice(self.payload.as_bytes())
    }
}
