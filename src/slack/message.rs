use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::actions::AttachmentAction;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ResponseType {
    Ephemeral,
    InChannel,
}

fn is_zero(n: &i64) -> bool {
    *n == 0
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Attachment {
    #[serde(skip_serializing_if = "is_zero")]
    pub id: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub callback_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub fallback: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub color: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub pretext: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub text: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<AttachmentAction>,
}

/// A chat message. Used both for the `message`/`original_message` snapshots
/// inside a callback and as the body posted back to a response URL.
///
/// `text`, `replace_original` and `delete_original` are always written.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Message {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub r#type: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub subtype: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub channel: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub user: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub bot_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub username: String,
    pub text: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub ts: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub thread_ts: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub blocks: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_type: Option<ResponseType>,
    pub replace_original: bool,
    pub delete_original: bool,
}

impl Message {
    pub fn ephemeral(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            response_type: Some(ResponseType::Ephemeral),
            ..Default::default()
        }
    }

    pub fn in_channel(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            response_type: Some(ResponseType::InChannel),
            ..Default::default()
        }
    }

    /// The body that removes the message a response URL belongs to.
    pub fn delete_ephemeral() -> Self {
        Self {
            replace_original: true,
            delete_original: true,
            ..Self::ephemeral("")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn delete_body_has_canonical_shape() {
        assert_eq!(
            serde_json::to_value(Message::delete_ephemeral()).unwrap(),
            json!({
                "response_type": "ephemeral",
                "text": "",
                "replace_original": true,
                "delete_original": true
            })
        );
    }

    #[test]
    fn in_channel_response_type_is_snake_case() {
        let body = serde_json::to_value(Message::in_channel("Thanks!")).unwrap();
        assert_eq!(body["response_type"], "in_channel");
        assert_eq!(body["replace_original"], false);
    }

    #[test]
    fn attachment_actions_decode_inside_messages() {
        let message: Message = serde_json::from_value(json!({
            "type": "message",
            "text": "Would you like to play a game?",
            "ts": "1458170866.000004",
            "attachments": [{
                "callback_id": "wopr_game",
                "id": 1,
                "actions": [{"name": "chess", "text": "Chess", "type": "button", "value": "chess"}]
            }]
        }))
        .unwrap();
        assert_eq!(message.attachments[0].actions[0].value, "chess");
        assert_eq!(message.response_type, None);
    }
}
