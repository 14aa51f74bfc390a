use std::{collections::HashMap, fmt};

use serde::{
    de::{self, DeserializeOwned},
    ser::SerializeMap,
    Deserialize, Deserializer, Serialize, Serializer,
};
use serde_json::{Map, Value};

use super::{
    actions::{ActionCallbacks, BlockAction},
    message::Message,
    payloads::{Channel, Team, User},
};
use crate::error::{json_kind, DecodeError};

/// The `type` discriminator of a callback.
///
/// Unknown strings are kept as [`InteractionType::Other`] and written back
/// exactly as received. An empty or missing `type` is `Unspecified`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum InteractionType {
    #[default]
    Unspecified,
    DialogSubmission,
    DialogCancellation,
    DialogSuggestion,
    InteractiveMessage,
    MessageAction,
    BlockActions,
    BlockSuggestion,
    ViewSubmission,
    ViewClosed,
    Shortcut,
    Other(String),
}

impl InteractionType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Unspecified => "",
            Self::DialogSubmission => "dialog_submission",
            Self::DialogCancellation => "dialog_cancellation",
            Self::DialogSuggestion => "dialog_suggestion",
            Self::InteractiveMessage => "interactive_message",
            Self::MessageAction => "message_action",
            Self::BlockActions => "block_actions",
            Self::BlockSuggestion => "block_suggestion",
            Self::ViewSubmission => "view_submission",
            Self::ViewClosed => "view_closed",
            Self::Shortcut => "shortcut",
            Self::Other(s) => s,
        }
    }

    pub fn is_unspecified(&self) -> bool {
        *self == Self::Unspecified
    }
}

impl From<&str> for InteractionType {
    fn from(s: &str) -> Self {
        match s {
            "" => Self::Unspecified,
            "dialog_submission" => Self::DialogSubmission,
            "dialog_cancellation" => Self::DialogCancellation,
            "dialog_suggestion" => Self::DialogSuggestion,
            "interactive_message" => Self::InteractiveMessage,
            "message_action" => Self::MessageAction,
            "block_actions" => Self::BlockActions,
            "block_suggestion" => Self::BlockSuggestion,
            "view_submission" => Self::ViewSubmission,
            "view_closed" => Self::ViewClosed,
            "shortcut" => Self::Shortcut,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for InteractionType {
    fn from(s: String) -> Self {
        match Self::from(s.as_str()) {
            Self::Other(_) => Self::Other(s),
            known => known,
        }
    }
}

impl fmt::Display for InteractionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for InteractionType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for InteractionType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::from)
    }
}

/// Result of a legacy dialog: one string per form element, keyed by the
/// element's `name`, plus the `state` string the app attached to the dialog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DialogSubmissionCallback {
    pub submission: HashMap<String, String>,
    pub state: String,
}

/// `state.values` of a block-kit surface: block id -> action id -> element.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct BlockActionState {
    pub values: HashMap<String, HashMap<String, BlockAction>>,
}

impl BlockActionState {
    pub fn get(&self, block_id: &str, action_id: &str) -> Option<&BlockAction> {
        self.values.get(block_id)?.get(action_id)
    }
}

/// Where a block action happened.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Container {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub r#type: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub message_ts: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub channel_id: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_ephemeral: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub view_id: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct View {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub r#type: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub team_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub app_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub callback_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub private_metadata: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub hash: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub external_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub root_view_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<BlockActionState>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub blocks: Vec<Value>,
}

/// Every kind of interactive callback, flattened into one record.
///
/// Fields that the received kind does not use stay at their default value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InteractionCallback {
    pub r#type: InteractionType,
    pub token: String,
    pub callback_id: String,
    pub response_url: String,
    pub trigger_id: String,
    pub action_ts: String,
    pub api_app_id: String,
    pub team: Team,
    pub channel: Channel,
    pub user: User,
    pub container: Container,
    pub original_message: Message,
    pub message: Message,
    pub view: View,
    pub name: String,
    pub value: String,
    pub message_ts: String,
    pub attachment_id: String,
    pub action_callback: ActionCallbacks,
    pub dialog_submission_callback: DialogSubmissionCallback,
    pub block_action_state: Option<BlockActionState>,
}

impl InteractionCallback {
    /// Decode a raw payload. Empty input is the empty callback, not an error.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, DecodeError> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        let value: Value = serde_json::from_slice(bytes).map_err(DecodeError::Json)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, DecodeError> {
        match value {
            Value::Object(map) => Fields(map).decode(),
            Value::Null => Ok(Self::default()),
            other => Err(DecodeError::structural("", "an object", &other)),
        }
    }

    /// The callback kind: the `type` field when present, otherwise a guess
    /// from which variant-specific fields are populated.
    pub fn kind(&self) -> InteractionType {
        if !self.r#type.is_unspecified() {
            return self.r#type.clone();
        }
        if !self.dialog_submission_callback.submission.is_empty() {
            InteractionType::DialogSubmission
        } else if !self.action_callback.block_actions.is_empty()
            || self.block_action_state.is_some()
        {
            InteractionType::BlockActions
        } else if !self.action_callback.attachment_actions.is_empty() {
            InteractionType::InteractiveMessage
        } else if self.view != View::default() {
            InteractionType::ViewSubmission
        } else {
            InteractionType::Unspecified
        }
    }
}

/// Pulls each envelope field out of the object, falling back to the field
/// type's default whenever the key is absent or `null`.
struct Fields(Map<String, Value>);

impl Fields {
    fn take(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key).filter(|v| !v.is_null())
    }

    fn string(&mut self, key: &str) -> Result<String, DecodeError> {
        match self.take(key) {
            None => Ok(String::new()),
            Some(Value::String(s)) => Ok(s),
            Some(other) => Err(not_a_string(key, &other)),
        }
    }

    fn record<T: DeserializeOwned + Default>(&mut self, key: &str) -> Result<T, DecodeError> {
        match self.take(key) {
            None => Ok(T::default()),
            Some(v) => serde_json::from_value(v)
                .map_err(|e| DecodeError::nested(key, DecodeError::Json(e))),
        }
    }

    /// Dialog fields left blank arrive as `null` and read as `""`.
    fn submission(&mut self) -> Result<HashMap<String, String>, DecodeError> {
        match self.take("submission") {
            None => Ok(HashMap::new()),
            Some(v) => serde_json::from_value::<HashMap<String, Option<String>>>(v)
                .map(|fields| {
                    fields
                        .into_iter()
                        .map(|(name, value)| (name, value.unwrap_or_default()))
                        .collect()
                })
                .map_err(|e| DecodeError::field_type("submission", e)),
        }
    }

    fn actions(&mut self) -> Result<ActionCallbacks, DecodeError> {
        match self.take("actions") {
            None => Ok(ActionCallbacks::default()),
            Some(v) => ActionCallbacks::from_value(v).map_err(|e| DecodeError::nested("actions", e)),
        }
    }

    /// Dialogs send `state` as a string; block-kit surfaces send an object.
    fn state(&mut self) -> Result<(String, Option<BlockActionState>), DecodeError> {
        match self.take("state") {
            None => Ok((String::new(), None)),
            Some(Value::String(s)) => Ok((s, None)),
            Some(v @ Value::Object(_)) => serde_json::from_value(v)
                .map(|state| (String::new(), Some(state)))
                .map_err(|e| DecodeError::nested("state", DecodeError::Json(e))),
            Some(other) => Err(not_a_string("state", &other)),
        }
    }

    fn decode(mut self) -> Result<InteractionCallback, DecodeError> {
        let r#type = InteractionType::from(self.string("type")?);
        let (state, block_action_state) = self.state()?;

        Ok(InteractionCallback {
            r#type,
            token: self.string("token")?,
            callback_id: self.string("callback_id")?,
            response_url: self.string("response_url")?,
            trigger_id: self.string("trigger_id")?,
            action_ts: self.string("action_ts")?,
            api_app_id: self.string("api_app_id")?,
            team: self.record("team")?,
            channel: self.record("channel")?,
            user: self.record("user")?,
            container: self.record("container")?,
            original_message: self.record("original_message")?,
            message: self.record("message")?,
            view: self.record("view")?,
            name: self.string("name")?,
            value: self.string("value")?,
            message_ts: self.string("message_ts")?,
            attachment_id: self.string("attachment_id")?,
            action_callback: self.actions()?,
            dialog_submission_callback: DialogSubmissionCallback {
                submission: self.submission()?,
                state,
            },
            block_action_state,
        })
    }
}

fn not_a_string(key: &str, value: &Value) -> DecodeError {
    let source = <serde_json::Error as de::Error>::custom(format!(
        "invalid type: {}, expected a string",
        json_kind(value)
    ));
    DecodeError::field_type(key, source)
}

impl Serialize for InteractionCallback {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;

        if !self.r#type.is_unspecified() {
            map.serialize_entry("type", &self.r#type)?;
        }
        for (key, value) in [
            ("token", &self.token),
            ("callback_id", &self.callback_id),
            ("response_url", &self.response_url),
            ("trigger_id", &self.trigger_id),
            ("action_ts", &self.action_ts),
            ("api_app_id", &self.api_app_id),
        ] {
            if !value.is_empty() {
                map.serialize_entry(key, value)?;
            }
        }

        if self.team != Team::default() {
            map.serialize_entry("team", &self.team)?;
        }
        if self.channel != Channel::default() {
            map.serialize_entry("channel", &self.channel)?;
        }
        if self.user != User::default() {
            map.serialize_entry("user", &self.user)?;
        }
        if self.container != Container::default() {
            map.serialize_entry("container", &self.container)?;
        }
        if self.original_message != Message::default() {
            map.serialize_entry("original_message", &self.original_message)?;
        }
        if self.message != Message::default() {
            map.serialize_entry("message", &self.message)?;
        }
        if self.view != View::default() {
            map.serialize_entry("view", &self.view)?;
        }

        for (key, value) in [
            ("name", &self.name),
            ("value", &self.value),
            ("message_ts", &self.message_ts),
            ("attachment_id", &self.attachment_id),
        ] {
            if !value.is_empty() {
                map.serialize_entry(key, value)?;
            }
        }

        if !self.action_callback.is_empty() {
            map.serialize_entry("actions", &self.action_callback)?;
        }
        let dialog = &self.dialog_submission_callback;
        if !dialog.submission.is_empty() {
            map.serialize_entry("submission", &dialog.submission)?;
        }
        if !dialog.state.is_empty() {
            map.serialize_entry("state", &dialog.state)?;
        } else if let Some(state) = &self.block_action_state {
            map.serialize_entry("state", state)?;
        }

        map.end()
    }
}

impl<'de> Deserialize<'de> for InteractionCallback {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(value).map_err(de::Error::custom)
    }
}
