use serde::{de, ser::SerializeSeq, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::DecodeError;

/// Keys that only block-kit elements carry.
const BLOCK_KEYS: [&str; 2] = ["action_id", "block_id"];

fn is_zero(n: &u32) -> bool {
    *n == 0
}

/// Unset block values arrive as `null` rather than being left out.
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct TextObject {
    pub r#type: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verbatim: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ConfirmationField {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub text: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub ok_text: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub dismiss_text: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AttachmentActionOption {
    pub text: String,
    pub value: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AttachmentActionOptionGroup {
    pub text: String,
    pub options: Vec<AttachmentActionOption>,
}

/// A legacy message button or menu, as found in `attachments[].actions` and
/// in `interactive_message` callbacks.
///
/// `name`, `text` and `type` are always written; everything else is left out
/// while empty.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AttachmentAction {
    pub name: String,
    pub text: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub style: String,
    pub r#type: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub value: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub data_source: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub min_query_length: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<AttachmentActionOption>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub selected_options: Vec<AttachmentActionOption>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub option_groups: Vec<AttachmentActionOptionGroup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirm: Option<ConfirmationField>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct OptionObject {
    pub text: TextObject,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<TextObject>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub url: String,
}

/// An interactive block-kit element. Identified on the wire by `action_id`
/// or `block_id`.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct BlockAction {
    pub action_id: String,
    pub block_id: String,
    pub r#type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<TextObject>,
    #[serde(deserialize_with = "null_as_empty")]
    pub value: String,
    pub action_ts: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_option: Option<OptionObject>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub selected_options: Vec<OptionObject>,
    #[serde(
        skip_serializing_if = "String::is_empty",
        deserialize_with = "null_as_empty"
    )]
    pub selected_user: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub selected_users: Vec<String>,
    #[serde(
        skip_serializing_if = "String::is_empty",
        deserialize_with = "null_as_empty"
    )]
    pub selected_channel: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub selected_channels: Vec<String>,
    #[serde(
        skip_serializing_if = "String::is_empty",
        deserialize_with = "null_as_empty"
    )]
    pub selected_conversation: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub selected_conversations: Vec<String>,
    #[serde(
        skip_serializing_if = "String::is_empty",
        deserialize_with = "null_as_empty"
    )]
    pub selected_date: String,
    #[serde(
        skip_serializing_if = "String::is_empty",
        deserialize_with = "null_as_empty"
    )]
    pub selected_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_option: Option<OptionObject>,
    #[serde(
        skip_serializing_if = "String::is_empty",
        deserialize_with = "null_as_empty"
    )]
    pub initial_user: String,
    #[serde(
        skip_serializing_if = "String::is_empty",
        deserialize_with = "null_as_empty"
    )]
    pub initial_channel: String,
    #[serde(
        skip_serializing_if = "String::is_empty",
        deserialize_with = "null_as_empty"
    )]
    pub initial_conversation: String,
    #[serde(
        skip_serializing_if = "String::is_empty",
        deserialize_with = "null_as_empty"
    )]
    pub initial_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<TextObject>,
}

/// One element of an `actions` array after classification.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Attachment(AttachmentAction),
    Block(BlockAction),
}

impl Action {
    /// Classify a single array element by its keys and decode it.
    ///
    /// Errors are relative to the element itself; the caller adds the index.
    pub fn from_value(value: Value) -> Result<Self, DecodeError> {
        let is_block = match &value {
            Value::Object(map) => BLOCK_KEYS.iter().any(|key| map.contains_key(*key)),
            other => return Err(DecodeError::structural("", "an object", other)),
        };

        if is_block {
            serde_json::from_value(value)
                .map(Action::Block)
                .map_err(DecodeError::Json)
        } else {
            serde_json::from_value(value)
                .map(Action::Attachment)
                .map_err(DecodeError::Json)
        }
    }
}

impl From<AttachmentAction> for Action {
    fn from(action: AttachmentAction) -> Self {
        Action::Attachment(action)
    }
}

impl From<BlockAction> for Action {
    fn from(action: BlockAction) -> Self {
        Action::Block(action)
    }
}

/// The `actions` array of a callback, split by element kind.
///
/// Relative order is kept inside each list. Order *across* the two lists is
/// not: encoding writes every attachment action before every block action.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionCallbacks {
    pub attachment_actions: Vec<AttachmentAction>,
    pub block_actions: Vec<BlockAction>,
}

impl ActionCallbacks {
    /// Decode an `actions` value. `null` gives two empty lists; anything
    /// other than an array or `null` is a structural error.
    pub fn from_value(value: Value) -> Result<Self, DecodeError> {
        let elements = match value {
            Value::Null => return Ok(Self::default()),
            Value::Array(elements) => elements,
            other => return Err(DecodeError::structural("", "an array", &other)),
        };

        elements
            .into_iter()
            .enumerate()
            .map(|(index, element)| {
                Action::from_value(element)
                    .map_err(|e| DecodeError::nested(format!("[{index}]"), e))
            })
            .collect()
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, DecodeError> {
        let value: Value = serde_json::from_slice(bytes).map_err(DecodeError::Json)?;
        Self::from_value(value)
    }

    pub fn push(&mut self, action: impl Into<Action>) {
        match action.into() {
            Action::Attachment(action) => self.attachment_actions.push(action),
            Action::Block(action) => self.block_actions.push(action),
        }
    }

    pub fn len(&self) -> usize {
        self.attachment_actions.len() + self.block_actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FromIterator<Action> for ActionCallbacks {
    fn from_iter<I: IntoIterator<Item = Action>>(iter: I) -> Self {
        let mut callbacks = Self::default();
        callbacks.extend(iter);
        callbacks
    }
}

impl Extend<Action> for ActionCallbacks {
    fn extend<I: IntoIterator<Item = Action>>(&mut self, iter: I) {
        iter.into_iter().for_each(|action| self.push(action));
    }
}

impl Serialize for ActionCallbacks {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for action in &self.attachment_actions {
            seq.serialize_element(action)?;
        }
        for action in &self.block_actions {
            seq.serialize_element(action)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for ActionCallbacks {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(value).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn block_id_alone_makes_a_block_action() {
        let ac = ActionCallbacks::from_slice(br#"[{"block_id":"1"}]"#).unwrap();
        assert_eq!(ac.block_actions.len(), 1);
        assert_eq!(ac.attachment_actions.len(), 0);
        assert_eq!(ac.block_actions[0].block_id, "1");
    }

    #[test]
    fn attachment_action_encodes_required_fields_only() {
        let ac = ActionCallbacks {
            attachment_actions: vec![AttachmentAction {
                text: "text".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };

        let bytes = serde_json::to_string(&ac).unwrap();
        assert_eq!(bytes, r#"[{"name":"","text":"text","type":""}]"#);

        let decoded: ActionCallbacks = serde_json::from_str(&bytes).unwrap();
        assert_eq!(decoded.attachment_actions.len(), 1);
        assert_eq!(decoded.attachment_actions[0].text, "text");
        assert_eq!(decoded, ac);
    }

    #[test]
    fn mixed_array_is_partitioned_in_order() {
        let input = json!([
            {"name": "approve", "type": "button", "value": "yes"},
            {"action_id": "a1", "type": "button", "value": "1"},
            {"name": "deny", "type": "button", "value": "no"},
            {"block_id": "b2", "action_id": "a2", "type": "static_select"},
            {"action_id": "a3"}
        ]);

        let ac = ActionCallbacks::from_value(input).unwrap();
        assert_eq!(ac.len(), 5);

        let names: Vec<_> = ac.attachment_actions.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["approve", "deny"]);
        let ids: Vec<_> = ac.block_actions.iter().map(|a| a.action_id.as_str()).collect();
        assert_eq!(ids, ["a1", "a2", "a3"]);
    }

    #[test]
    fn null_gives_empty_lists() {
        let ac = ActionCallbacks::from_value(Value::Null).unwrap();
        assert!(ac.is_empty());

        let ac: ActionCallbacks = serde_json::from_str("[]").unwrap();
        assert!(ac.is_empty());
    }

    #[test]
    fn non_array_is_structural_error() {
        for value in [json!({"name": "x"}), json!("x"), json!(3), json!(true)] {
            let err = ActionCallbacks::from_value(value).unwrap_err();
            assert!(matches!(
                err,
                DecodeError::Structural {
                    expected: "an array",
                    ..
                }
            ));
        }
    }

    #[test]
    fn bad_element_reports_its_index() {
        let err = ActionCallbacks::from_value(json!([{"name": "ok"}, "oops"])).unwrap_err();
        assert_eq!(err.path(), "[1]");
        assert!(matches!(err.root_cause(), DecodeError::Structural { .. }));

        let err = ActionCallbacks::from_value(json!([
            {"action_id": "a"},
            {"action_id": "b"},
            {"action_id": 7}
        ]))
        .unwrap_err();
        assert_eq!(err.path(), "[2]");
        assert!(matches!(err.root_cause(), DecodeError::Json(_)));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let ac = ActionCallbacks::from_value(json!([
            {"name": "go", "type": "button", "brand_new_field": {"x": 1}},
            {"action_id": "a", "also_new": [1, 2, 3]}
        ]))
        .unwrap();
        assert_eq!(ac.attachment_actions[0].name, "go");
        assert_eq!(ac.block_actions[0].action_id, "a");
    }

    #[test]
    fn populated_value_survives_encode_and_decode() {
        let mut ac = ActionCallbacks::default();
        ac.push(AttachmentAction {
            name: "games_list".to_string(),
            text: "Pick a game...".to_string(),
            r#type: "select".to_string(),
            selected_options: vec![AttachmentActionOption {
                text: "Chess".to_string(),
                value: "chess".to_string(),
                ..Default::default()
            }],
            confirm: Some(ConfirmationField {
                title: "Sure?".to_string(),
                ok_text: "Yes".to_string(),
                ..Default::default()
            }),
            ..Default::default()
        });
        ac.push(BlockAction {
            action_id: "pick".to_string(),
            block_id: "menu".to_string(),
            r#type: "static_select".to_string(),
            action_ts: "1548426417.840180".to_string(),
            selected_option: Some(OptionObject {
                text: TextObject {
                    r#type: "plain_text".to_string(),
                    text: "Blue".to_string(),
                    emoji: Some(true),
                    ..Default::default()
                },
                value: "blue".to_string(),
                ..Default::default()
            }),
            ..Default::default()
        });
        ac.push(AttachmentAction {
            name: "second".to_string(),
            ..Default::default()
        });

        let encoded = serde_json::to_vec(&ac).unwrap();
        let decoded = ActionCallbacks::from_slice(&encoded).unwrap();
        assert_eq!(decoded, ac);
        assert_eq!(decoded.attachment_actions[1].name, "second");
    }

    #[test]
    fn null_block_values_read_as_empty() {
        let ac = ActionCallbacks::from_value(json!([
            {"action_id": "when", "type": "datepicker", "selected_date": null, "value": null}
        ]))
        .unwrap();
        assert_eq!(ac.block_actions[0].selected_date, "");
        assert_eq!(ac.block_actions[0].value, "");
    }

    #[test]
    fn attachment_actions_encode_before_block_actions() {
        let mut ac = ActionCallbacks::default();
        ac.push(BlockAction {
            action_id: "b".to_string(),
            ..Default::default()
        });
        ac.push(AttachmentAction {
            name: "a".to_string(),
            ..Default::default()
        });

        assert_eq!(
            serde_json::to_string(&ac).unwrap(),
            r#"[{"name":"a","text":"","type":""},{"action_id":"b","block_id":"","type":"","value":"","action_ts":""}]"#
        );
    }

    #[test]
    fn collect_partitions_actions() {
        let ac: ActionCallbacks = vec![
            Action::from(BlockAction::default()),
            Action::from(AttachmentAction::default()),
        ]
        .into_iter()
        .collect();
        assert_eq!(ac.block_actions.len(), 1);
        assert_eq!(ac.attachment_actions.len(), 1);
    }
}
