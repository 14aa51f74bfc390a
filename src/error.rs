use thiserror::Error;

/// Why an inbound interaction payload could not be decoded.
///
/// Decoding is all-or-nothing: whenever one of these is returned, no part of
/// the payload is handed back to the caller.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// serde_json rejected the input: either the payload bytes are not JSON,
    /// or an embedded record did not match its own shape.
    #[error("{0}")]
    Json(#[source] serde_json::Error),

    /// A value has the wrong JSON shape, e.g. `actions` is an object.
    /// `field` is empty when the value being decoded is itself the culprit.
    #[error("expected {expected}, found {found}")]
    Structural {
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    /// A leaf value could not be converted to its field's type.
    #[error("field `{field}` has the wrong type: {source}")]
    FieldType {
        field: String,
        #[source]
        source: serde_json::Error,
    },

    /// A sub-decoder failed; `field` names where it was invoked from.
    #[error("failed to decode `{field}`: {source}")]
    Nested {
        field: String,
        #[source]
        source: Box<DecodeError>,
    },
}

impl DecodeError {
    pub(crate) fn structural(
        field: impl Into<String>,
        expected: &'static str,
        found: &serde_json::Value,
    ) -> Self {
        Self::Structural {
            field: field.into(),
            expected,
            found: json_kind(found),
        }
    }

    pub(crate) fn field_type(field: impl Into<String>, source: serde_json::Error) -> Self {
        Self::FieldType {
            field: field.into(),
            source,
        }
    }

    pub(crate) fn nested(field: impl Into<String>, source: DecodeError) -> Self {
        Self::Nested {
            field: field.into(),
            source: Box::new(source),
        }
    }

    /// The JSON path of the innermost field that failed.
    pub fn path(&self) -> String {
        match self {
            Self::Json(_) => String::new(),
            Self::Structural { field, .. } | Self::FieldType { field, .. } => field.clone(),
            Self::Nested { field, source } => {
                let inner = source.path();
                if inner.is_empty() {
                    field.clone()
                } else if inner.starts_with('[') {
                    format!("{field}{inner}")
                } else {
                    format!("{field}.{inner}")
                }
            }
        }
    }

    /// Strip `Nested` wrappers and return the failure that started it all.
    pub fn root_cause(&self) -> &DecodeError {
        match self {
            Self::Nested { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// Errors from the outbound response-url path.
#[derive(Debug, Error)]
pub enum SlackError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Slack replied with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("JSON error: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Slack API error: {0}")]
    Api(String),

    #[error("token cannot be used in an Authorization header")]
    InvalidToken,

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl SlackError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("PORT must be a port number, got {0:?}")]
    InvalidPort(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn path_joins_nested_fields() {
        let leaf = DecodeError::structural("[1]", "an object", &json!(3));
        let err = DecodeError::nested("actions", leaf);
        assert_eq!(err.path(), "actions[1]");

        let leaf = DecodeError::field_type(
            "id",
            serde_json::from_value::<String>(json!(1)).unwrap_err(),
        );
        let err = DecodeError::nested("team", leaf);
        assert_eq!(err.path(), "team.id");
        assert!(matches!(err.root_cause(), DecodeError::FieldType { .. }));
    }

    #[test]
    fn structural_message_names_both_shapes() {
        let err = DecodeError::structural("", "an array", &json!({}));
        assert_eq!(
            err.to_string(),
            "expected an array, found an object"
        );
    }
}
