//! Decoding for Slack interactive callbacks (dialog submissions, block
//! actions, legacy message buttons) and the response-URL replies that go
//! with them.
//!
//! ```
//! use slack_interactions::{InteractionCallback, InteractionType};
//!
//! let callback = InteractionCallback::from_slice(
//!     br#"{"type":"dialog_submission","submission":{"meal":"burrito"}}"#,
//! )?;
//! assert_eq!(callback.r#type, InteractionType::DialogSubmission);
//! assert_eq!(callback.dialog_submission_callback.submission["meal"], "burrito");
//! # Ok::<(), slack_interactions::DecodeError>(())
//! ```

pub mod config;
pub mod error;
pub mod router;
pub mod slack;
pub mod telemetry;

pub use error::{ConfigError, DecodeError, SlackError};
pub use slack::{
    ActionCallbacks, AttachmentAction, BlockAction, InteractionCallback, InteractionType, Message,
    SlackApp, SlackResponse,
};
