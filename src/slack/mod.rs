pub mod actions;
pub mod interaction;
pub mod message;
pub mod payloads;

use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Response,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::SlackError;
pub use actions::{Action, ActionCallbacks, AttachmentAction, BlockAction};
pub use interaction::{
    BlockActionState, Container, DialogSubmissionCallback, InteractionCallback, InteractionType,
    View,
};
pub use message::{Attachment, Message, ResponseType};
pub use payloads::{Channel, SlackInteraction, Team, User};

/// What Slack answers on a response URL.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct SlackResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub error: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub warning: String,
}

/// Posts replies to the `response_url` of an interaction.
///
/// One request per call: no retries and no timeout beyond reqwest's
/// defaults, so wrap calls yourself if you need either.
#[derive(Debug, Clone)]
pub struct SlackApp {
    client: reqwest::Client,
}

impl SlackApp {
    pub fn new(token: &str) -> Result<Self, SlackError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/json; charset=utf-8"),
        );
        let mut auth = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| SlackError::InvalidToken)?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        Ok(Self {
            client: reqwest::Client::builder()
                .default_headers(headers)
                .build()?,
        })
    }

    async fn validate_slack(&self, response: Response) -> Result<SlackResponse, SlackError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Slack rejected the request");
            return Err(SlackError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let data: SlackResponse = serde_json::from_slice(&response.bytes().await?)?;
        if !data.ok {
            warn!(error = %data.error, "Slack API error");
            return Err(SlackError::Api(data.error));
        }

        Ok(data)
    }

    /// POST `body` as JSON to `url` with the app's bearer token.
    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &T,
    ) -> Result<SlackResponse, SlackError> {
        let payload = serde_json::to_vec(body)?;
        debug!(bytes = payload.len(), "posting to Slack");

        let res = self.client.post(url).body(payload).send().await?;

        self.validate_slack(res).await
    }

    pub async fn send_response(
        &self,
        response_url: &str,
        message: &Message,
    ) -> Result<SlackResponse, SlackError> {
        self.post_json(response_url, message).await
    }

    /// Delete the ephemeral message an interaction came from. Only works for
    /// interactive ephemeral messages.
    pub async fn delete_ephemeral(&self, response_url: &str) -> Result<SlackResponse, SlackError> {
        self.send_response(response_url, &Message::delete_ephemeral())
            .await
    }
}
