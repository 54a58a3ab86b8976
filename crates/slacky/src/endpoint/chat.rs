//! `chat.*` methods.

use reqwest::Method;
use serde::Serialize;

use crate::client::SlackyClient;
use crate::endpoint::{Endpoint, require, unit};
use crate::error::{Error, Result};
use crate::model::{Message, ObjectId};
use crate::response::SlackyResponse;

/// Slack needs text, blocks or attachments to post anything.
fn require_content(method: &'static str, message: &Message) -> Result<()> {
    if message.fallback_text().is_none() && message.attachments.is_empty() {
        return Err(Error::MissingParameter {
            method,
            param: "text",
        });
    }
    Ok(())
}

fn str_result(method: &str, response: &SlackyResponse, field: &str) -> Result<String> {
    response
        .str_field(field)
        .map(str::to_string)
        .ok_or_else(|| Error::Api {
            method: method.to_string(),
            error: format!("missing_{}", field),
        })
}

/// Post a message to a conversation.
///
/// See <https://api.slack.com/methods/chat.postMessage>.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct PostMessage {
    message: Message,
}

impl PostMessage {
    pub fn new(message: Message) -> Self {
        Self { message }
    }

    pub fn message(&self) -> &Message {
        &self.message
    }
}

impl Endpoint for PostMessage {
    const METHOD: Method = Method::POST;
    const NAME: &'static str = "chat.postMessage";
    type Object = Message;

    fn object(&self, _client: &SlackyClient, response: &SlackyResponse) -> Result<Message> {
        let mut posted: Message = match response.body().get("message") {
            Some(_) => response.object("message")?,
            None => self.message.clone(),
        };
        posted.ts = response.str_field("ts").map(str::to_string).or(posted.ts);
        posted.channel = response
            .str_field("channel")
            .map(str::to_string)
            .or_else(|| self.message.channel.clone());
        Ok(posted)
    }

    fn validate(&self) -> Result<()> {
        require(Self::NAME, "channel", &self.message.channel)?;
        require_content(Self::NAME, &self.message)
    }
}

/// Post a message only one user can see. The object is the `message_ts`.
///
/// See <https://api.slack.com/methods/chat.postEphemeral>.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct PostEphemeral {
    message: Message,
}

impl PostEphemeral {
    pub fn new(message: Message) -> Self {
        Self { message }
    }
}

impl Endpoint for PostEphemeral {
    const METHOD: Method = Method::POST;
    const NAME: &'static str = "chat.postEphemeral";
    type Object = String;

    fn object(&self, _client: &SlackyClient, response: &SlackyResponse) -> Result<String> {
        str_result(Self::NAME, response, "message_ts")
    }

    fn validate(&self) -> Result<()> {
        require(Self::NAME, "channel", &self.message.channel)?;
        require(Self::NAME, "user", &self.message.user)?;
        require_content(Self::NAME, &self.message)
    }
}

/// Schedule a message for [`Message::post_at`]. The object is the
/// `scheduled_message_id`.
///
/// See <https://api.slack.com/methods/chat.scheduleMessage>.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct ScheduleMessage {
    message: Message,
}

impl ScheduleMessage {
    pub fn new(message: Message) -> Self {
        Self { message }
    }
}

impl Endpoint for ScheduleMessage {
    const METHOD: Method = Method::POST;
    const NAME: &'static str = "chat.scheduleMessage";
    type Object = String;

    fn object(&self, _client: &SlackyClient, response: &SlackyResponse) -> Result<String> {
        str_result(Self::NAME, response, "scheduled_message_id")
    }

    fn validate(&self) -> Result<()> {
        require(Self::NAME, "channel", &self.message.channel)?;
        require(Self::NAME, "post_at", &self.message.post_at)?;
        require_content(Self::NAME, &self.message)
    }
}

/// Edit a posted message.
///
/// See <https://api.slack.com/methods/chat.update>.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct Update {
    message: Message,
}

impl Update {
    pub fn new(message: Message) -> Self {
        Self { message }
    }
}

impl Endpoint for Update {
    const METHOD: Method = Method::POST;
    const NAME: &'static str = "chat.update";
    type Object = Message;

    fn object(&self, _client: &SlackyClient, response: &SlackyResponse) -> Result<Message> {
        let mut updated = self.message.clone();
        if let Some(text) = response.str_field("text") {
            updated.text = Some(text.to_string());
        }
        Ok(updated)
    }

    fn validate(&self) -> Result<()> {
        require(Self::NAME, "channel", &self.message.channel)?;
        require(Self::NAME, "ts", &self.message.ts)
    }
}

/// Delete a message.
///
/// See <https://api.slack.com/methods/chat.delete>.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Delete {
    #[serde(skip_serializing_if = "Option::is_none")]
    channel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ts: Option<String>,
}

impl Delete {
    pub fn new(channel: &(impl ObjectId + ?Sized), ts: impl Into<String>) -> Self {
        Self {
            channel: Some(channel.object_id().to_string()),
            ts: Some(ts.into()),
        }
    }
}

impl Endpoint for Delete {
    const METHOD: Method = Method::POST;
    const NAME: &'static str = "chat.delete";
    type Object = ();

    fn object(&self, client: &SlackyClient, response: &SlackyResponse) -> Result<()> {
        unit(client, response)
    }

    fn validate(&self) -> Result<()> {
        require(Self::NAME, "channel", &self.channel)?;
        require(Self::NAME, "ts", &self.ts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_post_message_body_is_the_message() {
        let post = PostMessage::new(Message::to("C1").text("hi").thread("123.456"));
        assert_eq!(
            serde_json::to_value(&post).unwrap(),
            json!({"channel": "C1", "text": "hi", "thread_ts": "123.456"})
        );
    }

    #[test]
    fn test_post_message_requires_channel_and_content() {
        let err = PostMessage::new(Message::new().text("hi")).validate().unwrap_err();
        assert!(matches!(err, Error::MissingParameter { param: "channel", .. }));

        let err = PostMessage::new(Message::to("C1")).validate().unwrap_err();
        assert!(matches!(err, Error::MissingParameter { param: "text", .. }));
    }

    #[test]
    fn test_ephemeral_requires_user() {
        let err = PostEphemeral::new(Message::to("C1").text("psst")).validate().unwrap_err();
        assert!(matches!(err, Error::MissingParameter { param: "user", .. }));
    }

    #[test]
    fn test_update_requires_ts() {
        let err = Update::new(Message::to("C1").text("edited")).validate().unwrap_err();
        assert!(matches!(err, Error::MissingParameter { param: "ts", .. }));
    }

    #[test]
    fn test_post_message_object_takes_ts_and_channel() {
        let client = SlackyClient::new("xoxb-test").unwrap();
        let post = PostMessage::new(Message::to("#general").text("hi"));
        let response = SlackyResponse::new(
            200,
            json!({
                "ok": true,
                "channel": "C123ABC456",
                "ts": "1503435956.000247",
                "message": {"text": "hi", "user": "U012AB3CD", "ts": "1503435956.000247", "type": "message"}
            }),
        );
        let posted = post.object(&client, &response).unwrap();
        assert_eq!(posted.ts.as_deref(), Some("1503435956.000247"));
        assert_eq!(posted.channel.as_deref(), Some("C123ABC456"));
        assert_eq!(posted.user.as_deref(), Some("U012AB3CD"));
    }
}
