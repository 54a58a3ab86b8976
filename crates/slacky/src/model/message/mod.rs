//! Messages and their building blocks.

use serde::{Deserialize, Serialize, Serializer};

use crate::client::SlackyClient;
use crate::endpoint::chat::{Delete, PostEphemeral, PostMessage, ScheduleMessage, Update};
use crate::error::{Error, Result};
use crate::model::ObjectId;

mod attachment;
mod block;

pub use attachment::{Attachment, AttachmentField, AttachmentTs};
pub use block::{Block, ContextElement, ImageElement, TextKind, TextObject};

/// A chat message.
///
/// Decoded from history and `chat.*` responses, and sent back as-is by
/// [`Message::send`], [`Message::update`] and [`Message::delete`]. Unset
/// fields are not sent, leaving Slack's defaults in effect.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Message {
    /// Timestamp id; set once the message exists in Slack.
    pub ts: Option<String>,
    pub channel: Option<String>,
    /// Author, or recipient of an ephemeral message.
    pub user: Option<String>,
    /// Unix time to deliver a scheduled message.
    pub post_at: Option<i64>,
    /// Message text; used as notification fallback when blocks are present.
    pub text: Option<String>,
    pub as_user: Option<bool>,
    pub attachments: Vec<Attachment>,
    pub blocks: Vec<Block>,
    pub icon_emoji: Option<String>,
    pub icon_url: Option<String>,
    pub link_names: Option<bool>,
    pub mrkdwn: Option<bool>,
    /// `none` or `full`.
    pub parse: Option<String>,
    pub reply_broadcast: Option<bool>,
    /// Parent message timestamp when posting into a thread.
    pub thread_ts: Option<String>,
    pub unfurl_links: Option<bool>,
    pub unfurl_media: Option<bool>,
    pub username: Option<String>,
    /// Slack subtype of a received message (`bot_message`, `channel_join`, ...).
    pub subtype: Option<String>,
    pub reply_count: Option<u64>,
    /// Send through `chat.postEphemeral` so only [`Message::user`] sees it.
    #[serde(skip)]
    pub ephemeral: bool,
    /// Id returned by `chat.scheduleMessage`.
    #[serde(skip)]
    pub scheduled_message_id: Option<String>,
}

impl Message {
    pub fn new() -> Self {
        Self::default()
    }

    /// A message for `channel`.
    pub fn to(channel: &(impl ObjectId + ?Sized)) -> Self {
        Self {
            channel: Some(channel.object_id().to_string()),
            ..Default::default()
        }
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn channel(mut self, channel: &(impl ObjectId + ?Sized)) -> Self {
        self.channel = Some(channel.object_id().to_string());
        self
    }

    pub fn thread(mut self, thread_ts: impl Into<String>) -> Self {
        self.thread_ts = Some(thread_ts.into());
        self
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn icon_emoji(mut self, emoji: impl Into<String>) -> Self {
        self.icon_emoji = Some(emoji.into());
        self
    }

    /// Only `user` will see the message.
    pub fn ephemeral_to(mut self, user: &(impl ObjectId + ?Sized)) -> Self {
        self.user = Some(user.object_id().to_string());
        self.ephemeral = true;
        self
    }

    /// Deliver at the given unix time.
    pub fn post_at(mut self, post_at: i64) -> Self {
        self.post_at = Some(post_at);
        self
    }

    pub fn block(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    pub fn attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    /// Text sent to Slack: the explicit text, else the first block's text.
    pub fn fallback_text(&self) -> Option<&str> {
        self.text
            .as_deref()
            .or_else(|| self.blocks.first().and_then(Block::text))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Actions
    // ─────────────────────────────────────────────────────────────────────────

    /// Post the message.
    ///
    /// Ephemeral messages go through `chat.postEphemeral`, messages with
    /// [`Message::post_at`] through `chat.scheduleMessage`, everything else
    /// through `chat.postMessage`. The returned timestamp is stored on `self`.
    pub async fn send(&mut self, client: &SlackyClient) -> Result<()> {
        if self.ephemeral {
            let ts = client.fetch(&PostEphemeral::new(self.clone())).await?;
            self.ts = Some(ts);
        } else if self.post_at.is_some() {
            let id = client.fetch(&ScheduleMessage::new(self.clone())).await?;
            self.scheduled_message_id = Some(id);
        } else {
            let posted = client.fetch(&PostMessage::new(self.clone())).await?;
            self.ts = posted.ts;
            if posted.channel.is_some() {
                self.channel = posted.channel;
            }
        }
        Ok(())
    }

    /// Replace the text, blocks and attachments of the posted message.
    pub async fn update(&self, client: &SlackyClient) -> Result<()> {
        client.send(&Update::new(self.clone())).await?;
        Ok(())
    }

    /// Delete the posted message; clears [`Message::ts`] on success.
    pub async fn delete(&mut self, client: &SlackyClient) -> Result<()> {
        let (Some(channel), Some(ts)) = (self.channel.as_deref(), self.ts.as_deref()) else {
            return Err(Error::MissingParameter {
                method: "chat.delete",
                param: if self.channel.is_none() { "channel" } else { "ts" },
            });
        };
        client.send(&Delete::new(channel, ts)).await?;
        self.ts = None;
        Ok(())
    }

    fn payload(&self) -> Payload<'_> {
        Payload {
            ts: self.ts.as_deref(),
            channel: self.channel.as_deref(),
            user: self.user.as_deref(),
            post_at: self.post_at,
            text: self.fallback_text(),
            as_user: self.as_user,
            attachments: &self.attachments,
            blocks: self.blocks.iter().filter(|b| b.is_supported()).collect(),
            icon_emoji: self.icon_emoji.as_deref(),
            icon_url: self.icon_url.as_deref(),
            link_names: self.link_names,
            mrkdwn: self.mrkdwn,
            parse: self.parse.as_deref(),
            reply_broadcast: self.reply_broadcast,
            thread_ts: self.thread_ts.as_deref(),
            unfurl_links: self.unfurl_links,
            unfurl_media: self.unfurl_media,
            username: self.username.as_deref(),
        }
    }
}

impl Serialize for Message {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.payload().serialize(serializer)
    }
}

/// Wire form of a message.
#[derive(Serialize)]
struct Payload<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    ts: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    channel: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    post_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    as_user: Option<bool>,
    #[serde(skip_serializing_if = "no_items")]
    attachments: &'a [Attachment],
    #[serde(skip_serializing_if = "Vec::is_empty")]
    blocks: Vec<&'a Block>,
    #[serde(skip_serializing_if = "Option::is_none")]
    icon_emoji: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    icon_url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    link_names: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mrkdwn: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    parse: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_broadcast: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    thread_ts: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    unfurl_links: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    unfurl_media: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    username: Option<&'a str>,
}

fn no_items<T>(items: &&[T]) -> bool {
    items.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unset_fields_are_not_sent() {
        let message = Message::to("C123").text("hello");
        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({"channel": "C123", "text": "hello"})
        );
    }

    #[test]
    fn test_text_falls_back_to_first_block() {
        let message = Message::to("C123")
            .block(Block::header("Deploy finished"))
            .block(Block::divider());
        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value["text"], "Deploy finished");
        assert_eq!(value["blocks"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_explicit_text_wins_over_blocks() {
        let message = Message::to("C123")
            .text("plain")
            .block(Block::section("rich"));
        assert_eq!(serde_json::to_value(&message).unwrap()["text"], "plain");
    }

    #[test]
    fn test_history_message_round_trips_without_unsupported_blocks() {
        let message: Message = serde_json::from_value(json!({
            "type": "message",
            "user": "U061F7AUR",
            "text": "see thread",
            "ts": "1512085950.000216",
            "reply_count": 3,
            "blocks": [
                {"type": "rich_text", "elements": []},
                {"type": "section", "text": {"type": "mrkdwn", "text": "see thread"}}
            ]
        }))
        .unwrap();

        assert_eq!(message.ts.as_deref(), Some("1512085950.000216"));
        assert_eq!(message.reply_count, Some(3));
        assert!(!message.ephemeral);

        let sent = serde_json::to_value(&message).unwrap();
        assert_eq!(sent["blocks"].as_array().unwrap().len(), 1);
        assert!(sent.get("reply_count").is_none());
    }

    #[test]
    fn test_ephemeral_builder() {
        let message = Message::to("C1").ephemeral_to("U2").text("psst");
        assert!(message.ephemeral);
        assert_eq!(message.user.as_deref(), Some("U2"));
    }
}
