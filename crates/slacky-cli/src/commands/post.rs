//! Post command - send a message.

use anyhow::Result;
use clap::Args;

use slacky::Message;

use super::{Context, success};

/// Arguments for the post command.
#[derive(Args, Debug)]
pub struct PostArgs {
    /// Channel ID (or #name)
    pub channel: String,

    /// Message text (mrkdwn)
    pub text: String,

    /// Reply in the thread of this message timestamp
    #[arg(long)]
    pub thread: Option<String>,

    /// Only this user will see the message
    #[arg(long)]
    pub ephemeral_user: Option<String>,

    /// Schedule for this unix time instead of posting now
    #[arg(long, conflicts_with = "ephemeral_user")]
    pub at: Option<i64>,

    /// Override the bot's display name
    #[arg(long)]
    pub username: Option<String>,

    /// Override the bot's icon with an emoji (e.g. :rocket:)
    #[arg(long)]
    pub icon_emoji: Option<String>,
}

impl PostArgs {
    fn message(&self) -> Message {
        let mut message = Message::to(&self.channel).text(&self.text);
        if let Some(thread) = &self.thread {
            message = message.thread(thread);
        }
        if let Some(user) = &self.ephemeral_user {
            message = message.ephemeral_to(user);
        }
        if let Some(at) = self.at {
            message = message.post_at(at);
        }
        if let Some(username) = &self.username {
            message = message.username(username);
        }
        if let Some(emoji) = &self.icon_emoji {
            message = message.icon_emoji(emoji);
        }
        message
    }
}

/// Run the post command.
pub async fn run(args: PostArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let mut message = args.message();
    message.send(&client).await?;

    if ctx.json_output {
        return ctx.print_json(&serde_json::json!({
            "channel": message.channel,
            "ts": message.ts,
            "scheduled_message_id": message.scheduled_message_id,
        }));
    }

    match (&message.scheduled_message_id, &message.ts) {
        (Some(id), _) => success(format!("Scheduled ({})", id)),
        (None, Some(ts)) => success(format!(
            "Posted to {} at {}",
            message.channel.as_deref().unwrap_or(&args.channel),
            ts
        )),
        (None, None) => success("Posted"),
    }
    Ok(())
}
