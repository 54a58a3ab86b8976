//! History command - recent messages of a channel.

use anyhow::Result;
use clap::Args;
use console::Style;
use futures::{StreamExt, TryStreamExt};

use slacky::Message;
use slacky::endpoint::conversations::History;

use super::{Context, header, truncate};

/// Arguments for the history command.
#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// Channel ID
    pub channel: String,

    /// Maximum messages to show
    #[arg(short, long, default_value = "20")]
    pub limit: usize,

    /// Only messages after this timestamp
    #[arg(long)]
    pub oldest: Option<String>,
}

/// Run the history command.
pub async fn run(args: HistoryArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;

    let page_size = args.limit.clamp(1, 200) as u32;
    let mut request = History::new().channel(&args.channel).limit(page_size);
    if let Some(oldest) = &args.oldest {
        request = request.oldest(oldest);
    }

    let messages: Vec<Message> = client
        .paginate(request)
        .into_stream()
        .take(args.limit)
        .try_collect()
        .await?;

    if ctx.json_output {
        return ctx.print_json(&messages);
    }

    let dim = Style::new().dim();
    header(&format!("History of {}", args.channel));
    if messages.is_empty() {
        println!("{}", dim.apply_to("No messages"));
        return Ok(());
    }
    // Slack returns newest first; print oldest first.
    for message in messages.iter().rev() {
        let author = message
            .user
            .as_deref()
            .or(message.username.as_deref())
            .unwrap_or("?");
        let replies = match message.reply_count {
            Some(n) if n > 0 => format!(" [{} replies]", n),
            _ => String::new(),
        };
        println!(
            "{} {:<12} {}{}",
            dim.apply_to(message.ts.as_deref().unwrap_or("")),
            author,
            truncate(message.fallback_text().unwrap_or(""), 80),
            dim.apply_to(replies)
        );
    }
    Ok(())
}
