//! Channels command - conversation management.

use anyhow::Result;
use clap::{Args, Subcommand};
use console::Style;

use slacky::endpoint::{channels, conversations};
use slacky::{ChannelData, User};

use super::{Context, header, success, truncate};

/// Arguments for the channels command.
#[derive(Args, Debug)]
pub struct ChannelsArgs {
    #[command(subcommand)]
    pub command: ChannelsCommand,
}

#[derive(Subcommand, Debug)]
pub enum ChannelsCommand {
    /// List channels in the workspace
    List {
        /// Page size used while walking the listing
        #[arg(short, long, default_value = "200")]
        limit: u32,

        /// Leave archived channels out
        #[arg(long)]
        exclude_archived: bool,

        /// Use the legacy channels.list method (includes member ids)
        #[arg(long)]
        legacy: bool,
    },

    /// Show a channel's attributes
    Info {
        /// Channel ID
        channel: String,
    },

    /// List a channel's members
    Members {
        /// Channel ID
        channel: String,

        /// Load each member's profile
        #[arg(long)]
        details: bool,
    },

    /// Create a channel
    Create {
        /// Channel name
        name: String,

        /// Create a private channel
        #[arg(long)]
        private: bool,
    },

    /// Rename a channel
    Rename {
        /// Channel ID
        channel: String,
        /// New name
        name: String,
    },

    /// Archive a channel
    Archive {
        /// Channel ID
        channel: String,
    },

    /// Unarchive a channel
    Unarchive {
        /// Channel ID
        channel: String,
    },

    /// Invite users to a channel
    Invite {
        /// Channel ID
        channel: String,
        /// User IDs
        #[arg(required = true)]
        users: Vec<String>,
    },

    /// Remove a user from a channel
    Kick {
        /// Channel ID
        channel: String,
        /// User ID
        user: String,
    },

    /// Set a channel's topic
    Topic {
        /// Channel ID
        channel: String,
        /// New topic
        topic: String,
    },

    /// Set a channel's purpose
    Purpose {
        /// Channel ID
        channel: String,
        /// New purpose
        purpose: String,
    },
}

/// Run the channels command.
pub async fn run(args: ChannelsArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;

    match args.command {
        ChannelsCommand::List {
            limit,
            exclude_archived,
            legacy,
        } => {
            let data: Vec<ChannelData> = if legacy {
                let request = channels::ListAll::new()
                    .limit(limit)
                    .exclude_archived(exclude_archived);
                client
                    .fetch_all(request)
                    .await?
                    .iter()
                    .filter_map(|c| c.data().cloned())
                    .collect()
            } else {
                let request = conversations::List::new()
                    .limit(limit)
                    .exclude_archived(exclude_archived)
                    .types(["public_channel", "private_channel"]);
                client
                    .fetch_all(request)
                    .await?
                    .iter()
                    .filter_map(|c| c.data().cloned())
                    .collect()
            };
            print_channels(&data, ctx)?;
        }
        ChannelsCommand::Info { channel } => {
            let channel = client.channel(channel);
            let data = channel.info().await?;
            if ctx.json_output {
                ctx.print_json(data)?;
            } else {
                print_channel(data);
            }
        }
        ChannelsCommand::Members { channel, details } => {
            let members = client.channel(channel).members().await?;
            print_members(&members, details, ctx).await?;
        }
        ChannelsCommand::Create { name, private } => {
            let channel = client
                .fetch(&conversations::Create::new().name(name).is_private(private))
                .await?;
            report(ctx, channel.data(), || {
                format!("Created #{} ({})", channel_name(channel.data()), channel.id())
            })?;
        }
        ChannelsCommand::Rename { channel, name } => {
            let channel = client
                .fetch(&conversations::Rename::new().channel(&channel).name(name))
                .await?;
            report(ctx, channel.data(), || {
                format!("Renamed {} to #{}", channel.id(), channel_name(channel.data()))
            })?;
        }
        ChannelsCommand::Archive { channel } => {
            client
                .send(&conversations::Archive::new().channel(&channel))
                .await?;
            report(ctx, None::<&()>, || format!("Archived {}", channel))?;
        }
        ChannelsCommand::Unarchive { channel } => {
            client
                .send(&conversations::Unarchive::new().channel(&channel))
                .await?;
            report(ctx, None::<&()>, || format!("Unarchived {}", channel))?;
        }
        ChannelsCommand::Invite { channel, users } => {
            let invite = conversations::Invite::new().channel(&channel).users(&users);
            let updated = client.fetch(&invite).await?;
            report(ctx, updated.data(), || {
                format!("Invited {} to {}", invite.users.join(", "), channel)
            })?;
        }
        ChannelsCommand::Kick { channel, user } => {
            client
                .send(&conversations::Kick::new().channel(&channel).user(&user))
                .await?;
            report(ctx, None::<&()>, || format!("Removed {} from {}", user, channel))?;
        }
        ChannelsCommand::Topic { channel, topic } => {
            let topic = client
                .fetch(&conversations::SetTopic::new().channel(&channel).topic(topic))
                .await?;
            report(ctx, Some(&topic), || format!("Topic of {} is now: {}", channel, topic))?;
        }
        ChannelsCommand::Purpose { channel, purpose } => {
            let purpose = client
                .fetch(&conversations::SetPurpose::new().channel(&channel).purpose(purpose))
                .await?;
            report(ctx, Some(&purpose), || {
                format!("Purpose of {} is now: {}", channel, purpose)
            })?;
        }
    }

    Ok(())
}

/// Print `value` as JSON, or `message` as a success line.
fn report<T: serde::Serialize>(
    ctx: &Context,
    value: Option<&T>,
    message: impl FnOnce() -> String,
) -> Result<()> {
    match (ctx.json_output, value) {
        (true, Some(value)) => ctx.print_json(value),
        (true, None) => ctx.print_json(&serde_json::json!({"ok": true})),
        (false, _) => {
            success(message());
            Ok(())
        }
    }
}

fn channel_name(data: Option<&ChannelData>) -> &str {
    data.map(|d| d.name.as_str()).unwrap_or("?")
}

fn print_channels(channels: &[ChannelData], ctx: &Context) -> Result<()> {
    if ctx.json_output {
        return ctx.print_json(channels);
    }

    let dim = Style::new().dim();
    header("Channels");
    if channels.is_empty() {
        println!("{}", dim.apply_to("No channels found"));
        return Ok(());
    }
    for channel in channels {
        let mut flags = Vec::new();
        if channel.is_private {
            flags.push("private");
        }
        if channel.is_archived {
            flags.push("archived");
        }
        println!(
            "{} #{:<24} {}",
            dim.apply_to(&channel.id),
            channel.name,
            truncate(&channel.purpose.value, 50)
        );
        if ctx.verbose && !flags.is_empty() {
            println!("    {}", dim.apply_to(flags.join(", ")));
        }
    }
    println!();
    println!("{}", dim.apply_to(format!("{} channels", channels.len())));
    Ok(())
}

fn print_channel(channel: &ChannelData) {
    let dim = Style::new().dim();
    header(&format!("#{}", channel.name));
    println!("{:<12} {}", dim.apply_to("ID"), channel.id);
    println!("{:<12} {}", dim.apply_to("Creator"), channel.creator);
    println!("{:<12} {}", dim.apply_to("Private"), channel.is_private);
    println!("{:<12} {}", dim.apply_to("Archived"), channel.is_archived);
    if let Some(count) = channel.num_members {
        println!("{:<12} {}", dim.apply_to("Members"), count);
    }
    println!("{:<12} {}", dim.apply_to("Topic"), channel.topic.value);
    println!("{:<12} {}", dim.apply_to("Purpose"), channel.purpose.value);
    if !channel.previous_names.is_empty() {
        println!(
            "{:<12} {}",
            dim.apply_to("Formerly"),
            channel.previous_names.join(", ")
        );
    }
}

async fn print_members(members: &[User], details: bool, ctx: &Context) -> Result<()> {
    if ctx.json_output && !details {
        let ids: Vec<&str> = members.iter().map(User::id).collect();
        return ctx.print_json(&ids);
    }

    let mut loaded = Vec::new();
    if details {
        for member in members {
            loaded.push(member.info().await?.clone());
        }
        if ctx.json_output {
            return ctx.print_json(&loaded);
        }
    }

    let dim = Style::new().dim();
    header("Members");
    if details {
        for user in &loaded {
            println!("{} {:<20} {}", dim.apply_to(&user.id), user.name, user.real_name);
        }
    } else {
        for member in members {
            println!("{}", member.id());
        }
    }
    println!();
    println!("{}", dim.apply_to(format!("{} members", members.len())));
    Ok(())
}
