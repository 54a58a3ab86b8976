//! Users command - workspace user lookup.

use anyhow::Result;
use clap::{Args, Subcommand};
use console::Style;

use slacky::UserData;
use slacky::endpoint::users;

use super::{Context, header};

/// Arguments for the users command.
#[derive(Args, Debug)]
pub struct UsersArgs {
    #[command(subcommand)]
    pub command: UsersCommand,
}

#[derive(Subcommand, Debug)]
pub enum UsersCommand {
    /// List users of the workspace
    List {
        /// Page size used while walking the listing
        #[arg(short, long, default_value = "200")]
        limit: u32,

        /// Include deactivated accounts
        #[arg(long)]
        deleted: bool,
    },

    /// Show a user's profile
    Info {
        /// User ID
        user: String,
    },
}

/// Run the users command.
pub async fn run(args: UsersArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let dim = Style::new().dim();

    match args.command {
        UsersCommand::List { limit, deleted } => {
            let users: Vec<UserData> = client
                .fetch_all(users::List::new().limit(limit))
                .await?
                .iter()
                .filter_map(|u| u.data().cloned())
                .filter(|u| deleted || !u.deleted)
                .collect();

            if ctx.json_output {
                return ctx.print_json(&users);
            }

            header("Users");
            for user in &users {
                let kind = if user.is_bot { " (bot)" } else { "" };
                println!(
                    "{} {:<20} {}{}",
                    dim.apply_to(&user.id),
                    user.name,
                    user.real_name,
                    dim.apply_to(kind)
                );
            }
            println!();
            println!("{}", dim.apply_to(format!("{} users", users.len())));
        }
        UsersCommand::Info { user } => {
            let user = client.user(user);
            let data = user.info().await?;
            if ctx.json_output {
                return ctx.print_json(data);
            }

            header(&data.real_name);
            println!("{:<12} {}", dim.apply_to("ID"), data.id);
            println!("{:<12} {}", dim.apply_to("Handle"), data.name);
            println!("{:<12} {}", dim.apply_to("Display"), data.profile.display_name);
            if let Some(email) = &data.profile.email {
                println!("{:<12} {}", dim.apply_to("Email"), email);
            }
            if let Some(tz) = &data.tz {
                println!("{:<12} {}", dim.apply_to("Time zone"), tz);
            }
            if !data.profile.status_text.is_empty() {
                println!(
                    "{:<12} {} {}",
                    dim.apply_to("Status"),
                    data.profile.status_emoji,
                    data.profile.status_text
                );
            }
            if data.deleted {
                println!("{}", Style::new().yellow().apply_to("Deactivated"));
            }
        }
    }

    Ok(())
}
