//! Typed client for the Slack Web API.
//!
//! Every Slack method is a type in [`endpoint`] that knows its name, HTTP
//! verb and parameters. [`SlackyClient`] sends endpoints and decodes their
//! results into the [`model`] types, which load their remaining attributes
//! from Slack the first time they are read.
//!
//! # Example
//!
//! ```no_run
//! use slacky::{Message, Result, SlackyClient};
//! use slacky::endpoint::conversations;
//!
//! # async fn example() -> Result<()> {
//! let client = SlackyClient::new("xoxb-secret")?;
//!
//! // Create a channel and invite someone
//! let channel = client
//!     .fetch(&conversations::Create::new().name("release-planning"))
//!     .await?;
//! client
//!     .fetch(&conversations::Invite::new().channel(&channel).users(["U012AB3CD"]))
//!     .await?;
//!
//! // Post into it
//! let mut message = Message::to(&channel).text("Kick-off at 10:00");
//! message.send(&client).await?;
//!
//! // Walk every member; each one loads its profile on first read
//! for member in channel.members().await? {
//!     println!("{}", member.real_name().await?);
//! }
//!
//! // Lazily loaded model
//! let general = client.channel("C0123456789");
//! println!("#{} has {} members", general.name().await?, general.num_members().await?);
//! # Ok(())
//! # }
//! ```
//!
//! # Coverage
//!
//! - **chat**: post, post ephemeral, schedule, update, delete
//! - **conversations**: lifecycle, info, history, members, invite/kick,
//!   join/leave, direct messages, topic and purpose
//! - **channels**: legacy list and info
//! - **users**: info and list

pub mod client;
pub mod endpoint;
pub mod error;
pub mod factory;
pub mod model;
pub mod pagination;
pub mod response;

pub use client::{ClientBuilder, DEFAULT_BASE_URL, SlackyClient};
pub use endpoint::Endpoint;
pub use error::{Error, Result};
pub use factory::EndpointDescriptor;
pub use model::{
    Attachment, Block, Channel, ChannelData, ContextElement, Im, ImData, ImageElement, Message,
    ObjectId, PublicChannel, TextObject, User, UserData, load_data,
};
pub use pagination::{Page, Pager, Paginated};
pub use response::SlackyResponse;

pub use reqwest::Method;
pub use slacky_config;
