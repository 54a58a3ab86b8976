//! Conversation models: channels and legacy public channels.

use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::client::SlackyClient;
use crate::endpoint::{channels, conversations};
use crate::error::Result;
use crate::model::{Lazy, ObjectId, User};

/// Response key holding a conversation object.
pub(crate) const OBJECT_NAME: &str = "channel";

/// Topic or purpose of a channel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChannelValue {
    #[serde(default)]
    pub value: String,
    /// User who last changed it.
    #[serde(default)]
    pub creator: String,
    /// Unix time of the last change.
    #[serde(default)]
    pub last_set: i64,
}

/// Attributes of a conversation as returned by `conversations.info`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChannelData {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub name_normalized: String,
    /// Unix time of creation.
    #[serde(default)]
    pub created: i64,
    /// Id of the creating user.
    #[serde(default)]
    pub creator: String,
    #[serde(default)]
    pub is_channel: bool,
    #[serde(default)]
    pub is_group: bool,
    #[serde(default)]
    pub is_im: bool,
    #[serde(default)]
    pub is_private: bool,
    #[serde(default)]
    pub is_archived: bool,
    #[serde(default)]
    pub is_general: bool,
    #[serde(default)]
    pub is_member: bool,
    /// Only present when requested with `include_num_members`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_members: Option<u64>,
    #[serde(default)]
    pub topic: ChannelValue,
    #[serde(default)]
    pub purpose: ChannelValue,
    #[serde(default)]
    pub previous_names: Vec<String>,
    /// Member ids; only the legacy `channels.*` methods embed them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<String>>,
}

/// Method a channel loads its attributes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InfoSource {
    Conversations,
    Channels,
}

/// A Slack conversation, loaded through `conversations.info` on first read.
#[derive(Debug)]
pub struct Channel {
    id: String,
    data: Lazy<ChannelData>,
    source: InfoSource,
}

impl Channel {
    /// A channel known only by id and not bound to a client.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            data: Lazy::unloaded(None),
            source: InfoSource::Conversations,
        }
    }

    pub(crate) fn unloaded(client: SlackyClient, id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            data: Lazy::unloaded(Some(client)),
            source: InfoSource::Conversations,
        }
    }

    /// A channel populated from response data.
    pub fn from_data(client: Option<SlackyClient>, data: ChannelData) -> Self {
        Self {
            id: data.id.clone(),
            data: Lazy::loaded(client, data),
            source: InfoSource::Conversations,
        }
    }

    /// Attach a client used for lazy loading.
    pub fn with_client(mut self, client: SlackyClient) -> Self {
        self.data.attach(client);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_loaded(&self) -> bool {
        self.data.is_loaded()
    }

    /// Loaded data, without triggering a fetch.
    pub fn data(&self) -> Option<&ChannelData> {
        self.data.get()
    }

    /// Mutable access to loaded data.
    pub fn data_mut(&mut self) -> Option<&mut ChannelData> {
        self.data.get_mut()
    }

    pub fn set_data(&mut self, data: ChannelData) {
        self.id = data.id.clone();
        self.data.set(data);
    }

    /// All attributes, loading them if needed.
    pub async fn info(&self) -> Result<&ChannelData> {
        let id = self.id.as_str();
        match self.source {
            InfoSource::Conversations => {
                self.data
                    .get_or_fetch(OBJECT_NAME, id, || {
                        conversations::Info::new().channel(id).include_num_members(true)
                    })
                    .await
            }
            InfoSource::Channels => {
                self.data
                    .get_or_fetch(OBJECT_NAME, id, || channels::Info::new().channel(id))
                    .await
            }
        }
    }

    /// Drop cached attributes and load them again.
    pub async fn refresh_info(&mut self) -> Result<&mut Self> {
        self.data.reset();
        self.info().await?;
        Ok(self)
    }

    pub async fn name(&self) -> Result<&str> {
        Ok(&self.info().await?.name)
    }

    pub async fn created(&self) -> Result<i64> {
        Ok(self.info().await?.created)
    }

    pub async fn creator(&self) -> Result<&str> {
        Ok(&self.info().await?.creator)
    }

    pub async fn is_private(&self) -> Result<bool> {
        Ok(self.info().await?.is_private)
    }

    pub async fn is_archived(&self) -> Result<bool> {
        Ok(self.info().await?.is_archived)
    }

    pub async fn is_general(&self) -> Result<bool> {
        Ok(self.info().await?.is_general)
    }

    pub async fn is_member(&self) -> Result<bool> {
        Ok(self.info().await?.is_member)
    }

    /// Member count; zero if Slack did not report one.
    pub async fn num_members(&self) -> Result<u64> {
        Ok(self.info().await?.num_members.unwrap_or_default())
    }

    pub async fn topic(&self) -> Result<&ChannelValue> {
        Ok(&self.info().await?.topic)
    }

    pub async fn purpose(&self) -> Result<&ChannelValue> {
        Ok(&self.info().await?.purpose)
    }

    pub async fn previous_names(&self) -> Result<&[String]> {
        Ok(&self.info().await?.previous_names)
    }

    /// Every member of the conversation, walking all `conversations.members`
    /// pages. Returned users load their own attributes on first read.
    pub async fn members(&self) -> Result<Vec<User>> {
        let client = self.require_client()?;
        client
            .fetch_all(conversations::Members::new().channel(self))
            .await
    }

    fn require_client(&self) -> Result<&SlackyClient> {
        self.data.client().ok_or_else(|| crate::Error::Detached {
            object: OBJECT_NAME,
            id: self.id.clone(),
        })
    }
}

impl ObjectId for Channel {
    fn object_id(&self) -> &str {
        &self.id
    }
}

impl PartialEq for Channel {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

/// A public channel obtained through the legacy `channels.*` methods.
///
/// Loads through `channels.info`, whose response embeds the member ids, so
/// [`PublicChannel::members`] needs no extra request once loaded. The
/// conversation accessors reached through `Deref` share the same data.
#[derive(Debug)]
pub struct PublicChannel {
    channel: Channel,
}

impl PublicChannel {
    pub fn new(id: impl Into<String>) -> Self {
        Self::legacy(Channel::new(id))
    }

    pub(crate) fn unloaded(client: SlackyClient, id: impl Into<String>) -> Self {
        Self::legacy(Channel::unloaded(client, id))
    }

    pub fn from_data(client: Option<SlackyClient>, data: ChannelData) -> Self {
        Self::legacy(Channel::from_data(client, data))
    }

    fn legacy(mut channel: Channel) -> Self {
        channel.source = InfoSource::Channels;
        Self { channel }
    }

    /// Drop cached attributes and load them again through `channels.info`.
    pub async fn refresh_info(&mut self) -> Result<&mut Self> {
        self.channel.refresh_info().await?;
        Ok(self)
    }

    /// Members embedded in the channel listing.
    pub async fn members(&self) -> Result<Vec<User>> {
        let ids = self.channel.info().await?.members.clone();
        match (ids, self.channel.data.client()) {
            (Some(ids), Some(client)) => Ok(ids
                .into_iter()
                .map(|id| User::unloaded(client.clone(), id))
                .collect()),
            (Some(ids), None) => Ok(ids.into_iter().map(User::new).collect()),
            (None, _) => self.channel.members().await,
        }
    }

    /// The underlying conversation. It keeps loading through `channels.info`.
    pub fn into_channel(self) -> Channel {
        self.channel
    }
}

impl Deref for PublicChannel {
    type Target = Channel;

    fn deref(&self) -> &Channel {
        &self.channel
    }
}

impl ObjectId for PublicChannel {
    fn object_id(&self) -> &str {
        self.channel.id()
    }
}
