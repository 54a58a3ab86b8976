//! Legacy `channels.*` methods.
//!
//! Slack retired these in favour of `conversations.*` for new apps, but
//! workspaces with classic tokens still answer them, and their listings embed
//! member ids.

use reqwest::Method;
use serde::Serialize;

use crate::client::SlackyClient;
use crate::endpoint::{Endpoint, require};
use crate::error::Result;
use crate::model::{ChannelData, ObjectId, PublicChannel};
use crate::pagination::Paginated;
use crate::response::SlackyResponse;

/// List every public channel.
///
/// See <https://api.slack.com/methods/channels.list>.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListAll {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_archived: Option<bool>,
    /// Leave the member ids out of each channel.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_members: Option<bool>,
}

impl ListAll {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn exclude_archived(mut self, exclude: bool) -> Self {
        self.exclude_archived = Some(exclude);
        self
    }

    pub fn exclude_members(mut self, exclude: bool) -> Self {
        self.exclude_members = Some(exclude);
        self
    }
}

impl Endpoint for ListAll {
    const METHOD: Method = Method::GET;
    const NAME: &'static str = "channels.list";
    type Object = Vec<PublicChannel>;

    fn object(
        &self,
        client: &SlackyClient,
        response: &SlackyResponse,
    ) -> Result<Vec<PublicChannel>> {
        let channels: Vec<ChannelData> = response.objects("channels")?;
        Ok(channels
            .into_iter()
            .map(|data| PublicChannel::from_data(Some(client.clone()), data))
            .collect())
    }
}

impl Paginated for ListAll {
    type Item = PublicChannel;

    fn set_cursor(&mut self, cursor: Option<String>) {
        self.cursor = cursor;
    }
}

/// Fetch a public channel, including its member ids.
///
/// See <https://api.slack.com/methods/channels.info>.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Info {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_locale: Option<bool>,
}

impl Info {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn channel(mut self, channel: &(impl ObjectId + ?Sized)) -> Self {
        self.channel = Some(channel.object_id().to_string());
        self
    }

    pub fn include_locale(mut self, include: bool) -> Self {
        self.include_locale = Some(include);
        self
    }
}

impl Endpoint for Info {
    const METHOD: Method = Method::GET;
    const NAME: &'static str = "channels.info";
    type Object = PublicChannel;

    fn object(&self, client: &SlackyClient, response: &SlackyResponse) -> Result<PublicChannel> {
        let data: ChannelData = response.object("channel")?;
        Ok(PublicChannel::from_data(Some(client.clone()), data))
    }

    fn validate(&self) -> Result<()> {
        require(Self::NAME, "channel", &self.channel)
    }
}
