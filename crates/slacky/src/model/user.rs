//! Slack user model.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::SlackyClient;
use crate::endpoint::users::Info;
use crate::error::Result;
use crate::model::{Lazy, ObjectId};

/// Response key holding a user object.
pub(crate) const OBJECT_NAME: &str = "user";

/// Attributes of a Slack user as returned by `users.info`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserData {
    /// User id.
    pub id: String,
    /// Workspace the user belongs to.
    #[serde(default)]
    pub team_id: String,
    /// Handle (deprecated by Slack in favour of display names, still returned).
    #[serde(default)]
    pub name: String,
    /// Whether the account was deactivated.
    #[serde(default)]
    pub deleted: bool,
    /// Colour used for the name in some clients.
    #[serde(default)]
    pub color: String,
    /// Full name.
    #[serde(default)]
    pub real_name: String,
    /// Profile block.
    #[serde(default)]
    pub profile: UserProfile,
    #[serde(default)]
    pub is_bot: bool,
    #[serde(default)]
    pub is_admin: bool,
    /// IANA time zone name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tz: Option<String>,
}

/// The `profile` object of a user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub real_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_72: Option<String>,
    #[serde(default)]
    pub status_text: String,
    #[serde(default)]
    pub status_emoji: String,
    /// Any other profile keys (custom fields, other image sizes, ...).
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// A Slack user, loaded through `users.info` on first read.
#[derive(Debug)]
pub struct User {
    id: String,
    data: Lazy<UserData>,
}

impl User {
    /// A user known only by id and not bound to a client.
    ///
    /// Enough to pass as a parameter; reading attributes fails until data is
    /// set or a client is attached with [`User::with_client`].
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            data: Lazy::unloaded(None),
        }
    }

    /// A user that loads itself through `client` on first read.
    pub(crate) fn unloaded(client: SlackyClient, id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            data: Lazy::unloaded(Some(client)),
        }
    }

    /// A user populated from response data.
    pub fn from_data(client: Option<SlackyClient>, data: UserData) -> Self {
        Self {
            id: data.id.clone(),
            data: Lazy::loaded(client, data),
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

    /// Whether attributes have been loaded.
    pub fn is_loaded(&self) -> bool {
        self.data.is_loaded()
    }

    /// Loaded data, without triggering a fetch.
    pub fn data(&self) -> Option<&UserData> {
        self.data.get()
    }

    /// Replace the attributes with `data`.
    pub fn set_data(&mut self, data: UserData) {
        self.id = data.id.clone();
        self.data.set(data);
    }

    /// All attributes, loading them if needed.
    pub async fn info(&self) -> Result<&UserData> {
        let id = self.id.as_str();
        self.data
            .get_or_fetch(OBJECT_NAME, id, || Info::new().user(id))
            .await
    }

    /// Drop cached attributes and load them again.
    pub async fn refresh_info(&mut self) -> Result<&mut Self> {
        self.data.reset();
        self.info().await?;
        Ok(self)
    }

    pub async fn team_id(&self) -> Result<&str> {
        Ok(&self.info().await?.team_id)
    }

    pub async fn name(&self) -> Result<&str> {
        Ok(&self.info().await?.name)
    }

    pub async fn real_name(&self) -> Result<&str> {
        Ok(&self.info().await?.real_name)
    }

    pub async fn is_deleted(&self) -> Result<bool> {
        Ok(self.info().await?.deleted)
    }

    pub async fn color(&self) -> Result<&str> {
        Ok(&self.info().await?.color)
    }

    pub async fn profile(&self) -> Result<&UserProfile> {
        Ok(&self.info().await?.profile)
    }
}

impl ObjectId for User {
    fn object_id(&self) -> &str {
        &self.id
    }
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
