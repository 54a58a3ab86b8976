//! Direct message conversation model.

use serde::{Deserialize, Serialize};

use crate::client::SlackyClient;
use crate::endpoint::conversations;
use crate::error::Result;
use crate::model::{Lazy, ObjectId, User};

const OBJECT_NAME: &str = "channel";

/// Attributes of a direct message conversation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImData {
    pub id: String,
    /// The other participant.
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub created: i64,
    #[serde(default)]
    pub is_im: bool,
    /// Whether the conversation shows up in the sidebar.
    #[serde(default)]
    pub is_open: bool,
    #[serde(default)]
    pub is_user_deleted: bool,
}

/// A direct message conversation, loaded through `conversations.info`.
#[derive(Debug)]
pub struct Im {
    id: String,
    data: Lazy<ImData>,
}

impl Im {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            data: Lazy::unloaded(None),
        }
    }

    pub(crate) fn unloaded(client: SlackyClient, id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            data: Lazy::unloaded(Some(client)),
        }
    }

    pub fn from_data(client: Option<SlackyClient>, data: ImData) -> Self {
        Self {
            id: data.id.clone(),
            data: Lazy::loaded(client, data),
        }
    }

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

    pub fn data(&self) -> Option<&ImData> {
        self.data.get()
    }

    pub async fn info(&self) -> Result<&ImData> {
        let id = self.id.as_str();
        self.data
            .get_or_fetch(OBJECT_NAME, id, || conversations::Info::new().channel(id))
            .await
    }

    pub async fn refresh_info(&mut self) -> Result<&mut Self> {
        self.data.reset();
        self.info().await?;
        Ok(self)
    }

    /// Id of the other participant.
    pub async fn user(&self) -> Result<&str> {
        Ok(&self.info().await?.user)
    }

    /// The other participant as a lazily loaded [`User`].
    pub async fn user_model(&self) -> Result<User> {
        let id = self.user().await?.to_string();
        Ok(match self.data.client() {
            Some(client) => User::unloaded(client.clone(), id),
            None => User::new(id),
        })
    }

    pub async fn is_open(&self) -> Result<bool> {
        Ok(self.info().await?.is_open)
    }

    pub async fn created(&self) -> Result<i64> {
        Ok(self.info().await?.created)
    }

    pub async fn is_user_deleted(&self) -> Result<bool> {
        Ok(self.info().await?.is_user_deleted)
    }
}

impl ObjectId for Im {
    fn object_id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_im_from_info_payload() {
        let data: ImData = serde_json::from_value(json!({
            "id": "D069C7QFK",
            "created": 1449709280,
            "is_im": true,
            "is_org_shared": false,
            "user": "U069C7QFH",
            "is_user_deleted": false,
            "is_open": true
        }))
        .unwrap();

        let im = Im::from_data(None, data);
        assert!(im.is_open().await.unwrap());
        assert_eq!(im.user().await.unwrap(), "U069C7QFH");
        assert_eq!(im.user_model().await.unwrap().id(), "U069C7QFH");
    }
}
