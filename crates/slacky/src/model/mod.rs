//! Slack resource models.
//!
//! Models that Slack exposes through an `*.info` method ([`User`],
//! [`Channel`], [`PublicChannel`], [`Im`]) can be created from an id alone.
//! The first accessor that needs data sends the info method once and caches
//! the result; [`Channel::refresh_info`] and friends drop the cache.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::OnceCell;

use crate::client::SlackyClient;
use crate::endpoint::Endpoint;
use crate::error::{Error, Result};

mod channel;
mod im;
pub mod message;
mod user;

pub use channel::{Channel, ChannelData, ChannelValue, PublicChannel};
pub use im::{Im, ImData};
pub use message::{
    Attachment, AttachmentField, AttachmentTs, Block, ContextElement, ImageElement, Message,
    TextKind, TextObject,
};
pub use user::{User, UserData, UserProfile};

/// Anything that identifies a Slack object by id.
///
/// Implemented for string ids and for the models, so endpoint setters accept
/// either.
pub trait ObjectId {
    /// The Slack id (`C…`, `U…`, `D…`).
    fn object_id(&self) -> &str;
}

impl ObjectId for str {
    fn object_id(&self) -> &str {
        self
    }
}

impl ObjectId for String {
    fn object_id(&self) -> &str {
        self
    }
}

impl<T: ObjectId + ?Sized> ObjectId for &T {
    fn object_id(&self) -> &str {
        (**self).object_id()
    }
}

/// Decode `T` from a response body.
///
/// When `object_name` is given and the body has that key, only that slice is
/// decoded. Keys `T` does not declare are ignored.
pub fn load_data<T: DeserializeOwned>(body: &Value, object_name: Option<&str>) -> Result<T> {
    let data = object_name
        .and_then(|name| body.get(name))
        .unwrap_or(body);
    Ok(serde_json::from_value(data.clone())?)
}

/// Data of a model, fetched at most once.
pub(crate) struct Lazy<D> {
    client: Option<SlackyClient>,
    cell: OnceCell<D>,
}

impl<D: DeserializeOwned> Lazy<D> {
    /// Not yet loaded; `client` is used on first read.
    pub(crate) fn unloaded(client: Option<SlackyClient>) -> Self {
        Self {
            client,
            cell: OnceCell::new(),
        }
    }

    /// Already populated from response data.
    pub(crate) fn loaded(client: Option<SlackyClient>, data: D) -> Self {
        Self {
            client,
            cell: OnceCell::new_with(Some(data)),
        }
    }

    pub(crate) fn client(&self) -> Option<&SlackyClient> {
        self.client.as_ref()
    }

    pub(crate) fn attach(&mut self, client: SlackyClient) {
        self.client = Some(client);
    }

    pub(crate) fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }

    pub(crate) fn get(&self) -> Option<&D> {
        self.cell.get()
    }

    pub(crate) fn get_mut(&mut self) -> Option<&mut D> {
        self.cell.get_mut()
    }

    pub(crate) fn set(&mut self, data: D) {
        self.cell = OnceCell::new_with(Some(data));
    }

    pub(crate) fn reset(&mut self) {
        self.cell = OnceCell::new();
    }

    /// Return the cached data, sending `request` to load it if needed.
    pub(crate) async fn get_or_fetch<E, F>(
        &self,
        object: &'static str,
        id: &str,
        request: F,
    ) -> Result<&D>
    where
        E: Endpoint,
        F: FnOnce() -> E,
    {
        self.cell
            .get_or_try_init(|| async {
                let client = self.client.as_ref().ok_or_else(|| Error::Detached {
                    object,
                    id: id.to_string(),
                })?;
                tracing::debug!(object, id, method = E::NAME, "Loading model");
                let response = client.send(&request()).await?;
                response.object::<D>(object)
            })
            .await
    }
}

impl<D: std::fmt::Debug> std::fmt::Debug for Lazy<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.cell.get() {
            Some(data) => f.debug_tuple("Loaded").field(data).finish(),
            None => f.write_str("Unloaded"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Thing {
        id: String,
        #[serde(default)]
        name: Option<String>,
    }

    #[test]
    fn test_load_data_uses_named_slice() {
        let body = json!({"ok": true, "thing": {"id": "T1", "name": "first", "extra": 1}});
        let thing: Thing = load_data(&body, Some("thing")).unwrap();
        assert_eq!(
            thing,
            Thing {
                id: "T1".to_string(),
                name: Some("first".to_string())
            }
        );
    }

    #[test]
    fn test_load_data_falls_back_to_body() {
        let body = json!({"id": "T2"});
        let thing: Thing = load_data(&body, Some("thing")).unwrap();
        assert_eq!(thing.id, "T2");
        assert_eq!(thing.name, None);
    }

    #[test]
    fn test_object_id_for_strings() {
        fn id_of(value: &(impl ObjectId + ?Sized)) -> String {
            value.object_id().to_string()
        }
        assert_eq!(id_of("C1"), "C1");
        assert_eq!(id_of(&"C2".to_string()), "C2");
    }

    #[tokio::test]
    async fn test_detached_lazy_fails_on_read() {
        use crate::endpoint::users::Info;

        let lazy: Lazy<UserData> = Lazy::unloaded(None);
        let err = lazy
            .get_or_fetch("user", "U1", || Info::new().user("U1"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Detached { object: "user", .. }));
        assert!(!lazy.is_loaded());
    }
}
