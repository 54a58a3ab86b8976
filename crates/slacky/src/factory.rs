//! Endpoint registry and client-bound model constructors.

use std::sync::OnceLock;

use reqwest::Method;

use crate::client::SlackyClient;
use crate::endpoint::{Endpoint, channels, chat, conversations, users};
use crate::model::{Channel, Im, Message, PublicChannel, User};

/// Static description of a typed endpoint.
#[derive(Debug, Clone)]
pub struct EndpointDescriptor {
    /// Slack method name, e.g. `conversations.list`.
    pub name: &'static str,
    verb: Method,
    /// Whether the method takes a `cursor`.
    pub paginated: bool,
}

impl EndpointDescriptor {
    fn of<E: Endpoint>(paginated: bool) -> Self {
        Self {
            name: E::NAME,
            verb: E::METHOD,
            paginated,
        }
    }

    /// HTTP verb the method is called with.
    pub fn method(&self) -> Method {
        self.verb.clone()
    }
}

macro_rules! descriptors {
    (@paginated paginated) => { true };
    (@paginated) => { false };
    ($($endpoint:ty $(: $paginated:ident)?),* $(,)?) => {
        vec![$(EndpointDescriptor::of::<$endpoint>(descriptors!(@paginated $($paginated)?))),*]
    };
}

fn registry() -> &'static [EndpointDescriptor] {
    static REGISTRY: OnceLock<Vec<EndpointDescriptor>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        descriptors![
            chat::PostMessage,
            chat::PostEphemeral,
            chat::ScheduleMessage,
            chat::Update,
            chat::Delete,
            conversations::Archive,
            conversations::Unarchive,
            conversations::Close,
            conversations::Create,
            conversations::History: paginated,
            conversations::Info,
            conversations::Invite,
            conversations::Join,
            conversations::Kick,
            conversations::Leave,
            conversations::List: paginated,
            conversations::Members: paginated,
            conversations::Open,
            conversations::Rename,
            conversations::SetPurpose,
            conversations::SetTopic,
            channels::ListAll: paginated,
            channels::Info,
            users::Info,
            users::List: paginated,
        ]
    })
}

/// Look an endpoint up by its Slack method name.
pub fn descriptor(name: &str) -> Option<&'static EndpointDescriptor> {
    registry().iter().find(|d| d.name == name)
}

/// Every endpoint this crate implements, in registry order.
pub fn descriptors() -> &'static [EndpointDescriptor] {
    registry()
}

/// Model constructors bound to this client.
///
/// Models built here load their attributes through the client on first read.
impl SlackyClient {
    pub fn user(&self, id: impl Into<String>) -> User {
        User::unloaded(self.clone(), id)
    }

    pub fn channel(&self, id: impl Into<String>) -> Channel {
        Channel::unloaded(self.clone(), id)
    }

    /// A channel loaded through the legacy `channels.info`.
    pub fn public_channel(&self, id: impl Into<String>) -> PublicChannel {
        PublicChannel::unloaded(self.clone(), id)
    }

    pub fn im(&self, id: impl Into<String>) -> Im {
        Im::unloaded(self.clone(), id)
    }

    /// An empty message; send it with [`Message::send`].
    pub fn message(&self) -> Message {
        Message::new()
    }
}
