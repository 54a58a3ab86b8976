//! Slack method implementations.
//!
//! Each type in the submodules describes one Slack method: its name, HTTP
//! verb and parameters. Parameters are set through chained setters and the
//! endpoint is handed to [`SlackyClient::send`] or [`SlackyClient::fetch`].
//!
//! ```no_run
//! use slacky::SlackyClient;
//! use slacky::endpoint::conversations::Invite;
//!
//! # async fn example(client: SlackyClient) -> slacky::Result<()> {
//! let invite = Invite::new().channel("C0123456789").users(["U012AB3CD", "U061F7AUR"]);
//! let channel = client.fetch(&invite).await?;
//! assert_eq!(invite.user_ids(), ["U012AB3CD", "U061F7AUR"]);
//! # let _ = channel;
//! # Ok(())
//! # }
//! ```

use reqwest::Method;
use serde::{Serialize, Serializer};

use crate::client::SlackyClient;
use crate::error::{Error, Result};
use crate::response::SlackyResponse;

pub mod channels;
pub mod chat;
pub mod conversations;
pub mod users;

/// A single Slack Web API method.
pub trait Endpoint: Serialize + Send + Sync {
    /// HTTP verb used to call the method.
    const METHOD: Method;

    /// Slack method name, which is also the URL path below the API root.
    const NAME: &'static str;

    /// Value decoded from a successful response.
    type Object;

    /// Decode this method's object from a successful response.
    fn object(&self, client: &SlackyClient, response: &SlackyResponse) -> Result<Self::Object>;

    /// Check that required parameters are present.
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

/// Fail with [`Error::MissingParameter`] unless `value` is set.
pub(crate) fn require<T>(
    method: &'static str,
    param: &'static str,
    value: &Option<T>,
) -> Result<()> {
    match value {
        Some(_) => Ok(()),
        None => Err(Error::MissingParameter { method, param }),
    }
}

/// Fail with [`Error::MissingParameter`] if `values` is empty.
pub(crate) fn require_any<T>(
    method: &'static str,
    param: &'static str,
    values: &[T],
) -> Result<()> {
    if values.is_empty() {
        Err(Error::MissingParameter { method, param })
    } else {
        Ok(())
    }
}

/// Slack takes id lists as one comma separated string.
pub(crate) fn comma_list<S: Serializer>(
    values: &[String],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&values.join(","))
}

/// Decode a response whose only interesting content is the `ok` flag.
pub(crate) fn unit(_client: &SlackyClient, _response: &SlackyResponse) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Ids {
        #[serde(serialize_with = "comma_list")]
        users: Vec<String>,
    }

    #[test]
    fn test_comma_list() {
        let ids = Ids {
            users: vec!["U1".to_string(), "U2".to_string()],
        };
        assert_eq!(
            serde_json::to_value(&ids).unwrap(),
            serde_json::json!({"users": "U1,U2"})
        );
    }

    #[test]
    fn test_require() {
        assert!(require("users.info", "user", &Some("U1")).is_ok());
        let err = require::<String>("users.info", "user", &None).unwrap_err();
        assert_eq!(err.to_string(), "users.info requires parameter 'user'");
        assert!(require_any::<String>("conversations.invite", "users", &[]).is_err());
    }
}
