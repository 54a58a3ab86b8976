//! Uniform response envelope for Slack Web API calls.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::Result;
use crate::model::load_data;

/// Response to a single Slack method call.
///
/// Slack wraps every result in an object carrying an `ok` flag, optional
/// `error`/`warning` strings and, for list methods, a
/// `response_metadata.next_cursor` token.
#[derive(Debug, Clone)]
pub struct SlackyResponse {
    status: u16,
    body: Value,
}

impl SlackyResponse {
    pub(crate) fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// HTTP status code of the response.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Value of the `ok` flag.
    pub fn is_ok(&self) -> bool {
        self.body.get("ok").and_then(Value::as_bool).unwrap_or(false)
    }

    /// Raw JSON body.
    pub fn body(&self) -> &Value {
        &self.body
    }

    /// Consume the envelope, returning the raw body.
    pub fn into_body(self) -> Value {
        self.body
    }

    /// Slack error string of a failed call.
    pub fn error(&self) -> Option<&str> {
        self.str_field("error")
    }

    /// Raw `warning` field, e.g. `already_in_channel`.
    pub fn warning(&self) -> Option<&str> {
        self.str_field("warning")
    }

    /// Individual warnings; Slack joins several with commas.
    pub fn warnings(&self) -> impl Iterator<Item = &str> {
        self.warning()
            .into_iter()
            .flat_map(|w| w.split(','))
            .map(str::trim)
            .filter(|w| !w.is_empty())
    }

    /// Cursor for the next page, if there is one.
    ///
    /// Slack signals the last page with an empty string.
    pub fn next_cursor(&self) -> Option<&str> {
        self.body
            .get("response_metadata")
            .and_then(|m| m.get("next_cursor"))
            .and_then(Value::as_str)
            .filter(|c| !c.is_empty())
    }

    /// Decode the object stored under `name`, or the whole body if absent.
    pub fn object<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        load_data(&self.body, Some(name))
    }

    /// Decode the array stored under `name`; a missing key yields no items.
    pub fn objects<T: DeserializeOwned>(&self, name: &str) -> Result<Vec<T>> {
        match self.body.get(name) {
            Some(items) => Ok(serde_json::from_value(items.clone())?),
            None => Ok(Vec::new()),
        }
    }

    /// String field at the top level of the body.
    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.body.get(name).and_then(Value::as_str)
    }
}
