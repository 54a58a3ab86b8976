//! `users.*` methods.

use reqwest::Method;
use serde::Serialize;

use crate::client::SlackyClient;
use crate::endpoint::{Endpoint, require};
use crate::error::Result;
use crate::model::{ObjectId, User, UserData};
use crate::pagination::Paginated;
use crate::response::SlackyResponse;

/// Fetch a user.
///
/// See <https://api.slack.com/methods/users.info>.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Info {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_locale: Option<bool>,
}

impl Info {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user(mut self, user: &(impl ObjectId + ?Sized)) -> Self {
        self.user = Some(user.object_id().to_string());
        self
    }

    pub fn include_locale(mut self, include: bool) -> Self {
        self.include_locale = Some(include);
        self
    }
}

impl Endpoint for Info {
    const METHOD: Method = Method::GET;
    const NAME: &'static str = "users.info";
    type Object = User;

    fn object(&self, client: &SlackyClient, response: &SlackyResponse) -> Result<User> {
        let data: UserData = response.object("user")?;
        Ok(User::from_data(Some(client.clone()), data))
    }

    fn validate(&self) -> Result<()> {
        require(Self::NAME, "user", &self.user)
    }
}

/// List the workspace's users, deactivated ones included.
///
/// See <https://api.slack.com/methods/users.list>.
#[derive(Debug, Clone, Default, Serialize)]
pub struct List {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_locale: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
}

impl List {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn team_id(mut self, team_id: impl Into<String>) -> Self {
        self.team_id = Some(team_id.into());
        self
    }
}

impl Endpoint for List {
    const METHOD: Method = Method::GET;
    const NAME: &'static str = "users.list";
    type Object = Vec<User>;

    fn object(&self, client: &SlackyClient, response: &SlackyResponse) -> Result<Vec<User>> {
        let members: Vec<UserData> = response.objects("members")?;
        Ok(members
            .into_iter()
            .map(|data| User::from_data(Some(client.clone()), data))
            .collect())
    }
}

impl Paginated for List {
    type Item = User;

    fn set_cursor(&mut self, cursor: Option<String>) {
        self.cursor = cursor;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_info_params() {
        let info = Info::new().user(&User::new("U123"));
        assert_eq!(serde_json::to_value(&info).unwrap(), json!({"user": "U123"}));
    }

    #[test]
    fn test_list_object_is_loaded_users() {
        let client = SlackyClient::new("xoxb-test").unwrap();
        let response = SlackyResponse::new(
            200,
            json!({
                "ok": true,
                "members": [
                    {"id": "U1", "name": "alice", "profile": {"display_name": "Alice"}},
                    {"id": "U2", "name": "bob", "deleted": true}
                ]
            }),
        );
        let users = List::new().object(&client, &response).unwrap();
        assert_eq!(users.len(), 2);
        assert!(users.iter().all(User::is_loaded));
        assert!(users[1].data().unwrap().deleted);
    }
}
