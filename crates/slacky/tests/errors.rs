//! Transport failures against a mock Slack API.

mod common;

use std::time::Duration;

use anyhow::Result;
use serde_json::json;
use wiremock::ResponseTemplate;
use wiremock::matchers::{body_json, query_param};

use slacky::endpoint::{conversations, users};
use slacky::{Error, Method};

use common::{MockSlack, ok, slack_error, user_json};

#[tokio::test]
async fn test_rate_limit_carries_retry_after() -> Result<()> {
    let slack = MockSlack::start().await;

    slack
        .get("conversations.history")
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "30"))
        .mount(&slack.server)
        .await;

    let err = slack
        .client
        .send(&conversations::History::new().channel("C100"))
        .await
        .unwrap_err();
    assert!(err.is_rate_limited());
    match err {
        Error::RateLimited {
            method,
            retry_after,
        } => {
            assert_eq!(method, "conversations.history");
            assert_eq!(retry_after, Some(Duration::from_secs(30)));
        }
        other => panic!("expected RateLimited, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn test_http_status_error() -> Result<()> {
    let slack = MockSlack::start().await;

    slack
        .get("users.info")
        .respond_with(ResponseTemplate::new(503))
        .mount(&slack.server)
        .await;

    let err = slack
        .client
        .send(&users::Info::new().user("U1"))
        .await
        .unwrap_err();
    assert!(err.is_server_error());
    assert!(matches!(err, Error::Status { status: 503, .. }));
    Ok(())
}

#[tokio::test]
async fn test_auth_error() -> Result<()> {
    let slack = MockSlack::start().await;

    slack
        .get("users.list")
        .respond_with(slack_error("invalid_auth"))
        .mount(&slack.server)
        .await;

    let err = slack
        .client
        .fetch_all(users::List::new())
        .await
        .unwrap_err();
    assert!(err.is_auth_error());
    assert_eq!(err.to_string(), "users.list failed: invalid_auth");
    Ok(())
}

#[tokio::test]
async fn test_missing_parameter_sends_nothing() -> Result<()> {
    let slack = MockSlack::start().await;

    slack
        .post("conversations.invite")
        .respond_with(ok(json!({})))
        .expect(0)
        .mount(&slack.server)
        .await;

    let err = slack
        .client
        .send(&conversations::Invite::new().channel("C100"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::MissingParameter {
            method: "conversations.invite",
            param: "users"
        }
    ));
    Ok(())
}

#[tokio::test]
async fn test_call_named_uses_registry_verb() -> Result<()> {
    let slack = MockSlack::start().await;

    slack
        .get("users.info")
        .and(query_param("user", "U1"))
        .respond_with(ok(json!({"user": user_json("U1", "alice")})))
        .expect(1)
        .mount(&slack.server)
        .await;

    let response = slack
        .client
        .call_named("users.info", &json!({"user": "U1"}))
        .await?;
    assert!(response.is_ok());
    assert_eq!(response.body()["user"]["name"], "alice");

    let err = slack
        .client
        .call_named("users.profile.set", &json!({}))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::UnknownEndpoint(ref name) if name == "users.profile.set"));
    Ok(())
}

#[tokio::test]
async fn test_untyped_call_posts_json() -> Result<()> {
    let slack = MockSlack::start().await;

    slack
        .post("reactions.add")
        .and(body_json(json!({"channel": "C100", "name": "thumbsup", "timestamp": "1.2"})))
        .respond_with(ok(json!({})))
        .expect(1)
        .mount(&slack.server)
        .await;

    let response = slack
        .client
        .call(
            Method::POST,
            "reactions.add",
            &json!({"channel": "C100", "name": "thumbsup", "timestamp": "1.2"}),
        )
        .await?;
    assert_eq!(response.status(), 200);
    Ok(())
}
