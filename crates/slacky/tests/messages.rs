//! Message actions against a mock Slack API.

mod common;

use anyhow::Result;
use serde_json::json;
use wiremock::matchers::body_json;

use slacky::endpoint::conversations;
use slacky::{Attachment, Block, ContextElement, Error, Message};

use common::{MockSlack, ok};

#[tokio::test]
async fn test_send_update_delete() -> Result<()> {
    let slack = MockSlack::start().await;

    slack
        .post("chat.postMessage")
        .and(body_json(json!({"channel": "C100", "text": "Deploy started"})))
        .respond_with(ok(json!({
            "channel": "C100",
            "ts": "1503435956.000247",
            "message": {"type": "message", "text": "Deploy started", "ts": "1503435956.000247"}
        })))
        .expect(1)
        .mount(&slack.server)
        .await;
    slack
        .post("chat.update")
        .and(body_json(json!({
            "channel": "C100",
            "ts": "1503435956.000247",
            "text": "Deploy finished"
        })))
        .respond_with(ok(json!({"channel": "C100", "ts": "1503435956.000247", "text": "Deploy finished"})))
        .expect(1)
        .mount(&slack.server)
        .await;
    slack
        .post("chat.delete")
        .and(body_json(json!({"channel": "C100", "ts": "1503435956.000247"})))
        .respond_with(ok(json!({"channel": "C100", "ts": "1503435956.000247"})))
        .expect(1)
        .mount(&slack.server)
        .await;

    let mut message = Message::to("C100").text("Deploy started");
    message.send(&slack.client).await?;
    assert_eq!(message.ts.as_deref(), Some("1503435956.000247"));

    message.text = Some("Deploy finished".to_string());
    message.update(&slack.client).await?;

    message.delete(&slack.client).await?;
    assert!(message.ts.is_none());
    Ok(())
}

#[tokio::test]
async fn test_ephemeral_routes_to_post_ephemeral() -> Result<()> {
    let slack = MockSlack::start().await;

    slack
        .post("chat.postEphemeral")
        .and(body_json(json!({"channel": "C100", "user": "U1", "text": "only you"})))
        .respond_with(ok(json!({"message_ts": "1502210682.580145"})))
        .expect(1)
        .mount(&slack.server)
        .await;

    let mut message = Message::to("C100").ephemeral_to("U1").text("only you");
    message.send(&slack.client).await?;
    assert_eq!(message.ts.as_deref(), Some("1502210682.580145"));
    Ok(())
}

#[tokio::test]
async fn test_post_at_routes_to_schedule() -> Result<()> {
    let slack = MockSlack::start().await;

    slack
        .post("chat.scheduleMessage")
        .and(body_json(json!({"channel": "C100", "post_at": 1_900_000_000, "text": "later"})))
        .respond_with(ok(json!({
            "channel": "C100",
            "scheduled_message_id": "Q1298393284",
            "post_at": "1900000000"
        })))
        .expect(1)
        .mount(&slack.server)
        .await;

    let mut message = Message::to("C100").text("later").post_at(1_900_000_000);
    message.send(&slack.client).await?;
    assert_eq!(message.scheduled_message_id.as_deref(), Some("Q1298393284"));
    assert!(message.ts.is_none());
    Ok(())
}

#[tokio::test]
async fn test_blocks_and_attachments_on_the_wire() -> Result<()> {
    let slack = MockSlack::start().await;

    slack
        .post("chat.postMessage")
        .and(body_json(json!({
            "channel": "C100",
            "text": "Release 1.2",
            "blocks": [
                {"type": "header", "text": {"type": "plain_text", "text": "Release 1.2"}},
                {"type": "divider"}
            ],
            "attachments": [{"fallback": "3 fixes", "color": "good"}]
        })))
        .respond_with(ok(json!({"channel": "C100", "ts": "1.2"})))
        .expect(1)
        .mount(&slack.server)
        .await;

    let mut message = Message::to("C100")
        .block(Block::header("Release 1.2"))
        .block(Block::divider())
        .attachment(Attachment::new("3 fixes").color("good"));
    message.send(&slack.client).await?;
    assert_eq!(message.ts.as_deref(), Some("1.2"));
    Ok(())
}

#[tokio::test]
async fn test_delete_unsent_message_sends_nothing() -> Result<()> {
    let slack = MockSlack::start().await;

    slack
        .post("chat.delete")
        .respond_with(ok(json!({})))
        .expect(0)
        .mount(&slack.server)
        .await;

    let mut message = Message::to("C100").text("never posted");
    let err = message.delete(&slack.client).await.unwrap_err();
    assert!(matches!(err, Error::MissingParameter { param: "ts", .. }));
    Ok(())
}

#[tokio::test]
async fn test_history_decodes_rich_messages() -> Result<()> {
    let slack = MockSlack::start().await;

    slack
        .get("conversations.history")
        .respond_with(ok(json!({
            "messages": [
                {
                    "type": "message",
                    "user": "U1",
                    "ts": "1512085950.000300",
                    "text": "see https://example.com",
                    "attachments": [{
                        "from_url": "https://example.com",
                        "service_name": "Example",
                        "title": "Example Domain",
                        "ts": "1512085950.000216",
                        "id": 1
                    }]
                },
                {
                    "type": "message",
                    "subtype": "bot_message",
                    "ts": "1512085950.000200",
                    "text": "Deploy finished",
                    "blocks": [
                        {"type": "section", "text": {"type": "mrkdwn", "text": "*Deploy* finished"},
                         "accessory": {"type": "button", "text": {"type": "plain_text", "text": "Logs"}}},
                        {"type": "context", "elements": [
                            {"type": "image", "image_url": "https://x/bot.png", "alt_text": "bot"},
                            {"type": "mrkdwn", "text": "by deploybot"}
                        ]},
                        {"type": "rich_text", "elements": [{"type": "rich_text_section", "elements": []}]}
                    ]
                }
            ],
            "has_more": false
        })))
        .expect(1)
        .mount(&slack.server)
        .await;

    let messages = slack
        .client
        .fetch_all(conversations::History::new().channel("C100"))
        .await?;
    assert_eq!(messages.len(), 2);
    assert!(messages.iter().all(|m| m.channel.as_deref() == Some("C100")));

    let unfurl = &messages[0].attachments[0];
    assert_eq!(unfurl.title.as_deref(), Some("Example Domain"));
    assert_eq!(unfurl.ts.as_ref().and_then(|ts| ts.seconds()), Some(1512085950));

    let blocks = &messages[1].blocks;
    assert_eq!(blocks[0].text(), Some("*Deploy* finished"));
    match &blocks[1] {
        Block::Context { elements, .. } => {
            assert!(matches!(elements[0], ContextElement::Image(_)));
            assert_eq!(elements[1].text(), Some("by deploybot"));
        }
        other => panic!("expected context block, got {other:?}"),
    }
    assert!(!blocks[2].is_supported());
    Ok(())
}
