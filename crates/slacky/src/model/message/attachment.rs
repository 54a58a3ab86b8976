//! Legacy secondary attachments.
//!
//! Slack recommends [`Block`](super::Block)s for new messages; attachments
//! remain for messages that need the coloured side bar.

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Footer timestamp of an attachment.
///
/// Attachments built by apps carry Unix seconds; link unfurls carry a
/// message-style `"seconds.micros"` string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttachmentTs {
    Number(Number),
    Text(String),
}

impl AttachmentTs {
    /// Whole Unix seconds, if the value parses as a time.
    pub fn seconds(&self) -> Option<i64> {
        match self {
            AttachmentTs::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
            AttachmentTs::Text(s) => s.split('.').next()?.parse().ok(),
        }
    }
}

impl From<i64> for AttachmentTs {
    fn from(seconds: i64) -> Self {
        AttachmentTs::Number(seconds.into())
    }
}

/// One field in an attachment table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttachmentField {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub value: String,
    /// Short enough to sit next to another field.
    #[serde(default)]
    pub short: bool,
}

/// A legacy message attachment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    /// Plain text summary for clients that cannot render attachments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<String>,
    /// Side bar colour: `good`, `warning`, `danger` or a hex code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pretext: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<AttachmentField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumb_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer_icon: Option<String>,
    /// Time shown in the footer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ts: Option<AttachmentTs>,
}

impl Attachment {
    pub fn new(fallback: impl Into<String>) -> Self {
        Self {
            fallback: Some(fallback.into()),
            ..Default::default()
        }
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn ts(mut self, seconds: i64) -> Self {
        self.ts = Some(seconds.into());
        self
    }

    pub fn field(
        mut self,
        title: impl Into<String>,
        value: impl Into<String>,
        short: bool,
    ) -> Self {
        self.fields.push(AttachmentField {
            title: title.into(),
            value: value.into(),
            short,
        });
        self
    }
}
