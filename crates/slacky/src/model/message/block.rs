//! Block Kit layout blocks.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Formatting of a text object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextKind {
    PlainText,
    Mrkdwn,
}

/// A Block Kit text object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextObject {
    #[serde(rename = "type")]
    pub kind: TextKind,
    pub text: String,
    /// Render emoji shortcodes (plain_text only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<bool>,
    /// Skip link and mention parsing (mrkdwn only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verbatim: Option<bool>,
}

impl TextObject {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            kind: TextKind::PlainText,
            text: text.into(),
            emoji: None,
            verbatim: None,
        }
    }

    pub fn mrkdwn(text: impl Into<String>) -> Self {
        Self {
            kind: TextKind::Mrkdwn,
            text: text.into(),
            emoji: None,
            verbatim: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum ImageType {
    Image,
}

/// An image element inside a context block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageElement {
    #[serde(rename = "type")]
    kind: ImageType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub alt_text: String,
    /// Image hosted in Slack, used instead of `image_url`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slack_file: Option<Value>,
}

impl ImageElement {
    pub fn new(image_url: impl Into<String>, alt_text: impl Into<String>) -> Self {
        Self {
            kind: ImageType::Image,
            image_url: Some(image_url.into()),
            alt_text: alt_text.into(),
            slack_file: None,
        }
    }
}

/// One element of a context block.
///
/// Element types without a variant of their own are kept verbatim in
/// [`ContextElement::Other`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContextElement {
    Text(TextObject),
    Image(ImageElement),
    Other(Value),
}

impl ContextElement {
    pub fn text(&self) -> Option<&str> {
        match self {
            ContextElement::Text(t) => Some(t.text.as_str()),
            ContextElement::Image(image) => Some(image.alt_text.as_str()),
            ContextElement::Other(_) => None,
        }
    }
}

impl From<TextObject> for ContextElement {
    fn from(text: TextObject) -> Self {
        ContextElement::Text(text)
    }
}

impl From<ImageElement> for ContextElement {
    fn from(image: ImageElement) -> Self {
        ContextElement::Image(image)
    }
}

/// A layout block of a message.
///
/// Block types this crate does not model decode as [`Block::Unsupported`]
/// and are left out when the message is sent again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Section {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text: Option<TextObject>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        fields: Vec<TextObject>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        block_id: Option<String>,
    },
    Header {
        text: TextObject,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        block_id: Option<String>,
    },
    Divider {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        block_id: Option<String>,
    },
    Context {
        elements: Vec<ContextElement>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        block_id: Option<String>,
    },
    Image {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        image_url: Option<String>,
        /// Image hosted in Slack, used instead of `image_url`.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        slack_file: Option<Value>,
        #[serde(default)]
        alt_text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<TextObject>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        block_id: Option<String>,
    },
    #[serde(other)]
    Unsupported,
}

impl Block {
    /// Section with markdown text.
    pub fn section(text: impl Into<String>) -> Self {
        Block::Section {
            text: Some(TextObject::mrkdwn(text)),
            fields: Vec::new(),
            block_id: None,
        }
    }

    pub fn header(text: impl Into<String>) -> Self {
        Block::Header {
            text: TextObject::plain(text),
            block_id: None,
        }
    }

    pub fn divider() -> Self {
        Block::Divider { block_id: None }
    }

    pub fn context(text: impl Into<String>) -> Self {
        Block::Context {
            elements: vec![TextObject::mrkdwn(text).into()],
            block_id: None,
        }
    }

    pub fn image(image_url: impl Into<String>, alt_text: impl Into<String>) -> Self {
        Block::Image {
            image_url: Some(image_url.into()),
            slack_file: None,
            alt_text: alt_text.into(),
            title: None,
            block_id: None,
        }
    }

    /// Readable text of the block, used as notification fallback.
    pub fn text(&self) -> Option<&str> {
        match self {
            Block::Section { text: Some(t), .. } | Block::Header { text: t, .. } => {
                Some(t.text.as_str())
            }
            Block::Section { fields, .. } => fields.first().map(|f| f.text.as_str()),
            Block::Context { elements, .. } => elements.iter().find_map(ContextElement::text),
            Block::Image { alt_text, .. } => Some(alt_text.as_str()),
            Block::Divider { .. } | Block::Unsupported => None,
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Block::Unsupported)
    }
}
