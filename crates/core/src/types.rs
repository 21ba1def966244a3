use serde::{Deserialize, Serialize};

/// Kind of a rich-text entity attached to a message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// A bare URL written in the message text.
    Url,

    /// Any other entity type (mention, bold, text link, ...).
    Other(String),
}

/// A rich-text entity.
///
/// `offset` and `length` count UTF-16 code units, the way the chat platform
/// reports them. They are not byte or `char` indices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageEntity {
    /// Entity kind.
    pub kind: EntityKind,

    /// Start offset in UTF-16 code units.
    pub offset: u32,

    /// Length in UTF-16 code units.
    pub length: u32,

    /// Target URL for text links.
    #[serde(default)]
    pub url: Option<String>,
}

impl MessageEntity {
    /// Create a URL entity covering `length` code units from `offset`.
    pub fn url(offset: u32, length: u32) -> Self {
        Self {
            kind: EntityKind::Url,
            offset,
            length,
            url: None,
        }
    }

    /// Create a text-link entity pointing at `url`.
    pub fn text_link(offset: u32, length: u32, url: impl Into<String>) -> Self {
        Self {
            kind: EntityKind::Other("text_link".to_string()),
            offset,
            length,
            url: Some(url.into()),
        }
    }
}

/// One inline keyboard button.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineButton {
    /// Button caption.
    #[serde(default)]
    pub text: Option<String>,

    /// Button URL.
    #[serde(default)]
    pub url: Option<String>,
}

/// A chat user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Numeric user id.
    pub id: i64,

    /// First name.
    pub first_name: String,

    /// Last name.
    #[serde(default)]
    pub last_name: Option<String>,

    /// Whether the account has been deleted.
    #[serde(default)]
    pub is_deleted: bool,
}

/// A chat (group or channel).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    /// Numeric chat id, `-100…` for supergroups and channels.
    pub id: i64,

    /// Chat title.
    #[serde(default)]
    pub title: Option<String>,

    /// Public username.
    #[serde(default)]
    pub username: Option<String>,
}

/// Origin of a forwarded message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForwardOrigin {
    /// Forwarded from a visible user.
    User(User),

    /// Forwarded from a user who hides their account; only the name is known.
    HiddenUser(String),

    /// Forwarded from a channel or group.
    Chat(Chat),
}

/// Attached document or audio file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaFile {
    /// Original file name, when the sender supplied one.
    #[serde(default)]
    pub file_name: Option<String>,
}

/// The subset of a chat message the text layer reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Message id inside its chat.
    pub message_id: i64,

    /// Chat the message was posted in.
    #[serde(default)]
    pub chat: Option<Chat>,

    /// Message text.
    #[serde(default)]
    pub text: Option<String>,

    /// Media caption.
    #[serde(default)]
    pub caption: Option<String>,

    /// Entities of `text`.
    #[serde(default)]
    pub entities: Vec<MessageEntity>,

    /// Entities of `caption`.
    #[serde(default)]
    pub caption_entities: Vec<MessageEntity>,

    /// Inline keyboard rows.
    #[serde(default)]
    pub reply_markup: Vec<Vec<InlineButton>>,

    /// Forward origin, when the message was forwarded.
    #[serde(default)]
    pub forward_origin: Option<ForwardOrigin>,

    /// Attached document.
    #[serde(default)]
    pub document: Option<MediaFile>,

    /// Attached audio.
    #[serde(default)]
    pub audio: Option<MediaFile>,
}

impl Message {
    /// Create a plain text message.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Text, falling back to the caption. Empty strings count as absent.
    pub fn text_or_caption(&self) -> Option<&str> {
        self.text
            .as_deref()
            .filter(|t| !t.is_empty())
            .or_else(|| self.caption.as_deref().filter(|c| !c.is_empty()))
    }

    /// Entities belonging to whichever of text or caption is present.
    pub fn active_entities(&self) -> &[MessageEntity] {
        if !self.entities.is_empty() {
            &self.entities
        } else {
            &self.caption_entities
        }
    }

    /// Whether the message carries a document or audio attachment.
    pub fn has_media(&self) -> bool {
        self.document.is_some() || self.audio.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caption_is_used_when_text_missing() {
        let msg = Message {
            caption: Some("photo caption".to_string()),
            caption_entities: vec![MessageEntity::url(0, 5)],
            ..Message::default()
        };
        assert_eq!(msg.text_or_caption(), Some("photo caption"));
        assert_eq!(msg.active_entities().len(), 1);
    }

    #[test]
    fn message_deserializes_with_sparse_fields() {
        let msg: Message = serde_json::from_str(
            r#"{"message_id": 7, "text": "hi", "entities": [{"kind": "url", "offset": 0, "length": 2}]}"#,
        )
        .expect("message json should parse");
        assert_eq!(msg.message_id, 7);
        assert_eq!(msg.entities[0].kind, EntityKind::Url);
        assert!(msg.reply_markup.is_empty());
        assert!(!msg.has_media());
    }
}
