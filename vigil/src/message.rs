//! Message types for model communication.
//!
//! This module defines the conversation format sent to multimodal models:
//! role-tagged messages whose content is an ordered list of single-key parts
//! (`{"text": ...}` or `{"image": ...}`), following the DashScope multimodal
//! conversation conventions.

use crate::media::EncodedImage;
use serde::{Deserialize, Serialize};

/// Role of a message in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System message providing instructions.
    System,
    /// User message.
    User,
    /// Assistant (model) message.
    Assistant,
}

impl MessageRole {
    /// Get the string representation of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// Content of a message: a text fragment or an inline image reference.
///
/// Parts serialize as single-key objects, matching the wire format the
/// multimodal conversation endpoint expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    /// Text content.
    Text {
        /// The text content.
        text: String,
    },
    /// Image content: a data URL or an `https` URL.
    Image {
        /// The image reference.
        image: String,
    },
}

impl MessageContent {
    /// Create a new text content part.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Create a new image content part from a URL or data URL string.
    #[must_use]
    pub fn image(image: impl Into<String>) -> Self {
        Self::Image {
            image: image.into(),
        }
    }

    /// Create a new image content part from an [`EncodedImage`].
    #[must_use]
    pub fn image_encoded(image: &EncodedImage) -> Self {
        Self::image(image.as_str())
    }

    /// Get the text content if this is a text part.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text } => Some(text),
            Self::Image { .. } => None,
        }
    }

    /// Check if this is an image part.
    #[must_use]
    pub const fn is_image(&self) -> bool {
        matches!(self, Self::Image { .. })
    }
}

/// A chat message in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message sender.
    pub role: MessageRole,
    /// Ordered content parts of the message.
    pub content: Vec<MessageContent>,
}

impl ChatMessage {
    /// Create a new system message with a single text part.
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: vec![MessageContent::text(content)],
        }
    }

    /// Create a new user message with a single text part.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: vec![MessageContent::text(content)],
        }
    }

    /// Create a new user message carrying a single inline image.
    #[must_use]
    pub fn user_image(image: &EncodedImage) -> Self {
        Self {
            role: MessageRole::User,
            content: vec![MessageContent::image_encoded(image)],
        }
    }

    /// Create a new assistant message with a single text part.
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: vec![MessageContent::text(content)],
        }
    }

    /// Create a new message with multiple content parts.
    #[must_use]
    pub const fn with_contents(role: MessageRole, content: Vec<MessageContent>) -> Self {
        Self { role, content }
    }

    /// Get the first text part of the message, if any.
    ///
    /// This is the fixed extraction path used for model verdicts.
    #[must_use]
    pub fn first_text(&self) -> Option<&str> {
        self.content.iter().find_map(MessageContent::as_text)
    }

    /// Get all text parts of the message joined with newlines.
    #[must_use]
    pub fn text_content(&self) -> Option<String> {
        let parts: Vec<&str> = self
            .content
            .iter()
            .filter_map(MessageContent::as_text)
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join("\n"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::ImageFormat;

    #[test]
    fn content_parts_serialize_as_single_key_objects() {
        let text = serde_json::to_value(MessageContent::text("hello")).unwrap();
        assert_eq!(text, serde_json::json!({"text": "hello"}));

        let image = serde_json::to_value(MessageContent::image("data:image/png;base64,AQ=="))
            .unwrap();
        assert_eq!(
            image,
            serde_json::json!({"image": "data:image/png;base64,AQ=="})
        );
    }

    #[test]
    fn message_serializes_with_lowercase_role() {
        let msg = ChatMessage::system("inspect the image");
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["role"], "system");
        assert_eq!(value["content"][0]["text"], "inspect the image");
    }

    #[test]
    fn user_image_carries_the_data_url() {
        let encoded = EncodedImage::from_bytes(&[1, 2, 3], ImageFormat::Webp);
        let msg = ChatMessage::user_image(&encoded);
        assert_eq!(msg.role, MessageRole::User);
        assert_eq!(msg.content.len(), 1);
        assert!(msg.content[0].is_image());
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["content"][0]["image"], encoded.as_str());
    }

    #[test]
    fn first_text_skips_image_parts() {
        let msg = ChatMessage::with_contents(
            MessageRole::Assistant,
            vec![
                MessageContent::image("data:image/jpeg;base64,AA=="),
                MessageContent::text("first"),
                MessageContent::text("second"),
            ],
        );
        assert_eq!(msg.first_text(), Some("first"));
        assert_eq!(msg.text_content(), Some("first\nsecond".to_string()));
    }
}
