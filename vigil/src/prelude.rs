//! Commonly used types, re-exported for convenient glob import.
//!
//! ```rust,ignore
//! use vigil::prelude::*;
//! ```

pub use crate::error::{EncodeError, Error, LlmError, LlmErrorKind, Result};
pub use crate::inspect::{InspectionTask, build_conversation};
pub use crate::media::{EncodedImage, ImageFormat};
pub use crate::message::{ChatMessage, MessageContent, MessageRole};
pub use crate::providers::{FromEnv, GenerateOptions, Model, ModelResponse, TokenUsage};
