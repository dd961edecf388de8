//! Vigil - visual inspection via hosted vision-language models
//!
//! This crate pairs a fixed inspection instruction with a base64-encoded
//! image, sends the conversation to a hosted multimodal model, and returns
//! the model's textual verdict.
//!
//! # Example
//!
//! ```rust,ignore
//! use vigil::prelude::*;
//! use vigil::providers::dashscope::DashScopeClient;
//!
//! let image = EncodedImage::load("site/helmet.webp").await?;
//! let model = DashScopeClient::from_env().multimodal_model("qwen3-vl-plus");
//! let response = model
//!     .generate(InspectionTask::HelmetPresence.conversation(&image), GenerateOptions::default())
//!     .await?;
//! println!("{}", response.text().unwrap_or("<no answer>"));
//! ```

pub mod error;
pub mod inspect;
pub mod media;
pub mod message;
pub mod prelude;
pub mod providers;

pub use error::{EncodeError, Error, LlmError, Result};
pub use inspect::{InspectionTask, build_conversation};
pub use media::{EncodedImage, ImageFormat};
pub use message::{ChatMessage, MessageContent, MessageRole};
