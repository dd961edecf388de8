//! Model provider implementations.
//!
//! Providers implement the [`Model`](common::Model) trait over a concrete
//! hosted API. The [`mock`] provider backs tests.

pub mod common;
pub mod dashscope;
pub mod mock;

pub use common::{FromEnv, GenerateOptions, Model, ModelResponse, TokenUsage};
pub use mock::MockModel;
