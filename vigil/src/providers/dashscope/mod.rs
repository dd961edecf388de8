//! DashScope provider implementation.
//!
//! Provides access to the DashScope multimodal generation API (Qwen-VL
//! family) through the native conversation format.

mod client;
mod generation;

pub use client::{
    DASHSCOPE_API_BASE_URL, DASHSCOPE_INTL_API_BASE_URL, DashScopeClient, DashScopeClientBuilder,
};
pub use generation::MultiModalModel;
