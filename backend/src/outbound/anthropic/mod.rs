//! Anthropic Messages API adapter for literature narration.

mod dto;
mod http_narrator;

pub use http_narrator::{AnthropicNarrator, DEFAULT_MODEL};
