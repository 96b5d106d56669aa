//! rocky-model
//!
//! Generative-model proxy and external interaction lookup over HTTP.
//! Everything returned from here is untrusted and goes through
//! `rocky_core::untrusted` before the engine sees it.

pub mod client;
pub mod error;
pub mod gemini;
mod http;
pub mod json;
pub mod lookup;
pub mod openai;
pub mod prompt;
pub mod provider;
