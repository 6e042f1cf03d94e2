//! Gemini (Generative Language API) module
//!
//! Provides:
//! - Configuration read once from the environment at startup
//! - A client handle constructed once and shared read-only for the life of
//!   the process
//! - Text generation against `models/{model}:generateContent`

mod client;
mod types;

pub use client::GenAiClient;
pub use types::*;
