//! Gemini REST client adapter.

mod adapter;
pub mod types;

pub use adapter::GeminiClientAdapter;
