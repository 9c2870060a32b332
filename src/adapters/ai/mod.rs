//! AI adapter module. Implements AiPort for the generative-language provider.
//!
//! Provides the Gemini adapter and a mock adapter for offline use and testing.

pub mod gemini_adapter;
pub mod json_utils;
pub mod mock_adapter;

pub use gemini_adapter::GeminiAdapter;
pub use json_utils::sanitize_json;
pub use mock_adapter::MockAiAdapter;
