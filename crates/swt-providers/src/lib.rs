//! Remote AI grader integrations.
//!
//! Implements the `AiGrader` trait for Anthropic and OpenAI-compatible APIs,
//! and loads the configuration that decides which one, if any, is used.

pub mod anthropic;
pub mod config;
mod http;
pub mod mock;
pub mod openai;

pub use anthropic::AnthropicGrader;
pub use config::{
    create_grader, default_grader, load_config, load_config_from, GraderConfig, ProviderConfig,
};
pub use mock::MockGrader;
pub use openai::OpenAiGrader;
pub use swt_core::GraderError;
