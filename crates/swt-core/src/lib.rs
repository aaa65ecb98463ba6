//! Summary grading model, local scoring engine, and grader traits.
//!
//! This crate defines the result envelope, the offline heuristic scorer,
//! and the remote grader contract that the rest of swt builds on.

pub mod config;
pub mod engine;
pub mod error;
pub mod local;
pub mod model;
pub mod parser;
pub mod traits;

pub use config::ScoringConfig;
pub use engine::GradingEngine;
pub use error::GraderError;
pub use local::{Lexicon, LocalScorer};
pub use model::{Passage, ScoreResult, ScoringMode};
