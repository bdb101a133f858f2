//! Metadata inference
//!
//! This module provides the trait for inference backends, the live
//! OpenAI-compatible backend, and fixed call pacing. The trait abstraction
//! allows tests to substitute a deterministic fake for the network call.

pub mod openai;
pub mod pacing;
pub mod traits;

pub use openai::OpenAiInferrer;
pub use pacing::Pacer;
pub use traits::MetadataInferrer;
