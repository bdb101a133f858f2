//! Sequential tagging pipeline

pub mod orchestrator;

pub use orchestrator::{run, run_with_inferrer, RunSummary};
