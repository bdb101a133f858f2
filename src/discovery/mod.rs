//! MP3 file discovery

pub mod scanner;

pub use scanner::{scan, SourceFile};
