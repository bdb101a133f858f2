//! ID3 tag writing

pub mod writer;

pub use writer::write_tags;
