pub mod artifact;
pub mod error;
mod format;
pub mod reader;
pub mod writer;
