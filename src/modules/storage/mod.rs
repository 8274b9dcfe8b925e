//! Storage module for attachment files
//!
//! Provides a local filesystem store that writes uploads under a configured
//! directory and hands back the public path they are served from.

mod local_storage;

pub use local_storage::LocalFileStore;
