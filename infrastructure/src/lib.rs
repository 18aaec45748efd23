//! Infrastructure layer for sentiment-console
//!
//! This crate contains the adapters that implement the application layer's
//! ports: the HTTP remote actor, an in-process offline stand-in, and
//! configuration file loading.

pub mod client;
pub mod config;

// Re-export commonly used types
pub use client::http::HttpRemoteActor;
pub use client::offline::OfflineRemoteActor;
pub use config::{ConfigLoader, FileConfig};
