//! Remote actor adapters
//!
//! Implementations of the `RemoteActorClient` port: an HTTP adapter that
//! speaks the backend envelope protocol, and an offline adapter that runs
//! entirely in process.

pub mod http;
pub mod offline;
