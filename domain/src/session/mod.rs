//! Session identity and per-operation status

pub mod identity;
pub mod status;
