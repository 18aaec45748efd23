//! Analysis outcomes and stored records

pub mod outcome;
pub mod record;
