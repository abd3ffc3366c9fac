//! Domain models for IMOBI.
//!
//! These are the core types shared across all crates.

pub mod broker;
pub mod profile;
