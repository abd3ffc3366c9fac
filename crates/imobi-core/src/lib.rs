//! IMOBI Core: shared domain types for the multi-tenant listing backend.

pub mod error;
pub mod models;
pub mod repository;
