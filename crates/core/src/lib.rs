//! Framework-free domain types shared across the ryde backend.

pub mod error;
pub mod roles;
pub mod types;
pub mod vehicle;
