//! HTTP request handlers, one module per resource.

pub mod captains;
pub mod users;
