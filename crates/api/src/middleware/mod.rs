//! Authentication middleware extractors.
//!
//! - [`auth::AuthActor`] -- extracts the authenticated actor, rejecting
//!   missing, revoked, expired, and malformed tokens with 401.

pub mod auth;
