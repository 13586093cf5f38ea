//! Well-known role name constants.
//!
//! These are the values carried in the `role` claim of every bearer token.

pub const ROLE_USER: &str = "user";
pub const ROLE_CAPTAIN: &str = "captain";
