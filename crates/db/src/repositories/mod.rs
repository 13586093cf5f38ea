pub mod captain_repo;
pub mod revoked_token_repo;
pub mod user_repo;

pub use captain_repo::CaptainRepo;
pub use revoked_token_repo::RevokedTokenRepo;
pub use user_repo::UserRepo;
