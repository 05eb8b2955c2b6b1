//! Repositories for database operations

pub mod sweet;
pub mod user;

pub use sweet::SweetRepository;
pub use user::UserRepository;
