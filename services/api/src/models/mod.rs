//! Request, response, and entity models for the Sweet Shop API

pub mod sweet;
pub mod user;

// Re-export for convenience
pub use sweet::{NewSweet, RestockRequest, Sweet, SweetPatch, SweetSearch};
pub use user::{AuthResponse, LoginRequest, NewUser, RegisterRequest, Role, User, UserResponse};
