//! Application state shared across handlers

use sqlx::PgPool;

use crate::{
    jwt::JwtService,
    repositories::{SweetRepository, UserRepository},
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub user_repository: UserRepository,
    pub sweet_repository: SweetRepository,
    pub jwt_service: JwtService,
}
