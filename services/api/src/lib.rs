//! Sweet Shop API service
//!
//! REST/JSON inventory service: password-based registration and login
//! issuing stateless bearer tokens, and role-gated CRUD plus purchase and
//! restock over sweets backed by PostgreSQL.

pub mod error;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod validation;
