//! Common library for the Sweet Shop application
//!
//! This crate provides the infrastructure shared by the Sweet Shop
//! services: PostgreSQL connection pooling with startup retry, health
//! checks, and database error types.

pub mod database;
pub mod error;
