//! # taskhub-database
//!
//! Repository traits plus two interchangeable backends: PostgreSQL
//! (`sqlx`) for deployments and an in-memory store for demos and tests.
//! The backend is selected from `database.backend` configuration.

pub mod connection;
pub mod database;
pub mod memory;
pub mod postgres;
pub mod repositories;

pub use database::Database;
pub use repositories::{TaskRepository, UserRepository};
