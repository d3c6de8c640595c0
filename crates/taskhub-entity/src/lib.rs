//! # taskhub-entity
//!
//! Domain entity models shared by the server and client crates.

pub mod task;
pub mod user;

pub use task::{CreateTask, Task, TaskStatus, UpdateTask};
pub use user::{CreateUser, User};
