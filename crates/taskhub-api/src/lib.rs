//! # taskhub-api
//!
//! HTTP API layer: router, application state, handlers, DTOs, the
//! bearer-token extractor, and the server bootstrap.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, build_state, run_server};
pub use state::AppState;
