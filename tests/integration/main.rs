//! Integration test harness.
//!
//! Each test spins up a real HTTP server on an ephemeral port backed by
//! the in-memory repositories, and drives it with the client crate.

mod helpers;

mod auth_test;
mod refresh_test;
mod task_test;
