//! In-memory repository implementations.
//!
//! Used by the test suite and the zero-dependency demo mode. Data lives
//! for the lifetime of the process.

pub mod task;
pub mod user;

pub use task::MemoryTaskRepository;
pub use user::MemoryUserRepository;
