//! # taskhub-client
//!
//! Client-side half of TaskHub: durable token storage, an authenticated
//! request pipeline with transparent single-flight token refresh, and a
//! session controller owning the authentication state.
//!
//! The pipeline guarantees that when several requests hit a 401
//! simultaneously, exactly one refresh call is issued; the rest wait for
//! its outcome and then replay their original requests.

pub mod error;
pub mod pipeline;
pub mod refresh;
pub mod session;
pub mod store;
pub mod tasks;
pub mod types;

pub use error::ClientError;
pub use pipeline::ApiClient;
pub use session::{AuthState, SessionController};
pub use store::{FileTokenStore, MemoryTokenStore, TokenStore};
pub use tasks::TaskClient;
