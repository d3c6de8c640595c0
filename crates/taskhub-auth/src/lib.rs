//! # taskhub-auth
//!
//! Authentication building blocks: JWT claims, encoder and decoder, the
//! in-memory logout blocklist, and Argon2id password hashing.

pub mod blocklist;
pub mod jwt;
pub mod password;

pub use blocklist::TokenBlocklist;
pub use jwt::claims::{Claims, TokenType};
pub use jwt::decoder::JwtDecoder;
pub use jwt::encoder::{JwtEncoder, TokenPair};
pub use password::hasher::PasswordHasher;
