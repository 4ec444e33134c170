//! Messaging adapter: convenience helpers over an injected chat client.
//!
//! The concrete client stays behind the [`port::ChatClient`] trait so session
//! logic can be exercised against a substitute implementation. Everything here
//! is a thin pass-through: no retries, no persistence, no transport of its own.

pub mod config;
pub mod port;
pub mod session;
pub mod types;
pub mod wire;

pub use config::ClientConfig;
pub use port::ChatClient;
pub use session::ChatSession;
pub use zaplink_core::{Error, Result};
