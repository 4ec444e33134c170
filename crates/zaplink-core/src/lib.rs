//! Text utilities for the zaplink messaging stack.
//!
//! This crate is intentionally client-agnostic. The concrete chat client lives
//! behind the `ChatClient` port implemented in the `zaplink-client` crate; the
//! pieces here (letter normalization, text formatters) are pure and have no
//! dependency on it.

pub mod errors;
pub mod formatting;
pub mod logging;
pub mod normalizer;

pub use errors::{Error, Result};
