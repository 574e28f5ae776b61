//! Strictly Farkle server - HTTP transport for the Farkle game manager
//!
//! Exposes one [`strictly_farkle::GameManager`] over HTTP. Every response is
//! the current game view, including the action links the client may follow
//! next.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod server;

// Crate-level exports
pub use config::{ConfigError, ServerConfig};
pub use server::{ApiError, AppState, NewGameQuery, TokenQuery, router};
