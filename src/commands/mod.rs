//! Command handlers for the CLI
//!
//! - `nodes`: print builtin registry contents and node lookups
//!
//! `serve` goes straight to [`crate::server::serve`].

pub mod nodes;
