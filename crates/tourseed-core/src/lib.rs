//! Core types and trait definitions for tour seeding.
//!
//! This crate is deliberately free of database dependencies. The reconciler,
//! the SQLite backend and the CLI all depend on it.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod catalog;
pub mod error;
pub mod model;
pub mod store;

pub use error::{Error, Result};
