//! Core types and trait definitions for the tourdesk back office.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; storage backends implement
//! [`store::TravelStore`] and the higher layers consume it.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod fetch;
pub mod history;
pub mod loose;
pub mod rebook;
pub mod record;
pub mod search;
pub mod store;

pub use error::{Error, Result};
