//! Core types and trait definitions for the postlens content store.
//!
//! This crate is deliberately free of HTTP and filesystem dependencies.
//! Storage backends implement [`store::ContentStore`]; the query and API
//! crates depend on this abstraction, not on any concrete backend.

pub mod cache;
pub mod compat;
pub mod error;
pub mod memory;
pub mod post;
pub mod store;
pub mod thread;
pub mod urn;

pub use error::{Error, Result};
pub use urn::PostUrn;
