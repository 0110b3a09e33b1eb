//! Filesystem backend for the postlens content store.
//!
//! Each collection is one pretty-printed JSON document in a base directory.
//! Documents are replaced whole via a temp file and an atomic rename, so a
//! reader never sees a half-written file.

mod files;
mod store;

pub use postlens_core::{Error, Result};
pub use store::FsStore;

#[cfg(test)]
mod tests;
