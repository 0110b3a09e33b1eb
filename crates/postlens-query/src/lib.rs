//! Query and analytics engine for postlens.
//!
//! Everything here is a read: the free functions in each module work on
//! already-loaded records, and [`Reader`] loads through any
//! [`postlens_core::store::ContentStore`] and maps absences onto
//! [`QueryError`].

pub mod analytics;
pub mod dates;
pub mod error;
pub mod limits;
pub mod paginate;
pub mod rank;
pub mod reader;
pub mod search;

mod text;

pub use error::{Collection, ErrorKind, QueryError, Result};
pub use limits::Limits;
pub use reader::Reader;
