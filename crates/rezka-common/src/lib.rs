//! Rezka-Common: Shared error and contract types.
//!
//! This crate provides the types shared between the extraction engine and
//! whatever layer serializes its results:
//!
//! - **Error Handling**: The unified [`Error`] type and [`Result`] alias
//! - **Contract Types**: The records returned to callers (content identity,
//!   translations, season catalogs, stream resolutions, listing entries)
//!
//! # Examples
//!
//! ```
//! use rezka_common::{ContentKind, Error, Result};
//!
//! fn example(kind: ContentKind) -> Result<()> {
//!     if kind == ContentKind::Series {
//!         return Err(Error::validation("season and episode are required"));
//!     }
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::*;
