//! Common utilities for ddscope.
//!
//! This crate provides foundational types shared by the ddscope crates:
//!
//! - [`ReadExt`] - Reading fixed-layout structures from `std::io::Read` streams
//! - [`Guid`] - Windows-style GUIDs used to identify container formats

mod error;
mod guid;
mod reader;

pub use error::{Error, Result};
pub use guid::Guid;
pub use reader::ReadExt;

/// Re-export zerocopy traits for convenience
pub use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};
