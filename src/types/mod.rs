//! Data types for the table feed.

mod cell;
mod document;

pub use cell::*;
pub use document::*;
