//! Module containing various helper traits/functions/etc. used throughout the crate's code.

pub mod env;
pub mod error;
#[doc(hidden)]
pub mod macros;
pub mod multipart;
