//! Assorted types, not limited to any part of the library.

pub mod err;
