//! Utility functions.

pub(crate) mod utils;
