//! Type definitions and constants.
//!
//! This module contains radio status codes, timing defaults and limits.

pub mod constants;
