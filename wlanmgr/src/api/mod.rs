//! Public API module.
//!
//! This module contains the user-facing types of the `wlanmgr` crate.

pub mod connection_manager;
pub mod models;
pub mod signal;
