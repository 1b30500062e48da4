//! Core internal logic for connection management.
//!
//! This module contains the single-attempt protocol, the background
//! maintenance loop and the state they share with the public manager.

pub(crate) mod attempt;
pub(crate) mod maintenance;
pub(crate) mod shared;
