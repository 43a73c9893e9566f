//! Core logic for the unreplied-questions digest bot.
//!
//! The chat platform lives behind ports (traits) implemented in adapter crates;
//! this crate only knows about settings, messages and the digest text.

pub mod app;
pub mod config;
pub mod digest;
pub mod domain;
pub mod errors;
pub mod filter;
pub mod logging;
pub mod ports;
pub mod settings;

pub use errors::{Error, Result, RunError};
