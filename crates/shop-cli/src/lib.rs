//! Library side of the `shopcsv` command-line tool.
//!
//! The binary parses arguments and prints; everything with state or I/O
//! semantics lives here so it can be tested.

pub mod config;
pub mod logging;
pub mod registry;
pub mod session;
