//! Command-line client and SDK for the ETLR workflows API.
//!
//! Layers, innermost first:
//! - [`domain`]: identifiers, environment declarations, response views
//! - [`application`]: environment reconciliation and the deploy use case
//! - [`infrastructure`]: HTTP client, I/O traits, dependency wiring
//! - [`cli`]: argument parsing, dispatch and terminal output

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
