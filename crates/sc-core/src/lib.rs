//! stylecfg command-line host.
//!
//! The binary discovers a style configuration file, resolves it through
//! `sc_config`, and prints the result for the build tool or a human.

pub mod exit_codes;
pub mod logging;
pub mod output;
