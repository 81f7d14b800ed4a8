//! # TensorGate CLI Library
//!
//! Command line access to the request validator.
//!
//! ## Commands
//!
//! - `validate`: Check request files against a contract file
//! - `contract`: List, show and check model contracts
//! - `config`: Show or regenerate the CLI configuration

pub mod commands;
pub mod config;
pub mod output;
pub mod utils;

pub use config::CliConfig;
