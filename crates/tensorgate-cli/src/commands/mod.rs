//! CLI command implementations

pub mod config_cmd;
pub mod contract;
pub mod validate;

pub use config_cmd::ConfigCommand;
pub use contract::ContractCommand;
pub use validate::ValidateCommand;
