pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod policy;
pub mod resolver;
pub mod source;
pub mod ui;
pub mod verifier;

pub use error::{GateError, Result};
