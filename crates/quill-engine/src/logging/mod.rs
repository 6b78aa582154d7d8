//! Logging setup.
//!
//! Library code logs through the `log` facade; `init_logging` installs
//! `env_logger` as the backend.

mod init;

pub use init::{init_logging, LoggingConfig};
