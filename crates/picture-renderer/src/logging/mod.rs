//! Logging setup.
//!
//! Library code only uses the `log` facade. `init_logging` is a convenience
//! for binaries and tests that want an `env_logger` backend.

mod init;

pub use init::{init_logging, LoggingConfig};
