//! This crate bootstraps the runtime settings of the mender agent.
//!
//! Startup goes through three steps:
//!
//! * [`Paths`] collects the default file locations, optionally moved by the
//!   `MENDER_CONF_DIR`, `MENDER_DATA_DIR` and `MENDER_DATASTORE_DIR`
//!   environment variables.
//! * The command line is parsed with [`mender_cmdline`] into
//!   [`CmdlineSettings`]: configuration file, fallback configuration file,
//!   data store directory, log file and log level.
//! * [`MenderConfig::process_cmdline_args`] applies the logging settings via a
//!   [`Logger`] and loads the fallback and then the primary configuration
//!   file.
//!
//! # Example
//!
//! ```no_run
//! use mender_conf::{Error, MenderConfig, Paths, ProcessLogger};
//!
//! fn main() -> Result<(), Error> {
//!     let paths = Paths::from_env();
//!     let mut config = MenderConfig::new(&paths);
//!     let mut logger = ProcessLogger::new();
//!     config.process_cmdline_args(["--log-level", "debug"], &paths, &mut logger)?;
//!     println!("servers: {:?}", config.server_urls());
//!     Ok(())
//! }
//! ```
//!
//! # Error Handling
//!
//! A broken command line, a log file that can't be opened and an unknown log
//! level fail the bootstrap.  Missing or invalid configuration files never do,
//! the agent then runs with the default settings.
mod cmdline;
mod config;
mod error;
mod logging;
mod paths;

pub use self::cmdline::{option_spec, CmdlineSettings, VALUE_OPTIONS};
pub use self::config::{MenderConfig, ServerEntry, Settings};
pub use self::error::{Error, Result};
pub use self::logging::{string_to_log_level, LogLevel, Logger, ProcessLogger};
pub use self::paths::{
    get_env, Paths, CONF_DIR_VAR, CONF_FILE_NAME, DATASTORE_DIR_VAR, DATA_DIR_VAR,
    DEFAULT_CONF_DIR, DEFAULT_DATASTORE_DIR, DEFAULT_DATA_DIR, DEFAULT_KEY_FILE,
};
