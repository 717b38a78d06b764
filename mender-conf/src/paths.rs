//! Default locations of the agent's files.
//!
//! The three base directories can be moved with environment variables, all
//! other paths are derived from them.  The environment is read once when
//! [`Paths`] is created; the resulting value is then handed to whoever
//! needs it.
use std::path::PathBuf;

pub const CONF_DIR_VAR: &str = "MENDER_CONF_DIR";
pub const DATA_DIR_VAR: &str = "MENDER_DATA_DIR";
pub const DATASTORE_DIR_VAR: &str = "MENDER_DATASTORE_DIR";

pub const DEFAULT_CONF_DIR: &str = "/etc/mender";
pub const DEFAULT_DATA_DIR: &str = "/usr/share/mender";
pub const DEFAULT_DATASTORE_DIR: &str = "/var/lib/mender";

pub const DEFAULT_KEY_FILE: &str = "mender-agent.pem";
pub const CONF_FILE_NAME: &str = "mender.conf";

/// Returns the value of an environment variable or `default_value` if it
/// is not set.
pub fn get_env(var_name: &str, default_value: &str) -> String {
    std::env::var_os(var_name)
        .map(|value| value.to_string_lossy().into_owned())
        .unwrap_or_else(|| default_value.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    pub conf_dir: PathBuf,
    pub data_dir: PathBuf,
    pub data_store: PathBuf,
    pub key_file: PathBuf,

    pub conf_file: PathBuf,
    pub fallback_conf_file: PathBuf,

    // device specific paths
    pub art_scripts: PathBuf,
    pub rootfs_scripts: PathBuf,
    pub modules: PathBuf,
    pub modules_work: PathBuf,
    pub bootstrap_artifact: PathBuf,
}

impl Default for Paths {
    fn default() -> Paths {
        Paths::from_lookup(|_| None)
    }
}

impl Paths {
    /// Reads the base directories from the process environment.
    pub fn from_env() -> Paths {
        Paths::from_lookup(|name| std::env::var_os(name).map(PathBuf::from))
    }

    /// Builds the paths with the given variable lookup.
    ///
    /// Variables the lookup doesn't know fall back to the compiled-in
    /// defaults.
    pub fn from_lookup<F>(lookup: F) -> Paths
    where
        F: Fn(&str) -> Option<PathBuf>,
    {
        let dir = |var: &str, default: &str| lookup(var).unwrap_or_else(|| PathBuf::from(default));
        Paths::with_dirs(
            dir(CONF_DIR_VAR, DEFAULT_CONF_DIR),
            dir(DATA_DIR_VAR, DEFAULT_DATA_DIR),
            dir(DATASTORE_DIR_VAR, DEFAULT_DATASTORE_DIR),
        )
    }

    /// Derives all paths from the three base directories.
    pub fn with_dirs(conf_dir: PathBuf, data_dir: PathBuf, data_store: PathBuf) -> Paths {
        Paths {
            key_file: PathBuf::from(DEFAULT_KEY_FILE),
            conf_file: conf_dir.join(CONF_FILE_NAME),
            fallback_conf_file: data_store.join(CONF_FILE_NAME),
            art_scripts: data_store.join("scripts"),
            rootfs_scripts: conf_dir.join("scripts"),
            modules: data_dir.join("modules").join("v3"),
            modules_work: data_store.join("modules").join("v3"),
            bootstrap_artifact: data_store.join("bootstrap.mender"),
            conf_dir,
            data_dir,
            data_store,
        }
    }
}
