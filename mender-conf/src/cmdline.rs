//! Bootstrapping the configuration from the command line.
use std::path::PathBuf;

use mender_cmdline::{CmdlineOptionsIterator, OptionSpec};

use crate::config::MenderConfig;
use crate::error::Result;
use crate::logging::{string_to_log_level, LogLevel, Logger};
use crate::paths::Paths;

/// The options understood by [`MenderConfig::process_cmdline_args`].
pub const VALUE_OPTIONS: &[&str] = &[
    "--config",
    "-c",
    "--fallback-config",
    "-b",
    "--data",
    "-d",
    "--log-file",
    "-L",
    "--log-level",
    "-l",
];

/// Returns the option spec of the bootstrap command line.
pub fn option_spec() -> OptionSpec {
    OptionSpec::from_sets(VALUE_OPTIONS.iter().copied(), std::iter::empty::<&str>())
}

/// The settings picked up from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdlineSettings {
    pub config_path: PathBuf,
    pub fallback_config_path: PathBuf,
    /// `None` unless given on the command line.
    pub data_store_dir: Option<PathBuf>,
    /// `None` means logging to stderr.
    pub log_file: Option<PathBuf>,
    pub log_level: String,
}

impl CmdlineSettings {
    /// The settings when nothing is given on the command line.
    pub fn new(paths: &Paths) -> CmdlineSettings {
        CmdlineSettings {
            config_path: paths.conf_file.clone(),
            fallback_config_path: paths.fallback_conf_file.clone(),
            data_store_dir: None,
            log_file: None,
            log_level: LogLevel::default().to_string(),
        }
    }

    /// Parses the arguments (without program name).
    ///
    /// When an option is given more than once the last one wins.  Positional
    /// arguments and the `--` marker are accepted and ignored.
    pub fn collect<I, S>(args: I, paths: &Paths) -> Result<CmdlineSettings>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut settings = CmdlineSettings::new(paths);
        for opt_val in CmdlineOptionsIterator::new(args, option_spec()) {
            let opt_val = opt_val?;
            match opt_val.option.as_str() {
                "--config" | "-c" => settings.config_path = opt_val.value.into(),
                "--fallback-config" | "-b" => {
                    settings.fallback_config_path = opt_val.value.into()
                }
                "--data" | "-d" => settings.data_store_dir = Some(opt_val.value.into()),
                "--log-file" | "-L" => settings.log_file = Some(opt_val.value.into()),
                "--log-level" | "-l" => settings.log_level = opt_val.value,
                _ => {}
            }
        }
        Ok(settings)
    }
}

impl MenderConfig {
    /// Applies the command line and loads the configuration files.
    ///
    /// Invalid options, a log file that can't be opened and an unknown log
    /// level are errors.  Configuration files that are missing, broken or
    /// invalid are not: the fallback file is loaded first, then the primary
    /// file on top of it, and whichever fails to load or validate resets
    /// the settings to the defaults.
    pub fn process_cmdline_args<I, S>(
        &mut self,
        args: I,
        paths: &Paths,
        logger: &mut dyn Logger,
    ) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let cmdline = CmdlineSettings::collect(args, paths)?;

        if let Some(ref log_file) = cmdline.log_file {
            logger.setup_file_logging(log_file, true)?;
        }
        logger.set_level(string_to_log_level(&cmdline.log_level)?);

        if let Some(data_store_dir) = cmdline.data_store_dir {
            self.data_store_dir = data_store_dir;
        }

        for path in [&cmdline.fallback_config_path, &cmdline.config_path] {
            match self.load_file(path) {
                Ok(()) if self.validate_config() => {}
                Ok(()) => {
                    log::warn!(
                        "Configuration file {} is invalid, using defaults",
                        path.display()
                    );
                    self.reset();
                }
                Err(err) => {
                    log::info!(
                        "Could not load configuration file {}: {}",
                        path.display(),
                        err
                    );
                    self.reset();
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::{option_spec, CmdlineSettings};
    use crate::paths::Paths;
    use mender_cmdline::Arity;
    use std::path::PathBuf;

    #[test]
    fn test_option_spec() {
        let spec = option_spec();
        assert_eq!(spec.arity("--config"), Some(Arity::RequiresValue));
        assert_eq!(spec.arity("-l"), Some(Arity::RequiresValue));
        assert_eq!(spec.arity("--version"), None);
    }

    #[test]
    fn test_defaults() {
        let paths = Paths::default();
        let settings = CmdlineSettings::collect(Vec::<String>::new(), &paths).unwrap();
        assert_eq!(settings, CmdlineSettings::new(&paths));
        assert_eq!(
            settings.config_path,
            PathBuf::from("/etc/mender/mender.conf")
        );
        assert_eq!(
            settings.fallback_config_path,
            PathBuf::from("/var/lib/mender/mender.conf")
        );
        assert_eq!(settings.log_level, "info");
    }
}
