//! The `mender.conf` configuration file.
//!
//! Configuration files are JSON documents.  Loading a file overlays the keys
//! it contains onto the current settings, which is how the primary
//! configuration file refines the fallback one.
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::paths::Paths;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerEntry {
    #[serde(rename = "ServerURL", default)]
    pub server_url: String,
}

/// The file backed settings of the agent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Settings {
    #[serde(rename = "ServerURL")]
    pub server_url: Option<String>,
    pub tenant_token: Option<String>,
    pub server_certificate: Option<PathBuf>,
    #[serde(default)]
    pub servers: Vec<ServerEntry>,
    pub update_poll_interval_seconds: Option<u64>,
    pub inventory_poll_interval_seconds: Option<u64>,
    pub retry_poll_interval_seconds: Option<u64>,
    pub device_type_file: Option<PathBuf>,
    pub artifact_verify_key: Option<PathBuf>,
}

/// One configuration file as found on disk.  Absent keys stay `None` so
/// they don't override what an earlier file set.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SettingsLayer {
    #[serde(rename = "ServerURL")]
    server_url: Option<String>,
    tenant_token: Option<String>,
    server_certificate: Option<PathBuf>,
    servers: Option<Vec<ServerEntry>>,
    update_poll_interval_seconds: Option<u64>,
    inventory_poll_interval_seconds: Option<u64>,
    retry_poll_interval_seconds: Option<u64>,
    device_type_file: Option<PathBuf>,
    artifact_verify_key: Option<PathBuf>,
}

impl Settings {
    fn overlay(&mut self, layer: SettingsLayer) {
        fn set<T>(target: &mut Option<T>, value: Option<T>) {
            if value.is_some() {
                *target = value;
            }
        }
        set(&mut self.server_url, layer.server_url);
        set(&mut self.tenant_token, layer.tenant_token);
        set(&mut self.server_certificate, layer.server_certificate);
        if let Some(servers) = layer.servers {
            self.servers = servers;
        }
        set(
            &mut self.update_poll_interval_seconds,
            layer.update_poll_interval_seconds,
        );
        set(
            &mut self.inventory_poll_interval_seconds,
            layer.inventory_poll_interval_seconds,
        );
        set(
            &mut self.retry_poll_interval_seconds,
            layer.retry_poll_interval_seconds,
        );
        set(&mut self.device_type_file, layer.device_type_file);
        set(&mut self.artifact_verify_key, layer.artifact_verify_key);
    }
}

/// The runtime configuration of the agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenderConfig {
    /// Where the agent keeps its state.  Only changed from the command line.
    pub data_store_dir: PathBuf,
    pub settings: Settings,
}

impl MenderConfig {
    pub fn new(paths: &Paths) -> MenderConfig {
        MenderConfig {
            data_store_dir: paths.data_store.clone(),
            settings: Settings::default(),
        }
    }

    /// Reads a configuration file and overlays it onto the current settings.
    ///
    /// The file is parsed completely before anything is applied, a failed
    /// load leaves the settings as they were.
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        self.load_str(&contents)?;
        log::debug!("Loaded configuration file {}", path.display());
        Ok(())
    }

    /// Like [`load_file`](Self::load_file) for an in-memory document.
    pub fn load_str(&mut self, contents: &str) -> Result<()> {
        let layer: SettingsLayer = serde_json::from_str(contents)?;
        self.settings.overlay(layer);
        Ok(())
    }

    /// Checks the loaded settings for contradictions.
    pub fn validate_config(&self) -> bool {
        let settings = &self.settings;
        if settings.server_url.is_some() && !settings.servers.is_empty() {
            log::error!(
                "In configuration: don't specify both Servers field AND the corresponding \
                 fields in base structure (i.e. ServerURL)."
            );
            return false;
        }
        if settings
            .servers
            .iter()
            .any(|server| server.server_url.is_empty())
        {
            log::error!("In configuration: Servers entry without a ServerURL.");
            return false;
        }
        if settings.server_url.is_none() && settings.servers.is_empty() {
            log::warn!("Server entries missing from configuration.");
        }
        true
    }

    /// Throws away everything loaded from configuration files.
    pub fn reset(&mut self) {
        self.settings = Settings::default();
    }

    /// The server URLs, from either `ServerURL` or `Servers`.
    pub fn server_urls(&self) -> Vec<&str> {
        match self.settings.server_url {
            Some(ref url) => vec![url.as_str()],
            None => self
                .settings
                .servers
                .iter()
                .map(|server| server.server_url.as_str())
                .collect(),
        }
    }
}
