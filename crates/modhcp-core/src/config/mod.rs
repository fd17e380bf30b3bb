//! # modhcp Configuration
//!
//! Locates, reads and validates the configuration document. The document has
//! an optional `server4` and an optional `server6` section (at least one is
//! required), each with listen addresses and an ordered list of plugin
//! entries:
//!
//! ```yaml
//! server4:
//!   listen: ["0.0.0.0:67"]
//!   plugins:
//!     - serverid: 10.0.0.1
//!     - range: 10.0.0.100 10.0.0.200 60s
//! ```
//!
//! JSON is always supported; YAML and TOML sit behind the `yaml-config` and
//! `toml-config` features.
pub mod error;

use std::collections::{BTreeMap, HashSet};
use std::env;
use std::fmt;
use std::fs;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

use serde::Deserialize;

pub use error::ConfigError;

use crate::kernel::constants;
use crate::plugin_system::traits::AddressFamily;

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// JSON format (.json)
    Json,
    /// YAML format (.yaml, .yml) - requires "yaml-config" feature
    #[cfg(feature = "yaml-config")]
    Yaml,
    /// TOML format (.toml) - requires "toml-config" feature
    #[cfg(feature = "toml-config")]
    Toml,
}

impl ConfigFormat {
    /// Determine format from file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| match ext.to_lowercase().as_str() {
                "json" => Some(ConfigFormat::Json),
                #[cfg(feature = "yaml-config")]
                "yaml" | "yml" => Some(ConfigFormat::Yaml),
                #[cfg(feature = "toml-config")]
                "toml" => Some(ConfigFormat::Toml),
                _ => None,
            })
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigFormat::Json => f.write_str("JSON"),
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => f.write_str("YAML"),
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => f.write_str("TOML"),
        }
    }
}

/// A plugin enabled for one server, with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginEntry {
    pub name: String,
    pub args: Vec<String>,
}

/// Settings for one server family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub listen: Vec<SocketAddr>,
    /// In document order
    pub plugins: Vec<PluginEntry>,
}

impl ServerConfig {
    pub fn plugin(&self, name: &str) -> Option<&PluginEntry> {
        self.plugins.iter().find(|p| p.name == name)
    }
}

/// Validated configuration document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub server4: Option<ServerConfig>,
    pub server6: Option<ServerConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    server4: Option<RawServerConfig>,
    server6: Option<RawServerConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawServerConfig {
    #[serde(default)]
    listen: Vec<String>,
    #[serde(default)]
    plugins: Vec<BTreeMap<String, serde_json::Value>>,
}

impl Config {
    /// Parse and validate a document in the given format.
    pub fn from_str_with_format(data: &str, format: ConfigFormat) -> Result<Self, ConfigError> {
        Self::parse(data, format, "<inline>")
    }

    /// Read, parse and validate the file at `path`; the format comes from
    /// its extension.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let format = ConfigFormat::from_path(path).ok_or_else(|| ConfigError::UnsupportedFormat {
            path: path.to_path_buf(),
        })?;
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&data, format, &path.display().to_string())
    }

    fn parse(data: &str, format: ConfigFormat, origin: &str) -> Result<Self, ConfigError> {
        let deserialize_error = |source: Box<dyn std::error::Error + Send + Sync>| ConfigError::Deserialize {
            format,
            origin: origin.to_string(),
            source,
        };
        let raw: RawConfig = match format {
            ConfigFormat::Json => serde_json::from_str(data).map_err(|e| deserialize_error(Box::new(e)))?,
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => serde_yaml::from_str(data).map_err(|e| deserialize_error(Box::new(e)))?,
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => toml::from_str(data).map_err(|e| deserialize_error(Box::new(e)))?,
        };
        Self::validate(raw)
    }

    fn validate(raw: RawConfig) -> Result<Self, ConfigError> {
        if raw.server4.is_none() && raw.server6.is_none() {
            return Err(ConfigError::invalid(
                "need at least one of 'server4' or 'server6'",
            ));
        }
        let server4 = raw
            .server4
            .map(|section| validate_section(section, AddressFamily::V4))
            .transpose()?;
        let server6 = raw
            .server6
            .map(|section| validate_section(section, AddressFamily::V6))
            .transpose()?;
        Ok(Config { server4, server6 })
    }

    pub fn server(&self, family: AddressFamily) -> Option<&ServerConfig> {
        match family {
            AddressFamily::V4 => self.server4.as_ref(),
            AddressFamily::V6 => self.server6.as_ref(),
        }
    }

    /// Configured servers, v4 first
    pub fn servers(&self) -> impl Iterator<Item = (AddressFamily, &ServerConfig)> {
        [AddressFamily::V4, AddressFamily::V6]
            .into_iter()
            .filter_map(move |family| self.server(family).map(|s| (family, s)))
    }
}

fn default_listen(family: AddressFamily) -> SocketAddr {
    match family {
        AddressFamily::V4 => SocketAddr::new(IpAddr::from([0, 0, 0, 0]), constants::DHCPV4_SERVER_PORT),
        AddressFamily::V6 => SocketAddr::new(IpAddr::from([0u16; 8]), constants::DHCPV6_SERVER_PORT),
    }
}

/// Accepts `ip`, `ip:port` and `[ipv6]:port`.
fn parse_listen(value: &str, family: AddressFamily) -> Result<SocketAddr, ConfigError> {
    let addr = match value.parse::<SocketAddr>() {
        Ok(addr) => addr,
        Err(_) => {
            let ip: IpAddr = value
                .parse()
                .map_err(|_| ConfigError::invalid(format!("invalid listen address '{}'", value)))?;
            SocketAddr::new(ip, default_listen(family).port())
        }
    };
    let matches_family = match family {
        AddressFamily::V4 => addr.is_ipv4(),
        AddressFamily::V6 => addr.is_ipv6(),
    };
    if !matches_family {
        return Err(ConfigError::invalid(format!(
            "listen address '{}' is not a {} address",
            value, family
        )));
    }
    Ok(addr)
}

fn parse_plugin_entry(
    entry: BTreeMap<String, serde_json::Value>,
    family: AddressFamily,
) -> Result<PluginEntry, ConfigError> {
    if entry.len() != 1 {
        return Err(ConfigError::invalid(format!(
            "{} plugin entries must have exactly one key, got {}",
            family,
            entry.len()
        )));
    }
    let Some((name, value)) = entry.into_iter().next() else {
        return Err(ConfigError::invalid("empty plugin entry"));
    };
    let args_line = match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        other => {
            return Err(ConfigError::invalid(format!(
                "arguments of plugin '{}' must be a string, got {}",
                name, other
            )))
        }
    };
    Ok(PluginEntry {
        name,
        args: args_line.split_whitespace().map(str::to_string).collect(),
    })
}

fn validate_section(raw: RawServerConfig, family: AddressFamily) -> Result<ServerConfig, ConfigError> {
    let listen = if raw.listen.is_empty() {
        vec![default_listen(family)]
    } else {
        raw.listen
            .iter()
            .map(|value| parse_listen(value, family))
            .collect::<Result<Vec<_>, _>>()?
    };

    let mut seen = HashSet::new();
    let mut plugins = Vec::with_capacity(raw.plugins.len());
    for entry in raw.plugins {
        let entry = parse_plugin_entry(entry, family)?;
        if !seen.insert(entry.name.clone()) {
            return Err(ConfigError::invalid(format!(
                "plugin '{}' is listed more than once for {}",
                entry.name, family
            )));
        }
        plugins.push(entry);
    }

    Ok(ServerConfig { listen, plugins })
}

/// Source of the configuration document.
pub trait ConfigLoader {
    fn load(&self) -> Result<Config, ConfigError>;
}

/// Loads the configuration from an explicit file or the default search path.
#[derive(Debug, Clone)]
pub struct FileConfigLoader {
    explicit: Option<PathBuf>,
    search_paths: Vec<PathBuf>,
}

impl FileConfigLoader {
    /// Use `path` if given, otherwise the default search path.
    pub fn new(path: Option<PathBuf>) -> Self {
        Self {
            explicit: path,
            search_paths: default_search_paths(),
        }
    }

    pub fn with_search_paths(search_paths: Vec<PathBuf>) -> Self {
        Self {
            explicit: None,
            search_paths,
        }
    }

    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }
}

impl ConfigLoader for FileConfigLoader {
    fn load(&self) -> Result<Config, ConfigError> {
        if let Some(path) = &self.explicit {
            log::info!("Loading configuration from {}", path.display());
            return Config::from_path(path);
        }
        for candidate in &self.search_paths {
            if candidate.is_file() {
                log::info!("Loading configuration from {}", candidate.display());
                return Config::from_path(candidate);
            }
            log::debug!("No configuration at {}", candidate.display());
        }
        Err(ConfigError::NotFound {
            searched: self.search_paths.clone(),
        })
    }
}

/// `./config.yml`, `$XDG_CONFIG_HOME/modhcp/`, `$HOME/.modhcp/`, `/etc/modhcp/`.
pub fn default_search_paths() -> Vec<PathBuf> {
    let file = constants::CONFIG_FILE_NAME;
    let mut paths = vec![PathBuf::from(".").join(file)];
    if let Some(xdg) = env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
        paths.push(PathBuf::from(xdg).join(constants::APP_NAME).join(file));
    }
    if let Some(home) = env::var_os("HOME").filter(|v| !v.is_empty()) {
        paths.push(PathBuf::from(home).join(constants::CONFIG_DIR_NAME).join(file));
    }
    paths.push(PathBuf::from(constants::SYSTEM_CONFIG_DIR).join(file));
    paths
}
