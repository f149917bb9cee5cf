//! Configuration
//!
//! Two sources, read once at startup:
//! - `forta.config.json`: the global `~/.forta/forta.config.json` merged
//!   with the project file (or the `--config` path), project keys winning
//! - the scanner environment (`JSON_RPC_HOST`, `NODE_ENV`, ...)

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::ConfigError;

/// Default project config file name.
pub const CONFIG_FILE_NAME: &str = "forta.config.json";
/// Public RPC used when nothing else is configured.
pub const DEFAULT_JSON_RPC_URL: &str = "https://cloudflare-eth.com/";
/// Forta GraphQL endpoint.
pub const DEFAULT_FORTA_API_URL: &str = "https://api.forta.network/graphql";
/// RPC used to reach the dispatch contract.
pub const DEFAULT_POLYGON_RPC_URL: &str = "https://polygon-rpc.com";

/// Contents of `forta.config.json`. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FortaConfig {
    pub agent_id: Option<String>,
    pub json_rpc_url: Option<String>,
    pub forta_api_url: Option<String>,
    pub forta_api_key: Option<String>,
    pub private_findings: Option<bool>,
    pub debug: Option<bool>,
    pub trace_rpc_url: Option<String>,
    pub polygon_rpc_url: Option<String>,
}

impl FortaConfig {
    /// Load from the default locations.
    ///
    /// `config_flag` is the value of `--config`, resolved against the current
    /// directory. Missing files are skipped.
    pub fn load(config_flag: Option<&Path>) -> Result<Self, ConfigError> {
        let local = std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(config_flag.unwrap_or_else(|| Path::new(CONFIG_FILE_NAME)));
        Self::load_from(global_config_path().as_deref(), &local)
    }

    /// Merge `global` then `local`; top-level keys in `local` win.
    pub fn load_from(global: Option<&Path>, local: &Path) -> Result<Self, ConfigError> {
        let mut merged = Map::new();
        for path in global.into_iter().chain(std::iter::once(local)) {
            if let Some(object) = read_object(path)? {
                debug!(path = %path.display(), keys = object.len(), "loaded config file");
                merged.extend(object);
            }
        }

        serde_json::from_value(Value::Object(merged)).map_err(|source| ConfigError::Parse {
            path: local.display().to_string(),
            source,
        })
    }
}

fn global_config_path() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(|home| PathBuf::from(home).join(".forta").join(CONFIG_FILE_NAME))
}

fn read_object(path: &Path) -> Result<Option<Map<String, Value>>, ConfigError> {
    if !path.is_file() {
        return Ok(None);
    }
    let display = path.display().to_string();
    let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: display.clone(),
        source,
    })?;
    match serde_json::from_str(&data) {
        Ok(Value::Object(object)) => Ok(Some(object)),
        Ok(_) => Err(ConfigError::NotAnObject(display)),
        Err(source) => Err(ConfigError::Parse {
            path: display,
            source,
        }),
    }
}

/// Scanner-provided environment, captured once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeEnv {
    pub json_rpc_host: Option<String>,
    pub json_rpc_port: Option<String>,
    pub node_env: Option<String>,
    pub forta_api_key: Option<String>,
    pub forta_api_url: Option<String>,
}

impl RuntimeEnv {
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());
        Self {
            json_rpc_host: var("JSON_RPC_HOST"),
            json_rpc_port: var("JSON_RPC_PORT"),
            node_env: var("NODE_ENV"),
            forta_api_key: var("FORTA_API_KEY"),
            forta_api_url: var("FORTA_API_URL"),
        }
    }

    /// Whether the bot runs inside a scan node.
    pub fn is_production(&self) -> bool {
        self.node_env.as_deref() == Some("production")
    }

    /// The scanner's RPC if provided, else `jsonRpcUrl`, else the public default.
    pub fn json_rpc_url(&self, config: &FortaConfig) -> Result<String, ConfigError> {
        if let Some(host) = &self.json_rpc_host {
            return Ok(match &self.json_rpc_port {
                Some(port) => format!("http://{host}:{port}"),
                None => format!("http://{host}"),
            });
        }
        match &config.json_rpc_url {
            None => Ok(DEFAULT_JSON_RPC_URL.to_string()),
            Some(url) if url.starts_with("http") => Ok(url.clone()),
            Some(_) => Err(ConfigError::InvalidJsonRpcUrl),
        }
    }

    pub fn forta_api_url(&self, config: &FortaConfig) -> String {
        self.forta_api_url
            .clone()
            .or_else(|| config.forta_api_url.clone())
            .unwrap_or_else(|| DEFAULT_FORTA_API_URL.to_string())
    }

    pub fn forta_api_key(&self, config: &FortaConfig) -> Option<String> {
        self.forta_api_key
            .clone()
            .or_else(|| config.forta_api_key.clone())
    }

    pub fn polygon_rpc_url(&self, config: &FortaConfig) -> String {
        config
            .polygon_rpc_url
            .clone()
            .unwrap_or_else(|| DEFAULT_POLYGON_RPC_URL.to_string())
    }
}
