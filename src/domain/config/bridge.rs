// Copyright 2025 JiangLong.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Service configuration loaded from TOML

use crate::infrastructure::constants::{
    CONF_FILE_ENV, DEFAULT_HOST, DEFAULT_NAMESPACE, DEFAULT_PORT, DEFAULT_SHUTDOWN_TIMEOUT_SECS,
    DEFAULT_WORKERS,
};
use crate::shared::error::{BridgeError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs::read_to_string;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BridgeConf {
    pub server: ServerConf,
    pub admin: AdminConf,
    pub kubernetes: KubernetesConf,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConf {
    pub host: String,
    pub port: u16,
    pub workers: usize,
    pub shutdown_timeout_secs: u64,
}

impl Default for ServerConf {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            workers: DEFAULT_WORKERS,
            shutdown_timeout_secs: DEFAULT_SHUTDOWN_TIMEOUT_SECS,
        }
    }
}

impl ServerConf {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AdminConf {
    pub instance: InstanceAdminConf,
}

/// Gates `POST /admin/instance/disable`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InstanceAdminConf {
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct KubernetesConf {
    pub namespace: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kubeconfig: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl Default for KubernetesConf {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            kubeconfig: None,
            context: None,
        }
    }
}

impl BridgeConf {
    /// Load configuration from TOML file
    pub fn from<T: AsRef<str>>(path: T) -> Result<Self> {
        let content = read_to_string(path.as_ref()).map_err(|e| {
            BridgeError::config_error(format!(
                "Failed to read config file {}: {}",
                path.as_ref(),
                e
            ))
        })?;

        let conf: Self = toml::from_str(&content)?;
        Ok(conf)
    }

    /// Explicit path first, then `KUBE_BRIDGE_CONF_FILE`, then defaults.
    pub fn load(path: Option<&str>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from(path);
        }

        match std::env::var(CONF_FILE_ENV) {
            Ok(env_path) if !env_path.is_empty() => Self::from(env_path),
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.server.host.trim().is_empty() {
            return Err(BridgeError::config_error("server.host must not be empty"));
        }

        if self.server.workers == 0 {
            return Err(BridgeError::config_error("server.workers must be > 0"));
        }

        if !is_valid_namespace(&self.kubernetes.namespace) {
            return Err(BridgeError::config_error(format!(
                "Invalid kubernetes.namespace: {}",
                self.kubernetes.namespace
            )));
        }

        Ok(())
    }
}

/// RFC 1123 label, the rule Kubernetes applies to namespace names.
pub fn is_valid_namespace(name: &str) -> bool {
    name.len() <= 63
        && Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?$").is_ok_and(|re| re.is_match(name))
}
