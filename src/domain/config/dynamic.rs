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

//! `-D key=value` overrides layered on top of the TOML file

use super::BridgeConf;
use crate::shared::error::{BridgeError, Result};
use std::collections::HashMap;
use std::str::FromStr;

pub fn parse_dynamic_configs(configs: &[String]) -> Result<HashMap<String, String>> {
    let mut map = HashMap::new();

    for config in configs {
        let Some((key, value)) = config.split_once('=') else {
            return Err(BridgeError::config_error(format!(
                "Invalid config format: '{}'. Expected 'key=value'",
                config
            )));
        };

        let key = key.trim();
        if key.is_empty() {
            return Err(BridgeError::config_error(format!(
                "Empty key in config: '{}'",
                config
            )));
        }

        map.insert(key.to_string(), value.trim().to_string());
    }

    Ok(map)
}

pub fn apply_overrides(configs: &HashMap<String, String>, conf: &mut BridgeConf) -> Result<()> {
    for (key, value) in configs {
        match key.as_str() {
            "server.host" => conf.server.host = value.clone(),
            "server.port" => conf.server.port = parse_value(key, value)?,
            "server.workers" => conf.server.workers = parse_value(key, value)?,
            "server.shutdown-timeout" => {
                conf.server.shutdown_timeout_secs = parse_value(key, value)?
            }
            "admin.instance.enabled" => conf.admin.instance.enabled = parse_value(key, value)?,
            "kubernetes.namespace" => conf.kubernetes.namespace = value.clone(),
            "kubernetes.config.file" => conf.kubernetes.kubeconfig = non_empty(value),
            "kubernetes.context" => conf.kubernetes.context = non_empty(value),
            _ => {
                return Err(BridgeError::config_error(format!(
                    "Unknown config key: '{}'",
                    key
                )))
            }
        }
    }

    Ok(())
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value.parse::<T>().map_err(|_| {
        BridgeError::config_error(format!("Invalid value for '{}': '{}'", key, value))
    })
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
