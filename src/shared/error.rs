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

use crate::infrastructure::kubernetes::Operation;
use thiserror::Error;
pub type Result<T> = std::result::Result<T, BridgeError>;

#[derive(Error, Debug)]
pub enum BridgeError {
    /// The one error kind the adaptor surfaces for remote failures.
    #[error("Kubernetes operation '{operation}' failed: {source}")]
    KubernetesOperation {
        operation: Operation,
        source: kube::Error,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Kubernetes client error: {0}")]
    ClientError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("No connector has been bound to the drain controller")]
    ConnectorNotBound,

    #[error("A connector is already bound to the drain controller")]
    ConnectorAlreadyBound,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl BridgeError {
    pub fn config_error(context: impl Into<String>) -> Self {
        Self::ConfigError(context.into())
    }

    pub fn invalid_argument(context: impl Into<String>) -> Self {
        Self::InvalidArgument(context.into())
    }

    pub fn operation_failed(operation: Operation, source: kube::Error) -> Self {
        Self::KubernetesOperation { operation, source }
    }

    /// Operation that failed, if this is a wrapped Kubernetes failure.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            Self::KubernetesOperation { operation, .. } => Some(*operation),
            _ => None,
        }
    }

    /// HTTP status reported by the API server for a wrapped failure.
    pub fn api_status(&self) -> Option<u16> {
        match self {
            Self::KubernetesOperation {
                source: kube::Error::Api(ae),
                ..
            } => Some(ae.code),
            _ => None,
        }
    }
}
