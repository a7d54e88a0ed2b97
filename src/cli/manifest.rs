//! YAML manifests accepted by `create` and `replace`

use crate::shared::error::{BridgeError, Result};
use k8s_openapi::api::batch::v1::Job;
use k8s_openapi::api::core::v1::{Namespace, ReplicationController, Secret, Service};
use k8s_openapi::api::networking::v1::Ingress;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde::Deserialize;

#[derive(Debug, Clone)]
pub enum Manifest {
    Ingress(Ingress),
    ReplicationController(ReplicationController),
    Service(Service),
    Secret(Secret),
    Namespace(Namespace),
    Job(Job),
}

#[derive(Deserialize)]
struct TypeMeta {
    kind: Option<String>,
}

impl Manifest {
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            BridgeError::invalid_argument(format!("Failed to read manifest {}: {}", path, e))
        })?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let value: serde_yaml::Value = serde_yaml::from_str(content)?;
        let kind = serde_yaml::from_value::<TypeMeta>(value.clone())?
            .kind
            .ok_or_else(|| BridgeError::invalid_argument("Manifest has no 'kind'"))?;

        let manifest = match kind.as_str() {
            "Ingress" => Self::Ingress(serde_yaml::from_value(value)?),
            "ReplicationController" => Self::ReplicationController(serde_yaml::from_value(value)?),
            "Service" => Self::Service(serde_yaml::from_value(value)?),
            "Secret" => Self::Secret(serde_yaml::from_value(value)?),
            "Namespace" => Self::Namespace(serde_yaml::from_value(value)?),
            "Job" => Self::Job(serde_yaml::from_value(value)?),
            other => {
                return Err(BridgeError::invalid_argument(format!(
                    "Unsupported manifest kind: {}",
                    other
                )))
            }
        };

        Ok(manifest)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Ingress(_) => "Ingress",
            Self::ReplicationController(_) => "ReplicationController",
            Self::Service(_) => "Service",
            Self::Secret(_) => "Secret",
            Self::Namespace(_) => "Namespace",
            Self::Job(_) => "Job",
        }
    }

    pub fn metadata(&self) -> &ObjectMeta {
        match self {
            Self::Ingress(o) => &o.metadata,
            Self::ReplicationController(o) => &o.metadata,
            Self::Service(o) => &o.metadata,
            Self::Secret(o) => &o.metadata,
            Self::Namespace(o) => &o.metadata,
            Self::Job(o) => &o.metadata,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.metadata().name.as_deref()
    }

    pub fn namespace(&self) -> Option<&str> {
        self.metadata().namespace.as_deref()
    }
}
