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

use crate::infrastructure::kubernetes::labels::{apply_mutations, LabelMutation};
use crate::shared::error::BridgeError;
use k8s_openapi::api::batch::v1::Job;
use k8s_openapi::api::core::v1::{Namespace, Pod, ReplicationController, Secret, Service};
use k8s_openapi::api::networking::v1::Ingress;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::api::{DeleteParams, ListParams, Patch, PatchParams, PostParams};
use kube::{Api, Client};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Debug;

/// Raw cluster calls. Errors are the client's own; the adaptor normalizes them.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ClusterClient: Send + Sync {
    async fn create_ingress(&self, namespace: &str, ingress: &Ingress)
        -> Result<Ingress, kube::Error>;

    async fn replace_ingress(
        &self,
        namespace: &str,
        name: &str,
        ingress: &Ingress,
    ) -> Result<Ingress, kube::Error>;

    async fn get_ingress(&self, namespace: &str, name: &str)
        -> Result<Option<Ingress>, kube::Error>;

    async fn delete_ingress(&self, namespace: &str, name: &str) -> Result<bool, kube::Error>;

    async fn list_ingresses(&self, namespace: &str) -> Result<Vec<Ingress>, kube::Error>;

    async fn list_replication_controllers(
        &self,
        namespace: &str,
    ) -> Result<Vec<ReplicationController>, kube::Error>;

    async fn get_replication_controller(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<Option<ReplicationController>, kube::Error>;

    async fn create_replication_controller(
        &self,
        namespace: &str,
        replication_controller: &ReplicationController,
    ) -> Result<ReplicationController, kube::Error>;

    async fn replace_replication_controller(
        &self,
        namespace: &str,
        name: &str,
        replication_controller: &ReplicationController,
    ) -> Result<ReplicationController, kube::Error>;

    async fn scale_replication_controller(
        &self,
        namespace: &str,
        name: &str,
        replicas: i32,
    ) -> Result<ReplicationController, kube::Error>;

    async fn delete_replication_controller(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<bool, kube::Error>;

    async fn edit_replication_controller_template_labels(
        &self,
        namespace: &str,
        name: &str,
        mutations: &[LabelMutation],
    ) -> Result<ReplicationController, kube::Error>;

    async fn list_pods(&self, namespace: &str) -> Result<Vec<Pod>, kube::Error>;

    async fn list_pods_with_label(
        &self,
        namespace: &str,
        key: &str,
        value: &str,
    ) -> Result<Vec<Pod>, kube::Error>;

    async fn get_pod(&self, namespace: &str, name: &str) -> Result<Option<Pod>, kube::Error>;

    async fn delete_pod(&self, namespace: &str, name: &str) -> Result<bool, kube::Error>;

    async fn edit_pod_labels(
        &self,
        namespace: &str,
        name: &str,
        mutations: &[LabelMutation],
    ) -> Result<Pod, kube::Error>;

    async fn get_service(&self, namespace: &str, name: &str)
        -> Result<Option<Service>, kube::Error>;

    async fn create_service(&self, namespace: &str, service: &Service)
        -> Result<Service, kube::Error>;

    async fn replace_service(
        &self,
        namespace: &str,
        name: &str,
        service: &Service,
    ) -> Result<Service, kube::Error>;

    async fn delete_service(&self, namespace: &str, name: &str) -> Result<bool, kube::Error>;

    async fn list_services(&self, namespace: &str) -> Result<Vec<Service>, kube::Error>;

    async fn get_secret(&self, namespace: &str, name: &str) -> Result<Option<Secret>, kube::Error>;

    async fn list_secrets(&self, namespace: &str) -> Result<Vec<Secret>, kube::Error>;

    async fn create_secret(&self, namespace: &str, secret: &Secret) -> Result<Secret, kube::Error>;

    async fn delete_secret(&self, namespace: &str, name: &str) -> Result<bool, kube::Error>;

    async fn get_namespace(&self, name: &str) -> Result<Option<Namespace>, kube::Error>;

    async fn list_namespaces(&self) -> Result<Vec<Namespace>, kube::Error>;

    async fn create_namespace(&self, namespace: &Namespace) -> Result<Namespace, kube::Error>;

    async fn delete_namespace(&self, name: &str) -> Result<bool, kube::Error>;

    async fn create_job(&self, namespace: &str, job: &Job) -> Result<Job, kube::Error>;

    async fn get_job(&self, namespace: &str, name: &str) -> Result<Option<Job>, kube::Error>;

    async fn list_jobs(&self, namespace: &str) -> Result<Vec<Job>, kube::Error>;

    async fn delete_job(&self, namespace: &str, name: &str) -> Result<bool, kube::Error>;
}

pub struct KubeClusterClient {
    client: Client,
}

impl KubeClusterClient {
    pub async fn new() -> Result<Self, BridgeError> {
        let client = Client::try_default().await.map_err(|e| {
            BridgeError::ClientError(format!("Failed to create Kubernetes client: {}", e))
        })?;

        Ok(Self { client })
    }

    pub async fn new_with_config(
        kubeconfig_path: Option<String>,
        context: Option<String>,
    ) -> Result<Self, BridgeError> {
        use kube::config::{KubeConfigOptions, Kubeconfig};

        if kubeconfig_path.is_none() && context.is_none() {
            return Self::new().await;
        }

        let kubeconfig = if let Some(path) = kubeconfig_path {
            Kubeconfig::read_from(path).map_err(|e| {
                BridgeError::ClientError(format!("Failed to load kubeconfig: {}", e))
            })?
        } else {
            Kubeconfig::read().map_err(|e| {
                BridgeError::ClientError(format!("Failed to load kubeconfig: {}", e))
            })?
        };

        let config_options = KubeConfigOptions {
            context,
            cluster: None,
            user: None,
        };

        let config = kube::Config::from_custom_kubeconfig(kubeconfig, &config_options)
            .await
            .map_err(|e| {
                BridgeError::ClientError(format!("Failed to create Kubernetes config: {}", e))
            })?;

        let client = Client::try_from(config).map_err(|e| {
            BridgeError::ClientError(format!("Failed to create Kubernetes client: {}", e))
        })?;

        Ok(Self { client })
    }

    fn namespaced<K>(&self, namespace: &str) -> Api<K>
    where
        K: kube::Resource<Scope = k8s_openapi::NamespaceResourceScope>,
        <K as kube::Resource>::DynamicType: Default,
    {
        Api::namespaced(self.client.clone(), namespace)
    }
}

fn is_not_found(error: &kube::Error) -> bool {
    matches!(error, kube::Error::Api(ae) if ae.code == 404)
}

/// A 404 on read means the object does not exist.
fn found<K>(result: Result<K, kube::Error>) -> Result<Option<K>, kube::Error> {
    match result {
        Ok(object) => Ok(Some(object)),
        Err(e) if is_not_found(&e) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Deleting an object that is already gone reports `false` rather than an error.
fn deleted<T>(result: Result<T, kube::Error>) -> Result<bool, kube::Error> {
    match result {
        Ok(_) => Ok(true),
        Err(e) if is_not_found(&e) => Ok(false),
        Err(e) => Err(e),
    }
}

async fn get_if_present<K>(api: &Api<K>, name: &str) -> Result<Option<K>, kube::Error>
where
    K: kube::Resource + Clone + DeserializeOwned + Debug,
{
    found(api.get(name).await)
}

async fn delete_if_present<K>(api: &Api<K>, name: &str, dp: &DeleteParams) -> Result<bool, kube::Error>
where
    K: kube::Resource + Clone + DeserializeOwned + Debug,
{
    deleted(api.delete(name, dp).await)
}

fn replicas_patch(replicas: i32) -> serde_json::Value {
    serde_json::json!({ "spec": { "replicas": replicas } })
}

fn edit_metadata_labels(metadata: &mut ObjectMeta, mutations: &[LabelMutation]) {
    apply_mutations(
        metadata.labels.get_or_insert_with(BTreeMap::new),
        mutations,
    );
}

/// Edits the pod template labels, creating the spec, template and metadata
/// when the controller has none.
fn edit_template_labels(
    replication_controller: &mut ReplicationController,
    mutations: &[LabelMutation],
) {
    let metadata = replication_controller
        .spec
        .get_or_insert_with(Default::default)
        .template
        .get_or_insert_with(Default::default)
        .metadata
        .get_or_insert_with(Default::default);
    edit_metadata_labels(metadata, mutations);
}

async fn list_all<K>(api: &Api<K>, lp: &ListParams) -> Result<Vec<K>, kube::Error>
where
    K: kube::Resource + Clone + DeserializeOwned + Debug,
{
    api.list(lp).await.map(|list| list.items)
}

async fn replace<K>(api: &Api<K>, name: &str, object: &K) -> Result<K, kube::Error>
where
    K: kube::Resource + Clone + DeserializeOwned + Serialize + Debug,
{
    api.replace(name, &PostParams::default(), object).await
}

#[async_trait::async_trait]
impl ClusterClient for KubeClusterClient {
    async fn create_ingress(
        &self,
        namespace: &str,
        ingress: &Ingress,
    ) -> Result<Ingress, kube::Error> {
        let api: Api<Ingress> = self.namespaced(namespace);
        api.create(&PostParams::default(), ingress).await
    }

    async fn replace_ingress(
        &self,
        namespace: &str,
        name: &str,
        ingress: &Ingress,
    ) -> Result<Ingress, kube::Error> {
        let api: Api<Ingress> = self.namespaced(namespace);
        replace(&api, name, ingress).await
    }

    async fn get_ingress(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<Option<Ingress>, kube::Error> {
        let api: Api<Ingress> = self.namespaced(namespace);
        get_if_present(&api, name).await
    }

    async fn delete_ingress(&self, namespace: &str, name: &str) -> Result<bool, kube::Error> {
        let api: Api<Ingress> = self.namespaced(namespace);
        delete_if_present(&api, name, &DeleteParams::default()).await
    }

    async fn list_ingresses(&self, namespace: &str) -> Result<Vec<Ingress>, kube::Error> {
        let api: Api<Ingress> = self.namespaced(namespace);
        list_all(&api, &ListParams::default()).await
    }

    async fn list_replication_controllers(
        &self,
        namespace: &str,
    ) -> Result<Vec<ReplicationController>, kube::Error> {
        let api: Api<ReplicationController> = self.namespaced(namespace);
        list_all(&api, &ListParams::default()).await
    }

    async fn get_replication_controller(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<Option<ReplicationController>, kube::Error> {
        let api: Api<ReplicationController> = self.namespaced(namespace);
        get_if_present(&api, name).await
    }

    async fn create_replication_controller(
        &self,
        namespace: &str,
        replication_controller: &ReplicationController,
    ) -> Result<ReplicationController, kube::Error> {
        let api: Api<ReplicationController> = self.namespaced(namespace);
        api.create(&PostParams::default(), replication_controller)
            .await
    }

    async fn replace_replication_controller(
        &self,
        namespace: &str,
        name: &str,
        replication_controller: &ReplicationController,
    ) -> Result<ReplicationController, kube::Error> {
        let api: Api<ReplicationController> = self.namespaced(namespace);
        replace(&api, name, replication_controller).await
    }

    async fn scale_replication_controller(
        &self,
        namespace: &str,
        name: &str,
        replicas: i32,
    ) -> Result<ReplicationController, kube::Error> {
        let api: Api<ReplicationController> = self.namespaced(namespace);
        let patch = replicas_patch(replicas);
        api.patch(name, &PatchParams::default(), &Patch::Merge(&patch))
            .await
    }

    async fn delete_replication_controller(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<bool, kube::Error> {
        let api: Api<ReplicationController> = self.namespaced(namespace);
        // Cascade to the pods the controller owns.
        delete_if_present(&api, name, &DeleteParams::background()).await
    }

    async fn edit_replication_controller_template_labels(
        &self,
        namespace: &str,
        name: &str,
        mutations: &[LabelMutation],
    ) -> Result<ReplicationController, kube::Error> {
        let api: Api<ReplicationController> = self.namespaced(namespace);
        let mut replication_controller = api.get(name).await?;
        edit_template_labels(&mut replication_controller, mutations);

        replace(&api, name, &replication_controller).await
    }

    async fn list_pods(&self, namespace: &str) -> Result<Vec<Pod>, kube::Error> {
        let api: Api<Pod> = self.namespaced(namespace);
        list_all(&api, &ListParams::default()).await
    }

    async fn list_pods_with_label(
        &self,
        namespace: &str,
        key: &str,
        value: &str,
    ) -> Result<Vec<Pod>, kube::Error> {
        let api: Api<Pod> = self.namespaced(namespace);
        let lp = ListParams::default().labels(&format!("{}={}", key, value));
        list_all(&api, &lp).await
    }

    async fn get_pod(&self, namespace: &str, name: &str) -> Result<Option<Pod>, kube::Error> {
        let api: Api<Pod> = self.namespaced(namespace);
        get_if_present(&api, name).await
    }

    async fn delete_pod(&self, namespace: &str, name: &str) -> Result<bool, kube::Error> {
        let api: Api<Pod> = self.namespaced(namespace);
        delete_if_present(&api, name, &DeleteParams::default()).await
    }

    async fn edit_pod_labels(
        &self,
        namespace: &str,
        name: &str,
        mutations: &[LabelMutation],
    ) -> Result<Pod, kube::Error> {
        let api: Api<Pod> = self.namespaced(namespace);
        let mut pod = api.get(name).await?;
        edit_metadata_labels(&mut pod.metadata, mutations);

        replace(&api, name, &pod).await
    }

    async fn get_service(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<Option<Service>, kube::Error> {
        let api: Api<Service> = self.namespaced(namespace);
        get_if_present(&api, name).await
    }

    async fn create_service(
        &self,
        namespace: &str,
        service: &Service,
    ) -> Result<Service, kube::Error> {
        let api: Api<Service> = self.namespaced(namespace);
        api.create(&PostParams::default(), service).await
    }

    async fn replace_service(
        &self,
        namespace: &str,
        name: &str,
        service: &Service,
    ) -> Result<Service, kube::Error> {
        let api: Api<Service> = self.namespaced(namespace);
        replace(&api, name, service).await
    }

    async fn delete_service(&self, namespace: &str, name: &str) -> Result<bool, kube::Error> {
        let api: Api<Service> = self.namespaced(namespace);
        delete_if_present(&api, name, &DeleteParams::default()).await
    }

    async fn list_services(&self, namespace: &str) -> Result<Vec<Service>, kube::Error> {
        let api: Api<Service> = self.namespaced(namespace);
        list_all(&api, &ListParams::default()).await
    }

    async fn get_secret(&self, namespace: &str, name: &str) -> Result<Option<Secret>, kube::Error> {
        let api: Api<Secret> = self.namespaced(namespace);
        get_if_present(&api, name).await
    }

    async fn list_secrets(&self, namespace: &str) -> Result<Vec<Secret>, kube::Error> {
        let api: Api<Secret> = self.namespaced(namespace);
        list_all(&api, &ListParams::default()).await
    }

    async fn create_secret(&self, namespace: &str, secret: &Secret) -> Result<Secret, kube::Error> {
        let api: Api<Secret> = self.namespaced(namespace);
        api.create(&PostParams::default(), secret).await
    }

    async fn delete_secret(&self, namespace: &str, name: &str) -> Result<bool, kube::Error> {
        let api: Api<Secret> = self.namespaced(namespace);
        delete_if_present(&api, name, &DeleteParams::default()).await
    }

    async fn get_namespace(&self, name: &str) -> Result<Option<Namespace>, kube::Error> {
        let api: Api<Namespace> = Api::all(self.client.clone());
        get_if_present(&api, name).await
    }

    async fn list_namespaces(&self) -> Result<Vec<Namespace>, kube::Error> {
        let api: Api<Namespace> = Api::all(self.client.clone());
        list_all(&api, &ListParams::default()).await
    }

    async fn create_namespace(&self, namespace: &Namespace) -> Result<Namespace, kube::Error> {
        let api: Api<Namespace> = Api::all(self.client.clone());
        api.create(&PostParams::default(), namespace).await
    }

    async fn delete_namespace(&self, name: &str) -> Result<bool, kube::Error> {
        let api: Api<Namespace> = Api::all(self.client.clone());
        delete_if_present(&api, name, &DeleteParams::default()).await
    }

    async fn create_job(&self, namespace: &str, job: &Job) -> Result<Job, kube::Error> {
        let api: Api<Job> = self.namespaced(namespace);
        api.create(&PostParams::default(), job).await
    }

    async fn get_job(&self, namespace: &str, name: &str) -> Result<Option<Job>, kube::Error> {
        let api: Api<Job> = self.namespaced(namespace);
        get_if_present(&api, name).await
    }

    async fn list_jobs(&self, namespace: &str) -> Result<Vec<Job>, kube::Error> {
        let api: Api<Job> = self.namespaced(namespace);
        list_all(&api, &ListParams::default()).await
    }

    async fn delete_job(&self, namespace: &str, name: &str) -> Result<bool, kube::Error> {
        let api: Api<Job> = self.namespaced(namespace);
        // Jobs orphan their pods unless propagation is requested.
        delete_if_present(&api, name, &DeleteParams::background()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::kubernetes::labels::toggle_mutations;
    use k8s_openapi::api::core::v1::{PodTemplateSpec, ReplicationControllerSpec};
    use kube::core::ErrorResponse;

    fn api_error(code: u16, reason: &str) -> kube::Error {
        kube::Error::Api(ErrorResponse {
            status: "Failure".to_string(),
            message: format!("{} from api server", reason),
            reason: reason.to_string(),
            code,
        })
    }

    fn pod(name: &str) -> Pod {
        Pod {
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_found_maps_not_found_to_none() {
        assert!(found::<Pod>(Err(api_error(404, "NotFound"))).unwrap().is_none());

        let pod = found(Ok(pod("web-1"))).unwrap().unwrap();
        assert_eq!(pod.metadata.name.as_deref(), Some("web-1"));
    }

    #[test]
    fn test_found_propagates_other_errors() {
        match found::<Pod>(Err(api_error(403, "Forbidden"))) {
            Err(kube::Error::Api(ae)) => assert_eq!(ae.code, 403),
            other => panic!("expected api error, got {:?}", other),
        }
    }

    #[test]
    fn test_deleted_reports_absent_object_as_false() {
        assert!(deleted(Ok(pod("web-1"))).unwrap());
        assert!(!deleted::<Pod>(Err(api_error(404, "NotFound"))).unwrap());
    }

    #[test]
    fn test_deleted_propagates_conflict() {
        match deleted::<Pod>(Err(api_error(409, "Conflict"))) {
            Err(kube::Error::Api(ae)) => assert_eq!(ae.code, 409),
            other => panic!("expected api error, got {:?}", other),
        }
    }

    #[test]
    fn test_replicas_patch_only_touches_spec_replicas() {
        assert_eq!(
            replicas_patch(3),
            serde_json::json!({ "spec": { "replicas": 3 } })
        );
    }

    #[test]
    fn test_edit_template_labels_builds_missing_template() {
        let mut rc = ReplicationController {
            metadata: ObjectMeta {
                name: Some("web".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };

        edit_template_labels(&mut rc, &toggle_mutations(&["load-balancer-frontend"], "true"));

        let body = serde_json::to_value(&rc).unwrap();
        assert_eq!(
            body["spec"]["template"]["metadata"]["labels"],
            serde_json::json!({ "load-balancer-frontend": "true" })
        );
        assert!(rc.metadata.labels.is_none());
    }

    #[test]
    fn test_edit_template_labels_keeps_existing_spec() {
        let mut labels = BTreeMap::new();
        labels.insert("app".to_string(), "web".to_string());
        labels.insert("load-balancer-frontend".to_string(), "true".to_string());

        let mut rc = ReplicationController {
            spec: Some(ReplicationControllerSpec {
                replicas: Some(2),
                template: Some(PodTemplateSpec {
                    metadata: Some(ObjectMeta {
                        labels: Some(labels),
                        ..Default::default()
                    }),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            ..Default::default()
        };

        edit_template_labels(&mut rc, &toggle_mutations(&["load-balancer-frontend"], "false"));

        let spec = rc.spec.unwrap();
        assert_eq!(spec.replicas, Some(2));
        let labels = spec.template.unwrap().metadata.unwrap().labels.unwrap();
        assert_eq!(labels.get("app").map(String::as_str), Some("web"));
        assert_eq!(
            labels.get("load-balancer-frontend").map(String::as_str),
            Some("false")
        );
    }

    #[test]
    fn test_edit_metadata_labels_creates_label_map() {
        let mut pod = pod("web-1");

        edit_metadata_labels(
            &mut pod.metadata,
            &toggle_mutations(&["load-balancer-a", "load-balancer-b"], "true"),
        );

        let labels = pod.metadata.labels.unwrap();
        assert_eq!(labels.len(), 2);
        assert_eq!(labels.get("load-balancer-b").map(String::as_str), Some("true"));
    }
}
