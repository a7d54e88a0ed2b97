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

//! Forwarding façade over a [`ClusterClient`].
//!
//! Each method performs exactly one remote call (label toggles: one edit) and
//! returns the result untouched. Any client failure is surfaced as
//! [`BridgeError::KubernetesOperation`] naming the operation and carrying the
//! original `kube::Error` as its source.

use crate::infrastructure::constants::{JOB_LABEL, REPLICATION_CONTROLLER_LABEL};
use crate::infrastructure::kubernetes::client::{ClusterClient, KubeClusterClient};
use crate::infrastructure::kubernetes::labels::toggle_mutations;
use crate::infrastructure::kubernetes::Operation;
use crate::shared::error::{BridgeError, Result};
use k8s_openapi::api::batch::v1::Job;
use k8s_openapi::api::core::v1::{Namespace, Pod, ReplicationController, Secret, Service};
use k8s_openapi::api::networking::v1::Ingress;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Clone)]
pub struct KubernetesApiAdaptor {
    client: Arc<dyn ClusterClient>,
}

#[derive(Default)]
pub struct KubernetesApiAdaptorBuilder {
    client: Option<Arc<dyn ClusterClient>>,
}

impl KubernetesApiAdaptorBuilder {
    pub fn client<C: ClusterClient + 'static>(mut self, client: C) -> Self {
        self.client = Some(Arc::new(client));
        self
    }

    pub fn shared_client(mut self, client: Arc<dyn ClusterClient>) -> Self {
        self.client = Some(client);
        self
    }

    pub fn build(self) -> Result<KubernetesApiAdaptor> {
        let client = self
            .client
            .ok_or_else(|| BridgeError::invalid_argument("Client may not be null."))?;
        Ok(KubernetesApiAdaptor { client })
    }
}

impl KubernetesApiAdaptor {
    pub fn builder() -> KubernetesApiAdaptorBuilder {
        KubernetesApiAdaptorBuilder::default()
    }

    /// Adaptor over a live cluster, resolved from kubeconfig or the in-cluster environment.
    pub async fn connect(kubeconfig: Option<String>, context: Option<String>) -> Result<Self> {
        let client = KubeClusterClient::new_with_config(kubeconfig, context).await?;
        Self::builder().client(client).build()
    }

    async fn forward<T, F>(&self, operation: Operation, call: F) -> Result<T>
    where
        F: Future<Output = std::result::Result<T, kube::Error>>,
    {
        debug!(%operation, "forwarding to cluster");
        call.await.map_err(|source| {
            warn!(%operation, error = %source, "Kubernetes operation failed");
            BridgeError::operation_failed(operation, source)
        })
    }

    pub async fn create_ingress(&self, namespace: &str, ingress: &Ingress) -> Result<Ingress> {
        self.forward(
            Operation::CreateIngress,
            self.client.create_ingress(namespace, ingress),
        )
        .await
    }

    pub async fn replace_ingress(
        &self,
        namespace: &str,
        name: &str,
        ingress: &Ingress,
    ) -> Result<Ingress> {
        self.forward(
            Operation::ReplaceIngress,
            self.client.replace_ingress(namespace, name, ingress),
        )
        .await
    }

    pub async fn get_ingress(&self, namespace: &str, name: &str) -> Result<Option<Ingress>> {
        self.forward(
            Operation::GetIngress,
            self.client.get_ingress(namespace, name),
        )
        .await
    }

    pub async fn delete_ingress(&self, namespace: &str, name: &str) -> Result<bool> {
        self.forward(
            Operation::DeleteIngress,
            self.client.delete_ingress(namespace, name),
        )
        .await
    }

    pub async fn get_ingresses(&self, namespace: &str) -> Result<Vec<Ingress>> {
        self.forward(
            Operation::GetIngresses,
            self.client.list_ingresses(namespace),
        )
        .await
    }

    pub async fn get_replication_controllers(
        &self,
        namespace: &str,
    ) -> Result<Vec<ReplicationController>> {
        self.forward(
            Operation::GetReplicationControllers,
            self.client.list_replication_controllers(namespace),
        )
        .await
    }

    pub async fn get_replication_controller_pods(
        &self,
        namespace: &str,
        replication_controller_name: &str,
    ) -> Result<Vec<Pod>> {
        self.forward(
            Operation::GetReplicationControllerPods,
            self.client.list_pods_with_label(
                namespace,
                REPLICATION_CONTROLLER_LABEL,
                replication_controller_name,
            ),
        )
        .await
    }

    pub async fn get_job_pods(&self, namespace: &str, job_name: &str) -> Result<Vec<Pod>> {
        self.forward(
            Operation::GetJobPods,
            self.client
                .list_pods_with_label(namespace, JOB_LABEL, job_name),
        )
        .await
    }

    pub async fn get_pod(&self, namespace: &str, name: &str) -> Result<Option<Pod>> {
        self.forward(Operation::GetPod, self.client.get_pod(namespace, name))
            .await
    }

    pub async fn delete_pod(&self, namespace: &str, name: &str) -> Result<bool> {
        self.forward(Operation::DeletePod, self.client.delete_pod(namespace, name))
            .await
    }

    pub async fn get_pods(&self, namespace: &str) -> Result<Vec<Pod>> {
        self.forward(Operation::GetPods, self.client.list_pods(namespace))
            .await
    }

    pub async fn get_replication_controller(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<Option<ReplicationController>> {
        self.forward(
            Operation::GetReplicationController,
            self.client.get_replication_controller(namespace, name),
        )
        .await
    }

    pub async fn create_replication_controller(
        &self,
        namespace: &str,
        replication_controller: &ReplicationController,
    ) -> Result<ReplicationController> {
        self.forward(
            Operation::CreateReplicationController,
            self.client
                .create_replication_controller(namespace, replication_controller),
        )
        .await
    }

    pub async fn replace_replication_controller(
        &self,
        namespace: &str,
        name: &str,
        replication_controller: &ReplicationController,
    ) -> Result<ReplicationController> {
        self.forward(
            Operation::ReplaceReplicationController,
            self.client
                .replace_replication_controller(namespace, name, replication_controller),
        )
        .await
    }

    pub async fn resize_replication_controller(
        &self,
        namespace: &str,
        name: &str,
        size: i32,
    ) -> Result<ReplicationController> {
        self.forward(
            Operation::ResizeReplicationController,
            self.client.scale_replication_controller(namespace, name, size),
        )
        .await
    }

    pub async fn hard_destroy_replication_controller(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<bool> {
        self.forward(
            Operation::HardDestroyReplicationController,
            self.client.delete_replication_controller(namespace, name),
        )
        .await
    }

    /// Removes then re-adds each key with `value`, in order, as one edit of the pod.
    ///
    /// The edit is not atomic across keys: if the write fails, none of the
    /// keys are applied, but a concurrent writer may interleave with the read.
    pub async fn toggle_pod_labels<S: AsRef<str>>(
        &self,
        namespace: &str,
        name: &str,
        keys: &[S],
        value: &str,
    ) -> Result<Pod> {
        let mutations = toggle_mutations(keys, value);
        self.forward(
            Operation::TogglePodLabels,
            self.client.edit_pod_labels(namespace, name, &mutations),
        )
        .await
    }

    /// Same edit as [`Self::toggle_pod_labels`], applied to the pod template labels.
    pub async fn toggle_replication_controller_spec_labels<S: AsRef<str>>(
        &self,
        namespace: &str,
        name: &str,
        keys: &[S],
        value: &str,
    ) -> Result<ReplicationController> {
        let mutations = toggle_mutations(keys, value);
        self.forward(
            Operation::ToggleReplicationControllerLabels,
            self.client
                .edit_replication_controller_template_labels(namespace, name, &mutations),
        )
        .await
    }

    pub async fn get_service(&self, namespace: &str, name: &str) -> Result<Option<Service>> {
        self.forward(
            Operation::GetService,
            self.client.get_service(namespace, name),
        )
        .await
    }

    pub async fn create_service(&self, namespace: &str, service: &Service) -> Result<Service> {
        self.forward(
            Operation::CreateService,
            self.client.create_service(namespace, service),
        )
        .await
    }

    pub async fn delete_service(&self, namespace: &str, name: &str) -> Result<bool> {
        self.forward(
            Operation::DeleteService,
            self.client.delete_service(namespace, name),
        )
        .await
    }

    pub async fn get_services(&self, namespace: &str) -> Result<Vec<Service>> {
        self.forward(Operation::GetServices, self.client.list_services(namespace))
            .await
    }

    pub async fn replace_service(
        &self,
        namespace: &str,
        name: &str,
        service: &Service,
    ) -> Result<Service> {
        self.forward(
            Operation::ReplaceService,
            self.client.replace_service(namespace, name, service),
        )
        .await
    }

    pub async fn get_secret(&self, namespace: &str, name: &str) -> Result<Option<Secret>> {
        self.forward(Operation::GetSecret, self.client.get_secret(namespace, name))
            .await
    }

    pub async fn get_secrets(&self, namespace: &str) -> Result<Vec<Secret>> {
        self.forward(Operation::GetSecrets, self.client.list_secrets(namespace))
            .await
    }

    pub async fn delete_secret(&self, namespace: &str, name: &str) -> Result<bool> {
        self.forward(
            Operation::DeleteSecret,
            self.client.delete_secret(namespace, name),
        )
        .await
    }

    pub async fn create_secret(&self, namespace: &str, secret: &Secret) -> Result<Secret> {
        self.forward(
            Operation::CreateSecret,
            self.client.create_secret(namespace, secret),
        )
        .await
    }

    pub async fn get_namespace(&self, name: &str) -> Result<Option<Namespace>> {
        self.forward(Operation::GetNamespace, self.client.get_namespace(name))
            .await
    }

    pub async fn get_namespaces(&self) -> Result<Vec<Namespace>> {
        self.forward(Operation::GetNamespaces, self.client.list_namespaces())
            .await
    }

    pub async fn create_namespace(&self, namespace: &Namespace) -> Result<Namespace> {
        self.forward(
            Operation::CreateNamespace,
            self.client.create_namespace(namespace),
        )
        .await
    }

    pub async fn delete_namespace(&self, name: &str) -> Result<bool> {
        self.forward(Operation::DeleteNamespace, self.client.delete_namespace(name))
            .await
    }

    pub async fn create_job(&self, namespace: &str, job: &Job) -> Result<Job> {
        self.forward(Operation::CreateJob, self.client.create_job(namespace, job))
            .await
    }

    pub async fn get_jobs(&self, namespace: &str) -> Result<Vec<Job>> {
        self.forward(Operation::GetJobs, self.client.list_jobs(namespace))
            .await
    }

    pub async fn get_job(&self, namespace: &str, name: &str) -> Result<Option<Job>> {
        self.forward(Operation::GetJob, self.client.get_job(namespace, name))
            .await
    }

    pub async fn delete_job(&self, namespace: &str, name: &str) -> Result<bool> {
        self.forward(Operation::DeleteJob, self.client.delete_job(namespace, name))
            .await
    }
}
