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

use std::fmt;

/// Every call the adaptor forwards to the cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CreateIngress,
    ReplaceIngress,
    GetIngress,
    DeleteIngress,
    GetIngresses,
    GetReplicationControllers,
    GetReplicationControllerPods,
    GetJobPods,
    GetPod,
    DeletePod,
    GetPods,
    GetReplicationController,
    CreateReplicationController,
    ReplaceReplicationController,
    ResizeReplicationController,
    HardDestroyReplicationController,
    TogglePodLabels,
    ToggleReplicationControllerLabels,
    GetService,
    CreateService,
    DeleteService,
    GetServices,
    ReplaceService,
    GetSecret,
    GetSecrets,
    DeleteSecret,
    CreateSecret,
    GetNamespace,
    GetNamespaces,
    CreateNamespace,
    DeleteNamespace,
    CreateJob,
    GetJobs,
    GetJob,
    DeleteJob,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::CreateIngress => "Create Ingress",
            Operation::ReplaceIngress => "Replace Ingress",
            Operation::GetIngress => "Get Ingress",
            Operation::DeleteIngress => "Delete Ingress",
            Operation::GetIngresses => "Get Ingresses",
            Operation::GetReplicationControllers => "Get Replication Controllers",
            Operation::GetReplicationControllerPods => "Get Replication Controller Pods",
            Operation::GetJobPods => "Get Job Pods",
            Operation::GetPod => "Get Pod",
            Operation::DeletePod => "Delete Pod",
            Operation::GetPods => "Get Pods",
            Operation::GetReplicationController => "Get Replication Controller",
            Operation::CreateReplicationController => "Create Replication Controller",
            Operation::ReplaceReplicationController => "Replace Replication Controller",
            Operation::ResizeReplicationController => "Resize Replication Controller",
            Operation::HardDestroyReplicationController => "Hard Destroy Replication Controller",
            Operation::TogglePodLabels => "Toggle Pod Labels",
            Operation::ToggleReplicationControllerLabels => "Toggle Replication Controller Labels",
            Operation::GetService => "Get Service",
            Operation::CreateService => "Create Service",
            Operation::DeleteService => "Delete Service",
            Operation::GetServices => "Get Services",
            Operation::ReplaceService => "Replace Service",
            Operation::GetSecret => "Get Secret",
            Operation::GetSecrets => "Get Secrets",
            Operation::DeleteSecret => "Delete Secret",
            Operation::CreateSecret => "Create Secret",
            Operation::GetNamespace => "Get Namespace",
            Operation::GetNamespaces => "Get Namespaces",
            Operation::CreateNamespace => "Create Namespace",
            Operation::DeleteNamespace => "Delete Namespace",
            Operation::CreateJob => "Create Job",
            Operation::GetJobs => "Get Jobs",
            Operation::GetJob => "Get Job",
            Operation::DeleteJob => "Delete Job",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
