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

/// Resource labels
pub const LOAD_BALANCER_LABEL_PREFIX: &str = "load-balancer-";
pub const REPLICATION_CONTROLLER_LABEL: &str = "replication-controller";
pub const JOB_LABEL: &str = "job";

/// Admin endpoints
pub const ADMIN_INSTANCE_SCOPE: &str = "/admin/instance";
pub const ADMIN_DISABLE_PATH: &str = "/disable";

/// Server defaults
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 7002;
pub const DEFAULT_WORKERS: usize = 4;
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 30;

/// Kubernetes defaults
pub const DEFAULT_NAMESPACE: &str = "default";

/// Configuration file environment variable
pub const CONF_FILE_ENV: &str = "KUBE_BRIDGE_CONF_FILE";

/// Builds the label key marking membership of a load balancer.
pub fn load_balancer_label(load_balancer: &str) -> String {
    format!("{}{}", LOAD_BALANCER_LABEL_PREFIX, load_balancer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_balancer_label() {
        assert_eq!(load_balancer_label("frontend"), "load-balancer-frontend");
    }
}
