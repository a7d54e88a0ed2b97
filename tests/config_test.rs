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

use kube_bridge::domain::config::{apply_overrides, parse_dynamic_configs};
use kube_bridge::BridgeConf;
use std::io::Write;

#[test]
fn load_full_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[server]
host = "127.0.0.1"
port = 7102
workers = 8
shutdown_timeout_secs = 10

[admin.instance]
enabled = true

[kubernetes]
namespace = "spinnaker"
kubeconfig = "/etc/kube/config"
context = "prod"
"#
    )
    .unwrap();

    let conf = BridgeConf::load(Some(file.path().to_str().unwrap())).unwrap();

    assert_eq!(conf.server.address(), "127.0.0.1:7102");
    assert_eq!(conf.server.workers, 8);
    assert_eq!(conf.server.shutdown_timeout_secs, 10);
    assert!(conf.admin.instance.enabled);
    assert_eq!(conf.kubernetes.namespace, "spinnaker");
    assert_eq!(conf.kubernetes.kubeconfig.as_deref(), Some("/etc/kube/config"));
    assert_eq!(conf.kubernetes.context.as_deref(), Some("prod"));
    assert!(conf.validate().is_ok());
}

#[test]
fn overrides_win_over_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "[admin.instance]\nenabled = true\n").unwrap();

    let mut conf = BridgeConf::from(file.path().to_str().unwrap()).unwrap();
    let overrides = parse_dynamic_configs(&[
        "admin.instance.enabled=false".to_string(),
        "server.port=7003".to_string(),
    ])
    .unwrap();
    apply_overrides(&overrides, &mut conf).unwrap();

    assert!(!conf.admin.instance.enabled);
    assert_eq!(conf.server.port, 7003);
}

#[test]
fn missing_file_is_a_config_error() {
    let err = BridgeConf::from("/nonexistent/kube-bridge.toml").unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
}

#[test]
fn malformed_file_is_rejected() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "[server]\nport = \"not a number\"\n").unwrap();

    assert!(BridgeConf::from(file.path().to_str().unwrap()).is_err());
}
