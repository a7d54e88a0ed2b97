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

use kube_bridge::{Application, BridgeConf, DrainState};
use std::time::Duration;

struct TestApp {
    address: String,
    application: Application,
}

async fn spawn_app(admin_enabled: bool) -> TestApp {
    let mut conf = BridgeConf::default();
    conf.server.host = "127.0.0.1".to_string();
    conf.server.port = 0;
    conf.server.workers = 1;
    conf.server.shutdown_timeout_secs = 5;
    conf.admin.instance.enabled = admin_enabled;

    let application = Application::build(conf, None)
        .await
        .expect("failed to bind address");

    TestApp {
        address: format!("http://127.0.0.1:{}", application.port()),
        application,
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn health_check_returns_ok() {
    let app = spawn_app(false).await;
    let address = app.address.clone();
    let _server = tokio::spawn(app.application.run_until_stopped());

    let response = reqwest::Client::new()
        .get(format!("{}/health_check", address))
        .send()
        .await
        .expect("Failed to execute request.");

    assert!(response.status().is_success());
    assert_eq!(response.text().await.unwrap(), "ok");
}

#[tokio::test(flavor = "multi_thread")]
async fn disable_instance_returns_200_and_stops_server() {
    let app = spawn_app(true).await;
    let address = app.address.clone();
    let drain = app.application.drain_controller();
    assert!(drain.is_bound());
    assert_eq!(drain.state(), DrainState::Running);

    let server = tokio::spawn(app.application.run_until_stopped());

    let response = reqwest::Client::new()
        .post(format!("{}/admin/instance/disable", address))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(response.status().as_u16(), 200);
    assert!(response.bytes().await.unwrap().is_empty());
    assert_eq!(drain.state(), DrainState::Draining);

    let stopped = tokio::time::timeout(Duration::from_secs(10), server)
        .await
        .expect("server did not stop after disable");
    assert!(stopped.expect("server task panicked").is_ok());

    let after = reqwest::Client::new()
        .get(format!("{}/health_check", address))
        .timeout(Duration::from_secs(2))
        .send()
        .await;
    assert!(
        after.map_or(true, |r| !r.status().is_success()),
        "new connection was served after disable"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn disable_instance_is_absent_unless_enabled() {
    let app = spawn_app(false).await;
    let address = app.address.clone();
    let drain = app.application.drain_controller();
    let _server = tokio::spawn(app.application.run_until_stopped());

    let response = reqwest::Client::new()
        .post(format!("{}/admin/instance/disable", address))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(response.status().as_u16(), 404);
    assert_eq!(drain.state(), DrainState::Running);
}

#[tokio::test(flavor = "multi_thread")]
async fn resource_routes_absent_without_kubernetes() {
    let app = spawn_app(false).await;
    let address = app.address.clone();
    let _server = tokio::spawn(app.application.run_until_stopped());

    let response = reqwest::Client::new()
        .get(format!("{}/v1/namespaces/default/pods", address))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(response.status().as_u16(), 404);
}
