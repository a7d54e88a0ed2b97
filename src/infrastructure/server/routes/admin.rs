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

//! Instance administration, mounted under `/admin/instance`

use crate::domain::drain::DrainController;
use crate::infrastructure::constants::{ADMIN_DISABLE_PATH, ADMIN_INSTANCE_SCOPE};
use crate::shared::error::BridgeError;
use actix_web::{web, HttpResponse};
use tracing::warn;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope(ADMIN_INSTANCE_SCOPE)
            .route(ADMIN_DISABLE_PATH, web::post().to(disable_instance)),
    );
}

/// Stops accepting connections and shuts the worker pool down.
/// Requests already in flight, this one included, run to completion.
pub async fn disable_instance(
    drain: web::Data<DrainController>,
) -> Result<HttpResponse, BridgeError> {
    warn!(
        state = drain.state().as_str(),
        "Instance being disabled, no further requests will be accepted"
    );
    drain.disconnect().await?;

    Ok(HttpResponse::Ok().finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::drain::{Connector, DrainState, RequestExecutor, WorkerPool};
    use actix_web::{body::to_bytes, http::StatusCode, test, App};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Default)]
    struct Recorder {
        paused: AtomicUsize,
        shutdowns: AtomicUsize,
    }

    struct RecordingPool(Arc<Recorder>);

    impl WorkerPool for RecordingPool {
        fn shutdown(&self) {
            self.0.shutdowns.fetch_add(1, Ordering::SeqCst);
        }
    }

    struct RecordingConnector(Arc<Recorder>);

    #[async_trait]
    impl Connector for RecordingConnector {
        async fn pause(&self) {
            self.0.paused.fetch_add(1, Ordering::SeqCst);
        }

        fn executor(&self) -> RequestExecutor {
            RequestExecutor::WorkerPool(Arc::new(RecordingPool(self.0.clone())))
        }
    }

    #[actix_web::test]
    async fn test_disable_pauses_connector_and_stops_pool() {
        let recorder = Arc::new(Recorder::default());
        let drain = Arc::new(DrainController::new());
        drain
            .bind(Arc::new(RecordingConnector(recorder.clone())))
            .unwrap();

        let app = test::init_service(
            App::new()
                .app_data(web::Data::from(drain.clone()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/admin/instance/disable")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body = to_bytes(resp.into_body()).await.unwrap();
        assert!(body.is_empty());
        assert_eq!(recorder.paused.load(Ordering::SeqCst), 1);
        assert_eq!(recorder.shutdowns.load(Ordering::SeqCst), 1);
        assert_eq!(drain.state(), DrainState::Draining);
    }

    #[actix_web::test]
    async fn test_disable_without_connector_is_unavailable() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(DrainController::new()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/admin/instance/disable")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[actix_web::test]
    async fn test_disable_requires_post() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(DrainController::new()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/admin/instance/disable")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert!(resp.status().is_client_error());
    }
}
