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

//! Read-only views over namespaced resources, mounted under `/v1`

use super::ErrorMessage;
use crate::infrastructure::kubernetes::KubernetesApiAdaptor;
use crate::shared::error::BridgeError;
use actix_web::http::StatusCode;
use actix_web::{get, web, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("{kind} '{name}' not found in namespace '{namespace}'")]
    NotFound {
        kind: &'static str,
        namespace: String,
        name: String,
    },

    #[error(transparent)]
    Bridge(#[from] BridgeError),
}

impl ResponseError for ResourceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ResourceError::NotFound { .. } => StatusCode::NOT_FOUND,
            ResourceError::Bridge(e) => e.status_code(),
        }
    }

    fn error_response(&self) -> HttpResponse {
        ErrorMessage::response(self.status_code(), self.to_string())
    }
}

type Adaptor = web::Data<KubernetesApiAdaptor>;

fn found<T: Serialize>(
    object: Option<T>,
    kind: &'static str,
    namespace: String,
    name: String,
) -> Result<HttpResponse, ResourceError> {
    match object {
        Some(object) => Ok(HttpResponse::Ok().json(object)),
        None => Err(ResourceError::NotFound {
            kind,
            namespace,
            name,
        }),
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/v1")
            //pods
            .service(list_pods)
            .service(read_pod)
            //services
            .service(list_services)
            .service(read_service)
            //replication controllers
            .service(list_replication_controllers)
            .service(read_replication_controller)
            .service(list_replication_controller_pods)
            //ingresses
            .service(list_ingresses)
            //jobs
            .service(list_jobs)
            .service(read_job)
            .service(list_job_pods),
    );
}

#[get("/namespaces/{namespace}/pods")]
pub async fn list_pods(
    adaptor: Adaptor,
    namespace: web::Path<String>,
) -> Result<HttpResponse, ResourceError> {
    let pods = adaptor.get_pods(&namespace).await?;
    Ok(HttpResponse::Ok().json(pods))
}

#[get("/namespaces/{namespace}/pods/{name}")]
pub async fn read_pod(
    adaptor: Adaptor,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, ResourceError> {
    let (namespace, name) = path.into_inner();
    let pod = adaptor.get_pod(&namespace, &name).await?;
    found(pod, "Pod", namespace, name)
}

#[get("/namespaces/{namespace}/services")]
pub async fn list_services(
    adaptor: Adaptor,
    namespace: web::Path<String>,
) -> Result<HttpResponse, ResourceError> {
    let services = adaptor.get_services(&namespace).await?;
    Ok(HttpResponse::Ok().json(services))
}

#[get("/namespaces/{namespace}/services/{name}")]
pub async fn read_service(
    adaptor: Adaptor,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, ResourceError> {
    let (namespace, name) = path.into_inner();
    let service = adaptor.get_service(&namespace, &name).await?;
    found(service, "Service", namespace, name)
}

#[get("/namespaces/{namespace}/replicationcontrollers")]
pub async fn list_replication_controllers(
    adaptor: Adaptor,
    namespace: web::Path<String>,
) -> Result<HttpResponse, ResourceError> {
    let controllers = adaptor.get_replication_controllers(&namespace).await?;
    Ok(HttpResponse::Ok().json(controllers))
}

#[get("/namespaces/{namespace}/replicationcontrollers/{name}")]
pub async fn read_replication_controller(
    adaptor: Adaptor,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, ResourceError> {
    let (namespace, name) = path.into_inner();
    let controller = adaptor.get_replication_controller(&namespace, &name).await?;
    found(controller, "ReplicationController", namespace, name)
}

#[get("/namespaces/{namespace}/replicationcontrollers/{name}/pods")]
pub async fn list_replication_controller_pods(
    adaptor: Adaptor,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, ResourceError> {
    let (namespace, name) = path.into_inner();
    let pods = adaptor
        .get_replication_controller_pods(&namespace, &name)
        .await?;
    Ok(HttpResponse::Ok().json(pods))
}

#[get("/namespaces/{namespace}/ingresses")]
pub async fn list_ingresses(
    adaptor: Adaptor,
    namespace: web::Path<String>,
) -> Result<HttpResponse, ResourceError> {
    let ingresses = adaptor.get_ingresses(&namespace).await?;
    Ok(HttpResponse::Ok().json(ingresses))
}

#[get("/namespaces/{namespace}/jobs")]
pub async fn list_jobs(
    adaptor: Adaptor,
    namespace: web::Path<String>,
) -> Result<HttpResponse, ResourceError> {
    let jobs = adaptor.get_jobs(&namespace).await?;
    Ok(HttpResponse::Ok().json(jobs))
}

#[get("/namespaces/{namespace}/jobs/{name}")]
pub async fn read_job(
    adaptor: Adaptor,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, ResourceError> {
    let (namespace, name) = path.into_inner();
    let job = adaptor.get_job(&namespace, &name).await?;
    found(job, "Job", namespace, name)
}

#[get("/namespaces/{namespace}/jobs/{name}/pods")]
pub async fn list_job_pods(
    adaptor: Adaptor,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, ResourceError> {
    let (namespace, name) = path.into_inner();
    let pods = adaptor.get_job_pods(&namespace, &name).await?;
    Ok(HttpResponse::Ok().json(pods))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::kubernetes::client::MockClusterClient;
    use actix_web::{test, App};
    use k8s_openapi::api::core::v1::Pod;
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
    use kube::core::ErrorResponse;

    fn pod(name: &str) -> Pod {
        Pod {
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn app_data(mock: MockClusterClient) -> web::Data<KubernetesApiAdaptor> {
        web::Data::new(
            KubernetesApiAdaptor::builder()
                .client(mock)
                .build()
                .expect("adaptor with client"),
        )
    }

    #[actix_web::test]
    async fn test_list_pods() {
        let mut mock = MockClusterClient::new();
        mock.expect_list_pods()
            .withf(|namespace| namespace == "web")
            .times(1)
            .returning(|_| Ok(vec![pod("web-1"), pod("web-2")]));

        let app =
            test::init_service(App::new().app_data(app_data(mock)).configure(configure)).await;
        let req = test::TestRequest::get()
            .uri("/v1/namespaces/web/pods")
            .to_request();
        let pods: Vec<Pod> = test::call_and_read_body_json(&app, req).await;

        let names: Vec<_> = pods
            .iter()
            .filter_map(|p| p.metadata.name.as_deref())
            .collect();
        assert_eq!(names, vec!["web-1", "web-2"]);
    }

    #[actix_web::test]
    async fn test_missing_pod_is_not_found() {
        let mut mock = MockClusterClient::new();
        mock.expect_get_pod().times(1).returning(|_, _| Ok(None));

        let app =
            test::init_service(App::new().app_data(app_data(mock)).configure(configure)).await;
        let req = test::TestRequest::get()
            .uri("/v1/namespaces/web/pods/gone")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: ErrorMessage = test::read_body_json(resp).await;
        assert_eq!(body.error, "Pod 'gone' not found in namespace 'web'");
    }

    #[actix_web::test]
    async fn test_replication_controller_pods_selected_by_label() {
        let mut mock = MockClusterClient::new();
        mock.expect_list_pods_with_label()
            .withf(|namespace, key, value| {
                namespace == "web" && key == "replication-controller" && value == "frontend-v001"
            })
            .times(1)
            .returning(|_, _, _| Ok(vec![pod("frontend-v001-abcde")]));

        let app =
            test::init_service(App::new().app_data(app_data(mock)).configure(configure)).await;
        let req = test::TestRequest::get()
            .uri("/v1/namespaces/web/replicationcontrollers/frontend-v001/pods")
            .to_request();
        let pods: Vec<Pod> = test::call_and_read_body_json(&app, req).await;

        assert_eq!(pods.len(), 1);
    }

    #[actix_web::test]
    async fn test_api_failure_keeps_status() {
        let mut mock = MockClusterClient::new();
        mock.expect_list_jobs().times(1).returning(|_| {
            Err(kube::Error::Api(ErrorResponse {
                status: "Failure".to_string(),
                message: "jobs.batch is forbidden".to_string(),
                reason: "Forbidden".to_string(),
                code: 403,
            }))
        });

        let app =
            test::init_service(App::new().app_data(app_data(mock)).configure(configure)).await;
        let req = test::TestRequest::get()
            .uri("/v1/namespaces/web/jobs")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        let body: ErrorMessage = test::read_body_json(resp).await;
        assert!(body.error.contains("Get Jobs"));
    }
}
