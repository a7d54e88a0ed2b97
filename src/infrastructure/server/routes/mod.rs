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

use crate::shared::error::BridgeError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};

pub mod admin;
pub mod health_check;
pub mod resources;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorMessage {
    pub error: String,
}

impl ErrorMessage {
    pub fn response(status: StatusCode, error: impl Into<String>) -> HttpResponse {
        HttpResponse::build(status).json(ErrorMessage {
            error: error.into(),
        })
    }
}

impl ResponseError for BridgeError {
    fn status_code(&self) -> StatusCode {
        match self {
            BridgeError::KubernetesOperation { .. } => self
                .api_status()
                .and_then(|code| StatusCode::from_u16(code).ok())
                .unwrap_or(StatusCode::BAD_GATEWAY),
            BridgeError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            BridgeError::ConnectorNotBound => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        ErrorMessage::response(self.status_code(), self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::kubernetes::Operation;
    use kube::core::ErrorResponse;

    fn wrapped(code: u16) -> BridgeError {
        BridgeError::operation_failed(
            Operation::GetPods,
            kube::Error::Api(ErrorResponse {
                status: "Failure".to_string(),
                message: "forbidden".to_string(),
                reason: "Forbidden".to_string(),
                code,
            }),
        )
    }

    #[test]
    fn test_status_follows_api_code() {
        assert_eq!(wrapped(403).status_code(), StatusCode::FORBIDDEN);
        assert_eq!(wrapped(409).status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_status_without_api_code() {
        let err = BridgeError::operation_failed(
            Operation::GetPods,
            kube::Error::SerdeError(serde_json::from_str::<serde_json::Value>("{").unwrap_err()),
        );
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            BridgeError::ConnectorNotBound.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            BridgeError::invalid_argument("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            BridgeError::config_error("x").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
