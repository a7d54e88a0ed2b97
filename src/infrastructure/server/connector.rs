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

//! Drain hooks over an actix server handle

use crate::domain::drain::{Connector, RequestExecutor, WorkerPool};
use actix_web::dev::ServerHandle;
use async_trait::async_trait;
use std::sync::Arc;

/// Accept side of the server: pausing stops new connections being taken.
pub struct ActixConnector {
    handle: ServerHandle,
}

impl ActixConnector {
    pub fn new(handle: ServerHandle) -> Self {
        Self { handle }
    }
}

#[async_trait]
impl Connector for ActixConnector {
    async fn pause(&self) {
        self.handle.pause().await;
    }

    fn executor(&self) -> RequestExecutor {
        RequestExecutor::WorkerPool(Arc::new(ActixWorkerPool::new(self.handle.clone())))
    }
}

/// The worker threads serving requests accepted by [`ActixConnector`].
pub struct ActixWorkerPool {
    handle: ServerHandle,
}

impl ActixWorkerPool {
    pub fn new(handle: ServerHandle) -> Self {
        Self { handle }
    }
}

impl WorkerPool for ActixWorkerPool {
    fn shutdown(&self) {
        // The stop command is sent here; graceful completion, which waits on
        // in-flight requests including the caller's, is awaited off-thread.
        let stopping = self.handle.stop(true);
        tokio::spawn(stopping);
    }
}
