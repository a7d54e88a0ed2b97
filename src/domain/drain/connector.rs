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
use std::sync::Arc;

/// Network acceptor of the embedded server.
#[async_trait::async_trait]
pub trait Connector: Send + Sync {
    /// Stop accepting new connections. Established connections are kept.
    async fn pause(&self);

    /// Executor currently running request handlers.
    fn executor(&self) -> RequestExecutor;
}

/// A bounded pool of request workers.
pub trait WorkerPool: Send + Sync {
    /// Stop taking new tasks and let in-flight ones finish. Must not block.
    fn shutdown(&self);
}

#[derive(Clone)]
pub enum RequestExecutor {
    WorkerPool(Arc<dyn WorkerPool>),
    /// Not a pool we own; draining leaves it alone.
    Unmanaged,
}

impl RequestExecutor {
    pub fn is_worker_pool(&self) -> bool {
        matches!(self, RequestExecutor::WorkerPool(_))
    }
}

impl fmt::Debug for RequestExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestExecutor::WorkerPool(_) => f.write_str("WorkerPool"),
            RequestExecutor::Unmanaged => f.write_str("Unmanaged"),
        }
    }
}
