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

use crate::domain::drain::connector::{Connector, RequestExecutor};
use crate::shared::error::{BridgeError, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrainState {
    Running,
    Draining,
}

impl DrainState {
    pub fn as_str(&self) -> &'static str {
        match self {
            DrainState::Running => "running",
            DrainState::Draining => "draining",
        }
    }
}

/// Pauses the bound connector and shuts down its worker pool.
///
/// The connector is published once while the server boots and read on a
/// request thread when the instance is disabled. There is no way back to
/// [`DrainState::Running`].
#[derive(Default)]
pub struct DrainController {
    connector: OnceLock<Arc<dyn Connector>>,
    draining: AtomicBool,
}

impl DrainController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&self, connector: Arc<dyn Connector>) -> Result<()> {
        self.connector
            .set(connector)
            .map_err(|_| BridgeError::ConnectorAlreadyBound)?;
        debug!("connector bound to drain controller");
        Ok(())
    }

    pub fn is_bound(&self) -> bool {
        self.connector.get().is_some()
    }

    pub fn state(&self) -> DrainState {
        if self.draining.load(Ordering::Acquire) {
            DrainState::Draining
        } else {
            DrainState::Running
        }
    }

    /// Not idempotent: a second call pauses and shuts down again.
    pub async fn disconnect(&self) -> Result<()> {
        let connector = self
            .connector
            .get()
            .ok_or(BridgeError::ConnectorNotBound)?;

        if self.draining.swap(true, Ordering::AcqRel) {
            warn!("instance is already draining, repeating disconnect");
        }

        connector.pause().await;
        info!("connector paused, no new connections will be accepted");

        match connector.executor() {
            RequestExecutor::WorkerPool(pool) => {
                info!("shutting down request worker pool");
                pool.shutdown();
            }
            RequestExecutor::Unmanaged => {
                debug!("request executor is not a worker pool, leaving it running");
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::drain::connector::WorkerPool;
    use std::sync::atomic::AtomicUsize;

    #[derive(Default)]
    struct CountingPool {
        shutdowns: AtomicUsize,
    }

    impl WorkerPool for CountingPool {
        fn shutdown(&self) {
            self.shutdowns.fetch_add(1, Ordering::SeqCst);
        }
    }

    struct FakeConnector {
        pauses: AtomicUsize,
        pool: Option<Arc<CountingPool>>,
    }

    impl FakeConnector {
        fn with_pool(pool: Arc<CountingPool>) -> Self {
            Self {
                pauses: AtomicUsize::new(0),
                pool: Some(pool),
            }
        }

        fn unmanaged() -> Self {
            Self {
                pauses: AtomicUsize::new(0),
                pool: None,
            }
        }
    }

    #[async_trait::async_trait]
    impl Connector for FakeConnector {
        async fn pause(&self) {
            self.pauses.fetch_add(1, Ordering::SeqCst);
        }

        fn executor(&self) -> RequestExecutor {
            match &self.pool {
                Some(pool) => RequestExecutor::WorkerPool(pool.clone()),
                None => RequestExecutor::Unmanaged,
            }
        }
    }

    #[tokio::test]
    async fn test_disconnect_pauses_and_shuts_down_pool() {
        let pool = Arc::new(CountingPool::default());
        let connector = Arc::new(FakeConnector::with_pool(pool.clone()));
        let controller = DrainController::new();
        controller.bind(connector.clone()).unwrap();

        assert_eq!(controller.state(), DrainState::Running);
        controller.disconnect().await.unwrap();

        assert_eq!(connector.pauses.load(Ordering::SeqCst), 1);
        assert_eq!(pool.shutdowns.load(Ordering::SeqCst), 1);
        assert_eq!(controller.state(), DrainState::Draining);
    }

    #[tokio::test]
    async fn test_disconnect_leaves_unmanaged_executor_alone() {
        let connector = Arc::new(FakeConnector::unmanaged());
        let controller = DrainController::new();
        controller.bind(connector.clone()).unwrap();

        controller.disconnect().await.unwrap();

        assert_eq!(connector.pauses.load(Ordering::SeqCst), 1);
        assert!(!connector.executor().is_worker_pool());
        assert_eq!(controller.state(), DrainState::Draining);
    }

    #[tokio::test]
    async fn test_disconnect_twice_repeats_side_effects() {
        let pool = Arc::new(CountingPool::default());
        let connector = Arc::new(FakeConnector::with_pool(pool.clone()));
        let controller = DrainController::new();
        controller.bind(connector.clone()).unwrap();

        controller.disconnect().await.unwrap();
        controller.disconnect().await.unwrap();

        assert_eq!(connector.pauses.load(Ordering::SeqCst), 2);
        assert_eq!(pool.shutdowns.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_disconnect_without_connector() {
        let controller = DrainController::new();

        let err = controller.disconnect().await.unwrap_err();
        assert!(matches!(err, BridgeError::ConnectorNotBound));
        assert_eq!(controller.state(), DrainState::Running);
    }

    #[test]
    fn test_bind_only_once() {
        let controller = DrainController::new();
        controller
            .bind(Arc::new(FakeConnector::unmanaged()))
            .unwrap();

        let err = controller
            .bind(Arc::new(FakeConnector::unmanaged()))
            .unwrap_err();
        assert!(matches!(err, BridgeError::ConnectorAlreadyBound));
        assert!(controller.is_bound());
    }
}
