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

use crate::domain::config::BridgeConf;
use crate::domain::drain::DrainController;
use crate::infrastructure::kubernetes::KubernetesApiAdaptor;
use crate::infrastructure::server::connector::ActixConnector;
use crate::infrastructure::server::routes::{admin, health_check::health_check, resources};
use crate::shared::error::Result;
use actix_web::{dev::Server, web, App, HttpServer};
use std::net::TcpListener;
use std::sync::Arc;
use tracing::info;
use tracing_actix_web::TracingLogger;

pub struct Application {
    port: u16,
    server: Server,
    drain: Arc<DrainController>,
}

impl Application {
    pub async fn build(conf: BridgeConf, adaptor: Option<KubernetesApiAdaptor>) -> Result<Self> {
        let listener = TcpListener::bind(conf.server.address())?;
        let port = listener.local_addr()?.port();

        let drain = Arc::new(DrainController::new());
        let server = run(&conf, listener, drain.clone(), adaptor)?;
        drain.bind(Arc::new(ActixConnector::new(server.handle())))?;

        info!(
            "Listening on {}:{} (admin instance endpoint {})",
            conf.server.host,
            port,
            if conf.admin.instance.enabled {
                "enabled"
            } else {
                "disabled"
            }
        );

        Ok(Self {
            port,
            server,
            drain,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn drain_controller(&self) -> Arc<DrainController> {
        self.drain.clone()
    }

    pub async fn run_until_stopped(self) -> std::result::Result<(), std::io::Error> {
        self.server.await
    }
}

// The adaptor is optional so the server can run without cluster access.
pub fn run(
    conf: &BridgeConf,
    listener: TcpListener,
    drain: Arc<DrainController>,
    adaptor: Option<KubernetesApiAdaptor>,
) -> Result<Server> {
    let admin_enabled = conf.admin.instance.enabled;
    let drain = web::Data::from(drain);
    let adaptor = adaptor.map(web::Data::new);

    let server = HttpServer::new(move || {
        let app = App::new()
            .wrap(TracingLogger::default())
            .service(health_check)
            .app_data(drain.clone());

        let app = if admin_enabled {
            app.configure(admin::configure)
        } else {
            app
        };

        if let Some(adaptor) = adaptor.clone() {
            app.app_data(adaptor).configure(resources::configure)
        } else {
            app
        }
    })
    .workers(conf.server.workers)
    .shutdown_timeout(conf.server.shutdown_timeout_secs)
    .listen(listener)?
    .run();

    Ok(server)
}
