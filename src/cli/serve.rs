//! `serve`: run the HTTP server until it is stopped or drained

use crate::domain::config::{apply_overrides, parse_dynamic_configs, BridgeConf};
use crate::infrastructure::constants::CONF_FILE_ENV;
use crate::infrastructure::kubernetes::KubernetesApiAdaptor;
use crate::infrastructure::server::Application;
use clap::Parser;
use tracing::{info, warn};

#[derive(Parser, Debug, Clone)]
pub struct ServeCommand {
    /// Path to the service configuration file (TOML)
    #[arg(long, value_name = "PATH", env = CONF_FILE_ENV)]
    pub config_file: Option<String>,

    /// Dynamic configuration properties to override any settings (-D key=value)
    ///
    /// Server: server.host, server.port, server.workers, server.shutdown-timeout
    /// Admin: admin.instance.enabled
    /// Kubernetes: kubernetes.namespace, kubernetes.config.file, kubernetes.context
    ///
    /// Example: -Dserver.port=8080 -Dadmin.instance.enabled=true
    #[arg(short = 'D', value_name = "KEY=VALUE")]
    pub properties: Vec<String>,

    /// Serve without a Kubernetes client (admin and health endpoints only)
    #[arg(long)]
    pub no_kubernetes: bool,
}

impl ServeCommand {
    /// Configuration file (or defaults) with `-D` overrides applied and validated.
    pub fn resolve_conf(&self) -> anyhow::Result<BridgeConf> {
        let mut conf = BridgeConf::load(self.config_file.as_deref())?;

        if !self.properties.is_empty() {
            let overrides = parse_dynamic_configs(&self.properties)
                .map_err(|e| anyhow::anyhow!("Failed to parse dynamic configs: {}", e))?;
            apply_overrides(&overrides, &mut conf)?;
        }

        conf.validate()?;
        Ok(conf)
    }

    pub async fn execute(&self) -> anyhow::Result<()> {
        let conf = self.resolve_conf()?;

        let adaptor = if self.no_kubernetes {
            None
        } else {
            match KubernetesApiAdaptor::connect(
                conf.kubernetes.kubeconfig.clone(),
                conf.kubernetes.context.clone(),
            )
            .await
            {
                Ok(adaptor) => Some(adaptor),
                Err(e) => {
                    warn!(
                        "Failed to create Kubernetes client: {}. Running without resource endpoints.",
                        e
                    );
                    None
                }
            }
        };

        let application = Application::build(conf, adaptor).await?;
        application.run_until_stopped().await?;

        info!("Server stopped");
        Ok(())
    }
}
