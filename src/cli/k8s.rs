//! Cluster commands, each a thin wrapper over one adaptor operation

use crate::cli::display::{ControllerInfo, PodInfo, ResourceInfo, TableRenderer};
use crate::cli::manifest::Manifest;
use crate::infrastructure::constants::{load_balancer_label, DEFAULT_NAMESPACE};
use crate::infrastructure::kubernetes::KubernetesApiAdaptor;
use clap::{Args, Parser, ValueEnum};
use serde::Serialize;

/// Connection flags shared by every cluster command
#[derive(Args, Debug, Clone)]
pub struct ClusterArgs {
    /// Kubernetes namespace
    #[arg(long, short = 'n', default_value = DEFAULT_NAMESPACE)]
    pub namespace: String,

    /// Path to kubeconfig file
    /// If not specified, uses default kubeconfig resolution (KUBECONFIG env or ~/.kube/config)
    #[arg(long)]
    pub kubeconfig: Option<String>,

    /// Kubernetes context to use
    /// If not specified, uses current context from kubeconfig
    #[arg(long)]
    pub context: Option<String>,
}

impl ClusterArgs {
    async fn adaptor(&self) -> anyhow::Result<KubernetesApiAdaptor> {
        KubernetesApiAdaptor::connect(self.kubeconfig.clone(), self.context.clone())
            .await
            .map_err(|e| anyhow::anyhow!("Failed to connect to Kubernetes: {}", e))
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    #[value(aliases = ["pods", "po"])]
    Pod,
    #[value(aliases = ["services", "svc"])]
    Service,
    #[value(name = "rc", aliases = ["replicationcontroller", "replicationcontrollers"])]
    ReplicationController,
    #[value(aliases = ["ingresses", "ing"])]
    Ingress,
    #[value(alias = "jobs")]
    Job,
    #[value(alias = "secrets")]
    Secret,
    #[value(aliases = ["namespaces", "ns"])]
    Namespace,
}

impl ResourceKind {
    fn label(&self) -> &'static str {
        match self {
            ResourceKind::Pod => "Pod",
            ResourceKind::Service => "Service",
            ResourceKind::ReplicationController => "ReplicationController",
            ResourceKind::Ingress => "Ingress",
            ResourceKind::Job => "Job",
            ResourceKind::Secret => "Secret",
            ResourceKind::Namespace => "Namespace",
        }
    }
}

fn print_yaml<T: Serialize>(object: &T) -> anyhow::Result<()> {
    print!("{}", serde_yaml::to_string(object)?);
    Ok(())
}

fn print_found<T: Serialize>(
    object: Option<T>,
    kind: ResourceKind,
    name: &str,
    namespace: &str,
) -> anyhow::Result<()> {
    match object {
        Some(object) => print_yaml(&object),
        None if kind == ResourceKind::Namespace => {
            anyhow::bail!("{} {} not found", kind.label(), name)
        }
        None => anyhow::bail!(
            "{} {} not found in namespace {}",
            kind.label(),
            name,
            namespace
        ),
    }
}

#[derive(Parser, Debug, Clone)]
pub struct GetCommand {
    /// Resource kind (pod, service, rc, ingress, job, secret, namespace)
    #[arg(value_enum)]
    pub kind: ResourceKind,

    /// Resource name; lists every resource of the kind when omitted
    pub name: Option<String>,

    /// Only pods owned by this replication controller
    #[arg(long, conflicts_with = "job")]
    pub rc: Option<String>,

    /// Only pods created by this job
    #[arg(long)]
    pub job: Option<String>,

    #[command(flatten)]
    pub cluster: ClusterArgs,
}

impl GetCommand {
    pub async fn execute(&self) -> anyhow::Result<()> {
        if (self.rc.is_some() || self.job.is_some()) && self.kind != ResourceKind::Pod {
            anyhow::bail!("--rc and --job only apply to pods");
        }

        let adaptor = self.cluster.adaptor().await?;
        let namespace = self.cluster.namespace.as_str();
        let renderer = TableRenderer::new();

        if let Some(name) = self.name.as_deref() {
            return match self.kind {
                ResourceKind::Pod => {
                    print_found(adaptor.get_pod(namespace, name).await?, self.kind, name, namespace)
                }
                ResourceKind::Service => print_found(
                    adaptor.get_service(namespace, name).await?,
                    self.kind,
                    name,
                    namespace,
                ),
                ResourceKind::ReplicationController => print_found(
                    adaptor.get_replication_controller(namespace, name).await?,
                    self.kind,
                    name,
                    namespace,
                ),
                ResourceKind::Ingress => print_found(
                    adaptor.get_ingress(namespace, name).await?,
                    self.kind,
                    name,
                    namespace,
                ),
                ResourceKind::Job => {
                    print_found(adaptor.get_job(namespace, name).await?, self.kind, name, namespace)
                }
                ResourceKind::Secret => print_found(
                    adaptor.get_secret(namespace, name).await?,
                    self.kind,
                    name,
                    namespace,
                ),
                ResourceKind::Namespace => {
                    print_found(adaptor.get_namespace(name).await?, self.kind, name, namespace)
                }
            };
        }

        let output = match self.kind {
            ResourceKind::Pod => {
                let pods = if let Some(rc) = self.rc.as_deref() {
                    adaptor.get_replication_controller_pods(namespace, rc).await?
                } else if let Some(job) = self.job.as_deref() {
                    adaptor.get_job_pods(namespace, job).await?
                } else {
                    adaptor.get_pods(namespace).await?
                };
                let infos: Vec<PodInfo> = pods.iter().map(PodInfo::from).collect();
                renderer.render_pods(&infos)
            }
            ResourceKind::ReplicationController => {
                let controllers = adaptor.get_replication_controllers(namespace).await?;
                let infos: Vec<ControllerInfo> =
                    controllers.iter().map(ControllerInfo::from).collect();
                renderer.render_controllers("Replication Controllers", "READY", &infos)
            }
            ResourceKind::Job => {
                let jobs = adaptor.get_jobs(namespace).await?;
                let infos: Vec<ControllerInfo> = jobs.iter().map(ControllerInfo::from).collect();
                renderer.render_controllers("Jobs", "COMPLETIONS", &infos)
            }
            ResourceKind::Service => {
                let services = adaptor.get_services(namespace).await?;
                let infos: Vec<ResourceInfo> = services.iter().map(ResourceInfo::from).collect();
                renderer.render_resources("Services", "TYPE / CLUSTER-IP", &infos)
            }
            ResourceKind::Ingress => {
                let ingresses = adaptor.get_ingresses(namespace).await?;
                let infos: Vec<ResourceInfo> = ingresses.iter().map(ResourceInfo::from).collect();
                renderer.render_resources("Ingresses", "HOSTS", &infos)
            }
            ResourceKind::Secret => {
                let secrets = adaptor.get_secrets(namespace).await?;
                let infos: Vec<ResourceInfo> = secrets.iter().map(ResourceInfo::from).collect();
                renderer.render_resources("Secrets", "TYPE", &infos)
            }
            ResourceKind::Namespace => {
                let namespaces = adaptor.get_namespaces().await?;
                let infos: Vec<ResourceInfo> =
                    namespaces.iter().map(ResourceInfo::from).collect();
                renderer.render_resources("Namespaces", "STATUS", &infos)
            }
        };

        println!("{}", output);
        Ok(())
    }
}

#[derive(Parser, Debug, Clone)]
pub struct CreateCommand {
    /// Manifest file (YAML)
    #[arg(long, short = 'f', value_name = "PATH")]
    pub file: String,

    #[command(flatten)]
    pub cluster: ClusterArgs,
}

impl CreateCommand {
    pub async fn execute(&self) -> anyhow::Result<()> {
        let manifest = Manifest::from_file(&self.file)?;
        let namespace = target_namespace(&self.cluster, &manifest);
        let adaptor = self.cluster.adaptor().await?;

        let created = match &manifest {
            Manifest::Ingress(o) => adaptor.create_ingress(&namespace, o).await?.metadata,
            Manifest::ReplicationController(o) => {
                adaptor
                    .create_replication_controller(&namespace, o)
                    .await?
                    .metadata
            }
            Manifest::Service(o) => adaptor.create_service(&namespace, o).await?.metadata,
            Manifest::Secret(o) => adaptor.create_secret(&namespace, o).await?.metadata,
            Manifest::Namespace(o) => adaptor.create_namespace(o).await?.metadata,
            Manifest::Job(o) => adaptor.create_job(&namespace, o).await?.metadata,
        };

        println!(
            "{} {} created",
            manifest.kind(),
            created.name.unwrap_or_default()
        );
        Ok(())
    }
}

/// An explicit `-n` wins over the manifest's own namespace.
fn target_namespace(cluster: &ClusterArgs, manifest: &Manifest) -> String {
    if cluster.namespace != DEFAULT_NAMESPACE {
        return cluster.namespace.clone();
    }
    manifest
        .namespace()
        .unwrap_or(DEFAULT_NAMESPACE)
        .to_string()
}

#[derive(Parser, Debug, Clone)]
pub struct ReplaceCommand {
    /// Name of the resource to replace
    pub name: String,

    /// Manifest file (YAML): Ingress, Service or ReplicationController
    #[arg(long, short = 'f', value_name = "PATH")]
    pub file: String,

    #[command(flatten)]
    pub cluster: ClusterArgs,
}

impl ReplaceCommand {
    pub async fn execute(&self) -> anyhow::Result<()> {
        let manifest = Manifest::from_file(&self.file)?;
        let namespace = target_namespace(&self.cluster, &manifest);
        let adaptor = self.cluster.adaptor().await?;
        let name = self.name.as_str();

        match &manifest {
            Manifest::Ingress(o) => {
                adaptor.replace_ingress(&namespace, name, o).await?;
            }
            Manifest::Service(o) => {
                adaptor.replace_service(&namespace, name, o).await?;
            }
            Manifest::ReplicationController(o) => {
                adaptor
                    .replace_replication_controller(&namespace, name, o)
                    .await?;
            }
            other => anyhow::bail!("{} resources cannot be replaced", other.kind()),
        }

        println!("{} {} replaced", manifest.kind(), name);
        Ok(())
    }
}

#[derive(Parser, Debug, Clone)]
pub struct DeleteCommand {
    #[arg(value_enum)]
    pub kind: ResourceKind,

    pub name: String,

    #[command(flatten)]
    pub cluster: ClusterArgs,
}

impl DeleteCommand {
    pub async fn execute(&self) -> anyhow::Result<()> {
        let adaptor = self.cluster.adaptor().await?;
        let namespace = self.cluster.namespace.as_str();
        let name = self.name.as_str();

        let deleted = match self.kind {
            ResourceKind::Pod => adaptor.delete_pod(namespace, name).await?,
            ResourceKind::Service => adaptor.delete_service(namespace, name).await?,
            ResourceKind::ReplicationController => {
                adaptor
                    .hard_destroy_replication_controller(namespace, name)
                    .await?
            }
            ResourceKind::Ingress => adaptor.delete_ingress(namespace, name).await?,
            ResourceKind::Job => adaptor.delete_job(namespace, name).await?,
            ResourceKind::Secret => adaptor.delete_secret(namespace, name).await?,
            ResourceKind::Namespace => adaptor.delete_namespace(name).await?,
        };

        if deleted {
            println!("{} {} deleted", self.kind.label(), name);
        } else {
            println!("{} {} not found", self.kind.label(), name);
        }
        Ok(())
    }
}

#[derive(Parser, Debug, Clone)]
pub struct ScaleCommand {
    /// Replication controller name
    pub name: String,

    /// Desired replica count
    #[arg(long)]
    pub replicas: i32,

    #[command(flatten)]
    pub cluster: ClusterArgs,
}

impl ScaleCommand {
    pub async fn execute(&self) -> anyhow::Result<()> {
        if self.replicas < 0 {
            anyhow::bail!("--replicas must be >= 0");
        }

        let adaptor = self.cluster.adaptor().await?;
        adaptor
            .resize_replication_controller(&self.cluster.namespace, &self.name, self.replicas)
            .await?;

        println!(
            "ReplicationController {} scaled to {} replicas",
            self.name, self.replicas
        );
        Ok(())
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelTarget {
    Pod,
    /// The pod template of a replication controller
    Rc,
}

#[derive(Parser, Debug, Clone)]
pub struct LabelCommand {
    #[arg(value_enum)]
    pub target: LabelTarget,

    pub name: String,

    /// Label key to set (repeatable)
    #[arg(long = "key", value_name = "KEY")]
    pub keys: Vec<String>,

    /// Load balancer to toggle, shorthand for --key load-balancer-NAME (repeatable)
    #[arg(long = "load-balancer", value_name = "NAME")]
    pub load_balancers: Vec<String>,

    /// Value written to every key
    #[arg(long)]
    pub value: String,

    #[command(flatten)]
    pub cluster: ClusterArgs,
}

impl LabelCommand {
    /// Explicit keys first, then load balancer keys, each in the order given.
    pub fn label_keys(&self) -> Vec<String> {
        self.keys
            .iter()
            .cloned()
            .chain(self.load_balancers.iter().map(|lb| load_balancer_label(lb)))
            .collect()
    }

    pub async fn execute(&self) -> anyhow::Result<()> {
        let keys = self.label_keys();
        if keys.is_empty() {
            anyhow::bail!("at least one --key or --load-balancer is required");
        }

        let adaptor = self.cluster.adaptor().await?;
        let namespace = self.cluster.namespace.as_str();

        let labels = match self.target {
            LabelTarget::Pod => adaptor
                .toggle_pod_labels(namespace, &self.name, keys.as_slice(), &self.value)
                .await?
                .metadata
                .labels
                .unwrap_or_default(),
            LabelTarget::Rc => adaptor
                .toggle_replication_controller_spec_labels(
                    namespace,
                    &self.name,
                    keys.as_slice(),
                    &self.value,
                )
                .await?
                .spec
                .and_then(|s| s.template)
                .and_then(|t| t.metadata)
                .and_then(|m| m.labels)
                .unwrap_or_default(),
        };

        println!("{} labels:", self.name);
        for (key, value) in &labels {
            println!("  {}={}", key, value);
        }
        Ok(())
    }
}
