//! Table rendering for CLI output

use super::{ColorTheme, StatusIcon};
use chrono::{DateTime, Utc};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Table};
use k8s_openapi::api::batch::v1::Job;
use k8s_openapi::api::core::v1::{Namespace, Pod, ReplicationController, Secret, Service};
use k8s_openapi::api::networking::v1::Ingress;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

/// Pod information for list display
#[derive(Debug, Clone)]
pub struct PodInfo {
    pub name: String,
    pub namespace: String,
    pub phase: String,
    pub ready: u32,
    pub containers: u32,
    pub restarts: i32,
    pub created: Option<DateTime<Utc>>,
}

/// Replicated workload (replication controller or job) for list display
#[derive(Debug, Clone)]
pub struct ControllerInfo {
    pub name: String,
    pub namespace: String,
    pub ready: u32,
    pub desired: u32,
    pub created: Option<DateTime<Utc>>,
}

/// Any other resource: a name plus one kind-specific detail column
#[derive(Debug, Clone)]
pub struct ResourceInfo {
    pub name: String,
    pub namespace: Option<String>,
    pub detail: String,
    pub created: Option<DateTime<Utc>>,
}

fn name_of(meta: &ObjectMeta) -> String {
    meta.name.clone().unwrap_or_default()
}

fn namespace_of(meta: &ObjectMeta) -> String {
    meta.namespace.clone().unwrap_or_default()
}

fn created_of(meta: &ObjectMeta) -> Option<DateTime<Utc>> {
    meta.creation_timestamp.as_ref().map(|t| t.0)
}

fn non_negative(value: Option<i32>) -> u32 {
    value.unwrap_or(0).max(0) as u32
}

impl From<&Pod> for PodInfo {
    fn from(pod: &Pod) -> Self {
        let statuses = pod
            .status
            .as_ref()
            .and_then(|s| s.container_statuses.as_deref())
            .unwrap_or_default();

        Self {
            name: name_of(&pod.metadata),
            namespace: namespace_of(&pod.metadata),
            phase: pod
                .status
                .as_ref()
                .and_then(|s| s.phase.clone())
                .unwrap_or_else(|| "Unknown".to_string()),
            ready: statuses.iter().filter(|c| c.ready).count() as u32,
            containers: pod
                .spec
                .as_ref()
                .map(|s| s.containers.len() as u32)
                .unwrap_or(statuses.len() as u32),
            restarts: statuses.iter().map(|c| c.restart_count).sum(),
            created: created_of(&pod.metadata),
        }
    }
}

impl From<&ReplicationController> for ControllerInfo {
    fn from(rc: &ReplicationController) -> Self {
        Self {
            name: name_of(&rc.metadata),
            namespace: namespace_of(&rc.metadata),
            ready: non_negative(rc.status.as_ref().and_then(|s| s.ready_replicas)),
            // Unset replicas defaults to 1 on the server.
            desired: non_negative(rc.spec.as_ref().and_then(|s| s.replicas).or(Some(1))),
            created: created_of(&rc.metadata),
        }
    }
}

impl From<&Job> for ControllerInfo {
    fn from(job: &Job) -> Self {
        Self {
            name: name_of(&job.metadata),
            namespace: namespace_of(&job.metadata),
            ready: non_negative(job.status.as_ref().and_then(|s| s.succeeded)),
            desired: non_negative(job.spec.as_ref().and_then(|s| s.completions).or(Some(1))),
            created: created_of(&job.metadata),
        }
    }
}

impl From<&Service> for ResourceInfo {
    fn from(service: &Service) -> Self {
        let spec = service.spec.as_ref();
        let service_type = spec
            .and_then(|s| s.type_.clone())
            .unwrap_or_else(|| "ClusterIP".to_string());
        let cluster_ip = spec
            .and_then(|s| s.cluster_ip.clone())
            .unwrap_or_else(|| "<none>".to_string());

        Self {
            name: name_of(&service.metadata),
            namespace: Some(namespace_of(&service.metadata)),
            detail: format!("{} {}", service_type, cluster_ip),
            created: created_of(&service.metadata),
        }
    }
}

impl From<&Ingress> for ResourceInfo {
    fn from(ingress: &Ingress) -> Self {
        let hosts: Vec<String> = ingress
            .spec
            .as_ref()
            .and_then(|s| s.rules.as_ref())
            .map(|rules| rules.iter().filter_map(|r| r.host.clone()).collect())
            .unwrap_or_default();

        Self {
            name: name_of(&ingress.metadata),
            namespace: Some(namespace_of(&ingress.metadata)),
            detail: if hosts.is_empty() {
                "*".to_string()
            } else {
                hosts.join(",")
            },
            created: created_of(&ingress.metadata),
        }
    }
}

impl From<&Secret> for ResourceInfo {
    fn from(secret: &Secret) -> Self {
        Self {
            name: name_of(&secret.metadata),
            namespace: Some(namespace_of(&secret.metadata)),
            detail: secret.type_.clone().unwrap_or_else(|| "Opaque".to_string()),
            created: created_of(&secret.metadata),
        }
    }
}

impl From<&Namespace> for ResourceInfo {
    fn from(namespace: &Namespace) -> Self {
        Self {
            name: name_of(&namespace.metadata),
            namespace: None,
            detail: namespace
                .status
                .as_ref()
                .and_then(|s| s.phase.clone())
                .unwrap_or_else(|| "Unknown".to_string()),
            created: created_of(&namespace.metadata),
        }
    }
}

/// Compact age in the style of kubectl: 45s, 12m, 3h, 9d.
pub fn format_age(created: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(created) = created else {
        return "<unknown>".to_string();
    };

    let seconds = (now - created).num_seconds().max(0);
    match seconds {
        s if s < 60 => format!("{}s", s),
        s if s < 3_600 => format!("{}m", s / 60),
        s if s < 86_400 => format!("{}h", s / 3_600),
        s => format!("{}d", s / 86_400),
    }
}

/// Table renderer for formatted output
pub struct TableRenderer {
    theme: ColorTheme,
    now: DateTime<Utc>,
}

impl Default for TableRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TableRenderer {
    /// Create a new table renderer with default theme
    pub fn new() -> Self {
        Self::at(Utc::now())
    }

    /// Renderer computing ages relative to `now`
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            theme: ColorTheme::default(),
            now,
        }
    }

    fn table(headers: &[&str]) -> Table {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(
                headers
                    .iter()
                    .map(|h| Cell::new(h).set_alignment(CellAlignment::Left))
                    .collect::<Vec<_>>(),
            );
        table
    }

    fn frame(title: &str, count: usize, table: &Table) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            "╭─ {} {} ─╮\n",
            title,
            format!("[{}]", count).bright_black()
        ));
        output.push_str(&table.to_string());
        output.push('\n');
        output
    }

    /// Render pods as a formatted table
    pub fn render_pods(&self, pods: &[PodInfo]) -> String {
        if pods.is_empty() {
            return "No pods found".to_string();
        }

        let mut table = Self::table(&["NAME", "NAMESPACE", "READY", "STATUS", "RESTARTS", "AGE"]);

        for pod in pods {
            table.add_row(vec![
                Cell::new(&pod.name),
                Cell::new(&pod.namespace),
                Cell::new(format!("{}/{}", pod.ready, pod.containers))
                    .fg(self.theme.get_replica_color(pod.ready, pod.containers)),
                Cell::new(format!(
                    "{} {}",
                    StatusIcon::get_phase_icon(&pod.phase),
                    pod.phase
                ))
                .fg(self.theme.get_phase_color(&pod.phase)),
                Cell::new(pod.restarts).set_alignment(CellAlignment::Right),
                Cell::new(format_age(pod.created, self.now)),
            ]);
        }

        let mut output = Self::frame("Pods", pods.len(), &table);
        output.push_str(&format!(
            "Legend: {} Running  {} Pending  {} Failed\n",
            StatusIcon::SUCCESS.green(),
            StatusIcon::PENDING.yellow(),
            StatusIcon::ERROR.red()
        ));
        output
    }

    /// Render replication controllers or jobs; `ready_header` names the progress column
    pub fn render_controllers(
        &self,
        title: &str,
        ready_header: &str,
        controllers: &[ControllerInfo],
    ) -> String {
        if controllers.is_empty() {
            return format!("No {} found", title.to_lowercase());
        }

        let mut table = Self::table(&["NAME", "NAMESPACE", ready_header, "AGE"]);

        for controller in controllers {
            let icon = StatusIcon::get_replica_icon(controller.ready, controller.desired);
            table.add_row(vec![
                Cell::new(&controller.name),
                Cell::new(&controller.namespace),
                Cell::new(format!(
                    "{} {}/{}",
                    icon, controller.ready, controller.desired
                ))
                .fg(self
                    .theme
                    .get_replica_color(controller.ready, controller.desired)),
                Cell::new(format_age(controller.created, self.now)),
            ]);
        }

        Self::frame(title, controllers.len(), &table)
    }

    /// Render any other resource list with one detail column
    pub fn render_resources(
        &self,
        title: &str,
        detail_header: &str,
        resources: &[ResourceInfo],
    ) -> String {
        if resources.is_empty() {
            return format!("No {} found", title.to_lowercase());
        }

        let namespaced = resources.iter().any(|r| r.namespace.is_some());
        let mut headers = vec!["NAME"];
        if namespaced {
            headers.push("NAMESPACE");
        }
        headers.push(detail_header);
        headers.push("AGE");

        let mut table = Self::table(&headers);

        for resource in resources {
            let mut row = vec![Cell::new(&resource.name)];
            if namespaced {
                row.push(Cell::new(resource.namespace.as_deref().unwrap_or_default()));
            }
            row.push(Cell::new(&resource.detail).fg(self.theme.info));
            row.push(Cell::new(format_age(resource.created, self.now)));
            table.add_row(row);
        }

        Self::frame(title, resources.len(), &table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use k8s_openapi::api::core::v1::{
        Container, ContainerStatus, PodSpec, PodStatus, ReplicationControllerSpec,
        ReplicationControllerStatus,
    };
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::Time;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap()
    }

    fn meta(name: &str, created: DateTime<Utc>) -> ObjectMeta {
        ObjectMeta {
            name: Some(name.to_string()),
            namespace: Some("web".to_string()),
            creation_timestamp: Some(Time(created)),
            ..Default::default()
        }
    }

    #[test]
    fn test_format_age() {
        let now = now();
        assert_eq!(format_age(Some(now - Duration::seconds(42)), now), "42s");
        assert_eq!(format_age(Some(now - Duration::minutes(5)), now), "5m");
        assert_eq!(format_age(Some(now - Duration::hours(3)), now), "3h");
        assert_eq!(format_age(Some(now - Duration::days(9)), now), "9d");
        assert_eq!(format_age(None, now), "<unknown>");
    }

    #[test]
    fn test_pod_info_from_pod() {
        let pod = Pod {
            metadata: meta("web-1", now() - Duration::minutes(2)),
            spec: Some(PodSpec {
                containers: vec![Container::default(), Container::default()],
                ..Default::default()
            }),
            status: Some(PodStatus {
                phase: Some("Running".to_string()),
                container_statuses: Some(vec![
                    ContainerStatus {
                        ready: true,
                        restart_count: 1,
                        ..Default::default()
                    },
                    ContainerStatus {
                        ready: false,
                        restart_count: 2,
                        ..Default::default()
                    },
                ]),
                ..Default::default()
            }),
        };

        let info = PodInfo::from(&pod);
        assert_eq!(info.name, "web-1");
        assert_eq!(info.phase, "Running");
        assert_eq!((info.ready, info.containers), (1, 2));
        assert_eq!(info.restarts, 3);
    }

    #[test]
    fn test_controller_info_defaults_desired_to_one() {
        let rc = ReplicationController {
            metadata: meta("frontend-v001", now()),
            spec: Some(ReplicationControllerSpec::default()),
            status: Some(ReplicationControllerStatus {
                ready_replicas: Some(1),
                ..Default::default()
            }),
        };

        let info = ControllerInfo::from(&rc);
        assert_eq!((info.ready, info.desired), (1, 1));
    }

    #[test]
    fn test_render_empty_lists() {
        let renderer = TableRenderer::at(now());
        assert_eq!(renderer.render_pods(&[]), "No pods found");
        assert_eq!(
            renderer.render_controllers("Jobs", "COMPLETIONS", &[]),
            "No jobs found"
        );
    }

    #[test]
    fn test_render_pods() {
        let renderer = TableRenderer::at(now());
        let output = renderer.render_pods(&[PodInfo {
            name: "web-1".to_string(),
            namespace: "web".to_string(),
            phase: "Pending".to_string(),
            ready: 0,
            containers: 1,
            restarts: 0,
            created: Some(now() - Duration::hours(2)),
        }]);

        assert!(output.contains("web-1"));
        assert!(output.contains("0/1"));
        assert!(output.contains("Pending"));
        assert!(output.contains("2h"));
    }

    #[test]
    fn test_render_cluster_scoped_resources_omit_namespace() {
        let renderer = TableRenderer::at(now());
        let output = renderer.render_resources(
            "Namespaces",
            "STATUS",
            &[ResourceInfo {
                name: "payments".to_string(),
                namespace: None,
                detail: "Active".to_string(),
                created: None,
            }],
        );

        assert!(output.contains("payments"));
        assert!(output.contains("Active"));
        assert!(!output.contains("NAMESPACE"));
    }
}
