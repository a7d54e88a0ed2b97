// CLI command definitions

use super::k8s::{
    CreateCommand, DeleteCommand, GetCommand, LabelCommand, ReplaceCommand, ScaleCommand,
};
use super::serve::ServeCommand;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "kube-bridge",
    version,
    about = "Kubernetes API bridge with a drainable admin endpoint",
    long_about = "Serves a read-only view of cluster resources, exposes an instance drain \
                  endpoint, and wraps common Kubernetes operations as CLI commands"
)]
pub struct CliArgs {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP server
    Serve(ServeCommand),

    /// Show one resource as YAML or list resources as a table
    Get(GetCommand),

    /// Create a resource from a YAML manifest
    Create(CreateCommand),

    /// Replace an existing resource from a YAML manifest
    Replace(ReplaceCommand),

    /// Delete a resource
    Delete(DeleteCommand),

    /// Resize a replication controller
    Scale(ScaleCommand),

    /// Set labels on a pod or on a replication controller's pod template
    Label(LabelCommand),
}

impl Commands {
    pub async fn execute(&self) -> anyhow::Result<()> {
        match self {
            Commands::Serve(cmd) => cmd.execute().await,
            Commands::Get(cmd) => cmd.execute().await,
            Commands::Create(cmd) => cmd.execute().await,
            Commands::Replace(cmd) => cmd.execute().await,
            Commands::Delete(cmd) => cmd.execute().await,
            Commands::Scale(cmd) => cmd.execute().await,
            Commands::Label(cmd) => cmd.execute().await,
        }
    }
}
