//! Build automation for kube-bridge
//!
//! Usage: cargo xtask <command>
//!
//! Available commands:
//! - build: Build the project
//! - test: Run tests
//! - serve: Run the server locally with the admin endpoint enabled
//! - dist: Create distribution packages
//! - ci: Run CI checks

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use xshell::{cmd, Shell};

const BIN: &str = "kube-bridge";
const SAMPLE_CONFIG: &str = "config/kube-bridge.toml";

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation for kube-bridge")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the project
    Build {
        /// Build in release mode
        #[arg(long)]
        release: bool,
    },
    /// Run tests
    Test {
        /// Run only integration tests
        #[arg(long)]
        integration: bool,
    },
    /// Run the server against the sample config, admin endpoint enabled
    Serve {
        /// Port to listen on
        #[arg(long, default_value = "7002")]
        port: u16,
        /// Serve without a Kubernetes client
        #[arg(long)]
        offline: bool,
    },
    /// Create distribution packages (binary plus sample config)
    Dist {
        /// Target triple (e.g., x86_64-unknown-linux-gnu)
        #[arg(long)]
        target: Option<String>,
    },
    /// Run CI checks (format, clippy, test)
    Ci,
    /// Format code
    Format {
        /// Check formatting without modifying files
        #[arg(long)]
        check: bool,
    },
    /// Run clippy
    Clippy,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let sh = Shell::new()?;

    sh.change_dir(project_root()?);

    match cli.command {
        Commands::Build { release } => build(&sh, release),
        Commands::Test { integration } => test(&sh, integration),
        Commands::Serve { port, offline } => serve(&sh, port, offline),
        Commands::Dist { target } => dist(&sh, target),
        Commands::Ci => ci(&sh),
        Commands::Format { check } => format(&sh, check),
        Commands::Clippy => clippy(&sh),
    }
}

fn build(sh: &Shell, release: bool) -> Result<()> {
    println!("🔨 Building {}...", BIN);

    if release {
        cmd!(sh, "cargo build --release --bin {BIN}").run()?;
        println!("✅ Release build completed: target/release/{}", BIN);
    } else {
        cmd!(sh, "cargo build --bin {BIN}").run()?;
        println!("✅ Debug build completed: target/debug/{}", BIN);
    }

    Ok(())
}

fn test(sh: &Shell, integration: bool) -> Result<()> {
    println!("🧪 Running tests...");

    if integration {
        cmd!(sh, "cargo test -p {BIN} --test admin_endpoint_test --test config_test").run()?;
    } else {
        cmd!(sh, "cargo test --all").run()?;
    }

    println!("✅ All tests passed");
    Ok(())
}

fn serve(sh: &Shell, port: u16, offline: bool) -> Result<()> {
    let port = format!("-Dserver.port={}", port);
    let offline = if offline { vec!["--no-kubernetes"] } else { Vec::new() };

    println!("🚀 Serving with {} ({})", SAMPLE_CONFIG, port);
    cmd!(
        sh,
        "cargo run --bin {BIN} -- -v serve --config-file {SAMPLE_CONFIG} {port} -Dadmin.instance.enabled=true {offline...}"
    )
    .run()?;

    Ok(())
}

fn dist(sh: &Shell, target: Option<String>) -> Result<()> {
    println!("📦 Creating distribution package...");

    if let Some(ref target_triple) = target {
        cmd!(sh, "cargo build --release --bin {BIN} --target {target_triple}").run()?;
    } else {
        cmd!(sh, "cargo build --release --bin {BIN}").run()?;
    }

    let root = project_root()?;
    let dist_dir = root.join("dist");
    sh.create_dir(dist_dir.join("config"))?;

    let binary_src = match target {
        Some(ref target_triple) => root.join(format!("target/{}/release/{}", target_triple, BIN)),
        None => root.join(format!("target/release/{}", BIN)),
    };
    sh.copy_file(&binary_src, dist_dir.join(BIN))?;
    sh.copy_file(root.join(SAMPLE_CONFIG), dist_dir.join(SAMPLE_CONFIG))?;

    let version = env!("CARGO_PKG_VERSION");
    let archive_name = match target {
        Some(ref target_triple) => format!("{}-{}-{}.tar.gz", BIN, version, target_triple),
        None => format!("{}-{}.tar.gz", BIN, version),
    };

    cmd!(sh, "tar -czf {archive_name} -C dist {BIN} config")
        .run()
        .context("Failed to create tarball")?;

    println!("✅ Distribution package created: {}", archive_name);
    Ok(())
}

fn ci(sh: &Shell) -> Result<()> {
    println!("🔍 Running CI checks...");

    println!("\n📝 Checking formatting...");
    format(sh, true)?;

    println!("\n🔧 Running clippy...");
    clippy(sh)?;

    println!("\n🧪 Running tests...");
    test(sh, false)?;

    println!("\n✅ All CI checks passed!");
    Ok(())
}

fn format(sh: &Shell, check: bool) -> Result<()> {
    if check {
        cmd!(sh, "cargo fmt --all -- --check").run()?;
        println!("✅ Code formatting is correct");
    } else {
        cmd!(sh, "cargo fmt --all").run()?;
        println!("✅ Code formatted");
    }
    Ok(())
}

fn clippy(sh: &Shell) -> Result<()> {
    cmd!(
        sh,
        "cargo clippy --all-targets --all-features -- -D warnings"
    )
    .run()?;
    println!("✅ Clippy checks passed");
    Ok(())
}

fn project_root() -> Result<PathBuf> {
    Path::new(&env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(1)
        .map(Path::to_path_buf)
        .context("xtask must live one level below the workspace root")
}
