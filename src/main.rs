use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use pageprobe_cli::config::ProbeConfig;
use pageprobe_cli::flows::{self, FlowReport};
use pageprobe_test_data::DataGen;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use artifact_store::ArtifactStore;

#[derive(Parser)]
#[command(
    name = "pageprobe",
    version,
    about = "Retry-verified browser probing toolkit"
)]
struct Cli {
    /// Path to a config file (TOML/YAML/JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the built-in probe flows against the scripted page engine
    Run {
        /// Run a single flow instead of all of them
        #[arg(long)]
        flow: Option<String>,

        /// Seed the data generator for reproducible runs
        #[arg(long)]
        seed: Option<u64>,

        /// Directory screenshots are written into
        #[arg(long)]
        artifacts_dir: Option<PathBuf>,
    },

    /// List the available flows
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let mut cfg = ProbeConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::List => {
            for flow in flows::FLOWS {
                println!("{flow}");
            }
            Ok(())
        }
        Commands::Run {
            flow,
            seed,
            artifacts_dir,
        } => {
            if seed.is_some() {
                cfg.seed = seed;
            }
            if let Some(dir) = artifacts_dir {
                cfg.artifacts_dir = dir;
            }
            run(cfg, flow).await
        }
    }
}

async fn run(cfg: ProbeConfig, only: Option<String>) -> Result<()> {
    let mut data = match cfg.seed {
        Some(seed) => {
            info!(seed, "seeding data generator");
            DataGen::seeded(seed)
        }
        None => DataGen::new(),
    };
    let store = ArtifactStore::new(&cfg.artifacts_dir);

    let selected: Vec<&str> = match &only {
        Some(name) => vec![name.as_str()],
        None => flows::FLOWS.to_vec(),
    };

    let mut reports = Vec::new();
    for name in selected {
        info!(flow = name, "running flow");
        let report = flows::run_flow(name, &cfg, &mut data, &store).await?;
        print_report(&report);
        reports.push(report);
    }

    let failed: usize = reports.iter().map(FlowReport::failed).sum();
    let passed: usize = reports.iter().map(FlowReport::passed).sum();
    println!("\n{} step(s) passed, {} failed", passed, failed);

    if failed > 0 {
        anyhow::bail!("{failed} step(s) failed");
    }
    Ok(())
}

fn print_report(report: &FlowReport) {
    println!("\nflow: {}", report.flow);
    for step in &report.steps {
        let mark = if step.ok { "ok " } else { "FAIL" };
        println!("  [{mark}] {} - {}", step.name, step.detail);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}
