//! Headless driver for the agent demo engine
//!
//! Runs a session against simulated time and prints every snapshot that
//! changed, as text or JSON lines. Logs go to stderr (`RUST_LOG`).

use agent_demo_core_rs::{DemoConfig, DemoSession, DemoSnapshot, Layer, SubmitOutcome};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Agent demo - scripted multi-agent dashboard, headless
#[derive(Parser)]
#[command(name = "agent-demo")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a session and print snapshots as they change
    Run {
        /// Preset to start from: classic or role-catalog
        #[arg(long, default_value = "role-catalog")]
        variant: String,

        /// JSON config file, overrides the preset
        #[arg(long)]
        config: Option<PathBuf>,

        /// RNG seed
        #[arg(long)]
        seed: Option<u64>,

        /// Simulated milliseconds to run for
        #[arg(long, default_value_t = 20_000)]
        duration: u64,

        /// Sampling step in simulated milliseconds
        #[arg(long, default_value_t = 100)]
        step: u64,

        /// Role to select before the first cycle
        #[arg(long)]
        role: Option<String>,

        /// Submit this query manually
        #[arg(long)]
        submit: Option<String>,

        /// Time of the manual submit
        #[arg(long, default_value_t = 0, requires = "submit")]
        at: u64,

        /// Print JSON lines instead of text
        #[arg(long)]
        json: bool,
    },

    /// List roles, their agents per layer and sample queries
    Roles {
        #[arg(long, default_value = "role-catalog")]
        variant: String,
    },

    /// Print the phase table as JSON
    Phases {
        #[arg(long, default_value = "role-catalog")]
        variant: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,agent_demo_cli=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            variant,
            config,
            seed,
            duration,
            step,
            role,
            submit,
            at,
            json,
        } => {
            let mut demo_config = match config {
                Some(path) => load_config(&path)?,
                None => preset(&variant)?,
            };
            if let Some(seed) = seed {
                demo_config = demo_config.with_seed(seed);
            }
            if let Some(role) = role {
                demo_config = demo_config.with_initial_role(&role);
            }
            run(demo_config, duration, step, submit.map(|text| (at, text)), json)
        }
        Commands::Roles { variant } => roles(&preset(&variant)?),
        Commands::Phases { variant } => {
            let config = preset(&variant)?;
            println!("{}", serde_json::to_string_pretty(&config.phases)?);
            Ok(())
        }
    }
}

fn preset(variant: &str) -> Result<DemoConfig> {
    match DemoConfig::preset(variant) {
        Some(config) => Ok(config),
        None => bail!("unknown variant '{}', expected classic or role-catalog", variant),
    }
}

fn load_config(path: &PathBuf) -> Result<DemoConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    DemoConfig::from_json(&text)
        .with_context(|| format!("failed to parse config {}", path.display()))
}

fn run(
    config: DemoConfig,
    duration: u64,
    step: u64,
    submit: Option<(u64, String)>,
    json: bool,
) -> Result<()> {
    if step == 0 {
        bail!("--step must be positive");
    }

    let mut session = DemoSession::new(config).context("invalid demo config")?;
    info!(session = %session.session_id(), variant = session.variant(), "running");

    let mut pending_submit = submit;
    let mut last: Option<DemoSnapshot> = None;
    let mut now = 0;

    loop {
        if pending_submit.as_ref().is_some_and(|(at, _)| *at <= now) {
            if let Some((at, text)) = pending_submit.take() {
                session.advance_to(at);
                match session.submit_query(&text) {
                    SubmitOutcome::Started { run_token } => {
                        info!(run_token, "manual submit started a run")
                    }
                    outcome => warn!(?outcome, "manual submit ignored"),
                }
            }
        }

        session.advance_to(now);
        let snapshot = session.snapshot();
        if last.as_ref().map_or(true, |prev| changed(prev, &snapshot)) {
            print_snapshot(&snapshot, json)?;
            last = Some(snapshot);
        }

        if now >= duration {
            break;
        }
        now = (now + step).min(duration);
    }

    let log = session.dispose();
    info!(events = log.len(), "session finished");
    Ok(())
}

fn changed(prev: &DemoSnapshot, next: &DemoSnapshot) -> bool {
    DemoSnapshot {
        time: next.time,
        ..prev.clone()
    } != *next
}

fn print_snapshot(snapshot: &DemoSnapshot, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(snapshot)?);
        return Ok(());
    }

    println!(
        "[{:>6}ms] {:?} role={} phase={:?} run={} input=\"{}\"",
        snapshot.time,
        snapshot.mode,
        snapshot.role_id,
        snapshot.phase,
        snapshot.run_token,
        snapshot.displayed_input
    );
    for record in &snapshot.records {
        println!(
            "    {:<12} {:<14} {:<10} {:>3}% {:?} {}",
            record.layer.as_str(),
            record.label,
            record.task,
            record.progress,
            record.status,
            record.result.as_deref().unwrap_or("")
        );
    }
    if let Some(delivery) = &snapshot.delivery {
        println!("    {}", delivery.headline);
        for item in &delivery.items {
            println!("      {}: {}", item.label, item.value);
        }
    }
    Ok(())
}

fn roles(config: &DemoConfig) -> Result<()> {
    for role in config.catalog.roles() {
        println!("{} ({})", role.id, role.name);
        for layer in Layer::ALL {
            let agents: Vec<&str> = role.agents_in(layer).map(|a| a.label.as_str()).collect();
            if !agents.is_empty() {
                println!("  {:<12} {}", layer.as_str(), agents.join(", "));
            }
        }
        for (index, query) in role.sample_queries.iter().enumerate() {
            println!("  [{}] {}", index, query);
        }
    }
    Ok(())
}
