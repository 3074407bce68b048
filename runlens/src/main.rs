//! runlens - evaluation playground CLI
//!
//! Renders the run-store view model in a terminal: headline metrics,
//! chart series, the filtered run list, the JSON export document, and a
//! simulated chat exchange. There is deliberately no persistence, so
//! every invocation starts from a freshly seeded store.

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use runlens_core::export;
use runlens_core::{ChatSession, Config, Dashboard, RunStatus, RunStore};

#[derive(Parser)]
#[command(name = "runlens")]
#[command(about = "Evaluation playground for simulated model runs")]
#[command(version)]
struct Cli {
    /// Number of synthetic runs to seed (defaults to the configured count)
    #[arg(long)]
    count: Option<usize>,

    /// RNG seed for reproducible synthetic data
    #[arg(long)]
    seed: Option<u64>,

    /// Start from an empty store instead of seeding synthetic runs
    #[arg(long)]
    empty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print headline metrics, the filtered run list, and chart series
    Summary {
        /// Substring matched against run ids and input text
        #[arg(long)]
        search: Option<String>,

        /// Restrict to one outcome (success or error)
        #[arg(long)]
        status: Option<String>,

        /// Restrict to one exact model name
        #[arg(long)]
        model: Option<String>,

        /// Emit the view model as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Write the export document (evaluation_runs.json)
    Export {
        /// Directory the export document is written to
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
    },
    /// Run simulated chat exchanges and ingest them as runs
    Chat {
        /// Messages to send, in order
        #[arg(required = true)]
        messages: Vec<String>,

        /// Model name to report (defaults to the configured model)
        #[arg(long)]
        model: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load().context("failed to load configuration")?;

    // Initialize logging
    let _log_guard =
        runlens_core::logging::init(&config.logging).context("failed to initialize logging")?;

    tracing::info!("runlens starting up");

    let seed = cli.seed.or(config.synthetic.seed);
    let mut store = match seed {
        Some(seed) => RunStore::with_seed(seed),
        None => RunStore::new(),
    };
    if !cli.empty {
        store.seed_synthetic(cli.count.unwrap_or(config.synthetic.count));
    }

    match cli.command {
        Command::Summary {
            search,
            status,
            model,
            json,
        } => {
            let mut dashboard = Dashboard::new(store);
            if let Some(search) = search {
                dashboard.set_search_query(search);
            }
            if let Some(status) = status {
                let status = RunStatus::from_str(&status)
                    .map_err(|e| anyhow::anyhow!(e))
                    .context("unrecognized --status value")?;
                dashboard.set_status_filter(Some(status));
            }
            if let Some(model) = model {
                dashboard.set_model_filter(Some(model));
            }

            if json {
                print_summary_json(&dashboard)?;
            } else {
                print_summary(&dashboard);
            }
        }
        Command::Export { out_dir } => {
            let path = export::write_export(store.runs(), &out_dir)
                .context("failed to write export document")?;
            println!("Wrote {} run(s) to {}", store.len(), path.display());
        }
        Command::Chat { messages, model } => {
            let model = model.unwrap_or_else(|| config.chat.model.clone());
            let mut session = ChatSession::with_model(&model, config.chat.reply_delay_ms);

            for message in &messages {
                match session.send_message(&mut store, message).await {
                    Some(run_id) => println!("Ingested {} ({})", run_id, model),
                    None => println!("Skipped blank message"),
                }
            }

            println!();
            print_summary(&Dashboard::new(store));
        }
    }

    Ok(())
}

fn print_summary(dashboard: &Dashboard) {
    let metrics = dashboard.metrics();
    let filtered = dashboard.filtered_runs();

    println!("Total runs: {}", metrics.total_runs);
    println!("Average latency: {} ms", metrics.average_latency_ms);
    println!("Total tokens: {}", metrics.total_tokens);
    println!("Total cost: ${:.4}", metrics.total_cost);

    println!();
    println!("Runs ({} shown):", filtered.len());
    for run in &filtered {
        println!(
            "  {}  {}  {:<7}  {:<16}  {:>5} ms  {:>4} tok  {}",
            run.id,
            run.timestamp,
            run.status.as_str(),
            run.model,
            run.duration_ms,
            run.tokens,
            run.input_text,
        );
    }

    println!();
    println!("Daily volume:");
    for point in dashboard.daily_volume() {
        println!("  {}  {}", point.date, point.count);
    }

    println!();
    println!("Recent latency:");
    for point in dashboard.latency_series() {
        println!(
            "  {}  {:>5} ms  {:>4} tok",
            point.label, point.latency_ms, point.tokens
        );
    }
}

fn print_summary_json(dashboard: &Dashboard) -> Result<()> {
    let view = serde_json::json!({
        "metrics": dashboard.metrics(),
        "runs": dashboard.filtered_runs(),
        "daily_volume": dashboard.daily_volume(),
        "latency_series": dashboard.latency_series(),
        "model_options": dashboard.model_options(),
    });
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}
