//! Carewatch CLI
//!
//! Terminal dashboard for hospital beds, medicine stock and shortage alerts.

use anyhow::Context;
use carewatch::config::generate_default_config;
use carewatch::render::{ChartData, ChartRenderer};
use carewatch::{
    AlertFilter, AlertView, ApiClient, Config, DashboardApi, HospitalView, MedicineView,
    MountedView, Route, Shell, TextBarChart,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::BufReader;

#[derive(Parser)]
#[command(name = "carewatch")]
#[command(about = "Hospital beds, medicine stock and shortage alerts in your terminal")]
#[command(version)]
struct Cli {
    /// Backend API base URL (overrides config and CAREWATCH_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format for one-shot views
    #[arg(long, global = true, value_enum, default_value = "table")]
    format: OutputFormat,

    /// Keep polling and redraw on every update
    #[arg(long, global = true)]
    watch: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive dashboard
    Dashboard {
        /// Initial view: hospitals, medicines, alerts
        #[arg(long, default_value = "hospitals")]
        view: Route,
    },

    /// Hospital bed availability
    Hospitals {
        /// Filter by hospital name or district
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Medicine availability
    Medicines {
        /// Search by medicine name
        #[arg(short, long)]
        search: Option<String>,

        /// Page number (6 medicines per page)
        #[arg(short, long, default_value = "1")]
        page: usize,
    },

    /// Shortage and recall alerts
    Alerts {
        /// Alert type: all, bed, medicine
        #[arg(short = 't', long = "type", default_value = "all")]
        kind: AlertFilter,
    },

    /// Six-month medicine shortage trend
    Trends,

    /// Check backend health
    Status,

    /// Print a default config file
    Config {
        /// Write to this path instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Config { output } = &cli.command {
        return write_default_config(output.as_deref());
    }

    let mut config = Config::load_default(cli.config.as_deref())?;
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }
    carewatch::logging::init(&config.logging)?;

    let endpoints = Arc::new(config.api.endpoints());
    tracing::debug!(base = %endpoints.base(), "Using backend");
    let client = ApiClient::new(endpoints, config.api.request_timeout())?;
    let api: Arc<dyn DashboardApi> = Arc::new(client.clone());
    let chart = TextBarChart::default();

    match cli.command {
        Commands::Dashboard { view } => {
            let stdin = BufReader::new(tokio::io::stdin());
            let mut shell = Shell::new(api, config.polling.clone(), view, std::io::stdout())
                .with_clear_screen(true);
            shell.run(stdin).await?;
        }

        Commands::Hospitals { search } => {
            let mut view = HospitalView::mount(api, &config.polling);
            if let Some(term) = search {
                view.set_search(&term);
            }
            show(MountedView::Hospitals(view), &chart, cli.format, cli.watch).await?;
        }

        Commands::Medicines { search, page } => {
            let term = search.unwrap_or_default();
            let mut view = MedicineView::mount_with_search(api, &config.polling, &term);
            while view.state().is_loading() {
                view.changed().await;
            }
            view.goto_page(page);

            let mut mounted = MountedView::Medicines(view);
            print_view(&mut mounted, &chart, cli.format)?;
            if cli.watch {
                follow(mounted, &chart, cli.format).await?;
            }
        }

        Commands::Alerts { kind } => {
            let view = AlertView::mount_with_filter(api, &config.polling, kind);
            show(MountedView::Alerts(view), &chart, cli.format, cli.watch).await?;
        }

        Commands::Trends => {
            let trend = client
                .fetch_shortage_trends()
                .await
                .context("Failed to fetch shortage trends")?;
            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&trend)?),
                OutputFormat::Table => print!("{}", chart.render(&ChartData::shortage_trend(&trend))),
            }
        }

        Commands::Status => match client.health().await {
            Ok(health) => {
                println!("Carewatch v{}", env!("CARGO_PKG_VERSION"));
                println!();
                println!("Backend: {}", client.endpoints().base());
                println!("Status:  {}", health.status);
                if let Some(ts) = health.timestamp {
                    println!("Server time: {}", ts);
                }
            }
            Err(e) => {
                eprintln!("Cannot reach backend at {}", client.endpoints().base());
                eprintln!("Error: {}", e);
                eprintln!();
                eprintln!("Start the development backend with:");
                eprintln!("  cargo run --bin carewatch-api");
                anyhow::bail!("backend unavailable");
            }
        },

        Commands::Config { .. } => {}
    }

    Ok(())
}

/// Print once the first fetch settles, then optionally keep following
async fn show(
    mut view: MountedView,
    chart: &dyn ChartRenderer,
    format: OutputFormat,
    watch: bool,
) -> anyhow::Result<()> {
    while !view.is_settled() {
        view.changed().await;
    }
    print_view(&mut view, chart, format)?;

    if watch {
        follow(view, chart, format).await?;
    }
    Ok(())
}

/// Redraw on every settled update until Ctrl+C
async fn follow(
    mut view: MountedView,
    chart: &dyn ChartRenderer,
    format: OutputFormat,
) -> anyhow::Result<()> {
    loop {
        tokio::select! {
            _ = view.changed() => {
                if view.is_settled() {
                    print_view(&mut view, chart, format)?;
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }
    Ok(())
}

fn print_view(
    view: &mut MountedView,
    chart: &dyn ChartRenderer,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&view.to_json()?)?),
        OutputFormat::Table => print!("{}", view.render(chart)),
    }
    Ok(())
}

fn write_default_config(output: Option<&std::path::Path>) -> anyhow::Result<()> {
    let content = generate_default_config();
    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write config to {:?}", path))?;
            println!("Config written to {:?}", path);
        }
        None => print!("{}", content),
    }
    Ok(())
}
