//! CLI entry point for the data preparation jobs.
//!
//! Each subcommand is a one-shot batch job: fetch or read its input,
//! transform it, write the artifact and exit.

use anyhow::Result;
use clap::{Parser, Subcommand};
use dataprep::{
    config::BusApiConfig,
    fetch::{BasicClient, Bearer, QueryParams},
    jobs::{fetch_buses, fetch_dollar, run_regression},
};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

const BUS_TIMEOUT: Duration = Duration::from_secs(15);
const PTAX_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Parser)]
#[command(name = "dataprep")]
#[command(about = "Fetch and prepare bus, exchange-rate and regression data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch live bus positions and normalize them to {id, line, lat, lon}
    Buses {
        /// Positions endpoint returning JSON (falls back to BUS_API_URL)
        #[arg(long)]
        url: Option<String>,

        /// Bus line assigned to vehicles that do not report one
        #[arg(long)]
        line: Option<String>,

        /// Bearer token (falls back to BUS_API_TOKEN)
        #[arg(long)]
        token: Option<String>,

        /// Output JSON file
        #[arg(long, default_value = "data/bus_positions.json")]
        out: PathBuf,

        /// Extra query string parameters as key=value
        #[arg(long, num_args = 0..)]
        params: Vec<String>,
    },
    /// Fetch a month of PTAX dollar quotes as a gap-free daily series
    Dolar {
        /// Month to fetch, as MMYYYY
        #[arg(value_name = "MMYYYY")]
        month: String,

        /// Directory for dolar_MMYYYY.json
        #[arg(short = 'd', long, default_value = "data")]
        out_dir: PathBuf,
    },
    /// Fit a least-squares line to two vectors and emit a Plotly chart
    Regression {
        /// File with the x values
        #[arg(long, default_value = "data/X.txt")]
        x: PathBuf,

        /// File with the y values
        #[arg(long, default_value = "data/y.txt")]
        y: PathBuf,

        /// Directory for regression_plot.json and regression_plot.html
        #[arg(short = 'd', long, default_value = "data")]
        out_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/dataprep.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("dataprep.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Buses {
            url,
            line,
            token,
            out,
            params,
        } => {
            let config = BusApiConfig::resolve(url, token)?;
            let basic = BasicClient::with_timeout(BUS_TIMEOUT)?;
            let client = QueryParams::from_args(basic, params.as_slice());

            let count = match config.token.as_deref() {
                Some(token) => {
                    let client = Bearer::new(client, token)?;
                    fetch_buses(&client, &config.url, line.as_deref(), &out).await?
                }
                None => fetch_buses(&client, &config.url, line.as_deref(), &out).await?,
            };
            info!(count, out = %out.display(), "Bus positions saved");
        }
        Commands::Dolar { month, out_dir } => {
            let client = BasicClient::with_timeout(PTAX_TIMEOUT)?;
            let path = fetch_dollar(&client, &month, &out_dir).await?;
            info!(path = %path.display(), "Daily series saved");
        }
        Commands::Regression { x, y, out_dir } => {
            let fit = run_regression(&x, &y, &out_dir)?;
            info!(
                intercept = fit.intercept,
                slope = fit.slope,
                "Regression chart saved"
            );
        }
    }

    Ok(())
}
