use std::path::PathBuf;

use structopt::StructOpt;
use tracing::Level;
use tracing_subscriber::prelude::*;

mod perf;
mod perf_calc;
mod perf_data;
mod plot;
mod report;
mod server;

use perf::{AnalysisError, Metric};
use perf_data::dataset;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "perf-dash",
    about = "Performance comparison dashboard: original vs optimized file processing"
)]
enum Opt {
    /// Write the static report bundle (HTML page, SVG charts, CSV exports)
    Report {
        /// Output directory
        #[structopt(short, long, default_value = "report", parse(from_os_str))]
        out: PathBuf,

        /// Metric to analyze: processing_time, memory_usage or db_connections
        #[structopt(short, long, default_value = "processing_time")]
        metric: String,
    },

    /// Serve the interactive dashboard over HTTP
    Serve {
        /// Port to listen on (binds 127.0.0.1)
        #[structopt(short, long, default_value = "8080")]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match Opt::from_args() {
        Opt::Report { out, metric } => {
            let metric = Metric::from_str(&metric)
                .ok_or_else(|| AnalysisError::InvalidMetric(metric.clone()))?;
            report::write_report_bundle(&out, dataset(), metric)?;
        }
        Opt::Serve { port } => server::serve(port).await?,
    }

    Ok(())
}
