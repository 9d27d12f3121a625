use clap::{Parser, Subcommand};
use tracing::{error, info};

use deepguard_core::AnalysisHistory;
use deepguard_detect::{AnalysisPipeline, ClassifierHandle, SpoolDir};
use deepguard_http::HttpRuntime;

#[derive(Parser, Debug)]
#[command(name = "deepguard", version)]
#[command(about = "DeepGuard - AI-generated image detection service")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve {
        /// Bind address
        #[arg(long, default_value = "127.0.0.1", env = "DEEPGUARD_HOST")]
        host: String,
        /// Bind port
        #[arg(long, default_value_t = 5001, env = "DEEPGUARD_PORT")]
        port: u16,
        /// Base URL of the zero-shot scoring endpoint
        #[arg(
            long,
            default_value = "http://127.0.0.1:8600",
            env = "DEEPGUARD_CLASSIFIER_URL"
        )]
        classifier_url: String,
        /// Directory for in-flight spooled images
        #[arg(long, default_value = "uploads", env = "DEEPGUARD_SPOOL_DIR")]
        spool_dir: String,
    },
}

#[tokio::main]
async fn main() {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env();
    let env_filter = match "info".parse() {
        Ok(directive) => env_filter.add_directive(directive),
        Err(_) => env_filter,
    };
    let _ = tracing_subscriber::fmt().with_env_filter(env_filter).try_init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            host,
            port,
            classifier_url,
            spool_dir,
        } => {
            if let Err(e) = serve(&host, port, &classifier_url, &spool_dir).await {
                error!(error = %e, "server failed");
                std::process::exit(1);
            }
        }
    }
}

async fn serve(
    host: &str,
    port: u16,
    classifier_url: &str,
    spool_dir: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    // The capability check runs once here; an unavailable classifier still
    // serves health and history, and reports the reason per analysis.
    let classifier = ClassifierHandle::connect(classifier_url).await;
    let spool = SpoolDir::open(spool_dir)?;
    let pipeline = AnalysisPipeline::new(classifier, AnalysisHistory::new(), spool);
    let app = HttpRuntime::new(pipeline).router();

    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "DeepGuard API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown signal received");
    }
}
