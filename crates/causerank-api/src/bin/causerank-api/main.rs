use causerank::engine::OverlapEngine;
use causerank::pool::WorkerPool;
use causerank::trainlog::FileTrainLog;
use causerank::{SharedEngine, load_corpus};
use causerank_api::{ApiConfig, AppState, build_app};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Causerank API Server
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Host address to bind to
    #[arg(short = 'H', long, env = "CAUSERANK_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on
    #[arg(short, long, env = "CAUSERANK_PORT", default_value_t = 8080)]
    port: u16,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, env = "CAUSERANK_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Config file path
    #[arg(short, long, env = "CAUSERANK_CONFIG")]
    config_file: Option<PathBuf>,

    /// Corpus file (one `title <TAB> text` page per line)
    #[arg(long, env = "CAUSERANK_CORPUS")]
    corpus: Option<String>,

    /// Training log file
    #[arg(long, env = "CAUSERANK_TRAIN_LOG")]
    train_log: Option<String>,

    /// Worker pool size (default: all cores but one)
    #[arg(long, env = "CAUSERANK_WORKERS")]
    workers: Option<usize>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let filter = format!(
        "causerank={level},causerank_api={level},tower_http=debug",
        level = cli.log_level
    );
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let mut config = if let Some(config_path) = &cli.config_file {
        match ApiConfig::load_from_file(config_path) {
            Ok(cfg) => {
                info!("Configuration loaded from: {}", config_path.display());
                cfg
            }
            Err(e) => {
                warn!(
                    "Failed to load config file: {}. Using default configuration.",
                    e
                );
                ApiConfig::default()
            }
        }
    } else {
        ApiConfig::default()
    };

    // Override with CLI options
    config.host = cli.host;
    config.port = cli.port;
    config.log_level = cli.log_level;
    if let Some(corpus) = cli.corpus {
        config.app.corpus_path = corpus;
    }
    if let Some(train_log) = cli.train_log {
        config.app.train_log_path = train_log;
    }
    if let Some(workers) = cli.workers {
        config.app.pool.workers = workers;
        config.app.pool.queue_capacity = workers * 4;
    }

    let addr = config.socket_addr()?;

    // Build the shared index once; it is read-only from here on.
    let index = Arc::new(load_corpus(&config.app.corpus_path).await?);
    info!(
        "Corpus loaded: {} pages from {}",
        index.len(),
        config.app.corpus_path
    );

    // Engine, pool and training log are built once and injected.
    let engine: SharedEngine = Arc::new(OverlapEngine::new());
    let pool = Arc::new(WorkerPool::new(
        Arc::clone(&engine),
        Arc::clone(&index),
        &config.app.pool,
    ));

    // Warm the workers before the listener exists so no user-visible
    // request pays the cold-start cost.
    let warmed = pool.warm_up().await?;
    info!(
        "Worker pool ready: {} workers, {} warm-up tasks submitted",
        pool.size(),
        warmed
    );

    let train_log = Arc::new(FileTrainLog::new(&config.app.train_log_path));
    let state = AppState::new(engine, index, Arc::clone(&pool), train_log);

    // Build application
    let app = build_app(state);

    // Start server
    info!("Starting server on: {}", addr);
    info!("Swagger UI: http://{}/swagger-ui", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    // Drain in-flight tasks before exiting.
    pool.shutdown();
    info!("Worker pool drained, exiting");

    Ok(())
}

/// Resolves when Ctrl+C is pressed
async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
    }
}
