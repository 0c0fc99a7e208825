use anyhow::Result;
use axum::Router;
use clap::Parser;
use engine::SearchIndex;
use server::build_app;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// Space-delimited stop words excluded from indexing and queries
    #[arg(long, default_value = "")]
    stop_words: String,
    /// Maximum number of results a query returns
    #[arg(long, default_value_t = engine::DEFAULT_MAX_RESULTS)]
    top_k: usize,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    let index = SearchIndex::new(&args.stop_words).with_max_results(args.top_k);
    let app: Router = build_app(index);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
