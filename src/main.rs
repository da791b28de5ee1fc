mod builder;
mod cli;
mod commands;
mod error;
mod graph;
mod query;
mod schema;
mod server;
mod store;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Tracing goes to stderr so stdout stays clean for graph output
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = cli::Cli::parse();

    match cli.command {
        cli::Commands::Build {
            text,
            output,
            stream,
        } => commands::build::run(&text, output.as_deref(), stream).await?,
        cli::Commands::Query {
            graph,
            query_type,
            entity_id,
            from,
            to,
            ids,
            format,
        } => commands::query::run(&graph, query_type, entity_id, from, to, ids, &format)?,
        cli::Commands::Serve { host, port } => commands::serve::run(&host, port).await?,
    }

    Ok(())
}
