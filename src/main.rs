use clap::Parser;
use std::process::ExitCode;

mod config;
mod demo;
mod error;
mod es;
mod models;

use demo::commands::Cli;
use demo::handler::Demo;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("es_api_demo=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    // Load configuration (CLI flags > env vars > TOML)
    let mut config = config::AppConfig::load()?;
    if let Some(hosts) = cli.hosts.clone() {
        config.elasticsearch.hosts = hosts;
    }
    if let Some(index) = cli.index.clone() {
        config.elasticsearch.index_name = index;
    }
    config.validate()?;

    tracing::info!(
        "Elasticsearch hosts: {}, index: {}",
        config.elasticsearch.hosts.join(", "),
        config.elasticsearch.index_name
    );

    let es_client = es::client::create_client(&config.elasticsearch.hosts)?;
    tracing::info!("Elasticsearch client initialized");

    let demo = Demo::new(es_client, config);
    let failures = demo.run(&cli.command).await;

    if failures > 0 {
        tracing::warn!("{failures} demo(s) failed");
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
