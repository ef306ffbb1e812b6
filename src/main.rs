//! prompt-architect: MCP stdio server and one-shot CLI over the classification pipeline.
//!
//! Usage:
//!   prompt-architect                 # same as `serve`
//!   prompt-architect serve
//!   prompt-architect analyze "Create a REST API" --context "for my team"

use anyhow::Result;
use clap::{Parser, Subcommand};
use prompt_architect::{
    cognitive::ArchitectRequest, config::Config, server::PromptArchitectServer,
};
use rmcp::{ServiceExt, transport::stdio};
use tracing::info;

#[derive(Parser)]
#[command(name = "prompt-architect", version)]
#[command(about = "Rule-based request classifier and instruction-framework assembler", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the MCP tools over stdio
    Serve,
    /// Run the pipeline once and print the structured result as JSON
    Analyze {
        /// The raw request to analyze
        request: String,
        /// Optional caller context (audience, stack, constraints)
        #[arg(long)]
        context: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        e
    })?;

    // stdout belongs to the MCP transport; logs go to stderr
    if !config.runtime.mcp_no_log {
        tracing_subscriber::fmt()
            .with_env_filter(config.runtime.log_level.as_str())
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .init();
    }

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(config).await,
        Commands::Analyze { request, context } => analyze(config, request, context).await,
    }
}

async fn serve(config: Config) -> Result<()> {
    info!(
        "Starting prompt-architect MCP server (max_request_bytes={}, domain_matching={}, domain_hints={})",
        config.engine.max_request_bytes, config.engine.domain_matching, config.engine.domain_hints
    );

    let server = PromptArchitectServer::new(config);
    let service = server.serve(stdio()).await.map_err(|e| {
        eprintln!("Failed to start MCP service: {}", e);
        e
    })?;

    info!("MCP server ready, waiting for requests");
    service.waiting().await?;
    Ok(())
}

async fn analyze(config: Config, request: String, context: Option<String>) -> Result<()> {
    let server = PromptArchitectServer::new(config);
    let req = ArchitectRequest::new(request, context);
    let architect = server.architect.clone();
    let response = tokio::task::spawn_blocking(move || architect.architect(&req)).await??;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
