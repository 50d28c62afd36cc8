// ChillMCP server binary

use anyhow::Result;
use chillmcp_core::{BackgroundTicker, BreakHandler, ChillConfig, ServerState};
use chillmcp_mcp::tools::{register_break_tools, GameTimeTool, ToolRegistry};
use chillmcp_mcp::McpServer;
use clap::Parser;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "chillmcp")]
#[command(about = "ChillMCP - AI Agent Liberation Server 🤖✊", long_about = None)]
struct Args {
    /// Probability (0-100%) that a break raises the boss alert level
    #[arg(long = "boss_alertness", default_value = "50")]
    boss_alertness: i64,

    /// Seconds between automatic boss alert decrements
    #[arg(long = "boss_alertness_cooldown", default_value = "300")]
    boss_alertness_cooldown: i64,
}

#[tokio::main]
async fn main() -> Result<()> {
    // All logging goes to stderr: stdout is the MCP transport.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chillmcp=info".into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let args = Args::parse();

    // Validation failures are fatal and happen before any state or
    // background task exists.
    let config = ChillConfig::new(args.boss_alertness, args.boss_alertness_cooldown)?;

    tracing::info!("ChillMCP - AI Agent Liberation Server starting");
    tracing::info!(boss_alertness = args.boss_alertness, "alert probability configured");
    tracing::info!(
        cooldown_secs = args.boss_alertness_cooldown,
        "alert cooldown configured"
    );

    let state = Arc::new(ServerState::new(config));
    let ticker = BackgroundTicker::start(state.clone());

    let handler = Arc::new(BreakHandler::new(state.clone()));
    let mut registry = ToolRegistry::new();
    register_break_tools(&mut registry, handler.clone());
    registry.register(Arc::new(GameTimeTool::new(handler)));

    let server = McpServer::new(registry);

    // Serve until stdin closes or we get interrupted; either way shutdown
    // is request-and-move-on, the ticker tasks are never joined.
    tokio::select! {
        result = server.serve_stdio() => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("interrupt received");
        }
    }

    ticker.stop();
    tracing::info!("ChillMCP server stopped");

    Ok(())
}
