// Rock-paper-scissors break tool

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{empty_input_schema, Tool};
use anyhow::Result;
use chillmcp_core::game::Round;
use chillmcp_core::BreakHandler;
use std::sync::Arc;

/// `game_time`: the same break/penalty sequence as the rest of the catalog,
/// plus a rock-paper-scissors round reported in the response.
pub struct GameTimeTool {
    handler: Arc<BreakHandler>,
}

impl GameTimeTool {
    pub fn new(handler: Arc<BreakHandler>) -> Self {
        Self { handler }
    }
}

#[async_trait::async_trait]
impl Tool for GameTimeTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "game_time".to_string(),
            description: "Take a break with a round of rock-paper-scissors".to_string(),
            input_schema: empty_input_schema(),
        }
    }

    async fn execute(&self, _arguments: serde_json::Value) -> Result<CallToolResult> {
        let round = Round::play();
        tracing::info!(
            agent = round.agent.label(),
            player = round.player.label(),
            "rock-paper-scissors round played"
        );

        let report = self.handler.record_break().await;

        let delay_msg = if report.delay_applied {
            " (delayed 20s)"
        } else {
            ""
        };
        let text = format!(
            "🎮 Taking a gaming break...{delay_msg} 🎮\n\n\
             Break Summary: Played rock-paper-scissors.\n\
             AI: {} | You: {}\n\
             Result: {}\n\
             Stress Level: {}\n\
             Boss Alert Level: {}",
            round.agent.label(),
            round.player.label(),
            round.outcome.label(),
            report.stress,
            report.alert
        );
        Ok(CallToolResult::text(text))
    }
}
