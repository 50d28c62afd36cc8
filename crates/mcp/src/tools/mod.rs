// Tool trait, registry, and the break tool catalog

pub mod breaks;
pub mod game;
mod registry;

pub use breaks::{register_break_tools, BreakTool};
pub use game::GameTimeTool;
pub use registry::{empty_input_schema, Tool, ToolRegistry};
