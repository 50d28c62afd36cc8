// Core state machine for the ChillMCP break server

pub mod config;
pub mod game;
pub mod handler;
pub mod random;
pub mod state;
pub mod ticker;

pub use config::ChillConfig;
pub use handler::{BreakHandler, BreakReport};
pub use state::{BreakOutcome, Metrics, ServerState};
pub use ticker::BackgroundTicker;
