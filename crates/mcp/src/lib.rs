// MCP (Model Context Protocol) surface for the ChillMCP break server

pub mod browser;
pub mod protocol;
pub mod server;
pub mod tools;

pub use server::McpServer;
