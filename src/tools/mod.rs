//! MQTT test fixture MCP tools module
//!
//! This module provides a unified tool handler for fixture resolution
//! using the RMCP 0.3.2 API patterns.

pub mod fixture_tools;
pub mod types;

pub use fixture_tools::*;
pub use types::*;
