//! MQTT Test Fixtures MCP Server
//!
//! Fixture helpers for running an embedded MQTT client's tests on real
//! hardware: build directory resolution, multi-DUT parameters and host
//! network discovery.

pub mod build_dir;
pub mod config;
pub mod dut;
pub mod error;
pub mod network;
pub mod performance;
pub mod tools;

pub use config::{Args, Config};
pub use error::{FixtureError, Result};
pub use tools::FixtureToolHandler;
