//! Configuration for the mqtt-test-fixtures MCP server

use std::path::PathBuf;
use clap::Parser;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "mqtt-test-fixtures")]
#[command(about = "MCP server exposing fixture helpers for on-target MQTT client tests")]
#[command(version)]
pub struct Args {
    /// Default application path holding the build directories
    #[arg(long)]
    pub app_path: Option<PathBuf>,

    /// Default target chip; use '|' to give one value per DUT (e.g. "esp32|esp32s3")
    #[arg(long)]
    pub target: Option<String>,

    /// Default build configuration name; '|' separates per-DUT values
    #[arg(long)]
    pub config: Option<String>,

    /// Explicit build directory, checked before any generated candidate
    #[arg(long)]
    pub build_dir: Option<String>,

    /// Number of DUTs in a multi-DUT run
    #[arg(long, default_value_t = 1)]
    pub dut_count: usize,

    /// Destination used to pick the outbound interface when none is given
    #[arg(long)]
    pub probe_dest: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Log file path (defaults to stderr)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Runtime configuration derived from CLI args
#[derive(Debug, Clone)]
pub struct Config {
    pub app_path: Option<PathBuf>,
    pub target: Option<String>,
    pub config: Option<String>,
    pub build_dir: Option<String>,
    pub dut_count: usize,
    pub probe_dest: Option<String>,
}

impl Config {
    pub fn from_args(args: &Args) -> Self {
        Self {
            app_path: args.app_path.clone(),
            target: args.target.clone(),
            config: args.config.clone(),
            build_dir: args.build_dir.clone(),
            dut_count: args.dut_count,
            probe_dest: args.probe_dest.clone(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_path: None,
            target: None,
            config: None,
            build_dir: None,
            dut_count: 1,
            probe_dest: None,
        }
    }
}
