//! Type definitions for MQTT test fixture MCP tools

use serde::{Deserialize, Serialize};
use schemars::JsonSchema;

use crate::dut::DutParams;

// ============================================================================
// list_build_candidates / resolve_build_dir
// ============================================================================

#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct BuildDirArgs {
    /// Application path (default: --app-path)
    #[serde(default)]
    pub app_path: Option<String>,
    /// Target chip (e.g., "esp32", "esp32s3") (default: --target)
    #[serde(default)]
    pub target: Option<String>,
    /// Build configuration name (default: --config)
    #[serde(default)]
    pub config: Option<String>,
    /// Explicit build directory checked first (default: --build-dir)
    #[serde(default)]
    pub build_dir: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BuildCandidatesResult {
    pub app_path: String,
    /// Candidate directory names in priority order
    pub candidates: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ResolveBuildDirResult {
    /// Matching directory name, relative to app_path
    pub build_dir: String,
    /// Full path of the matching directory
    pub path: String,
}

// ============================================================================
// resolve_duts
// ============================================================================

#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct ResolveDutsArgs {
    /// Number of DUTs (default: --dut-count)
    #[serde(default)]
    pub count: Option<usize>,
    /// Application path(s), '|' separated per DUT (default: --app-path)
    #[serde(default)]
    pub app_path: Option<String>,
    /// Target(s), '|' separated per DUT (default: --target)
    #[serde(default)]
    pub target: Option<String>,
    /// Config(s), '|' separated per DUT (default: --config)
    #[serde(default)]
    pub config: Option<String>,
    /// Explicit build directories, '|' separated per DUT (default: --build-dir)
    #[serde(default)]
    pub build_dir: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ResolveDutsResult {
    pub duts: Vec<DutParams>,
}

// ============================================================================
// host_ip
// ============================================================================

#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct HostIpArgs {
    /// Destination the DUT network is reached through (default: --probe-dest or 8.8.8.8)
    #[serde(default)]
    pub dest: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HostIpResult {
    pub dest: String,
    pub host_ip: String,
}

// ============================================================================
// runner_ip
// ============================================================================

#[derive(Debug, Deserialize, JsonSchema)]
pub struct RunnerIpArgs {
    /// Captured DUT console output containing an "IPv4 address: " line
    pub console: String,
}

// ============================================================================
// log_performance
// ============================================================================

#[derive(Debug, Deserialize, JsonSchema)]
pub struct LogPerformanceArgs {
    /// Measured item name
    pub item: String,
    /// Measured value, including unit
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct LogPerformanceResult {
    pub line: String,
}
