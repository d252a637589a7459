//! RMCP 0.3.2 implementation for MQTT test fixture MCP tools
//!
//! Provides 6 tools: build directory resolution, multi-DUT parameters,
//! host IP discovery and performance report lines.

use rmcp::{
    tool, tool_router, tool_handler, ServerHandler,
    handler::server::{router::tool::ToolRouter, tool::Parameters},
    model::*,
    ErrorData as McpError,
    service::RequestContext,
    RoleServer,
};
use serde::Serialize;
use tracing::{debug, error, info};
use std::future::Future;
use std::path::PathBuf;

use super::types::*;
use crate::build_dir::{self, ResolutionContext, TracingReporter};
use crate::config::Config;
use crate::dut::{self, MultiDutRequest};
use crate::error::FixtureError;
use crate::network::{self, DEFAULT_PROBE_DEST};
use crate::performance;

/// Fixture tool handler with all 6 tools
#[derive(Clone)]
pub struct FixtureToolHandler {
    #[allow(dead_code)]
    tool_router: ToolRouter<FixtureToolHandler>,
    config: Config,
}

impl FixtureToolHandler {
    pub fn new(config: Config) -> Self {
        Self {
            tool_router: Self::tool_router(),
            config,
        }
    }

    /// Application path from args override or config
    fn app_path(&self, override_path: Option<&str>) -> Result<PathBuf, McpError> {
        override_path
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .or_else(|| self.config.app_path.clone())
            .ok_or_else(|| {
                McpError::invalid_params(
                    "No application path configured. Set --app-path or pass app_path argument.".to_string(),
                    None,
                )
            })
    }

    /// Probe destination from args, config, or the public default
    fn probe_dest(&self, requested: Option<String>) -> String {
        requested
            .filter(|d| !d.is_empty())
            .or_else(|| self.config.probe_dest.clone().filter(|d| !d.is_empty()))
            .unwrap_or_else(|| DEFAULT_PROBE_DEST.to_string())
    }

    /// Merge tool arguments over the configured defaults
    fn resolution_context(&self, args: BuildDirArgs) -> Result<ResolutionContext, McpError> {
        Ok(ResolutionContext {
            app_path: self.app_path(args.app_path.as_deref())?,
            target: args.target.or_else(|| self.config.target.clone()),
            config: args.config.or_else(|| self.config.config.clone()),
            explicit_override: args.build_dir.or_else(|| self.config.build_dir.clone()),
        })
    }
}

impl Default for FixtureToolHandler {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

fn fixture_error(e: FixtureError) -> McpError {
    if e.is_caller_error() {
        McpError::invalid_params(e.to_string(), None)
    } else {
        error!("Fixture helper failed: {}", e);
        McpError::internal_error(e.to_string(), None)
    }
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value).map_err(|e| {
        McpError::internal_error(format!("Serialization error: {}", e), None)
    })?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

#[tool_router]
impl FixtureToolHandler {
    #[tool(description = "List the build directory candidates for an application in priority order: explicit build_dir, build_<target>_<config>, build_<target>, build_<config>, build. Does not touch the filesystem.")]
    async fn list_build_candidates(
        &self,
        Parameters(args): Parameters<BuildDirArgs>,
    ) -> Result<CallToolResult, McpError> {
        let ctx = self.resolution_context(args)?;

        let result = BuildCandidatesResult {
            app_path: ctx.app_path.display().to_string(),
            candidates: ctx.candidates(),
        };

        debug!("Build candidates for {}: {:?}", result.app_path, result.candidates);
        json_result(&result)
    }

    #[tool(description = "Resolve which build directory holds the artifacts to flash. Returns the first existing candidate; fails with the idf.py command to run when none exists.")]
    async fn resolve_build_dir(
        &self,
        Parameters(args): Parameters<BuildDirArgs>,
    ) -> Result<CallToolResult, McpError> {
        let ctx = self.resolution_context(args)?;

        let build_dir = build_dir::resolve(&ctx, &TracingReporter).map_err(fixture_error)?;

        let result = ResolveBuildDirResult {
            path: ctx.app_path.join(&build_dir).display().to_string(),
            build_dir,
        };

        info!("Resolved build directory: {}", result.path);
        json_result(&result)
    }

    #[tool(description = "Resolve target, config and build directory for each DUT of a multi-DUT run. Values may hold one entry per DUT separated by '|'; a single entry applies to all DUTs. Config defaults to 'default'.")]
    async fn resolve_duts(
        &self,
        Parameters(args): Parameters<ResolveDutsArgs>,
    ) -> Result<CallToolResult, McpError> {
        let app_path = self.app_path(args.app_path.as_deref())?;

        let request = MultiDutRequest {
            count: args.count.unwrap_or(self.config.dut_count),
            app_path: app_path.to_string_lossy().to_string(),
            target: args.target.or_else(|| self.config.target.clone()),
            config: args.config.or_else(|| self.config.config.clone()),
            build_dir: args.build_dir.or_else(|| self.config.build_dir.clone()),
        };

        let duts = dut::resolve_duts(&request, &TracingReporter).map_err(fixture_error)?;

        info!("Resolved parameters for {} DUTs", duts.len());
        json_result(&ResolveDutsResult { duts })
    }

    #[tool(description = "Get the host's outbound IPv4 address used to reach a destination (e.g. the DUT's IP). No traffic is sent.")]
    async fn host_ip(
        &self,
        Parameters(args): Parameters<HostIpArgs>,
    ) -> Result<CallToolResult, McpError> {
        let dest = self.probe_dest(args.dest);

        let probe = dest.clone();
        let host_ip = tokio::task::spawn_blocking(move || network::host_ip4_by_dest(Some(&probe)))
            .await
            .map_err(|e| McpError::internal_error(format!("Probe task failed: {}", e), None))?
            .map_err(fixture_error)?;

        json_result(&HostIpResult {
            dest,
            host_ip: host_ip.to_string(),
        })
    }

    #[tool(description = "Find the DUT's IPv4 address in its console output ('IPv4 address: a.b.c.d') and the host address reachable from it.")]
    async fn runner_ip(
        &self,
        Parameters(args): Parameters<RunnerIpArgs>,
    ) -> Result<CallToolResult, McpError> {
        let runner = tokio::task::spawn_blocking(move || network::runner_ip(&args.console))
            .await
            .map_err(|e| McpError::internal_error(format!("Probe task failed: {}", e), None))?
            .map_err(fixture_error)?;

        json_result(&runner)
    }

    #[tool(description = "Emit a performance result line in the '[Performance][item]: value' format picked up by CI log scrapers.")]
    async fn log_performance(
        &self,
        Parameters(args): Parameters<LogPerformanceArgs>,
    ) -> Result<CallToolResult, McpError> {
        let line = performance::log_performance(&args.item, &args.value);
        json_result(&LogPerformanceResult { line })
    }
}


#[tool_handler]
impl ServerHandler for FixtureToolHandler {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "MQTT Test Fixtures MCP Server - Resolve build directories and DUT parameters for on-target MQTT client tests. \
                 6 tools available: list_build_candidates, resolve_build_dir, resolve_duts, host_ip, runner_ip, log_performance."
                    .to_string(),
            ),
        }
    }

    async fn initialize(
        &self,
        _request: InitializeRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<InitializeResult, McpError> {
        info!("MQTT test fixtures MCP server initialized with 6 tools");
        Ok(self.get_info())
    }
}
