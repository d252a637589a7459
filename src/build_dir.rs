//! Build directory resolution
//!
//! Picks which directory under an application path holds the artifacts to
//! flash, trying candidates in a fixed priority order:
//!
//! 1. explicit override (if non-empty)
//! 2. `build_<target>_<config>`
//! 3. `build_<target>`
//! 4. `build_<config>`
//! 5. `build`

use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::error::{FixtureError, Result};

/// Fallback build directory produced by a plain `idf.py build`
pub const DEFAULT_BUILD_DIR: &str = "build";

/// Inputs for a single resolution call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionContext {
    pub app_path: PathBuf,
    pub target: Option<String>,
    pub config: Option<String>,
    pub explicit_override: Option<String>,
}

impl ResolutionContext {
    pub fn new(app_path: impl Into<PathBuf>) -> Self {
        Self {
            app_path: app_path.into(),
            ..Default::default()
        }
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn with_config(mut self, config: impl Into<String>) -> Self {
        self.config = Some(config.into());
        self
    }

    pub fn with_override(mut self, build_dir: impl Into<String>) -> Self {
        self.explicit_override = Some(build_dir.into());
        self
    }

    /// Candidate directory names in priority order, without duplicates
    pub fn candidates(&self) -> Vec<String> {
        let target = non_empty(&self.target);
        let config = non_empty(&self.config);

        let mut candidates = Vec::with_capacity(5);
        if let Some(dir) = non_empty(&self.explicit_override) {
            candidates.push(dir.to_string());
        }
        if let (Some(t), Some(c)) = (target, config) {
            candidates.push(format!("build_{}_{}", t, c));
        }
        if let Some(t) = target {
            candidates.push(format!("build_{}", t));
        }
        if let Some(c) = config {
            candidates.push(format!("build_{}", c));
        }
        candidates.push(DEFAULT_BUILD_DIR.to_string());

        let mut unique: Vec<String> = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            if !unique.contains(&candidate) {
                unique.push(candidate);
            }
        }
        unique
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Receives one notification per candidate checked
pub trait CandidateReporter {
    fn found(&self, path: &Path);
    fn missing(&self, path: &Path);
}

/// Forwards candidate checks to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl CandidateReporter for TracingReporter {
    fn found(&self, path: &Path) {
        info!("Found valid binary path: {}", path.display());
    }

    fn missing(&self, path: &Path) {
        warn!("Checking binary path: {}... missing... trying another place", path.display());
    }
}

/// Return the first candidate that exists as a directory under `ctx.app_path`
pub fn resolve(ctx: &ResolutionContext, reporter: &dyn CandidateReporter) -> Result<String> {
    let candidates = ctx.candidates();

    for candidate in &candidates {
        let path = ctx.app_path.join(candidate);
        if path.is_dir() {
            reporter.found(&path);
            return Ok(candidate.clone());
        }
        reporter.missing(&path);
    }

    // candidates() always ends with the fallback, so first() is present
    let first_candidate = candidates
        .first()
        .cloned()
        .unwrap_or_else(|| DEFAULT_BUILD_DIR.to_string());

    Err(FixtureError::NoValidBuildDirectory {
        app_path: ctx.app_path.display().to_string(),
        first_candidate,
    })
}

/// [`resolve`] with the default tracing reporter
pub fn resolve_build_dir(ctx: &ResolutionContext) -> Result<String> {
    resolve(ctx, &TracingReporter)
}
