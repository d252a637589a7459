//! Multi-DUT fixture parameters
//!
//! Command-line values for multi-DUT runs pack one entry per DUT into a
//! single string separated by `|` (e.g. `--target esp32|esp32c3`). A value
//! without separators applies to every DUT.

use std::path::PathBuf;

use serde::Serialize;
use tracing::debug;

use crate::build_dir::{self, CandidateReporter, ResolutionContext};
use crate::error::{FixtureError, Result};

/// Separator between per-DUT values
pub const MULTI_DUT_SEPARATOR: char = '|';

/// Upper bound on DUTs in one run
pub const MAX_DUT_COUNT: usize = 64;

/// Config name used when none is given
pub const DEFAULT_CONFIG: &str = "default";

/// Raw multi-DUT values as supplied on a command line
#[derive(Debug, Clone, Default)]
pub struct MultiDutRequest {
    pub count: usize,
    pub app_path: String,
    pub target: Option<String>,
    pub config: Option<String>,
    pub build_dir: Option<String>,
}

/// Fully resolved parameters of one DUT
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DutParams {
    pub index: usize,
    pub app_path: PathBuf,
    pub target: Option<String>,
    pub config: String,
    pub build_dir: String,
}

/// Split a `|`-separated value into exactly `count` per-DUT entries
pub fn split_multi_dut(field: &str, value: &str, count: usize) -> Result<Vec<String>> {
    if count == 0 {
        return Err(FixtureError::InvalidParameter("DUT count must be at least 1".to_string()));
    }
    if count > MAX_DUT_COUNT {
        return Err(FixtureError::InvalidParameter(format!(
            "DUT count {} exceeds the maximum of {}",
            count, MAX_DUT_COUNT
        )));
    }

    let parts: Vec<String> = value
        .split(MULTI_DUT_SEPARATOR)
        .map(|p| p.trim().to_string())
        .collect();

    match parts.len() {
        1 => Ok(vec![parts[0].clone(); count]),
        n if n == count => Ok(parts),
        n => Err(FixtureError::DutCountMismatch {
            field: field.to_string(),
            expected: count,
            found: n,
        }),
    }
}

/// Config name for a DUT, falling back to [`DEFAULT_CONFIG`]
pub fn config_or_default(config: Option<&str>) -> String {
    config
        .filter(|c| !c.is_empty())
        .unwrap_or(DEFAULT_CONFIG)
        .to_string()
}

/// Target of DUT `index` out of `total`. A single-DUT run always uses the first target.
pub fn target_for(targets: &[String], total: usize, index: usize) -> Result<String> {
    let pick = if total == 1 { 0 } else { index };
    targets.get(pick).cloned().ok_or_else(|| {
        FixtureError::InvalidParameter(format!(
            "no target for DUT {} ({} targets configured)",
            index,
            targets.len()
        ))
    })
}

fn split_optional(field: &str, value: Option<&str>, count: usize) -> Result<Vec<Option<String>>> {
    match value {
        Some(v) => Ok(split_multi_dut(field, v, count)?
            .into_iter()
            .map(|p| Some(p).filter(|p| !p.is_empty()))
            .collect()),
        None => Ok(vec![None; count]),
    }
}

/// Resolve target, config and build directory for every DUT of a run
pub fn resolve_duts(
    request: &MultiDutRequest,
    reporter: &dyn CandidateReporter,
) -> Result<Vec<DutParams>> {
    let count = request.count;
    let app_paths = split_multi_dut("app_path", &request.app_path, count)?;
    let targets = request
        .target
        .as_deref()
        .map(|v| split_multi_dut("target", v, count))
        .transpose()?;
    let configs = split_optional("config", request.config.as_deref(), count)?;
    let overrides = split_optional("build_dir", request.build_dir.as_deref(), count)?;

    let mut duts = Vec::with_capacity(count);
    for index in 0..count {
        let target = match &targets {
            Some(list) => Some(target_for(list, count, index)?).filter(|t| !t.is_empty()),
            None => None,
        };
        let config = config_or_default(configs[index].as_deref());

        let ctx = ResolutionContext {
            app_path: PathBuf::from(&app_paths[index]),
            target: target.clone(),
            config: Some(config.clone()),
            explicit_override: overrides[index].clone(),
        };
        let build_dir = build_dir::resolve(&ctx, reporter)?;

        debug!("DUT {}: target={:?} config={} build_dir={}", index, target, config, build_dir);

        duts.push(DutParams {
            index,
            app_path: ctx.app_path,
            target,
            config,
            build_dir,
        });
    }

    Ok(duts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_dir::TracingReporter;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_split_single_value_replicates() {
        let parts = split_multi_dut("target", "esp32", 3).unwrap();
        assert_eq!(parts, vec!["esp32", "esp32", "esp32"]);
    }

    #[test]
    fn test_split_one_per_dut() {
        let parts = split_multi_dut("target", "esp32|esp32c3", 2).unwrap();
        assert_eq!(parts, vec!["esp32", "esp32c3"]);
    }

    #[test]
    fn test_split_count_mismatch() {
        let err = split_multi_dut("config", "a|b|c", 2).unwrap_err();
        assert!(matches!(
            err,
            FixtureError::DutCountMismatch { expected: 2, found: 3, .. }
        ));
    }

    #[test]
    fn test_split_zero_count() {
        assert!(matches!(
            split_multi_dut("target", "esp32", 0),
            Err(FixtureError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_split_count_above_max() {
        assert!(matches!(
            split_multi_dut("target", "esp32", MAX_DUT_COUNT + 1),
            Err(FixtureError::InvalidParameter(_))
        ));
        assert!(matches!(
            split_multi_dut("target", "esp32", usize::MAX),
            Err(FixtureError::InvalidParameter(_))
        ));
        assert_eq!(split_multi_dut("target", "esp32", MAX_DUT_COUNT).unwrap().len(), MAX_DUT_COUNT);
    }

    #[test]
    fn test_split_trims_entries() {
        let parts = split_multi_dut("target", "esp32 | esp32c3", 2).unwrap();
        assert_eq!(parts, vec!["esp32", "esp32c3"]);
    }

    #[test]
    fn test_resolve_duts_rejects_huge_count() {
        let request = MultiDutRequest {
            count: 1_000_000_000,
            app_path: "/work/app".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            resolve_duts(&request, &TracingReporter),
            Err(FixtureError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_config_default() {
        assert_eq!(config_or_default(None), "default");
        assert_eq!(config_or_default(Some("")), "default");
        assert_eq!(config_or_default(Some("ssl")), "ssl");
    }

    #[test]
    fn test_target_single_dut_uses_first() {
        let targets = vec!["esp32".to_string(), "esp32s3".to_string()];
        assert_eq!(target_for(&targets, 1, 1).unwrap(), "esp32");
    }

    #[test]
    fn test_target_multi_dut_by_index() {
        let targets = vec!["esp32".to_string(), "esp32s3".to_string()];
        assert_eq!(target_for(&targets, 2, 1).unwrap(), "esp32s3");
        assert!(target_for(&targets, 3, 2).is_err());
    }

    #[test]
    fn test_resolve_duts_two_targets() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("build_esp32_default")).unwrap();
        fs::create_dir_all(tmp.path().join("build_esp32c3")).unwrap();

        let request = MultiDutRequest {
            count: 2,
            app_path: tmp.path().to_string_lossy().to_string(),
            target: Some("esp32|esp32c3".to_string()),
            ..Default::default()
        };
        let duts = resolve_duts(&request, &TracingReporter).unwrap();

        assert_eq!(duts.len(), 2);
        assert_eq!(duts[0].build_dir, "build_esp32_default");
        assert_eq!(duts[1].build_dir, "build_esp32c3");
        assert_eq!(duts[1].target.as_deref(), Some("esp32c3"));
        assert_eq!(duts[1].config, "default");
    }

    #[test]
    fn test_resolve_duts_per_dut_override() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("build")).unwrap();
        fs::create_dir_all(tmp.path().join("broker_build")).unwrap();

        let request = MultiDutRequest {
            count: 2,
            app_path: tmp.path().to_string_lossy().to_string(),
            target: Some("esp32".to_string()),
            build_dir: Some("|broker_build".to_string()),
            ..Default::default()
        };
        let duts = resolve_duts(&request, &TracingReporter).unwrap();

        assert_eq!(duts[0].build_dir, "build");
        assert_eq!(duts[1].build_dir, "broker_build");
    }

    #[test]
    fn test_resolve_duts_stops_on_missing_build() {
        let tmp = TempDir::new().unwrap();
        let request = MultiDutRequest {
            count: 1,
            app_path: tmp.path().to_string_lossy().to_string(),
            target: Some("esp32s2".to_string()),
            config: Some("ws".to_string()),
            ..Default::default()
        };
        match resolve_duts(&request, &TracingReporter) {
            Err(FixtureError::NoValidBuildDirectory { first_candidate, .. }) => {
                assert_eq!(first_candidate, "build_esp32s2_ws");
            }
            other => panic!("expected NoValidBuildDirectory, got {:?}", other),
        }
    }
}
