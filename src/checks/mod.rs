//! Checks: each one wires a collector, its probes and a policy together.

pub mod binary_artifacts;
pub mod branch_protection;
pub mod code_review;
pub mod registry;
pub mod sbom;

pub use registry::{CheckFn, CheckRegistry, RegisteredCheck};

use crate::error::CheckError;
use crate::evaluation::{CheckDetailLogger, DetailLogger};
use crate::models::{CheckResult, Finding, ProbeId, RawData, RequestKind};
use crate::probes::runner;
use crate::raw::code_review::DEFAULT_COMMIT_DEPTH;
use crate::services::RepoAccess;

/// 一次检查调用的输入
pub struct CheckRequest<'a> {
    pub access: &'a dyn RepoAccess,
    pub kinds: Vec<RequestKind>,
    pub commit_depth: usize,
}

impl<'a> CheckRequest<'a> {
    pub fn new(access: &'a dyn RepoAccess, kinds: Vec<RequestKind>) -> Self {
        Self {
            access,
            kinds,
            commit_depth: DEFAULT_COMMIT_DEPTH,
        }
    }
}

pub type Policy = fn(&str, &[Finding], &mut dyn DetailLogger) -> CheckResult;

/// 采集 → 探针 → 评分
///
/// Collector and probe failures become a runtime-error result for this check
/// only. Findings and detail lines are attached to every other result.
pub(crate) fn run_pipeline<C>(
    name: &str,
    request: &CheckRequest<'_>,
    collect: C,
    probes: &[ProbeId],
    policy: Policy,
) -> CheckResult
where
    C: FnOnce(&CheckRequest<'_>) -> anyhow::Result<RawData>,
{
    let raw = match collect(request) {
        Ok(raw) => raw,
        Err(e) => {
            log::warn!("{}: raw data collection failed: {:#}", name, e);
            return CheckResult::runtime_error(
                name,
                CheckError::Collector {
                    check: name.to_string(),
                    message: format!("{:#}", e),
                },
            );
        }
    };

    let findings = match runner::run(&raw, probes) {
        Ok(findings) => findings,
        Err(source) => {
            log::warn!("{}: probe failed: {}", name, source);
            return CheckResult::runtime_error(
                name,
                CheckError::Probe {
                    check: name.to_string(),
                    source,
                },
            );
        }
    };

    let mut dl = CheckDetailLogger::new(name);
    let mut result = policy(name, &findings, &mut dl);
    result.attach(findings, dl.flush());
    log::info!("{}: score {} ({})", name, result.score, result.reason);
    result
}
