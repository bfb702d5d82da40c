//! Evaluation policies: findings in, one scored [`CheckResult`] out.
//!
//! Every policy first validates that it received exactly the probes it
//! declares. A mismatch or an `Error` outcome is an internal error and turns
//! the whole check into a runtime-error result.

pub mod binary_artifacts;
pub mod branch_protection;
pub mod code_review;
pub mod detail_logger;
pub mod sbom;

pub use detail_logger::{CheckDetailLogger, DetailLogger};

use crate::error::CheckError;
use crate::models::{CheckResult, Finding, LogMessage, Outcome, ProbeId};
use std::collections::{BTreeSet, HashSet};

/// 校验探针结论集合与声明集合一致
pub fn validate_findings(
    check: &str,
    findings: &[Finding],
    expected: &[ProbeId],
) -> Result<(), CheckError> {
    let invalid = |message: String| CheckError::InvalidProbeResults {
        check: check.to_string(),
        message,
    };

    if let Some(f) = findings.iter().find(|f| f.outcome() == Outcome::Error) {
        return Err(invalid(format!("probe {} reported an error: {}", f.probe(), f.message())));
    }

    let found: BTreeSet<ProbeId> = findings.iter().map(|f| f.probe()).collect();
    let declared: BTreeSet<ProbeId> = expected.iter().copied().collect();
    if found != declared {
        let missing: Vec<&str> = declared.difference(&found).map(|p| p.as_str()).collect();
        let unexpected: Vec<&str> = found.difference(&declared).map(|p| p.as_str()).collect();
        return Err(invalid(format!(
            "missing probes [{}], unexpected probes [{}]",
            missing.join(", "),
            unexpected.join(", ")
        )));
    }

    Ok(())
}

/// Runs `validate_findings` and converts a failure into a runtime-error result.
pub(crate) fn validated(
    check: &str,
    findings: &[Finding],
    expected: &[ProbeId],
) -> Result<(), CheckResult> {
    validate_findings(check, findings, expected).map_err(|e| CheckResult::runtime_error(check, e))
}

/// 同一探针只计一次分
pub(crate) fn score_probe_once(probe: ProbeId, scored: &mut HashSet<ProbeId>, points: i32) -> i32 {
    if scored.insert(probe) {
        points
    } else {
        0
    }
}

/// Writes the one detail line a finding gets: True and NotApplicable as
/// info, False as warn.
pub(crate) fn log_finding(logger: &mut dyn DetailLogger, finding: &Finding) {
    let msg = LogMessage::for_finding(finding, finding.message());
    match finding.outcome() {
        Outcome::False => logger.warn(msg),
        Outcome::True | Outcome::NotApplicable => logger.info(msg),
        Outcome::Error => logger.debug(msg),
    }
}
