use super::{require, Probe};
use crate::error::ProbeError;
use crate::models::{Domain, FileKind, Finding, Outcome, ProbeId, RawData};

pub static FREE_OF_UNVERIFIED_BINARY_ARTIFACTS: Probe = Probe {
    id: ProbeId::FreeOfUnverifiedBinaryArtifacts,
    reads: &[Domain::BinaryArtifacts],
    run: free_of_unverified_binary_artifacts,
};

pub static HAS_BINARY_ARTIFACTS: Probe = Probe {
    id: ProbeId::HasBinaryArtifacts,
    reads: &[Domain::BinaryArtifacts],
    run: has_binary_artifacts,
};

/// 每个未经验证的二进制文件一条 False
fn free_of_unverified_binary_artifacts(raw: &RawData) -> Result<Vec<Finding>, ProbeError> {
    let probe = ProbeId::FreeOfUnverifiedBinaryArtifacts;
    let data = require(probe, Domain::BinaryArtifacts, raw.binary_artifacts())?;

    let findings: Vec<Finding> = data
        .files
        .iter()
        .filter(|f| f.kind == FileKind::Binary)
        .map(|f| {
            Finding::new(probe, Outcome::False, format!("binary artifact detected: {}", f.path))
                .with_location(f.location())
        })
        .collect();

    if findings.is_empty() {
        return Ok(vec![Finding::new(
            probe,
            Outcome::True,
            "Repository does not have unverified binary artifacts.",
        )]);
    }
    Ok(findings)
}

/// Lists every binary, verified or not, so the audit trail keeps them.
fn has_binary_artifacts(raw: &RawData) -> Result<Vec<Finding>, ProbeError> {
    let probe = ProbeId::HasBinaryArtifacts;
    let data = require(probe, Domain::BinaryArtifacts, raw.binary_artifacts())?;

    let findings: Vec<Finding> = data
        .files
        .iter()
        .filter(|f| matches!(f.kind, FileKind::Binary | FileKind::BinaryVerified))
        .map(|f| {
            let text = match f.kind {
                FileKind::BinaryVerified => format!("verified binary artifact: {}", f.path),
                _ => format!("binary artifact: {}", f.path),
            };
            Finding::new(probe, Outcome::True, text).with_location(f.location())
        })
        .collect();

    if findings.is_empty() {
        return Ok(vec![Finding::new(
            probe,
            Outcome::False,
            "Repository does not have binary artifacts.",
        )]);
    }
    Ok(findings)
}
