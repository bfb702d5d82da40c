use super::{require, Probe};
use crate::error::ProbeError;
use crate::models::{Domain, Finding, Outcome, ProbeId, RawData, SbomOrigin};

pub static HAS_SBOM: Probe = Probe {
    id: ProbeId::HasSbom,
    reads: &[Domain::Sbom],
    run: has_sbom,
};

pub static HAS_RELEASE_SBOM: Probe = Probe {
    id: ProbeId::HasReleaseSbom,
    reads: &[Domain::Sbom],
    run: has_release_sbom,
};

pub static SBOM_STANDARDS_FILE_USED: Probe = Probe {
    id: ProbeId::SbomStandardsFileUsed,
    reads: &[Domain::Sbom],
    run: sbom_standards_file_used,
};

fn has_sbom(raw: &RawData) -> Result<Vec<Finding>, ProbeError> {
    let probe = ProbeId::HasSbom;
    let data = require(probe, Domain::Sbom, raw.sbom())?;

    let findings: Vec<Finding> = data
        .files
        .iter()
        .filter(|s| s.origin.in_source_tree())
        .map(|s| {
            Finding::new(probe, Outcome::True, format!("Project has a SBOM file: {}", s.file.path))
                .with_location(s.file.location())
        })
        .collect();

    if findings.is_empty() {
        return Ok(vec![Finding::new(probe, Outcome::False, "Project does not have a SBOM file")]);
    }
    Ok(findings)
}

/// 没有发布时为 NotApplicable
fn has_release_sbom(raw: &RawData) -> Result<Vec<Finding>, ProbeError> {
    let probe = ProbeId::HasReleaseSbom;
    let data = require(probe, Domain::Sbom, raw.sbom())?;

    if data.release_count == 0 {
        return Ok(vec![Finding::new(probe, Outcome::NotApplicable, "no releases found")]);
    }

    let findings: Vec<Finding> = data
        .files
        .iter()
        .filter(|s| s.origin == SbomOrigin::Release)
        .map(|s| {
            Finding::new(probe, Outcome::True, format!("Project publishes a SBOM file in a release: {}", s.name))
                .with_location(s.file.location())
        })
        .collect();

    if findings.is_empty() {
        return Ok(vec![Finding::new(
            probe,
            Outcome::False,
            "Project is not publishing a SBOM file as part of a release",
        )]);
    }
    Ok(findings)
}

fn sbom_standards_file_used(raw: &RawData) -> Result<Vec<Finding>, ProbeError> {
    let probe = ProbeId::SbomStandardsFileUsed;
    let data = require(probe, Domain::Sbom, raw.sbom())?;

    let findings: Vec<Finding> = data
        .files
        .iter()
        .filter(|s| s.origin == SbomOrigin::Standards)
        .map(|s| {
            Finding::new(probe, Outcome::True, format!("SBOM file in standard location: {}", s.file.path))
                .with_location(s.file.location())
        })
        .collect();

    if findings.is_empty() {
        return Ok(vec![Finding::new(
            probe,
            Outcome::False,
            "Project does not keep a SBOM file in a standard location",
        )]);
    }
    Ok(findings)
}
