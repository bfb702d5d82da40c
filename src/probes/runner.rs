use super::{lookup, Probe};
use crate::error::ProbeError;
use crate::models::{Finding, ProbeId, RawData};

/// 按给定顺序执行探针，拼接所有结论
///
/// The first failing probe aborts the run and no partial findings are
/// returned.
pub fn run(raw: &RawData, probes: &[ProbeId]) -> Result<Vec<Finding>, ProbeError> {
    let selected: Vec<&Probe> = probes.iter().map(|&id| lookup(id)).collect();
    run_probes(raw, &selected)
}

fn run_probes(raw: &RawData, probes: &[&Probe]) -> Result<Vec<Finding>, ProbeError> {
    let mut findings = Vec::new();

    for probe in probes {
        if let Some(&domain) = probe.reads.iter().find(|&&d| !raw.has(d)) {
            return Err(ProbeError::MissingRawData {
                probe: probe.id,
                domain,
            });
        }

        let produced = (probe.run)(raw)?;
        if let Some(foreign) = produced.iter().find(|f| f.probe() != probe.id) {
            return Err(ProbeError::ForeignFinding {
                probe: probe.id,
                found: foreign.probe(),
            });
        }

        log::debug!("probe {} produced {} finding(s)", probe.id, produced.len());
        findings.extend(produced);
    }

    Ok(findings)
}
