use super::{log_finding, score_probe_once, validated, DetailLogger};
use crate::models::{CheckResult, Finding, Outcome, ProbeId, MAX_RESULT_SCORE};
use crate::probes;
use std::collections::HashSet;

const PROBE_POINTS: i32 = 5;

/// SBOM 检查评分策略
pub fn evaluate(name: &str, findings: &[Finding], dl: &mut dyn DetailLogger) -> CheckResult {
    if let Err(result) = validated(name, findings, probes::SBOM) {
        return result;
    }

    let mut source_msg = "SBOM file found in project".to_string();
    let mut release_msg = "SBOM file found in release artifacts".to_string();
    let mut earned = 0;
    let mut scored = HashSet::new();
    let mut not_applicable = HashSet::new();

    for f in findings {
        log_finding(dl, f);
        match f.outcome() {
            Outcome::True => earned += score_probe_once(f.probe(), &mut scored, PROBE_POINTS),
            Outcome::False | Outcome::NotApplicable => {
                if f.outcome() == Outcome::NotApplicable {
                    not_applicable.insert(f.probe());
                }
                match f.probe() {
                    ProbeId::HasSbom => source_msg = f.message().to_string(),
                    _ => release_msg = f.message().to_string(),
                }
            }
            Outcome::Error => {}
        }
    }

    if !scored.contains(&ProbeId::HasSbom) {
        return CheckResult::min_score(name, "SBOM file not detected");
    }

    let possible = probes::SBOM
        .iter()
        .filter(|p| scored.contains(*p) || !not_applicable.contains(*p))
        .count() as i32
        * PROBE_POINTS;
    let score = earned * MAX_RESULT_SCORE / possible;

    let reason = format!("{}. {}.", source_msg, release_msg);
    CheckResult::with_score(name, reason, score)
}
