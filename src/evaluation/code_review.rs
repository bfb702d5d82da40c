use super::{log_finding, validated, DetailLogger};
use crate::models::{CheckResult, Finding, Outcome, ProbeId, MAX_RESULT_SCORE};
use crate::probes;

fn count(findings: &[Finding], probe: ProbeId, outcome: Outcome) -> i32 {
    findings
        .iter()
        .filter(|f| f.probe() == probe && f.outcome() == outcome)
        .count() as i32
}

pub fn evaluate(name: &str, findings: &[Finding], dl: &mut dyn DetailLogger) -> CheckResult {
    if let Err(result) = validated(name, findings, probes::CODE_REVIEW) {
        return result;
    }

    for f in findings {
        log_finding(dl, f);
    }

    let approved = count(findings, ProbeId::CodeApproved, Outcome::True);
    let reviewable = approved + count(findings, ProbeId::CodeApproved, Outcome::False);
    if reviewable == 0 {
        return CheckResult::min_score(name, "no reviewable changesets found");
    }

    if count(findings, ProbeId::CodeReviewOneReviewers, Outcome::True) == 0 {
        return CheckResult::min_score(name, "no reviews found on any changeset");
    }

    let reason = format!("{} out of {} changesets approved", approved, reviewable);
    if approved == reviewable {
        return CheckResult::max_score(name, "all changesets are reviewed");
    }
    CheckResult::with_score(name, reason, MAX_RESULT_SCORE * approved / reviewable)
}
