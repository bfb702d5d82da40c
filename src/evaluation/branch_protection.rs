use super::{log_finding, validated, DetailLogger};
use crate::models::{CheckResult, Finding, Outcome, ProbeId, MAX_RESULT_SCORE};
use crate::probes;

/// 分级保护要求：前一级未满足时后续级别不得分
struct Tier {
    name: &'static str,
    weight: u32,
    probes: &'static [ProbeId],
}

const TIERS: &[Tier] = &[
    Tier {
        name: "basic",
        weight: 3,
        probes: &[ProbeId::BlocksForcePushOnBranches, ProbeId::BlocksDeleteOnBranches],
    },
    Tier {
        name: "review",
        weight: 3,
        probes: &[
            ProbeId::RequiresPrsToChangeCode,
            ProbeId::RequiresApproversForPullRequests,
        ],
    },
    Tier {
        name: "context",
        weight: 2,
        probes: &[
            ProbeId::RunsStatusChecksBeforeMerging,
            ProbeId::RequiresUpToDateBranches,
        ],
    },
    Tier {
        name: "thorough",
        weight: 1,
        probes: &[
            ProbeId::RequiresTwoApproversForPullRequests,
            ProbeId::DismissesStaleReviews,
        ],
    },
    Tier {
        name: "admin",
        weight: 1,
        probes: &[
            ProbeId::BranchProtectionAppliesToAdmins,
            ProbeId::RequiresCodeOwnersReview,
        ],
    },
];

pub fn evaluate(name: &str, findings: &[Finding], dl: &mut dyn DetailLogger) -> CheckResult {
    if let Err(result) = validated(name, findings, probes::BRANCH_PROTECTION) {
        return result;
    }

    for f in findings {
        log_finding(dl, f);
    }

    let protected: Vec<&Finding> = findings
        .iter()
        .filter(|f| f.probe() == ProbeId::BranchesAreProtected)
        .collect();
    if !protected.iter().any(|f| f.outcome() == Outcome::True) {
        let reason = match protected.iter().find(|f| f.outcome() == Outcome::NotApplicable) {
            Some(f) if protected.iter().all(|f| f.outcome() == Outcome::NotApplicable) => {
                f.message().to_string()
            }
            _ => "branch protection not enabled on any branch".to_string(),
        };
        return CheckResult::min_score(name, reason);
    }

    let mut earned = 0.0f64;
    let mut applicable = 0u32;
    let mut gated = false;

    for tier in TIERS {
        let (passed, failed) = findings
            .iter()
            .filter(|f| tier.probes.contains(&f.probe()))
            .fold((0u32, 0u32), |(t, f), finding| match finding.outcome() {
                Outcome::True => (t + 1, f),
                Outcome::False => (t, f + 1),
                _ => (t, f),
            });
        if passed + failed == 0 {
            log::debug!("{}: {} tier has no applicable settings", name, tier.name);
            continue;
        }

        applicable += tier.weight;
        if gated {
            continue;
        }
        earned += f64::from(tier.weight) * f64::from(passed) / f64::from(passed + failed);
        if failed > 0 {
            gated = true;
        }
    }

    if applicable == 0 {
        return CheckResult::min_score(name, "branch protection settings unavailable");
    }

    let score = (f64::from(MAX_RESULT_SCORE) * earned / f64::from(applicable)).round() as i32;
    if score == MAX_RESULT_SCORE {
        return CheckResult::max_score(
            name,
            "branch protection is maximal on development and all release branches",
        );
    }
    CheckResult::with_score(
        name,
        "branch protection is not maximal on development and all release branches",
        score,
    )
}
