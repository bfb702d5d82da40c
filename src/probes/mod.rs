//! Probes: pure functions from raw data to findings.
//!
//! Every [`ProbeId`] maps to exactly one [`Probe`] through [`lookup`]; the
//! per-check probe lists below are the only probe sets handed to the runner.

mod binary;
mod branch_protection;
mod code_review;
pub mod runner;
mod sbom;

use crate::error::ProbeError;
use crate::models::{Domain, Finding, ProbeId, RawData};

pub type ProbeFn = fn(&RawData) -> Result<Vec<Finding>, ProbeError>;

pub struct Probe {
    pub id: ProbeId,
    pub reads: &'static [Domain],
    pub run: ProbeFn,
}

pub const BINARY_ARTIFACTS: &[ProbeId] = &[
    ProbeId::FreeOfUnverifiedBinaryArtifacts,
    ProbeId::HasBinaryArtifacts,
];

pub const BRANCH_PROTECTION: &[ProbeId] = &[
    ProbeId::BranchesAreProtected,
    ProbeId::BlocksDeleteOnBranches,
    ProbeId::BlocksForcePushOnBranches,
    ProbeId::RequiresPrsToChangeCode,
    ProbeId::RequiresApproversForPullRequests,
    ProbeId::RunsStatusChecksBeforeMerging,
    ProbeId::RequiresUpToDateBranches,
    ProbeId::RequiresTwoApproversForPullRequests,
    ProbeId::DismissesStaleReviews,
    ProbeId::BranchProtectionAppliesToAdmins,
    ProbeId::RequiresCodeOwnersReview,
];

pub const CODE_REVIEW: &[ProbeId] = &[ProbeId::CodeApproved, ProbeId::CodeReviewOneReviewers];

pub const SBOM: &[ProbeId] = &[ProbeId::HasSbom, ProbeId::HasReleaseSbom];

/// Probes no built-in check scores; callers run them through [`runner::run`].
pub const SUPPLEMENTARY: &[ProbeId] = &[ProbeId::SbomStandardsFileUsed];

/// 探针注册表（按标识静态分派）
pub fn lookup(id: ProbeId) -> &'static Probe {
    match id {
        ProbeId::FreeOfUnverifiedBinaryArtifacts => &binary::FREE_OF_UNVERIFIED_BINARY_ARTIFACTS,
        ProbeId::HasBinaryArtifacts => &binary::HAS_BINARY_ARTIFACTS,
        ProbeId::BranchesAreProtected => &branch_protection::BRANCHES_ARE_PROTECTED,
        ProbeId::BlocksDeleteOnBranches => &branch_protection::BLOCKS_DELETE_ON_BRANCHES,
        ProbeId::BlocksForcePushOnBranches => &branch_protection::BLOCKS_FORCE_PUSH_ON_BRANCHES,
        ProbeId::RequiresPrsToChangeCode => &branch_protection::REQUIRES_PRS_TO_CHANGE_CODE,
        ProbeId::RequiresApproversForPullRequests => {
            &branch_protection::REQUIRES_APPROVERS_FOR_PULL_REQUESTS
        }
        ProbeId::RequiresTwoApproversForPullRequests => {
            &branch_protection::REQUIRES_TWO_APPROVERS_FOR_PULL_REQUESTS
        }
        ProbeId::DismissesStaleReviews => &branch_protection::DISMISSES_STALE_REVIEWS,
        ProbeId::RequiresCodeOwnersReview => &branch_protection::REQUIRES_CODE_OWNERS_REVIEW,
        ProbeId::RequiresUpToDateBranches => &branch_protection::REQUIRES_UP_TO_DATE_BRANCHES,
        ProbeId::RunsStatusChecksBeforeMerging => {
            &branch_protection::RUNS_STATUS_CHECKS_BEFORE_MERGING
        }
        ProbeId::BranchProtectionAppliesToAdmins => {
            &branch_protection::BRANCH_PROTECTION_APPLIES_TO_ADMINS
        }
        ProbeId::CodeApproved => &code_review::CODE_APPROVED,
        ProbeId::CodeReviewOneReviewers => &code_review::CODE_REVIEW_ONE_REVIEWERS,
        ProbeId::HasSbom => &sbom::HAS_SBOM,
        ProbeId::HasReleaseSbom => &sbom::HAS_RELEASE_SBOM,
        ProbeId::SbomStandardsFileUsed => &sbom::SBOM_STANDARDS_FILE_USED,
    }
}

/// Borrows the domain data a probe needs, or reports it missing.
fn require<T>(probe: ProbeId, domain: Domain, data: Option<&T>) -> Result<&T, ProbeError> {
    data.ok_or(ProbeError::MissingRawData { probe, domain })
}
