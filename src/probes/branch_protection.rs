use super::{require, Probe};
use crate::error::ProbeError;
use crate::models::{BranchRef, Domain, Finding, Outcome, ProbeId, RawData};

/// 单个分支设置的描述
struct BranchSetting {
    probe: ProbeId,
    setting: &'static str,
    enabled: &'static str,
    disabled: &'static str,
    read: fn(&BranchRef) -> Option<bool>,
}

const PROTECTED: BranchSetting = BranchSetting {
    probe: ProbeId::BranchesAreProtected,
    setting: "branch protection",
    enabled: "branch protection is enabled",
    disabled: "branch protection is not enabled",
    read: |b| b.protected,
};

const BLOCKS_DELETE: BranchSetting = BranchSetting {
    probe: ProbeId::BlocksDeleteOnBranches,
    setting: "branch deletion",
    enabled: "branch deletion is blocked",
    disabled: "branch deletion is allowed",
    read: |b| b.rule.allow_deletions.map(|allowed| !allowed),
};

const BLOCKS_FORCE_PUSH: BranchSetting = BranchSetting {
    probe: ProbeId::BlocksForcePushOnBranches,
    setting: "force push",
    enabled: "force pushes are blocked",
    disabled: "force pushes are allowed",
    read: |b| b.rule.allow_force_pushes.map(|allowed| !allowed),
};

const REQUIRES_PRS: BranchSetting = BranchSetting {
    probe: ProbeId::RequiresPrsToChangeCode,
    setting: "pull request requirement",
    enabled: "pull requests are required to make changes",
    disabled: "changes can be pushed without a pull request",
    read: |b| b.rule.pull_request.required,
};

const REQUIRES_APPROVERS: BranchSetting = BranchSetting {
    probe: ProbeId::RequiresApproversForPullRequests,
    setting: "required reviewers",
    enabled: "pull requests require at least one approving review",
    disabled: "pull requests can be merged without approval",
    read: |b| b.rule.pull_request.required_approving_review_count.map(|n| n >= 1),
};

const REQUIRES_TWO_APPROVERS: BranchSetting = BranchSetting {
    probe: ProbeId::RequiresTwoApproversForPullRequests,
    setting: "required reviewers",
    enabled: "pull requests require at least two approving reviews",
    disabled: "pull requests require fewer than two approving reviews",
    read: |b| b.rule.pull_request.required_approving_review_count.map(|n| n >= 2),
};

const DISMISSES_STALE: BranchSetting = BranchSetting {
    probe: ProbeId::DismissesStaleReviews,
    setting: "stale review dismissal",
    enabled: "stale reviews are dismissed on new commits",
    disabled: "stale reviews are not dismissed",
    read: |b| b.rule.pull_request.dismiss_stale_reviews,
};

const CODE_OWNERS: BranchSetting = BranchSetting {
    probe: ProbeId::RequiresCodeOwnersReview,
    setting: "code owners review",
    enabled: "code owners review is required",
    disabled: "code owners review is not required",
    read: |b| b.rule.pull_request.require_code_owner_reviews,
};

const UP_TO_DATE: BranchSetting = BranchSetting {
    probe: ProbeId::RequiresUpToDateBranches,
    setting: "up-to-date requirement",
    enabled: "branches must be up to date before merging",
    disabled: "branches can be merged while out of date",
    read: |b| b.rule.status_checks.up_to_date_before_merge,
};

const STATUS_CHECKS: BranchSetting = BranchSetting {
    probe: ProbeId::RunsStatusChecksBeforeMerging,
    setting: "status checks",
    enabled: "status checks must pass before merging",
    disabled: "no status checks are required before merging",
    read: |b| {
        let checks = &b.rule.status_checks;
        checks.require_status_checks.map(|required| required && !checks.contexts.is_empty())
    },
};

const ADMINS: BranchSetting = BranchSetting {
    probe: ProbeId::BranchProtectionAppliesToAdmins,
    setting: "admin enforcement",
    enabled: "protection rules apply to administrators",
    disabled: "administrators can bypass protection rules",
    read: |b| b.rule.enforce_admins,
};

/// 每个分支一条结论；没有分支时一条 NotApplicable
fn evaluate(raw: &RawData, setting: &BranchSetting) -> Result<Vec<Finding>, ProbeError> {
    let data = require(setting.probe, Domain::BranchProtection, raw.branch_protection())?;

    if data.branches.is_empty() {
        return Ok(vec![Finding::new(
            setting.probe,
            Outcome::NotApplicable,
            "no branches found",
        )]);
    }

    Ok(data
        .branches
        .iter()
        .map(|branch| match (setting.read)(branch) {
            Some(true) => Finding::new(
                setting.probe,
                Outcome::True,
                format!("{} on branch '{}'", setting.enabled, branch.name),
            ),
            Some(false) => Finding::new(
                setting.probe,
                Outcome::False,
                format!("{} on branch '{}'", setting.disabled, branch.name),
            ),
            None => Finding::new(
                setting.probe,
                Outcome::NotApplicable,
                format!("unable to retrieve {} setting for branch '{}'", setting.setting, branch.name),
            ),
        })
        .collect())
}

macro_rules! branch_probe {
    ($name:ident, $fn_name:ident, $setting:ident) => {
        pub static $name: Probe = Probe {
            id: $setting.probe,
            reads: &[Domain::BranchProtection],
            run: $fn_name,
        };

        fn $fn_name(raw: &RawData) -> Result<Vec<Finding>, ProbeError> {
            evaluate(raw, &$setting)
        }
    };
}

branch_probe!(BRANCHES_ARE_PROTECTED, branches_are_protected, PROTECTED);
branch_probe!(BLOCKS_DELETE_ON_BRANCHES, blocks_delete_on_branches, BLOCKS_DELETE);
branch_probe!(BLOCKS_FORCE_PUSH_ON_BRANCHES, blocks_force_push_on_branches, BLOCKS_FORCE_PUSH);
branch_probe!(REQUIRES_PRS_TO_CHANGE_CODE, requires_prs_to_change_code, REQUIRES_PRS);
branch_probe!(
    REQUIRES_APPROVERS_FOR_PULL_REQUESTS,
    requires_approvers_for_pull_requests,
    REQUIRES_APPROVERS
);
branch_probe!(
    REQUIRES_TWO_APPROVERS_FOR_PULL_REQUESTS,
    requires_two_approvers_for_pull_requests,
    REQUIRES_TWO_APPROVERS
);
branch_probe!(DISMISSES_STALE_REVIEWS, dismisses_stale_reviews, DISMISSES_STALE);
branch_probe!(REQUIRES_CODE_OWNERS_REVIEW, requires_code_owners_review, CODE_OWNERS);
branch_probe!(REQUIRES_UP_TO_DATE_BRANCHES, requires_up_to_date_branches, UP_TO_DATE);
branch_probe!(RUNS_STATUS_CHECKS_BEFORE_MERGING, runs_status_checks_before_merging, STATUS_CHECKS);
branch_probe!(BRANCH_PROTECTION_APPLIES_TO_ADMINS, branch_protection_applies_to_admins, ADMINS);
