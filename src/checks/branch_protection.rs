use super::{run_pipeline, CheckRequest};
use crate::models::{CheckResult, RawData};
use crate::{evaluation, probes, raw};

pub const CHECK_NAME: &str = "Branch-Protection";

pub fn run(request: &CheckRequest<'_>) -> CheckResult {
    run_pipeline(
        CHECK_NAME,
        request,
        |req| {
            let data = raw::branch_protection::collect(req.access)?;
            Ok(RawData::builder().branch_protection(data).build())
        },
        probes::BRANCH_PROTECTION,
        evaluation::branch_protection::evaluate,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Capability;
    use crate::models::{
        BranchProtectionRule, BranchRef, PullRequestRule, StatusChecksRule, MAX_RESULT_SCORE,
    };
    use crate::services::fake_repo::FakeRepo;

    fn locked_down() -> BranchProtectionRule {
        BranchProtectionRule {
            allow_deletions: Some(false),
            allow_force_pushes: Some(false),
            enforce_admins: Some(true),
            pull_request: PullRequestRule {
                required: Some(true),
                required_approving_review_count: Some(2),
                dismiss_stale_reviews: Some(true),
                require_code_owner_reviews: Some(true),
            },
            status_checks: StatusChecksRule {
                require_status_checks: Some(true),
                up_to_date_before_merge: Some(true),
                contexts: vec!["ci/build".to_string()],
            },
        }
    }

    #[test]
    fn test_fully_protected_default_branch() {
        let repo = FakeRepo::new().with_default_branch(BranchRef {
            name: "main".to_string(),
            protected: Some(true),
            rule: locked_down(),
        });

        let result = run(&CheckRequest::new(&repo, Vec::new()));
        assert_eq!(result.score, MAX_RESULT_SCORE);
        assert_eq!(result.findings.len(), 11);
        assert_eq!(result.details.len(), 11);
    }

    #[test]
    fn test_empty_repository_scores_zero_instead_of_failing() {
        let repo = FakeRepo::new();
        let result = run(&CheckRequest::new(&repo, Vec::new()));
        assert!(!result.failed());
        assert_eq!(result.score, 0);
        assert_eq!(result.reason, "no branches found");
    }

    #[test]
    fn test_branches_unsupported_is_min_score() {
        let repo = FakeRepo::new().without(Capability::Branches);
        let result = run(&CheckRequest::new(&repo, Vec::new()));
        assert_eq!(result.score, 0);
        assert_eq!(result.reason, "no branches found");
    }
}
