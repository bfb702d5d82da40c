use super::{require, Probe};
use crate::error::ProbeError;
use crate::models::{Changeset, Domain, Finding, Outcome, ProbeId, RawData, ReviewPlatform, ReviewState};

pub static CODE_APPROVED: Probe = Probe {
    id: ProbeId::CodeApproved,
    reads: &[Domain::CodeReview],
    run: code_approved,
};

pub static CODE_REVIEW_ONE_REVIEWERS: Probe = Probe {
    id: ProbeId::CodeReviewOneReviewers,
    reads: &[Domain::CodeReview],
    run: code_review_one_reviewers,
};

/// Gerrit / Phabricator 只有审核通过才能合入
fn review_implied(changeset: &Changeset) -> bool {
    matches!(changeset.platform, ReviewPlatform::Gerrit | ReviewPlatform::Phabricator)
}

fn per_changeset(
    raw: &RawData,
    probe: ProbeId,
    judge: fn(&Changeset) -> (bool, String),
) -> Result<Vec<Finding>, ProbeError> {
    let data = require(probe, Domain::CodeReview, raw.code_review())?;

    if data.changesets.is_empty() {
        return Ok(vec![Finding::new(probe, Outcome::NotApplicable, "no changesets found")]);
    }

    Ok(data
        .changesets
        .iter()
        .map(|changeset| {
            let (ok, text) = judge(changeset);
            let outcome = if ok { Outcome::True } else { Outcome::False };
            Finding::new(probe, outcome, text)
        })
        .collect())
}

fn code_approved(raw: &RawData) -> Result<Vec<Finding>, ProbeError> {
    per_changeset(raw, ProbeId::CodeApproved, |changeset| {
        if review_implied(changeset) {
            return (
                true,
                format!("changeset {} merged through {:?} review", changeset.revision_id, changeset.platform),
            );
        }
        let approver = changeset
            .reviews
            .iter()
            .find(|r| r.state == ReviewState::Approved && r.author != changeset.author);
        match approver {
            Some(r) => (true, format!("changeset {} approved by {}", changeset.revision_id, r.author)),
            None => (false, format!("changeset {} merged without approval", changeset.revision_id)),
        }
    })
}

fn code_review_one_reviewers(raw: &RawData) -> Result<Vec<Finding>, ProbeError> {
    per_changeset(raw, ProbeId::CodeReviewOneReviewers, |changeset| {
        let reviewed = review_implied(changeset)
            || changeset.reviews.iter().any(|r| r.author != changeset.author);
        if reviewed {
            (true, format!("changeset {} has at least one reviewer", changeset.revision_id))
        } else {
            (false, format!("changeset {} has no reviewer other than its author", changeset.revision_id))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CodeReviewData, Review};

    fn changeset(id: &str, platform: ReviewPlatform, reviews: Vec<(&str, ReviewState)>) -> Changeset {
        Changeset {
            revision_id: id.to_string(),
            platform,
            author: "alice".to_string(),
            commits: vec![id.to_string()],
            reviews: reviews
                .into_iter()
                .map(|(author, state)| Review {
                    author: author.to_string(),
                    state,
                })
                .collect(),
        }
    }

    fn raw(changesets: Vec<Changeset>) -> RawData {
        RawData::builder()
            .code_review(CodeReviewData { changesets })
            .build()
    }

    #[test]
    fn test_self_approval_does_not_count() {
        let raw = raw(vec![changeset(
            "1",
            ReviewPlatform::GitHub,
            vec![("alice", ReviewState::Approved), ("bob", ReviewState::Commented)],
        )]);

        assert_eq!(code_approved(&raw).unwrap()[0].outcome(), Outcome::False);
        assert_eq!(code_review_one_reviewers(&raw).unwrap()[0].outcome(), Outcome::True);
    }

    #[test]
    fn test_gerrit_changeset_is_approved() {
        let raw = raw(vec![changeset("abc", ReviewPlatform::Gerrit, Vec::new())]);
        assert_eq!(code_approved(&raw).unwrap()[0].outcome(), Outcome::True);
    }

    #[test]
    fn test_unreviewed_direct_push() {
        let raw = raw(vec![changeset("def", ReviewPlatform::Unknown, Vec::new())]);
        assert_eq!(code_approved(&raw).unwrap()[0].outcome(), Outcome::False);
        assert_eq!(code_review_one_reviewers(&raw).unwrap()[0].outcome(), Outcome::False);
    }

    #[test]
    fn test_no_changesets_is_not_applicable() {
        let findings = code_approved(&raw(Vec::new())).unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].outcome(), Outcome::NotApplicable);
    }
}
