use crate::error::Capability;
use crate::models::{Changeset, CodeReviewData, Commit, ReviewPlatform};
use crate::services::{query_optional, RepoAccess};
use anyhow::{Context, Result};
use std::collections::HashMap;

pub const DEFAULT_COMMIT_DEPTH: usize = 30;

const GERRIT_TRAILER: &str = "\nReviewed-on:";
const PHABRICATOR_TRAILER: &str = "\nDifferential Revision:";
const BOT_SUFFIX: &str = "[bot]";

/// 将最近的提交归并为变更集
pub fn collect(access: &dyn RepoAccess, commit_depth: usize) -> Result<CodeReviewData> {
    let commits = query_optional(access, Capability::CommitHistory, || access.list_commits())
        .context("failure listing commits")?
        .unwrap_or_default();

    let mut changesets: Vec<Changeset> = Vec::new();
    let mut by_merge_request: HashMap<u64, usize> = HashMap::new();

    for commit in commits.into_iter().take(commit_depth) {
        if let Some(mr) = &commit.merge_request {
            if mr.merged_at.is_none() {
                log::debug!("Skipping commit {} from unmerged request #{}", commit.sha, mr.number);
                continue;
            }
            if let Some(&idx) = by_merge_request.get(&mr.number) {
                changesets[idx].commits.push(commit.sha.clone());
                continue;
            }
            by_merge_request.insert(mr.number, changesets.len());
            changesets.push(Changeset {
                revision_id: mr.number.to_string(),
                platform: ReviewPlatform::GitHub,
                author: mr.author.clone(),
                commits: vec![commit.sha.clone()],
                reviews: mr.reviews.clone(),
            });
            continue;
        }

        changesets.push(single_commit_changeset(&commit));
    }

    changesets.retain(|c| {
        let bot = c.author.ends_with(BOT_SUFFIX);
        if bot {
            log::debug!("Skipping bot changeset {} by {}", c.revision_id, c.author);
        }
        !bot
    });

    Ok(CodeReviewData { changesets })
}

fn single_commit_changeset(commit: &Commit) -> Changeset {
    let message = format!("\n{}", commit.message);
    let platform = if message.contains(GERRIT_TRAILER) {
        ReviewPlatform::Gerrit
    } else if message.contains(PHABRICATOR_TRAILER) {
        ReviewPlatform::Phabricator
    } else {
        ReviewPlatform::Unknown
    };

    Changeset {
        revision_id: commit.sha.clone(),
        platform,
        author: commit.author.clone(),
        commits: vec![commit.sha.clone()],
        reviews: Vec::new(),
    }
}
