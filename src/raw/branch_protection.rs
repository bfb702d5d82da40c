use crate::error::Capability;
use crate::models::{BranchProtectionData, BranchRef};
use crate::services::{query_optional, RepoAccess};
use anyhow::{Context, Result};
use std::collections::BTreeSet;

/// 默认分支 + 发布分支的保护规则
pub fn collect(access: &dyn RepoAccess) -> Result<BranchProtectionData> {
    let default_branch = query_optional(access, Capability::Branches, || access.default_branch())
        .context("failure getting default branch")?
        .flatten();
    let Some(default_branch) = default_branch else {
        log::debug!("No default branch, branch protection data is empty");
        return Ok(BranchProtectionData::default());
    };

    let releases = query_optional(access, Capability::Releases, || access.list_releases())
        .context("failure listing releases")?
        .unwrap_or_default();

    let release_branches: BTreeSet<&str> = releases
        .iter()
        .map(|r| r.target_commitish.as_str())
        .filter(|name| !name.is_empty() && !is_commit_sha(name) && *name != default_branch.name)
        .collect();

    let mut branches: Vec<BranchRef> = Vec::with_capacity(release_branches.len() + 1);
    for name in release_branches {
        match access.get_branch(name) {
            Ok(Some(branch)) => branches.push(branch),
            Ok(None) => log::debug!("Release branch {} no longer exists", name),
            Err(e) if e.is_unsupported() => break,
            Err(e) => return Err(e).with_context(|| format!("failure getting branch {}", name)),
        }
    }
    branches.insert(0, default_branch);

    Ok(BranchProtectionData { branches })
}

fn is_commit_sha(name: &str) -> bool {
    name.len() == 40 && name.chars().all(|c| c.is_ascii_hexdigit())
}
