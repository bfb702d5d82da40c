//! 测试用的内存仓库
use crate::error::{AccessError, AccessResult, Capability};
use crate::models::{BranchRef, Commit, Release, WorkflowRun};
use crate::services::RepoAccess;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::io::Read;

#[derive(Default)]
pub struct FakeRepo {
    files: BTreeMap<String, Vec<u8>>,
    default_branch: Option<BranchRef>,
    branches: HashMap<String, BranchRef>,
    commits: Vec<Commit>,
    releases: Vec<Release>,
    workflow_runs: HashMap<String, Vec<WorkflowRun>>,
    unsupported: HashSet<Capability>,
    failing: HashSet<Capability>,
}

impl FakeRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: &str, content: impl Into<Vec<u8>>) -> Self {
        self.files.insert(path.to_string(), content.into());
        self
    }

    pub fn with_default_branch(mut self, branch: BranchRef) -> Self {
        self.branches.insert(branch.name.clone(), branch.clone());
        self.default_branch = Some(branch);
        self
    }

    pub fn with_branch(mut self, branch: BranchRef) -> Self {
        self.branches.insert(branch.name.clone(), branch);
        self
    }

    pub fn with_commits(mut self, commits: Vec<Commit>) -> Self {
        self.commits = commits;
        self
    }

    pub fn with_releases(mut self, releases: Vec<Release>) -> Self {
        self.releases = releases;
        self
    }

    pub fn with_workflow_runs(mut self, workflow_file: &str, runs: Vec<WorkflowRun>) -> Self {
        self.workflow_runs.insert(workflow_file.to_string(), runs);
        self
    }

    pub fn without(mut self, capability: Capability) -> Self {
        self.unsupported.insert(capability);
        self
    }

    pub fn failing(mut self, capability: Capability) -> Self {
        self.failing.insert(capability);
        self
    }

    fn gate(&self, capability: Capability) -> AccessResult<()> {
        if self.unsupported.contains(&capability) {
            return Err(AccessError::Unsupported(capability));
        }
        if self.failing.contains(&capability) {
            return Err(AccessError::Backend(format!("{:?} request failed", capability)));
        }
        Ok(())
    }
}

impl RepoAccess for FakeRepo {
    // 总是声称支持，由具体调用返回 Unsupported，以覆盖两条降级路径
    fn supports(&self, _capability: Capability) -> bool {
        true
    }

    fn list_files(&self, predicate: &dyn Fn(&str) -> bool) -> AccessResult<Vec<String>> {
        self.gate(Capability::FileListing)?;
        Ok(self.files.keys().filter(|p| predicate(p)).cloned().collect())
    }

    fn file_reader(&self, path: &str) -> AccessResult<Box<dyn Read + '_>> {
        self.gate(Capability::FileContent)?;
        let content = self
            .files
            .get(path)
            .ok_or_else(|| AccessError::NotFound(path.to_string()))?;
        Ok(Box::new(content.as_slice()))
    }

    fn default_branch(&self) -> AccessResult<Option<BranchRef>> {
        self.gate(Capability::Branches)?;
        Ok(self.default_branch.clone())
    }

    fn get_branch(&self, name: &str) -> AccessResult<Option<BranchRef>> {
        self.gate(Capability::Branches)?;
        Ok(self.branches.get(name).cloned())
    }

    fn list_commits(&self) -> AccessResult<Vec<Commit>> {
        self.gate(Capability::CommitHistory)?;
        Ok(self.commits.clone())
    }

    fn list_releases(&self) -> AccessResult<Vec<Release>> {
        self.gate(Capability::Releases)?;
        Ok(self.releases.clone())
    }

    fn list_successful_workflow_runs(&self, workflow_file: &str) -> AccessResult<Vec<WorkflowRun>> {
        self.gate(Capability::WorkflowRuns)?;
        Ok(self.workflow_runs.get(workflow_file).cloned().unwrap_or_default())
    }
}
