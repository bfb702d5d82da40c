use crate::error::{AccessError, AccessResult, Capability};
use crate::models::{
    BranchRef, Commit, Contributor, Issue, Language, License, Release, Webhook, WorkflowRun,
};
use std::io::Read;

/// 只读的仓库访问接口
///
/// Backends advertise what they can answer through [`RepoAccess::supports`];
/// a method for an unsupported capability returns
/// [`AccessError::Unsupported`]. Cancellation and timeouts, if any, belong to
/// the implementation.
pub trait RepoAccess: Send + Sync {
    fn supports(&self, capability: Capability) -> bool;

    /// Repository-relative paths accepted by `predicate`, in a stable order.
    fn list_files(&self, predicate: &dyn Fn(&str) -> bool) -> AccessResult<Vec<String>>;

    fn file_reader(&self, path: &str) -> AccessResult<Box<dyn Read + '_>>;

    fn read_file(&self, path: &str) -> AccessResult<Vec<u8>> {
        let mut reader = self.file_reader(path)?;
        let mut content = Vec::new();
        reader.read_to_end(&mut content)?;
        Ok(content)
    }

    /// `None` for a repository without any branch yet.
    fn default_branch(&self) -> AccessResult<Option<BranchRef>> {
        Err(AccessError::Unsupported(Capability::Branches))
    }

    fn get_branch(&self, _name: &str) -> AccessResult<Option<BranchRef>> {
        Err(AccessError::Unsupported(Capability::Branches))
    }

    /// Newest first.
    fn list_commits(&self) -> AccessResult<Vec<Commit>> {
        Err(AccessError::Unsupported(Capability::CommitHistory))
    }

    fn list_releases(&self) -> AccessResult<Vec<Release>> {
        Err(AccessError::Unsupported(Capability::Releases))
    }

    fn list_successful_workflow_runs(&self, _workflow_file: &str) -> AccessResult<Vec<WorkflowRun>> {
        Err(AccessError::Unsupported(Capability::WorkflowRuns))
    }

    fn list_contributors(&self) -> AccessResult<Vec<Contributor>> {
        Err(AccessError::Unsupported(Capability::Contributors))
    }

    fn list_issues(&self) -> AccessResult<Vec<Issue>> {
        Err(AccessError::Unsupported(Capability::Issues))
    }

    fn list_licenses(&self) -> AccessResult<Vec<License>> {
        Err(AccessError::Unsupported(Capability::Licenses))
    }

    fn list_webhooks(&self) -> AccessResult<Vec<Webhook>> {
        Err(AccessError::Unsupported(Capability::Webhooks))
    }

    fn list_languages(&self) -> AccessResult<Vec<Language>> {
        Err(AccessError::Unsupported(Capability::Languages))
    }
}

/// Runs `query` only when the backend supports `capability`.
///
/// `Ok(None)` means the capability is unavailable, whether the backend said
/// so up front or through [`AccessError::Unsupported`].
pub fn query_optional<T>(
    access: &dyn RepoAccess,
    capability: Capability,
    query: impl FnOnce() -> AccessResult<T>,
) -> AccessResult<Option<T>> {
    if !access.supports(capability) {
        log::debug!("Repository backend does not support {:?}", capability);
        return Ok(None);
    }
    match query() {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_unsupported() => {
            log::debug!("Repository backend reported {:?} as unsupported", capability);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}
