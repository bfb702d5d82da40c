use crate::models::finding::ProbeId;
use crate::models::raw::Domain;
use crate::models::RequestKind;
use thiserror::Error;

/// 仓库访问层能力
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    FileListing,
    FileContent,
    Branches,
    CommitHistory,
    Releases,
    WorkflowRuns,
    Contributors,
    Issues,
    Licenses,
    Webhooks,
    Languages,
}

/// Errors reported by a [`crate::services::RepoAccess`] backend.
///
/// `Unsupported` is consumed inside collectors and never leaves them.
#[derive(Error, Debug)]
pub enum AccessError {
    #[error("capability not supported by this repository backend: {0:?}")]
    Unsupported(Capability),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("backend error: {0}")]
    Backend(String),
}

impl AccessError {
    pub fn is_unsupported(&self) -> bool {
        matches!(self, AccessError::Unsupported(_))
    }
}

pub type AccessResult<T> = std::result::Result<T, AccessError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProbeError {
    #[error("probe {probe} requires {domain} raw data, which was not collected")]
    MissingRawData { probe: ProbeId, domain: Domain },

    #[error("probe {probe} produced a finding for {found}")]
    ForeignFinding { probe: ProbeId, found: ProbeId },
}

/// 单个检查失败的原因
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckError {
    #[error("check {0} is already registered")]
    DuplicateRegistration(String),

    #[error("unknown check: {0}")]
    UnknownCheck(String),

    #[error("check {check} does not support {kind:?} requests")]
    UnsupportedRequest { check: String, kind: RequestKind },

    #[error("{check}: collecting raw data failed: {message}")]
    Collector { check: String, message: String },

    #[error("{check}: {source}")]
    Probe {
        check: String,
        #[source]
        source: ProbeError,
    },

    #[error("{check}: invalid probe results: {message}")]
    InvalidProbeResults { check: String, message: String },
}

impl CheckError {
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            CheckError::DuplicateRegistration(_)
                | CheckError::UnknownCheck(_)
                | CheckError::UnsupportedRequest { .. }
        )
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] serde_yaml::Error),
}
