use crate::models::finding::{FileKind, Location};
use crate::models::repo::BranchRef;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const OFFSET_DEFAULT: u32 = 0;

/// 采集器产出的文件记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct File {
    pub path: String,
    pub kind: FileKind,
    pub offset: u32,
}

impl File {
    pub fn new(path: impl Into<String>, kind: FileKind) -> Self {
        Self {
            path: path.into(),
            kind,
            offset: OFFSET_DEFAULT,
        }
    }

    pub fn location(&self) -> Location {
        Location {
            kind: self.kind,
            path: self.path.clone(),
            offset: self.offset,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BinaryArtifactData {
    pub files: Vec<File>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BranchProtectionData {
    pub branches: Vec<BranchRef>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReviewPlatform {
    GitHub,
    Gerrit,
    Phabricator,
    Unknown,
}

/// 一组一起合入的提交
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Changeset {
    pub revision_id: String,
    pub platform: ReviewPlatform,
    pub author: String,
    pub commits: Vec<String>,
    pub reviews: Vec<crate::models::repo::Review>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CodeReviewData {
    pub changesets: Vec<Changeset>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SbomOrigin {
    Source,
    /// Source SBOM kept at the repository root, where SPDX and CycloneDX
    /// tooling looks for it.
    Standards,
    Release,
}

impl SbomOrigin {
    pub fn in_source_tree(self) -> bool {
        matches!(self, SbomOrigin::Source | SbomOrigin::Standards)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SbomFile {
    pub name: String,
    pub origin: SbomOrigin,
    pub file: File,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SbomData {
    pub files: Vec<SbomFile>,
    /// Releases inspected for SBOM assets; zero when releases are unavailable.
    pub release_count: usize,
}

/// 原始数据所属的检查领域
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    BinaryArtifacts,
    BranchProtection,
    CodeReview,
    Sbom,
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Domain::BinaryArtifacts => "binary artifacts",
            Domain::BranchProtection => "branch protection",
            Domain::CodeReview => "code review",
            Domain::Sbom => "sbom",
        };
        f.write_str(name)
    }
}

/// 一次检查调用的原始数据聚合
///
/// Only [`RawDataBuilder`] can fill the fields; once built the aggregate is
/// handed to probes by shared reference and never changes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawData {
    binary_artifacts: Option<BinaryArtifactData>,
    branch_protection: Option<BranchProtectionData>,
    code_review: Option<CodeReviewData>,
    sbom: Option<SbomData>,
}

impl RawData {
    pub fn builder() -> RawDataBuilder {
        RawDataBuilder::default()
    }

    pub fn binary_artifacts(&self) -> Option<&BinaryArtifactData> {
        self.binary_artifacts.as_ref()
    }

    pub fn branch_protection(&self) -> Option<&BranchProtectionData> {
        self.branch_protection.as_ref()
    }

    pub fn code_review(&self) -> Option<&CodeReviewData> {
        self.code_review.as_ref()
    }

    pub fn sbom(&self) -> Option<&SbomData> {
        self.sbom.as_ref()
    }

    pub fn has(&self, domain: Domain) -> bool {
        match domain {
            Domain::BinaryArtifacts => self.binary_artifacts.is_some(),
            Domain::BranchProtection => self.branch_protection.is_some(),
            Domain::CodeReview => self.code_review.is_some(),
            Domain::Sbom => self.sbom.is_some(),
        }
    }
}

#[derive(Debug, Default)]
pub struct RawDataBuilder {
    inner: RawData,
}

impl RawDataBuilder {
    pub fn binary_artifacts(mut self, data: BinaryArtifactData) -> Self {
        self.inner.binary_artifacts = Some(data);
        self
    }

    pub fn branch_protection(mut self, data: BranchProtectionData) -> Self {
        self.inner.branch_protection = Some(data);
        self
    }

    pub fn code_review(mut self, data: CodeReviewData) -> Self {
        self.inner.code_review = Some(data);
        self
    }

    pub fn sbom(mut self, data: SbomData) -> Self {
        self.inner.sbom = Some(data);
        self
    }

    pub fn build(self) -> RawData {
        self.inner
    }
}
