use serde::{Deserialize, Serialize};
use std::fmt;

/// 探针标识（全局唯一）
///
/// The serialized form is the stable camelCase id consumed by report renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProbeId {
    #[serde(rename = "freeOfUnverifiedBinaryArtifacts")]
    FreeOfUnverifiedBinaryArtifacts,
    #[serde(rename = "hasBinaryArtifacts")]
    HasBinaryArtifacts,
    #[serde(rename = "branchesAreProtected")]
    BranchesAreProtected,
    #[serde(rename = "blocksDeleteOnBranches")]
    BlocksDeleteOnBranches,
    #[serde(rename = "blocksForcePushOnBranches")]
    BlocksForcePushOnBranches,
    #[serde(rename = "requiresPRsToChangeCode")]
    RequiresPrsToChangeCode,
    #[serde(rename = "requiresApproversForPullRequests")]
    RequiresApproversForPullRequests,
    #[serde(rename = "requiresTwoApproversForPullRequests")]
    RequiresTwoApproversForPullRequests,
    #[serde(rename = "dismissesStaleReviews")]
    DismissesStaleReviews,
    #[serde(rename = "requiresCodeOwnersReview")]
    RequiresCodeOwnersReview,
    #[serde(rename = "requiresUpToDateBranches")]
    RequiresUpToDateBranches,
    #[serde(rename = "runsStatusChecksBeforeMerging")]
    RunsStatusChecksBeforeMerging,
    #[serde(rename = "branchProtectionAppliesToAdmins")]
    BranchProtectionAppliesToAdmins,
    #[serde(rename = "codeApproved")]
    CodeApproved,
    #[serde(rename = "codeReviewOneReviewers")]
    CodeReviewOneReviewers,
    #[serde(rename = "hasSBOM")]
    HasSbom,
    #[serde(rename = "hasReleaseSBOM")]
    HasReleaseSbom,
    #[serde(rename = "sbomStandardsFileUsed")]
    SbomStandardsFileUsed,
}

impl ProbeId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProbeId::FreeOfUnverifiedBinaryArtifacts => "freeOfUnverifiedBinaryArtifacts",
            ProbeId::HasBinaryArtifacts => "hasBinaryArtifacts",
            ProbeId::BranchesAreProtected => "branchesAreProtected",
            ProbeId::BlocksDeleteOnBranches => "blocksDeleteOnBranches",
            ProbeId::BlocksForcePushOnBranches => "blocksForcePushOnBranches",
            ProbeId::RequiresPrsToChangeCode => "requiresPRsToChangeCode",
            ProbeId::RequiresApproversForPullRequests => "requiresApproversForPullRequests",
            ProbeId::RequiresTwoApproversForPullRequests => "requiresTwoApproversForPullRequests",
            ProbeId::DismissesStaleReviews => "dismissesStaleReviews",
            ProbeId::RequiresCodeOwnersReview => "requiresCodeOwnersReview",
            ProbeId::RequiresUpToDateBranches => "requiresUpToDateBranches",
            ProbeId::RunsStatusChecksBeforeMerging => "runsStatusChecksBeforeMerging",
            ProbeId::BranchProtectionAppliesToAdmins => "branchProtectionAppliesToAdmins",
            ProbeId::CodeApproved => "codeApproved",
            ProbeId::CodeReviewOneReviewers => "codeReviewOneReviewers",
            ProbeId::HasSbom => "hasSBOM",
            ProbeId::HasReleaseSbom => "hasReleaseSBOM",
            ProbeId::SbomStandardsFileUsed => "sbomStandardsFileUsed",
        }
    }
}

impl fmt::Display for ProbeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 探针结论
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    True,
    False,
    NotApplicable,
    /// Never produced by a well-formed probe.
    Error,
}

/// 证据所在位置的类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileKind {
    Source,
    #[serde(rename = "URL")]
    Url,
    Binary,
    BinaryVerified,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub kind: FileKind,
    pub path: String,
    pub offset: u32,
}

/// 单条证据；创建后不可修改
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    probe: ProbeId,
    outcome: Outcome,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<Location>,
}

impl Finding {
    pub fn new(probe: ProbeId, outcome: Outcome, message: impl Into<String>) -> Self {
        Self {
            probe,
            outcome,
            message: message.into(),
            location: None,
        }
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    pub fn probe(&self) -> ProbeId {
        self.probe
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finding_serializes_probe_string_id() {
        let finding = Finding::new(ProbeId::HasSbom, Outcome::True, "sbom.spdx.json").with_location(Location {
            kind: FileKind::Source,
            path: "sbom.spdx.json".to_string(),
            offset: 0,
        });

        let json = serde_json::to_value(&finding).unwrap();
        assert_eq!(json["probe"], "hasSBOM");
        assert_eq!(json["outcome"], "True");
        assert_eq!(json["location"]["kind"], "Source");
    }

    #[test]
    fn test_finding_without_location_omits_field() {
        let finding = Finding::new(ProbeId::CodeApproved, Outcome::NotApplicable, "no changesets");
        let json = serde_json::to_value(&finding).unwrap();
        assert!(json.get("location").is_none());
    }

    #[test]
    fn test_display_matches_serialized_id() {
        for probe in [ProbeId::RequiresPrsToChangeCode, ProbeId::HasReleaseSbom] {
            let json = serde_json::to_value(probe).unwrap();
            assert_eq!(json, probe.to_string());
        }
    }
}
