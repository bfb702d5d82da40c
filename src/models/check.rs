use crate::error::CheckError;
use crate::models::finding::{FileKind, Finding, ProbeId};
use serde::{Deserialize, Serialize, Serializer};

pub const MAX_RESULT_SCORE: i32 = 10;
pub const MIN_RESULT_SCORE: i32 = 0;
/// 检查未能运行时使用的分数
pub const INCONCLUSIVE_RESULT_SCORE: i32 = -1;

/// 检查可接受的请求形态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestKind {
    /// Full commit history and hosted metadata are available.
    CommitBased,
    /// Only a file tree is available.
    FileBased,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DetailType {
    Info,
    Warn,
    Debug,
}

/// 审计日志的一行
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogMessage {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probe: Option<ProbeId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<FileKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

impl LogMessage {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Carries the finding's probe and location into the log line.
    pub fn for_finding(finding: &Finding, text: impl Into<String>) -> Self {
        let location = finding.location();
        Self {
            text: text.into(),
            probe: Some(finding.probe()),
            path: location.map(|l| l.path.clone()),
            kind: location.map(|l| l.kind),
            offset: location.map(|l| l.offset),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckDetail {
    #[serde(rename = "type")]
    pub kind: DetailType,
    pub msg: LogMessage,
}

/// 单个检查的结果
///
/// `score` is [`INCONCLUSIVE_RESULT_SCORE`] exactly when `error` is set. The
/// fields are crate-private so the constructors below are the only way to
/// build a result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckResult {
    pub(crate) name: String,
    pub(crate) score: i32,
    pub(crate) reason: String,
    pub(crate) findings: Vec<Finding>,
    pub(crate) details: Vec<CheckDetail>,
    #[serde(serialize_with = "serialize_error", skip_serializing_if = "Option::is_none")]
    pub(crate) error: Option<CheckError>,
}

impl CheckResult {
    pub fn with_score(name: &str, reason: impl Into<String>, score: i32) -> Self {
        Self {
            name: name.to_string(),
            score: score.clamp(MIN_RESULT_SCORE, MAX_RESULT_SCORE),
            reason: reason.into(),
            findings: Vec::new(),
            details: Vec::new(),
            error: None,
        }
    }

    pub fn max_score(name: &str, reason: impl Into<String>) -> Self {
        Self::with_score(name, reason, MAX_RESULT_SCORE)
    }

    pub fn min_score(name: &str, reason: impl Into<String>) -> Self {
        Self::with_score(name, reason, MIN_RESULT_SCORE)
    }

    /// 检查运行失败：分数为 -1，原因即错误描述
    pub fn runtime_error(name: &str, error: CheckError) -> Self {
        Self {
            name: name.to_string(),
            score: INCONCLUSIVE_RESULT_SCORE,
            reason: error.to_string(),
            findings: Vec::new(),
            details: Vec::new(),
            error: Some(error),
        }
    }

    pub fn failed(&self) -> bool {
        self.error.is_some()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    pub fn details(&self) -> &[CheckDetail] {
        &self.details
    }

    pub fn error(&self) -> Option<&CheckError> {
        self.error.as_ref()
    }

    /// Attaches the audit trail of a scored result; failed results stay bare.
    pub(crate) fn attach(&mut self, findings: Vec<Finding>, details: Vec<CheckDetail>) {
        if self.failed() {
            return;
        }
        self.findings = findings;
        self.details = details;
    }
}

fn serialize_error<S>(error: &Option<CheckError>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match error {
        Some(e) => serializer.serialize_str(&e.to_string()),
        None => serializer.serialize_none(),
    }
}
