use super::{log_finding, validated, DetailLogger};
use crate::models::{
    CheckResult, FileKind, Finding, LogMessage, Outcome, ProbeId, MAX_RESULT_SCORE,
};
use crate::probes;

/// 每个未验证的二进制文件扣 1 分
pub fn evaluate(name: &str, findings: &[Finding], dl: &mut dyn DetailLogger) -> CheckResult {
    if let Err(result) = validated(name, findings, probes::BINARY_ARTIFACTS) {
        return result;
    }

    let mut unverified = 0;
    for f in findings {
        match (f.probe(), f.outcome()) {
            (ProbeId::FreeOfUnverifiedBinaryArtifacts, Outcome::False) => {
                unverified += 1;
                dl.warn(LogMessage::for_finding(f, "binary detected"));
            }
            (ProbeId::HasBinaryArtifacts, Outcome::True)
                if f.location().map(|l| l.kind) == Some(FileKind::BinaryVerified) =>
            {
                dl.info(LogMessage::for_finding(f, "verified binary detected"));
            }
            // 没有二进制文件是正常状态
            (ProbeId::HasBinaryArtifacts, Outcome::False) => {
                dl.info(LogMessage::for_finding(f, f.message()));
            }
            _ => log_finding(dl, f),
        }
    }

    if unverified == 0 {
        return CheckResult::max_score(name, "no binaries found in the repo");
    }
    CheckResult::with_score(name, "binaries present in source code", MAX_RESULT_SCORE - unverified)
}
