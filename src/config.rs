use crate::error::ConfigError;
use crate::models::RequestKind;
use crate::raw::code_review::DEFAULT_COMMIT_DEPTH;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 一次评分运行的配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScorecardConfig {
    /// Checks to run, by name. Empty runs every registered check.
    pub checks: Vec<String>,
    pub request_kinds: Vec<RequestKind>,
    pub commit_depth: usize,
    pub parallel: bool,
}

impl Default for ScorecardConfig {
    fn default() -> Self {
        Self {
            checks: Vec::new(),
            request_kinds: Vec::new(),
            commit_depth: DEFAULT_COMMIT_DEPTH,
            parallel: true,
        }
    }
}

impl ScorecardConfig {
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = ScorecardConfig::from_yaml_str("checks: [SBOM, Binary-Artifacts]\n").unwrap();
        assert_eq!(config.checks, vec!["SBOM", "Binary-Artifacts"]);
        assert_eq!(config.commit_depth, DEFAULT_COMMIT_DEPTH);
        assert!(config.parallel);
    }

    #[test]
    fn test_full_yaml() {
        let yaml = "request_kinds: [FileBased]\ncommit_depth: 10\nparallel: false\n";
        let config = ScorecardConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.request_kinds, vec![RequestKind::FileBased]);
        assert_eq!(config.commit_depth, 10);
        assert!(!config.parallel);
    }

    #[test]
    fn test_invalid_yaml_is_parse_error() {
        let err = ScorecardConfig::from_yaml_str("commit_depth: lots").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "checks: [Code-Review]").unwrap();

        let config = ScorecardConfig::from_path(file.path()).unwrap();
        assert_eq!(config.checks, vec!["Code-Review"]);

        let missing = ScorecardConfig::from_path("/nonexistent/scorecard.yaml").unwrap_err();
        assert!(matches!(missing, ConfigError::Read { .. }));
    }
}
