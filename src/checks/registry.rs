use super::CheckRequest;
use crate::error::CheckError;
use crate::models::{CheckResult, RequestKind};
use std::collections::BTreeMap;

pub type CheckFn = fn(&CheckRequest<'_>) -> CheckResult;

pub struct RegisteredCheck {
    pub name: String,
    pub run: CheckFn,
    /// Empty means every request kind is accepted.
    pub supported_kinds: Vec<RequestKind>,
}

impl RegisteredCheck {
    fn accepts(&self, kinds: &[RequestKind]) -> Option<RequestKind> {
        if self.supported_kinds.is_empty() {
            return None;
        }
        kinds
            .iter()
            .copied()
            .find(|k| !self.supported_kinds.contains(k))
    }
}

/// 检查注册表
#[derive(Default)]
pub struct CheckRegistry {
    checks: BTreeMap<String, RegisteredCheck>,
}

impl CheckRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the built-in checks.
    pub fn with_default_checks() -> Result<Self, CheckError> {
        let mut registry = Self::new();
        registry.register(
            super::binary_artifacts::CHECK_NAME,
            super::binary_artifacts::run,
            &[],
        )?;
        registry.register(
            super::branch_protection::CHECK_NAME,
            super::branch_protection::run,
            &[],
        )?;
        registry.register(
            super::code_review::CHECK_NAME,
            super::code_review::run,
            &[RequestKind::CommitBased],
        )?;
        registry.register(super::sbom::CHECK_NAME, super::sbom::run, &[])?;
        Ok(registry)
    }

    pub fn register(
        &mut self,
        name: &str,
        run: CheckFn,
        supported_kinds: &[RequestKind],
    ) -> Result<(), CheckError> {
        if self.checks.contains_key(name) {
            return Err(CheckError::DuplicateRegistration(name.to_string()));
        }
        self.checks.insert(
            name.to_string(),
            RegisteredCheck {
                name: name.to_string(),
                run,
                supported_kinds: supported_kinds.to_vec(),
            },
        );
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<&RegisteredCheck> {
        self.checks.get(name)
    }

    pub fn list(&self) -> Vec<&str> {
        self.checks.keys().map(String::as_str).collect()
    }

    /// 运行检查；请求形态不被支持时不会执行检查本体
    pub fn run(&self, name: &str, request: &CheckRequest<'_>) -> CheckResult {
        let Some(check) = self.lookup(name) else {
            return CheckResult::runtime_error(name, CheckError::UnknownCheck(name.to_string()));
        };

        if let Some(kind) = check.accepts(&request.kinds) {
            return CheckResult::runtime_error(
                name,
                CheckError::UnsupportedRequest {
                    check: name.to_string(),
                    kind,
                },
            );
        }

        log::debug!("Running check {}", name);
        (check.run)(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::INCONCLUSIVE_RESULT_SCORE;
    use crate::services::fake_repo::FakeRepo;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static CALLS: AtomicUsize = AtomicUsize::new(0);

    fn counting_check(_: &CheckRequest<'_>) -> CheckResult {
        CALLS.fetch_add(1, Ordering::SeqCst);
        CheckResult::max_score("Counting", "ran")
    }

    fn noop_check(_: &CheckRequest<'_>) -> CheckResult {
        CheckResult::max_score("Noop", "ran")
    }

    #[test]
    fn test_duplicate_registration_is_rejected() {
        let mut registry = CheckRegistry::new();
        registry.register("Noop", noop_check, &[]).unwrap();
        let err = registry.register("Noop", noop_check, &[]).unwrap_err();
        assert_eq!(err, CheckError::DuplicateRegistration("Noop".to_string()));
    }

    #[test]
    fn test_unsupported_kind_is_rejected_before_running() {
        let mut registry = CheckRegistry::new();
        registry
            .register("Counting", counting_check, &[RequestKind::CommitBased])
            .unwrap();

        let repo = FakeRepo::new();
        let request = CheckRequest::new(&repo, vec![RequestKind::FileBased]);
        let result = registry.run("Counting", &request);

        assert_eq!(result.score, INCONCLUSIVE_RESULT_SCORE);
        assert!(matches!(result.error, Some(CheckError::UnsupportedRequest { .. })));
        assert_eq!(CALLS.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_unknown_check() {
        let registry = CheckRegistry::new();
        let repo = FakeRepo::new();
        let result = registry.run("Missing", &CheckRequest::new(&repo, Vec::new()));
        assert!(result.error.as_ref().is_some_and(|e| e.is_configuration()));
    }

    #[test]
    fn test_default_checks_are_listed_sorted() {
        let registry = CheckRegistry::with_default_checks().unwrap();
        assert_eq!(
            registry.list(),
            vec!["Binary-Artifacts", "Branch-Protection", "Code-Review", "SBOM"]
        );
        assert_eq!(
            registry.lookup("Code-Review").unwrap().supported_kinds,
            vec![RequestKind::CommitBased]
        );
    }
}
