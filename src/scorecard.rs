use crate::checks::{CheckRegistry, CheckRequest};
use crate::config::ScorecardConfig;
use crate::models::CheckResult;
use crate::services::RepoAccess;
use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::Serialize;

/// 一次完整评分的报告
#[derive(Debug, Clone, Serialize)]
pub struct ScorecardReport {
    pub date: DateTime<Utc>,
    pub checks: Vec<CheckResult>,
    /// Mean score of the checks that did not fail; `None` if all failed.
    pub aggregate_score: Option<f64>,
}

pub struct Scorecard<'r> {
    registry: &'r CheckRegistry,
    config: ScorecardConfig,
}

impl<'r> Scorecard<'r> {
    pub fn new(registry: &'r CheckRegistry, config: ScorecardConfig) -> Self {
        Self { registry, config }
    }

    fn selected_checks(&self) -> Vec<String> {
        if self.config.checks.is_empty() {
            return self.registry.list().into_iter().map(String::from).collect();
        }
        self.config.checks.clone()
    }

    /// 运行所选检查，结果顺序与配置一致
    pub fn run(&self, access: &dyn RepoAccess) -> ScorecardReport {
        let names = self.selected_checks();
        let request = CheckRequest {
            access,
            kinds: self.config.request_kinds.clone(),
            commit_depth: self.config.commit_depth,
        };

        log::info!("Running {} check(s)", names.len());
        let checks: Vec<CheckResult> = if self.config.parallel {
            names
                .par_iter()
                .map(|name| self.registry.run(name, &request))
                .collect()
        } else {
            names
                .iter()
                .map(|name| self.registry.run(name, &request))
                .collect()
        };

        ScorecardReport {
            date: Utc::now(),
            aggregate_score: aggregate(&checks),
            checks,
        }
    }
}

fn aggregate(checks: &[CheckResult]) -> Option<f64> {
    let scores: Vec<f64> = checks
        .iter()
        .filter(|c| !c.failed())
        .map(|c| f64::from(c.score))
        .collect();
    if scores.is_empty() {
        return None;
    }
    Some(scores.iter().sum::<f64>() / scores.len() as f64)
}
