pub mod checks;
pub mod config;
pub mod error;
pub mod evaluation;
pub mod models;
pub mod probes;
pub mod raw;
pub mod scorecard;
pub mod services;

pub use checks::{CheckRegistry, CheckRequest};
pub use config::ScorecardConfig;
pub use scorecard::{Scorecard, ScorecardReport};
pub use services::{LocalDirAccess, RepoAccess};

/// 初始化日志（可重复调用）
pub fn init_logging() {
    if env_logger::try_init().is_err() {
        log::debug!("Logger already initialized");
    }
}

/// 对本地目录运行所有基于文件的检查
pub fn run(dir: &str, config: ScorecardConfig) -> anyhow::Result<ScorecardReport> {
    let access = LocalDirAccess::new(dir)?;
    let registry = CheckRegistry::with_default_checks()?;
    Ok(Scorecard::new(&registry, config).run(&access))
}
