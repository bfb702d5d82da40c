use repo_posture_guard_lib::models::RequestKind;
use repo_posture_guard_lib::{init_logging, ScorecardConfig};

fn main() -> anyhow::Result<()> {
    // 初始化日志
    init_logging();

    let mut args = std::env::args().skip(1);
    let dir = args.next().unwrap_or_else(|| ".".to_string());

    let config = match std::env::var("REPO_POSTURE_CONFIG") {
        Ok(path) => ScorecardConfig::from_path(path)?,
        Err(_) => ScorecardConfig {
            request_kinds: vec![RequestKind::FileBased],
            ..ScorecardConfig::default()
        },
    };

    let report = repo_posture_guard_lib::run(&dir, config)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
