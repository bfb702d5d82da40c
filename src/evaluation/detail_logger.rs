use crate::models::{CheckDetail, DetailType, LogMessage};

/// 评估策略写审计日志的接口
pub trait DetailLogger {
    fn info(&mut self, msg: LogMessage);
    fn warn(&mut self, msg: LogMessage);
    fn debug(&mut self, msg: LogMessage);

    /// Hands back everything recorded so far and starts a fresh log.
    fn flush(&mut self) -> Vec<CheckDetail>;
}

/// Records details for one check and mirrors each line to the `log` facade.
#[derive(Debug)]
pub struct CheckDetailLogger {
    check: String,
    details: Vec<CheckDetail>,
}

impl CheckDetailLogger {
    pub fn new(check: &str) -> Self {
        Self {
            check: check.to_string(),
            details: Vec::new(),
        }
    }

    fn record(&mut self, kind: DetailType, msg: LogMessage) {
        match kind {
            DetailType::Info => log::info!("[{}] {}", self.check, describe(&msg)),
            DetailType::Warn => log::warn!("[{}] {}", self.check, describe(&msg)),
            DetailType::Debug => log::debug!("[{}] {}", self.check, describe(&msg)),
        }
        self.details.push(CheckDetail { kind, msg });
    }
}

fn describe(msg: &LogMessage) -> String {
    match &msg.path {
        Some(path) => format!("{} ({})", msg.text, path),
        None => msg.text.clone(),
    }
}

impl DetailLogger for CheckDetailLogger {
    fn info(&mut self, msg: LogMessage) {
        self.record(DetailType::Info, msg);
    }

    fn warn(&mut self, msg: LogMessage) {
        self.record(DetailType::Warn, msg);
    }

    fn debug(&mut self, msg: LogMessage) {
        self.record(DetailType::Debug, msg);
    }

    fn flush(&mut self) -> Vec<CheckDetail> {
        std::mem::take(&mut self.details)
    }
}
