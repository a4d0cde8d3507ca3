//! Operation log channel.
//!
//! Every modeled failure is mirrored here with the exact message carried in
//! the returned outcome, before that outcome is returned to the caller, so
//! log output and returned errors never drift apart.

use tracing::{error, info};

pub trait OperationLog: Send + Sync {
    fn error(&self, message: &str);
    fn info(&self, message: &str);
}

/// Production log, forwarding to the active `tracing` subscriber.
pub struct TracingLog;

impl OperationLog for TracingLog {
    fn error(&self, message: &str) {
        error!("{}", message);
    }

    fn info(&self, message: &str) {
        info!("{}", message);
    }
}
