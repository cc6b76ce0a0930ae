use business::domain::logger::Logger;
use tracing::{debug, error, info, warn};

/// Forwards domain log messages to `tracing` under the `basket` target, so
/// they pick up the fields of the current request span.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn info(&self, message: &str) {
        info!(target: "basket", "{}", message);
    }
    fn warn(&self, message: &str) {
        warn!(target: "basket", "{}", message);
    }
    fn error(&self, message: &str) {
        error!(target: "basket", "{}", message);
    }
    fn debug(&self, message: &str) {
        debug!(target: "basket", "{}", message);
    }
}
