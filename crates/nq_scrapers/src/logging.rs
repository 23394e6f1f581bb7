use std::sync::Once;

use tracing::Level;

static INIT: Once = Once::new();

/// Logs through `tracing` with a chain of prefixes such as `[reuters]`.
#[derive(Debug, Clone, Default)]
pub struct Logger {
    prefixes: Vec<String>,
}

impl Logger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefixes.push(prefix.into());
        self
    }

    fn render(&self, message: &str) -> String {
        let mut line = String::new();
        for prefix in &self.prefixes {
            line.push_str(prefix);
            line.push(' ');
        }
        line.push_str(message);
        line
    }

    pub fn info(&self, message: &str) {
        tracing::info!("{}", self.render(message));
    }

    pub fn warn(&self, message: &str) {
        tracing::warn!("{}", self.render(message));
    }

    pub fn error(&self, message: &str) {
        tracing::error!("{}", self.render(message));
    }

    pub fn debug(&self, message: &str) {
        tracing::debug!("{}", self.render(message));
    }
}

/// Installs the global fmt subscriber once. Later calls, or calls after
/// another subscriber was set, leave logging as it is.
pub fn init_logging(level: Level) -> Logger {
    if !tracing::dispatcher::has_been_set() {
        INIT.call_once(|| {
            let _ = tracing_subscriber::fmt()
                .with_max_level(level)
                .with_target(false)
                .try_init();
        });
    }
    Logger::new()
}
