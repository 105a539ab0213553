use log::{debug, info, warn};
use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize the logging system
/// This should be called once at application startup. `.env` is loaded first
/// so a `RUST_LOG` kept there applies like one from the shell.
pub fn init_logger() {
    INIT.call_once(|| {
        dotenvy::dotenv().ok();
        let filters = std::env::var("RUST_LOG").ok();
        logger_builder(filters.as_deref()).init();

        debug!("Logging system initialized");
    });
}

/// Crate defaults, then `filters` (`RUST_LOG` syntax) on top
fn logger_builder(filters: Option<&str>) -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(log::LevelFilter::Info) // Default level
        .filter_module("seasonmap", log::LevelFilter::Debug) // More verbose for our crate
        .filter_module("reqwest", log::LevelFilter::Warn) // Reduce HTTP noise
        .filter_module("hyper", log::LevelFilter::Warn);
    if let Some(filters) = filters {
        builder.parse_filters(filters);
    }
    builder
        .format_timestamp_secs()
        .format_target(false)
        .format_module_path(false);
    builder
}

/// Macro for structured logging with context
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        log::info!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        log::debug!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        log::warn!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        log::error!($($arg)*)
    };
}

/// Structured logging helpers for common patterns
pub struct LogContext;

impl LogContext {
    /// Log API calls
    pub fn api_call(provider: &str, endpoint: &str, status: &str, duration_ms: Option<u64>) {
        match duration_ms {
            Some(duration) => debug!(
                "API: {} {} {} in {}ms",
                provider, endpoint, status, duration
            ),
            None => debug!("API: Starting {} {}", provider, endpoint),
        }
    }

    /// Log batch progress with the running match rate
    pub fn batch_progress(current: usize, total: usize, matched: usize) {
        let rate = Self::match_rate(matched, current);
        info!("Progress: {}/{} ({:.1}% match rate)", current, total, rate);
    }

    /// Log a skipped entry of the input surface
    pub fn skipped_input(line: usize, content: &str) {
        warn!("Skipping invalid ID on line {}: {}", line, content);
    }

    /// Log performance metrics
    pub fn performance_metric(operation: &str, duration_ms: u64, additional_info: Option<&str>) {
        match additional_info {
            Some(info) => info!(
                "Performance: {} took {}ms ({})",
                operation, duration_ms, info
            ),
            None => info!("Performance: {} took {}ms", operation, duration_ms),
        }
    }

    /// Percentage of `matched` over `processed`, 0 when nothing ran yet
    pub fn match_rate(matched: usize, processed: usize) -> f64 {
        if processed == 0 {
            0.0
        } else {
            matched as f64 / processed as f64 * 100.0
        }
    }
}

/// Helper for timing operations
pub struct TimedOperation {
    start: std::time::Instant,
    operation: String,
}

impl TimedOperation {
    pub fn new(operation: &str) -> Self {
        debug!("Starting: {}", operation);
        Self {
            start: std::time::Instant::now(),
            operation: operation.to_string(),
        }
    }

    pub fn finish(self) -> u64 {
        let duration = self.start.elapsed().as_millis() as u64;
        LogContext::performance_metric(&self.operation, duration, None);
        duration
    }

    pub fn finish_with_info(self, info: &str) -> u64 {
        let duration = self.start.elapsed().as_millis() as u64;
        LogContext::performance_metric(&self.operation, duration, Some(info));
        duration
    }
}
