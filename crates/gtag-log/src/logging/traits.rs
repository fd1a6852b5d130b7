//! Logger and provider trait definitions

use std::error::Error;
use std::sync::Arc;

use crate::types::{
    EventInfo, EventTimingInfo, LogInfo, LogLevel, LogMessage, PageViewInfo, PageViewTimingInfo,
};

/// Structured logging and tracking contract
///
/// Implementations never fail: a sink that cannot report simply drops the
/// call.
///
/// Implementations:
/// - `NoOpLogger`: Silent logger
/// - `GTagLogger`: Reports through a gtag-style tag sender
/// - `GTagLoggerProvider`: Forwards to its cached default `GTagLogger`
pub trait Logger: Send + Sync {
    /// Log a message or error at the given level
    fn log(&self, level: LogLevel, message: LogMessage, info: Option<&LogInfo>);

    /// Start timing a page view; `None` uses the default key
    fn start_track_page(&self, name: Option<&str>);

    /// Stop timing a page view and report it with its duration
    fn stop_track_page(&self, name: Option<&str>, info: Option<&PageViewTimingInfo>);

    /// Report a page view immediately
    fn track_page_view(&self, info: Option<&PageViewInfo>);

    /// Start timing a named event
    fn start_track_event(&self, name: &str);

    /// Stop timing a named event and report it with its duration
    fn stop_track_event(&self, name: &str, info: Option<&EventTimingInfo>);

    /// Report a custom event immediately
    fn track_event(&self, info: &EventInfo);

    /// Flush anything buffered by the sink
    fn flush(&self);
}

/// A logger that also creates category-scoped loggers and owns the
/// configuration they share
pub trait LoggerProvider: Logger {
    /// Identifies the sink type (e.g. "gtag")
    fn name(&self) -> &str;

    /// Create a new logger for `category`
    fn create_logger(&self, category: &str) -> SharedLogger;

    /// Attach a user identity to every logger from this provider
    fn set_user_properties(&self, user_id: &str, account_id: Option<&str>);

    /// Remove the user identity
    fn clear_user_properties(&self);
}

/// Type alias for an Arc-wrapped logger
pub type SharedLogger = Arc<dyn Logger>;

/// Level shortcuts for any `Logger`
pub trait LoggerExt: Logger {
    fn trace(&self, message: impl Into<LogMessage>) {
        self.log(LogLevel::Trace, message.into(), None);
    }

    fn debug(&self, message: impl Into<LogMessage>) {
        self.log(LogLevel::Debug, message.into(), None);
    }

    fn info(&self, message: impl Into<LogMessage>) {
        self.log(LogLevel::Info, message.into(), None);
    }

    fn warn(&self, message: impl Into<LogMessage>) {
        self.log(LogLevel::Warn, message.into(), None);
    }

    fn error(&self, message: impl Into<LogMessage>) {
        self.log(LogLevel::Error, message.into(), None);
    }

    fn critical(&self, message: impl Into<LogMessage>) {
        self.log(LogLevel::Critical, message.into(), None);
    }

    /// Log an error value at `Error` level
    fn exception(&self, err: &dyn Error) {
        self.log(LogLevel::Error, LogMessage::from_error(err), None);
    }
}

// Implement LoggerExt for all Logger implementations
impl<T: Logger + ?Sized> LoggerExt for T {}
