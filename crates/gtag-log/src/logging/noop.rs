//! No-op logger implementation

use super::traits::Logger;
use crate::types::{
    EventInfo, EventTimingInfo, LogInfo, LogLevel, LogMessage, PageViewInfo, PageViewTimingInfo,
};

/// A logger that does nothing
///
/// Useful when a host needs a `Logger` but has no reporting sink.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpLogger;

impl NoOpLogger {
    /// Create a new no-op logger
    pub fn new() -> Self {
        Self
    }
}

impl Logger for NoOpLogger {
    fn log(&self, _level: LogLevel, _message: LogMessage, _info: Option<&LogInfo>) {}
    fn start_track_page(&self, _name: Option<&str>) {}
    fn stop_track_page(&self, _name: Option<&str>, _info: Option<&PageViewTimingInfo>) {}
    fn track_page_view(&self, _info: Option<&PageViewInfo>) {}
    fn start_track_event(&self, _name: &str) {}
    fn stop_track_event(&self, _name: &str, _info: Option<&EventTimingInfo>) {}
    fn track_event(&self, _info: &EventInfo) {}
    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::LoggerExt;

    #[test]
    fn test_noop_logger() {
        let logger = NoOpLogger::new();

        // These should all do nothing without panicking
        logger.info("info message");
        logger.error("error message");
        logger.start_track_page(None);
        logger.stop_track_page(None, None);
        logger.track_page_view(None);
        logger.start_track_event("event");
        logger.stop_track_event("event", None);
        logger.track_event(&EventInfo::new("event"));
        logger.flush();
    }
}
