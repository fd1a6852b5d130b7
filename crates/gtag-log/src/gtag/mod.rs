//! gtag-backed logging
//!
//! - `GTagLoggerProvider`: owns shared options, detects the sink once and
//!   hands out `GTagLogger`s
//! - `GTagLogger`: category logger mapping log entries, page views and
//!   events onto `gtag('event', ...)` calls
//! - `TagSender`: the reporting function seam, injected by the host
//! - `RecordingTag`: in-memory sender for tests

mod tag;
mod platform;
mod logger;
mod provider;
mod recording;

pub use tag::{SharedTag, TagParams, TagSender, EVENT_COMMAND};
pub use platform::PlatformId;
pub use logger::{GTagLogger, EXCEPTION_EVENT, LOG_EVENT, PAGE_VIEW_EVENT};
pub use provider::{GTagLoggerProvider, PROVIDER_NAME};
pub use recording::{RecordingTag, TagCall};
