//! gtag-log
//!
//! Structured logging and page/event tracking reported through a
//! gtag-style tag sender (`gtag(command, target, params)`).
//!
//! A `GTagLoggerProvider` owns the options every logger shares (measurement
//! id, user identity), decides once whether a sink is reachable, and hands
//! out category loggers. Reporting never fails: without a sink or a
//! measurement id, calls are dropped.
//!
//! ```rust
//! use gtag_log::{GTagLoggerProvider, GTagLoggerOptions, PlatformId, RecordingTag};
//! use gtag_log::{EventInfo, LoggerExt, LoggerProvider, Logger};
//!
//! let (recorder, tag) = RecordingTag::shared();
//! let provider = GTagLoggerProvider::new(PlatformId::Browser, None, Some(tag));
//!
//! // Nothing is sent until a measurement id is configured
//! provider.info("booting");
//! assert!(recorder.is_empty());
//!
//! provider.set_measurement_id("G-12345");
//! let checkout = provider.create_logger("checkout");
//! checkout.track_event(&EventInfo::new("purchase").with_value(42.0));
//! assert_eq!(recorder.last().unwrap().target, "purchase");
//! ```
//!
//! Hosts usually seed the provider from the user config file, with
//! `GTAG_MEASUREMENT_ID`, `GTAG_USER_ID` and `GTAG_ACCOUNT_ID` overriding it:
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use gtag_log::{GTagLoggerProvider, PlatformId, SharedTag, TagParams};
//!
//! # fn main() -> gtag_log::ConfigResult<()> {
//! let tag: SharedTag = Arc::new(|command: &str, target: &str, params: &TagParams| {
//!     println!("gtag('{}', '{}', {:?})", command, target, params);
//! });
//! let provider = GTagLoggerProvider::from_user_config(PlatformId::Browser, Some(tag))?;
//! # let _ = provider;
//! # Ok(())
//! # }
//! ```

pub mod types;
pub mod logging;
pub mod config;
pub mod gtag;

// Re-export commonly used types
pub use types::{
    EventInfo, EventTimingInfo, LogInfo, LogLevel, LogMessage, PageViewInfo, PageViewTimingInfo,
};

pub use logging::{Logger, LoggerExt, LoggerProvider, NoOpLogger, SharedLogger};

pub use config::{ConfigError, ConfigResult, GTagLoggerOptions, SharedOptions};

pub use gtag::{
    GTagLogger, GTagLoggerProvider, PlatformId, RecordingTag, SharedTag, TagParams, TagSender,
};
