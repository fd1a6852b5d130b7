//! The tag-sending seam

use std::sync::Arc;

use serde_json::{Map, Value};

/// Parameter record passed to the tag sender
pub type TagParams = Map<String, Value>;

/// Command keyword for every call the loggers make
pub const EVENT_COMMAND: &str = "event";

/// A gtag-style reporting function: `gtag(command, target, params)`
///
/// Calls are fire-and-forget; a sender has no way to report failure back to
/// the logger.
///
/// Any `Fn(&str, &str, &TagParams)` closure is a sender:
///
/// ```
/// use gtag_log::gtag::{SharedTag, TagParams};
/// use std::sync::Arc;
///
/// let tag: SharedTag = Arc::new(|command: &str, target: &str, params: &TagParams| {
///     println!("gtag('{}', '{}', {:?})", command, target, params);
/// });
/// ```
pub trait TagSender: Send + Sync {
    fn send(&self, command: &str, target: &str, params: &TagParams);
}

impl<F> TagSender for F
where
    F: Fn(&str, &str, &TagParams) + Send + Sync,
{
    fn send(&self, command: &str, target: &str, params: &TagParams) {
        self(command, target, params)
    }
}

/// Type alias for an Arc-wrapped tag sender
pub type SharedTag = Arc<dyn TagSender>;
