//! In-memory tag sender for testing
//!
//! Records every call without network dependencies, so hosts can assert
//! on what their loggers report.

use std::sync::Arc;

use parking_lot::Mutex;

use super::tag::{SharedTag, TagParams, TagSender};

/// One recorded `gtag(command, target, params)` call
#[derive(Debug, Clone, PartialEq)]
pub struct TagCall {
    pub command: String,
    pub target: String,
    pub params: TagParams,
}

impl TagCall {
    /// Look up a parameter by key
    pub fn param(&self, key: &str) -> Option<&serde_json::Value> {
        self.params.get(key)
    }
}

/// Tag sender that keeps every call in memory
///
/// # Example
///
/// ```
/// use gtag_log::gtag::{RecordingTag, TagSender, TagParams};
///
/// let tag = RecordingTag::new();
/// tag.send("event", "login", &TagParams::new());
/// assert_eq!(tag.len(), 1);
/// assert_eq!(tag.calls()[0].target, "login");
/// ```
#[derive(Debug, Default)]
pub struct RecordingTag {
    calls: Mutex<Vec<TagCall>>,
}

impl RecordingTag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a recorder together with a sender handle onto it
    pub fn shared() -> (Arc<RecordingTag>, SharedTag) {
        let recorder = Arc::new(Self::new());
        let tag: SharedTag = recorder.clone();
        (recorder, tag)
    }

    /// Snapshot of the calls so far
    pub fn calls(&self) -> Vec<TagCall> {
        self.calls.lock().clone()
    }

    /// Most recent call
    pub fn last(&self) -> Option<TagCall> {
        self.calls.lock().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.calls.lock().clear();
    }
}

impl TagSender for RecordingTag {
    fn send(&self, command: &str, target: &str, params: &TagParams) {
        self.calls.lock().push(TagCall {
            command: command.to_string(),
            target: target.to_string(),
            params: params.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_records_calls_in_order() {
        let (recorder, tag) = RecordingTag::shared();
        assert!(recorder.is_empty());

        let mut params = TagParams::new();
        params.insert("send_to".to_string(), json!("G-1"));
        tag.send("event", "first", &params);
        tag.send("event", "second", &TagParams::new());

        let calls = recorder.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].target, "first");
        assert_eq!(calls[0].param("send_to"), Some(&json!("G-1")));
        assert_eq!(recorder.last().unwrap().target, "second");

        recorder.clear();
        assert!(recorder.is_empty());
    }

    #[test]
    fn test_closure_sender() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let tag: SharedTag = Arc::new(move |command: &str, target: &str, _params: &TagParams| {
            sink.lock().push(format!("{}:{}", command, target));
        });

        tag.send("event", "page_view", &TagParams::new());
        assert_eq!(*seen.lock(), vec!["event:page_view".to_string()]);
    }
}
