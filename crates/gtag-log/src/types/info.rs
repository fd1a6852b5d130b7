//! Structured info records attached to log entries, page views and events

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Free-form properties merged into outgoing parameters
pub type Properties = Map<String, Value>;

/// Named numeric measurements merged into outgoing parameters
pub type Measurements = BTreeMap<String, f64>;

/// Extra data attached to a log entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LogInfo {
    pub properties: Option<Properties>,
}

impl LogInfo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a single property
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }
}

/// Page view details for immediate page tracking
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageViewInfo {
    /// Page title
    pub name: Option<String>,
    /// Page location
    pub uri: Option<String>,
    /// Referrer location
    pub ref_uri: Option<String>,
    pub page_type: Option<String>,
    pub is_logged_in: Option<bool>,
    pub properties: Option<Properties>,
    pub measurements: Option<Measurements>,
}

impl PageViewInfo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page title
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the page location
    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    /// Set the referrer location
    pub fn with_ref_uri(mut self, ref_uri: impl Into<String>) -> Self {
        self.ref_uri = Some(ref_uri.into());
        self
    }

    pub fn with_page_type(mut self, page_type: impl Into<String>) -> Self {
        self.page_type = Some(page_type.into());
        self
    }

    pub fn with_logged_in(mut self, is_logged_in: bool) -> Self {
        self.is_logged_in = Some(is_logged_in);
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn with_measurement(mut self, key: impl Into<String>, value: f64) -> Self {
        self.measurements
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value);
        self
    }
}

/// Details supplied when a timed page view stops
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageViewTimingInfo {
    pub uri: Option<String>,
    pub properties: Option<Properties>,
    pub measurements: Option<Measurements>,
}

impl PageViewTimingInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn with_measurement(mut self, key: impl Into<String>, value: f64) -> Self {
        self.measurements
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value);
        self
    }
}

/// A custom event reported immediately
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EventInfo {
    /// Event name, used as the tag target
    pub name: String,
    pub event_category: Option<String>,
    pub event_label: Option<String>,
    pub value: Option<f64>,
    pub properties: Option<Properties>,
    pub measurements: Option<Measurements>,
}

impl EventInfo {
    /// Create an event with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.event_category = Some(category.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.event_label = Some(label.into());
        self
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn with_measurement(mut self, key: impl Into<String>, value: f64) -> Self {
        self.measurements
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value);
        self
    }
}

/// Details supplied when a timed event stops
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EventTimingInfo {
    pub event_category: Option<String>,
    pub event_label: Option<String>,
    pub properties: Option<Properties>,
    pub measurements: Option<Measurements>,
}

impl EventTimingInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.event_category = Some(category.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.event_label = Some(label.into());
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_info_builder() {
        let event = EventInfo::new("signup")
            .with_category("account")
            .with_label("footer")
            .with_value(3.0)
            .with_property("plan", "pro");

        assert_eq!(event.name, "signup");
        assert_eq!(event.event_category.as_deref(), Some("account"));
        assert_eq!(event.event_label.as_deref(), Some("footer"));
        assert_eq!(event.value, Some(3.0));
        assert_eq!(event.properties.unwrap()["plan"], "pro");
    }

    #[test]
    fn test_page_view_info_deserializes_camel_case() {
        let info: PageViewInfo = serde_json::from_str(
            r#"{"name":"Home","uri":"/","refUri":"/login","isLoggedIn":true}"#,
        )
        .unwrap();

        assert_eq!(info.name.as_deref(), Some("Home"));
        assert_eq!(info.ref_uri.as_deref(), Some("/login"));
        assert_eq!(info.is_logged_in, Some(true));
        assert!(info.properties.is_none());
    }

    #[test]
    fn test_log_info_properties() {
        let info = LogInfo::new().with_property("request_id", 42);
        assert_eq!(info.properties.unwrap()["request_id"], 42);
    }
}
