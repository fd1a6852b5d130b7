//! Category logger reporting through a tag sender

use std::collections::HashMap;
use std::time::Instant;

use parking_lot::Mutex;
use serde_json::Value;

use super::tag::{SharedTag, TagParams, EVENT_COMMAND};
use crate::config::SharedOptions;
use crate::logging::Logger;
use crate::types::{
    EventInfo, EventTimingInfo, LogInfo, LogLevel, LogMessage, Measurements, PageViewInfo,
    PageViewTimingInfo, Properties,
};

/// Target for `Error` and `Critical` entries
pub const EXCEPTION_EVENT: &str = "exception";
/// Target for every other log entry
pub const LOG_EVENT: &str = "log";
/// Target for page views, timed or not
pub const PAGE_VIEW_EVENT: &str = "page_view";

/// Timing key used when a page timing call carries no name
const DEFAULT_PAGE_KEY: &str = "";

/// Logger bound to one category, reporting through a gtag-style sender
///
/// The options handle is shared with the provider that created this logger,
/// so measurement id and user identity changes made on the provider apply
/// here immediately. The tag sender is fixed at creation: `None` means no
/// sink was reachable and every call is dropped.
///
/// Nothing is sent while the measurement id is empty.
pub struct GTagLogger {
    category: String,
    options: SharedOptions,
    tag: Option<SharedTag>,
    page_timings: Mutex<HashMap<String, Instant>>,
    event_timings: Mutex<HashMap<String, Instant>>,
}

impl GTagLogger {
    /// Create a logger for `category`; an empty category is the default logger
    pub fn new(
        category: impl Into<String>,
        options: SharedOptions,
        tag: Option<SharedTag>,
    ) -> Self {
        Self {
            category: category.into(),
            options,
            tag,
            page_timings: Mutex::new(HashMap::new()),
            event_timings: Mutex::new(HashMap::new()),
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// Whether a tag sender was captured at creation
    pub fn has_sink(&self) -> bool {
        self.tag.is_some()
    }

    pub fn measurement_id(&self) -> String {
        self.options.read().measurement_id.clone()
    }

    pub fn user_id(&self) -> Option<String> {
        self.options.read().user_id.clone()
    }

    pub fn account_id(&self) -> Option<String> {
        self.options.read().account_id.clone()
    }

    /// The sender and measurement id, if this call may report at all
    fn target(&self) -> Option<(&SharedTag, String)> {
        let tag = self.tag.as_ref()?;
        let options = self.options.read();
        if !options.has_measurement_id() {
            tracing::trace!(category = %self.category, "measurement id not set, dropping");
            return None;
        }
        Some((tag, options.measurement_id.clone()))
    }

    fn send_event(&self, tag: &SharedTag, event: &str, params: TagParams) {
        tracing::trace!(category = %self.category, event, "sending tag event");
        tag.send(EVENT_COMMAND, event, &params);
    }

    /// Base parameters carried by every event
    fn base_params(&self, measurement_id: String) -> TagParams {
        let mut params = TagParams::new();
        params.insert("send_to".to_string(), Value::String(measurement_id));
        params
    }

    fn insert_category(&self, params: &mut TagParams, category: Option<&str>) {
        let own = (!self.category.is_empty()).then_some(self.category.as_str());
        if let Some(category) = category.or(own) {
            params.insert("event_category".to_string(), Value::from(category));
        }
    }

    fn duration_ms(start: Instant) -> u64 {
        u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

/// Merge free-form properties and measurements into `params`
///
/// Fields set by the logger itself win over caller properties with the same
/// key, so this runs before them.
fn merge_extra(
    params: &mut TagParams,
    properties: Option<&Properties>,
    measurements: Option<&Measurements>,
) {
    if let Some(properties) = properties {
        for (key, value) in properties {
            params.insert(key.clone(), value.clone());
        }
    }
    if let Some(measurements) = measurements {
        for (key, value) in measurements {
            params.insert(key.clone(), Value::from(*value));
        }
    }
}

fn insert_opt(params: &mut TagParams, key: &str, value: Option<impl Into<Value>>) {
    if let Some(value) = value {
        params.insert(key.to_string(), value.into());
    }
}

impl Logger for GTagLogger {
    fn log(&self, level: LogLevel, message: LogMessage, info: Option<&LogInfo>) {
        if level == LogLevel::None {
            return;
        }
        let Some((tag, measurement_id)) = self.target() else {
            return;
        };

        let mut params = TagParams::new();
        merge_extra(&mut params, info.and_then(|i| i.properties.as_ref()), None);
        params.extend(self.base_params(measurement_id));
        params.insert("description".to_string(), Value::from(message.text()));
        params.insert("fatal".to_string(), Value::Bool(level == LogLevel::Critical));
        params.insert("level".to_string(), Value::from(level.as_str()));
        self.insert_category(&mut params, None);

        let event = if level.is_exception() {
            EXCEPTION_EVENT
        } else {
            LOG_EVENT
        };
        self.send_event(tag, event, params);
    }

    fn start_track_page(&self, name: Option<&str>) {
        // Only the stop needs a measurement id
        if !self.has_sink() {
            return;
        }
        let key = name.unwrap_or(DEFAULT_PAGE_KEY);
        if self
            .page_timings
            .lock()
            .insert(key.to_string(), Instant::now())
            .is_some()
        {
            tracing::debug!(category = %self.category, page = key, "restarted page timing");
        }
    }

    fn stop_track_page(&self, name: Option<&str>, info: Option<&PageViewTimingInfo>) {
        let Some((tag, measurement_id)) = self.target() else {
            return;
        };
        let key = name.unwrap_or(DEFAULT_PAGE_KEY);
        let Some(start) = self.page_timings.lock().remove(key) else {
            tracing::debug!(category = %self.category, page = key, "stop_track_page without start");
            return;
        };

        let mut params = TagParams::new();
        merge_extra(
            &mut params,
            info.and_then(|i| i.properties.as_ref()),
            info.and_then(|i| i.measurements.as_ref()),
        );
        params.extend(self.base_params(measurement_id));
        insert_opt(&mut params, "page_title", name);
        insert_opt(&mut params, "page_location", info.and_then(|i| i.uri.as_deref()));
        params.insert("duration".to_string(), Value::from(Self::duration_ms(start)));
        self.insert_category(&mut params, None);

        self.send_event(tag, PAGE_VIEW_EVENT, params);
    }

    fn track_page_view(&self, info: Option<&PageViewInfo>) {
        let Some((tag, measurement_id)) = self.target() else {
            return;
        };

        let mut params = TagParams::new();
        merge_extra(
            &mut params,
            info.and_then(|i| i.properties.as_ref()),
            info.and_then(|i| i.measurements.as_ref()),
        );
        params.extend(self.base_params(measurement_id));
        if let Some(info) = info {
            insert_opt(&mut params, "page_title", info.name.as_deref());
            insert_opt(&mut params, "page_location", info.uri.as_deref());
            insert_opt(&mut params, "page_referrer", info.ref_uri.as_deref());
            insert_opt(&mut params, "page_type", info.page_type.as_deref());
            insert_opt(&mut params, "is_logged_in", info.is_logged_in);
        }
        self.insert_category(&mut params, None);

        self.send_event(tag, PAGE_VIEW_EVENT, params);
    }

    fn start_track_event(&self, name: &str) {
        if !self.has_sink() {
            return;
        }
        if self
            .event_timings
            .lock()
            .insert(name.to_string(), Instant::now())
            .is_some()
        {
            tracing::debug!(category = %self.category, event = name, "restarted event timing");
        }
    }

    fn stop_track_event(&self, name: &str, info: Option<&EventTimingInfo>) {
        let Some((tag, measurement_id)) = self.target() else {
            return;
        };
        let Some(start) = self.event_timings.lock().remove(name) else {
            tracing::debug!(category = %self.category, event = name, "stop_track_event without start");
            return;
        };

        let mut params = TagParams::new();
        merge_extra(
            &mut params,
            info.and_then(|i| i.properties.as_ref()),
            info.and_then(|i| i.measurements.as_ref()),
        );
        params.extend(self.base_params(measurement_id));
        insert_opt(&mut params, "event_label", info.and_then(|i| i.event_label.as_deref()));
        params.insert("duration".to_string(), Value::from(Self::duration_ms(start)));
        self.insert_category(&mut params, info.and_then(|i| i.event_category.as_deref()));

        self.send_event(tag, name, params);
    }

    fn track_event(&self, info: &EventInfo) {
        let Some((tag, measurement_id)) = self.target() else {
            return;
        };

        let mut params = TagParams::new();
        merge_extra(&mut params, info.properties.as_ref(), info.measurements.as_ref());
        params.extend(self.base_params(measurement_id));
        insert_opt(&mut params, "event_label", info.event_label.as_deref());
        insert_opt(&mut params, "value", info.value);
        self.insert_category(&mut params, info.event_category.as_deref());

        self.send_event(tag, &info.name, params);
    }

    fn flush(&self) {}
}

impl std::fmt::Debug for GTagLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GTagLogger")
            .field("category", &self.category)
            .field("has_sink", &self.has_sink())
            .finish()
    }
}
