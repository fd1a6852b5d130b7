//! Provider owning the shared options and the default gtag logger

use std::path::Path;
use std::sync::Arc;

use once_cell::sync::OnceCell;

use super::logger::GTagLogger;
use super::platform::PlatformId;
use super::tag::SharedTag;
use crate::config::{ConfigResult, GTagLoggerOptions, SharedOptions};
use crate::logging::{Logger, LoggerProvider, SharedLogger};
use crate::types::{
    EventInfo, EventTimingInfo, LogInfo, LogLevel, LogMessage, PageViewInfo, PageViewTimingInfo,
};

/// Name reported by `LoggerProvider::name`
pub const PROVIDER_NAME: &str = "gtag";

/// Logger provider for `GTagLogger`
///
/// Sink availability is decided once, at construction: the platform must be a
/// browser and a tag sender must be supplied. Every logger this provider hands
/// out shares its options, so `set_measurement_id` and the user property calls
/// reach loggers that already exist.
///
/// Used as a `Logger` itself, the provider forwards every call to its default
/// (empty category) logger, which is created on first use and kept for the
/// provider's lifetime.
///
/// # Example
///
/// ```
/// use gtag_log::config::GTagLoggerOptions;
/// use gtag_log::gtag::{GTagLoggerProvider, PlatformId, RecordingTag};
/// use gtag_log::logging::{LoggerExt, LoggerProvider};
///
/// let (recorder, tag) = RecordingTag::shared();
/// let provider = GTagLoggerProvider::new(
///     PlatformId::Browser,
///     Some(GTagLoggerOptions::new().with_measurement_id("G-12345")),
///     Some(tag),
/// );
///
/// provider.info("started");
/// provider.create_logger("checkout").warn("slow");
/// assert_eq!(recorder.len(), 2);
/// ```
pub struct GTagLoggerProvider {
    options: SharedOptions,
    sink_available: bool,
    tag: Option<SharedTag>,
    current_logger: OnceCell<Arc<GTagLogger>>,
}

impl GTagLoggerProvider {
    /// Create a provider; absent options mean an empty measurement id
    pub fn new(
        platform: PlatformId,
        options: Option<GTagLoggerOptions>,
        tag: Option<SharedTag>,
    ) -> Self {
        let sink_available = platform.is_browser() && tag.is_some();
        if !sink_available {
            tracing::debug!(
                %platform,
                has_tag = tag.is_some(),
                "gtag sink unavailable, loggers will be silent"
            );
        }

        Self {
            options: options.unwrap_or_default().into_shared(),
            sink_available,
            tag: if sink_available { tag } else { None },
            current_logger: OnceCell::new(),
        }
    }

    /// Create a provider from an options file, with `GTAG_*` environment
    /// overrides applied on top
    ///
    /// A missing file yields the defaults; a malformed one is an error.
    pub fn from_config_file(
        platform: PlatformId,
        path: impl AsRef<Path>,
        tag: Option<SharedTag>,
    ) -> ConfigResult<Self> {
        let options = GTagLoggerOptions::load(path)?.with_env_overrides();
        Ok(Self::new(platform, Some(options), tag))
    }

    /// Create a provider from the user config file (see `user_config_path`)
    pub fn from_user_config(platform: PlatformId, tag: Option<SharedTag>) -> ConfigResult<Self> {
        let options = GTagLoggerOptions::load_user()?.with_env_overrides();
        Ok(Self::new(platform, Some(options), tag))
    }

    /// Whether a reporting sink was detected at construction
    pub fn sink_available(&self) -> bool {
        self.sink_available
    }

    /// The default logger, created on first access
    pub fn current_logger(&self) -> Arc<GTagLogger> {
        Arc::clone(self.current_logger.get_or_init(|| {
            Arc::new(GTagLogger::new(
                "",
                Arc::clone(&self.options),
                self.tag.clone(),
            ))
        }))
    }

    /// Change the measurement id for every logger from this provider
    pub fn set_measurement_id(&self, value: impl Into<String>) {
        self.options.write().measurement_id = value.into();
    }

    /// A new logger for `category`, never cached
    pub fn create_gtag_logger(&self, category: &str) -> Arc<GTagLogger> {
        Arc::new(GTagLogger::new(
            category,
            Arc::clone(&self.options),
            self.tag.clone(),
        ))
    }

    /// Snapshot of the shared options
    pub fn options(&self) -> GTagLoggerOptions {
        self.options.read().clone()
    }
}

impl LoggerProvider for GTagLoggerProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn create_logger(&self, category: &str) -> SharedLogger {
        self.create_gtag_logger(category)
    }

    fn set_user_properties(&self, user_id: &str, account_id: Option<&str>) {
        let mut options = self.options.write();
        options.user_id = Some(user_id.to_string());
        options.account_id = account_id.map(|s| s.to_string());
        // TODO: forward the user id with a `config` command once the sink
        // should attribute events to users.
    }

    fn clear_user_properties(&self) {
        let mut options = self.options.write();
        options.user_id = None;
        options.account_id = None;
    }
}

impl Logger for GTagLoggerProvider {
    fn log(&self, level: LogLevel, message: LogMessage, info: Option<&LogInfo>) {
        self.current_logger().log(level, message, info);
    }

    fn start_track_page(&self, name: Option<&str>) {
        self.current_logger().start_track_page(name);
    }

    fn stop_track_page(&self, name: Option<&str>, info: Option<&PageViewTimingInfo>) {
        self.current_logger().stop_track_page(name, info);
    }

    fn track_page_view(&self, info: Option<&PageViewInfo>) {
        self.current_logger().track_page_view(info);
    }

    fn start_track_event(&self, name: &str) {
        self.current_logger().start_track_event(name);
    }

    fn stop_track_event(&self, name: &str, info: Option<&EventTimingInfo>) {
        self.current_logger().stop_track_event(name, info);
    }

    fn track_event(&self, info: &EventInfo) {
        self.current_logger().track_event(info);
    }

    fn flush(&self) {
        self.current_logger().flush();
    }
}

impl std::fmt::Debug for GTagLoggerProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GTagLoggerProvider")
            .field("options", &*self.options.read())
            .field("sink_available", &self.sink_available)
            .field("current_logger", &self.current_logger.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gtag::RecordingTag;
    use crate::logging::LoggerExt;
    use serde_json::json;

    fn browser_provider(
        measurement_id: Option<&str>,
    ) -> (GTagLoggerProvider, Arc<RecordingTag>) {
        let (recorder, tag) = RecordingTag::shared();
        let options = measurement_id.map(|id| GTagLoggerOptions::new().with_measurement_id(id));
        let provider = GTagLoggerProvider::new(PlatformId::Browser, options, Some(tag));
        (provider, recorder)
    }

    fn exercise(logger: &dyn Logger) {
        logger.info("hello");
        logger.exception(&std::io::Error::new(std::io::ErrorKind::Other, "boom"));
        logger.start_track_page(Some("home"));
        logger.stop_track_page(Some("home"), None);
        logger.track_page_view(Some(&PageViewInfo::new().with_name("home")));
        logger.start_track_event("upload");
        logger.stop_track_event("upload", None);
        logger.track_event(&EventInfo::new("click"));
        logger.flush();
    }

    #[test]
    fn test_from_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gtag.yaml");
        std::fs::write(&path, "measurementId: G-FILE\nuserId: u1\n").unwrap();

        let (recorder, tag) = RecordingTag::shared();
        let provider =
            GTagLoggerProvider::from_config_file(PlatformId::Browser, &path, Some(tag)).unwrap();

        let options = provider.options();
        assert!(options.has_measurement_id());
        assert_eq!(options.user_id.as_deref(), Some("u1"));

        provider.info("loaded");
        assert_eq!(recorder.len(), 1);
    }

    #[test]
    fn test_from_config_file_rejects_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gtag.json");
        std::fs::write(&path, "{broken").unwrap();

        let result = GTagLoggerProvider::from_config_file(PlatformId::Browser, &path, None);
        assert!(matches!(result, Err(crate::config::ConfigError::Json(_))));
    }

    #[test]
    fn test_provider_name() {
        let (provider, _recorder) = browser_provider(None);
        assert_eq!(provider.name(), "gtag");
    }

    #[test]
    fn test_absent_options_yield_defaults() {
        let (provider, _recorder) = browser_provider(None);
        assert_eq!(provider.options(), GTagLoggerOptions::default());
        assert!(provider.sink_available());
    }

    #[test]
    fn test_server_platform_never_reports() {
        let (recorder, tag) = RecordingTag::shared();
        let provider = GTagLoggerProvider::new(
            PlatformId::Server,
            Some(GTagLoggerOptions::new().with_measurement_id("G-TEST")),
            Some(tag),
        );

        assert!(!provider.sink_available());
        exercise(&provider);
        exercise(provider.create_logger("named").as_ref());
        assert!(recorder.is_empty());
    }

    #[test]
    fn test_missing_tag_never_reports() {
        let provider = GTagLoggerProvider::new(
            PlatformId::Browser,
            Some(GTagLoggerOptions::new().with_measurement_id("G-TEST")),
            None,
        );

        assert!(!provider.sink_available());
        assert!(!provider.current_logger().has_sink());
        exercise(&provider);
    }

    #[test]
    fn test_current_logger_is_memoized() {
        let (provider, _recorder) = browser_provider(None);

        let first = provider.current_logger();
        provider.set_measurement_id("G-TEST");
        let second = provider.current_logger();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.category(), "");
        assert_eq!(first.measurement_id(), "G-TEST");
    }

    #[test]
    fn test_current_logger_single_construction_across_threads() {
        let (provider, _recorder) = browser_provider(Some("G-TEST"));
        let provider = Arc::new(provider);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let provider = Arc::clone(&provider);
                std::thread::spawn(move || provider.current_logger())
            })
            .collect();
        let loggers: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        for logger in &loggers {
            assert!(Arc::ptr_eq(logger, &loggers[0]));
        }
    }

    #[test]
    fn test_create_logger_is_never_cached() {
        let (provider, _recorder) = browser_provider(None);

        let first = provider.create_gtag_logger("x");
        let second = provider.create_gtag_logger("x");
        assert!(!Arc::ptr_eq(&first, &second));

        provider.set_user_properties("u1", Some("a1"));
        for logger in [&first, &second] {
            assert_eq!(logger.category(), "x");
            assert_eq!(logger.user_id().as_deref(), Some("u1"));
            assert_eq!(logger.account_id().as_deref(), Some("a1"));
        }
    }

    #[test]
    fn test_clear_user_properties_keeps_measurement_id() {
        let (provider, _recorder) = browser_provider(None);
        let logger = provider.current_logger();

        provider.set_measurement_id("G-TEST");
        provider.set_user_properties("u1", Some("a1"));
        provider.clear_user_properties();

        let options = provider.options();
        assert_eq!(options.measurement_id, "G-TEST");
        assert!(options.user_id.is_none());
        assert!(options.account_id.is_none());
        assert!(logger.user_id().is_none());
    }

    #[test]
    fn test_set_user_properties_sends_nothing() {
        let (provider, recorder) = browser_provider(Some("G-TEST"));

        provider.set_user_properties("u1", None);
        assert!(recorder.is_empty());
        assert!(provider.options().account_id.is_none());
    }

    #[test]
    fn test_measurement_id_set_after_first_log() {
        let (provider, recorder) = browser_provider(None);
        let named = provider.create_logger("named");

        provider.info("hello");
        named.info("hello");
        assert!(recorder.is_empty());

        provider.set_measurement_id("G-TEST");
        provider.info("hello");
        assert_eq!(recorder.len(), 1);

        named.info("hello");
        assert_eq!(recorder.len(), 2);
        assert_eq!(recorder.last().unwrap().param("send_to"), Some(&json!("G-TEST")));
    }

    #[test]
    fn test_timing_started_before_measurement_id() {
        let (provider, recorder) = browser_provider(None);

        provider.start_track_page(Some("home"));
        provider.start_track_event("upload");
        provider.set_measurement_id("G-TEST");
        provider.stop_track_page(Some("home"), None);
        provider.stop_track_event("upload", None);

        let calls = recorder.calls();
        assert_eq!(calls.len(), 2);
        assert!(calls.iter().all(|c| c.param("duration").is_some()));
    }

    #[test]
    fn test_provider_forwards_to_default_logger() {
        let (provider, recorder) = browser_provider(Some("G-TEST"));

        provider.start_track_page(Some("home"));
        // The pair lives on the default logger, not on a named one
        provider.create_logger("other").stop_track_page(Some("home"), None);
        assert!(recorder.is_empty());

        provider.current_logger().stop_track_page(Some("home"), None);
        assert_eq!(recorder.len(), 1);
        assert!(recorder.last().unwrap().param("duration").is_some());

        provider.stop_track_page(Some("home"), None);
        assert_eq!(recorder.len(), 1);
    }

    #[test]
    fn test_exercise_reports_every_call() {
        let (provider, recorder) = browser_provider(Some("G-TEST"));

        exercise(&provider);
        let targets: Vec<_> = recorder.calls().into_iter().map(|c| c.target).collect();
        assert_eq!(
            targets,
            vec!["log", "exception", "page_view", "page_view", "upload", "click"]
        );
    }

    #[test]
    fn test_shared_logger_trait_object() {
        let (provider, recorder) = browser_provider(Some("G-TEST"));
        let provider: Arc<dyn LoggerProvider> = Arc::new(provider);

        let logger = provider.create_logger("api");
        logger.track_event(&EventInfo::new("request"));
        assert_eq!(
            recorder.last().unwrap().param("event_category"),
            Some(&json!("api"))
        );
    }
}
