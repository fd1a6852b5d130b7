//! Execution platform probe

use serde::{Deserialize, Serialize};

/// Where the host application is running
///
/// Only a browser context can reach the reporting sink; every other
/// platform disables the tag sender for the provider's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlatformId {
    Browser,
    Server,
    WorkerApp,
    WorkerUi,
}

impl PlatformId {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlatformId::Browser => "browser",
            PlatformId::Server => "server",
            PlatformId::WorkerApp => "worker-app",
            PlatformId::WorkerUi => "worker-ui",
        }
    }

    /// Whether this is an interactive client context
    pub fn is_browser(&self) -> bool {
        matches!(self, PlatformId::Browser)
    }
}

impl std::fmt::Display for PlatformId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
