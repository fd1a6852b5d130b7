//! Logger options and where they come from
//!
//! - `GTagLoggerOptions`: the record seeding a provider's shared configuration
//! - YAML/JSON loading with `GTAG_*` environment overrides

mod error;
mod options;

pub use error::{ConfigError, ConfigResult};
pub use options::{
    user_config_path, GTagLoggerOptions, SharedOptions, ENV_ACCOUNT_ID, ENV_MEASUREMENT_ID,
    ENV_USER_ID,
};
