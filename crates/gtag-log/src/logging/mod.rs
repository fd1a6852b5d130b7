//! Logging abstractions shared by every sink
//!
//! - `Logger`: the structured logging and tracking contract
//! - `LoggerProvider`: a `Logger` that also produces category loggers
//! - `NoOpLogger`: ignores everything

mod traits;
mod noop;

pub use traits::{Logger, LoggerExt, LoggerProvider, SharedLogger};
pub use noop::NoOpLogger;
