//! Core types shared by loggers and providers
//!
//! This module contains the level, message and tracking-info records
//! passed through the `Logger` contract.

mod level;
mod message;
mod info;

pub use level::LogLevel;
pub use message::LogMessage;
pub use info::{
    EventInfo, EventTimingInfo, LogInfo, Measurements, PageViewInfo, PageViewTimingInfo,
    Properties,
};
