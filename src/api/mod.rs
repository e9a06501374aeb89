//! Backend API: camera records, objects-log CSV, and the log poller

pub mod client;
pub mod error;
pub mod objects_log;
pub mod poller;
pub mod types;

pub use client::MonitorClient;
pub use error::ApiError;
pub use objects_log::LogSeries;
pub use types::{Camera, StreamSource};
