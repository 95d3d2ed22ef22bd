//! Data models: the expense record, the scan envelope and configuration.

pub mod config;
pub mod record;
pub mod scan;
