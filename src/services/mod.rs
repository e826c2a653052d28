//! Core services: sanitization, classification, statistics, listing and reporting

pub mod classify;
pub mod format;
pub mod listing;
pub mod relative;
pub mod report;
pub mod request;
pub mod sanitize;
pub mod size;
pub mod stats;
