use std::collections::HashMap;

use serde::Serialize;

pub(crate) mod admin;
pub(crate) mod assignment;
pub(crate) mod course;
pub(crate) mod dashboard;
pub(crate) mod lecture;
pub(crate) mod progress;
pub(crate) mod quiz;
pub(crate) mod watch_time;

/// Request bodies list their fields in the order their validation messages
/// should be reported, so the first missing field wins.
pub(crate) trait FieldOrder {
    const FIELDS: &'static [&'static str];
}

#[derive(Debug, Serialize)]
pub(crate) struct HealthResponse {
    pub(crate) service: String,
    pub(crate) status: String,
    pub(crate) components: HashMap<String, String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RootResponse {
    pub(crate) message: String,
    pub(crate) version: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct MessageResponse {
    pub(crate) message: String,
}

impl MessageResponse {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}
