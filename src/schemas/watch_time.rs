use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::schemas::FieldOrder;

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct WatchTimeSave {
    #[serde(default)]
    #[serde(alias = "lectureId")]
    #[validate(
        required(message = "Please provide lectureId and currentTime"),
        length(min = 1, message = "Please provide lectureId and currentTime")
    )]
    pub(crate) lecture_id: Option<String>,
    #[serde(default)]
    #[serde(alias = "currentTime")]
    #[validate(
        required(message = "Please provide lectureId and currentTime"),
        range(min = 0.0, message = "currentTime must be a non-negative number")
    )]
    pub(crate) current_time: Option<f64>,
}

impl FieldOrder for WatchTimeSave {
    const FIELDS: &'static [&'static str] = &["lecture_id", "current_time"];
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WatchTimeRecord {
    pub(crate) student_id: String,
    pub(crate) lecture_id: String,
    pub(crate) current_time: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WatchTimeSavedResponse {
    pub(crate) message: &'static str,
    pub(crate) watch_time: WatchTimeRecord,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WatchTimeResponse {
    pub(crate) message: &'static str,
    pub(crate) lecture_id: String,
    pub(crate) current_time: f64,
}
