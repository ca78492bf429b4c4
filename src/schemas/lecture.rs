use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::db::models::Lecture;
use crate::schemas::FieldOrder;

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct LectureCreate {
    #[serde(default)]
    #[serde(alias = "courseId")]
    #[validate(
        required(message = "Please provide courseId, title, and videoUrl"),
        length(min = 1, message = "Please provide courseId, title, and videoUrl")
    )]
    pub(crate) course_id: Option<String>,
    #[serde(default)]
    #[validate(
        required(message = "Please provide courseId, title, and videoUrl"),
        length(min = 1, message = "Please provide courseId, title, and videoUrl")
    )]
    pub(crate) title: Option<String>,
    #[serde(default)]
    #[serde(alias = "videoUrl")]
    #[validate(
        required(message = "Please provide courseId, title, and videoUrl"),
        length(min = 1, message = "Please provide courseId, title, and videoUrl")
    )]
    pub(crate) video_url: Option<String>,
    #[serde(default)]
    pub(crate) order: Option<i32>,
}

impl FieldOrder for LectureCreate {
    const FIELDS: &'static [&'static str] = &["course_id", "title", "video_url"];
}

impl LectureCreate {
    /// Missing or zero order falls back to 1.
    pub(crate) fn sort_order(&self) -> i32 {
        self.order.filter(|order| *order != 0).unwrap_or(1)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LectureResponse {
    pub(crate) id: String,
    pub(crate) course_id: String,
    pub(crate) title: String,
    pub(crate) video_url: String,
    pub(crate) order: i32,
}

impl LectureResponse {
    pub(crate) fn from_db(lecture: Lecture) -> Self {
        Self {
            id: lecture.id,
            course_id: lecture.course_id,
            title: lecture.title,
            video_url: lecture.video_url,
            order: lecture.sort_order,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct LectureCreatedResponse {
    pub(crate) message: &'static str,
    pub(crate) lecture: LectureResponse,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CourseLecturesResponse {
    pub(crate) message: &'static str,
    pub(crate) course_id: String,
    pub(crate) lecture_count: usize,
    pub(crate) lectures: Vec<LectureResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(order: Option<i32>) -> LectureCreate {
        LectureCreate {
            course_id: Some("c1".to_string()),
            title: Some("Intro".to_string()),
            video_url: Some("https://video.example/1".to_string()),
            order,
        }
    }

    #[test]
    fn order_defaults_to_one() {
        assert_eq!(payload(None).sort_order(), 1);
        assert_eq!(payload(Some(0)).sort_order(), 1);
        assert_eq!(payload(Some(4)).sort_order(), 4);
    }

    #[test]
    fn accepts_camel_case_body() {
        let parsed: LectureCreate = serde_json::from_value(serde_json::json!({
            "courseId": "c1",
            "title": "Intro",
            "videoUrl": "https://video.example/1"
        }))
        .unwrap();
        assert!(parsed.validate().is_ok());
        assert_eq!(parsed.course_id.as_deref(), Some("c1"));
    }

    #[test]
    fn empty_title_fails_validation() {
        let mut lecture = payload(None);
        lecture.title = Some(String::new());
        assert!(lecture.validate().is_err());
    }
}
