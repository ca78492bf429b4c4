use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::time::format_primitive;
use crate::db::models::Course;
use crate::repositories::courses::CourseWithTeacher;
use crate::repositories::enrollments::CourseEnrollmentRow;
use crate::schemas::FieldOrder;

const UNKNOWN_TEACHER: &str = "Unknown Teacher";

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct CourseCreate {
    #[serde(default)]
    #[validate(
        required(message = "Please provide a course title"),
        length(min = 1, message = "Please provide a course title")
    )]
    pub(crate) title: Option<String>,
    #[serde(default)]
    pub(crate) description: Option<String>,
}

impl FieldOrder for CourseCreate {
    const FIELDS: &'static [&'static str] = &["title"];
}

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct EnrollRequest {
    #[serde(default)]
    #[serde(alias = "courseId")]
    #[validate(
        required(message = "Please provide a courseId"),
        length(min = 1, message = "Please provide a courseId")
    )]
    pub(crate) course_id: Option<String>,
}

impl FieldOrder for EnrollRequest {
    const FIELDS: &'static [&'static str] = &["course_id"];
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CourseResponse {
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) description: Option<String>,
    pub(crate) teacher_id: String,
    pub(crate) created_at: String,
}

impl CourseResponse {
    pub(crate) fn from_db(course: Course) -> Self {
        Self {
            id: course.id,
            title: course.title,
            description: course.description,
            teacher_id: course.teacher_id,
            created_at: format_primitive(course.created_at),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CatalogCourse {
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) description: Option<String>,
    pub(crate) teacher_id: String,
    pub(crate) teacher_name: String,
    pub(crate) created_at: String,
}

impl CatalogCourse {
    pub(crate) fn from_row(row: CourseWithTeacher) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            teacher_id: row.teacher_id,
            teacher_name: row.teacher_name.unwrap_or_else(|| UNKNOWN_TEACHER.to_string()),
            created_at: format_primitive(row.created_at),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct CourseCreatedResponse {
    pub(crate) message: &'static str,
    pub(crate) course: CourseResponse,
}

#[derive(Debug, Serialize)]
pub(crate) struct CourseListResponse<T> {
    pub(crate) message: &'static str,
    pub(crate) courses: Vec<T>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EnrollmentResponse {
    pub(crate) id: String,
    pub(crate) student_id: String,
    pub(crate) course_id: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct EnrolledResponse {
    pub(crate) message: &'static str,
    pub(crate) enrollment: EnrollmentResponse,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CourseEnrollmentEntry {
    pub(crate) id: String,
    pub(crate) student_id: String,
    pub(crate) student_name: Option<String>,
    pub(crate) student_email: Option<String>,
    pub(crate) enrolled_at: String,
}

impl CourseEnrollmentEntry {
    pub(crate) fn from_row(row: CourseEnrollmentRow) -> Self {
        Self {
            id: row.id,
            student_id: row.student_id,
            student_name: row.student_name,
            student_email: row.student_email,
            enrolled_at: format_primitive(row.created_at),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CourseEnrollmentsResponse {
    pub(crate) message: &'static str,
    pub(crate) course_id: String,
    pub(crate) enrollments: Vec<CourseEnrollmentEntry>,
    pub(crate) count: usize,
}
