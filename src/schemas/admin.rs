use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::time::format_primitive;
use crate::db::models::User;
use crate::db::types::UserRole;
use crate::repositories::courses::{CourseEnrollmentCount, CourseWithTeacher};
use crate::repositories::enrollments::EnrollmentOverviewRow;
use crate::repositories::users::TeacherWithCourseCount;
use crate::schemas::FieldOrder;

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct AdminCreate {
    #[serde(default)]
    #[validate(
        required(message = "Name, email, and password are required"),
        length(min = 1, message = "Name, email, and password are required")
    )]
    pub(crate) name: Option<String>,
    #[serde(default)]
    #[validate(
        required(message = "Name, email, and password are required"),
        length(min = 1, message = "Name, email, and password are required")
    )]
    pub(crate) email: Option<String>,
    #[serde(default)]
    #[validate(
        required(message = "Name, email, and password are required"),
        length(min = 1, message = "Name, email, and password are required")
    )]
    pub(crate) password: Option<String>,
}

impl FieldOrder for AdminCreate {
    const FIELDS: &'static [&'static str] = &["name", "email", "password"];
}

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct RoleUpdate {
    #[serde(default)]
    #[validate(
        required(message = "Role is required"),
        length(min = 1, message = "Role is required")
    )]
    pub(crate) role: Option<String>,
}

impl FieldOrder for RoleUpdate {
    const FIELDS: &'static [&'static str] = &["role"];
}

#[derive(Debug, Serialize)]
pub(crate) struct UserSummary {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) role: UserRole,
}

impl UserSummary {
    pub(crate) fn from_db(user: User) -> Self {
        Self { id: user.id, name: user.name, email: user.email, role: user.role }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct AdminCreatedResponse {
    pub(crate) message: &'static str,
    pub(crate) admin: UserSummary,
}

#[derive(Debug, Serialize)]
pub(crate) struct RoleUpdatedResponse {
    pub(crate) message: &'static str,
    pub(crate) user: UserSummary,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserDeletedResponse {
    pub(crate) message: &'static str,
    pub(crate) deleted_user: UserSummary,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserListEntry {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) role: UserRole,
    pub(crate) created_at: String,
}

impl UserListEntry {
    pub(crate) fn from_db(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            created_at: format_primitive(user.created_at),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct UserListResponse {
    pub(crate) message: &'static str,
    pub(crate) count: usize,
    pub(crate) users: Vec<UserListEntry>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TeacherEntry {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) course_count: i64,
    pub(crate) created_at: String,
}

impl TeacherEntry {
    pub(crate) fn from_row(row: TeacherWithCourseCount) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            course_count: row.course_count,
            created_at: format_primitive(row.created_at),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct TeacherListResponse {
    pub(crate) message: &'static str,
    pub(crate) count: usize,
    pub(crate) teachers: Vec<TeacherEntry>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AdminCourseEntry {
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) description: Option<String>,
    pub(crate) teacher_id: String,
    pub(crate) teacher_name: Option<String>,
    pub(crate) teacher_email: Option<String>,
    pub(crate) created_at: String,
}

impl AdminCourseEntry {
    pub(crate) fn from_row(row: CourseWithTeacher) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            teacher_id: row.teacher_id,
            teacher_name: row.teacher_name,
            teacher_email: row.teacher_email,
            created_at: format_primitive(row.created_at),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct AdminCourseListResponse {
    pub(crate) message: &'static str,
    pub(crate) count: usize,
    pub(crate) courses: Vec<AdminCourseEntry>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StudentEnrollmentEntry {
    pub(crate) id: String,
    pub(crate) student_name: String,
    pub(crate) student_email: String,
    pub(crate) course_name: String,
    pub(crate) course_id: String,
}

impl StudentEnrollmentEntry {
    /// Orphaned references fall back to placeholder labels.
    pub(crate) fn from_row(row: EnrollmentOverviewRow) -> Self {
        Self {
            id: row.id,
            student_name: row.student_name.unwrap_or_else(|| "Unknown Student".to_string()),
            student_email: row.student_email.unwrap_or_else(|| "N/A".to_string()),
            course_name: row.course_title.unwrap_or_else(|| "Unknown Course".to_string()),
            course_id: if row.course_exists { row.course_id } else { "N/A".to_string() },
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CourseEnrollmentEntry {
    pub(crate) course_id: String,
    pub(crate) course_name: String,
    pub(crate) student_count: i64,
}

impl CourseEnrollmentEntry {
    pub(crate) fn from_row(row: CourseEnrollmentCount) -> Self {
        Self {
            course_id: row.course_id,
            course_name: row.course_name,
            student_count: row.student_count,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EnrollmentOverviewResponse {
    pub(crate) message: &'static str,
    pub(crate) total_enrollments: usize,
    pub(crate) enrollments_by_students: Vec<StudentEnrollmentEntry>,
    pub(crate) enrollments_by_course: Vec<CourseEnrollmentEntry>,
}
