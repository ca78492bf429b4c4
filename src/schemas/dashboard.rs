use serde::Serialize;

use crate::services::dashboard::{AdminStats, StudentDashboard, TeacherDashboard};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StudentDashboardResponse {
    pub(crate) message: &'static str,
    pub(crate) student_id: String,
    pub(crate) total_enrolled_courses: i64,
    pub(crate) completed_courses: i64,
    pub(crate) average_quiz_score: Option<i64>,
    pub(crate) pending_assignments: i64,
}

impl StudentDashboardResponse {
    pub(crate) fn new(student_id: String, dashboard: StudentDashboard) -> Self {
        Self {
            message: "Student dashboard retrieved successfully",
            student_id,
            total_enrolled_courses: dashboard.total_enrolled_courses,
            completed_courses: dashboard.completed_courses,
            average_quiz_score: dashboard.average_quiz_score,
            pending_assignments: dashboard.pending_assignments,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TeacherDashboardResponse {
    pub(crate) message: &'static str,
    pub(crate) teacher_id: String,
    pub(crate) total_courses_created: i64,
    pub(crate) total_students_enrolled: i64,
    pub(crate) pending_submissions: i64,
    pub(crate) total_quizzes_created: i64,
}

impl TeacherDashboardResponse {
    pub(crate) fn new(teacher_id: String, dashboard: TeacherDashboard) -> Self {
        Self {
            message: "Teacher dashboard retrieved successfully",
            teacher_id,
            total_courses_created: dashboard.total_courses_created,
            total_students_enrolled: dashboard.total_students_enrolled,
            pending_submissions: dashboard.pending_submissions,
            total_quizzes_created: dashboard.total_quizzes_created,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AdminStatsResponse {
    pub(crate) message: &'static str,
    pub(crate) admin_id: String,
    pub(crate) total_users: i64,
    pub(crate) total_students: i64,
    pub(crate) total_teachers: i64,
    pub(crate) total_courses: i64,
    pub(crate) total_enrollments: i64,
}

impl AdminStatsResponse {
    pub(crate) fn new(admin_id: String, stats: AdminStats) -> Self {
        Self {
            message: "Admin stats retrieved successfully",
            admin_id,
            total_users: stats.total_users,
            total_students: stats.total_students,
            total_teachers: stats.total_teachers,
            total_courses: stats.total_courses,
            total_enrollments: stats.total_enrollments,
        }
    }
}
