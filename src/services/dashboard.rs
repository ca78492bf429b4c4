use sqlx::PgPool;

use crate::db::types::UserRole;
use crate::repositories;
use crate::services::quiz_grading;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StudentDashboard {
    pub(crate) total_enrolled_courses: i64,
    /// Always 0: per-course completion is not rolled up into the dashboard.
    pub(crate) completed_courses: i64,
    pub(crate) average_quiz_score: Option<i64>,
    pub(crate) pending_assignments: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TeacherDashboard {
    pub(crate) total_courses_created: i64,
    pub(crate) total_students_enrolled: i64,
    pub(crate) pending_submissions: i64,
    pub(crate) total_quizzes_created: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AdminStats {
    pub(crate) total_users: i64,
    pub(crate) total_students: i64,
    pub(crate) total_teachers: i64,
    pub(crate) total_courses: i64,
    pub(crate) total_enrollments: i64,
}

/// The quiz average spans every attempt of the student, in any course.
pub(crate) async fn student(
    pool: &PgPool,
    student_id: &str,
) -> Result<StudentDashboard, sqlx::Error> {
    let total_enrolled_courses =
        repositories::enrollments::count_for_student(pool, student_id).await?;
    let scores = repositories::quiz_results::scores_for_student(pool, student_id).await?;
    let pending_assignments =
        repositories::assignment_submissions::count_pending_for_student(pool, student_id).await?;

    Ok(StudentDashboard {
        total_enrolled_courses,
        completed_courses: 0,
        average_quiz_score: quiz_grading::average_score(&scores),
        pending_assignments,
    })
}

pub(crate) async fn teacher(
    pool: &PgPool,
    teacher_id: &str,
) -> Result<TeacherDashboard, sqlx::Error> {
    let total_courses_created = repositories::courses::count_by_teacher(pool, teacher_id).await?;
    let total_students_enrolled =
        repositories::enrollments::count_distinct_students_for_teacher(pool, teacher_id).await?;
    let pending_submissions =
        repositories::assignment_submissions::count_pending_for_teacher(pool, teacher_id).await?;
    let total_quizzes_created = repositories::quizzes::count_created_by(pool, teacher_id).await?;

    Ok(TeacherDashboard {
        total_courses_created,
        total_students_enrolled,
        pending_submissions,
        total_quizzes_created,
    })
}

pub(crate) async fn admin(pool: &PgPool) -> Result<AdminStats, sqlx::Error> {
    Ok(AdminStats {
        total_users: repositories::users::count_all(pool).await?,
        total_students: repositories::users::count_by_role(pool, UserRole::Student).await?,
        total_teachers: repositories::users::count_by_role(pool, UserRole::Teacher).await?,
        total_courses: repositories::courses::count_all(pool).await?,
        total_enrollments: repositories::enrollments::count_all(pool).await?,
    })
}
