pub(crate) mod assignment_submissions;
pub(crate) mod assignments;
pub(crate) mod courses;
pub(crate) mod enrollments;
pub(crate) mod health;
pub(crate) mod lecture_progress;
pub(crate) mod lectures;
pub(crate) mod quiz_questions;
pub(crate) mod quiz_results;
pub(crate) mod quizzes;
pub(crate) mod users;
pub(crate) mod watch_times;
