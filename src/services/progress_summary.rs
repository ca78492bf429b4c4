use sqlx::PgPool;

use crate::repositories;
use crate::services::completion::{self, LectureCompletion};
use crate::services::quiz_grading;

/// Per-course progress of one student. The three parts come from independent
/// sources; only the lecture part drives `completion_percent`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ProgressSummary {
    pub(crate) lectures: LectureCompletion,
    pub(crate) quiz_average_score: Option<i64>,
    pub(crate) quizzes_attempted: usize,
    pub(crate) assignments_submitted: i64,
    pub(crate) assignments_graded: i64,
}

impl ProgressSummary {
    pub(crate) fn assemble(
        lectures: LectureCompletion,
        quiz_scores: &[i32],
        assignments_submitted: i64,
        assignments_graded: i64,
    ) -> Self {
        Self {
            lectures,
            quiz_average_score: quiz_grading::average_score(quiz_scores),
            quizzes_attempted: quiz_scores.len(),
            assignments_submitted,
            assignments_graded,
        }
    }

    pub(crate) fn completion_percent(&self) -> i64 {
        self.lectures.percent
    }
}

pub(crate) async fn load(
    pool: &PgPool,
    student_id: &str,
    course_id: &str,
) -> Result<ProgressSummary, sqlx::Error> {
    let lectures = completion::lecture_completion(pool, student_id, course_id).await?;
    let quiz_scores =
        repositories::quiz_results::scores_for_student_in_course(pool, student_id, course_id)
            .await?;
    let submissions = repositories::assignment_submissions::counts_for_student_in_course(
        pool, student_id, course_id,
    )
    .await?;

    Ok(ProgressSummary::assemble(
        lectures,
        &quiz_scores,
        submissions.submitted,
        submissions.graded,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_quiz_attempts_yields_null_average() {
        let summary = ProgressSummary::assemble(LectureCompletion::new(4, 2), &[], 0, 0);
        assert_eq!(summary.quiz_average_score, None);
        assert_eq!(summary.quizzes_attempted, 0);
        assert_eq!(summary.completion_percent(), 50);
    }

    #[test]
    fn quiz_and_assignment_activity_do_not_affect_completion() {
        let summary = ProgressSummary::assemble(LectureCompletion::new(3, 0), &[100, 100], 2, 2);
        assert_eq!(summary.completion_percent(), 0);
        assert_eq!(summary.quiz_average_score, Some(100));
        assert_eq!(summary.quizzes_attempted, 2);
    }

    #[test]
    fn zero_scores_average_to_zero_not_null() {
        let summary = ProgressSummary::assemble(LectureCompletion::new(0, 0), &[0], 1, 0);
        assert_eq!(summary.quiz_average_score, Some(0));
        assert_eq!(summary.assignments_submitted, 1);
        assert_eq!(summary.assignments_graded, 0);
    }
}
