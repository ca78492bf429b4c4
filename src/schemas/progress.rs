use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::schemas::FieldOrder;
use crate::services::progress_summary::ProgressSummary;

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct MarkComplete {
    #[serde(default)]
    #[serde(alias = "courseId")]
    #[validate(
        required(message = "Please provide courseId and lectureId"),
        length(min = 1, message = "Please provide courseId and lectureId")
    )]
    pub(crate) course_id: Option<String>,
    #[serde(default)]
    #[serde(alias = "lectureId")]
    #[validate(
        required(message = "Please provide courseId and lectureId"),
        length(min = 1, message = "Please provide courseId and lectureId")
    )]
    pub(crate) lecture_id: Option<String>,
}

impl FieldOrder for MarkComplete {
    const FIELDS: &'static [&'static str] = &["course_id", "lecture_id"];
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProgressRecord {
    pub(crate) student_id: String,
    pub(crate) course_id: String,
    pub(crate) lecture_id: String,
    pub(crate) completed: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct MarkCompleteResponse {
    pub(crate) message: &'static str,
    pub(crate) progress: ProgressRecord,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CourseProgressResponse {
    pub(crate) message: &'static str,
    pub(crate) course_id: String,
    pub(crate) student_id: String,
    pub(crate) total_lectures: i64,
    pub(crate) completed_lectures: i64,
    pub(crate) progress_percentage: i64,
}

#[derive(Debug, Serialize)]
pub(crate) struct LectureCounts {
    pub(crate) total: i64,
    pub(crate) watched: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QuizCounts {
    pub(crate) average_score: Option<i64>,
    pub(crate) attempted: usize,
}

#[derive(Debug, Serialize)]
pub(crate) struct AssignmentCounts {
    pub(crate) submitted: i64,
    pub(crate) graded: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProgressSummaryResponse {
    pub(crate) course_id: String,
    pub(crate) student_id: String,
    pub(crate) lectures: LectureCounts,
    pub(crate) quizzes: QuizCounts,
    pub(crate) assignments: AssignmentCounts,
    pub(crate) completion_percent: i64,
}

impl ProgressSummaryResponse {
    pub(crate) fn new(course_id: String, student_id: String, summary: ProgressSummary) -> Self {
        Self {
            course_id,
            student_id,
            completion_percent: summary.completion_percent(),
            lectures: LectureCounts {
                total: summary.lectures.total,
                watched: summary.lectures.watched,
            },
            quizzes: QuizCounts {
                average_score: summary.quiz_average_score,
                attempted: summary.quizzes_attempted,
            },
            assignments: AssignmentCounts {
                submitted: summary.assignments_submitted,
                graded: summary.assignments_graded,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::completion::LectureCompletion;

    #[test]
    fn summary_serializes_null_average() {
        let summary = ProgressSummary::assemble(LectureCompletion::new(2, 1), &[], 1, 0);
        let body = serde_json::to_value(ProgressSummaryResponse::new(
            "c1".to_string(),
            "s1".to_string(),
            summary,
        ))
        .unwrap();

        assert_eq!(body["lectures"], serde_json::json!({"total": 2, "watched": 1}));
        assert!(body["quizzes"]["averageScore"].is_null());
        assert_eq!(body["quizzes"]["attempted"], 0);
        assert_eq!(body["assignments"], serde_json::json!({"submitted": 1, "graded": 0}));
        assert_eq!(body["completionPercent"], 50);
    }
}
