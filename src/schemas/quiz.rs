use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::time::format_primitive;
use crate::db::models::{GradedAnswer, Quiz, QuizQuestion};
use crate::repositories::quiz_results::QuizResultWithStudent;
use crate::schemas::FieldOrder;
use crate::services::quiz_grading::{self, AnswerInput};

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct QuizCreate {
    #[serde(default)]
    #[validate(
        required(message = "Title is required"),
        length(min = 1, message = "Title is required")
    )]
    pub(crate) title: Option<String>,
    #[serde(default)]
    #[serde(alias = "courseId")]
    #[validate(
        required(message = "Course ID is required"),
        length(min = 1, message = "Course ID is required")
    )]
    pub(crate) course_id: Option<String>,
}

impl FieldOrder for QuizCreate {
    const FIELDS: &'static [&'static str] = &["title", "course_id"];
}

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct QuestionCreate {
    #[serde(default)]
    #[serde(alias = "testId")]
    #[validate(
        required(message = "Test ID is required"),
        length(min = 1, message = "Test ID is required")
    )]
    pub(crate) test_id: Option<String>,
    #[serde(default)]
    #[serde(alias = "questionText")]
    #[validate(
        required(message = "Question text is required"),
        length(min = 1, message = "Question text is required")
    )]
    pub(crate) question_text: Option<String>,
    #[serde(default)]
    #[validate(
        required(message = "Options are required"),
        length(min = 1, message = "Options are required")
    )]
    pub(crate) options: Option<Vec<String>>,
    #[serde(default)]
    #[serde(alias = "correctAnswer")]
    #[validate(
        required(message = "Correct answer is required"),
        length(min = 1, message = "Correct answer is required")
    )]
    pub(crate) correct_answer: Option<String>,
}

impl FieldOrder for QuestionCreate {
    const FIELDS: &'static [&'static str] =
        &["test_id", "question_text", "options", "correct_answer"];
}

impl QuestionCreate {
    /// The correct answer has to be one of the options, compared exactly.
    pub(crate) fn correct_answer_in_options(&self) -> bool {
        match (&self.options, &self.correct_answer) {
            (Some(options), Some(correct)) => options.iter().any(|option| option == correct),
            _ => false,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct AnswerPayload {
    #[serde(default)]
    #[serde(alias = "questionId")]
    pub(crate) question_id: String,
    #[serde(default)]
    #[serde(alias = "selectedAnswer")]
    pub(crate) selected_answer: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct QuizSubmit {
    #[serde(default)]
    #[serde(alias = "testId")]
    #[validate(
        required(message = "Test ID is required"),
        length(min = 1, message = "Test ID is required")
    )]
    pub(crate) test_id: Option<String>,
    #[serde(default)]
    #[validate(
        required(message = "Answers are required"),
        length(min = 1, message = "Answers are required")
    )]
    pub(crate) answers: Option<Vec<AnswerPayload>>,
}

impl FieldOrder for QuizSubmit {
    const FIELDS: &'static [&'static str] = &["test_id", "answers"];
}

impl QuizSubmit {
    pub(crate) fn into_answer_inputs(self) -> Vec<AnswerInput> {
        self.answers
            .unwrap_or_default()
            .into_iter()
            .map(|answer| AnswerInput {
                question_id: answer.question_id,
                selected_answer: answer.selected_answer,
            })
            .collect()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QuizCreatedResponse {
    pub(crate) message: &'static str,
    pub(crate) test_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QuestionCreatedResponse {
    pub(crate) message: &'static str,
    pub(crate) question_id: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct QuizSummary {
    pub(crate) id: String,
    pub(crate) title: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct QuizListResponse {
    pub(crate) tests: Vec<QuizSummary>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QuizInfo {
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) course_id: String,
}

/// A question as shown to someone taking the quiz: no correct answer.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PublicQuestion {
    pub(crate) id: String,
    pub(crate) test_id: String,
    pub(crate) question_text: String,
    pub(crate) options: Vec<String>,
}

impl PublicQuestion {
    pub(crate) fn from_db(question: QuizQuestion) -> Self {
        Self {
            id: question.id,
            test_id: question.quiz_id,
            question_text: question.question_text,
            options: question.options,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QuizDetailResponse {
    pub(crate) test: QuizInfo,
    pub(crate) questions: Vec<PublicQuestion>,
    pub(crate) total_questions: usize,
}

impl QuizDetailResponse {
    pub(crate) fn new(quiz: Quiz, questions: Vec<QuizQuestion>) -> Self {
        let questions: Vec<PublicQuestion> =
            questions.into_iter().map(PublicQuestion::from_db).collect();
        Self {
            test: QuizInfo { id: quiz.id, title: quiz.title, course_id: quiz.course_id },
            total_questions: questions.len(),
            questions,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AttemptSummary {
    pub(crate) id: String,
    pub(crate) score: i32,
    pub(crate) correct_answers: usize,
    pub(crate) total_questions: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QuizSubmittedResponse {
    pub(crate) message: &'static str,
    pub(crate) test_result: AttemptSummary,
    pub(crate) answers: Vec<GradedAnswer>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QuizResultEntry {
    pub(crate) id: String,
    pub(crate) student_name: Option<String>,
    pub(crate) student_email: Option<String>,
    pub(crate) score: i32,
    pub(crate) correct_answers: usize,
    pub(crate) total_questions: usize,
    pub(crate) submitted_at: String,
}

impl QuizResultEntry {
    pub(crate) fn from_row(row: QuizResultWithStudent) -> Self {
        let (correct_answers, total_questions) = quiz_grading::recount(&row.answers.0);
        Self {
            id: row.id,
            student_name: row.student_name,
            student_email: row.student_email,
            score: row.score,
            correct_answers,
            total_questions,
            submitted_at: format_primitive(row.submitted_at),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct QuizResultsResponse {
    pub(crate) message: &'static str,
    pub(crate) results: Vec<QuizResultEntry>,
}
