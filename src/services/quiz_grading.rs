use std::collections::{HashMap, HashSet};

use crate::db::models::{GradedAnswer, QuizQuestion};

/// Outcome of grading one quiz attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct QuizGrade {
    pub(crate) score: i32,
    pub(crate) correct_answers: usize,
    pub(crate) total_questions: usize,
    pub(crate) answers: Vec<GradedAnswer>,
}

/// One answer as the student sent it.
#[derive(Debug, Clone)]
pub(crate) struct AnswerInput {
    pub(crate) question_id: String,
    pub(crate) selected_answer: Option<String>,
}

/// Grades `submitted` against the quiz's questions. The score divides by the
/// number of questions in the quiz, not by the number of answers sent, and an
/// answer for an unknown question is incorrect. Only the first answer to a
/// question is graded; repeats count as incorrect, so the score stays within
/// 0..=100.
pub(crate) fn grade(questions: &[QuizQuestion], submitted: Vec<AnswerInput>) -> QuizGrade {
    let correct_by_question: HashMap<&str, &str> = questions
        .iter()
        .map(|question| (question.id.as_str(), question.correct_answer.as_str()))
        .collect();
    let mut graded: HashSet<String> = HashSet::new();

    let answers: Vec<GradedAnswer> = submitted
        .into_iter()
        .map(|answer| {
            let first_for_question = graded.insert(answer.question_id.clone());
            let is_correct = match (
                correct_by_question.get(answer.question_id.as_str()),
                answer.selected_answer.as_deref(),
            ) {
                (Some(correct), Some(selected)) => first_for_question && *correct == selected,
                _ => false,
            };

            GradedAnswer {
                question_id: answer.question_id,
                selected_answer: answer.selected_answer.unwrap_or_default(),
                is_correct,
            }
        })
        .collect();

    let correct_answers = answers.iter().filter(|answer| answer.is_correct).count();
    let total_questions = questions.len();

    QuizGrade {
        score: score(correct_answers, total_questions),
        correct_answers,
        total_questions,
        answers,
    }
}

/// `round(correct / total * 100)`; a quiz without questions scores 0.
pub(crate) fn score(correct: usize, total: usize) -> i32 {
    if total == 0 {
        return 0;
    }

    ((correct as f64 / total as f64) * 100.0).round() as i32
}

/// Rounded mean of the scores, `None` when there are no attempts at all.
pub(crate) fn average_score(scores: &[i32]) -> Option<i64> {
    if scores.is_empty() {
        return None;
    }

    let sum: i64 = scores.iter().map(|score| i64::from(*score)).sum();
    Some((sum as f64 / scores.len() as f64).round() as i64)
}

/// `(correct, total)` recomputed from a stored attempt. `total` is the number
/// of answers in that attempt, so it can differ from the quiz's current size.
pub(crate) fn recount(answers: &[GradedAnswer]) -> (usize, usize) {
    (answers.iter().filter(|answer| answer.is_correct).count(), answers.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::time::primitive_now_utc;

    fn question(id: &str, correct: &str) -> QuizQuestion {
        QuizQuestion {
            id: id.to_string(),
            quiz_id: "quiz".to_string(),
            question_text: format!("Question {id}"),
            options: vec!["A".into(), "B".into(), "C".into(), "D".into()],
            correct_answer: correct.to_string(),
            created_at: primitive_now_utc(),
        }
    }

    fn answer(question_id: &str, selected: &str) -> AnswerInput {
        AnswerInput {
            question_id: question_id.to_string(),
            selected_answer: Some(selected.to_string()),
        }
    }

    fn four_questions() -> Vec<QuizQuestion> {
        vec![question("q1", "A"), question("q2", "B"), question("q3", "C"), question("q4", "D")]
    }

    #[test]
    fn all_correct_scores_100() {
        let grade = grade(
            &four_questions(),
            vec![answer("q1", "A"), answer("q2", "B"), answer("q3", "C"), answer("q4", "D")],
        );
        assert_eq!(grade.score, 100);
        assert_eq!(grade.correct_answers, 4);
        assert!(grade.answers.iter().all(|answer| answer.is_correct));
    }

    #[test]
    fn all_wrong_scores_0() {
        let grade = grade(
            &four_questions(),
            vec![answer("q1", "B"), answer("q2", "C"), answer("q3", "D"), answer("q4", "A")],
        );
        assert_eq!(grade.score, 0);
        assert_eq!(grade.correct_answers, 0);
    }

    #[test]
    fn partial_submission_divides_by_quiz_size() {
        let grade = grade(&four_questions(), vec![answer("q1", "A"), answer("q2", "B")]);
        assert_eq!(grade.score, 50);
        assert_eq!(grade.total_questions, 4);
        assert_eq!(grade.answers.len(), 2);
    }

    #[test]
    fn unknown_question_or_missing_selection_is_incorrect() {
        let grade = grade(
            &four_questions(),
            vec![
                answer("missing", "A"),
                AnswerInput { question_id: "q1".to_string(), selected_answer: None },
            ],
        );
        assert_eq!(grade.correct_answers, 0);
        assert_eq!(grade.answers[1].selected_answer, "");
    }

    #[test]
    fn repeated_question_is_graded_once() {
        let grade = grade(
            &[question("q1", "A"), question("q2", "B")],
            vec![answer("q1", "A"), answer("q1", "A"), answer("q1", "A")],
        );
        assert_eq!(grade.correct_answers, 1);
        assert_eq!(grade.score, 50);
        assert_eq!(grade.answers.len(), 3);
        assert!(grade.answers[0].is_correct);
        assert!(!grade.answers[1].is_correct);
        assert!(!grade.answers[2].is_correct);
    }

    #[test]
    fn repeat_after_a_wrong_answer_does_not_count() {
        let grade = grade(&[question("q1", "A")], vec![answer("q1", "B"), answer("q1", "A")]);
        assert_eq!(grade.correct_answers, 0);
        assert_eq!(grade.score, 0);
    }

    #[test]
    fn answers_match_exactly() {
        let grade = grade(&[question("q1", "Paris")], vec![answer("q1", "paris")]);
        assert_eq!(grade.score, 0);
    }

    #[test]
    fn quiz_without_questions_scores_zero() {
        let grade = grade(&[], vec![answer("q1", "A")]);
        assert_eq!(grade.score, 0);
        assert_eq!(grade.total_questions, 0);
    }

    #[test]
    fn score_rounds_thirds() {
        assert_eq!(score(1, 3), 33);
        assert_eq!(score(2, 3), 67);
    }

    #[test]
    fn average_distinguishes_no_attempts_from_zero() {
        assert_eq!(average_score(&[]), None);
        assert_eq!(average_score(&[0, 0]), Some(0));
        assert_eq!(average_score(&[50, 75]), Some(63));
    }

    #[test]
    fn recount_uses_stored_answers() {
        let stored = vec![
            GradedAnswer {
                question_id: "q1".into(),
                selected_answer: "A".into(),
                is_correct: true,
            },
            GradedAnswer {
                question_id: "q2".into(),
                selected_answer: "A".into(),
                is_correct: false,
            },
        ];
        assert_eq!(recount(&stored), (1, 2));
    }
}
