use sqlx::PgPool;

use crate::repositories;

/// Lecture-watch completion for one student in one course.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LectureCompletion {
    pub(crate) total: i64,
    pub(crate) watched: i64,
    pub(crate) percent: i64,
}

impl LectureCompletion {
    pub(crate) fn new(total: i64, watched: i64) -> Self {
        Self { total, watched, percent: completion_percent(total, watched) }
    }

    pub(crate) fn is_complete(&self) -> bool {
        self.percent == 100
    }
}

/// `round(watched / total * 100)`, or 0 for a course without lectures.
pub(crate) fn completion_percent(total: i64, watched: i64) -> i64 {
    if total <= 0 {
        return 0;
    }

    ((watched as f64 / total as f64) * 100.0).round() as i64
}

/// A lecture counts as watched as soon as any watch-time row exists for it,
/// even one saved at position 0.
pub(crate) async fn lecture_completion(
    pool: &PgPool,
    student_id: &str,
    course_id: &str,
) -> Result<LectureCompletion, sqlx::Error> {
    let total = repositories::lectures::count_for_course(pool, course_id).await?;
    let watched =
        repositories::watch_times::count_watched_in_course(pool, student_id, course_id).await?;

    Ok(LectureCompletion::new(total, watched))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_course_is_zero_percent() {
        assert_eq!(completion_percent(0, 0), 0);
        assert!(!LectureCompletion::new(0, 0).is_complete());
    }

    #[test]
    fn percent_is_rounded_and_monotonic() {
        let percents: Vec<i64> = (0..=3).map(|watched| completion_percent(3, watched)).collect();
        assert_eq!(percents, vec![0, 33, 67, 100]);
        assert!(percents.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn half_rounds_up() {
        assert_eq!(completion_percent(8, 1), 13);
        assert_eq!(completion_percent(200, 1), 1);
    }

    #[test]
    fn four_of_five_is_eighty() {
        let completion = LectureCompletion::new(5, 4);
        assert_eq!(completion.percent, 80);
        assert!(!completion.is_complete());
        assert!(LectureCompletion::new(5, 5).is_complete());
    }
}
