//! Per-subject breakdown of a graded exam form.
//!
//! The scoring reducer treats a section as one flat sequence; this module
//! re-buckets a graded form by the category each question was drawn from,
//! so the report can show where marks were won and lost.

use serde::{Deserialize, Serialize};

use crate::model::{ExamForm, MarkingScheme};
use crate::scoring::AnswerSheet;

/// Statistics for one subject bucket of an assembled form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryStats {
    /// Category id (e.g. "physics").
    pub category_id: String,
    /// Questions from this category on the form.
    pub total: u32,
    /// Answered questions.
    pub attempted: u32,
    /// Correctly answered questions.
    pub correct: u32,
    /// Wrong attempts.
    pub wrong: u32,
    /// Questions left unanswered.
    pub skipped: u32,
    /// Net marks from this category.
    pub score: f64,
}

impl CategoryStats {
    fn new(category_id: &str) -> Self {
        Self {
            category_id: category_id.to_owned(),
            total: 0,
            attempted: 0,
            correct: 0,
            wrong: 0,
            skipped: 0,
            score: 0.0,
        }
    }

    /// Correct answers as a fraction of attempts, or 0 with no attempts.
    pub fn accuracy(&self) -> f64 {
        if self.attempted == 0 {
            0.0
        } else {
            f64::from(self.correct) / f64::from(self.attempted)
        }
    }

    /// Attempts as a fraction of the category's questions.
    pub fn attempt_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            f64::from(self.attempted) / f64::from(self.total)
        }
    }
}

/// Break a graded form down per category.
///
/// Categories appear in first-seen form order, so the report table follows
/// the paper's authored subject order.
pub fn compute_category_stats(
    form: &ExamForm,
    answers: &AnswerSheet,
    scheme: MarkingScheme,
) -> Vec<CategoryStats> {
    let mut stats: Vec<CategoryStats> = Vec::new();

    for (position, fq) in form.questions.iter().enumerate() {
        let idx = match stats.iter().position(|s| s.category_id == fq.category_id) {
            Some(idx) => idx,
            None => {
                stats.push(CategoryStats::new(&fq.category_id));
                stats.len() - 1
            }
        };
        let entry = &mut stats[idx];
        entry.total += 1;

        match answers.selected(position) {
            None => entry.skipped += 1,
            Some(selected) => {
                entry.attempted += 1;
                if selected == fq.question.answer {
                    entry.correct += 1;
                    entry.score += scheme.correct_marks;
                } else {
                    entry.wrong += 1;
                    entry.score += scheme.wrong_marks;
                }
            }
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FormQuestion, Question};

    fn form_question(category: &str, answer: usize) -> FormQuestion {
        FormQuestion {
            category_id: category.into(),
            question: Question {
                text: "q".into(),
                options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
                answer,
                image: None,
                paragraph: None,
                group: None,
            },
        }
    }

    fn form(questions: Vec<FormQuestion>) -> ExamForm {
        ExamForm {
            section_id: "A".into(),
            section_name: "Section A".into(),
            questions,
        }
    }

    #[test]
    fn buckets_follow_form_order() {
        let form = form(vec![
            form_question("english", 0),
            form_question("gk", 0),
            form_question("english", 0),
        ]);
        let stats = compute_category_stats(&form, &AnswerSheet::new(), MarkingScheme::default());
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].category_id, "english");
        assert_eq!(stats[0].total, 2);
        assert_eq!(stats[1].category_id, "gk");
        assert_eq!(stats[1].total, 1);
    }

    #[test]
    fn counts_and_score_per_category() {
        let form = form(vec![
            form_question("maths", 1),
            form_question("maths", 1),
            form_question("maths", 1),
            form_question("physics", 0),
        ]);
        let mut answers = AnswerSheet::new();
        answers.select(0, 1); // maths correct
        answers.select(1, 3); // maths wrong
                              // maths position 2 skipped
        answers.select(3, 0); // physics correct

        let stats = compute_category_stats(&form, &answers, MarkingScheme::default());

        let maths = &stats[0];
        assert_eq!(maths.attempted, 2);
        assert_eq!(maths.correct, 1);
        assert_eq!(maths.wrong, 1);
        assert_eq!(maths.skipped, 1);
        assert!((maths.score - 0.75).abs() < f64::EPSILON);
        assert!((maths.accuracy() - 0.5).abs() < f64::EPSILON);

        let physics = &stats[1];
        assert_eq!(physics.correct, 1);
        assert!((physics.attempt_rate() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_form_yields_no_stats() {
        let stats = compute_category_stats(
            &form(Vec::new()),
            &AnswerSheet::new(),
            MarkingScheme::default(),
        );
        assert!(stats.is_empty());
    }

    #[test]
    fn accuracy_with_no_attempts_is_zero() {
        let stats = CategoryStats::new("gk");
        assert_eq!(stats.accuracy(), 0.0);
        assert_eq!(stats.attempt_rate(), 0.0);
    }
}
