//! Answer bookkeeping and the negative-marking scoring reducer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{MarkingScheme, Question};

/// Sparse record of a candidate's selections for one section.
///
/// A position is either present with a selected option index or absent;
/// absence means the question was never answered. This is deliberately a
/// map rather than a sentinel-padded array so "explicitly unanswered" and
/// "never visited" cannot be confused.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSheet {
    selections: BTreeMap<usize, usize>,
}

impl AnswerSheet {
    /// An empty sheet. Every question starts unanswered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a selection for the question at `position`.
    pub fn select(&mut self, position: usize, option: usize) {
        self.selections.insert(position, option);
    }

    /// Withdraw the selection at `position`, if any.
    pub fn clear(&mut self, position: usize) -> Option<usize> {
        self.selections.remove(&position)
    }

    /// The selected option at `position`, or `None` if unanswered.
    pub fn selected(&self, position: usize) -> Option<usize> {
        self.selections.get(&position).copied()
    }

    /// Number of answered positions.
    pub fn attempted_count(&self) -> usize {
        self.selections.len()
    }

    /// Iterate over `(position, selected option)` pairs in position order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.selections.iter().map(|(&p, &o)| (p, o))
    }

    /// Whether nothing has been answered.
    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }
}

/// The score of one independently-graded section.
///
/// Immutable once computed; a new submission produces a new result.
/// `attempted >= correct` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionScore {
    /// Net marks: may be negative or fractional.
    pub score: f64,
    /// Number of correct answers.
    pub correct: u32,
    /// Number of answered questions, correct or not.
    pub attempted: u32,
}

impl SectionScore {
    /// A zero score, for sections with no answers.
    pub fn zero() -> Self {
        Self {
            score: 0.0,
            correct: 0,
            attempted: 0,
        }
    }
}

/// Score a question sequence against a sparse answer sheet.
///
/// Unanswered positions are skipped entirely: they count toward neither
/// `attempted`, `correct`, nor `score`. An answered position scores
/// `scheme.correct_marks` when the selection equals the question's correct
/// index, `scheme.wrong_marks` otherwise. A selection outside the option
/// range is never equal to the correct index, so it degrades to a wrong
/// attempt; validation at the loading boundary flags such sheets.
pub fn score_questions<'a, I>(questions: I, answers: &AnswerSheet, scheme: MarkingScheme) -> SectionScore
where
    I: IntoIterator<Item = &'a Question>,
{
    let mut result = SectionScore::zero();

    for (position, question) in questions.into_iter().enumerate() {
        let Some(selected) = answers.selected(position) else {
            continue;
        };
        result.attempted += 1;
        if selected == question.answer {
            result.score += scheme.correct_marks;
            result.correct += 1;
        } else {
            result.score += scheme.wrong_marks;
        }
    }

    result
}

/// Sum the section scores into a combined exam total.
///
/// Sections are never cross-scored: only the numeric scores are added,
/// per-section counts stay with their sections.
pub fn combined_total(sections: &[SectionScore]) -> f64 {
    sections.iter().map(|s| s.score).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(answer: usize) -> Question {
        Question {
            text: "q".into(),
            options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            answer,
            image: None,
            paragraph: None,
            group: None,
        }
    }

    #[test]
    fn mixed_sheet_scores_with_negative_marking() {
        let questions = vec![question(0), question(1), question(2)];
        let mut answers = AnswerSheet::new();
        answers.select(0, 0); // correct
        answers.select(1, 2); // wrong
                              // position 2 left unanswered

        let result = score_questions(&questions, &answers, MarkingScheme::default());
        assert_eq!(result.attempted, 2);
        assert_eq!(result.correct, 1);
        assert!((result.score - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn all_correct() {
        let questions = vec![question(0), question(1), question(2)];
        let mut answers = AnswerSheet::new();
        answers.select(0, 0);
        answers.select(1, 1);
        answers.select(2, 2);

        let result = score_questions(&questions, &answers, MarkingScheme::default());
        assert_eq!(result.attempted, 3);
        assert_eq!(result.correct, 3);
        assert!((result.score - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_sheet_scores_zero_regardless_of_question_count() {
        let questions: Vec<Question> = (0..40).map(|_| question(0)).collect();
        let result = score_questions(&questions, &AnswerSheet::new(), MarkingScheme::default());
        assert_eq!(result.attempted, 0);
        assert_eq!(result.correct, 0);
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn all_wrong_goes_negative() {
        let questions = vec![question(0), question(0)];
        let mut answers = AnswerSheet::new();
        answers.select(0, 1);
        answers.select(1, 2);

        let result = score_questions(&questions, &answers, MarkingScheme::default());
        assert_eq!(result.attempted, 2);
        assert_eq!(result.correct, 0);
        assert!((result.score + 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn out_of_range_selection_counts_as_wrong_attempt() {
        let questions = vec![question(0)];
        let mut answers = AnswerSheet::new();
        answers.select(0, 99);

        let result = score_questions(&questions, &answers, MarkingScheme::default());
        assert_eq!(result.attempted, 1);
        assert_eq!(result.correct, 0);
        assert!((result.score + 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn answers_beyond_question_list_are_ignored() {
        let questions = vec![question(0)];
        let mut answers = AnswerSheet::new();
        answers.select(0, 0);
        answers.select(5, 1); // no such question

        let result = score_questions(&questions, &answers, MarkingScheme::default());
        assert_eq!(result.attempted, 1);
        assert_eq!(result.correct, 1);
    }

    #[test]
    fn combined_total_is_a_plain_sum() {
        let a = SectionScore {
            score: 10.0,
            correct: 11,
            attempted: 14,
        };
        let b = SectionScore {
            score: -2.5,
            correct: 0,
            attempted: 10,
        };
        assert!((combined_total(&[a, b]) - 7.5).abs() < f64::EPSILON);
        // Counts stay per-section.
        assert_eq!(a.attempted, 14);
        assert_eq!(b.attempted, 10);
    }

    #[test]
    fn clear_withdraws_a_selection() {
        let mut answers = AnswerSheet::new();
        answers.select(3, 1);
        assert_eq!(answers.selected(3), Some(1));
        assert_eq!(answers.clear(3), Some(1));
        assert_eq!(answers.selected(3), None);
        assert_eq!(answers.clear(3), None);
        assert!(answers.is_empty());
    }

    #[test]
    fn sheet_serde_roundtrip() {
        let mut answers = AnswerSheet::new();
        answers.select(0, 2);
        answers.select(17, 3);

        let json = serde_json::to_string(&answers).unwrap();
        let restored: AnswerSheet = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, answers);
        assert_eq!(restored.attempted_count(), 2);
    }
}
