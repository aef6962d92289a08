//! Exam result records with JSON persistence and attempt comparison.

use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ExamError;
use crate::model::{Candidate, MarkingScheme, Paper};
use crate::scoring::{combined_total, score_questions, AnswerSheet, SectionScore};
use crate::statistics::{compute_category_stats, CategoryStats};

/// Performance badge, cut at fractions of the maximum marks.
///
/// On a 200-mark paper the cut points are 160 / 120 / 80.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PerformanceBand {
    Excellent,
    Good,
    Average,
    NeedsImprovement,
}

impl PerformanceBand {
    /// Band for a score expressed as a fraction of the maximum marks.
    pub fn from_fraction(fraction: f64) -> Self {
        if fraction >= 0.8 {
            PerformanceBand::Excellent
        } else if fraction >= 0.6 {
            PerformanceBand::Good
        } else if fraction >= 0.4 {
            PerformanceBand::Average
        } else {
            PerformanceBand::NeedsImprovement
        }
    }
}

impl fmt::Display for PerformanceBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PerformanceBand::Excellent => write!(f, "Excellent"),
            PerformanceBand::Good => write!(f, "Good"),
            PerformanceBand::Average => write!(f, "Average"),
            PerformanceBand::NeedsImprovement => write!(f, "Needs Improvement"),
        }
    }
}

/// Summary of the paper an attempt was taken against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaperSummary {
    pub id: String,
    pub name: String,
    /// Maximum attainable marks.
    pub max_marks: f64,
}

/// One section's slice of an exam result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionResult {
    /// Section id (e.g. "A").
    pub section_id: String,
    /// Human-readable section name.
    pub section_name: String,
    /// Questions on the assembled form.
    pub total_questions: u32,
    /// The reducer's output for this section.
    pub score: SectionScore,
    /// Per-subject breakdown.
    pub categories: Vec<CategoryStats>,
}

/// A complete, immutable exam attempt result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamResult {
    /// Unique attempt identifier.
    pub attempt_id: Uuid,
    /// When the attempt was submitted.
    pub taken_at: DateTime<Utc>,
    /// The paper this attempt was taken against.
    pub paper: PaperSummary,
    /// Registration record, if one was supplied.
    pub candidate: Option<Candidate>,
    /// Per-section results, in paper order.
    pub sections: Vec<SectionResult>,
    /// Combined total: the plain sum of section scores.
    pub total_score: f64,
}

impl ExamResult {
    /// Grade externally-recorded answer sheets against a paper.
    ///
    /// Sheets pair with sections by paper order and are graded against
    /// the authored question order. Exactly one sheet per section is
    /// required.
    pub fn grade(
        paper: &Paper,
        sheets: &[AnswerSheet],
        candidate: Option<Candidate>,
        scheme: MarkingScheme,
        taken_at: DateTime<Utc>,
    ) -> Result<Self, ExamError> {
        if sheets.len() != paper.sections.len() {
            return Err(ExamError::SheetCountMismatch {
                sheets: sheets.len(),
                sections: paper.sections.len(),
            });
        }

        let sections: Vec<SectionResult> = paper
            .sections
            .iter()
            .zip(sheets)
            .map(|(section, answers)| {
                let form = section.form_in_order(paper.questions_per_section);
                let score = score_questions(
                    form.questions.iter().map(|fq| &fq.question),
                    answers,
                    scheme,
                );
                SectionResult {
                    section_id: form.section_id.clone(),
                    section_name: form.section_name.clone(),
                    total_questions: form.len() as u32,
                    score,
                    categories: compute_category_stats(&form, answers, scheme),
                }
            })
            .collect();

        let scores: Vec<SectionScore> = sections.iter().map(|s| s.score).collect();

        Ok(ExamResult {
            attempt_id: Uuid::new_v4(),
            taken_at,
            paper: PaperSummary {
                id: paper.id.clone(),
                name: paper.name.clone(),
                max_marks: paper.max_marks(),
            },
            candidate,
            sections,
            total_score: combined_total(&scores),
        })
    }

    /// Total score as a percentage of maximum marks.
    pub fn percentage(&self) -> f64 {
        if self.paper.max_marks <= 0.0 {
            0.0
        } else {
            self.total_score / self.paper.max_marks * 100.0
        }
    }

    /// Performance badge for this attempt.
    pub fn band(&self) -> PerformanceBand {
        if self.paper.max_marks <= 0.0 {
            return PerformanceBand::NeedsImprovement;
        }
        PerformanceBand::from_fraction(self.total_score / self.paper.max_marks)
    }

    /// Save the result as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize result")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write result to {}", path.display()))?;
        Ok(())
    }

    /// Load a result from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read result from {}", path.display()))?;
        let result: ExamResult =
            serde_json::from_str(&content).context("failed to parse result JSON")?;
        Ok(result)
    }

    /// Compare this attempt against an earlier one.
    ///
    /// Sections are matched by id; a score delta beyond `threshold` marks
    /// counts as improved or declined, anything inside it as unchanged.
    pub fn compare(&self, baseline: &ExamResult, threshold: f64) -> ProgressReport {
        let mut improved = Vec::new();
        let mut declined = Vec::new();
        let mut unchanged = 0usize;
        let mut new_sections = 0usize;

        for current in &self.sections {
            let Some(base) = baseline
                .sections
                .iter()
                .find(|s| s.section_id == current.section_id)
            else {
                new_sections += 1;
                continue;
            };

            let delta = current.score.score - base.score.score;
            let entry = SectionDelta {
                section_id: current.section_id.clone(),
                baseline_score: base.score.score,
                current_score: current.score.score,
                delta,
            };
            if delta > threshold {
                improved.push(entry);
            } else if delta < -threshold {
                declined.push(entry);
            } else {
                unchanged += 1;
            }
        }

        let removed_sections = baseline
            .sections
            .iter()
            .filter(|b| !self.sections.iter().any(|c| c.section_id == b.section_id))
            .count();

        ProgressReport {
            baseline_total: baseline.total_score,
            current_total: self.total_score,
            total_delta: self.total_score - baseline.total_score,
            improved,
            declined,
            unchanged,
            new_sections,
            removed_sections,
        }
    }
}

/// Result of comparing two attempts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressReport {
    /// Baseline combined total.
    pub baseline_total: f64,
    /// Current combined total.
    pub current_total: f64,
    /// Change in combined total.
    pub total_delta: f64,
    /// Sections whose score went up.
    pub improved: Vec<SectionDelta>,
    /// Sections whose score went down.
    pub declined: Vec<SectionDelta>,
    /// Sections with no significant change.
    pub unchanged: usize,
    /// Sections in current but not baseline.
    pub new_sections: usize,
    /// Sections in baseline but not current.
    pub removed_sections: usize,
}

/// A per-section score change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionDelta {
    pub section_id: String,
    pub baseline_score: f64,
    pub current_score: f64,
    pub delta: f64,
}

impl ProgressReport {
    /// Format the progress report as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!(
            "**Total:** {:.2} to {:.2} ({:+.2})\n\n",
            self.baseline_total, self.current_total, self.total_delta
        ));
        md.push_str(&format!(
            "**Summary:** {} improved, {} declined, {} unchanged\n\n",
            self.improved.len(),
            self.declined.len(),
            self.unchanged
        ));

        if !self.improved.is_empty() {
            md.push_str("### Improved\n\n");
            md.push_str("| Section | Baseline | Current | Delta |\n");
            md.push_str("|---------|----------|---------|-------|\n");
            for d in &self.improved {
                md.push_str(&format!(
                    "| {} | {:.2} | {:.2} | +{:.2} |\n",
                    d.section_id, d.baseline_score, d.current_score, d.delta
                ));
            }
            md.push('\n');
        }

        if !self.declined.is_empty() {
            md.push_str("### Declined\n\n");
            md.push_str("| Section | Baseline | Current | Delta |\n");
            md.push_str("|---------|----------|---------|-------|\n");
            for d in &self.declined {
                md.push_str(&format!(
                    "| {} | {:.2} | {:.2} | {:.2} |\n",
                    d.section_id, d.baseline_score, d.current_score, d.delta
                ));
            }
        }

        md
    }

    /// Returns true if any section declined.
    pub fn has_declines(&self) -> bool {
        !self.declined.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section_result(id: &str, score: f64) -> SectionResult {
        SectionResult {
            section_id: id.into(),
            section_name: format!("Section {id}"),
            total_questions: 100,
            score: SectionScore {
                score,
                correct: score.max(0.0) as u32,
                attempted: 100,
            },
            categories: vec![],
        }
    }

    fn result(sections: Vec<SectionResult>, max_marks: f64) -> ExamResult {
        let total_score = sections.iter().map(|s| s.score.score).sum();
        ExamResult {
            attempt_id: Uuid::nil(),
            taken_at: Utc::now(),
            paper: PaperSummary {
                id: "mock-1".into(),
                name: "Mock Test 1".into(),
                max_marks,
            },
            candidate: None,
            sections,
            total_score,
        }
    }

    #[test]
    fn band_cut_points_match_a_200_mark_paper() {
        assert_eq!(
            result(vec![section_result("A", 160.0)], 200.0).band(),
            PerformanceBand::Excellent
        );
        assert_eq!(
            result(vec![section_result("A", 159.75)], 200.0).band(),
            PerformanceBand::Good
        );
        assert_eq!(
            result(vec![section_result("A", 120.0)], 200.0).band(),
            PerformanceBand::Good
        );
        assert_eq!(
            result(vec![section_result("A", 80.0)], 200.0).band(),
            PerformanceBand::Average
        );
        assert_eq!(
            result(vec![section_result("A", 79.75)], 200.0).band(),
            PerformanceBand::NeedsImprovement
        );
        assert_eq!(
            result(vec![section_result("A", -10.0)], 200.0).band(),
            PerformanceBand::NeedsImprovement
        );
    }

    #[test]
    fn percentage_handles_zero_max() {
        let r = result(vec![], 0.0);
        assert_eq!(r.percentage(), 0.0);
        assert_eq!(r.band(), PerformanceBand::NeedsImprovement);
    }

    #[test]
    fn totals_sum_sections() {
        let r = result(
            vec![section_result("A", 10.0), section_result("B", -2.5)],
            200.0,
        );
        assert!((r.total_score - 7.5).abs() < f64::EPSILON);
    }

    #[test]
    fn json_roundtrip() {
        let r = result(vec![section_result("A", 42.0)], 100.0);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("result.json");

        r.save_json(&path).unwrap();
        let loaded = ExamResult::load_json(&path).unwrap();

        assert_eq!(loaded.paper.id, "mock-1");
        assert_eq!(loaded.sections.len(), 1);
        assert!((loaded.total_score - 42.0).abs() < f64::EPSILON);
    }

    #[test]
    fn compare_classifies_sections() {
        let baseline = result(
            vec![section_result("A", 50.0), section_result("B", 40.0)],
            200.0,
        );
        let current = result(
            vec![section_result("A", 60.0), section_result("B", 39.9)],
            200.0,
        );

        let report = current.compare(&baseline, 0.5);
        assert_eq!(report.improved.len(), 1);
        assert_eq!(report.improved[0].section_id, "A");
        assert!(report.declined.is_empty());
        assert_eq!(report.unchanged, 1);
        assert!((report.total_delta - 9.9).abs() < 1e-9);
    }

    #[test]
    fn compare_tracks_new_and_removed_sections() {
        let baseline = result(vec![section_result("A", 50.0)], 100.0);
        let current = result(vec![section_result("B", 30.0)], 100.0);

        let report = current.compare(&baseline, 0.5);
        assert_eq!(report.new_sections, 1);
        assert_eq!(report.removed_sections, 1);
        assert_eq!(report.unchanged, 0);
    }

    #[test]
    fn grade_pairs_sheets_with_sections() {
        use crate::model::{Category, Question, Section};

        let paper = Paper {
            id: "p".into(),
            name: "P".into(),
            description: String::new(),
            sections: vec![
                Section {
                    id: "A".into(),
                    name: "Section A".into(),
                    categories: vec![Category {
                        id: "english".into(),
                        name: "English".into(),
                        questions: vec![
                            Question {
                                text: "q1".into(),
                                options: vec!["a".into(), "b".into()],
                                answer: 0,
                                image: None,
                                paragraph: None,
                                group: None,
                            },
                            Question {
                                text: "q2".into(),
                                options: vec!["a".into(), "b".into()],
                                answer: 1,
                                image: None,
                                paragraph: None,
                                group: None,
                            },
                        ],
                    }],
                },
                Section {
                    id: "B".into(),
                    name: "Section B".into(),
                    categories: vec![Category {
                        id: "maths".into(),
                        name: "Mathematics".into(),
                        questions: vec![Question {
                            text: "m1".into(),
                            options: vec!["a".into(), "b".into()],
                            answer: 0,
                            image: None,
                            paragraph: None,
                            group: None,
                        }],
                    }],
                },
            ],
            duration_minutes: 180,
            questions_per_section: 2,
            release_at: None,
        };

        let mut sheet_a = AnswerSheet::new();
        sheet_a.select(0, 0); // correct
        sheet_a.select(1, 0); // wrong
        let mut sheet_b = AnswerSheet::new();
        sheet_b.select(0, 0); // correct

        let result = ExamResult::grade(
            &paper,
            &[sheet_a.clone(), sheet_b],
            None,
            MarkingScheme::default(),
            Utc::now(),
        )
        .unwrap();

        assert_eq!(result.sections.len(), 2);
        assert!((result.sections[0].score.score - 0.75).abs() < f64::EPSILON);
        assert!((result.sections[1].score.score - 1.0).abs() < f64::EPSILON);
        assert!((result.total_score - 1.75).abs() < f64::EPSILON);
        assert_eq!(result.sections[0].categories[0].category_id, "english");

        let err = ExamResult::grade(
            &paper,
            &[sheet_a],
            None,
            MarkingScheme::default(),
            Utc::now(),
        )
        .unwrap_err();
        assert!(matches!(err, ExamError::SheetCountMismatch { sheets: 1, sections: 2 }));
    }

    #[test]
    fn markdown_output_lists_declines() {
        let baseline = result(vec![section_result("A", 50.0)], 100.0);
        let current = result(vec![section_result("A", 30.0)], 100.0);

        let report = current.compare(&baseline, 0.5);
        assert!(report.has_declines());
        let md = report.to_markdown();
        assert!(md.contains("Declined"));
        assert!(md.contains("| A |"));
    }
}
