//! Timed exam sessions.
//!
//! An [`ExamSession`] holds everything a running attempt needs: the
//! shuffled forms, the answer sheets, the review markers, and the
//! deadline. It is a plain serde type, so a session can be snapshotted to
//! disk mid-attempt and resumed later with its original deadline intact.
//!
//! All clock-dependent methods take `now` from the caller; the session
//! never reads the system clock itself.

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ExamError;
use crate::model::{Candidate, ExamForm, FormQuestion, MarkingScheme, Paper};
use crate::result::{ExamResult, PaperSummary, SectionResult};
use crate::scoring::{combined_total, score_questions, AnswerSheet};
use crate::statistics::compute_category_stats;

/// Sidebar marker for one question position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaletteStatus {
    /// Never navigated to.
    NotVisited,
    /// Visited but no selection recorded.
    Unanswered,
    /// A selection is recorded.
    Answered,
    /// Flagged for review; may or may not carry a selection.
    MarkedForReview,
}

/// Per-section state of a running attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SectionState {
    form: ExamForm,
    answers: AnswerSheet,
    visited: BTreeSet<usize>,
    marked: BTreeSet<usize>,
}

impl SectionState {
    fn palette(&self) -> Vec<PaletteStatus> {
        (0..self.form.len())
            .map(|position| {
                if self.marked.contains(&position) {
                    PaletteStatus::MarkedForReview
                } else if self.answers.selected(position).is_some() {
                    PaletteStatus::Answered
                } else if self.visited.contains(&position) {
                    PaletteStatus::Unanswered
                } else {
                    PaletteStatus::NotVisited
                }
            })
            .collect()
    }
}

/// A running, timed exam attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamSession {
    paper: PaperSummary,
    candidate: Option<Candidate>,
    scheme: MarkingScheme,
    sections: Vec<SectionState>,
    current_section: usize,
    current_position: usize,
    started_at: DateTime<Utc>,
    deadline: DateTime<Utc>,
}

impl ExamSession {
    /// Start a fresh attempt: assemble one randomized form per section
    /// and open empty answer sheets. Any previous transient state is gone
    /// by construction; a new session shares nothing with an old one.
    pub fn start<R: Rng + ?Sized>(
        paper: &Paper,
        candidate: Option<Candidate>,
        scheme: MarkingScheme,
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> Self {
        let sections = paper
            .sections
            .iter()
            .map(|section| SectionState {
                form: crate::shuffle::assemble_form(section, paper.questions_per_section, rng),
                answers: AnswerSheet::new(),
                visited: BTreeSet::new(),
                marked: BTreeSet::new(),
            })
            .collect::<Vec<_>>();

        let mut session = Self {
            paper: PaperSummary {
                id: paper.id.clone(),
                name: paper.name.clone(),
                max_marks: paper.max_marks(),
            },
            candidate,
            scheme,
            sections,
            current_section: 0,
            current_position: 0,
            started_at: now,
            deadline: now + Duration::minutes(paper.duration_minutes as i64),
        };
        session.mark_visited();
        session
    }

    fn mark_visited(&mut self) {
        let position = self.current_position;
        if let Some(state) = self.sections.get_mut(self.current_section) {
            if position < state.form.len() {
                state.visited.insert(position);
            }
        }
    }

    fn current_state(&self) -> Option<&SectionState> {
        self.sections.get(self.current_section)
    }

    /// The question currently presented, if any.
    pub fn current_question(&self) -> Option<&FormQuestion> {
        self.current_state()
            .and_then(|s| s.form.questions.get(self.current_position))
    }

    /// Id of the section currently presented.
    pub fn current_section_id(&self) -> Option<&str> {
        self.current_state().map(|s| s.form.section_id.as_str())
    }

    /// Zero-based position of the question currently presented.
    pub fn current_position(&self) -> usize {
        self.current_position
    }

    /// Record a selection for the current question.
    pub fn select(&mut self, option: usize) -> Result<(), ExamError> {
        let position = self.current_position;
        let state = self
            .sections
            .get_mut(self.current_section)
            .ok_or(ExamError::PositionOutOfRange { position, len: 0 })?;
        if position >= state.form.len() {
            return Err(ExamError::PositionOutOfRange {
                position,
                len: state.form.len(),
            });
        }
        state.answers.select(position, option);
        Ok(())
    }

    /// Withdraw the selection for the current question, if any.
    pub fn clear_selection(&mut self) {
        let position = self.current_position;
        if let Some(state) = self.sections.get_mut(self.current_section) {
            state.answers.clear(position);
        }
    }

    /// Flip the review flag on the current question.
    pub fn toggle_review(&mut self) {
        let position = self.current_position;
        if let Some(state) = self.sections.get_mut(self.current_section) {
            if !state.marked.remove(&position) {
                state.marked.insert(position);
            }
        }
    }

    /// Move to the next question, staying on the last one at the end.
    pub fn next(&mut self) {
        let len = self.current_state().map_or(0, |s| s.form.len());
        if self.current_position + 1 < len {
            self.current_position += 1;
            self.mark_visited();
        }
    }

    /// Move to the previous question, staying on the first at the start.
    pub fn previous(&mut self) {
        if self.current_position > 0 {
            self.current_position -= 1;
            self.mark_visited();
        }
    }

    /// Jump directly to a question position on the current form.
    pub fn jump_to(&mut self, position: usize) -> Result<(), ExamError> {
        let len = self.current_state().map_or(0, |s| s.form.len());
        if position >= len {
            return Err(ExamError::PositionOutOfRange { position, len });
        }
        self.current_position = position;
        self.mark_visited();
        Ok(())
    }

    /// Switch to another section, landing on its first question.
    pub fn switch_section(&mut self, section_id: &str) -> Result<(), ExamError> {
        let idx = self
            .sections
            .iter()
            .position(|s| s.form.section_id == section_id)
            .ok_or_else(|| ExamError::UnknownSection(section_id.to_owned()))?;
        self.current_section = idx;
        self.current_position = 0;
        self.mark_visited();
        Ok(())
    }

    /// Sidebar markers for every position of the given section.
    pub fn palette(&self, section_id: &str) -> Result<Vec<PaletteStatus>, ExamError> {
        self.sections
            .iter()
            .find(|s| s.form.section_id == section_id)
            .map(SectionState::palette)
            .ok_or_else(|| ExamError::UnknownSection(section_id.to_owned()))
    }

    /// When the attempt started.
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Time left on the clock, clamped at zero.
    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        (self.deadline - now).max(Duration::zero())
    }

    /// Whether the deadline has passed. Expiry forces submission; the
    /// session records nothing after it, the caller just calls
    /// [`ExamSession::submit`].
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.deadline
    }

    /// Score every section and consume the session.
    pub fn submit(self, now: DateTime<Utc>) -> ExamResult {
        let sections: Vec<SectionResult> = self
            .sections
            .iter()
            .map(|state| {
                let score = score_questions(
                    state.form.questions.iter().map(|fq| &fq.question),
                    &state.answers,
                    self.scheme,
                );
                SectionResult {
                    section_id: state.form.section_id.clone(),
                    section_name: state.form.section_name.clone(),
                    total_questions: state.form.len() as u32,
                    score,
                    categories: compute_category_stats(&state.form, &state.answers, self.scheme),
                }
            })
            .collect();

        let total_score = combined_total(&sections.iter().map(|s| s.score).collect::<Vec<_>>());

        ExamResult {
            attempt_id: Uuid::new_v4(),
            taken_at: now,
            paper: self.paper,
            candidate: self.candidate,
            sections,
            total_score,
        }
    }

    /// Snapshot the session as JSON so an interrupted attempt can resume.
    pub fn save_snapshot(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize snapshot")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write snapshot to {}", path.display()))?;
        Ok(())
    }

    /// Restore a snapshotted session. The original deadline is kept, so
    /// time spent away still counts against the clock.
    pub fn load_snapshot(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read snapshot from {}", path.display()))?;
        let session: ExamSession =
            serde_json::from_str(&content).context("failed to parse snapshot JSON")?;
        Ok(session)
    }
}
