//! Boundary error types.
//!
//! The scoring and shuffle algorithms are total over well-formed input and
//! raise no errors of their own; these types cover the session and grading
//! boundaries, where bad positions and mismatched inputs are rejected
//! instead of degrading silently.

use thiserror::Error;

/// Errors surfaced by session handling and grading.
#[derive(Debug, Error)]
pub enum ExamError {
    /// A section id was referenced that the exam does not carry.
    #[error("unknown section: {0}")]
    UnknownSection(String),

    /// A navigation or selection target is outside the assembled form.
    #[error("position {position} out of range for a form of {len} questions")]
    PositionOutOfRange { position: usize, len: usize },

    /// More answer sheets were supplied than the paper has sections.
    #[error("{sheets} answer sheet(s) supplied for a paper with {sections} section(s)")]
    SheetCountMismatch { sheets: usize, sections: usize },
}
