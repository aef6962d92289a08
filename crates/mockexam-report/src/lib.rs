//! mockexam-report — result-card renderers.
//!
//! Turns an [`mockexam_core::result::ExamResult`] into a shareable
//! artifact: a self-contained HTML card or a markdown review sheet.

pub mod html;
pub mod markdown;
