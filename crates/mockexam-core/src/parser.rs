//! JSON paper loader and validation.
//!
//! Loads question papers from JSON files and directories, and validates
//! them. The core scoring and shuffle algorithms stay permissive; every
//! check that would otherwise degrade silently lives here instead.

use std::path::Path;

use anyhow::{Context, Result};

use crate::model::{Paper, Question};
use crate::scoring::AnswerSheet;

/// Parse a single JSON file into a [`Paper`].
pub fn parse_paper(path: &Path) -> Result<Paper> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read paper file: {}", path.display()))?;

    parse_paper_str(&content, path)
}

/// Parse a JSON string into a [`Paper`] (useful for testing).
pub fn parse_paper_str(content: &str, source_path: &Path) -> Result<Paper> {
    let paper: Paper = serde_json::from_str(content)
        .with_context(|| format!("failed to parse paper JSON: {}", source_path.display()))?;
    Ok(paper)
}

/// Recursively load all `.json` papers from a directory.
///
/// Files that fail to parse are skipped with a warning rather than
/// aborting the whole load.
pub fn load_paper_directory(dir: &Path) -> Result<Vec<Paper>> {
    let mut papers = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    for entry in
        std::fs::read_dir(dir).with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            papers.extend(load_paper_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "json") {
            match parse_paper(&path) {
                Ok(paper) => papers.push(paper),
                Err(e) => {
                    tracing::warn!("skipping {}: {}", path.display(), e);
                }
            }
        }
    }

    Ok(papers)
}

/// Load a sparse answer sheet from a JSON file.
///
/// The document is a map from question position to selected option index,
/// e.g. `{"0": 2, "5": 0}`.
pub fn parse_answer_sheet(path: &Path) -> Result<AnswerSheet> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read answer sheet: {}", path.display()))?;
    let sheet: AnswerSheet = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse answer sheet JSON: {}", path.display()))?;
    Ok(sheet)
}

/// A warning from paper or answer-sheet validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// Where the problem sits, e.g. `A/english #3` (if applicable).
    pub scope: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a paper for common authoring issues.
pub fn validate_paper(paper: &Paper) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if paper.sections.is_empty() {
        warnings.push(ValidationWarning {
            scope: None,
            message: "paper has no sections".into(),
        });
    }

    // Duplicate section ids
    let mut seen_sections = std::collections::HashSet::new();
    for section in &paper.sections {
        if !seen_sections.insert(&section.id) {
            warnings.push(ValidationWarning {
                scope: Some(section.id.clone()),
                message: format!("duplicate section id: {}", section.id),
            });
        }
    }

    for section in &paper.sections {
        // Duplicate category ids within the section
        let mut seen_categories = std::collections::HashSet::new();
        for category in &section.categories {
            if !seen_categories.insert(&category.id) {
                warnings.push(ValidationWarning {
                    scope: Some(format!("{}/{}", section.id, category.id)),
                    message: format!("duplicate category id: {}", category.id),
                });
            }
        }

        // Sections that cannot fill their quota still grade fine, but the
        // assembled form will be shorter than advertised.
        if section.question_count() < paper.questions_per_section {
            warnings.push(ValidationWarning {
                scope: Some(section.id.clone()),
                message: format!(
                    "section has {} questions, fewer than questions_per_section = {}",
                    section.question_count(),
                    paper.questions_per_section
                ),
            });
        }

        for category in &section.categories {
            for (i, question) in category.questions.iter().enumerate() {
                let scope = format!("{}/{} #{}", section.id, category.id, i);

                if question.text.trim().is_empty() {
                    warnings.push(ValidationWarning {
                        scope: Some(scope.clone()),
                        message: "question text is empty".into(),
                    });
                }
                if question.options.len() < 2 {
                    warnings.push(ValidationWarning {
                        scope: Some(scope.clone()),
                        message: format!("only {} option(s)", question.options.len()),
                    });
                }
                if question.answer >= question.options.len() {
                    warnings.push(ValidationWarning {
                        scope: Some(scope.clone()),
                        message: format!(
                            "correct index {} out of range for {} options",
                            question.answer,
                            question.options.len()
                        ),
                    });
                }
                if question.group.as_deref() == Some("") {
                    warnings.push(ValidationWarning {
                        scope: Some(scope),
                        message: "empty-string group id is treated as ungrouped".into(),
                    });
                }
            }
        }
    }

    warnings
}

/// Validate an answer sheet against the questions it will be scored over.
///
/// The reducer treats out-of-range selections as wrong attempts; this
/// surfaces them so a data bug is never mistaken for a bad exam.
pub fn validate_answer_sheet(questions: &[Question], sheet: &AnswerSheet) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    for (position, selected) in sheet.iter() {
        match questions.get(position) {
            None => warnings.push(ValidationWarning {
                scope: Some(format!("#{position}")),
                message: format!(
                    "answer recorded for position {position}, but the form has {} questions",
                    questions.len()
                ),
            }),
            Some(q) if selected >= q.options.len() => warnings.push(ValidationWarning {
                scope: Some(format!("#{position}")),
                message: format!(
                    "selected option {selected} out of range for {} options",
                    q.options.len()
                ),
            }),
            Some(_) => {}
        }
    }

    warnings
}
