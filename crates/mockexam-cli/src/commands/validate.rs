//! The `mockexam validate` command.

use std::path::PathBuf;

use anyhow::Result;

pub fn execute(paper_path: PathBuf) -> Result<()> {
    let papers = if paper_path.is_dir() {
        mockexam_core::parser::load_paper_directory(&paper_path)?
    } else {
        vec![mockexam_core::parser::parse_paper(&paper_path)?]
    };

    let mut total_warnings = 0;

    for paper in &papers {
        println!(
            "Paper: {} ({} sections, {} questions)",
            paper.name,
            paper.sections.len(),
            paper.sections.iter().map(|s| s.question_count()).sum::<usize>()
        );

        let warnings = mockexam_core::parser::validate_paper(paper);
        for w in &warnings {
            let prefix = w
                .scope
                .as_ref()
                .map(|s| format!("  [{s}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All papers valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
