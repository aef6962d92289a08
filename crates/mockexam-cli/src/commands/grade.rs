//! The `mockexam grade` command.

use std::path::PathBuf;

use anyhow::Result;

use mockexam_core::parser;
use mockexam_core::result::ExamResult;
use mockexam_core::scoring::AnswerSheet;
use mockexam_report::html::write_html_card;
use mockexam_report::markdown::generate_markdown;

use crate::config::load_config_from;

pub fn execute(
    paper_path: PathBuf,
    answer_paths: Vec<PathBuf>,
    output: PathBuf,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let paper = parser::parse_paper(&paper_path)?;
    for warning in parser::validate_paper(&paper) {
        let prefix = warning
            .scope
            .as_ref()
            .map(|s| format!("[{s}] "))
            .unwrap_or_default();
        eprintln!("  {prefix}WARNING: {}", warning.message);
    }

    let sheets: Vec<AnswerSheet> = answer_paths
        .iter()
        .map(|p| parser::parse_answer_sheet(p))
        .collect::<Result<Vec<_>>>()?;

    // Surface suspicious selections before they silently grade as wrong.
    for (section, sheet) in paper.sections.iter().zip(&sheets) {
        let form = section.form_in_order(paper.questions_per_section);
        let questions: Vec<_> = form.questions.iter().map(|fq| fq.question.clone()).collect();
        for warning in parser::validate_answer_sheet(&questions, sheet) {
            let scope = warning.scope.as_deref().unwrap_or("");
            eprintln!("  [{}{}] WARNING: {}", section.id, scope, warning.message);
        }
    }

    let result = ExamResult::grade(
        &paper,
        &sheets,
        config.candidate.clone(),
        config.marking_scheme(),
        chrono::Utc::now(),
    )?;

    tracing::info!(paper = %paper.id, total = result.total_score, "attempt graded");

    print_summary(&result);

    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H%M%S");

    let formats: Vec<&str> = if format == "all" {
        vec!["json", "html", "markdown"]
    } else if format == "text" {
        vec![]
    } else {
        format.split(',').collect()
    };

    if !formats.is_empty() {
        std::fs::create_dir_all(&output)?;
    }

    for fmt in &formats {
        match *fmt {
            "json" => {
                let path = output.join(format!("result-{}-{timestamp}.json", paper.id));
                result.save_json(&path)?;
                eprintln!("Result saved to: {}", path.display());
            }
            "html" => {
                let path = output.join(format!("result-{}-{timestamp}.html", paper.id));
                write_html_card(&result, &path)?;
                eprintln!("Result card: {}", path.display());
            }
            "markdown" | "md" => {
                let path = output.join(format!("result-{}-{timestamp}.md", paper.id));
                std::fs::write(&path, generate_markdown(&result))?;
                eprintln!("Review sheet: {}", path.display());
            }
            _ => {
                eprintln!("Unknown format: {fmt}");
            }
        }
    }

    Ok(())
}

fn print_summary(result: &ExamResult) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["Section", "Questions", "Attempted", "Correct", "Score"]);

    for section in &result.sections {
        table.add_row(vec![
            Cell::new(&section.section_name),
            Cell::new(section.total_questions),
            Cell::new(section.score.attempted),
            Cell::new(section.score.correct),
            Cell::new(format!("{:.2}", section.score.score)),
        ]);
    }

    println!("{table}");
    println!(
        "Total: {:.2}/{:.0} ({:.1}%) — {}",
        result.total_score,
        result.paper.max_marks,
        result.percentage(),
        result.band()
    );
}
