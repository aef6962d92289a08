//! The `mockexam list` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use mockexam_core::parser::load_paper_directory;

pub fn execute(dir: PathBuf, at: Option<String>) -> Result<()> {
    let now: DateTime<Utc> = match at {
        Some(s) => DateTime::parse_from_rfc3339(&s)
            .with_context(|| format!("invalid RFC 3339 timestamp: {s}"))?
            .with_timezone(&Utc),
        None => Utc::now(),
    };

    let mut papers = load_paper_directory(&dir)?;
    papers.sort_by(|a, b| a.id.cmp(&b.id));

    if papers.is_empty() {
        println!("No papers found in {}", dir.display());
        return Ok(());
    }

    use comfy_table::{Cell, Table};
    let mut table = Table::new();
    table.set_header(vec![
        "Paper",
        "Name",
        "Sections",
        "Questions",
        "Duration",
        "Release",
        "Status",
    ]);

    for paper in &papers {
        let release = paper
            .release_at
            .map(|r| r.format("%Y-%m-%d %H:%M UTC").to_string())
            .unwrap_or_else(|| "-".into());
        let status = if paper.is_available(now) {
            "available"
        } else {
            "locked"
        };
        table.add_row(vec![
            Cell::new(&paper.id),
            Cell::new(&paper.name),
            Cell::new(paper.sections.len()),
            Cell::new(
                paper
                    .sections
                    .iter()
                    .map(|s| s.question_count())
                    .sum::<usize>(),
            ),
            Cell::new(format!("{} min", paper.duration_minutes)),
            Cell::new(release),
            Cell::new(status),
        ]);
    }

    println!("{table}");
    Ok(())
}
