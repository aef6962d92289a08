//! The `mockexam compare` command.

use std::path::PathBuf;

use anyhow::Result;

use mockexam_core::result::ExamResult;

pub fn execute(
    baseline_path: PathBuf,
    current_path: PathBuf,
    threshold: f64,
    fail_on_decline: bool,
    format: String,
) -> Result<()> {
    let baseline = ExamResult::load_json(&baseline_path)?;
    let current = ExamResult::load_json(&current_path)?;

    let report = current.compare(&baseline, threshold);

    match format.as_str() {
        "markdown" | "md" => {
            println!("{}", report.to_markdown());
        }
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => {
            // text format
            println!(
                "Total: {:.2} -> {:.2} ({:+.2})",
                report.baseline_total, report.current_total, report.total_delta
            );
            println!(
                "Sections: {} improved, {} declined, {} unchanged",
                report.improved.len(),
                report.declined.len(),
                report.unchanged
            );

            if !report.improved.is_empty() {
                println!("\nImproved:");
                for d in &report.improved {
                    println!(
                        "  {} {:.2} -> {:.2} (+{:.2})",
                        d.section_id, d.baseline_score, d.current_score, d.delta
                    );
                }
            }

            if !report.declined.is_empty() {
                println!("\nDeclined:");
                for d in &report.declined {
                    println!(
                        "  {} {:.2} -> {:.2} ({:.2})",
                        d.section_id, d.baseline_score, d.current_score, d.delta
                    );
                }
            }

            if report.new_sections > 0 {
                println!("\n{} new section(s)", report.new_sections);
            }
            if report.removed_sections > 0 {
                println!("{} removed section(s)", report.removed_sections);
            }
        }
    }

    if fail_on_decline && report.has_declines() {
        std::process::exit(1);
    }

    Ok(())
}
