//! Markdown review sheet generator.

use mockexam_core::result::ExamResult;

/// Render an exam result as a markdown review sheet: headline numbers,
/// a per-section table, and a per-subject breakdown for each section.
pub fn generate_markdown(result: &ExamResult) -> String {
    let mut md = String::new();

    md.push_str(&format!("# {} — Result\n\n", result.paper.name));
    if let Some(candidate) = &result.candidate {
        md.push_str(&format!("**Candidate:** {}\n\n", candidate.name));
    }
    md.push_str(&format!(
        "**Total:** {:.2}/{:.0} ({:.1}%) — {}\n\n",
        result.total_score,
        result.paper.max_marks,
        result.percentage(),
        result.band()
    ));
    md.push_str(&format!(
        "Taken on {}\n\n",
        result.taken_at.format("%Y-%m-%d %H:%M UTC")
    ));

    md.push_str("## Sections\n\n");
    md.push_str("| Section | Questions | Attempted | Correct | Score |\n");
    md.push_str("|---------|-----------|-----------|---------|-------|\n");
    for section in &result.sections {
        md.push_str(&format!(
            "| {} | {} | {} | {} | {:.2} |\n",
            section.section_name,
            section.total_questions,
            section.score.attempted,
            section.score.correct,
            section.score.score
        ));
    }
    md.push('\n');

    for section in &result.sections {
        if section.categories.is_empty() {
            continue;
        }
        md.push_str(&format!("## {} by subject\n\n", section.section_name));
        md.push_str("| Subject | Total | Attempted | Correct | Wrong | Skipped | Score | Accuracy |\n");
        md.push_str("|---------|-------|-----------|---------|-------|---------|-------|----------|\n");
        for stats in &section.categories {
            md.push_str(&format!(
                "| {} | {} | {} | {} | {} | {} | {:.2} | {:.0}% |\n",
                stats.category_id,
                stats.total,
                stats.attempted,
                stats.correct,
                stats.wrong,
                stats.skipped,
                stats.score,
                stats.accuracy() * 100.0
            ));
        }
        md.push('\n');
    }

    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use mockexam_core::result::{PaperSummary, SectionResult};
    use mockexam_core::scoring::SectionScore;
    use mockexam_core::statistics::CategoryStats;

    #[test]
    fn sheet_lists_sections_and_subjects() {
        let result = ExamResult {
            attempt_id: uuid::Uuid::nil(),
            taken_at: Utc::now(),
            paper: PaperSummary {
                id: "mock-1".into(),
                name: "Mock Test 1".into(),
                max_marks: 200.0,
            },
            candidate: None,
            sections: vec![SectionResult {
                section_id: "A".into(),
                section_name: "Section A".into(),
                total_questions: 100,
                score: SectionScore {
                    score: 42.0,
                    correct: 44,
                    attempted: 52,
                },
                categories: vec![CategoryStats {
                    category_id: "english".into(),
                    total: 40,
                    attempted: 30,
                    correct: 25,
                    wrong: 5,
                    skipped: 10,
                    score: 23.75,
                }],
            }],
            total_score: 42.0,
        };

        let md = generate_markdown(&result);
        assert!(md.contains("# Mock Test 1 — Result"));
        assert!(md.contains("| Section A | 100 | 52 | 44 | 42.00 |"));
        assert!(md.contains("## Section A by subject"));
        assert!(md.contains("| english | 40 | 30 | 25 | 5 | 10 | 23.75 | 83% |"));
    }
}
