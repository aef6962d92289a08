//! HTML result card generator.
//!
//! Produces a self-contained HTML file with all CSS inlined, suitable for
//! sharing or printing.

use anyhow::Result;
use std::path::Path;

use mockexam_core::result::{ExamResult, PerformanceBand};

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

fn band_class(band: PerformanceBand) -> &'static str {
    match band {
        PerformanceBand::Excellent => "excellent",
        PerformanceBand::Good => "good",
        PerformanceBand::Average => "average",
        PerformanceBand::NeedsImprovement => "needs-improvement",
    }
}

/// Generate an HTML result card from an exam result.
pub fn generate_html(result: &ExamResult) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>Result — {}</title>\n",
        html_escape(&result.paper.name)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");
    html.push_str("<div class=\"card\">\n");

    // Header
    html.push_str("<header>\n");
    html.push_str(&format!("<h1>{}</h1>\n", html_escape(&result.paper.name)));
    html.push_str("<h2>Result</h2>\n");
    html.push_str(
        "<p class=\"certificate\">This is to certify that the following candidate has completed the mock test</p>\n",
    );
    html.push_str("</header>\n");

    // Candidate information grid
    html.push_str("<section class=\"info\">\n<h3>Candidate Information</h3>\n");
    match &result.candidate {
        Some(candidate) => {
            html.push_str("<div class=\"info-grid\">\n");
            let mut item = |label: &str, value: Option<String>| {
                html.push_str(&format!(
                    "<div class=\"info-item\"><div class=\"label\">{}</div><div class=\"value\">{}</div></div>\n",
                    label,
                    html_escape(&value.unwrap_or_else(|| "-".into()))
                ));
            };
            item("Full Name", Some(candidate.name.clone()));
            item("Age", candidate.age.map(|a| format!("{a} years")));
            item("State", candidate.state.clone());
            item("Email", candidate.email.clone());
            item("Exam", candidate.exam.clone());
            item("Stream", candidate.stream.clone());
            item("Phone", candidate.phone.clone());
            item("Mock Test", Some(result.paper.name.clone()));
            html.push_str("</div>\n");
        }
        None => html.push_str("<p class=\"muted\">Candidate data not provided.</p>\n"),
    }
    html.push_str("</section>\n");

    // Score block
    html.push_str("<section class=\"score\">\n<h3>Your Test Results</h3>\n");
    html.push_str(&format!(
        "<div class=\"main-score\">{:.2}/{:.0}</div>\n",
        result.total_score, result.paper.max_marks
    ));
    html.push_str(&format!(
        "<div class=\"taken-at\">Test taken on: {}</div>\n",
        result.taken_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("<div class=\"score-details\">\n");
    html.push_str(&format!(
        "<div class=\"score-item\"><div class=\"number\">{:.2}</div><div class=\"label\">Total Score</div></div>\n",
        result.total_score
    ));
    html.push_str(&format!(
        "<div class=\"score-item\"><div class=\"number\">{:.1}%</div><div class=\"label\">Percentage</div></div>\n",
        result.percentage()
    ));
    let correct: u32 = result.sections.iter().map(|s| s.score.correct).sum();
    let attempted: u32 = result.sections.iter().map(|s| s.score.attempted).sum();
    html.push_str(&format!(
        "<div class=\"score-item\"><div class=\"number\">{correct}/{attempted}</div><div class=\"label\">Correct / Attempted</div></div>\n",
    ));
    html.push_str("</div>\n");
    html.push_str(&format!(
        "<div class=\"badge {}\">{}</div>\n",
        band_class(result.band()),
        result.band()
    ));
    html.push_str("</section>\n");

    // Per-section table
    html.push_str("<section class=\"sections\">\n<h3>Sections</h3>\n");
    html.push_str("<table>\n<thead><tr><th>Section</th><th>Questions</th><th>Attempted</th><th>Correct</th><th>Score</th></tr></thead>\n<tbody>\n");
    for section in &result.sections {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{:.2}</td></tr>\n",
            html_escape(&section.section_name),
            section.total_questions,
            section.score.attempted,
            section.score.correct,
            section.score.score
        ));
    }
    html.push_str("</tbody></table>\n</section>\n");

    html.push_str("<footer>\n");
    html.push_str(
        "<p>Great job completing your mock test! No matter the score, it reflects your current progress.</p>\n",
    );
    html.push_str("</footer>\n");

    html.push_str("</div>\n</body>\n</html>");
    html
}

/// Write an HTML result card to a file.
pub fn write_html_card(result: &ExamResult, path: &Path) -> Result<()> {
    let html = generate_html(result);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --accent: #6d28d9; --muted: #6b7280; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --accent: #a78bfa; --muted: #9ca3af; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
.card { max-width: 720px; margin: 0 auto; border: 1px solid var(--border); border-radius: 12px; padding: 2rem; }
header { text-align: center; }
h1 { margin: 0; }
h2 { margin: 0.5rem 0 0; color: var(--accent); }
.certificate { color: var(--muted); }
.info-grid { display: grid; grid-template-columns: 1fr 1fr; gap: 0.75rem; }
.info-item .label { font-size: 0.75rem; text-transform: uppercase; color: var(--muted); }
.info-item .value { font-weight: 600; }
.score { text-align: center; margin-top: 1.5rem; }
.main-score { font-size: 3rem; font-weight: 800; color: var(--accent); }
.taken-at { color: var(--muted); font-size: 0.9rem; }
.score-details { display: flex; justify-content: center; gap: 2rem; margin: 1rem 0; }
.score-item .number { font-size: 1.4rem; font-weight: 700; }
.score-item .label { font-size: 0.8rem; color: var(--muted); }
.badge { display: inline-block; padding: 0.4rem 1.2rem; border-radius: 999px; font-weight: 700; }
.badge.excellent { background: #dcfce7; color: #166534; }
.badge.good { background: #dbeafe; color: #1e40af; }
.badge.average { background: #fef9c3; color: #854d0e; }
.badge.needs-improvement { background: #fde2e2; color: #991b1b; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); }
footer { text-align: center; color: var(--muted); margin-top: 1.5rem; }
.muted { color: var(--muted); }
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use mockexam_core::model::Candidate;
    use mockexam_core::result::{PaperSummary, SectionResult};
    use mockexam_core::scoring::SectionScore;

    fn make_result(candidate: Option<Candidate>) -> ExamResult {
        ExamResult {
            attempt_id: uuid::Uuid::nil(),
            taken_at: Utc::now(),
            paper: PaperSummary {
                id: "mock-1".into(),
                name: "Mock Test 1".into(),
                max_marks: 200.0,
            },
            candidate,
            sections: vec![SectionResult {
                section_id: "A".into(),
                section_name: "Section A".into(),
                total_questions: 100,
                score: SectionScore {
                    score: 85.5,
                    correct: 90,
                    attempted: 98,
                },
                categories: vec![],
            }],
            total_score: 85.5,
        }
    }

    #[test]
    fn card_contains_required_elements() {
        let candidate = Candidate {
            name: "A. Candidate <script>".into(),
            age: Some(18),
            ..Candidate::default()
        };
        let html = generate_html(&make_result(Some(candidate)));

        assert!(html.contains("<html"));
        assert!(html.contains("</html>"));
        assert!(html.contains("Mock Test 1"));
        assert!(html.contains("85.50/200"));
        assert!(html.contains("18 years"));
        // Candidate input is escaped.
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn card_without_candidate_shows_placeholder() {
        let html = generate_html(&make_result(None));
        assert!(html.contains("Candidate data not provided"));
    }

    #[test]
    fn card_write_to_file() {
        let result = make_result(None);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("card.html");

        write_html_card(&result, &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<html"));
    }
}
