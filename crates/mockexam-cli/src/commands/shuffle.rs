//! The `mockexam shuffle` command.

use std::path::PathBuf;

use anyhow::Result;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use mockexam_core::model::ExamForm;
use mockexam_core::parser;
use mockexam_core::shuffle::assemble_form;

pub fn execute(
    paper_path: PathBuf,
    section: Option<String>,
    seed: Option<u64>,
    output: Option<PathBuf>,
) -> Result<()> {
    let paper = parser::parse_paper(&paper_path)?;

    let mut rng: Box<dyn RngCore> = match seed {
        Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
        None => Box::new(rand::thread_rng()),
    };

    let sections: Vec<&mockexam_core::model::Section> = match &section {
        Some(id) => {
            let found = paper
                .sections
                .iter()
                .find(|s| &s.id == id)
                .ok_or_else(|| anyhow::anyhow!("paper has no section '{id}'"))?;
            vec![found]
        }
        None => paper.sections.iter().collect(),
    };

    let forms: Vec<ExamForm> = sections
        .iter()
        .map(|s| assemble_form(s, paper.questions_per_section, &mut rng))
        .collect();

    let json = serde_json::to_string_pretty(&forms)?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, json)?;
            eprintln!("Form written to: {}", path.display());
        }
        None => println!("{json}"),
    }

    Ok(())
}
