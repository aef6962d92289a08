//! The `mockexam init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create mockexam.toml
    if std::path::Path::new("mockexam.toml").exists() {
        println!("mockexam.toml already exists, skipping.");
    } else {
        std::fs::write("mockexam.toml", SAMPLE_CONFIG)?;
        println!("Created mockexam.toml");
    }

    // Create example paper
    std::fs::create_dir_all("papers")?;
    let example_path = std::path::Path::new("papers/example.json");
    if example_path.exists() {
        println!("papers/example.json already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_PAPER)?;
        println!("Created papers/example.json");
    }

    println!("\nNext steps:");
    println!("  1. Edit mockexam.toml with your candidate details");
    println!("  2. Run: mockexam validate --paper papers/example.json");
    println!("  3. Run: mockexam shuffle --paper papers/example.json");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# mockexam configuration

papers_dir = "./papers"
output_dir = "./mockexam-results"

[candidate]
name = "Your Name"
# age = 18
# state = ""
# email = ""
# phone = ""
# exam = "IMUCET"
# stream = ""

# Uncomment to deviate from the standard +1 / -0.25 marking.
# [marking]
# correct_marks = 1.0
# wrong_marks = -0.25
"#;

const EXAMPLE_PAPER: &str = r#"{
  "id": "example",
  "name": "Example Mock Test",
  "description": "A small two-section paper to get started",
  "duration_minutes": 30,
  "questions_per_section": 3,
  "sections": [
    {
      "id": "A",
      "name": "Section A",
      "categories": [
        {
          "id": "english",
          "name": "English",
          "questions": [
            {
              "question": "The tide was ___ when the ship left the harbour.",
              "options": ["ebbing", "yawning", "braying", "creasing"],
              "answer": 0,
              "paragraph": "The harbour master watched the evening tide.",
              "groupId": "harbour"
            },
            {
              "question": "In the passage, who watched the tide?",
              "options": ["The captain", "The harbour master", "The pilot", "The cook"],
              "answer": 1,
              "paragraph": "The harbour master watched the evening tide.",
              "groupId": "harbour"
            },
            {
              "question": "Pick the synonym of 'vessel'.",
              "options": ["ship", "anchor", "wave", "port"],
              "answer": 0
            }
          ]
        }
      ]
    },
    {
      "id": "B",
      "name": "Section B",
      "categories": [
        {
          "id": "maths",
          "name": "Mathematics",
          "questions": [
            {
              "question": "12 x 12 = ?",
              "options": ["124", "144", "154", "164"],
              "answer": 1
            },
            {
              "question": "The square root of 81 is?",
              "options": ["7", "8", "9", "11"],
              "answer": 2
            },
            {
              "question": "15% of 200 is?",
              "options": ["20", "25", "30", "35"],
              "answer": 2
            }
          ]
        }
      ]
    }
  ]
}
"#;
