//! Core data model types for mockexam.
//!
//! These are the fundamental types that the entire mockexam system uses
//! to represent questions, papers, candidates, and assembled exam forms.

use serde::{Deserialize, Serialize};

/// A single multiple-choice question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// The question text shown to the candidate.
    #[serde(alias = "question")]
    pub text: String,
    /// Ordered list of option strings.
    pub options: Vec<String>,
    /// Index of the correct option.
    pub answer: usize,
    /// Optional image reference (diagram, reaction, circuit).
    #[serde(default)]
    pub image: Option<String>,
    /// Optional shared reading passage.
    #[serde(default)]
    pub paragraph: Option<String>,
    /// Optional group identifier linking questions that must stay
    /// adjacent through shuffling (e.g. one passage, several questions).
    #[serde(default, alias = "groupId")]
    pub group: Option<String>,
}

impl Question {
    /// Whether this question belongs to a shuffle group.
    ///
    /// An empty-string identifier counts as absence of grouping; paper
    /// validation warns about it so authors notice.
    pub fn group_id(&self) -> Option<&str> {
        self.group.as_deref().filter(|g| !g.is_empty())
    }
}

/// A subject bucket within a section (e.g. "english", "physics").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier within the section.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// The questions in this category, in authored order.
    #[serde(default)]
    pub questions: Vec<Question>,
}

/// One timed section of a paper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    /// Unique identifier within the paper (e.g. "A").
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Subject buckets, in the order they appear on the form.
    #[serde(default)]
    pub categories: Vec<Category>,
}

impl Section {
    /// Total number of questions across all categories.
    pub fn question_count(&self) -> usize {
        self.categories.iter().map(|c| c.questions.len()).sum()
    }

    /// Build the unshuffled form: categories concatenated in authored
    /// order, truncated to `questions_per_section`. This is the order an
    /// externally-recorded answer sheet is graded against.
    pub fn form_in_order(&self, questions_per_section: usize) -> ExamForm {
        let mut questions: Vec<FormQuestion> = self
            .categories
            .iter()
            .flat_map(|category| {
                category.questions.iter().map(|question| FormQuestion {
                    category_id: category.id.clone(),
                    question: question.clone(),
                })
            })
            .collect();
        questions.truncate(questions_per_section);

        ExamForm {
            section_id: self.id.clone(),
            section_name: self.name.clone(),
            questions,
        }
    }
}

/// A complete question paper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paper {
    /// Unique identifier for this paper.
    pub id: String,
    /// Human-readable name (appears on the result card).
    pub name: String,
    /// Description of this paper.
    #[serde(default)]
    pub description: String,
    /// The sections of this paper.
    #[serde(default)]
    pub sections: Vec<Section>,
    /// Total exam duration in minutes.
    #[serde(default = "default_duration_minutes")]
    pub duration_minutes: u64,
    /// How many questions each assembled form carries per section.
    #[serde(default = "default_questions_per_section")]
    pub questions_per_section: usize,
    /// When this paper becomes available to candidates. Absent means
    /// available immediately.
    #[serde(default)]
    pub release_at: Option<chrono::DateTime<chrono::Utc>>,
}

fn default_duration_minutes() -> u64 {
    180
}

fn default_questions_per_section() -> usize {
    100
}

impl Paper {
    /// Maximum attainable marks: one mark per form question.
    pub fn max_marks(&self) -> f64 {
        (self.sections.len() * self.questions_per_section) as f64
    }

    /// Whether candidates can take this paper at `now`.
    pub fn is_available(&self, now: chrono::DateTime<chrono::Utc>) -> bool {
        self.release_at.map_or(true, |release| now >= release)
    }
}

/// Registration record carried onto the result card.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Candidate {
    /// Full name.
    pub name: String,
    /// Age in years.
    #[serde(default)]
    pub age: Option<u32>,
    /// State of residence.
    #[serde(default)]
    pub state: Option<String>,
    /// Contact email.
    #[serde(default)]
    pub email: Option<String>,
    /// Contact phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Target examination (e.g. "IMUCET").
    #[serde(default)]
    pub exam: Option<String>,
    /// Chosen stream/option within the examination.
    #[serde(default)]
    pub stream: Option<String>,
}

/// Marks awarded per question outcome.
///
/// Skipped questions always score zero; they are not part of the scheme.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkingScheme {
    /// Marks for a correct answer.
    pub correct_marks: f64,
    /// Marks for a wrong attempt (negative marking).
    pub wrong_marks: f64,
}

impl Default for MarkingScheme {
    fn default() -> Self {
        Self {
            correct_marks: 1.0,
            wrong_marks: -0.25,
        }
    }
}

/// A question placed on an assembled form, tagged with the category it
/// came from so results can be broken down per subject after shuffling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormQuestion {
    /// Id of the category this question was drawn from.
    pub category_id: String,
    /// The question itself.
    #[serde(flatten)]
    pub question: Question,
}

/// A shuffled, truncated exam form for one section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamForm {
    /// Id of the section this form was assembled from.
    pub section_id: String,
    /// Human-readable section name.
    pub section_name: String,
    /// The questions in presentation order.
    pub questions: Vec<FormQuestion>,
}

impl ExamForm {
    /// Number of questions on the form.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Whether the form carries no questions.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}
