//! Group-aware question shuffling and exam-form assembly.
//!
//! Shuffling operates on *blocks*: questions sharing a group identifier
//! (one reading passage, several questions) form a single block and stay
//! contiguous, in their authored order, wherever the block lands. Ungrouped
//! questions are singleton blocks. The block list gets an unbiased
//! Fisher–Yates permutation, so every block ordering is equally likely
//! given a uniform random source.
//!
//! All entry points take a caller-supplied [`Rng`] so tests can seed a
//! [`rand::rngs::StdRng`] and reproduce a permutation exactly; production
//! callers hand in [`rand::thread_rng`].

use std::collections::HashMap;

use rand::Rng;

use crate::model::{ExamForm, FormQuestion, Question, Section};

/// Fisher–Yates permutation of a slice, in place.
pub fn shuffle_in_place<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// Shuffle `items` while keeping same-group runs contiguous.
///
/// `group_key` returns the group identifier of an item, or `None` for an
/// ungrouped item. Grouped items are collected into one block per distinct
/// identifier, in first-seen order, preserving their relative input order
/// inside the block; every ungrouped item is its own block. The block list
/// is then Fisher–Yates-permuted and flattened.
///
/// Every input item appears exactly once in the output. An empty or
/// single-block input comes back unchanged.
pub fn shuffle_with_groups<T, K, R>(items: Vec<T>, group_key: K, rng: &mut R) -> Vec<T>
where
    K: Fn(&T) -> Option<&str>,
    R: Rng + ?Sized,
{
    let mut grouped: Vec<Vec<T>> = Vec::new();
    let mut group_index: HashMap<String, usize> = HashMap::new();
    let mut singles: Vec<T> = Vec::new();

    for item in items {
        match group_key(&item).map(str::to_owned) {
            Some(id) => {
                let idx = *group_index.entry(id).or_insert_with(|| {
                    grouped.push(Vec::new());
                    grouped.len() - 1
                });
                grouped[idx].push(item);
            }
            None => singles.push(item),
        }
    }

    let mut blocks: Vec<Vec<T>> = grouped;
    blocks.extend(singles.into_iter().map(|item| vec![item]));

    shuffle_in_place(&mut blocks, rng);

    blocks.into_iter().flatten().collect()
}

/// Group-aware shuffle of questions, keyed by [`Question::group_id`].
///
/// Empty-string group identifiers count as absence of grouping, so they
/// are never coalesced into one block.
pub fn shuffle_questions<R: Rng + ?Sized>(questions: Vec<Question>, rng: &mut R) -> Vec<Question> {
    shuffle_with_groups(questions, Question::group_id, rng)
}

/// Assemble a randomized exam form for one section.
///
/// Each category is shuffled group-aware on its own, the shuffled
/// categories are concatenated in authored order, and the result is
/// truncated to `questions_per_section`. Truncation is blind to block
/// boundaries; contiguity is a guarantee of the shuffle, not the cut.
pub fn assemble_form<R: Rng + ?Sized>(
    section: &Section,
    questions_per_section: usize,
    rng: &mut R,
) -> ExamForm {
    let mut questions: Vec<FormQuestion> = Vec::with_capacity(section.question_count());

    for category in &section.categories {
        let shuffled = shuffle_questions(category.questions.clone(), rng);
        questions.extend(shuffled.into_iter().map(|question| FormQuestion {
            category_id: category.id.clone(),
            question,
        }));
    }

    questions.truncate(questions_per_section);

    ExamForm {
        section_id: section.id.clone(),
        section_name: section.name.clone(),
        questions,
    }
}
