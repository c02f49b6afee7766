// Question bank invariants.
// These tests are native-friendly and avoid wasm/browser APIs.

use std::collections::HashSet;

use heart_quiz::questions::{OPTION_COUNT, fallback_image};
use heart_quiz::QUIZ_ITEMS;

#[test]
fn bank_has_six_questions_in_order() {
    assert_eq!(QUIZ_ITEMS.len(), 6);
    for (i, q) in QUIZ_ITEMS.iter().enumerate() {
        assert_eq!(q.image, format!("images/memory{}.jpg", i + 1), "question {} out of order", i + 1);
    }
}

#[test]
fn every_question_is_well_formed() {
    for q in QUIZ_ITEMS {
        assert!(!q.prompt.is_empty(), "empty prompt for '{}'", q.image);
        assert!(q.correct < OPTION_COUNT, "correct index {} out of range for '{}'", q.correct, q.prompt);
        let unique: HashSet<&str> = q.options.iter().copied().collect();
        assert_eq!(unique.len(), OPTION_COUNT, "duplicate option in '{}'", q.prompt);
        assert!(q.options.iter().all(|o| !o.trim().is_empty()), "blank option in '{}'", q.prompt);
    }
}

#[test]
fn every_image_has_a_png_fallback() {
    for q in QUIZ_ITEMS {
        let alt = fallback_image(q.image).unwrap();
        assert!(alt.ends_with(".png"), "fallback '{}' for '{}'", alt, q.image);
    }
}
