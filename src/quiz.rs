//! Quiz engine.
//!
//! `NotStarted -> Presenting(i) -> Evaluated(i) -> Presenting(i+1) | Finished`.
//! The engine only knows about the question bank and the view; what happens
//! after `Finished` (mini-game or fail page) is decided by `App`.

use std::fmt;

use crate::error::GameError;
use crate::questions::{OPTION_COUNT, QuizItem};
use crate::view::{OptionState, View};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizState {
    NotStarted,
    Presenting(usize),
    Evaluated(usize),
    Finished,
}

impl fmt::Display for QuizState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizState::NotStarted => f.write_str("quiz not started"),
            QuizState::Presenting(i) => write!(f, "presenting question {}", i + 1),
            QuizState::Evaluated(i) => write!(f, "question {} already answered", i + 1),
            QuizState::Finished => f.write_str("quiz finished"),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct QuizSession {
    pub current_index: usize,
    pub score: u32,
}

/// Result of `advance`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Advance {
    Next(usize),
    Finished { score: u32, passed: bool },
}

pub struct QuizEngine {
    items: &'static [QuizItem],
    pass_threshold: u32,
    session: QuizSession,
    state: QuizState,
}

impl QuizEngine {
    pub fn new(items: &'static [QuizItem], pass_threshold: u32) -> Self {
        Self { items, pass_threshold, session: QuizSession::default(), state: QuizState::NotStarted }
    }

    pub fn state(&self) -> QuizState {
        self.state
    }

    pub fn session(&self) -> QuizSession {
        self.session
    }

    pub fn question_count(&self) -> usize {
        self.items.len()
    }

    pub fn start(&mut self, view: &mut impl View) {
        self.session = QuizSession::default();
        log::info!("quiz started ({} questions)", self.items.len());
        self.load_question(0, view);
    }

    /// Same as `start`; valid from any state.
    pub fn restart(&mut self, view: &mut impl View) {
        self.start(view);
    }

    fn load_question(&mut self, index: usize, view: &mut impl View) {
        self.session.current_index = index;
        match self.items.get(index) {
            Some(item) => {
                view.render_question(index, self.items.len(), item);
                view.set_options_enabled(true);
                view.set_continue_visible(false);
                self.state = QuizState::Presenting(index);
            }
            // Empty bank: nothing to present.
            None => self.state = QuizState::Finished,
        }
    }

    /// Evaluate `option` for the current question. Returns whether it was
    /// correct. Only the first submission per question counts.
    pub fn submit_answer(&mut self, option: usize, view: &mut impl View) -> Result<bool, GameError> {
        let QuizState::Presenting(index) = self.state else {
            return Err(GameError::stale("submit_answer", self.state));
        };
        if option >= OPTION_COUNT {
            return Err(GameError::InvalidOptionIndex { index: option });
        }
        let item = &self.items[index];
        view.set_options_enabled(false);
        let correct = option == item.correct;
        if correct {
            self.session.score += 1;
            view.render_option_state(option, OptionState::Correct);
        } else {
            view.render_option_state(option, OptionState::Wrong);
            view.render_option_state(item.correct, OptionState::Correct);
        }
        log::debug!("question {}: option {} correct={}", index + 1, option, correct);
        view.set_continue_visible(true);
        self.state = QuizState::Evaluated(index);
        Ok(correct)
    }

    pub fn advance(&mut self, view: &mut impl View) -> Result<Advance, GameError> {
        let QuizState::Evaluated(index) = self.state else {
            return Err(GameError::stale("advance", self.state));
        };
        let next = index + 1;
        if next < self.items.len() {
            self.load_question(next, view);
            return Ok(Advance::Next(next));
        }
        self.state = QuizState::Finished;
        let score = self.session.score;
        let passed = score >= self.pass_threshold;
        log::info!("quiz finished: {}/{} (passed={})", score, self.items.len(), passed);
        Ok(Advance::Finished { score, passed })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questions::QUIZ_ITEMS;
    use crate::testing::RecordingView;

    fn engine() -> (QuizEngine, RecordingView) {
        let mut view = RecordingView::default();
        let mut quiz = QuizEngine::new(QUIZ_ITEMS, 4);
        quiz.start(&mut view);
        (quiz, view)
    }

    #[test]
    fn start_presents_first_question_unhighlighted() {
        let (quiz, view) = engine();
        assert_eq!(quiz.state(), QuizState::Presenting(0));
        assert_eq!(view.question, Some((0, 6)));
        assert_eq!(view.labels, QUIZ_ITEMS[0].options.map(String::from).to_vec());
        assert!(view.option_states.iter().all(|s| *s == OptionState::Neutral));
        assert!(view.options_enabled);
        assert!(!view.continue_visible);
    }

    #[test]
    fn wrong_answer_highlights_both() {
        let (mut quiz, mut view) = engine();
        assert_eq!(quiz.submit_answer(3, &mut view), Ok(false));
        assert_eq!(view.option_states[3], OptionState::Wrong);
        assert_eq!(view.option_states[1], OptionState::Correct);
        assert_eq!(quiz.session().score, 0);
        assert!(view.continue_visible);
        assert!(!view.options_enabled);
    }

    #[test]
    fn second_submission_is_stale_noop() {
        let (mut quiz, mut view) = engine();
        quiz.submit_answer(1, &mut view).unwrap();
        let before = view.option_states;
        let err = quiz.submit_answer(2, &mut view).unwrap_err();
        assert!(err.is_stale());
        assert_eq!(quiz.session().score, 1);
        assert_eq!(view.option_states, before);
    }

    #[test]
    fn out_of_range_option_rejected_without_change() {
        let (mut quiz, mut view) = engine();
        assert_eq!(
            quiz.submit_answer(4, &mut view),
            Err(GameError::InvalidOptionIndex { index: 4 })
        );
        assert_eq!(quiz.state(), QuizState::Presenting(0));
        assert!(view.options_enabled);
    }

    #[test]
    fn advance_requires_answer() {
        let (mut quiz, mut view) = engine();
        assert!(quiz.advance(&mut view).unwrap_err().is_stale());
        quiz.submit_answer(0, &mut view).unwrap();
        assert_eq!(quiz.advance(&mut view), Ok(Advance::Next(1)));
        assert!(view.option_states.iter().all(|s| *s == OptionState::Neutral));
    }

    #[test]
    fn restart_resets_session() {
        let (mut quiz, mut view) = engine();
        quiz.submit_answer(1, &mut view).unwrap();
        quiz.advance(&mut view).unwrap();
        quiz.restart(&mut view);
        assert_eq!(quiz.session(), QuizSession { current_index: 0, score: 0 });
        assert_eq!(quiz.state(), QuizState::Presenting(0));
    }
}
