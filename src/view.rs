//! Rendering seam between the engines and whatever draws them.
//!
//! The DOM implementation lives in `web.rs`; tests use a recording view.

use crate::effects::ConfettiPiece;
use crate::game::{PlayArea, Target};
use crate::pages::Page;
use crate::questions::QuizItem;

/// Highlight applied to an answer button after submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionState {
    Neutral,
    Correct,
    Wrong,
}

impl OptionState {
    /// CSS class for the state, if any.
    pub fn class(self) -> Option<&'static str> {
        match self {
            OptionState::Neutral => None,
            OptionState::Correct => Some("correct"),
            OptionState::Wrong => Some("wrong"),
        }
    }
}

pub trait View {
    fn show_page(&mut self, page: Page);

    /// Load a fresh question: image, prompt, labels in order, progress
    /// `index + 1`. Clears all highlights, enables the options and hides the
    /// continue button.
    fn render_question(&mut self, index: usize, total: usize, item: &QuizItem);

    fn render_option_state(&mut self, option: usize, state: OptionState);

    /// Enable or disable all answer buttons.
    fn set_options_enabled(&mut self, enabled: bool);

    fn set_continue_visible(&mut self, visible: bool);

    /// Current size of the play area. Only meaningful while the game page
    /// is visible.
    fn play_area(&self) -> PlayArea;

    fn render_game_hud(&mut self, hearts: usize, total: usize, seconds_left: u32);

    /// Drop whatever the previous game left in the play area.
    fn reset_play_area(&mut self);

    /// Called on game start and after every frame or collect.
    fn render_targets(&mut self, targets: &[Target]);

    fn spawn_confetti(&mut self, pieces: &[ConfettiPiece], lifetime_ms: i32);

    fn clear_confetti(&mut self);
}
