//! In-memory `View` that records what the engines asked it to draw.
//! Used by unit and integration tests; never touches the DOM.

use crate::effects::ConfettiPiece;
use crate::game::{PlayArea, Target};
use crate::pages::Page;
use crate::questions::{OPTION_COUNT, QuizItem};
use crate::view::{OptionState, View};

#[derive(Debug)]
pub struct RecordingView {
    pub pages: Vec<Page>,
    /// (index, total) of the last rendered question.
    pub question: Option<(usize, usize)>,
    pub labels: Vec<String>,
    pub option_states: [OptionState; OPTION_COUNT],
    pub options_enabled: bool,
    pub continue_visible: bool,
    /// (hearts, total, seconds left) of the last HUD update.
    pub hud: Option<(usize, usize, u32)>,
    pub area: PlayArea,
    pub targets: Vec<Target>,
    pub target_renders: usize,
    pub confetti: Vec<ConfettiPiece>,
    pub confetti_cleared: usize,
}

impl Default for RecordingView {
    fn default() -> Self {
        Self {
            pages: Vec::new(),
            question: None,
            labels: Vec::new(),
            option_states: [OptionState::Neutral; OPTION_COUNT],
            options_enabled: false,
            continue_visible: false,
            hud: None,
            area: PlayArea::new(400.0, 300.0),
            targets: Vec::new(),
            target_renders: 0,
            confetti: Vec::new(),
            confetti_cleared: 0,
        }
    }
}

impl RecordingView {
    pub fn current_page(&self) -> Option<Page> {
        self.pages.last().copied()
    }
}

impl View for RecordingView {
    fn show_page(&mut self, page: Page) {
        self.pages.push(page);
    }

    fn render_question(&mut self, index: usize, total: usize, item: &QuizItem) {
        self.question = Some((index, total));
        self.labels = item.options.iter().map(|s| s.to_string()).collect();
        self.option_states = [OptionState::Neutral; OPTION_COUNT];
    }

    fn render_option_state(&mut self, option: usize, state: OptionState) {
        self.option_states[option] = state;
    }

    fn set_options_enabled(&mut self, enabled: bool) {
        self.options_enabled = enabled;
    }

    fn set_continue_visible(&mut self, visible: bool) {
        self.continue_visible = visible;
    }

    fn play_area(&self) -> PlayArea {
        self.area
    }

    fn render_game_hud(&mut self, hearts: usize, total: usize, seconds_left: u32) {
        self.hud = Some((hearts, total, seconds_left));
    }

    fn reset_play_area(&mut self) {
        self.targets.clear();
        self.target_renders = 0;
    }

    fn render_targets(&mut self, targets: &[Target]) {
        self.targets = targets.to_vec();
        self.target_renders += 1;
    }

    fn spawn_confetti(&mut self, pieces: &[ConfettiPiece], _lifetime_ms: i32) {
        self.confetti.extend_from_slice(pieces);
    }

    fn clear_confetti(&mut self) {
        self.confetti.clear();
        self.confetti_cleared += 1;
    }
}
