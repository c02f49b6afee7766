//! Wires the engines together: quiz -> mini-game -> celebration, with the
//! fail page as the exit for a failed quiz or an expired countdown.
//!
//! `App` is backend agnostic. Every entry point returns a `Transition` so the
//! host knows when to arm or cancel its timers.

use rand::Rng;

use crate::config::GameConfig;
use crate::effects::Celebration;
use crate::error::GameError;
use crate::game::{GameStatus, MiniGame, SessionId};
use crate::pages::{Page, PageNavigator};
use crate::questions::{QUIZ_ITEMS, QuizItem};
use crate::quiz::{Advance, QuizEngine};
use crate::view::View;

/// What changed as a result of a user or timer event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Nothing the host needs to react to.
    Stay,
    Question(usize),
    /// Mini-game running; arm the countdown and frame loop for this session.
    GameStarted(SessionId),
    Failed,
    Victory,
    Intro,
}

impl Transition {
    /// Whether the countdown of the current session should keep running.
    pub fn keeps_countdown(self) -> bool {
        matches!(self, Transition::Stay)
    }
}

pub struct App<V: View, R: Rng> {
    config: GameConfig,
    nav: PageNavigator,
    quiz: QuizEngine,
    game: MiniGame,
    effects: Celebration,
    view: V,
    rng: R,
}

impl<V: View, R: Rng> App<V, R> {
    pub fn new(config: GameConfig, view: V, rng: R) -> Self {
        Self::with_questions(config, QUIZ_ITEMS, view, rng)
    }

    pub fn with_questions(config: GameConfig, items: &'static [QuizItem], view: V, rng: R) -> Self {
        Self {
            quiz: QuizEngine::new(items, config.pass_threshold),
            game: MiniGame::new(&config),
            effects: Celebration::new(&config),
            nav: PageNavigator::default(),
            config,
            view,
            rng,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn active_page(&self) -> Page {
        self.nav.active()
    }

    pub fn quiz(&self) -> &QuizEngine {
        &self.quiz
    }

    pub fn game(&self) -> &MiniGame {
        &self.game
    }

    pub fn show_page(&mut self, page_id: &str) -> Result<Page, GameError> {
        let page = page_id.parse::<Page>()?;
        self.nav.navigate(page, &mut self.view)
    }

    pub fn start_quiz(&mut self) -> Result<Transition, GameError> {
        self.game.abort();
        self.nav.navigate(Page::Quiz, &mut self.view)?;
        self.quiz.start(&mut self.view);
        Ok(Transition::Question(0))
    }

    /// Valid from the fail and final pages as well as mid-quiz.
    pub fn restart_quiz(&mut self) -> Result<Transition, GameError> {
        self.game.abort();
        self.nav.navigate(Page::Quiz, &mut self.view)?;
        self.quiz.restart(&mut self.view);
        Ok(Transition::Question(0))
    }

    pub fn submit_answer(&mut self, option: usize) -> Result<bool, GameError> {
        self.quiz.submit_answer(option, &mut self.view)
    }

    pub fn next_question(&mut self) -> Result<Transition, GameError> {
        match self.quiz.advance(&mut self.view)? {
            Advance::Next(i) => Ok(Transition::Question(i)),
            Advance::Finished { passed: true, .. } => self.start_game(),
            Advance::Finished { passed: false, .. } => {
                self.nav.navigate(Page::Fail, &mut self.view)?;
                Ok(Transition::Failed)
            }
        }
    }

    fn start_game(&mut self) -> Result<Transition, GameError> {
        // Page must be visible before measuring the play area.
        self.nav.navigate(Page::Game, &mut self.view)?;
        let area = self.view.play_area();
        let id = self.game.start(area, &mut self.rng, &mut self.view);
        Ok(Transition::GameStarted(id))
    }

    pub fn countdown_tick(&mut self, session: SessionId) -> Result<Transition, GameError> {
        match self.game.tick_countdown(session, &mut self.view)? {
            GameStatus::Lost => {
                self.nav.navigate(Page::Fail, &mut self.view)?;
                Ok(Transition::Failed)
            }
            GameStatus::Running | GameStatus::Won => Ok(Transition::Stay),
        }
    }

    /// One animation frame. False once the loop for `session` should stop.
    pub fn frame(&mut self, session: SessionId) -> bool {
        self.game.step(session, &mut self.view)
    }

    pub fn collect_heart(&mut self, session: SessionId, index: usize) -> Result<Transition, GameError> {
        match self.game.collect(session, index, &mut self.view)? {
            GameStatus::Won => {
                self.effects.celebrate(&mut self.nav, &mut self.rng, &mut self.view)?;
                Ok(Transition::Victory)
            }
            GameStatus::Running | GameStatus::Lost => Ok(Transition::Stay),
        }
    }

    pub fn restart_game(&mut self) -> Result<Transition, GameError> {
        self.game.abort();
        self.effects.reset(&mut self.nav, &mut self.view)?;
        Ok(Transition::Intro)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingView;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn app() -> App<RecordingView, ChaCha8Rng> {
        App::new(GameConfig::default(), RecordingView::default(), ChaCha8Rng::seed_from_u64(11))
    }

    fn play(app: &mut App<RecordingView, ChaCha8Rng>, answers: &[usize]) -> Transition {
        app.start_quiz().unwrap();
        let mut last = Transition::Stay;
        for &a in answers {
            app.submit_answer(a).unwrap();
            last = app.next_question().unwrap();
        }
        last
    }

    #[test]
    fn stale_tick_after_restart_does_not_touch_new_quiz() {
        let mut app = app();
        let Transition::GameStarted(id) = play(&mut app, &[1, 2, 0, 1, 1, 0]) else {
            panic!("quiz should pass");
        };
        app.restart_quiz().unwrap();
        assert!(app.countdown_tick(id).unwrap_err().is_stale());
        assert!(!app.frame(id));
        assert_eq!(app.active_page(), Page::Quiz);
    }

    #[test]
    fn show_page_by_id() {
        let mut app = app();
        assert_eq!(app.show_page("fail-page"), Ok(Page::Fail));
        assert!(app.show_page("nope").is_err());
        assert_eq!(app.active_page(), Page::Fail);
    }

    #[test]
    fn transitions_that_keep_countdown() {
        assert!(Transition::Stay.keeps_countdown());
        assert!(!Transition::Failed.keeps_countdown());
        assert!(!Transition::Victory.keeps_countdown());
    }
}
