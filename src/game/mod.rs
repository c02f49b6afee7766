//! Find-the-hearts mini-game.
//!
//! A session spawns a fixed number of hearts that drift around the play area
//! while a countdown runs. Collect them all before it hits zero to win.
//!
//! Every entry point takes the `SessionId` returned by `start`. Timer and
//! frame callbacks from a previous session carry an old id and are turned
//! away, so a restart can never be corrupted by a loop that outlived its game.

use std::fmt;

use rand::Rng;

use crate::config::GameConfig;
use crate::error::GameError;
use crate::view::View;

mod target;

pub use target::{PlayArea, Target};

pub type SessionId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    Won,
    Lost,
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GameStatus::Running => "game running",
            GameStatus::Won => "game already won",
            GameStatus::Lost => "game already lost",
        })
    }
}

#[derive(Clone, Debug)]
pub struct GameSession {
    pub id: SessionId,
    pub hearts_collected: usize,
    pub time_remaining: u32,
    pub targets: Vec<Target>,
    pub status: GameStatus,
    bounds: (f64, f64),
}

impl GameSession {
    pub fn bounds(&self) -> (f64, f64) {
        self.bounds
    }
}

pub struct MiniGame {
    target_count: usize,
    target_size: f64,
    countdown_seconds: u32,
    session: Option<GameSession>,
    next_id: SessionId,
}

impl MiniGame {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            target_count: config.target_count,
            target_size: config.target_size,
            countdown_seconds: config.countdown_seconds,
            session: None,
            next_id: 1,
        }
    }

    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    pub fn target_count(&self) -> usize {
        self.target_count
    }

    /// Replace any previous session with a fresh one and draw the initial
    /// layout. The caller is expected to start the countdown and frame loop
    /// for the returned id.
    pub fn start(&mut self, area: PlayArea, rng: &mut impl Rng, view: &mut impl View) -> SessionId {
        let id = self.next_id;
        self.next_id += 1;
        let bounds = area.bounds(self.target_size);
        let targets: Vec<Target> = (0..self.target_count).map(|_| Target::spawn(rng, bounds)).collect();
        let session = GameSession {
            id,
            hearts_collected: 0,
            time_remaining: self.countdown_seconds,
            targets,
            status: GameStatus::Running,
            bounds,
        };
        log::info!("game session {} started in {}x{} area", id, area.width, area.height);
        view.reset_play_area();
        view.render_game_hud(0, self.target_count, session.time_remaining);
        view.render_targets(&session.targets);
        self.session = Some(session);
        id
    }

    /// Drop the current session; outstanding timers become stale.
    pub fn abort(&mut self) {
        if let Some(s) = self.session.take() {
            log::debug!("game session {} dropped ({})", s.id, s.status);
        }
    }

    fn running(&mut self, id: SessionId, action: &'static str) -> Result<&mut GameSession, GameError> {
        match self.session.as_mut() {
            Some(s) if s.id == id && s.status == GameStatus::Running => Ok(s),
            Some(s) if s.id == id => Err(GameError::stale(action, s.status)),
            _ => Err(GameError::stale(action, format_args!("session {id} ended"))),
        }
    }

    /// One countdown period elapsed. Returns `Lost` when time ran out.
    pub fn tick_countdown(&mut self, id: SessionId, view: &mut impl View) -> Result<GameStatus, GameError> {
        let total = self.target_count;
        let session = self.running(id, "countdown")?;
        session.time_remaining = session.time_remaining.saturating_sub(1);
        view.render_game_hud(session.hearts_collected, total, session.time_remaining);
        if session.time_remaining == 0 {
            session.status = GameStatus::Lost;
            log::info!(
                "game session {} timed out with {}/{} hearts",
                id, session.hearts_collected, total
            );
        }
        Ok(session.status)
    }

    /// Advance every uncollected heart by one frame. Returns false once the
    /// frame loop for `id` should stop.
    pub fn step(&mut self, id: SessionId, view: &mut impl View) -> bool {
        let Ok(session) = self.running(id, "frame") else {
            return false;
        };
        let bounds = session.bounds;
        for t in session.targets.iter_mut() {
            t.step(bounds);
        }
        view.render_targets(&session.targets);
        true
    }

    /// Click on heart `index`. Returns `Won` when it was the last one.
    pub fn collect(&mut self, id: SessionId, index: usize, view: &mut impl View) -> Result<GameStatus, GameError> {
        let total = self.target_count;
        let session = self.running(id, "collect")?;
        let Some(target) = session.targets.get_mut(index) else {
            return Err(GameError::stale("collect", format_args!("no heart #{index}")));
        };
        if target.collected {
            return Err(GameError::stale("collect", format_args!("heart #{index} already collected")));
        }
        target.collected = true;
        session.hearts_collected += 1;
        view.render_targets(&session.targets);
        view.render_game_hud(session.hearts_collected, total, session.time_remaining);
        if session.hearts_collected == total {
            session.status = GameStatus::Won;
            log::info!("game session {} won with {}s left", id, session.time_remaining);
        }
        Ok(session.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingView;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn started() -> (MiniGame, SessionId, RecordingView) {
        let mut view = RecordingView::default();
        let mut game = MiniGame::new(&GameConfig::default());
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let id = game.start(PlayArea::new(400.0, 300.0), &mut rng, &mut view);
        (game, id, view)
    }

    #[test]
    fn start_spawns_five_in_bounds() {
        let (game, _, view) = started();
        let s = game.session().unwrap();
        assert_eq!(s.targets.len(), 5);
        assert_eq!(s.time_remaining, 30);
        for t in &s.targets {
            assert!((0.0..=360.0).contains(&t.x) && (0.0..=260.0).contains(&t.y));
            assert!((-1.0..=1.0).contains(&t.vx) && (-1.0..=1.0).contains(&t.vy));
        }
        assert_eq!(view.hud, Some((0, 5, 30)));
    }

    #[test]
    fn double_collect_is_noop() {
        let (mut game, id, mut view) = started();
        assert_eq!(game.collect(id, 2, &mut view), Ok(GameStatus::Running));
        assert!(game.collect(id, 2, &mut view).unwrap_err().is_stale());
        assert_eq!(game.session().unwrap().hearts_collected, 1);
    }

    #[test]
    fn collected_heart_stops_moving() {
        let (mut game, id, mut view) = started();
        game.collect(id, 0, &mut view).unwrap();
        let frozen = game.session().unwrap().targets[0];
        for _ in 0..50 {
            assert!(game.step(id, &mut view));
        }
        assert_eq!(game.session().unwrap().targets[0], frozen);
    }

    #[test]
    fn timeout_after_countdown() {
        let (mut game, id, mut view) = started();
        for _ in 0..29 {
            assert_eq!(game.tick_countdown(id, &mut view), Ok(GameStatus::Running));
        }
        assert_eq!(game.tick_countdown(id, &mut view), Ok(GameStatus::Lost));
        assert!(game.tick_countdown(id, &mut view).is_err());
        assert!(game.collect(id, 0, &mut view).unwrap_err().is_stale());
        assert!(!game.step(id, &mut view));
    }

    #[test]
    fn win_suppresses_late_timeout() {
        let (mut game, id, mut view) = started();
        for _ in 0..29 {
            game.tick_countdown(id, &mut view).unwrap();
        }
        for i in 0..4 {
            assert_eq!(game.collect(id, i, &mut view), Ok(GameStatus::Running));
        }
        assert_eq!(game.collect(id, 4, &mut view), Ok(GameStatus::Won));
        assert!(game.tick_countdown(id, &mut view).unwrap_err().is_stale());
        assert_eq!(game.session().unwrap().status, GameStatus::Won);
    }

    #[test]
    fn stale_session_id_is_rejected() {
        let (mut game, old, mut view) = started();
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let new = game.start(PlayArea::new(400.0, 300.0), &mut rng, &mut view);
        assert_ne!(old, new);
        assert!(!game.step(old, &mut view));
        assert!(game.collect(old, 0, &mut view).is_err());
        assert_eq!(game.session().unwrap().hearts_collected, 0);
        game.abort();
        assert!(!game.step(new, &mut view));
    }
}
