//! Victory screen confetti. Purely cosmetic: no gameplay state depends on it.

use rand::Rng;

use crate::config::GameConfig;
use crate::error::GameError;
use crate::pages::{Page, PageNavigator};
use crate::view::View;

/// Placement of one confetti particle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConfettiPiece {
    /// Horizontal start in percent of viewport width.
    pub left_vw: f64,
    pub delay_s: f64,
}

pub struct Celebration {
    count: usize,
    lifetime_ms: i32,
    max_delay_s: f64,
}

impl Celebration {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            count: config.confetti_count,
            lifetime_ms: config.confetti_lifetime_ms,
            max_delay_s: config.confetti_max_delay_s,
        }
    }

    pub fn burst(&self, rng: &mut impl Rng) -> Vec<ConfettiPiece> {
        (0..self.count)
            .map(|_| ConfettiPiece {
                left_vw: rng.gen_range(0.0..=100.0),
                delay_s: rng.gen_range(0.0..=self.max_delay_s),
            })
            .collect()
    }

    /// Show the final page and throw confetti. The view removes each piece
    /// once `lifetime_ms` has passed.
    pub fn celebrate(
        &self,
        nav: &mut PageNavigator,
        rng: &mut impl Rng,
        view: &mut impl View,
    ) -> Result<(), GameError> {
        nav.navigate(Page::Final, view)?;
        let pieces = self.burst(rng);
        log::debug!("confetti burst of {}", pieces.len());
        view.spawn_confetti(&pieces, self.lifetime_ms);
        Ok(())
    }

    /// Back to the intro, sweeping up pieces whose lifetime has not elapsed.
    pub fn reset(&self, nav: &mut PageNavigator, view: &mut impl View) -> Result<(), GameError> {
        nav.navigate(Page::Intro, view)?;
        view.clear_confetti();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingView;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn celebrate_spawns_fifty_within_ranges() {
        let fx = Celebration::new(&GameConfig::default());
        let mut view = RecordingView::default();
        let mut nav = PageNavigator::default();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        fx.celebrate(&mut nav, &mut rng, &mut view).unwrap();
        assert_eq!(nav.active(), Page::Final);
        assert_eq!(view.current_page(), Some(Page::Final));
        assert_eq!(view.confetti.len(), 50);
        assert!(view.confetti.iter().all(|c| (0.0..=100.0).contains(&c.left_vw)
            && (0.0..=3.0).contains(&c.delay_s)));
    }

    #[test]
    fn reset_clears_lingering_pieces() {
        let fx = Celebration::new(&GameConfig::default());
        let mut view = RecordingView::default();
        let mut nav = PageNavigator::default();
        fx.celebrate(&mut nav, &mut ChaCha8Rng::seed_from_u64(4), &mut view).unwrap();
        fx.reset(&mut nav, &mut view).unwrap();
        assert_eq!(nav.active(), Page::Intro);
        assert!(view.confetti.is_empty());
        assert_eq!(view.current_page(), Some(Page::Intro));
    }
}
