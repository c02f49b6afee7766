//! Gameplay tunables. `Default` reproduces the shipped game; the `serde_json`
//! feature lets the host page override individual values.

use crate::error::GameError;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Correct answers needed to unlock the mini-game.
    pub pass_threshold: u32,
    pub countdown_seconds: u32,
    pub countdown_period_ms: i32,
    pub target_count: usize,
    /// Edge length of a heart in px; positions are bounded by area - size.
    pub target_size: f64,
    pub confetti_count: usize,
    pub confetti_lifetime_ms: i32,
    pub confetti_max_delay_s: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            pass_threshold: 4,
            countdown_seconds: 30,
            countdown_period_ms: 1_000,
            target_count: 5,
            target_size: 40.0,
            confetti_count: 50,
            confetti_lifetime_ms: 3_000,
            confetti_max_delay_s: 3.0,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), GameError> {
        if self.target_count == 0 {
            return Err(GameError::Config("target_count must be at least 1".into()));
        }
        if self.countdown_seconds == 0 || self.countdown_period_ms <= 0 {
            return Err(GameError::Config("countdown must be positive".into()));
        }
        if !(self.target_size >= 0.0) || !(self.confetti_max_delay_s >= 0.0) {
            return Err(GameError::Config("sizes and delays must be non-negative".into()));
        }
        if self.confetti_lifetime_ms < 0 {
            return Err(GameError::Config("confetti_lifetime_ms must be non-negative".into()));
        }
        Ok(())
    }

    /// Parse a partial JSON override; missing keys keep their defaults.
    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let cfg: GameConfig =
            serde_json::from_str(json).map_err(|e| GameError::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }
}
