//! Error type shared by the quiz, mini-game and page navigation.
//!
//! Nothing here is fatal: the worst case routes the player to the fail page,
//! from where a restart resets every engine.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// Requested page id is not one of the registered pages.
    #[error("unknown page '{0}'")]
    UnknownPage(String),

    /// Answer index outside the four options.
    #[error("option index {index} out of range (expected 0..4)")]
    InvalidOptionIndex { index: usize },

    /// Operation arrived in a state where it has no meaning (double submit,
    /// click on a collected heart, tick of a finished session...).
    #[error("'{action}' ignored while {state}")]
    StaleAction { action: &'static str, state: String },

    #[error("invalid configuration: {0}")]
    Config(String),

    /// Required element missing from the host page.
    #[error("dom: {0}")]
    Dom(String),
}

impl GameError {
    pub(crate) fn stale(action: &'static str, state: impl ToString) -> Self {
        GameError::StaleAction { action, state: state.to_string() }
    }

    /// Stale actions are expected from the UI (double clicks, late timers) and
    /// are dropped silently by the front-end.
    pub fn is_stale(&self) -> bool {
        matches!(self, GameError::StaleAction { .. })
    }
}

impl From<GameError> for wasm_bindgen::JsValue {
    fn from(err: GameError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_value() {
        assert_eq!(GameError::UnknownPage("lobby".into()).to_string(), "unknown page 'lobby'");
        assert!(GameError::InvalidOptionIndex { index: 7 }.to_string().contains('7'));
    }

    #[test]
    fn only_stale_actions_are_stale() {
        assert!(GameError::stale("collect", "game over").is_stale());
        assert!(!GameError::Dom("no window".into()).is_stale());
    }
}
