//! Page navigation: exactly one top-level page is active at any time.

use std::fmt;
use std::str::FromStr;

use crate::error::GameError;
use crate::view::View;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Page {
    Intro,
    Quiz,
    Fail,
    Game,
    Final,
}

impl Page {
    pub const ALL: [Page; 5] = [Page::Intro, Page::Quiz, Page::Fail, Page::Game, Page::Final];

    /// Element id of the page container in the host document.
    pub fn id(self) -> &'static str {
        match self {
            Page::Intro => "intro-page",
            Page::Quiz => "quiz-page",
            Page::Fail => "fail-page",
            Page::Game => "game-page",
            Page::Final => "final-page",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Page {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Page::ALL
            .into_iter()
            .find(|p| p.id() == s)
            .ok_or_else(|| GameError::UnknownPage(s.to_string()))
    }
}

/// Tracks which registered page is active.
#[derive(Clone, Debug)]
pub struct PageNavigator {
    registered: Vec<Page>,
    active: Page,
}

impl Default for PageNavigator {
    fn default() -> Self {
        Self::new(Page::ALL.to_vec())
    }
}

impl PageNavigator {
    /// The first registered page starts active (intro for the default set).
    pub fn new(registered: Vec<Page>) -> Self {
        let active = registered.first().copied().unwrap_or(Page::Intro);
        Self { registered, active }
    }

    pub fn active(&self) -> Page {
        self.active
    }

    pub fn is_registered(&self, page: Page) -> bool {
        self.registered.contains(&page)
    }

    /// Activate `page`, deactivating every other one.
    pub fn show(&mut self, page: Page) -> Result<Page, GameError> {
        if !self.is_registered(page) {
            return Err(GameError::UnknownPage(page.id().to_string()));
        }
        if self.active != page {
            log::debug!("page {} -> {}", self.active, page);
        }
        self.active = page;
        Ok(page)
    }

    /// `show` and mirror the change on the view.
    pub fn navigate(&mut self, page: Page, view: &mut impl View) -> Result<Page, GameError> {
        self.show(page)?;
        view.show_page(page);
        Ok(page)
    }

    /// String-keyed variant used by the JS surface.
    pub fn show_page(&mut self, page_id: &str) -> Result<Page, GameError> {
        let page = page_id.parse::<Page>()?;
        self.show(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_intro() {
        assert_eq!(PageNavigator::default().active(), Page::Intro);
    }

    #[test]
    fn show_page_switches_active() {
        let mut nav = PageNavigator::default();
        assert_eq!(nav.show_page("game-page"), Ok(Page::Game));
        assert_eq!(nav.active(), Page::Game);
    }

    #[test]
    fn unknown_id_leaves_state_untouched() {
        let mut nav = PageNavigator::default();
        nav.show(Page::Quiz).unwrap();
        assert_eq!(
            nav.show_page("settings-page"),
            Err(GameError::UnknownPage("settings-page".into()))
        );
        assert_eq!(nav.active(), Page::Quiz);
    }

    #[test]
    fn navigate_updates_view_only_on_success() {
        let mut nav = PageNavigator::new(vec![Page::Intro, Page::Fail]);
        let mut view = crate::testing::RecordingView::default();
        nav.navigate(Page::Fail, &mut view).unwrap();
        assert!(nav.navigate(Page::Game, &mut view).is_err());
        assert_eq!(view.pages, vec![Page::Fail]);
    }

    #[test]
    fn unregistered_page_is_rejected() {
        let mut nav = PageNavigator::new(vec![Page::Intro, Page::Quiz]);
        assert!(nav.show(Page::Final).is_err());
        assert_eq!(nav.active(), Page::Intro);
    }
}
