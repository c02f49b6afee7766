//! Browser front-end: a DOM `View`, event wiring, the countdown interval and
//! the per-frame heart animation.
//!
//! The app lives in a thread-local, like every wasm-bindgen callback target.
//! Callbacks borrow it for one handler at a time and schedule timers only
//! after the borrow is released.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement, HtmlImageElement, window};

use crate::app::{App, Transition};
use crate::config::GameConfig;
use crate::effects::ConfettiPiece;
use crate::error::GameError;
use crate::game::{PlayArea, SessionId, Target};
use crate::pages::Page;
use crate::questions::{OPTION_COUNT, QuizItem, fallback_image};
use crate::view::{OptionState, View};

const HEART_GLYPH: &str = "❤️";

fn by_id<T: JsCast>(doc: &Document, id: &str) -> Result<T, GameError> {
    doc.get_element_by_id(id)
        .ok_or_else(|| GameError::Dom(format!("missing #{id}")))?
        .dyn_into::<T>()
        .map_err(|_| GameError::Dom(format!("#{id} has an unexpected element type")))
}

fn select_all(doc: &Document, selector: &str) -> Vec<Element> {
    let Ok(list) = doc.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// `View` backed by the elements of `www/index.html`.
pub struct DomView {
    doc: Document,
    image: HtmlImageElement,
    prompt: Element,
    progress: Element,
    options: Vec<HtmlButtonElement>,
    next_btn: HtmlElement,
    hearts_label: Element,
    timer: Element,
    area: HtmlElement,
    heart_nodes: Vec<HtmlElement>,
}

impl DomView {
    pub fn from_document(doc: &Document) -> Result<Self, GameError> {
        let options: Vec<HtmlButtonElement> = select_all(doc, ".answer-btn")
            .into_iter()
            .filter_map(|el| el.dyn_into().ok())
            .collect();
        if options.len() != OPTION_COUNT {
            return Err(GameError::Dom(format!(
                "expected {OPTION_COUNT} .answer-btn buttons, found {}",
                options.len()
            )));
        }
        Ok(Self {
            doc: doc.clone(),
            image: by_id(doc, "question-image")?,
            prompt: by_id(doc, "question-text")?,
            progress: by_id(doc, "current-question")?,
            options,
            next_btn: by_id(doc, "next-btn")?,
            hearts_label: by_id(doc, "hearts-found")?,
            timer: by_id(doc, "timer")?,
            area: by_id(doc, "game-area")?,
            heart_nodes: Vec::new(),
        })
    }

    fn spawn_heart(&self, index: usize) -> Result<HtmlElement, JsValue> {
        let el: HtmlElement = self.doc.create_element("div")?.dyn_into()?;
        el.set_class_name("heart");
        el.set_text_content(Some(HEART_GLYPH));
        el.set_attribute("data-index", &index.to_string())?;
        self.area.append_child(&el)?;
        Ok(el)
    }

    fn sync_heart(el: &HtmlElement, t: &Target) {
        let style = el.style();
        style.set_property("left", &format!("{}px", t.x)).ok();
        style.set_property("top", &format!("{}px", t.y)).ok();
        if t.collected && !el.class_list().contains("collected") {
            el.class_list().add_1("collected").ok();
            style.set_property("opacity", "0.5").ok();
            style.set_property("pointer-events", "none").ok();
        }
    }
}

impl View for DomView {
    fn show_page(&mut self, page: Page) {
        for el in select_all(&self.doc, ".page") {
            el.class_list().remove_1("active").ok();
        }
        match self.doc.get_element_by_id(page.id()) {
            Some(el) => {
                el.class_list().add_1("active").ok();
            }
            None => {
                log::error!("page #{} missing from document", page.id());
                debug_assert!(false, "page #{} missing from document", page.id());
            }
        }
    }

    fn render_question(&mut self, index: usize, _total: usize, item: &QuizItem) {
        self.image.set_src(item.image);
        self.prompt.set_text_content(Some(item.prompt));
        self.progress.set_text_content(Some(&(index + 1).to_string()));
        for (btn, label) in self.options.iter().zip(item.options) {
            btn.set_text_content(Some(label));
            btn.class_list().remove_2("correct", "wrong").ok();
        }
    }

    fn render_option_state(&mut self, option: usize, state: OptionState) {
        let Some(btn) = self.options.get(option) else { return };
        match state.class() {
            Some(class) => {
                btn.class_list().add_1(class).ok();
            }
            None => {
                btn.class_list().remove_2("correct", "wrong").ok();
            }
        }
    }

    fn set_options_enabled(&mut self, enabled: bool) {
        for btn in &self.options {
            btn.set_disabled(!enabled);
        }
    }

    fn set_continue_visible(&mut self, visible: bool) {
        let display = if visible { "block" } else { "none" };
        self.next_btn.style().set_property("display", display).ok();
    }

    fn play_area(&self) -> PlayArea {
        PlayArea::new(self.area.offset_width() as f64, self.area.offset_height() as f64)
    }

    fn render_game_hud(&mut self, hearts: usize, total: usize, seconds_left: u32) {
        self.hearts_label
            .set_text_content(Some(&format!("Cœurs trouvés : {hearts}/{total}")));
        self.timer.set_text_content(Some(&format!("{seconds_left}s")));
    }

    fn reset_play_area(&mut self) {
        self.area.set_inner_html("");
        self.heart_nodes.clear();
    }

    fn render_targets(&mut self, targets: &[Target]) {
        while self.heart_nodes.len() < targets.len() {
            match self.spawn_heart(self.heart_nodes.len()) {
                Ok(el) => self.heart_nodes.push(el),
                Err(err) => {
                    log::error!("could not create heart: {err:?}");
                    return;
                }
            }
        }
        for (el, t) in self.heart_nodes.iter().zip(targets) {
            Self::sync_heart(el, t);
        }
    }

    fn spawn_confetti(&mut self, pieces: &[ConfettiPiece], lifetime_ms: i32) {
        let (Some(win), Some(body)) = (window(), self.doc.body()) else { return };
        for piece in pieces {
            let Ok(el) = self.doc.create_element("div") else { continue };
            let Ok(el) = el.dyn_into::<HtmlElement>() else { continue };
            el.set_class_name("confetti");
            let style = el.style();
            style.set_property("left", &format!("{}vw", piece.left_vw)).ok();
            style.set_property("animation-delay", &format!("{}s", piece.delay_s)).ok();
            if body.append_child(&el).is_err() {
                continue;
            }
            let remove = Closure::once_into_js(move || el.remove());
            if let Err(err) =
                win.set_timeout_with_callback_and_timeout_and_arguments_0(remove.unchecked_ref(), lifetime_ms)
            {
                log::warn!("confetti removal not scheduled, piece stays until reset: {:?}", err);
            }
        }
    }

    fn clear_confetti(&mut self) {
        for el in select_all(&self.doc, ".confetti") {
            el.remove();
        }
    }
}

// -----------------------------------------------------------------------------
// Runtime state
// -----------------------------------------------------------------------------

type WebApp = App<DomView, StdRng>;

thread_local! {
    static APP: RefCell<Option<WebApp>> = const { RefCell::new(None) };
    static COUNTDOWN: Cell<Option<i32>> = const { Cell::new(None) };
}

fn with_app<T>(f: impl FnOnce(&mut WebApp) -> Result<T, GameError>) -> Result<T, GameError> {
    APP.with(|cell| match cell.borrow_mut().as_mut() {
        Some(app) => f(app),
        None => Err(GameError::Dom("start_app has not been called".into())),
    })
}

/// React to a transition: arm timers for a new game, cancel the countdown
/// when the game is over or abandoned. Stale actions are dropped quietly.
pub(crate) fn dispatch(result: Result<Transition, GameError>) {
    match result {
        Ok(Transition::GameStarted(id)) => {
            cancel_countdown();
            start_countdown(id);
            start_frame_loop(id);
        }
        Ok(t) if !t.keeps_countdown() => cancel_countdown(),
        Ok(_) => {}
        Err(err) if err.is_stale() => log::debug!("{err}"),
        Err(err) => log::error!("{err}"),
    }
}

fn cancel_countdown() {
    if let Some(handle) = COUNTDOWN.with(|c| c.take()) {
        if let Some(w) = window() {
            w.clear_interval_with_handle(handle);
        }
    }
}

fn start_countdown(id: SessionId) {
    let Some(win) = window() else { return };
    let period = with_app(|app| Ok(app.config().countdown_period_ms)).unwrap_or(1_000);
    let tick = Closure::wrap(Box::new(move || {
        let result = with_app(|app| app.countdown_tick(id));
        if !matches!(result, Ok(t) if t.keeps_countdown()) {
            cancel_countdown();
        }
        match result {
            Err(err) if !err.is_stale() => log::error!("{err}"),
            _ => {}
        }
    }) as Box<dyn FnMut()>);
    match win.set_interval_with_callback_and_timeout_and_arguments_0(
        tick.as_ref().unchecked_ref(),
        period,
    ) {
        Ok(handle) => COUNTDOWN.with(|c| c.set(Some(handle))),
        Err(err) => log::error!("countdown not started: {err:?}"),
    }
    tick.forget();
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// requestAnimationFrame loop for one game session. It re-arms itself until
/// the app reports the session is over, then drops its own closure.
fn start_frame_loop(id: SessionId) {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |_ts: f64| {
        let alive = with_app(|app| Ok(app.frame(id))).unwrap_or(false);
        if !alive {
            log::debug!("frame loop for session {id} stopped");
            let _ = f.borrow_mut().take();
            return;
        }
        if let (Some(w), Some(cb)) = (window(), f.borrow().as_ref()) {
            let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>));
    if let (Some(w), Some(cb)) = (window(), g.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

fn on_click(target: &web_sys::EventTarget, handler: impl FnMut(web_sys::MouseEvent) + 'static) -> Result<(), JsValue> {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web_sys::MouseEvent)>);
    target.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn wire_events(doc: &Document) -> Result<(), JsValue> {
    let start: HtmlElement = by_id(doc, "start-btn")?;
    on_click(&start, |_| dispatch(with_app(|app| app.start_quiz())))?;

    for (i, btn) in select_all(doc, ".answer-btn").into_iter().enumerate() {
        on_click(&btn, move |_| answer(i))?;
    }

    let next: HtmlElement = by_id(doc, "next-btn")?;
    on_click(&next, |_| dispatch(with_app(|app| app.next_question())))?;

    let retry: HtmlElement = by_id(doc, "retry-btn")?;
    on_click(&retry, |_| dispatch(with_app(|app| app.restart_quiz())))?;

    let replay: HtmlElement = by_id(doc, "replay-btn")?;
    on_click(&replay, |_| dispatch(with_app(|app| app.restart_game())))?;

    // One delegated listener for all hearts of all sessions.
    let area: HtmlElement = by_id(doc, "game-area")?;
    on_click(&area, |evt| {
        let index = evt
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .and_then(|el| el.closest(".heart").ok().flatten())
            .and_then(|el| el.get_attribute("data-index"))
            .and_then(|v| v.parse::<usize>().ok());
        let Some(index) = index else { return };
        dispatch(with_app(|app| {
            let id = app
                .game()
                .session()
                .map(|s| s.id)
                .ok_or_else(|| GameError::stale("collect", "no game running"))?;
            app.collect_heart(id, index)
        }));
    })?;

    let image: HtmlImageElement = by_id(doc, "question-image")?;
    install_image_fallback(&image)
}

/// Retry a broken question image once with the alternate extension.
pub fn install_image_fallback(image: &HtmlImageElement) -> Result<(), JsValue> {
    let img = image.clone();
    let on_error = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
        if let Some(alt) = fallback_image(&img.src()) {
            log::warn!("image {} failed, retrying as {}", img.src(), alt);
            img.set_src(&alt);
        }
    }) as Box<dyn FnMut(_)>);
    image.add_event_listener_with_callback("error", on_error.as_ref().unchecked_ref())?;
    on_error.forget();
    Ok(())
}

pub(crate) fn answer(option: usize) {
    if let Err(err) = with_app(|app| app.submit_answer(option)) {
        if err.is_stale() {
            log::debug!("{err}");
        } else {
            log::warn!("{err}");
        }
    }
}

pub(crate) fn with_app_dispatch(f: impl FnOnce(&mut WebApp) -> Result<Transition, GameError>) {
    dispatch(with_app(f));
}

pub fn start_app(config: GameConfig) -> Result<(), JsValue> {
    config.validate()?;
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let already_running = APP.with(|cell| cell.borrow().is_some());
    let view = DomView::from_document(&doc)?;
    let mut app = App::new(config, view, StdRng::from_entropy());
    app.show_page(Page::Intro.id())?;
    cancel_countdown();
    APP.with(|cell| cell.replace(Some(app)));

    // Listeners are bound once per page load.
    if !already_running {
        wire_events(&doc)?;
    }
    log::info!("heart quiz ready");
    Ok(())
}
