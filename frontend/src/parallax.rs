use gloo_events::EventListener;
use web_sys::{HtmlElement, Window};

use crate::config::{HERO_SELECTOR, PARALLAX_FACTOR};
use crate::dom::{self, StyledElement};

/// Background offset for the hero, or `None` once the hero has scrolled out
/// and its background should stay where it is.
pub fn background_offset(scroll_y: f64, viewport_height: f64) -> Option<f64> {
    (scroll_y < viewport_height).then(|| scroll_y * PARALLAX_FACTOR)
}

pub fn apply<E: StyledElement>(hero: &E, scroll_y: f64, viewport_height: f64) {
    if let Some(offset) = background_offset(scroll_y, viewport_height) {
        hero.set_style("background-position-y", &format!("{}px", offset));
    }
}

/// Registered before the document is parsed, so the hero is looked up on
/// every tick rather than once.
pub fn attach(window: &Window) {
    let win = window.clone();
    EventListener::new(window, "scroll", move |_event| {
        let Some(document) = win.document() else {
            return;
        };
        if let Some(hero) = dom::query_document::<HtmlElement>(&document, HERO_SELECTOR) {
            apply(&hero, dom::scroll_y(&win), dom::viewport_height(&win));
        }
    })
    .forget();
}
