use gloo_events::EventListener;
use web_sys::{Document, HtmlElement, Window};

use crate::config::{NAVBAR_ID, NAVBAR_SCROLL_THRESHOLD, SCROLLED_CLASS};
use crate::dom::{self, StyledElement};
use crate::error::LandingError;

pub fn is_scrolled(scroll_y: f64) -> bool {
    scroll_y > NAVBAR_SCROLL_THRESHOLD
}

/// Compact navbar style once the page leaves the top.
pub struct NavbarScrollEffect<E> {
    navbar: E,
}

impl<E: StyledElement> NavbarScrollEffect<E> {
    pub fn new(navbar: E) -> Self {
        Self { navbar }
    }

    pub fn apply(&self, scroll_y: f64) {
        if is_scrolled(scroll_y) {
            self.navbar.add_class(SCROLLED_CLASS);
        } else {
            self.navbar.remove_class(SCROLLED_CLASS);
        }
    }
}

pub fn attach(window: &Window, document: &Document) -> Result<(), LandingError> {
    let Some(navbar) = dom::element_by_id::<HtmlElement>(document, NAVBAR_ID) else {
        return Ok(());
    };
    let effect = NavbarScrollEffect::new(navbar);
    effect.apply(dom::scroll_y(window));

    let win = window.clone();
    EventListener::new(window, "scroll", move |_event| {
        effect.apply(dom::scroll_y(&win));
    })
    .forget();
    Ok(())
}
