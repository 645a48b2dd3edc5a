use std::rc::Rc;

use gloo_events::EventListener;
use web_sys::{Document, HtmlElement};

use crate::config::{ACTIVE_CLASS, MOBILE_TOGGLE_ID, NAV_LINKS_SELECTOR};
use crate::dom::{self, StyledElement};
use crate::error::LandingError;

/// The hamburger control and the navigation panel it opens.
pub struct MobileMenu<E> {
    control: E,
    menu: E,
}

impl<E: StyledElement> MobileMenu<E> {
    /// Both parts are required; without either the menu stays inert.
    pub fn new(toggle: Option<E>, menu: Option<E>) -> Option<Self> {
        Some(Self {
            control: toggle?,
            menu: menu?,
        })
    }

    pub fn toggle(&self) {
        self.menu.toggle_class(ACTIVE_CLASS);
        self.control.toggle_class(ACTIVE_CLASS);
    }

    pub fn close(&self) {
        self.menu.remove_class(ACTIVE_CLASS);
        self.control.remove_class(ACTIVE_CLASS);
    }

    pub fn is_open(&self) -> bool {
        self.menu.has_class(ACTIVE_CLASS)
    }
}

pub fn attach(document: &Document) -> Result<(), LandingError> {
    let toggle = dom::element_by_id::<HtmlElement>(document, MOBILE_TOGGLE_ID);
    let menu = dom::query_document::<HtmlElement>(document, NAV_LINKS_SELECTOR);
    let Some(controller) = MobileMenu::new(toggle, menu) else {
        return Ok(());
    };
    let controller = Rc::new(controller);

    let links = dom::query_all_within::<HtmlElement>(&controller.menu, "a")?;
    for link in links {
        let controller = Rc::clone(&controller);
        EventListener::new(&link, "click", move |_event| controller.close()).forget();
    }

    let target = controller.control.clone();
    EventListener::new(&target, "click", move |_event| controller.toggle()).forget();
    Ok(())
}
