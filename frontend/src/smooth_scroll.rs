use std::rc::Rc;

use gloo_events::{EventListener, EventListenerOptions};
use web_sys::{Document, Element, HtmlElement, ScrollBehavior, ScrollToOptions, Window};

use crate::config::{ANCHOR_SELECTOR, NAVBAR_ID};
use crate::dom;
use crate::error::LandingError;

/// Id referenced by a same-page `href`, or `None` when the click should be
/// left to the browser (a bare `#` or not a fragment link at all).
pub fn fragment_target(href: &str) -> Option<&str> {
    match href.strip_prefix('#') {
        Some("") | None => None,
        Some(id) => Some(id),
    }
}

/// Document offset that puts the target's top edge right under the navbar.
pub fn scroll_destination(target_top: f64, scroll_y: f64, navbar_height: f64) -> f64 {
    target_top + scroll_y - navbar_height
}

/// What anchor navigation needs to know about the page and how it moves it.
pub trait ScrollSurface {
    /// Viewport-relative top of the element with `id`, if the page has one.
    fn element_top(&self, id: &str) -> Option<f64>;
    fn navbar_height(&self) -> f64;
    fn scroll_y(&self) -> f64;
    fn scroll_to(&self, top: f64);
}

pub struct SmoothScroll<S> {
    surface: S,
}

impl<S: ScrollSurface> SmoothScroll<S> {
    pub fn new(surface: S) -> Self {
        Self { surface }
    }

    /// Handles a click on a link with `href`. Returns whether the browser's
    /// default navigation has to be cancelled.
    pub fn handle_click(&self, href: &str) -> bool {
        let Some(id) = fragment_target(href) else {
            return false;
        };
        // Unknown ids still swallow the click.
        if let Some(target_top) = self.surface.element_top(id) {
            let top = scroll_destination(
                target_top,
                self.surface.scroll_y(),
                self.surface.navbar_height(),
            );
            self.surface.scroll_to(top);
        }
        true
    }
}

pub struct PageViewport {
    window: Window,
    document: Document,
    navbar: Option<HtmlElement>,
}

impl PageViewport {
    pub fn new(window: Window, document: Document) -> Self {
        let navbar = dom::element_by_id(&document, NAVBAR_ID);
        Self {
            window,
            document,
            navbar,
        }
    }
}

impl ScrollSurface for PageViewport {
    fn element_top(&self, id: &str) -> Option<f64> {
        self.document
            .get_element_by_id(id)
            .map(|target| target.get_bounding_client_rect().top())
    }

    // Read per call: the navbar is shorter once it is in its scrolled style.
    fn navbar_height(&self) -> f64 {
        self.navbar
            .as_ref()
            .map_or(0.0, |navbar| f64::from(navbar.offset_height()))
    }

    fn scroll_y(&self) -> f64 {
        dom::scroll_y(&self.window)
    }

    fn scroll_to(&self, top: f64) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }
}

pub fn attach(window: &Window, document: &Document) -> Result<(), LandingError> {
    let anchors = dom::query_all::<Element>(document, ANCHOR_SELECTOR)?;
    if anchors.is_empty() {
        return Ok(());
    }
    let scroller = Rc::new(SmoothScroll::new(PageViewport::new(
        window.clone(),
        document.clone(),
    )));

    for anchor in anchors {
        let scroller = Rc::clone(&scroller);
        let link = anchor.clone();
        let options = EventListenerOptions::enable_prevent_default();
        EventListener::new_with_options(&anchor, "click", options, move |event| {
            let href = link.get_attribute("href").unwrap_or_default();
            if scroller.handle_click(&href) {
                event.prevent_default();
            }
        })
        .forget();
    }
    Ok(())
}
