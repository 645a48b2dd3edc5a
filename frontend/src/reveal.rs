use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    js_sys, Document, Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit,
};

use crate::config::{
    ANIMATE_IN_CLASS, REVEAL_OFFSET_PX, REVEAL_ROOT_MARGIN, REVEAL_SELECTOR, REVEAL_STAGGER_SECS,
    REVEAL_VISIBILITY_THRESHOLD,
};
use crate::dom::{self, StyledElement};
use crate::error::LandingError;

/// Wins over the inline starting styles.
pub fn revealed_rule() -> String {
    format!(
        ".{} {{ opacity: 1 !important; transform: translateY(0) !important; }}",
        ANIMATE_IN_CLASS
    )
}

pub fn transition_for(index: usize) -> String {
    let delay = index as f64 * REVEAL_STAGGER_SECS;
    format!("opacity 0.6s ease {delay}s, transform 0.6s ease {delay}s")
}

struct RevealTarget<E> {
    element: E,
    revealed: bool,
}

pub struct ScrollReveal<E> {
    targets: Vec<RevealTarget<E>>,
}

impl<E: StyledElement> ScrollReveal<E> {
    /// Puts every element in its hidden starting state, in order.
    pub fn prepare(elements: impl IntoIterator<Item = E>) -> Self {
        let offset = format!("translateY({}px)", REVEAL_OFFSET_PX);
        let targets = elements
            .into_iter()
            .enumerate()
            .map(|(index, element)| {
                element.set_style("opacity", "0");
                element.set_style("transform", &offset);
                element.set_style("transition", &transition_for(index));
                RevealTarget {
                    element,
                    revealed: false,
                }
            })
            .collect();
        Self { targets }
    }

    /// Feeds one observation. Returns `true` exactly once per element, when
    /// it gets revealed; the caller then stops observing it.
    pub fn observe(&mut self, index: usize, intersecting: bool) -> bool {
        let Some(target) = self.targets.get_mut(index) else {
            return false;
        };
        if target.revealed || !intersecting {
            return false;
        }
        target.element.add_class(ANIMATE_IN_CLASS);
        target.revealed = true;
        true
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.targets.get(index).map_or(false, |target| target.revealed)
    }
}

fn install_stylesheet(document: &Document) -> Result<(), LandingError> {
    let head = document.head().ok_or(LandingError::MissingElement("head"))?;
    let style = document.create_element("style")?;
    style.set_text_content(Some(&revealed_rule()));
    head.append_child(&style)?;
    Ok(())
}

pub fn attach(document: &Document) -> Result<(), LandingError> {
    let elements = dom::query_all::<HtmlElement>(document, REVEAL_SELECTOR)?;
    let reveal = Rc::new(RefCell::new(ScrollReveal::prepare(elements.clone())));

    let state = Rc::clone(&reveal);
    let watched = elements.clone();
    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            let mut reveal = state.borrow_mut();
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                let target = entry.target();
                let index = watched
                    .iter()
                    .position(|element| AsRef::<Element>::as_ref(element) == &target);
                if let Some(index) = index {
                    if reveal.observe(index, entry.is_intersecting()) {
                        observer.unobserve(&target);
                    }
                }
            }
        },
    );

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(REVEAL_VISIBILITY_THRESHOLD));
    options.set_root_margin(REVEAL_ROOT_MARGIN);
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    for element in &elements {
        observer.observe(element);
    }
    callback.forget();

    log::debug!("Watching {} sections for reveal", elements.len());
    install_stylesheet(document)
}
