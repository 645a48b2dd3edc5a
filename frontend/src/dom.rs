use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Window};

use crate::error::LandingError;

pub trait StyledElement {
    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);
    /// Flips `class` and reports whether it is present afterwards.
    fn toggle_class(&self, class: &str) -> bool;
    fn has_class(&self, class: &str) -> bool;
    fn set_style(&self, property: &str, value: &str);
}

// Class tokens and style properties are compile-time constants, so the
// DOMException paths (empty or whitespace tokens) cannot be hit.
impl StyledElement for HtmlElement {
    fn add_class(&self, class: &str) {
        let _ = self.class_list().add_1(class);
    }

    fn remove_class(&self, class: &str) {
        let _ = self.class_list().remove_1(class);
    }

    fn toggle_class(&self, class: &str) -> bool {
        self.class_list().toggle(class).unwrap_or(false)
    }

    fn has_class(&self, class: &str) -> bool {
        self.class_list().contains(class)
    }

    fn set_style(&self, property: &str, value: &str) {
        let _ = self.style().set_property(property, value);
    }
}

pub fn window() -> Result<Window, LandingError> {
    web_sys::window().ok_or(LandingError::MissingElement("window"))
}

pub fn document(window: &Window) -> Result<Document, LandingError> {
    window.document().ok_or(LandingError::MissingElement("document"))
}

pub fn scroll_y(window: &Window) -> f64 {
    window.scroll_y().unwrap_or(0.0)
}

pub fn viewport_height(window: &Window) -> f64 {
    window
        .inner_height()
        .ok()
        .and_then(|height| height.as_f64())
        .unwrap_or(0.0)
}

pub fn element_by_id<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    document
        .get_element_by_id(id)
        .and_then(|element| element.dyn_into::<T>().ok())
}

/// First match of `selector` under `root`. Invalid selectors count as no match.
pub fn query<T: JsCast>(root: &Element, selector: &str) -> Option<T> {
    root.query_selector(selector)
        .ok()
        .flatten()
        .and_then(|element| element.dyn_into::<T>().ok())
}

pub fn query_document<T: JsCast>(document: &Document, selector: &str) -> Option<T> {
    document
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|element| element.dyn_into::<T>().ok())
}

/// All matches in document order, skipping nodes that are not `T`.
pub fn query_all<T: JsCast>(
    document: &Document,
    selector: &str,
) -> Result<Vec<T>, LandingError> {
    let nodes = document.query_selector_all(selector)?;
    Ok(collect_nodes(&nodes))
}

pub fn query_all_within<T: JsCast>(
    root: &Element,
    selector: &str,
) -> Result<Vec<T>, LandingError> {
    let nodes = root.query_selector_all(selector)?;
    Ok(collect_nodes(&nodes))
}

fn collect_nodes<T: JsCast>(nodes: &web_sys::NodeList) -> Vec<T> {
    (0..nodes.length())
        .filter_map(|index| nodes.item(index))
        .filter_map(|node| node.dyn_into::<T>().ok())
        .collect()
}
