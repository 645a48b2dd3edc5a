pub mod config;
pub mod contact;
pub mod dom;
pub mod error;
pub mod mobile_menu;
pub mod navbar;
pub mod notification;
pub mod parallax;
pub mod reveal;
pub mod scheduler;
pub mod smooth_scroll;

#[cfg(test)]
mod testing;

use std::cell::RefCell;

use gloo_events::EventListener;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Window};

use crate::contact::PageTransport;
use crate::error::LandingError;
use crate::notification::{DocumentToastHost, NotificationKind, NotificationService};
use crate::scheduler::BrowserScheduler;

pub type PageNotifications = NotificationService<DocumentToastHost, BrowserScheduler>;

thread_local! {
    static NOTIFICATIONS: RefCell<Option<PageNotifications>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    wasm_logger::init(wasm_logger::Config::new(level));

    let window = dom::window()?;
    let document = dom::document(&window)?;
    parallax::attach(&window);

    if is_loading(&document.ready_state()) {
        let ready_window = window.clone();
        let ready_document = document.clone();
        EventListener::once(&document, "DOMContentLoaded", move |_event| {
            init_page(&ready_window, &ready_document);
        })
        .forget();
    } else {
        init_page(&window, &document);
    }
    Ok(())
}

fn is_loading(ready_state: &str) -> bool {
    ready_state == "loading"
}

fn init_page(window: &Window, document: &Document) {
    let notifications =
        NotificationService::new(DocumentToastHost::new(document.clone()), BrowserScheduler);
    NOTIFICATIONS.with(|slot| *slot.borrow_mut() = Some(notifications.clone()));

    report("navbar", navbar::attach(window, document));
    report("mobile menu", mobile_menu::attach(document));
    report("smooth scroll", smooth_scroll::attach(window, document));
    report("scroll reveal", reveal::attach(document));
    report(
        "contact form",
        contact::attach(document, PageTransport::from_config(), notifications),
    );
    log::info!("Landing page ready");
}

fn report(component: &str, result: Result<(), LandingError>) {
    if let Err(err) = result {
        log::error!("Failed to initialize {}: {}", component, err);
    }
}

/// Shows a toast from other scripts on the page. `kind` is `"success"`
/// (default) or `"error"`.
#[wasm_bindgen(js_name = showNotification)]
pub fn show_notification(message: &str, kind: Option<String>) -> Result<(), JsValue> {
    let kind = match kind.as_deref() {
        Some(kind) => kind
            .parse::<NotificationKind>()
            .map_err(|err| JsValue::from_str(&err.to_string()))?,
        None => NotificationKind::default(),
    };
    NOTIFICATIONS.with(|slot| match slot.borrow().as_ref() {
        Some(notifications) => {
            notifications.show(message, kind);
            Ok(())
        }
        None => Err(LandingError::NotReady.into()),
    })
}
