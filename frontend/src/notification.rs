use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::str::FromStr;

use gloo_events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

use crate::config::{
    NOTIFICATION_CLASS, NOTIFICATION_CLOSE_CLASS, TOAST_DISPLAY_MS, TOAST_TRANSITION_MS,
};
use crate::dom;
use crate::error::LandingError;
use crate::scheduler::Scheduler;

pub const HIDDEN_TRANSFORM: &str = "translateX(-50%) translateY(100px)";
pub const SHOWN_TRANSFORM: &str = "translateX(-50%) translateY(0)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotificationKind {
    #[default]
    Success,
    Error,
}

impl NotificationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
        }
    }

    pub fn class_name(self) -> String {
        format!("{}-{}", NOTIFICATION_CLASS, self.as_str())
    }

    pub fn background(self) -> &'static str {
        match self {
            NotificationKind::Success => "#10B981",
            NotificationKind::Error => "#EF4444",
        }
    }

    pub fn foreground(self) -> &'static str {
        "#fff"
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown notification kind: {0}")]
pub struct UnknownKind(String);

impl FromStr for NotificationKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "success" => Ok(NotificationKind::Success),
            "error" => Ok(NotificationKind::Error),
            other => Err(UnknownKind(other.to_string())),
        }
    }
}

/// Inline styles of a freshly mounted toast, in application order.
pub fn toast_styles(kind: NotificationKind) -> Vec<(&'static str, &'static str)> {
    vec![
        ("position", "fixed"),
        ("bottom", "20px"),
        ("left", "50%"),
        ("transform", HIDDEN_TRANSFORM),
        ("background", kind.background()),
        ("color", kind.foreground()),
        ("padding", "1rem 1.5rem"),
        ("border-radius", "12px"),
        ("box-shadow", "0 10px 40px rgba(0,0,0,0.2)"),
        ("display", "flex"),
        ("align-items", "center"),
        ("gap", "1rem"),
        ("z-index", "10000"),
        ("font-weight", "500"),
        ("transition", "transform 0.4s ease"),
        ("max-width", "90%"),
    ]
}

/// Anything that can be told about an outcome the visitor should see.
pub trait Notifier {
    fn notify(&self, message: &str, kind: NotificationKind);
}

/// Creates toast elements; the service decides when they move and leave.
pub trait ToastHost {
    type Toast: Toast;

    /// Puts a new toast on the page at [`HIDDEN_TRANSFORM`]. `on_close` runs
    /// when the visitor clicks its close control.
    fn mount(
        &self,
        message: &str,
        kind: NotificationKind,
        on_close: Box<dyn Fn()>,
    ) -> Result<Self::Toast, LandingError>;
}

pub trait Toast {
    fn set_transform(&self, transform: &str);
    fn is_attached(&self) -> bool;
    fn remove(&self);
}

struct ActiveToast<T, H> {
    id: u64,
    toast: T,
    leaving: bool,
    _entry: Option<H>,
    auto_dismiss: Option<H>,
    _exit: Option<H>,
}

struct Inner<H: ToastHost, S: Scheduler> {
    host: H,
    scheduler: S,
    next_id: Cell<u64>,
    active: RefCell<Option<ActiveToast<H::Toast, S::Handle>>>,
}

pub struct NotificationService<H: ToastHost, S: Scheduler> {
    inner: Rc<Inner<H, S>>,
}

impl<H: ToastHost, S: Scheduler> Clone for NotificationService<H, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<H, S> NotificationService<H, S>
where
    H: ToastHost + 'static,
    S: Scheduler + 'static,
{
    pub fn new(host: H, scheduler: S) -> Self {
        Self {
            inner: Rc::new(Inner {
                host,
                scheduler,
                next_id: Cell::new(0),
                active: RefCell::new(None),
            }),
        }
    }

    pub fn show(&self, message: &str, kind: NotificationKind) {
        let inner = &self.inner;

        // Dropping the evicted toast also cancels its pending timers.
        if let Some(previous) = inner.active.borrow_mut().take() {
            if previous.toast.is_attached() {
                previous.toast.remove();
            }
        }

        let id = inner.next_id.get() + 1;
        inner.next_id.set(id);

        let weak = Rc::downgrade(inner);
        let on_close = Box::new(move || {
            if let Some(inner) = weak.upgrade() {
                Inner::dismiss(&inner, id);
            }
        });
        let toast = match inner.host.mount(message, kind, on_close) {
            Ok(toast) => toast,
            Err(err) => {
                log::error!("Failed to display notification: {}", err);
                return;
            }
        };

        let entry = inner
            .scheduler
            .next_frame(Self::callback(inner, id, Inner::slide_in));
        let auto_dismiss = inner
            .scheduler
            .after(TOAST_DISPLAY_MS, Self::callback(inner, id, Inner::dismiss));

        *inner.active.borrow_mut() = Some(ActiveToast {
            id,
            toast,
            leaving: false,
            _entry: Some(entry),
            auto_dismiss: Some(auto_dismiss),
            _exit: None,
        });
    }

    /// Starts the exit transition of the current toast, if there is one.
    pub fn dismiss(&self) {
        let id = self.inner.active.borrow().as_ref().map(|active| active.id);
        if let Some(id) = id {
            Inner::dismiss(&self.inner, id);
        }
    }

    pub fn is_showing(&self) -> bool {
        self.inner
            .active
            .borrow()
            .as_ref()
            .map_or(false, |active| active.toast.is_attached())
    }

    fn callback(
        inner: &Rc<Inner<H, S>>,
        id: u64,
        action: fn(&Rc<Inner<H, S>>, u64),
    ) -> Box<dyn FnOnce()> {
        let weak: Weak<Inner<H, S>> = Rc::downgrade(inner);
        Box::new(move || {
            if let Some(inner) = weak.upgrade() {
                action(&inner, id);
            }
        })
    }
}

impl<H, S> Inner<H, S>
where
    H: ToastHost + 'static,
    S: Scheduler + 'static,
{
    fn slide_in(this: &Rc<Self>, id: u64) {
        if let Some(active) = this.active.borrow().as_ref() {
            if active.id == id && !active.leaving {
                active.toast.set_transform(SHOWN_TRANSFORM);
            }
        }
    }

    fn dismiss(this: &Rc<Self>, id: u64) {
        let mut slot = this.active.borrow_mut();
        let Some(active) = slot.as_mut().filter(|active| active.id == id) else {
            return;
        };
        if active.leaving || !active.toast.is_attached() {
            return;
        }
        active.leaving = true;
        active.auto_dismiss = None;
        active.toast.set_transform(HIDDEN_TRANSFORM);
        active._exit = Some(this.scheduler.after(
            TOAST_TRANSITION_MS,
            NotificationService::<H, S>::callback(this, id, Self::finish),
        ));
    }

    fn finish(this: &Rc<Self>, id: u64) {
        let finished = {
            let mut slot = this.active.borrow_mut();
            match slot.as_ref() {
                Some(active) if active.id == id => slot.take(),
                _ => None,
            }
        };
        if let Some(finished) = finished {
            if finished.toast.is_attached() {
                finished.toast.remove();
            }
        }
    }
}

impl<H, S> Notifier for NotificationService<H, S>
where
    H: ToastHost + 'static,
    S: Scheduler + 'static,
{
    fn notify(&self, message: &str, kind: NotificationKind) {
        self.show(message, kind);
    }
}

/// Mounts toasts at the end of `<body>`.
#[derive(Clone)]
pub struct DocumentToastHost {
    document: Document,
}

impl DocumentToastHost {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    // Toasts left behind by other scripts or a previous page state.
    fn remove_strays(&self) -> Result<(), LandingError> {
        let selector = format!(".{}", NOTIFICATION_CLASS);
        for stray in dom::query_all::<web_sys::Element>(&self.document, &selector)? {
            stray.remove();
        }
        Ok(())
    }

    fn create<T: JsCast>(&self, tag: &str) -> Result<T, LandingError> {
        self.document
            .create_element(tag)?
            .dyn_into::<T>()
            .map_err(|_| LandingError::Js(format!("<{}> is not an HTML element", tag)))
    }
}

pub struct DocumentToast {
    element: HtmlElement,
    _close: EventListener,
}

impl ToastHost for DocumentToastHost {
    type Toast = DocumentToast;

    fn mount(
        &self,
        message: &str,
        kind: NotificationKind,
        on_close: Box<dyn Fn()>,
    ) -> Result<DocumentToast, LandingError> {
        self.remove_strays()?;
        let body = self
            .document
            .body()
            .ok_or(LandingError::MissingElement("body"))?;

        let element: HtmlElement = self.create("div")?;
        element.set_class_name(&format!("{} {}", NOTIFICATION_CLASS, kind.class_name()));
        let style = element.style();
        for (property, value) in toast_styles(kind) {
            style.set_property(property, value)?;
        }

        let text: HtmlElement = self.create("span")?;
        text.set_text_content(Some(message));
        element.append_child(&text)?;

        let close: HtmlElement = self.create("button")?;
        close.set_class_name(NOTIFICATION_CLOSE_CLASS);
        close.set_text_content(Some("\u{00d7}"));
        element.append_child(&close)?;
        let listener = EventListener::new(&close, "click", move |_event| on_close());

        body.append_child(&element)?;
        Ok(DocumentToast {
            element,
            _close: listener,
        })
    }
}

impl Toast for DocumentToast {
    fn set_transform(&self, transform: &str) {
        let _ = self.element.style().set_property("transform", transform);
    }

    fn is_attached(&self) -> bool {
        self.element.parent_element().is_some()
    }

    fn remove(&self) {
        self.element.remove();
    }
}
