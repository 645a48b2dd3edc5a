use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use futures::future::{self, LocalBoxFuture};
use futures::FutureExt;

use crate::contact::{ContactRequest, ContactTransport, FormSnapshot, FormSurface, TransportError};
use crate::dom::StyledElement;
use crate::error::LandingError;
use crate::notification::{NotificationKind, Notifier, Toast, ToastHost};
use crate::scheduler::Scheduler;
use crate::smooth_scroll::ScrollSurface;

pub const FRAME_MS: u64 = 16;

#[derive(Default)]
struct ElementState {
    classes: Vec<String>,
    styles: BTreeMap<String, String>,
}

#[derive(Clone, Default)]
pub struct FakeElement {
    state: Rc<RefCell<ElementState>>,
}

impl FakeElement {
    pub fn with_class(class: &str) -> Self {
        let element = Self::default();
        element.add_class(class);
        element
    }

    pub fn style(&self, property: &str) -> Option<String> {
        self.state.borrow().styles.get(property).cloned()
    }
}

impl StyledElement for FakeElement {
    fn add_class(&self, class: &str) {
        let mut state = self.state.borrow_mut();
        if !state.classes.iter().any(|c| c == class) {
            state.classes.push(class.to_string());
        }
    }

    fn remove_class(&self, class: &str) {
        self.state.borrow_mut().classes.retain(|c| c != class);
    }

    fn toggle_class(&self, class: &str) -> bool {
        if self.has_class(class) {
            self.remove_class(class);
            false
        } else {
            self.add_class(class);
            true
        }
    }

    fn has_class(&self, class: &str) -> bool {
        self.state.borrow().classes.iter().any(|c| c == class)
    }

    fn set_style(&self, property: &str, value: &str) {
        self.state
            .borrow_mut()
            .styles
            .insert(property.to_string(), value.to_string());
    }
}

struct ViewportState {
    targets: BTreeMap<String, f64>,
    navbar_height: f64,
    scroll_y: f64,
    scrolls: Vec<f64>,
}

/// A page with fixed element positions that records every scroll request.
#[derive(Clone)]
pub struct FakeViewport {
    state: Rc<RefCell<ViewportState>>,
}

impl FakeViewport {
    pub fn new(navbar_height: f64, scroll_y: f64) -> Self {
        Self {
            state: Rc::new(RefCell::new(ViewportState {
                targets: BTreeMap::new(),
                navbar_height,
                scroll_y,
                scrolls: Vec::new(),
            })),
        }
    }

    pub fn with_target(self, id: &str, top: f64) -> Self {
        self.state.borrow_mut().targets.insert(id.to_string(), top);
        self
    }

    pub fn set_navbar_height(&self, height: f64) {
        self.state.borrow_mut().navbar_height = height;
    }

    pub fn scrolls(&self) -> Vec<f64> {
        self.state.borrow().scrolls.clone()
    }
}

impl ScrollSurface for FakeViewport {
    fn element_top(&self, id: &str) -> Option<f64> {
        self.state.borrow().targets.get(id).copied()
    }

    fn navbar_height(&self) -> f64 {
        self.state.borrow().navbar_height
    }

    fn scroll_y(&self) -> f64 {
        self.state.borrow().scroll_y
    }

    fn scroll_to(&self, top: f64) {
        self.state.borrow_mut().scrolls.push(top);
    }
}

struct Pending {
    due: u64,
    seq: u64,
    cancelled: Rc<Cell<bool>>,
    callback: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct Clock {
    now: u64,
    seq: u64,
    pending: Vec<Pending>,
}

/// Virtual clock. Frames fire [`FRAME_MS`] after they are requested.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    clock: Rc<RefCell<Clock>>,
}

pub struct ManualHandle {
    cancelled: Rc<Cell<bool>>,
}

impl Drop for ManualHandle {
    fn drop(&mut self) {
        self.cancelled.set(true);
    }
}

impl ManualScheduler {
    pub fn now(&self) -> u64 {
        self.clock.borrow().now
    }

    pub fn pending(&self) -> usize {
        self.clock
            .borrow()
            .pending
            .iter()
            .filter(|p| !p.cancelled.get())
            .count()
    }

    pub fn advance_frame(&self) {
        self.advance(FRAME_MS);
    }

    /// Runs everything due within the next `millis`, in due order.
    pub fn advance(&self, millis: u64) {
        let target = self.now() + millis;
        loop {
            let next = {
                let mut clock = self.clock.borrow_mut();
                clock.pending.retain(|p| !p.cancelled.get());
                let index = clock
                    .pending
                    .iter()
                    .enumerate()
                    .filter(|(_, p)| p.due <= target)
                    .min_by_key(|(_, p)| (p.due, p.seq))
                    .map(|(index, _)| index);
                match index {
                    Some(index) => {
                        let pending = clock.pending.remove(index);
                        clock.now = pending.due;
                        pending
                    }
                    None => {
                        clock.now = target;
                        break;
                    }
                }
            };
            (next.callback)();
        }
    }

    fn schedule(&self, delay: u64, callback: Box<dyn FnOnce()>) -> ManualHandle {
        let cancelled = Rc::new(Cell::new(false));
        let mut clock = self.clock.borrow_mut();
        clock.seq += 1;
        let pending = Pending {
            due: clock.now + delay,
            seq: clock.seq,
            cancelled: Rc::clone(&cancelled),
            callback,
        };
        clock.pending.push(pending);
        ManualHandle { cancelled }
    }
}

impl Scheduler for ManualScheduler {
    type Handle = ManualHandle;

    fn after(&self, millis: u32, callback: Box<dyn FnOnce()>) -> ManualHandle {
        self.schedule(u64::from(millis), callback)
    }

    fn next_frame(&self, callback: Box<dyn FnOnce()>) -> ManualHandle {
        self.schedule(FRAME_MS, callback)
    }
}

struct ToastState {
    message: String,
    kind: NotificationKind,
    transform: String,
    attached: bool,
    on_close: Rc<dyn Fn()>,
}

#[derive(Clone)]
pub struct FakeToast {
    state: Rc<RefCell<ToastState>>,
    removals: Rc<Cell<usize>>,
}

impl FakeToast {
    pub fn message(&self) -> String {
        self.state.borrow().message.clone()
    }

    pub fn kind(&self) -> NotificationKind {
        self.state.borrow().kind
    }

    pub fn transform(&self) -> String {
        self.state.borrow().transform.clone()
    }

    pub fn click_close(&self) {
        let on_close = Rc::clone(&self.state.borrow().on_close);
        on_close();
    }
}

impl Toast for FakeToast {
    fn set_transform(&self, transform: &str) {
        self.state.borrow_mut().transform = transform.to_string();
    }

    fn is_attached(&self) -> bool {
        self.state.borrow().attached
    }

    fn remove(&self) {
        let mut state = self.state.borrow_mut();
        if state.attached {
            state.attached = false;
            self.removals.set(self.removals.get() + 1);
        }
    }
}

#[derive(Clone, Default)]
pub struct FakeToastHost {
    mounted: Rc<RefCell<Vec<FakeToast>>>,
    removals: Rc<Cell<usize>>,
}

impl FakeToastHost {
    pub fn attached(&self) -> Vec<FakeToast> {
        self.mounted
            .borrow()
            .iter()
            .filter(|toast| toast.is_attached())
            .cloned()
            .collect()
    }

    pub fn removals(&self) -> usize {
        self.removals.get()
    }
}

impl ToastHost for FakeToastHost {
    type Toast = FakeToast;

    fn mount(
        &self,
        message: &str,
        kind: NotificationKind,
        on_close: Box<dyn Fn()>,
    ) -> Result<FakeToast, LandingError> {
        let toast = FakeToast {
            state: Rc::new(RefCell::new(ToastState {
                message: message.to_string(),
                kind,
                transform: crate::notification::HIDDEN_TRANSFORM.to_string(),
                attached: true,
                on_close: Rc::from(on_close),
            })),
            removals: Rc::clone(&self.removals),
        };
        self.mounted.borrow_mut().push(toast.clone());
        Ok(toast)
    }
}

#[derive(Clone, Default)]
pub struct RecordingNotifier {
    shown: Rc<RefCell<Vec<(String, NotificationKind)>>>,
}

impl RecordingNotifier {
    pub fn shown(&self) -> Vec<(String, NotificationKind)> {
        self.shown.borrow().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str, kind: NotificationKind) {
        self.shown.borrow_mut().push((message.to_string(), kind));
    }
}

struct FormState {
    fields: BTreeMap<String, String>,
    label: String,
    disabled: bool,
    /// Every (label, disabled) pair the submit control was put in.
    transitions: Vec<(String, bool)>,
    resets: usize,
}

#[derive(Clone)]
pub struct FakeForm {
    state: Rc<RefCell<FormState>>,
}

impl FakeForm {
    pub fn new(label: &str) -> Self {
        Self {
            state: Rc::new(RefCell::new(FormState {
                fields: BTreeMap::new(),
                label: label.to_string(),
                disabled: false,
                transitions: Vec::new(),
                resets: 0,
            })),
        }
    }

    pub fn filled(label: &str, fields: &[(&str, &str)]) -> Self {
        let form = Self::new(label);
        for (name, value) in fields {
            form.set_field(name, value);
        }
        form
    }

    pub fn set_field(&self, name: &str, value: &str) {
        self.state
            .borrow_mut()
            .fields
            .insert(name.to_string(), value.to_string());
    }

    pub fn field(&self, name: &str) -> Option<String> {
        self.state.borrow().fields.get(name).cloned()
    }

    pub fn label(&self) -> String {
        self.state.borrow().label.clone()
    }

    pub fn is_disabled(&self) -> bool {
        self.state.borrow().disabled
    }

    pub fn transitions(&self) -> Vec<(String, bool)> {
        self.state.borrow().transitions.clone()
    }

    pub fn resets(&self) -> usize {
        self.state.borrow().resets
    }
}

impl FormSurface for FakeForm {
    fn snapshot(&self) -> Result<FormSnapshot, LandingError> {
        Ok(self.state.borrow().fields.clone().into_iter().collect())
    }

    fn submit_label(&self) -> String {
        self.label()
    }

    fn set_submit_state(&self, label: &str, disabled: bool) {
        let mut state = self.state.borrow_mut();
        state.label = label.to_string();
        state.disabled = disabled;
        state.transitions.push((label.to_string(), disabled));
    }

    fn reset(&self) {
        let mut state = self.state.borrow_mut();
        for value in state.fields.values_mut() {
            value.clear();
        }
        state.resets += 1;
    }
}

/// Resolves right away with a fixed outcome and remembers what it was sent.
#[derive(Clone, Default)]
pub struct InstantTransport {
    rejected_status: Option<u16>,
    sent: Rc<RefCell<Vec<ContactRequest>>>,
}

impl InstantTransport {
    pub fn rejecting(status: u16) -> Self {
        Self {
            rejected_status: Some(status),
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<ContactRequest> {
        self.sent.borrow().clone()
    }
}

impl ContactTransport for InstantTransport {
    fn submit(&self, request: ContactRequest) -> LocalBoxFuture<'static, Result<(), TransportError>> {
        self.sent.borrow_mut().push(request);
        let outcome = match self.rejected_status {
            Some(status) => Err(TransportError::Rejected { status }),
            None => Ok(()),
        };
        future::ready(outcome).boxed_local()
    }
}
