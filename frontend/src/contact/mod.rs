mod transport;
mod validation;

pub use transport::{
    ContactTransport, HttpTransport, PageTransport, SimulatedTransport, TransportError,
};
pub use validation::{
    is_valid_email, ContactRequest, FormSnapshot, ValidationError, REQUIRED_FIELDS,
};

use std::cell::Cell;
use std::rc::Rc;

use futures::future::LocalBoxFuture;
use futures::FutureExt;
use gloo_events::{EventListener, EventListenerOptions};
use wasm_bindgen_futures::spawn_local;
use web_sys::{js_sys, Document, FormData, HtmlButtonElement, HtmlFormElement};

use crate::config::{CONTACT_FORM_ID, SUBMIT_BUTTON_SELECTOR};
use crate::dom;
use crate::error::LandingError;
use crate::notification::{NotificationKind, Notifier};

pub const SENDING_LABEL: &str = "Enviando...";
pub const SENT_MESSAGE: &str = "¡Mensaje enviado con éxito! Nos pondremos en contacto pronto.";
pub const FAILED_MESSAGE: &str =
    "No pudimos enviar tu mensaje. Por favor, intentá de nuevo más tarde.";

/// The parts of the form the handler reads and drives.
pub trait FormSurface {
    fn snapshot(&self) -> Result<FormSnapshot, LandingError>;
    fn submit_label(&self) -> String;
    fn set_submit_state(&self, label: &str, disabled: bool);
    /// Clears every field back to its default value.
    fn reset(&self);
}

pub struct ContactFormHandler<F, T, N> {
    form: F,
    transport: T,
    notifier: N,
    in_flight: Cell<bool>,
}

impl<F, T, N> ContactFormHandler<F, T, N>
where
    F: FormSurface + 'static,
    T: ContactTransport + 'static,
    N: Notifier + 'static,
{
    pub fn new(form: F, transport: T, notifier: N) -> Rc<Self> {
        Rc::new(Self {
            form,
            transport,
            notifier,
            in_flight: Cell::new(false),
        })
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.get()
    }

    /// Handles one submit event.
    ///
    /// Validation failures are reported right away and yield `None`, as does
    /// a submit while another one is still in flight. Otherwise the submit
    /// control switches to its sending state and the returned future
    /// completes the submission; it has to be driven to see the outcome.
    pub fn submit(self: &Rc<Self>) -> Option<LocalBoxFuture<'static, ()>> {
        if self.in_flight.get() {
            log::debug!("Ignoring contact form submit while one is in flight");
            return None;
        }

        let snapshot = match self.form.snapshot() {
            Ok(snapshot) => snapshot,
            Err(err) => {
                log::error!("Failed to read contact form: {}", err);
                return None;
            }
        };
        let request = match ContactRequest::try_from(&snapshot) {
            Ok(request) => request,
            Err(err) => {
                self.notifier.notify(&err.to_string(), NotificationKind::Error);
                return None;
            }
        };

        let original_label = self.form.submit_label();
        self.form.set_submit_state(SENDING_LABEL, true);
        self.in_flight.set(true);

        let pending = self.transport.submit(request);
        let handler = Rc::clone(self);
        Some(
            async move {
                let outcome = pending.await;
                handler.complete(outcome, &original_label);
            }
            .boxed_local(),
        )
    }

    fn complete(&self, outcome: Result<(), TransportError>, original_label: &str) {
        match outcome {
            Ok(()) => {
                log::info!("Contact request delivered");
                self.notifier.notify(SENT_MESSAGE, NotificationKind::Success);
                self.form.reset();
            }
            Err(err) => {
                log::warn!("Contact request failed: {}", err);
                self.notifier.notify(FAILED_MESSAGE, NotificationKind::Error);
            }
        }
        self.form.set_submit_state(original_label, false);
        self.in_flight.set(false);
    }
}

/// `#contact-form` in the live document.
pub struct HtmlContactForm {
    form: HtmlFormElement,
    submit_button: Option<HtmlButtonElement>,
}

impl HtmlContactForm {
    pub fn new(form: HtmlFormElement) -> Self {
        let submit_button = dom::query(&form, SUBMIT_BUTTON_SELECTOR);
        Self {
            form,
            submit_button,
        }
    }
}

impl FormSurface for HtmlContactForm {
    fn snapshot(&self) -> Result<FormSnapshot, LandingError> {
        let data = FormData::new_with_form(&self.form)?;
        let Some(entries) = js_sys::try_iter(&data)? else {
            return Ok(FormSnapshot::default());
        };
        let mut fields = Vec::new();
        for entry in entries {
            let entry = js_sys::Array::from(&entry?);
            // File inputs yield blobs; only text entries take part.
            let (name, value) = (entry.get(0).as_string(), entry.get(1).as_string());
            if let (Some(name), Some(value)) = (name, value) {
                fields.push((name, value));
            }
        }
        Ok(fields.into_iter().collect())
    }

    fn submit_label(&self) -> String {
        self.submit_button
            .as_ref()
            .and_then(|button| button.text_content())
            .unwrap_or_default()
    }

    fn set_submit_state(&self, label: &str, disabled: bool) {
        if let Some(button) = &self.submit_button {
            button.set_text_content(Some(label));
            button.set_disabled(disabled);
        }
    }

    fn reset(&self) {
        self.form.reset();
    }
}

/// Takes over submission of `#contact-form`, if the page has one.
pub fn attach<T, N>(document: &Document, transport: T, notifier: N) -> Result<(), LandingError>
where
    T: ContactTransport + 'static,
    N: Notifier + 'static,
{
    let Some(form) = dom::element_by_id::<HtmlFormElement>(document, CONTACT_FORM_ID) else {
        return Ok(());
    };
    let target = form.clone();
    let handler = ContactFormHandler::new(HtmlContactForm::new(form), transport, notifier);

    let options = EventListenerOptions::enable_prevent_default();
    EventListener::new_with_options(&target, "submit", options, move |event| {
        event.prevent_default();
        if let Some(submission) = handler.submit() {
            spawn_local(submission);
        }
    })
    .forget();
    Ok(())
}
