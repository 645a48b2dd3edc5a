use futures::channel::oneshot;
use futures::future::LocalBoxFuture;
use futures::FutureExt;
use gloo_net::http::Request;
use thiserror::Error;

use super::ContactRequest;
use crate::config;
use crate::scheduler::{BrowserScheduler, Scheduler};

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Submission rejected with status {status}")]
    Rejected { status: u16 },
    #[error("Failed to encode request: {0}")]
    Encode(#[from] serde_json::Error),
}

impl From<gloo_net::Error> for TransportError {
    fn from(err: gloo_net::Error) -> Self {
        match err {
            gloo_net::Error::SerdeError(err) => TransportError::Encode(err),
            other => TransportError::Network(other.to_string()),
        }
    }
}

pub trait ContactTransport {
    fn submit(&self, request: ContactRequest)
        -> LocalBoxFuture<'static, Result<(), TransportError>>;
}

/// Posts the request as JSON and treats any 2xx answer as delivered.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

impl ContactTransport for HttpTransport {
    fn submit(
        &self,
        request: ContactRequest,
    ) -> LocalBoxFuture<'static, Result<(), TransportError>> {
        let endpoint = self.endpoint.clone();
        async move {
            let response = Request::post(&endpoint).json(&request)?.send().await?;
            if response.ok() {
                Ok(())
            } else {
                Err(TransportError::Rejected {
                    status: response.status(),
                })
            }
        }
        .boxed_local()
    }
}

/// Accepts everything after a fixed delay. Stands in for a backend while the
/// page has none.
#[derive(Debug, Clone)]
pub struct SimulatedTransport<S> {
    scheduler: S,
    delay_ms: u32,
}

impl<S> SimulatedTransport<S> {
    pub fn new(scheduler: S, delay_ms: u32) -> Self {
        Self {
            scheduler,
            delay_ms,
        }
    }
}

impl<S: Scheduler> ContactTransport for SimulatedTransport<S> {
    fn submit(
        &self,
        request: ContactRequest,
    ) -> LocalBoxFuture<'static, Result<(), TransportError>> {
        let (done, elapsed) = oneshot::channel();
        let timer = self.scheduler.after(
            self.delay_ms,
            Box::new(move || {
                let _ = done.send(());
            }),
        );
        async move {
            let outcome = elapsed.await;
            drop(timer);
            log::debug!("Simulated delivery of contact request from {}", request.email);
            outcome.map_err(|_| TransportError::Network("simulated delivery was cancelled".into()))
        }
        .boxed_local()
    }
}

/// The transport chosen at build time, see [`config::contact_endpoint`].
pub enum PageTransport {
    Http(HttpTransport),
    Simulated(SimulatedTransport<BrowserScheduler>),
}

impl PageTransport {
    pub fn from_config() -> Self {
        match config::contact_endpoint() {
            Some(endpoint) => {
                log::info!("Contact form posts to {}", endpoint);
                PageTransport::Http(HttpTransport::new(endpoint))
            }
            None => {
                log::info!("No contact endpoint configured, using simulated delivery");
                PageTransport::Simulated(SimulatedTransport::new(
                    BrowserScheduler,
                    config::SIMULATED_SUBMIT_DELAY_MS,
                ))
            }
        }
    }
}

impl ContactTransport for PageTransport {
    fn submit(
        &self,
        request: ContactRequest,
    ) -> LocalBoxFuture<'static, Result<(), TransportError>> {
        match self {
            PageTransport::Http(transport) => transport.submit(request),
            PageTransport::Simulated(transport) => transport.submit(request),
        }
    }
}
