//! Client side of the contact form: local validation, submission to the relay
//! endpoint and the state of the form while a submission is in flight.

use std::{future::Future, ops::Deref, sync::LazyLock};

use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

pub use crate::{
    controller::{FormController, StatusKind, StatusMessage, SubmitControl},
    form::{ContactForm, ContactFormError},
};

mod controller;
mod form;

pub static USER_AGENT: LazyLock<String> =
    LazyLock::new(|| format!("folio/{}", env!("CARGO_PKG_VERSION")));

/// Shown when the server rejected a submission without saying why.
pub const FALLBACK_ERROR: &str = "Failed to send message";

#[derive(Debug, Clone)]
pub struct HttpClient(reqwest::Client);

impl Deref for HttpClient {
    type Target = reqwest::Client;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl HttpClient {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self(
            reqwest::Client::builder()
                .user_agent(&*USER_AGENT)
                .build()?,
        ))
    }
}

/// The three ways a submission can end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// 2xx with `success: true`.
    Success { message: Option<String> },
    /// The server answered, but did not accept the submission.
    Rejected { error: String },
    /// The server could not be reached or the connection broke.
    TransportFailed,
}

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait ContactApi: Send + Sync + 'static {
    /// Send one submission. `form` must already be validated.
    fn submit(&self, form: &ContactForm) -> impl Future<Output = SubmissionOutcome> + Send;
}

#[cfg(any(test, feature = "mock"))]
impl MockContactApi {
    pub fn with_submit(mut self, form: ContactForm, outcome: SubmissionOutcome) -> Self {
        self.expect_submit()
            .once()
            .with(mockall::predicate::eq(form))
            .return_once(|_| Box::pin(std::future::ready(outcome)));
        self
    }
}

#[derive(Debug, Clone)]
pub struct ContactClient {
    http: HttpClient,
    endpoint: Url,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    success: bool,
    message: Option<String>,
    error: Option<String>,
}

impl ContactClient {
    pub const ENDPOINT: &'static str = "api/send-email";

    /// Create a client for the relay running at `base_url`.
    pub fn new(http: HttpClient, base_url: &Url) -> anyhow::Result<Self> {
        Ok(Self {
            http,
            endpoint: base_url.join(Self::ENDPOINT)?,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl ContactApi for ContactClient {
    #[tracing::instrument(skip_all, fields(endpoint = %self.endpoint))]
    async fn submit(&self, form: &ContactForm) -> SubmissionOutcome {
        let response = match self.http.post(self.endpoint.clone()).json(form).send().await {
            Ok(response) => response,
            Err(err) => {
                warn!("Failed to reach contact endpoint: {err}");
                return SubmissionOutcome::TransportFailed;
            }
        };

        let status = response.status();
        let body = match response.bytes().await {
            Ok(body) => body,
            Err(err) => {
                warn!("Failed to read contact endpoint response: {err}");
                return SubmissionOutcome::TransportFailed;
            }
        };
        let body = serde_json::from_slice::<ApiResponse>(&body)
            .inspect_err(|err| debug!(%status, "contact endpoint returned no json: {err}"))
            .ok();

        match body {
            Some(body) if status.is_success() && body.success => SubmissionOutcome::Success {
                message: body.message,
            },
            body => SubmissionOutcome::Rejected {
                error: body
                    .and_then(|body| body.error)
                    .filter(|error| !error.trim().is_empty())
                    .unwrap_or_else(|| FALLBACK_ERROR.into()),
            },
        }
    }
}
