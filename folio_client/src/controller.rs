use std::time::Duration;

use tracing::info;

use crate::{ContactApi, ContactForm, ContactFormError, SubmissionOutcome};

pub const SUCCESS_TEXT: &str = "Message sent successfully! Check your email for confirmation.";
pub const CONNECTION_ERROR_TEXT: &str = "Connection error. Is the server running?";

/// How long a success message stays visible.
pub const SUCCESS_AUTO_HIDE: Duration = Duration::from_secs(5);

/// The submit button of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitControl {
    pub disabled: bool,
    pub label: &'static str,
}

impl SubmitControl {
    pub const IDLE: Self = Self {
        disabled: false,
        label: "Send Message",
    };

    pub const SENDING: Self = Self {
        disabled: true,
        label: "Sending...",
    };
}

impl Default for SubmitControl {
    fn default() -> Self {
        Self::IDLE
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

/// The status line below the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
    /// Hide the message after this long. `None` keeps it until the next
    /// submission.
    pub auto_hide: Option<Duration>,
}

impl StatusMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Success,
            text: text.into(),
            auto_hide: Some(SUCCESS_AUTO_HIDE),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
            auto_hide: None,
        }
    }

    /// Whether the message is still shown `elapsed` after it appeared.
    pub fn is_visible_after(&self, elapsed: Duration) -> bool {
        self.auto_hide.map_or(true, |hide| elapsed < hide)
    }
}

/// State of the contact form across one or more submissions.
///
/// Nothing stops a caller from starting a second submission while the first
/// is still in flight; each one runs to completion independently.
#[derive(Debug, Clone, Default)]
pub struct FormController {
    pub form: ContactForm,
    control: SubmitControl,
    status: Option<StatusMessage>,
}

impl FormController {
    pub fn new(form: ContactForm) -> Self {
        Self {
            form,
            ..Default::default()
        }
    }

    pub fn control(&self) -> SubmitControl {
        self.control
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    /// Validate the form and enter the sending state. Returns the trimmed form
    /// to submit, or shows the validation error and leaves the control alone.
    pub fn begin(&mut self) -> Option<ContactForm> {
        self.prepare().ok()
    }

    /// Leave the sending state and show the outcome of a submission.
    pub fn finish(&mut self, outcome: SubmissionOutcome) -> &StatusMessage {
        let status = match outcome {
            SubmissionOutcome::Success { message } => {
                self.form = ContactForm::default();
                StatusMessage::success(message.unwrap_or_else(|| SUCCESS_TEXT.into()))
            }
            SubmissionOutcome::Rejected { error } => StatusMessage::error(error),
            SubmissionOutcome::TransportFailed => StatusMessage::error(CONNECTION_ERROR_TEXT),
        };

        self.control = SubmitControl::IDLE;
        self.status.insert(status)
    }

    /// Validate and submit the form. At most one request is sent.
    pub async fn submit(&mut self, api: &impl ContactApi) -> &StatusMessage {
        let form = match self.prepare() {
            Ok(form) => form,
            Err(err) => {
                info!(%err, "contact form is invalid, not submitting");
                return self.status.insert(StatusMessage::error(err.to_string()));
            }
        };

        let outcome = api.submit(&form).await;
        self.finish(outcome)
    }

    fn prepare(&mut self) -> Result<ContactForm, ContactFormError> {
        let form = self.form.trimmed();
        if let Err(err) = form.validate() {
            self.status = Some(StatusMessage::error(err.to_string()));
            return Err(err);
        }

        self.status = None;
        self.control = SubmitControl::SENDING;
        Ok(form)
    }
}
